use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::Router;
use tokio::sync::broadcast;

use vocab_drill::config::{Config, SchedulerConfig, SessionConfig, WorkerConfig};
use vocab_drill::logging::LogFormat;
use vocab_drill::routes::build_router;
use vocab_drill::state::AppState;
use vocab_drill::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
}

/// Config built directly so tests never race on process env vars.
pub fn test_config(scheduler: SchedulerConfig) -> Config {
    Config {
        host: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        log_format: LogFormat::Pretty,
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        cors_origin: "*".to_string(),
        scheduler,
        session: SessionConfig::default(),
        worker: WorkerConfig { enabled: false },
    }
}

pub async fn spawn_test_app_with(scheduler: SchedulerConfig) -> TestApp {
    let config = test_config(scheduler);
    let (shutdown_tx, _) = broadcast::channel::<()>(8);
    let state = AppState::new(Arc::new(Store::new()), &config, shutdown_tx);
    let app = build_router(state.clone());

    TestApp { app, state, config }
}

pub async fn spawn_test_app() -> TestApp {
    spawn_test_app_with(SchedulerConfig::default()).await
}
