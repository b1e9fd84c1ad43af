use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use tokio::sync::broadcast;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use vocab_drill::config::Config;
use vocab_drill::logging::{init_tracing, LogConfig};
use vocab_drill::routes::build_router;
use vocab_drill::state::AppState;
use vocab_drill::store::Store;
use vocab_drill::workers::WorkerManager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    init_tracing(&LogConfig {
        log_level: config.log_level.clone(),
        format: config.log_format,
        enable_file_logs: config.enable_file_logs,
        log_dir: config.log_dir.clone(),
    });
    tracing::info!(
        score_multiplier = config.scheduler.score_multiplier,
        recency_capacity = config.scheduler.recency_capacity,
        candidate_limit = config.scheduler.candidate_limit,
        "Starting vocab-drill"
    );

    let store = Arc::new(Store::new());
    let (shutdown_tx, _) = broadcast::channel::<()>(8);
    let state = AppState::new(store, &config, shutdown_tx.clone());

    let worker_handle = if config.worker.enabled {
        let worker_manager = WorkerManager::new(
            state.sessions().clone(),
            shutdown_tx.subscribe(),
            &config.worker,
            &config.session,
        );
        Some(tokio::spawn(async move {
            if let Err(e) = worker_manager.start().await {
                tracing::error!(error = %e, "Worker manager failed");
            }
        }))
    } else {
        None
    };

    let app = build_router(state)
        .layer(build_cors_layer(&config))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ));

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx.clone()))
        .await;

    // A server error skips the signal handler; make sure workers stop too.
    let _ = shutdown_tx.send(());
    if let Some(handle) = worker_handle {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Worker task panicked");
        }
    }

    if let Err(e) = &served {
        tracing::error!(error = %e, "HTTP server crashed");
    }
    tracing::info!("Shutdown complete");
    served.map_err(Into::into)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_methods(Any);

    if config.cors_origin.trim() == "*" {
        return base.allow_origin(Any);
    }

    match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => base.allow_origin(origin),
        Err(e) => {
            tracing::warn!(
                origin = %config.cors_origin,
                error = %e,
                "Invalid CORS_ORIGIN, allowing any origin"
            );
            base.allow_origin(Any)
        }
    }
}

async fn shutdown_signal(shutdown_tx: broadcast::Sender<()>) {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(());
}
