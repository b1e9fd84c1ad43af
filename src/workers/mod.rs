pub mod session_cleanup;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::{SessionConfig, WorkerConfig};
use crate::session::SessionRegistry;

/// Timeout for individual worker invocations.
const WORKER_TIMEOUT: Duration = Duration::from_secs(60);

/// Drain period before scheduler shutdown to let in-flight tasks complete.
#[cfg(test)]
const DRAIN_TIMEOUT: Duration = Duration::from_millis(10);
#[cfg(not(test))]
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerName {
    SessionCleanup,
}

impl WorkerName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SessionCleanup => "session_cleanup",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub name: WorkerName,
    pub cron: String,
    pub enabled: bool,
}

pub struct WorkerManager {
    sessions: Arc<SessionRegistry>,
    shutdown_rx: broadcast::Receiver<()>,
    config: WorkerConfig,
    session_config: SessionConfig,
}

impl WorkerManager {
    pub fn new(
        sessions: Arc<SessionRegistry>,
        shutdown_rx: broadcast::Receiver<()>,
        config: &WorkerConfig,
        session_config: &SessionConfig,
    ) -> Self {
        Self {
            sessions,
            shutdown_rx,
            config: config.clone(),
            session_config: session_config.clone(),
        }
    }

    /// Every job this manager would register, with its schedule.
    pub fn planned_jobs(&self) -> Vec<JobSpec> {
        if !self.config.enabled {
            return Vec::new();
        }

        vec![JobSpec {
            name: WorkerName::SessionCleanup,
            cron: self.session_config.cleanup_cron.clone(),
            enabled: self.session_config.idle_timeout().is_some(),
        }]
    }

    /// Run the scheduler until the shutdown signal fires.
    pub async fn start(mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.config.enabled {
            tracing::info!("Workers disabled; skipping worker startup");
            return Ok(());
        }

        let mut scheduler = JobScheduler::new().await?;
        self.register_jobs(&scheduler).await;
        scheduler.start().await?;

        tracing::info!("Worker manager started");
        let _ = self.shutdown_rx.recv().await;

        tracing::info!(
            drain_ms = DRAIN_TIMEOUT.as_millis() as u64,
            "Worker manager shutting down"
        );
        tokio::time::sleep(DRAIN_TIMEOUT).await;
        let _ = scheduler.shutdown().await;
        Ok(())
    }

    async fn register_jobs(&self, scheduler: &JobScheduler) {
        for spec in self.planned_jobs() {
            let name_str = spec.name.as_str();
            if !spec.enabled {
                tracing::info!(name = name_str, "Skipping disabled worker");
                continue;
            }

            match spec.name {
                WorkerName::SessionCleanup => {
                    let Some(max_idle) = self.session_config.idle_timeout() else {
                        continue;
                    };
                    let sessions = self.sessions.clone();
                    add_job(scheduler, &spec.cron, name_str, move || {
                        let sessions = sessions.clone();
                        async move {
                            session_cleanup::run(&sessions, max_idle).await;
                        }
                    })
                    .await;
                }
            }
            tracing::info!(name = name_str, cron = %spec.cron, "Registered worker");
        }
    }
}

/// Add a job to the scheduler with an overlap guard and timeout wrapper.
async fn add_job<Fut, F>(scheduler: &JobScheduler, cron: &str, name: &'static str, mut run: F)
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let running = Arc::new(AtomicBool::new(false));

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let guard = running.clone();

        if guard
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!(
                worker = name,
                "Skipping worker invocation: previous run still in progress"
            );
            return Box::pin(async {});
        }

        let fut = run();
        Box::pin(async move {
            if tokio::time::timeout(WORKER_TIMEOUT, fut).await.is_err() {
                tracing::error!(
                    worker = name,
                    timeout_secs = WORKER_TIMEOUT.as_secs(),
                    "Worker timed out"
                );
            }
            guard.store(false, Ordering::SeqCst);
        })
    });

    match job {
        Ok(job) => {
            if let Err(err) = scheduler.add(job).await {
                tracing::error!(error = %err, cron, worker = name, "Failed to add worker job");
            }
        }
        Err(err) => tracing::error!(error = %err, cron, worker = name, "Failed to create worker job"),
    }
}
