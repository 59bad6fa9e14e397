//! Cron scheduler for periodic dashboard refreshes.

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use officehub_core::config::WorkerConfig;
use officehub_core::error::AppError;
use officehub_dashboard::{RefreshTrigger, SyncHandle};

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Trigger channel into the refresh loop
    sync: SyncHandle,
    /// Worker configuration
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("refresh_cron", &self.config.refresh_cron)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(sync: SyncHandle, config: WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            sync,
            config,
        })
    }

    /// Register all scheduled tasks
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        if !self.config.enabled {
            tracing::info!("Scheduled refresh disabled by configuration");
            return Ok(());
        }

        let job = refresh_job(&self.config.refresh_cron, self.sync.clone())?;
        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add dashboard_refresh schedule: {}", e))
        })?;

        tracing::info!(
            "Registered: dashboard_refresh ({})",
            self.config.refresh_cron
        );
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}

/// Build the job that submits a timer trigger on every tick of `schedule`.
pub fn refresh_job(schedule: &str, sync: SyncHandle) -> Result<CronJob, AppError> {
    CronJob::new_async(schedule, move |_uuid, _lock| {
        let sync = sync.clone();
        Box::pin(async move {
            tracing::trace!("Scheduling dashboard refresh");
            if !sync.submit(RefreshTrigger::timer()) {
                tracing::error!("Failed to submit dashboard_refresh: refresh loop stopped");
            }
        })
    })
    .map_err(|e| {
        AppError::configuration(format!(
            "Invalid worker.refresh_cron '{}': {}",
            schedule, e
        ))
    })
}
