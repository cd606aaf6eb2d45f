use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::{config, database};

#[derive(Debug, Clone)]
pub struct App {
    pub config: Arc<config::Server>,
    pub db: database::Pool,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
    // The config carries the connection url; keep it out of the span.
    #[tracing::instrument(skip_all)]
    pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
        let db = database::Pool::new(&cfg.db)
            .await
            .change_context(AppError)?;

        // A cold pool is tolerated at boot; migrations then run on the
        // next boot once the database is reachable.
        if db.is_healthy() {
            db.run_migrations().await.change_context(AppError)?;
        } else {
            tracing::warn!("database is not reachable yet; skipping migrations");
        }

        let app = Self {
            config: Arc::new(cfg),
            db,
        };

        Ok(app)
    }
}

impl App {
    #[tracing::instrument(skip_all)]
    pub async fn db_write(&self) -> Result<database::PoolConnection, database::Error> {
        self.db.get().await
    }

    // Reads go through the same pool today; the split call sites keep
    // the door open for a read replica without touching the services.
    #[tracing::instrument(skip_all)]
    pub async fn db_read(&self) -> Result<database::PoolConnection, database::Error> {
        self.db.get().await
    }
}
