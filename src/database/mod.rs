use error_stack::{Report, ResultExt};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::{str::FromStr, time::Duration};

use crate::config;

pub mod error;
pub use error::*;

pub type PoolConnection = sqlx::pool::PoolConnection<sqlx::Postgres>;
pub type Connection = sqlx::PgConnection;

/// Lazily-connecting Postgres pool. Connections are only established
/// once something actually asks for one, so the server can boot while
/// the database is still coming up.
#[derive(Clone)]
pub struct Pool {
    pool: sqlx::PgPool,
}

impl Pool {
    pub(crate) async fn new(cfg: &config::Database) -> Result<Self> {
        let mut pool_opts = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(cfg.timeout_secs.get()))
            .max_connections(cfg.pool_size.get());

        if let Some(min_idle) = cfg.min_idle {
            pool_opts = pool_opts.min_connections(min_idle.get());
        }

        let mut connect_opts =
            PgConnectOptions::from_str(&cfg.url).change_context(Error::InvalidUrl)?;

        if cfg.enforce_tls {
            connect_opts = connect_opts.ssl_mode(PgSslMode::Prefer);
        }

        let pool = Self {
            pool: pool_opts.connect_lazy_with(connect_opts),
        };

        match pool.wait_until_healthy().await {
            Ok(..) => {}
            Err(err) if err.is_unhealthy() => {}
            Err(err) => return Err(err),
        }

        Ok(pool)
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.pool.fmt(f)
    }
}

impl Pool {
    #[inline(always)]
    pub fn connections(&self) -> u32 {
        self.pool.size()
    }

    #[inline(always)]
    pub fn is_healthy(&self) -> bool {
        self.connections() > 0
    }

    #[tracing::instrument(name = "db.connect", skip(self))]
    pub async fn get(&self) -> Result<PoolConnection> {
        if let Some(inner) = self.pool.try_acquire() {
            Ok(inner)
        } else if !self.is_healthy() {
            Err(Error::UnhealthyPool.into())
        } else {
            let result = self.pool.acquire().await;
            result.map_err(|e| Report::new(Error::Internal(e)))
        }
    }

    #[tracing::instrument(name = "db.migrate", skip(self))]
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Report::new(Error::Migration(e)))
    }

    #[tracing::instrument(skip(self))]
    pub async fn wait_until_healthy(&self) -> Result<()> {
        match self.pool.acquire().await {
            Ok(..) => Ok(()),
            Err(e) if !self.is_healthy() => Err(e).change_context(Error::UnhealthyPool),
            Err(err) => Err(Report::new(Error::Internal(err))),
        }
    }
}
