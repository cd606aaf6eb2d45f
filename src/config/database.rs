use serde::Deserialize;
use std::num::{NonZeroU32, NonZeroU64};

/// Configuration for connecting to the Postgres database.
#[derive(Debug, Deserialize)]
pub struct Database {
    /// Connection URL of the Postgres database.
    ///
    /// **Environment variables**: `WICKET_DB_URL` or `DATABASE_URL`
    pub url: String,
    /// Minimum idle database connections kept around so a burst of
    /// requests does not start from a cold pool.
    ///
    /// **Environment variables**: `WICKET_DB_MIN_IDLE`
    pub min_idle: Option<NonZeroU32>,
    /// Maximum amount of connections the pool may hold.
    ///
    /// **Environment variables**: `WICKET_DB_POOL_SIZE`
    #[serde(default = "Database::default_pool_size")]
    pub pool_size: NonZeroU32,
    /// Whether database connections should be encrypted with TLS
    /// when the server supports it.
    ///
    /// **Environment variables**: `WICKET_DB_ENFORCE_TLS`
    #[serde(default = "Database::default_enforce_tls")]
    pub enforce_tls: bool,
    /// How long acquiring a connection may take before the request
    /// gives up on the pool.
    ///
    /// **Environment variables**: `WICKET_DB_TIMEOUT_SECS`
    #[serde(default = "Database::default_pool_timeout_secs")]
    pub timeout_secs: NonZeroU64,
}

impl Database {
    const DEFAULT_POOL_SIZE: u32 = 5;
    const DEFAULT_POOL_TIMEOUT_SECS: u64 = 5;

    // Required by serde
    const fn default_pool_size() -> NonZeroU32 {
        match NonZeroU32::new(Self::DEFAULT_POOL_SIZE) {
            Some(n) => n,
            None => panic!("DEFAULT_POOL_SIZE is accidentally set to 0"),
        }
    }

    const fn default_pool_timeout_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_POOL_TIMEOUT_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_POOL_TIMEOUT_SECS is accidentally set to 0"),
        }
    }

    const fn default_enforce_tls() -> bool {
        true
    }
}
