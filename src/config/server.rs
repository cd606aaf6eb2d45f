use error_stack::{Report, Result};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

use super::ParseError;
use crate::util::figment::FigmentErrorAttachable;

/// Runtime mode. The only behavioral difference is how much internal
/// error detail the default log filter lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Development
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    /// Address the HTTP server binds to.
    ///
    /// **Environment variables**: `WICKET_IP`
    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,
    /// Port the HTTP server listens on.
    ///
    /// **Environment variables**: `WICKET_PORT` or `PORT`
    #[serde(default = "Server::default_port")]
    pub port: u16,
    /// Path segment all versioned user routes are mounted under.
    ///
    /// **Environment variables**: `WICKET_API_PREFIX`
    #[serde(default = "Server::default_api_prefix")]
    pub api_prefix: String,
    /// **Environment variables**: `WICKET_MODE`
    #[serde(default)]
    pub mode: Mode,
    /// bcrypt work factor used when hashing passwords at registration.
    ///
    /// **Environment variables**: `WICKET_HASH_COST`
    #[serde(default = "Server::default_hash_cost")]
    pub hash_cost: u32,
    pub db: super::Database,
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();

        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config.validate()?;
        Ok(config)
    }

    // bcrypt rejects costs outside this range at hash time; catching a
    // bad value at startup beats failing every registration request.
    // A non-numeric work factor already fails figment extraction above.
    fn validate(&self) -> Result<(), ParseError> {
        if !(Self::MIN_HASH_COST..=Self::MAX_HASH_COST).contains(&self.hash_cost) {
            return Err(Report::new(ParseError).attach_printable(format!(
                "hash_cost must be between {} and {}, got {}",
                Self::MIN_HASH_COST,
                Self::MAX_HASH_COST,
                self.hash_cost
            )));
        }

        if !self.api_prefix.starts_with('/') || self.api_prefix.ends_with('/') {
            return Err(Report::new(ParseError).attach_printable(format!(
                "api_prefix must start with '/' and not end with one, got {:?}",
                self.api_prefix
            )));
        }

        if self.db.url.is_empty() {
            return Err(Report::new(ParseError).attach_printable("db.url must not be empty"));
        }

        Ok(())
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "wicket.yml";

    const MIN_HASH_COST: u32 = 4;
    const MAX_HASH_COST: u32 = 31;

    /// Creates the default [`figment::Figment`] used to load server
    /// configuration. Split out from [`Server::load`] for testing.
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Yaml},
            Figment,
        };

        Figment::new()
            .merge(Yaml::file(Self::DEFAULT_CONFIG_FILE))
            // figment's env provider splits on underscores, so nested
            // fields with underscores in their names need explicit maps.
            .merge(Env::prefixed("WICKET_").map(|v| match v.as_str() {
                "DB_URL" => "db.url".into(),
                "DB_MIN_IDLE" => "db.min_idle".into(),
                "DB_POOL_SIZE" => "db.pool_size".into(),
                "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
                "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),
                "API_PREFIX" => "api_prefix".into(),
                "HASH_COST" => "hash_cost".into(),
                _ => v.as_str().replace('_', ".").into(),
            }))
            // Environment variable aliases
            .merge(Env::raw().map(|v| match v.as_str() {
                "DATABASE_URL" => "db.url".into(),
                "PORT" => "port".into(),
                _ => v.into(),
            }))
    }

    // Required by serde
    const fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    const fn default_port() -> u16 {
        3000
    }

    fn default_api_prefix() -> String {
        "/api/v1".to_string()
    }

    const fn default_hash_cost() -> u32 {
        crate::crypto::DEFAULT_COST
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::num::NonZeroU32;

    #[test]
    fn defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://localhost/wicket");

            let config: Server = Server::figment().extract()?;
            assert_eq!(config.ip, Server::default_ip());
            assert_eq!(config.port, 3000);
            assert_eq!(config.api_prefix, "/api/v1");
            assert_eq!(config.mode, Mode::Development);
            assert_eq!(config.hash_cost, 10);
            assert_eq!(config.db.url, "postgres://localhost/wicket");

            assert!(config.validate().is_ok());
            Ok(())
        });
    }

    #[test]
    fn env_aliases() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "hello world!");
            jail.set_env("PORT", "8080");

            jail.set_env("WICKET_MODE", "production");
            jail.set_env("WICKET_HASH_COST", "12");
            jail.set_env("WICKET_API_PREFIX", "/api/v2");
            jail.set_env("WICKET_DB_POOL_SIZE", "100");
            jail.set_env("WICKET_DB_TIMEOUT_SECS", "3030");

            let config: Server = Server::figment().extract()?;
            assert_eq!(config.db.url.as_str(), "hello world!");
            assert_eq!(config.port, 8080);
            assert_eq!(config.mode, Mode::Production);
            assert_eq!(config.hash_cost, 12);
            assert_eq!(config.api_prefix, "/api/v2");
            assert_eq!(config.db.pool_size, NonZeroU32::new(100).unwrap());
            assert_eq!(config.db.timeout_secs.get(), 3030);

            Ok(())
        });
    }

    #[test]
    fn rejects_out_of_range_hash_cost() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://localhost/wicket");
            jail.set_env("WICKET_HASH_COST", "3");

            let config: Server = Server::figment().extract()?;
            assert!(config.validate().is_err());
            Ok(())
        });
    }

    #[test]
    fn rejects_non_numeric_hash_cost() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://localhost/wicket");
            jail.set_env("WICKET_HASH_COST", "lots");

            assert!(Server::figment().extract::<Server>().is_err());
            Ok(())
        });
    }
}
