//! Typed startup configuration (C0), parsed from environment (with an
//! optional `.env` in dev, loaded by the binary's `main` via
//! `dotenvy` before [`WorkerConfig::parse`] runs). Fails fast — a
//! missing `DATABASE_URL` or an inverted pool-size pair is a
//! configuration error, not a job failure, per `spec.md` §7.

use std::time::Duration;

use clap::Parser;

use newsroom_infra_db::DbError;

const DEFAULT_DB_POOL_MIN: u32 = 1;
const DEFAULT_DB_POOL_MAX: u32 = 5;
const DEFAULT_DB_CONN_TIMEOUT_SECONDS: u64 = 5;
const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 5;

#[derive(Parser, Debug, Clone)]
#[command(about = "News ingestion NLP worker")]
pub struct WorkerConfig {
    /// Postgres connection string. May carry a `schema=<name>` query
    /// parameter, translated at connect time into `SET search_path`.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    #[arg(long, env = "DB_POOL_MIN", default_value_t = DEFAULT_DB_POOL_MIN)]
    pub db_pool_min: u32,

    #[arg(long, env = "DB_POOL_MAX", default_value_t = DEFAULT_DB_POOL_MAX)]
    pub db_pool_max: u32,

    #[arg(long, env = "DB_CONN_TIMEOUT", default_value_t = DEFAULT_DB_CONN_TIMEOUT_SECONDS)]
    pub db_conn_timeout_seconds: u64,

    /// Accepted for interface compatibility; TLS negotiation itself is
    /// handled by sqlx's rustls runtime feature, not by hand here.
    #[arg(long, env = "DB_SSL_MODE")]
    pub db_ssl_mode: Option<String>,

    #[arg(long, env = "POLL_INTERVAL_SECONDS", default_value_t = DEFAULT_POLL_INTERVAL_SECONDS)]
    pub poll_interval_seconds: u64,

    /// Worker identity surfaced in tracing spans and logs; does not
    /// gate any behavior — there is no worker registry to join.
    #[arg(long, env = "WORKER_ID", default_value_t = default_worker_id())]
    pub worker_id: String,
}

impl WorkerConfig {
    pub fn db_conn_timeout(&self) -> Duration {
        Duration::from_secs(self.db_conn_timeout_seconds)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    /// Fails fast on a self-contradictory pool configuration rather
    /// than deferring the error to the first connection attempt.
    pub fn validate(&self) -> Result<(), DbError> {
        if self.db_pool_min > self.db_pool_max {
            return Err(DbError::Configuration(format!(
                "DB_POOL_MIN ({}) exceeds DB_POOL_MAX ({})",
                self.db_pool_min, self.db_pool_max
            )));
        }
        Ok(())
    }
}

fn default_worker_id() -> String {
    let hostname = hostname_or_fallback();
    let suffix = std::process::id();
    format!("{hostname}-{suffix}")
}

fn hostname_or_fallback() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "worker".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> WorkerConfig {
        WorkerConfig {
            database_url: "postgres://localhost/test".to_string(),
            db_pool_min: 1,
            db_pool_max: 5,
            db_conn_timeout_seconds: 5,
            db_ssl_mode: None,
            poll_interval_seconds: 5,
            worker_id: "test-worker".to_string(),
        }
    }

    #[test]
    fn validates_sane_pool_bounds() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let mut config = base_config();
        config.db_pool_min = 10;
        config.db_pool_max = 2;
        assert!(config.validate().is_err());
    }
}
