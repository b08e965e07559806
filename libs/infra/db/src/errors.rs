//! Database error catalog: one enum covering connection, query and
//! mapping failures, with bracketed fault codes for grep-ability in
//! aggregated log output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// Pool acquisition or network-level failure.
    #[error("[db:connection] {0}")]
    Connection(String),

    /// Startup configuration is missing or self-contradictory
    /// (e.g. `DB_POOL_MIN > DB_POOL_MAX`).
    #[error("[db:config] {0}")]
    Configuration(String),

    /// A query was rejected by Postgres or the driver.
    #[error("[db:query] {0}")]
    Query(#[from] sqlx::Error),

    /// A stored value didn't round-trip into its domain type (an
    /// unrecognized `job_type`/`status` discriminator, most often).
    #[error("[db:mapping] {0}")]
    Mapping(String),

    /// A lookup by id found no matching row.
    #[error("[db:not_found] {0} {1}")]
    NotFound(&'static str, String),
}
