//! Postgres persistence layer: idempotent schema migration plus
//! per-entity repositories for jobs, articles, clusters and sources.
//!
//! Nothing here is a global or a singleton — every repository borrows
//! a `&PgPool` handed to it by the worker runtime, per Design Note
//! "Process-wide pool state" (see workspace `DESIGN.md`).

pub mod errors;
pub mod pool;
pub mod repositories;
pub mod schema;

pub use errors::DbError;
pub use pool::connect;
pub use repositories::article::ArticleRepository;
pub use repositories::cluster::ClusterRepository;
pub use repositories::job::JobRepository;
pub use repositories::source::SourceRepository;
