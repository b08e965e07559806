//! The capability set a job-type-specific worker implements, per
//! Design Note "Abstract-method polymorphism": a free-standing value
//! the dispatcher holds and calls through, not a base class the
//! dispatcher is built from.

use std::time::Duration;

use async_trait::async_trait;
use newsroom_domain_models::JobType;
use serde_json::Value;

/// Implemented once per job type (`deduplication`, `summarization`).
/// `process` must be total from the dispatcher's perspective — any
/// error returned here is caught, stringified, and funneled through
/// the retry machine (`spec.md` §7's propagation policy); `process`
/// itself never needs to touch `Job.attempts` or `Job.status`.
#[async_trait]
pub trait JobProcessor: Send + Sync {
    /// The job type this processor claims work for.
    fn job_type(&self) -> JobType;

    /// How long to sleep between claim attempts when the queue is
    /// empty for this job type.
    fn poll_interval(&self) -> Duration;

    /// Executes one claimed job's payload, returning the JSON result
    /// to persist on success. Any `Err` is treated as a job failure
    /// and routed to backoff-retry or terminal `failed`.
    async fn process(&self, payload: Value) -> anyhow::Result<Value>;
}
