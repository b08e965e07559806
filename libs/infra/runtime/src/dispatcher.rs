//! Poll/claim/process/complete loop (C7 + C8): the free-standing
//! dispatcher that holds a [`JobProcessor`] value and drives it
//! against a shared `jobs` table.
//!
//! One `Dispatcher` runs one job type. A deployment wanting both
//! `deduplication` and `summarization` throughput runs two worker
//! processes (or two tasks within one process), each with its own
//! `Dispatcher` — they never share an LSH index or any other
//! in-process state, only the database.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sqlx::PgPool;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

use newsroom_domain_models::ClaimedJob;
use newsroom_infra_db::JobRepository;

use crate::processor::JobProcessor;

pub struct Dispatcher<P: JobProcessor> {
    pool: PgPool,
    processor: P,
    running: Arc<AtomicBool>,
}

impl<P: JobProcessor> Dispatcher<P> {
    pub fn new(pool: PgPool, processor: P, running: Arc<AtomicBool>) -> Self {
        Self { pool, processor, running }
    }

    /// Runs until `running` is flipped to `false`, at which point the
    /// loop drains (finishes or abandons whatever claim attempt is
    /// in flight) and returns. There is no mid-job cancellation: once
    /// a job is claimed, it always runs to completion or panic.
    pub async fn run(&self) {
        info!(job_type = self.processor.job_type().as_str(), "dispatcher starting poll loop");

        while self.running.load(Ordering::SeqCst) {
            let repo = JobRepository::new(&self.pool);
            match repo.claim_next(self.processor.job_type()).await {
                Ok(Some(claimed)) => {
                    self.execute(claimed).await;
                }
                Ok(None) => {
                    sleep(self.processor.poll_interval()).await;
                }
                Err(e) => {
                    error!(error = %e, "claim attempt failed, backing off");
                    sleep(self.processor.poll_interval()).await;
                }
            }
        }

        info!(job_type = self.processor.job_type().as_str(), "dispatcher draining, poll loop stopped");
    }

    #[instrument(skip(self, claimed), fields(job_id = %claimed.id, job_type = claimed.job_type.as_str(), attempts = claimed.attempts))]
    async fn execute(&self, claimed: ClaimedJob) {
        let repo = JobRepository::new(&self.pool);

        match self.processor.process(claimed.payload.clone()).await {
            Ok(result) => {
                if let Err(e) = repo.complete(claimed.id, result).await {
                    error!(error = %e, "failed to persist job completion");
                }
            }
            Err(e) => {
                warn!(error = %e, "job processing failed");
                if let Err(db_err) = repo
                    .retry_or_fail(claimed.id, claimed.attempts, claimed.max_attempts, &e.to_string())
                    .await
                {
                    error!(error = %db_err, "failed to persist job retry/failure state");
                }
            }
        }
    }
}
