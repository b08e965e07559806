//! Job queue repository: enqueue, atomic claim, completion and
//! backoff-retry.
//!
//! `Job` carries `job_type`/`status` as plain `TEXT` columns, so every
//! row here is mapped by hand rather than through `FromRow` — see
//! `newsroom_domain_models::job`.

use std::str::FromStr;

use chrono::{Duration, Utc};
use sqlx::{PgPool, Row};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use newsroom_domain_models::{ClaimedJob, JobType};

use crate::errors::DbError;

const DEFAULT_MAX_ATTEMPTS: i32 = 3;

pub struct JobRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> JobRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, payload))]
    pub async fn enqueue(
        &self,
        job_type: JobType,
        payload: serde_json::Value,
    ) -> Result<Uuid, DbError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO jobs (id, job_type, payload, max_attempts) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(job_type.as_str())
        .bind(payload)
        .bind(DEFAULT_MAX_ATTEMPTS)
        .execute(self.pool)
        .await?;

        info!(job_id = %id, job_type = job_type.as_str(), "enqueued job");
        Ok(id)
    }

    /// Claims one pending, due job of `job_type`, atomically flipping
    /// it to `processing` in the same statement that selects it.
    /// `FOR UPDATE SKIP LOCKED` lets concurrent workers race the same
    /// table without blocking on each other's candidate rows.
    #[instrument(skip(self))]
    pub async fn claim_next(&self, job_type: JobType) -> Result<Option<ClaimedJob>, DbError> {
        let row = sqlx::query(
            r#"
            WITH next_job AS (
                SELECT id FROM jobs
                WHERE job_type = $1 AND status = 'pending' AND scheduled_for <= now()
                ORDER BY scheduled_for ASC
                FOR UPDATE SKIP LOCKED
                LIMIT 1
            )
            UPDATE jobs
            SET status = 'processing', started_at = now(), attempts = attempts + 1, updated_at = now()
            FROM next_job
            WHERE jobs.id = next_job.id
            RETURNING jobs.id, jobs.job_type, jobs.payload, jobs.attempts, jobs.max_attempts
            "#,
        )
        .bind(job_type.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let job_type_raw: String = row.try_get("job_type")?;
        let job_type = JobType::from_str(&job_type_raw)
            .map_err(DbError::Mapping)?;

        Ok(Some(ClaimedJob {
            id: row.try_get("id")?,
            job_type,
            payload: row.try_get("payload")?,
            attempts: row.try_get("attempts")?,
            max_attempts: row.try_get("max_attempts")?,
        }))
    }

    #[instrument(skip(self, result))]
    pub async fn complete(&self, job_id: Uuid, result: serde_json::Value) -> Result<(), DbError> {
        sqlx::query(
            "UPDATE jobs SET status = 'completed', result = $2, completed_at = now(), updated_at = now() WHERE id = $1",
        )
        .bind(job_id)
        .bind(result)
        .execute(self.pool)
        .await?;

        info!(job_id = %job_id, "job completed");
        Ok(())
    }

    /// Retries with exponential backoff (`2^(attempts-1)` minutes,
    /// computed as a true duration — never by incrementing the
    /// minute field directly) while `attempts < max_attempts`,
    /// otherwise marks the job `failed`.
    #[instrument(skip(self, error_message))]
    pub async fn retry_or_fail(
        &self,
        job_id: Uuid,
        attempts: i32,
        max_attempts: i32,
        error_message: &str,
    ) -> Result<(), DbError> {
        if attempts < max_attempts {
            let backoff_minutes = 1i64 << (attempts - 1).max(0);
            let scheduled_for = Utc::now() + Duration::minutes(backoff_minutes);

            sqlx::query(
                "UPDATE jobs SET status = 'pending', scheduled_for = $2, error_message = $3, updated_at = now() WHERE id = $1",
            )
            .bind(job_id)
            .bind(scheduled_for)
            .bind(error_message)
            .execute(self.pool)
            .await?;

            warn!(job_id = %job_id, attempts, backoff_minutes, "job failed, scheduled for retry");
        } else {
            sqlx::query(
                "UPDATE jobs SET status = 'failed', error_message = $2, completed_at = now(), updated_at = now() WHERE id = $1",
            )
            .bind(job_id)
            .bind(error_message)
            .execute(self.pool)
            .await?;

            warn!(job_id = %job_id, attempts, "job exhausted retries, marked failed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_each_attempt() {
        assert_eq!(1i64 << (1 - 1), 1);
        assert_eq!(1i64 << (2 - 1), 2);
        assert_eq!(1i64 << (3 - 1), 4);
    }
}
