//! Integration tests for the claim protocol (C7), exercised against a
//! real Postgres instance rather than mocked — matching the teacher's
//! own DB-connected test style. Skipped (not failed) when `DATABASE_URL`
//! isn't set, since no fake/in-memory stand-in for `FOR UPDATE SKIP
//! LOCKED` semantics would actually prove anything here.

use std::env;

use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use newsroom_domain_models::JobType;
use newsroom_infra_db::{schema, JobRepository};

async fn test_pool() -> Option<PgPool> {
    let url = env::var("DATABASE_URL").ok()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(8)
        .connect(&url)
        .await
        .expect("failed to connect to test database");
    schema::apply(&pool).await.expect("failed to level schema");
    Some(pool)
}

/// Invariant 5 in `spec.md` §8: across any number of concurrent
/// claimants against N pending jobs, total successful claims never
/// exceeds N.
#[tokio::test]
async fn concurrent_claims_never_double_claim() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let job_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO jobs (id, job_type, payload, max_attempts) VALUES ($1, 'deduplication', $2, 3)",
    )
    .bind(job_id)
    .bind(json!({"article_ids": ["a1"]}))
    .execute(&pool)
    .await
    .unwrap();

    let first_pool = pool.clone();
    let second_pool = pool.clone();

    let first = tokio::spawn(async move {
        JobRepository::new(&first_pool).claim_next(JobType::Deduplication).await.unwrap()
    });
    let second = tokio::spawn(async move {
        JobRepository::new(&second_pool).claim_next(JobType::Deduplication).await.unwrap()
    });

    let (first_result, second_result) = tokio::join!(first, second);
    let claims = [first_result.unwrap(), second_result.unwrap()];

    let successful_claims = claims.iter().filter(|c| c.as_ref().map(|j| j.id) == Some(job_id)).count();
    assert_eq!(successful_claims, 1, "exactly one worker should have claimed the job");

    sqlx::query("DELETE FROM jobs WHERE id = $1").bind(job_id).execute(&pool).await.unwrap();
}

/// `spec.md` §4.7 + §9's backoff-arithmetic note: retries are true
/// duration addition (`now + 2^(attempts-1) minutes`), escalating to
/// `failed` once `attempts` reaches `max_attempts`.
#[tokio::test]
async fn backoff_escalates_then_terminates_as_failed() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    let job_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO jobs (id, job_type, payload, status, attempts, max_attempts) \
         VALUES ($1, 'summarization', $2, 'processing', 1, 2)",
    )
    .bind(job_id)
    .bind(json!({"article_ids": ["a1"]}))
    .execute(&pool)
    .await
    .unwrap();

    let repo = JobRepository::new(&pool);

    repo.retry_or_fail(job_id, 1, 2, "transient failure").await.unwrap();
    let row: (String, chrono::DateTime<Utc>) =
        sqlx::query_as("SELECT status, scheduled_for FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(row.0, "pending");
    let delay = row.1 - Utc::now();
    assert!(delay.num_seconds() > 30 && delay.num_seconds() <= 60, "expected ~1 minute backoff, got {delay}");

    sqlx::query("UPDATE jobs SET attempts = 2 WHERE id = $1").bind(job_id).execute(&pool).await.unwrap();
    repo.retry_or_fail(job_id, 2, 2, "second failure").await.unwrap();
    let status: (String,) = sqlx::query_as("SELECT status FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status.0, "failed");

    sqlx::query("DELETE FROM jobs WHERE id = $1").bind(job_id).execute(&pool).await.unwrap();
}
