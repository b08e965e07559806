//! Idempotent startup migration: table and index definitions applied
//! once from each binary's `main` before the poll loop starts. There
//! is no separate migration tool — schema is levelled at connect time,
//! same as every other piece of startup state.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{debug, info, instrument};

const TABLES: &[(&str, &str)] = &[
    (
        "sources",
        r#"
        CREATE TABLE IF NOT EXISTS sources (
            id TEXT PRIMARY KEY,
            trust_score DOUBLE PRECISION NOT NULL DEFAULT 0
        )
        "#,
    ),
    (
        "clusters",
        r#"
        CREATE TABLE IF NOT EXISTS clusters (
            id UUID PRIMARY KEY,
            rep_article_id TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    ),
    (
        "articles",
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT,
            summary_raw TEXT,
            summary_2 TEXT,
            simhash CHAR(16),
            cluster_id UUID REFERENCES clusters(id),
            source_id TEXT NOT NULL REFERENCES sources(id),
            ts_published TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    ),
    (
        "jobs",
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id UUID PRIMARY KEY,
            job_type TEXT NOT NULL,
            payload JSONB NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            attempts INT NOT NULL DEFAULT 0,
            max_attempts INT NOT NULL DEFAULT 3,
            scheduled_for TIMESTAMPTZ NOT NULL DEFAULT now(),
            started_at TIMESTAMPTZ,
            completed_at TIMESTAMPTZ,
            result JSONB,
            error_message TEXT,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    ),
];

const INDEXES: &[(&str, &str)] = &[
    (
        "idx_jobs_poll",
        "CREATE INDEX IF NOT EXISTS idx_jobs_poll ON jobs (job_type, status, scheduled_for)",
    ),
    (
        "idx_articles_cluster",
        "CREATE INDEX IF NOT EXISTS idx_articles_cluster ON articles (cluster_id)",
    ),
    (
        "idx_articles_ts_published",
        "CREATE INDEX IF NOT EXISTS idx_articles_ts_published ON articles (ts_published DESC)",
    ),
];

/// Applies the full schema: tables first, then indexes. Safe to call
/// on every startup — every statement is `IF NOT EXISTS`.
#[instrument(skip(pool))]
pub async fn apply(pool: &PgPool) -> Result<()> {
    for (name, sql) in TABLES {
        debug!(table = *name, "applying table");
        sqlx::query(sql)
            .execute(pool)
            .await
            .with_context(|| format!("failed to create table {name}"))?;
    }
    for (name, sql) in INDEXES {
        debug!(index = *name, "applying index");
        sqlx::query(sql)
            .execute(pool)
            .await
            .with_context(|| format!("failed to create index {name}"))?;
    }
    info!("schema levelled");
    Ok(())
}
