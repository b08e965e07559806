//! Article repository: the 48-hour-windowed fetch the deduplication
//! job starts from, plus the per-field updates each worker commits
//! (`simhash`, `cluster_id`, `summary_2`).

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use newsroom_domain_models::Article;

use crate::errors::DbError;

pub struct ArticleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ArticleRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the subset of `ids` published at or after `since`,
    /// newest first — the exact order C6 processes a deduplication
    /// batch in. Ids with no matching row (deleted, or never existed)
    /// are silently absent from the result, per the Open Question in
    /// `DESIGN.md`: an unknown id is a silent skip.
    #[instrument(skip(self, ids))]
    pub async fn fetch_within_window(
        &self,
        ids: &[String],
        since: DateTime<Utc>,
    ) -> Result<Vec<Article>, DbError> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, content, summary_raw, summary_2, simhash, cluster_id,
                   source_id, ts_published, updated_at
            FROM articles
            WHERE id = ANY($1) AND ts_published >= $2
            ORDER BY ts_published DESC
            "#,
        )
        .bind(ids)
        .bind(since)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Fetches every article named in `ids`, regardless of age — the
    /// summarization job has no sliding-window constraint.
    #[instrument(skip(self, ids))]
    pub async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<Article>, DbError> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, content, summary_raw, summary_2, simhash, cluster_id,
                   source_id, ts_published, updated_at
            FROM articles
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Persists a freshly computed SimHash fingerprint. Last-writer-wins
    /// — idempotent under job re-execution, per the C7 idempotence
    /// requirement.
    #[instrument(skip(self))]
    pub async fn update_simhash(&self, article_id: &str, simhash: &str) -> Result<(), DbError> {
        sqlx::query("UPDATE articles SET simhash = $2, updated_at = now() WHERE id = $1")
            .bind(article_id)
            .bind(simhash)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Persists the generated two-sentence summary. Last-writer-wins,
    /// same idempotence rationale as [`Self::update_simhash`].
    #[instrument(skip(self, summary_2))]
    pub async fn update_summary(&self, article_id: &str, summary_2: &str) -> Result<(), DbError> {
        sqlx::query("UPDATE articles SET summary_2 = $2, updated_at = now() WHERE id = $1")
            .bind(article_id)
            .bind(summary_2)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Assigns `article_id` to `cluster_id` inside the given
    /// transaction — callers pair this with a representative
    /// recomputation in the same transaction, per Design Note
    /// "Representative update atomicity".
    pub async fn assign_cluster_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        article_id: &str,
        cluster_id: Uuid,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE articles SET cluster_id = $2, updated_at = now() WHERE id = $1")
            .bind(article_id)
            .bind(cluster_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
