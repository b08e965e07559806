//! Cluster repository: membership assignment and representative
//! recomputation, always performed in a single transaction per Design
//! Note "Representative update atomicity" — the source this system is
//! modeled on split these across transactions in one path, which is
//! treated as a bug here, not a behavior to preserve.

use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::DbError;
use crate::repositories::article::ArticleRepository;

pub struct ClusterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClusterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Creates a brand-new cluster, assigns `article_id` as its first
    /// (and, at creation time, only) member, and sets it as the
    /// representative — all in one transaction.
    #[instrument(skip(self))]
    pub async fn create_with_member(&self, article_id: &str) -> Result<Uuid, DbError> {
        let cluster_id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO clusters (id, created_at, updated_at) VALUES ($1, now(), now())")
            .bind(cluster_id)
            .execute(&mut *tx)
            .await?;

        ArticleRepository::assign_cluster_in_tx(&mut tx, article_id, cluster_id).await?;
        recompute_representative_in_tx(&mut tx, cluster_id).await?;

        tx.commit().await?;
        Ok(cluster_id)
    }

    /// Assigns `article_id` into an already-existing `cluster_id` and
    /// recomputes the representative, in one transaction.
    #[instrument(skip(self))]
    pub async fn assign_member(&self, cluster_id: Uuid, article_id: &str) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        ArticleRepository::assign_cluster_in_tx(&mut tx, article_id, cluster_id).await?;
        recompute_representative_in_tx(&mut tx, cluster_id).await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Recomputes `rep_article_id` for `cluster_id`: the member with the
/// greatest `LENGTH(COALESCE(content, summary_raw, title, ''))`,
/// breaking ties by greater `source.trust_score`, then by later
/// `ts_published` — invariant 2 in `spec.md` §8.
async fn recompute_representative_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    cluster_id: Uuid,
) -> Result<(), DbError> {
    let row: Option<(String,)> = sqlx::query_as(
        r#"
        SELECT a.id
        FROM articles a
        LEFT JOIN sources s ON s.id = a.source_id
        WHERE a.cluster_id = $1
        ORDER BY
            LENGTH(COALESCE(a.content, a.summary_raw, a.title, '')) DESC,
            COALESCE(s.trust_score, 0) DESC,
            a.ts_published DESC
        LIMIT 1
        "#,
    )
    .bind(cluster_id)
    .fetch_optional(&mut **tx)
    .await?;

    let Some((rep_article_id,)) = row else {
        return Err(DbError::Mapping(format!(
            "cluster {cluster_id} has no members to elect a representative from"
        )));
    };

    sqlx::query("UPDATE clusters SET rep_article_id = $2, updated_at = $3 WHERE id = $1")
        .bind(cluster_id)
        .bind(rep_article_id)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;

    Ok(())
}
