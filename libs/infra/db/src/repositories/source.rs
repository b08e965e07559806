//! Source repository — read-only from this core's perspective; C6
//! only ever needs a source's `trust_score`, and even that is usually
//! folded into the representative-recomputation query's own join
//! rather than fetched separately (see `ClusterRepository`).

use sqlx::PgPool;
use tracing::instrument;

use newsroom_domain_models::Source;

use crate::errors::DbError;

pub struct SourceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SourceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Source>, DbError> {
        let row = sqlx::query_as::<_, Source>("SELECT id, trust_score FROM sources WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }
}
