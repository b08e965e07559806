//! Cluster entity — a set of near-duplicate articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invariant: at least one article has `cluster_id == this.id`;
/// `rep_article_id` references a member article. Representative
/// election and membership changes always happen in the same
/// transaction. Never deleted by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cluster {
    pub id: Uuid,
    pub rep_article_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
