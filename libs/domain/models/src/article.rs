//! Article entity: a crawled news item enriched in place by the
//! dedup and summarization workers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A news item, crawled upstream and enriched in place by the
/// deduplicator (`simhash`, `cluster_id`) and summarizer (`summary_2`).
///
/// Invariant: if `cluster_id` is set, it references an existing
/// [`crate::Cluster`]; `simhash`, when set, is exactly 16 lowercase hex
/// characters. Never deleted by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub summary_raw: Option<String>,
    pub summary_2: Option<String>,
    pub simhash: Option<String>,
    pub cluster_id: Option<Uuid>,
    pub source_id: String,
    pub ts_published: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// `title [SP] (summary_raw or "")` — the text the deduplication
    /// job fingerprints. Deliberately not `content`: the dedup pass is
    /// keyed on what the crawler's own summary says, which is cheaper
    /// to hash and stable across re-crawls.
    pub fn dedup_text(&self) -> String {
        format!("{} {}", self.title, self.summary_raw.as_deref().unwrap_or(""))
    }
}
