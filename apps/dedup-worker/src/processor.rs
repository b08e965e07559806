//! Deduplication processor: the one `process_job` implementation that
//! touches the LSH index, per `spec.md` §4.6.
//!
//! Per-article failures here fail the whole job — a partially-applied
//! LSH index (some articles inserted, one skipped mid-batch) leaves
//! the rest of the batch's candidate generation inconsistent, per
//! `spec.md` §7's "per-article failures in deduplication do fail the
//! job" rule. Summarization, by contrast, tolerates per-article
//! failures because each article's summary is independent.

use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use newsroom_core_fingerprint::MinHashSignature;
use newsroom_core_lsh::LshIndex;
use newsroom_core_text::{normalize_text, tokenize};
use newsroom_domain_models::{DeduplicationPayload, DeduplicationResult, JobType};
use newsroom_infra_db::{ArticleRepository, ClusterRepository};
use newsroom_infra_runtime::JobProcessor;

/// Articles published before this window are excluded from the fetch
/// entirely — `spec.md` §4.6 step 1 and the boundary behavior in §8.
const DEDUPLICATION_WINDOW_HOURS: i64 = 48;

pub struct DeduplicationProcessor {
    pool: PgPool,
    poll_interval: Duration,
}

impl DeduplicationProcessor {
    pub fn new(pool: PgPool, poll_interval: Duration) -> Self {
        Self { pool, poll_interval }
    }
}

#[async_trait]
impl JobProcessor for DeduplicationProcessor {
    fn job_type(&self) -> JobType {
        JobType::Deduplication
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    #[instrument(skip(self, payload))]
    async fn process(&self, payload: Value) -> anyhow::Result<Value> {
        let payload: DeduplicationPayload =
            serde_json::from_value(payload).context("malformed deduplication payload")?;

        if payload.article_ids.is_empty() {
            bail!("deduplication payload carries no article_ids");
        }

        let article_repo = ArticleRepository::new(&self.pool);
        let cluster_repo = ClusterRepository::new(&self.pool);

        let since = Utc::now() - ChronoDuration::hours(DEDUPLICATION_WINDOW_HOURS);
        let articles = article_repo
            .fetch_within_window(&payload.article_ids, since)
            .await
            .context("failed to fetch articles for deduplication")?;

        // Job-local, ephemeral — discarded at the end of this job, per
        // `spec.md` §4.5. Never shared across workers or jobs.
        let mut lsh: LshIndex<Uuid> = LshIndex::new();
        let mut result = DeduplicationResult::default();

        for article in &articles {
            result.articles_processed += 1;

            let text = article.dedup_text();
            let normalized = normalize_text(&text);
            let tokens = tokenize(&normalized);

            let simhash = newsroom_core_fingerprint::simhash_hex(&tokens);
            let minhash = MinHashSignature::compute(&tokens);

            article_repo
                .update_simhash(&article.id, &simhash)
                .await
                .with_context(|| format!("failed to persist simhash for article {}", article.id))?;

            let candidates = lsh.query(&minhash);

            if let Some(&target_cluster_id) = candidates.first() {
                cluster_repo
                    .assign_member(target_cluster_id, &article.id)
                    .await
                    .with_context(|| {
                        format!("failed to assign article {} to cluster {target_cluster_id}", article.id)
                    })?;
                debug!(article_id = %article.id, cluster_id = %target_cluster_id, "matched existing cluster");
            } else {
                let new_cluster_id = cluster_repo
                    .create_with_member(&article.id)
                    .await
                    .with_context(|| format!("failed to create cluster for article {}", article.id))?;
                lsh.insert(new_cluster_id, minhash);
                result.clusters_created += 1;
                debug!(article_id = %article.id, cluster_id = %new_cluster_id, "created new cluster");
            }

            result.articles_clustered += 1;
        }

        info!(
            articles_processed = result.articles_processed,
            articles_clustered = result.articles_clustered,
            clusters_created = result.clusters_created,
            "deduplication job complete"
        );

        Ok(serde_json::to_value(result)?)
    }
}
