//! Summarization processor. Unlike deduplication, a single article's
//! failure here does not fail the job — each summary is independent,
//! so the failure is simply counted in the result and the batch moves
//! on, per `spec.md` §7.

use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{error, info, instrument};

use newsroom_domain_models::{JobType, SummarizationPayload, SummarizationResult};
use newsroom_domain_summarizer::generate_summary;
use newsroom_infra_db::ArticleRepository;
use newsroom_infra_runtime::JobProcessor;

pub struct SummarizationProcessor {
    pool: PgPool,
    poll_interval: Duration,
}

impl SummarizationProcessor {
    pub fn new(pool: PgPool, poll_interval: Duration) -> Self {
        Self { pool, poll_interval }
    }
}

#[async_trait]
impl JobProcessor for SummarizationProcessor {
    fn job_type(&self) -> JobType {
        JobType::Summarization
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    #[instrument(skip(self, payload))]
    async fn process(&self, payload: Value) -> anyhow::Result<Value> {
        let payload: SummarizationPayload =
            serde_json::from_value(payload).context("malformed summarization payload")?;

        if payload.article_ids.is_empty() {
            bail!("summarization payload carries no article_ids");
        }

        let article_repo = ArticleRepository::new(&self.pool);
        let articles = article_repo
            .fetch_by_ids(&payload.article_ids)
            .await
            .context("failed to fetch articles for summarization")?;

        let mut result = SummarizationResult::default();

        for article in &articles {
            result.articles_processed += 1;

            let outcome = generate_summary(
                &article.title,
                article.content.as_deref(),
                article.summary_raw.as_deref(),
            );

            match article_repo.update_summary(&article.id, &outcome.summary_2).await {
                Ok(()) => {
                    result.summaries_generated += 1;
                    if outcome.verified {
                        result.summaries_verified += 1;
                    }
                }
                Err(e) => {
                    error!(article_id = %article.id, error = %e, "failed to persist summary, skipping article");
                    result.summaries_failed += 1;
                }
            }
        }

        info!(
            articles_processed = result.articles_processed,
            summaries_generated = result.summaries_generated,
            summaries_verified = result.summaries_verified,
            summaries_failed = result.summaries_failed,
            "summarization job complete"
        );

        Ok(serde_json::to_value(result)?)
    }
}
