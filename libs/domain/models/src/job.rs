//! Job entity and its typed payload/result DTOs.
//!
//! `Job` itself is not `sqlx::FromRow`-derived: `job_type` and
//! `status` are stored as plain `TEXT` in Postgres (matching the
//! teacher's "string discriminator" columns rather than a native PG
//! enum type), and the repository layer is responsible for the
//! string <-> enum conversion when mapping rows — see
//! `newsroom-infra-db`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Deduplication,
    Summarization,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Deduplication => "deduplication",
            JobType::Summarization => "summarization",
        }
    }
}

impl std::str::FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deduplication" => Ok(JobType::Deduplication),
            "summarization" => Ok(JobType::Summarization),
            other => Err(format!("unknown job type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Terminal states: a job in one of these will never be claimed or
    /// retried again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "processing" => Ok(JobStatus::Processing),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            other => Err(format!("unknown job status: {other}")),
        }
    }
}

/// Invariants: only `pending` jobs with `scheduled_for <= now` are
/// eligible for claiming; `attempts <= max_attempts`; `completed` jobs
/// have a non-null `result`; `failed` jobs have a non-null
/// `error_message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub job_type: JobType,
    pub payload: Value,
    pub status: JobStatus,
    pub attempts: i32,
    pub max_attempts: i32,
    pub scheduled_for: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub result: Option<Value>,
    pub error_message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// The row a successful claim hands to a worker: just enough to run
/// `process_job` and to report completion/failure back.
#[derive(Debug, Clone)]
pub struct ClaimedJob {
    pub id: Uuid,
    pub job_type: JobType,
    pub payload: Value,
    pub attempts: i32,
    pub max_attempts: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeduplicationPayload {
    pub article_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizationPayload {
    pub article_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeduplicationResult {
    pub articles_processed: u32,
    pub articles_clustered: u32,
    pub clusters_created: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizationResult {
    pub articles_processed: u32,
    pub summaries_generated: u32,
    pub summaries_verified: u32,
    pub summaries_failed: u32,
}
