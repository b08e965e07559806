//! Source entity — read-only from this core's perspective.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Source {
    pub id: String,
    pub trust_score: f64,
}
