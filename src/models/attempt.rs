// src/models/attempt.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'attempts' table in the database.
/// One row per submission; retakes are never merged.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Attempt {
    pub id: i64,
    pub quiz_id: String,
    pub roll_number: String,
    pub score: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Row shown on the teacher's results page.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AttemptSummary {
    pub roll_number: String,
    pub score: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Outcome of scoring one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub score: i64,
    pub total: usize,
}
