// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'quizzes' table in the database.
/// Created once per successful generation and never mutated.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    /// Short opaque identifier used in every quiz URL.
    pub id: String,
    pub topic: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Form posted from the home page.
#[derive(Debug, Deserialize)]
pub struct GenerateQuizForm {
    pub topic: String,
}
