// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// Owning quiz.
    pub quiz_id: String,

    /// The text content of the question.
    pub question: String,

    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,

    /// The correct option, as the model wrote it.
    pub answer: String,
}

/// View of a question for quiz takers (excludes answer).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question: String,
    pub options: [String; 4],
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            options: [q.option1, q.option2, q.option3, q.option4],
        }
    }
}

/// One question as returned by the model, before it has a storage id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    pub answer: String,
}
