// src/generator.rs

//! Turns a topic into a persisted quiz.

use std::sync::LazyLock;

use regex::Regex;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::{
    ai::{AiError, TextGenerator},
    config::{QUIZ_ID_ATTEMPTS, QUIZ_ID_LEN, QUIZ_QUESTION_COUNT},
    models::question::GeneratedQuestion,
    storage,
};

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The model answered, but not with the expected JSON array.
    #[error("model output is not a question array: {0}")]
    Format(String),

    #[error(transparent)]
    Service(#[from] AiError),

    #[error("no free quiz id after {0} attempts")]
    IdExhausted(usize),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Opening fence with an optional language tag, the body, and the closing fence.
static FENCED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").expect("fence pattern is valid")
});

pub fn build_prompt(topic: &str) -> String {
    format!(
        r#"Generate {count} multiple choice questions about {topic}.

Return strictly in this JSON format:

[
  {{
    "question": "...",
    "option1": "...",
    "option2": "...",
    "option3": "...",
    "option4": "...",
    "answer": "..."
  }}
]

The "answer" value must be copied exactly from one of the four options.

NO markdown.
NO explanation.
ONLY JSON.
"#,
        count = QUIZ_QUESTION_COUNT,
        topic = topic,
    )
}

/// Strips surrounding whitespace and, when present, a leading code fence.
///
/// Only the text between the first pair of fences is kept. An unterminated
/// fence keeps everything after the opening line.
pub fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    if let Some(body) = FENCED.captures(trimmed).and_then(|c| c.get(1)) {
        return body.as_str().trim();
    }
    let after_fence = trimmed.trim_start_matches('`');
    after_fence
        .split_once('\n')
        .map_or("", |(_, rest)| rest)
        .trim()
}

pub fn parse_questions(raw: &str) -> Result<Vec<GeneratedQuestion>, GenerationError> {
    let questions: Vec<GeneratedQuestion> = serde_json::from_str(extract_json(raw))
        .map_err(|e| GenerationError::Format(e.to_string()))?;

    if questions.is_empty() {
        return Err(GenerationError::Format("empty question array".to_string()));
    }

    Ok(questions)
}

pub fn mint_quiz_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(QUIZ_ID_LEN);
    id
}

/// Generates, parses and stores a quiz, returning its new id.
///
/// Makes exactly one call to `generator`. Nothing is written unless the
/// output parses, and the quiz with all of its questions is committed as a
/// single transaction.
pub async fn generate_quiz(
    generator: &dyn TextGenerator,
    pool: &SqlitePool,
    topic: &str,
) -> Result<String, GenerationError> {
    let raw = generator.generate(&build_prompt(topic)).await?;

    let questions = parse_questions(&raw).inspect_err(|_| {
        tracing::debug!("Unparseable model output for topic {:?}: {}", topic, raw);
    })?;

    if questions.len() != QUIZ_QUESTION_COUNT {
        tracing::warn!(
            "Model returned {} questions for topic {:?}, expected {}",
            questions.len(),
            topic,
            QUIZ_QUESTION_COUNT
        );
    }

    let mut tx = pool.begin().await?;

    let mut quiz_id = None;
    for _ in 0..QUIZ_ID_ATTEMPTS {
        let candidate = mint_quiz_id();
        if storage::create_quiz(&mut *tx, &candidate, topic).await? {
            quiz_id = Some(candidate);
            break;
        }
        tracing::warn!("Quiz id {} already taken, minting another", candidate);
    }
    let quiz_id = quiz_id.ok_or(GenerationError::IdExhausted(QUIZ_ID_ATTEMPTS))?;

    storage::create_questions(&mut tx, &quiz_id, &questions).await?;
    tx.commit().await?;

    tracing::info!(
        "Created quiz {} on {:?} with {} questions",
        quiz_id,
        topic,
        questions.len()
    );

    Ok(quiz_id)
}
