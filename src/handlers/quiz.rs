// src/handlers/quiz.rs

use std::collections::HashMap;

use axum::{
    Form,
    extract::{Path, State},
    response::Html,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        attempt::ScoreReport,
        question::{PublicQuestion, Question},
    },
    storage, views,
};

/// Form field carrying the taker's label. Every other field is an answer.
const ROLL_NUMBER_FIELD: &str = "roll_number";

/// Counts questions whose submitted option equals the stored answer.
///
/// Answers are looked up by question id; a missing answer counts as wrong.
fn calculate_score(questions: &[Question], submitted: &HashMap<i64, String>) -> i64 {
    questions
        .iter()
        .filter(|q| submitted.get(&q.id) == Some(&q.answer))
        .count() as i64
}

/// Splits a raw submission into the roll number and `question id -> option`.
///
/// Keys that are not question ids are ignored.
fn split_submission(
    mut form: HashMap<String, String>,
) -> Result<(String, HashMap<i64, String>), AppError> {
    let roll_number = form
        .remove(ROLL_NUMBER_FIELD)
        .ok_or_else(|| AppError::BadRequest("roll_number is required".to_string()))?;

    let answers = form
        .into_iter()
        .filter_map(|(key, value)| key.parse::<i64>().ok().map(|id| (id, value)))
        .collect();

    Ok((roll_number, answers))
}

/// Renders the quiz-taking page.
///
/// Unknown ids render an empty form rather than an error.
pub async fn show_quiz(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let questions: Vec<PublicQuestion> = storage::get_questions(&pool, &quiz_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch questions for {}: {:?}", quiz_id, e);
            AppError::from(e)
        })?
        .into_iter()
        .map(PublicQuestion::from)
        .collect();

    Ok(Html(views::quiz_page(&quiz_id, &questions).into_string()))
}

/// Scores a submission against the stored answers and records the attempt.
///
/// Resubmissions are not detected; each call adds a new attempt.
pub async fn submit_quiz(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let (roll_number, answers) = split_submission(form)?;

    if !storage::quiz_exists(&pool, &quiz_id).await? {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    let questions = storage::get_questions(&pool, &quiz_id).await?;
    let report = ScoreReport {
        score: calculate_score(&questions, &answers),
        total: questions.len(),
    };

    storage::create_attempt(&pool, &quiz_id, &roll_number, report.score)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record attempt for {}: {:?}", quiz_id, e);
            AppError::from(e)
        })?;

    tracing::info!(
        "Recorded attempt on {} by {:?}: {}/{}",
        quiz_id,
        roll_number,
        report.score,
        report.total
    );

    Ok(Html(
        views::result_page(report.score, report.total).into_string(),
    ))
}
