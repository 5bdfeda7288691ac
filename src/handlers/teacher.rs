// src/handlers/teacher.rs

use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, State},
    response::Html,
};
use sqlx::SqlitePool;

use crate::{
    ai::TextGenerator,
    config::Config,
    error::AppError,
    generator,
    models::quiz::GenerateQuizForm,
    publisher, storage, views,
};

pub async fn home() -> Html<String> {
    Html(views::home_page().into_string())
}

/// Generates a quiz on the posted topic and shows its QR code.
///
/// * Calls the model once, without retry.
/// * Persists the quiz and its questions only if the output parses.
/// * Writes the QR image for the quiz URL. The quiz is already stored at
///   that point, so a failed write only drops the image from the page.
///
/// Parse failures answer with `{"error": "AI JSON format issue"}` (502).
pub async fn generate(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    State(text_generator): State<Arc<dyn TextGenerator>>,
    Form(form): Form<GenerateQuizForm>,
) -> Result<Html<String>, AppError> {
    tracing::info!("Generating quiz on {:?}", form.topic);

    let quiz_id = generator::generate_quiz(text_generator.as_ref(), &pool, &form.topic).await?;

    let quiz_url = publisher::quiz_url(&config.public_base_url, &quiz_id)?;

    let qr_path = match publisher::publish_qr(&config, &quiz_id).await {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("Quiz {} created without a QR code: {}", quiz_id, e);
            None
        }
    };

    Ok(Html(
        views::teacher_page(&quiz_id, qr_path.as_deref(), quiz_url.as_str()).into_string(),
    ))
}

/// Lists every attempt for a quiz in submission order.
pub async fn results(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let quiz = storage::get_quiz(&pool, &quiz_id).await?;
    let attempts = storage::get_attempts(&pool, &quiz_id).await.map_err(|e| {
        tracing::error!("Failed to fetch attempts for {}: {:?}", quiz_id, e);
        AppError::from(e)
    })?;

    Ok(Html(
        views::results_page(&quiz_id, quiz.as_ref().map(|q| q.topic.as_str()), &attempts)
            .into_string(),
    ))
}
