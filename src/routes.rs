// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{quiz, teacher},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Teacher pages: home, generation and results.
/// * Student pages: taking and submitting a quiz.
/// * Static files (QR images) from `Config::static_dir` under `/static`.
pub fn create_router(state: AppState) -> Router {
    let teacher_routes = Router::new()
        .route("/", get(teacher::home))
        .route("/generate", post(teacher::generate))
        .route("/teacher_results/{quiz_id}", get(teacher::results));

    let quiz_routes = Router::new()
        .route("/quiz/{quiz_id}", get(quiz::show_quiz))
        .route("/submit/{quiz_id}", post(quiz::submit_quiz));

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .merge(teacher_routes)
        .merge(quiz_routes)
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
