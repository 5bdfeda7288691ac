// tests/generate_tests.rs

use std::sync::Arc;

use async_trait::async_trait;
use recall_quiz::{
    ai::{AiError, TextGenerator},
    config::Config,
    routes,
    state::AppState,
    storage,
};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Fails every call the way an unreachable service would.
struct UnavailableGenerator;

#[async_trait]
impl TextGenerator for UnavailableGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
        Err(AiError::Status {
            status: 503,
            body: "overloaded".to_string(),
        })
    }
}

struct FixedGenerator(&'static str);

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
        Ok(self.0.to_string())
    }
}

async fn spawn_app(generator: Arc<dyn TextGenerator>) -> (String, SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let database_url = format!("sqlite://{}", dir.path().join("quiz.db").display());
    let pool = storage::connect(&database_url).await.unwrap();

    let config = Config {
        database_url,
        static_dir: dir.path().join("static"),
        rust_log: "error".to_string(),
        ..Config::default()
    };

    let state = AppState {
        pool: pool.clone(),
        config,
        generator,
    };
    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool, dir)
}

async fn row_counts(pool: &SqlitePool) -> (i64, i64) {
    let (quizzes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quizzes")
        .fetch_one(pool)
        .await
        .unwrap();
    let (questions,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
        .unwrap();
    (quizzes, questions)
}

#[tokio::test]
async fn unparseable_output_returns_json_error_and_writes_nothing() {
    let (address, pool, dir) =
        spawn_app(Arc::new(FixedGenerator("Here are five great questions!"))).await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/generate", address))
        .form(&[("topic", "Rome")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 502);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"error": "AI JSON format issue"}));

    assert_eq!(row_counts(&pool).await, (0, 0));
    assert!(!dir.path().join("static").join("qrcodes").exists());
}

#[tokio::test]
async fn questions_with_missing_fields_are_a_format_error() {
    let (address, pool, _dir) = spawn_app(Arc::new(FixedGenerator(
        r#"[{"question": "Q", "option1": "A", "answer": "A"}]"#,
    )))
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/generate", address))
        .form(&[("topic", "Rome")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    assert_eq!(row_counts(&pool).await, (0, 0));
}

#[tokio::test]
async fn service_failure_is_reported_separately() {
    let (address, pool, _dir) = spawn_app(Arc::new(UnavailableGenerator)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/generate", address))
        .form(&[("topic", "Rome")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "AI service unavailable");
    assert_eq!(row_counts(&pool).await, (0, 0));
}

#[tokio::test]
async fn each_generation_gets_its_own_quiz() {
    let reply = r#"[{"question": "Q", "option1": "A", "option2": "B", "option3": "C", "option4": "D", "answer": "A"}]"#;
    let (address, pool, dir) = spawn_app(Arc::new(FixedGenerator(reply))).await;
    let client = reqwest::Client::new();

    for topic in ["Rome", "Greece"] {
        let response = client
            .post(&format!("{}/generate", address))
            .form(&[("topic", topic)])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    assert_eq!(row_counts(&pool).await, (2, 2));
    let qr_files = std::fs::read_dir(dir.path().join("static").join("qrcodes"))
        .unwrap()
        .count();
    assert_eq!(qr_files, 2);
}

#[tokio::test]
async fn qr_write_failure_still_shows_the_new_quiz() {
    let reply = r#"[{"question": "Q", "option1": "A", "option2": "B", "option3": "C", "option4": "D", "answer": "A"}]"#;
    let (address, pool, dir) = spawn_app(Arc::new(FixedGenerator(reply))).await;
    let client = reqwest::Client::new();

    // A plain file where the static directory should be makes the QR write fail.
    std::fs::write(dir.path().join("static"), b"not a directory").unwrap();

    let response = client
        .post(&format!("{}/generate", address))
        .form(&[("topic", "Rome")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let page = response.text().await.unwrap();

    assert_eq!(row_counts(&pool).await, (1, 1));
    let (quiz_id,): (String,) = sqlx::query_as("SELECT id FROM quizzes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(page.contains(&format!("id=\"quiz-id\">{}<", quiz_id)));
    assert!(page.contains("class=\"qr-missing\""));
    assert!(!page.contains("id=\"qr\""));
}
