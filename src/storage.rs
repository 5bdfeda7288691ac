// src/storage.rs

//! All reads and writes against the quiz database.
//!
//! Every function takes an executor so callers can run it on the pool or
//! inside a transaction.

use std::{str::FromStr, time::Duration};

use chrono::Utc;
use sqlx::{
    Sqlite, SqliteExecutor, SqlitePool, Transaction,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

use crate::models::{
    attempt::{Attempt, AttemptSummary},
    question::{GeneratedQuestion, Question},
    quiz::Quiz,
};

/// Opens (creating if needed) the SQLite database and ensures the schema exists.
///
/// SQLite serializes writers itself; the busy timeout makes a concurrent
/// writer wait for the lock instead of failing.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await?;

    migrate(&pool).await?;

    Ok(pool)
}

/// Applies the embedded schema. Safe to run on every startup.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Inserts a quiz row unless the id is taken.
///
/// Returns `false` when another quiz already owns `id`.
pub async fn create_quiz(
    executor: impl SqliteExecutor<'_>,
    id: &str,
    topic: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO quizzes (id, topic, created_at)
        VALUES (?, ?, ?)
        ON CONFLICT(id) DO NOTHING
        "#,
    )
    .bind(id)
    .bind(topic)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Inserts a batch of questions under `quiz_id`, keeping their order.
pub async fn create_questions(
    tx: &mut Transaction<'_, Sqlite>,
    quiz_id: &str,
    questions: &[GeneratedQuestion],
) -> Result<(), sqlx::Error> {
    for q in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (quiz_id, question, option1, option2, option3, option4, answer)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(quiz_id)
        .bind(&q.question)
        .bind(&q.option1)
        .bind(&q.option2)
        .bind(&q.option3)
        .bind(&q.option4)
        .bind(&q.answer)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

pub async fn get_quiz(
    executor: impl SqliteExecutor<'_>,
    id: &str,
) -> Result<Option<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>("SELECT id, topic, created_at FROM quizzes WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn quiz_exists(executor: impl SqliteExecutor<'_>, id: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM quizzes WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row.is_some())
}

/// Questions of a quiz in insertion order. Unknown ids yield an empty list.
pub async fn get_questions(
    executor: impl SqliteExecutor<'_>,
    quiz_id: &str,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, quiz_id, question, option1, option2, option3, option4, answer
        FROM questions
        WHERE quiz_id = ?
        ORDER BY id
        "#,
    )
    .bind(quiz_id)
    .fetch_all(executor)
    .await
}

/// Records one scored submission. Resubmissions always add a new row.
pub async fn create_attempt(
    executor: impl SqliteExecutor<'_>,
    quiz_id: &str,
    roll_number: &str,
    score: i64,
) -> Result<Attempt, sqlx::Error> {
    sqlx::query_as::<_, Attempt>(
        r#"
        INSERT INTO attempts (quiz_id, roll_number, score, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, quiz_id, roll_number, score, created_at
        "#,
    )
    .bind(quiz_id)
    .bind(roll_number)
    .bind(score)
    .bind(Utc::now())
    .fetch_one(executor)
    .await
}

/// All attempts for a quiz in storage order, without any aggregation.
pub async fn get_attempts(
    executor: impl SqliteExecutor<'_>,
    quiz_id: &str,
) -> Result<Vec<AttemptSummary>, sqlx::Error> {
    sqlx::query_as::<_, AttemptSummary>(
        r#"
        SELECT roll_number, score, created_at
        FROM attempts
        WHERE quiz_id = ?
        ORDER BY id
        "#,
    )
    .bind(quiz_id)
    .fetch_all(executor)
    .await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fresh single-connection in-memory database with the schema applied.
    pub(crate) async fn memory_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .unwrap();
        migrate(&pool).await.unwrap();
        pool
    }

    pub(crate) fn sample_question(n: usize) -> GeneratedQuestion {
        GeneratedQuestion {
            question: format!("Question {}", n),
            option1: "A".to_string(),
            option2: "B".to_string(),
            option3: "C".to_string(),
            option4: "D".to_string(),
            answer: "A".to_string(),
        }
    }

    #[tokio::test]
    async fn questions_come_back_in_insert_order() {
        let pool = memory_pool().await;
        let mut tx = pool.begin().await.unwrap();
        assert!(create_quiz(&mut *tx, "q1", "Rome").await.unwrap());
        let batch: Vec<_> = (0..5).map(sample_question).collect();
        create_questions(&mut tx, "q1", &batch).await.unwrap();
        tx.commit().await.unwrap();

        let stored = get_questions(&pool, "q1").await.unwrap();
        assert_eq!(stored.len(), 5);
        for (i, q) in stored.iter().enumerate() {
            assert_eq!(q.question, format!("Question {}", i));
            assert_eq!(q.quiz_id, "q1");
        }
        assert!(stored.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn duplicate_quiz_id_is_reported_not_overwritten() {
        let pool = memory_pool().await;
        assert!(create_quiz(&pool, "dup", "Rome").await.unwrap());
        assert!(!create_quiz(&pool, "dup", "Greece").await.unwrap());

        let quiz = get_quiz(&pool, "dup").await.unwrap().unwrap();
        assert_eq!(quiz.topic, "Rome");
    }

    #[tokio::test]
    async fn unknown_quiz_reads_as_empty() {
        let pool = memory_pool().await;
        assert!(get_questions(&pool, "missing").await.unwrap().is_empty());
        assert!(get_attempts(&pool, "missing").await.unwrap().is_empty());
        assert!(!quiz_exists(&pool, "missing").await.unwrap());
        assert!(get_quiz(&pool, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn repeated_attempts_are_kept_separately() {
        let pool = memory_pool().await;
        create_quiz(&pool, "q1", "Rome").await.unwrap();

        let first = create_attempt(&pool, "q1", "S1", 2).await.unwrap();
        let second = create_attempt(&pool, "q1", "S1", 4).await.unwrap();
        assert_ne!(first.id, second.id);

        let attempts = get_attempts(&pool, "q1").await.unwrap();
        let rows: Vec<_> = attempts
            .iter()
            .map(|a| (a.roll_number.as_str(), a.score))
            .collect();
        assert_eq!(rows, vec![("S1", 2), ("S1", 4)]);
    }

    #[tokio::test]
    async fn attempts_require_an_existing_quiz() {
        let pool = memory_pool().await;
        let result = create_attempt(&pool, "ghost", "S1", 0).await;
        assert!(result.is_err());
    }
}
