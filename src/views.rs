// src/views.rs

//! Server-rendered HTML pages. `maud` escapes every `(expr)` splice.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::models::{attempt::AttemptSummary, question::PublicQuestion};

const STYLE: &str = "body{font-family:sans-serif;max-width:44rem;margin:2rem auto;padding:0 1rem}\
fieldset{margin-bottom:1rem}table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:.3rem .8rem}";

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body { (body) }
        }
    }
}

pub fn home_page() -> Markup {
    layout(
        "Recall Quiz",
        html! {
            h1 { "Create a quiz" }
            form method="post" action="/generate" {
                label for="topic" { "Topic" }
                input id="topic" name="topic" required;
                button type="submit" { "Generate" }
            }
        },
    )
}

/// Shown to the teacher after a quiz was generated.
///
/// `qr_path` is `None` when the image could not be written; the quiz is
/// still usable through its link.
pub fn teacher_page(quiz_id: &str, qr_path: Option<&str>, quiz_url: &str) -> Markup {
    layout(
        "Quiz ready",
        html! {
            h1 { "Quiz ready" }
            p { "Quiz ID: " strong id="quiz-id" { (quiz_id) } }
            @if let Some(qr) = qr_path {
                img id="qr" src=(qr) alt={ "QR code for quiz " (quiz_id) } width="256" height="256";
            } @else {
                p class="qr-missing" { "The QR code could not be generated. Share the link instead." }
            }
            p { "Share this link: " a href=(quiz_url) { (quiz_url) } }
            p { a href={ "/teacher_results/" (quiz_id) } { "View results" } }
        },
    )
}

/// The answerable form. Option text doubles as the submitted value.
pub fn quiz_page(quiz_id: &str, questions: &[PublicQuestion]) -> Markup {
    layout(
        "Quiz",
        html! {
            h1 { "Quiz " (quiz_id) }
            form method="post" action={ "/submit/" (quiz_id) } {
                label for="roll_number" { "Roll number" }
                input id="roll_number" name="roll_number" required;

                @if questions.is_empty() {
                    p class="empty" { "This quiz has no questions." }
                }

                @for (n, q) in questions.iter().enumerate() {
                    fieldset class="question" {
                        legend { (n + 1) ". " (q.question) }
                        @for option in &q.options {
                            label {
                                input type="radio" name=(q.id) value=(option);
                                " " (option)
                            }
                            br;
                        }
                    }
                }

                button type="submit" { "Submit" }
            }
        },
    )
}

pub fn result_page(score: i64, total: usize) -> Markup {
    layout(
        "Result",
        html! {
            h1 { "Submitted" }
            p {
                "You scored " span id="score" { (score) }
                " out of " span id="total" { (total) } "."
            }
        },
    )
}

/// Every attempt in storage order; retakes appear as separate rows.
pub fn results_page(quiz_id: &str, topic: Option<&str>, attempts: &[AttemptSummary]) -> Markup {
    layout(
        "Results",
        html! {
            h1 { "Results for quiz " (quiz_id) }
            @if let Some(topic) = topic {
                p { "Topic: " (topic) }
            }
            @if attempts.is_empty() {
                p class="empty" { "No attempts yet." }
            } @else {
                table id="results" {
                    tr { th { "Roll number" } th { "Score" } th { "Submitted" } }
                    @for attempt in attempts {
                        tr {
                            td class="roll" { (attempt.roll_number) }
                            td class="score" { (attempt.score) }
                            td { (attempt.created_at.format("%Y-%m-%d %H:%M UTC")) }
                        }
                    }
                }
            }
        },
    )
}
