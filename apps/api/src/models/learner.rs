use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A graded answer to one quiz question. `category` is denormalized from the
/// question and may be missing for untagged questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GradedAttempt {
    pub category: Option<String>,
    pub is_correct: bool,
}

/// A single answer from the interest questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InterestAnswer {
    pub question_id: i32,
    pub response: String,
}
