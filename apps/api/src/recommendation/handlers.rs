//! Axum route handlers for the Career Recommendation API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::learner::{GradedAttempt, InterestAnswer};
use crate::recommendation::engine::Recommendation;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default)]
    pub attempts: Vec<GradedAttempt>,
    pub interest_answers: Vec<InterestAnswer>,
}

/// GET /api/v1/users/:user_id/career-recommendation
pub async fn handle_get_recommendation(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Recommendation>, AppError> {
    let recommendation = state
        .recommender
        .recommend_for_user(state.source.as_ref(), &user_id)
        .await?;
    Ok(Json(recommendation))
}

/// POST /api/v1/career-recommendation/preview
///
/// Scores the supplied attempts and answers against the stored catalog
/// without reading any user history.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<Recommendation>, AppError> {
    let catalog = state.source.career_paths().await?;
    let recommendation =
        state
            .recommender
            .recommend(&request.attempts, &request.interest_answers, &catalog)?;
    Ok(Json(recommendation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_request_accepts_client_field_names() {
        let req: PreviewRequest = serde_json::from_str(
            r#"{
                "attempts": [{"category": "data", "isCorrect": true}, {"category": null, "isCorrect": false}],
                "interestAnswers": [{"questionId": 2, "response": "Backend"}]
            }"#,
        )
        .unwrap();
        assert_eq!(req.attempts.len(), 2);
        assert_eq!(req.attempts[1].category, None);
        assert_eq!(req.interest_answers[0].question_id, 2);
    }

    #[test]
    fn test_preview_request_attempts_default_to_empty() {
        let req: PreviewRequest =
            serde_json::from_str(r#"{"interestAnswers": [{"questionId": 1, "response": "5"}]}"#)
                .unwrap();
        assert!(req.attempts.is_empty());
    }
}
