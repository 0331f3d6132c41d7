//! Read-only access to the learner data and catalog the recommender consumes.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::career_path::CareerPathRecord;
use crate::models::learner::{GradedAttempt, InterestAnswer};

/// Collaborator interface for everything the recommender reads.
///
/// Carried in `AppState` as `Arc<dyn LearnerDataSource>`. Results must be
/// fully materialized; scoring needs complete aggregates.
#[async_trait]
pub trait LearnerDataSource: Send + Sync {
    async fn graded_attempts(&self, user_id: &str) -> Result<Vec<GradedAttempt>, AppError>;

    async fn interest_answers(&self, user_id: &str) -> Result<Vec<InterestAnswer>, AppError>;

    /// Full catalog in a stable order; the first record is the fallback path.
    async fn career_paths(&self) -> Result<Vec<CareerPathRecord>, AppError>;
}

/// PostgreSQL-backed source over the learning platform's tables.
pub struct PgLearnerDataSource {
    pool: PgPool,
}

impl PgLearnerDataSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LearnerDataSource for PgLearnerDataSource {
    async fn graded_attempts(&self, user_id: &str) -> Result<Vec<GradedAttempt>, AppError> {
        let rows = sqlx::query_as::<_, GradedAttempt>(
            "SELECT category, is_correct FROM question_attempts WHERE user_id = $1 ORDER BY answered_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn interest_answers(&self, user_id: &str) -> Result<Vec<InterestAnswer>, AppError> {
        let rows = sqlx::query_as::<_, InterestAnswer>(
            "SELECT question_id, response FROM interest_responses WHERE user_id = $1 ORDER BY question_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn career_paths(&self) -> Result<Vec<CareerPathRecord>, AppError> {
        let rows = sqlx::query_as::<_, CareerPathRecord>(
            "SELECT id, name FROM career_paths ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
