use std::sync::Arc;

use crate::recommendation::engine::CareerRecommender;
use crate::recommendation::source::LearnerDataSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Immutable after startup; shared by every request.
    pub recommender: Arc<CareerRecommender>,
    /// Read access to attempts, answers and the catalog. Default: PgLearnerDataSource.
    pub source: Arc<dyn LearnerDataSource>,
}
