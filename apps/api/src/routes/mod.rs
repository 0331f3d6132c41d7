pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/users/:user_id/career-recommendation",
            get(handlers::handle_get_recommendation),
        )
        .route(
            "/api/v1/career-recommendation/preview",
            post(handlers::handle_preview),
        )
        .with_state(state)
}
