mod config;
mod db;
mod errors;
mod models;
mod recommendation;
mod routes;
mod state;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::recommendation::engine::CareerRecommender;
use crate::recommendation::source::PgLearnerDataSource;
use crate::recommendation::tables::RecommenderTables;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathwise API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;

    // Recommender tables: built-in unless a replacement file is configured
    let tables = match &config.recommender_tables_path {
        Some(path) => {
            info!("Loading recommender tables from {}", path.display());
            RecommenderTables::from_json_file(path)?
        }
        None => RecommenderTables::default(),
    };
    let recommender =
        CareerRecommender::new(tables).context("Invalid career path name pattern")?;
    info!(
        "Recommender tables v{} ({} career paths)",
        recommender.tables().version,
        recommender.tables().path_weights.len()
    );

    // Build app state
    let state = AppState {
        recommender: Arc::new(recommender),
        source: Arc::new(PgLearnerDataSource::new(db)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Permissive unless CORS_ALLOWED_ORIGINS lists the allowed origins.
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_origin_list() {
        assert!(cors_layer(&[]).is_ok());
        assert!(cors_layer(&["https://app.example.com".to_string()]).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
    }
}
