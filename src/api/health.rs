//! Health check endpoints

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub movies: usize,
    pub categories: usize,
    pub vote_subscribers: usize,
}

/// Health check - always returns OK if the server is running
async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check - reports what the catalog and vote broker currently hold
async fn readyz(State(state): State<AppState>) -> Json<ReadyResponse> {
    let movies = state.catalog.movie_count();

    Json(ReadyResponse {
        ready: movies > 0,
        movies,
        categories: state.catalog.category_count(),
        vote_subscribers: state.broker.subscriber_count(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
