//! Application state and HTTP router construction.
//!
//! Used by `main` and by the HTTP tests to build the Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::catalog::Catalog;
use crate::graphql::{self, MovieVotesSchema};
use crate::services::VoteBroker;

/// Shared state for HTTP handlers (GraphQL, health).
#[derive(Clone)]
pub struct AppState {
    pub schema: MovieVotesSchema,
    pub catalog: Arc<Catalog>,
    pub broker: Arc<VoteBroker>,
}

impl AppState {
    /// Build the schema around `catalog` and a fresh vote broker
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let broker = VoteBroker::new();
        let schema = graphql::build_schema(catalog.clone(), broker.clone());
        Self {
            schema,
            catalog,
            broker,
        }
    }
}

/// Build the full Axum router: /healthz, /readyz, /graphql, /graphql/ws and layers.
/// Cross-origin requests are allowed from anywhere.
pub fn build_app(state: AppState) -> Router<()> {
    Router::new()
        .merge(api::health::router())
        .merge(graphql::routes::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
