//! GraphQL API with subscriptions for real-time vote updates
//!
//! Queries and mutations are served at `/graphql`, subscriptions over
//! WebSocket at `/graphql/ws`. Resolvers read the [Catalog](crate::catalog::Catalog)
//! and publish through the [VoteBroker](crate::services::VoteBroker), both
//! injected as schema data by [build_schema].

pub mod mutations;
pub mod queries;
pub mod routes;
mod schema;
mod subscriptions;
pub mod types;

pub use schema::{MovieVotesSchema, build_schema};
pub use types::{Category, Movie};
