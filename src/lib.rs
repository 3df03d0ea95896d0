//! Movie Votes - GraphQL server for browsing movies by category and voting on them
//!
//! All operations are exposed via GraphQL at /graphql, with vote
//! notifications streamed over WebSocket at /graphql/ws.

pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod graphql;
pub mod services;

pub use app::{AppState, build_app};
