//! Non-GraphQL HTTP endpoints
//!
//! The primary API is GraphQL at /graphql.

pub mod health;
