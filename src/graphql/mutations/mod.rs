pub mod votes;

pub use votes::VoteMutations;

pub(crate) mod prelude {
    pub(crate) use std::sync::Arc;

    pub(crate) use async_graphql::{Context, ErrorExtensions, ID, Object, Result};

    pub(crate) use crate::catalog::Catalog;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::VoteBroker;
}
