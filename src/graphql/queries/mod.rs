pub mod categories;
pub mod movies;
pub mod system;

pub use categories::CategoryQueries;
pub use movies::MovieQueries;
pub use system::SystemQueries;

pub(crate) mod prelude {
    pub(crate) use std::sync::Arc;

    pub(crate) use async_graphql::{Context, ID, Object, Result};

    pub(crate) use crate::catalog::Catalog;
    pub(crate) use crate::graphql::types::*;
}
