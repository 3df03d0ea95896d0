//! GraphQL object types for movies and categories
//!
//! These double as the catalog's record types: they deserialize straight
//! from the mock data and are returned as-is by the resolvers.

use std::sync::Arc;

use async_graphql::{ComplexObject, Context, ID, Result, SimpleObject};
use serde::{Deserialize, Deserializer};

use crate::catalog::{Catalog, normalize_id};

/// A movie with its vote tally
#[derive(Debug, Clone, PartialEq, Deserialize, SimpleObject)]
#[graphql(complex, rename_fields = "snake_case")]
pub struct Movie {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ID,
    pub vote_count: i32,
    pub vote_average: f64,
    pub popularity: f64,
    pub video: bool,
    pub adult: bool,
    pub title: String,
    pub original_title: String,
    pub original_language: String,
    pub overview: String,
    pub release_date: String,
    pub backdrop_path: String,
    #[serde(alias = "poste_path")]
    pub poster_path: String,
    #[serde(deserialize_with = "deserialize_ids")]
    pub category_ids: Vec<ID>,
}

#[ComplexObject]
impl Movie {
    /// Categories this movie belongs to, in `category_ids` order.
    /// An id with no matching category resolves to `null`.
    async fn categories(&self, ctx: &Context<'_>) -> Result<Vec<Option<Category>>> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        Ok(catalog.categories_for_movie(self))
    }
}

/// A movie category (genre)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Category {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ID,
    pub name: String,
}

#[ComplexObject]
impl Category {
    /// Movies tagged with this category
    async fn movies(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        Ok(catalog.movies_for_category(self))
    }
}

/// Ids arrive as JSON strings or integers; both become normalized strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_id(self) -> ID {
        match self {
            RawId::Text(text) => ID::from(normalize_id(&text)),
            RawId::Number(number) => ID::from(number.to_string()),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<ID, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RawId::into_id)
}

fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<ID>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawId>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(RawId::into_id).collect())
}
