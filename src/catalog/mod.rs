//! In-memory movie catalog
//!
//! Owns the two collections the API serves (movies and categories) and the
//! lookups the resolvers are built on. The catalog is created once at startup
//! and handed to the GraphQL schema as shared data; nothing here is global.
//!
//! Ids are compared after [normalize_id], so `"1"`, `" 1 "` and a JSON `1`
//! all address the same record.

pub mod loader;

use std::collections::HashSet;

use async_graphql::{ErrorExtensions, ID};
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{info, warn};

use crate::graphql::types::{Category, Movie};

/// Errors raised by catalog construction and the vote mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Movie not found: {0}")]
    MovieNotFound(String),

    #[error("Duplicate movie id: {0}")]
    DuplicateMovieId(String),

    #[error("Duplicate category id: {0}")]
    DuplicateCategoryId(String),

    #[error("Vote count limit reached for movie: {0}")]
    VoteLimitReached(String),
}

impl CatalogError {
    fn code(&self) -> &'static str {
        match self {
            CatalogError::MovieNotFound(_) => "NOT_FOUND",
            CatalogError::VoteLimitReached(_) => "VOTE_LIMIT_REACHED",
            CatalogError::DuplicateMovieId(_) | CatalogError::DuplicateCategoryId(_) => {
                "INVALID_DATA"
            }
        }
    }
}

impl ErrorExtensions for CatalogError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Canonical form of an id before comparison.
pub fn normalize_id(raw: &str) -> &str {
    raw.trim()
}

fn same_id(stored: &ID, candidate: &str) -> bool {
    stored.as_str() == normalize_id(candidate)
}

/// Movies and categories held for the lifetime of the server.
///
/// Movies sit behind a lock because `vote_count` changes at runtime;
/// categories never change after construction.
#[derive(Debug)]
pub struct Catalog {
    movies: RwLock<Vec<Movie>>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// Category references that do not resolve are kept (they surface as
    /// `null` entries in `Movie.categories`) but are logged.
    pub fn new(movies: Vec<Movie>, categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut category_ids = HashSet::new();
        for category in &categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateCategoryId(category.id.as_str().to_string()));
            }
        }

        let mut movie_ids = HashSet::new();
        for movie in &movies {
            if !movie_ids.insert(movie.id.as_str()) {
                return Err(CatalogError::DuplicateMovieId(movie.id.as_str().to_string()));
            }
            for category_id in &movie.category_ids {
                if !category_ids.contains(category_id.as_str()) {
                    warn!(
                        movie_id = %movie.id.as_str(),
                        category_id = %category_id.as_str(),
                        "Movie references an unknown category"
                    );
                }
            }
        }

        info!(
            movies = movies.len(),
            categories = categories.len(),
            "Catalog loaded"
        );

        Ok(Self {
            movies: RwLock::new(movies),
            categories,
        })
    }

    /// All movies, in load order
    pub fn movies(&self) -> Vec<Movie> {
        self.movies.read().clone()
    }

    /// All categories, in load order
    pub fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.read().len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn find_movie_by_id(&self, id: &str) -> Option<Movie> {
        self.movies
            .read()
            .iter()
            .find(|movie| same_id(&movie.id, id))
            .cloned()
    }

    pub fn find_category_by_id(&self, id: &str) -> Option<Category> {
        self.categories
            .iter()
            .find(|category| same_id(&category.id, id))
            .cloned()
    }

    /// Movies tagged with the category whose name matches exactly.
    ///
    /// An unknown name yields an empty list rather than an error.
    pub fn find_movies_by_category_name(&self, name: &str) -> Vec<Movie> {
        match self.categories.iter().find(|category| category.name == name) {
            Some(category) => self.movies_for_category(category),
            None => Vec::new(),
        }
    }

    /// One entry per id in `movie.category_ids`, `None` where the id is dangling.
    pub fn categories_for_movie(&self, movie: &Movie) -> Vec<Option<Category>> {
        movie
            .category_ids
            .iter()
            .map(|id| self.find_category_by_id(id))
            .collect()
    }

    pub fn movies_for_category(&self, category: &Category) -> Vec<Movie> {
        self.movies
            .read()
            .iter()
            .filter(|movie| movie.category_ids.iter().any(|id| id == &category.id))
            .cloned()
            .collect()
    }

    /// Add one vote to a movie and return the updated record.
    ///
    /// `notify` runs with the updated movie while the write lock is still
    /// held, so observers see votes in the order they were applied. Nothing
    /// is mutated and `notify` is not called when the id is unknown or the
    /// count is already at its maximum.
    pub fn add_vote<F>(&self, id: &str, notify: F) -> Result<Movie, CatalogError>
    where
        F: FnOnce(&Movie),
    {
        let mut movies = self.movies.write();
        let movie = movies
            .iter_mut()
            .find(|movie| same_id(&movie.id, id))
            .ok_or_else(|| CatalogError::MovieNotFound(normalize_id(id).to_string()))?;

        movie.vote_count = movie
            .vote_count
            .checked_add(1)
            .ok_or_else(|| CatalogError::VoteLimitReached(movie.id.as_str().to_string()))?;
        notify(movie);
        Ok(movie.clone())
    }
}
