//! Catalog loading from JSON.
//!
//! The bundled mock data is compiled into the binary; `MOVIES_PATH` and
//! `CATEGORIES_PATH` replace either collection with a file on disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use super::Catalog;
use crate::config::Config;

const BUNDLED_MOVIES: &str = include_str!("../../data/movies.json");
const BUNDLED_CATEGORIES: &str = include_str!("../../data/categories.json");

/// Load the catalog described by the configuration
pub fn load(config: &Config) -> Result<Catalog> {
    let movies = match config.movies_path.as_deref() {
        Some(path) => read_collection(path, "movies")?,
        None => parse_collection(BUNDLED_MOVIES, "bundled movies")?,
    };
    let categories = match config.categories_path.as_deref() {
        Some(path) => read_collection(path, "categories")?,
        None => parse_collection(BUNDLED_CATEGORIES, "bundled categories")?,
    };

    Catalog::new(movies, categories).context("Invalid catalog data")
}

/// Catalog built from the mock data shipped with the crate
pub fn bundled() -> Result<Catalog> {
    load(&Config::default())
}

/// Build a catalog from two JSON documents
pub fn from_json(movies: &str, categories: &str) -> Result<Catalog> {
    let movies = parse_collection(movies, "movies")?;
    let categories = parse_collection(categories, "categories")?;
    Catalog::new(movies, categories).context("Invalid catalog data")
}

fn read_collection<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} from {}", what, path.display()))?;
    let items: Vec<T> = parse_collection(&raw, what)?;
    info!(path = %path.display(), count = items.len(), "Loaded {} from file", what);
    Ok(items)
}

fn parse_collection<T: DeserializeOwned>(raw: &str, what: &str) -> Result<Vec<T>> {
    serde_json::from_str(raw).with_context(|| format!("Failed to parse {}", what))
}
