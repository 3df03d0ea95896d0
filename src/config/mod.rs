//! Application configuration management

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind
    pub host: String,

    /// Server port
    pub port: u16,

    /// JSON file replacing the bundled movie data
    pub movies_path: Option<PathBuf>,

    /// JSON file replacing the bundled category data
    pub categories_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            movies_path: None,
            categories_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),

            port: match lookup("PORT") {
                Some(port) => port.parse().context("Invalid PORT")?,
                None => defaults.port,
            },

            movies_path: lookup("MOVIES_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),

            categories_path: lookup("CATEGORIES_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        })
    }

    /// Address the HTTP server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid HOST: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
