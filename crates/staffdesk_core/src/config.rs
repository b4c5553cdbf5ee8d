//! Connection-string configuration for the database store variant.
//!
//! # Invariants
//! - An absent or blank connection string is a fatal startup error.
//! - Only SQLite locations are accepted; other URL schemes are rejected
//!   instead of being silently treated as file names.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Environment variable holding the database connection string.
pub const DATABASE_URL_ENV: &str = "STAFFDESK_DATABASE_URL";

const SQLITE_SCHEME: &str = "sqlite://";
const MEMORY_MARKERS: [&str; 2] = ["sqlite::memory:", ":memory:"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingDatabaseUrl,
    UnsupportedScheme(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDatabaseUrl => {
                write!(f, "{DATABASE_URL_ENV} is not set; a database connection string is required")
            }
            Self::UnsupportedScheme(scheme) => write!(
                f,
                "unsupported database scheme `{scheme}`; expected a path, sqlite://<path> or :memory:"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Where the database store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

impl DatabaseLocation {
    /// Parses a connection string.
    ///
    /// Accepted shapes: a bare path, `sqlite://<path>`, `sqlite::memory:`
    /// and `:memory:`.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if MEMORY_MARKERS.contains(&trimmed) {
            return Ok(Self::Memory);
        }
        if let Some(path) = trimmed.strip_prefix(SQLITE_SCHEME) {
            if path.is_empty() {
                return Err(ConfigError::MissingDatabaseUrl);
            }
            if path == ":memory:" {
                return Ok(Self::Memory);
            }
            return Ok(Self::File(PathBuf::from(path)));
        }
        if let Some((scheme, _)) = trimmed.split_once("://") {
            return Err(ConfigError::UnsupportedScheme(scheme.to_string()));
        }
        Ok(Self::File(PathBuf::from(trimmed)))
    }
}

/// Resolved configuration for the database store variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: DatabaseLocation,
}

impl StoreConfig {
    /// Builds config from an explicit value, typically a CLI flag that
    /// already fell back to the environment.
    pub fn from_value(value: Option<&str>) -> Result<Self, ConfigError> {
        let url = value.ok_or(ConfigError::MissingDatabaseUrl)?;
        Ok(Self {
            location: DatabaseLocation::parse(url)?,
        })
    }
}
