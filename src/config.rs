//! Defaults for the SELECT list, table and page size.
//!
//! Read from TOML:
//!
//! ```toml
//! select = "id, name, scheduled_for"
//! table = "groups"
//! page_size = 50
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::builder::QueryBuilder;
use crate::error::{QueryError, QueryResult};

/// Query defaults
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// SELECT list
    pub select: String,

    /// Source table
    pub table: String,

    /// Page size used when only a page number is given
    pub page_size: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            select: "*".to_string(),
            table: "groups".to_string(),
            page_size: 20,
        }
    }
}

impl QueryConfig {
    /// Create a new configuration builder
    pub fn builder() -> QueryConfigBuilder {
        QueryConfigBuilder::default()
    }

    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> QueryResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| QueryError::Config(e.to_string()))?;
        if config.page_size < 1 {
            return Err(QueryError::Config("page_size must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Read a config file.
    pub fn from_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// `<config dir>/arrangement-query/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("arrangement-query").join("config.toml"))
    }

    /// Load from `path` if given, else from [`Self::default_path`] when that
    /// file exists, else fall back to defaults.
    pub fn load(path: Option<&Path>) -> QueryResult<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// A builder with the SELECT list and table already set.
    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::create().select(&self.select).from(&self.table)
    }
}

/// Builder for QueryConfig
#[derive(Debug, Default)]
pub struct QueryConfigBuilder {
    config: QueryConfig,
}

impl QueryConfigBuilder {
    /// Set the SELECT list
    pub fn select(mut self, fields: impl Into<String>) -> Self {
        self.config.select = fields.into();
        self
    }

    /// Set the source table
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.config.table = table.into();
        self
    }

    /// Set the default page size
    pub fn page_size(mut self, size: u64) -> Self {
        self.config.page_size = size;
        self
    }

    /// Build the configuration
    pub fn build(self) -> QueryConfig {
        self.config
    }
}
