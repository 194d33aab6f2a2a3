//! Configuration loading
//!
//! Settings resolve in priority order:
//! 1. Command-line argument or environment variable (highest priority)
//! 2. TOML config file
//! 3. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://songlib.db?mode=rwc";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LIMIT: i64 = 5;
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_VERSE: usize = 1;

/// Fallback values for missing or invalid query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDefaults {
    /// Page size when `limit` is absent or invalid
    pub limit: i64,
    /// 1-based page when `page` is absent or invalid
    pub page: i64,
    /// 1-based stanza when `verse` is absent or invalid
    pub verse: usize,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            verse: DEFAULT_VERSE,
        }
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// SQLite connection URL
    pub database_url: String,
    /// Socket address the HTTP server binds to
    pub listen_addr: String,
    /// Tracing filter level used when RUST_LOG is not set
    pub log_level: String,
    pub defaults: QueryDefaults,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            defaults: QueryDefaults::default(),
        }
    }
}

/// One configuration source where every setting is optional
///
/// Deserialized from the TOML file, and filled from CLI/env by the binary.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub database_url: Option<String>,
    pub listen_addr: Option<String>,
    pub log_level: Option<String>,
    pub default_limit: Option<i64>,
    pub default_page: Option<i64>,
    pub default_verse: Option<usize>,
}

impl PartialConfig {
    /// Read a TOML config file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }
}

impl ServiceConfig {
    /// Merge `overrides` over `file` over compiled defaults, then validate
    pub fn resolve(overrides: PartialConfig, file: PartialConfig) -> Result<Self> {
        let base = Self::default();
        let config = Self {
            database_url: overrides
                .database_url
                .or(file.database_url)
                .unwrap_or(base.database_url),
            listen_addr: overrides
                .listen_addr
                .or(file.listen_addr)
                .unwrap_or(base.listen_addr),
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or(base.log_level),
            defaults: QueryDefaults {
                limit: overrides
                    .default_limit
                    .or(file.default_limit)
                    .unwrap_or(base.defaults.limit),
                page: overrides
                    .default_page
                    .or(file.default_page)
                    .unwrap_or(base.defaults.page),
                verse: overrides
                    .default_verse
                    .or(file.default_verse)
                    .unwrap_or(base.defaults.verse),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject defaults that could never be valid request values
    pub fn validate(&self) -> Result<()> {
        if self.defaults.limit < 1 {
            return Err(Error::Config(format!(
                "default_limit must be at least 1 (got {})",
                self.defaults.limit
            )));
        }
        if self.defaults.page < 1 {
            return Err(Error::Config(format!(
                "default_page must be at least 1 (got {})",
                self.defaults.page
            )));
        }
        if self.defaults.verse < 1 {
            return Err(Error::Config("default_verse must be at least 1".to_string()));
        }
        if self.database_url.trim().is_empty() {
            return Err(Error::Config("database_url must not be empty".to_string()));
        }
        Ok(())
    }
}
