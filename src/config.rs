use crate::errors::AppError;
use std::path::PathBuf;

/// Environment variable holding the user store connection string.
pub const DB_URI_VAR: &str = "MONGO_URI";
pub const API_BASE_URL_VAR: &str = "API_BASE_URL";
pub const STORE_HASHED_VAR: &str = "ADMIN_STORE_HASHED";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Where the user store lives, resolved from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub uri: String,
}

impl DbConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_var(std::env::var(DB_URI_VAR).ok())
    }

    /// Builds the config from the raw value of `MONGO_URI`, if any.
    pub fn from_var(value: Option<String>) -> Result<Self, AppError> {
        value
            .map(Self::new)
            .ok_or_else(|| AppError::ConfigError(format!("{} must be set", DB_URI_VAR)))
    }

    pub fn location(&self) -> Result<DbLocation, AppError> {
        parse_db_uri(&self.uri)
    }
}

// Accepts sqlite://path, sqlite:path, :memory: or a bare path.
pub fn parse_db_uri(uri: &str) -> Result<DbLocation, AppError> {
    let uri = uri.trim();
    if uri.is_empty() {
        return Err(AppError::ConfigError(
            "connection string is empty".to_string(),
        ));
    }

    let rest = uri
        .strip_prefix("sqlite://")
        .or_else(|| uri.strip_prefix("sqlite:"))
        .unwrap_or(uri);

    if rest.contains("://") {
        return Err(AppError::ConfigError(format!(
            "unsupported connection string scheme: {}",
            uri
        )));
    }

    match rest {
        "" => Err(AppError::ConfigError(
            "connection string has no database path".to_string(),
        )),
        ":memory:" => Ok(DbLocation::Memory),
        path => Ok(DbLocation::File(PathBuf::from(path))),
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

pub fn flag_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true") | Some("1") | Some("yes")
    )
}
