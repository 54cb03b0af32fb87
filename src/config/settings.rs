//! Application settings loading from config.toml
//!
//! Settings cover the local database location and the signed-in user
//! profile the session is opened for. `DATABASE_URL` in the environment
//! overrides the file, which keeps tests and deployments independent of a
//! checked-in config.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/freshplan.sqlite?mode=rwc";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// SQLite connection string for the local sync adapter
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Profile the session is opened for
    pub user: UserProfile,
}

/// The signed-in household member
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    /// Stable user id; scopes the session epoch
    pub id: String,
    /// Optional display name for log output
    pub display_name: Option<String>,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

/// Loads settings from a TOML file, then applies environment overrides.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    let mut settings: Settings = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if let Ok(url) = std::env::var("DATABASE_URL") {
        settings.database_url = url;
    }
    Ok(settings)
}

/// Loads settings from the default location (./config.toml)
pub fn load_default_settings() -> Result<Settings> {
    load_settings("config.toml")
}
