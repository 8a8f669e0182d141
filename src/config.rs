//! File-backed configuration, read once at startup.

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::ConfigError;

/// OAuth credential block.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    pub consumer_key: String,
    pub consumer_secret: SecretString,
    pub access_token: String,
    pub access_secret: SecretString,
}

/// An account referenced by its platform identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub id: String,
}

/// Bot configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub auth: AuthConfig,
    /// Account whose posts get transformed.
    pub user: AccountConfig,
    /// Account the transforms are posted from.
    pub bot: AccountConfig,
    /// Seconds between timeline polls.
    #[serde(default = "default_poll_seconds")]
    pub poll_seconds: u64,
    /// Run log messages through the transform too.
    #[serde(default = "default_owo_logs")]
    pub owo_logs: bool,
}

fn default_poll_seconds() -> u64 {
    60
}

fn default_owo_logs() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
