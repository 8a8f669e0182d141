//! Error types for owobot.

/// Top-level error type for the bot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Bot error: {0}")]
    Bot(#[from] BotError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from the remote platform client.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} rejected: {status}: {body}")]
    Api {
        endpoint: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Per-message processing errors. Fatal for that message only — the
/// handling boundary logs them and the stream moves on.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Status {id} carries no text in any form")]
    MissingText { id: String },

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Result type alias for the bot.
pub type Result<T> = std::result::Result<T, Error>;
