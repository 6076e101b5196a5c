//! Error types for propdb-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from propdb-core
    #[error(transparent)]
    Core(#[from] propdb_core::Error),

    /// Error from propdb-loaders
    #[error(transparent)]
    Loader(#[from] propdb_loaders::Error),

    /// JSON rendering or parsing error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Logging setup error
    #[error("Failed to initialise logging: {0}")]
    Logging(String),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
