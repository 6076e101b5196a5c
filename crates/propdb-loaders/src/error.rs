//! Error types for propdb-loaders

use std::path::PathBuf;

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading raw configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Config root {path} is not a directory")]
    InvalidRoot { path: PathBuf },

    #[error("Invalid config server payload: {message}")]
    InvalidPayload { message: String },

    /// Errors raised by the core while building sources
    #[error(transparent)]
    Property(#[from] propdb_core::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, format: &str, message: impl ToString) -> Self {
        Self::ConfigParse {
            path: path.into(),
            format: format.to_string(),
            message: message.to_string(),
        }
    }

    /// Convert into the core taxonomy on behalf of `loader`.
    ///
    /// Core errors pass through unchanged; everything else becomes a
    /// `LoaderFailure` naming the loader.
    pub fn into_core(self, loader: &str) -> propdb_core::Error {
        match self {
            Self::Property(e) => e,
            other => propdb_core::Error::loader(loader, other),
        }
    }
}
