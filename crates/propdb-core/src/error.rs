//! Error types for propdb-core

use std::fmt;

/// Result type for propdb-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error produced by a loader implementation
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The typed view a caller asked for when a property turned out to be missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    String,
    Number,
    Boolean,
    Object,
    Mapped,
    MappedArray,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "a string",
            Self::Number => "a number",
            Self::Boolean => "a boolean",
            Self::Object => "an object",
            Self::Mapped => "a mapped object",
            Self::MappedArray => "a mapped array",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while loading or querying properties
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `get` was called before a successful `load_properties`
    #[error("Property database is not loaded; call load_properties() first")]
    NotLoaded,

    /// A typed accessor was used on an absent key without a default
    #[error("Property {key} does not exist as {kind}")]
    PropertyNotSet { key: String, kind: PropertyKind },

    /// A mapped accessor had neither an explicit nor a registered mapper
    #[error("Registered mapper for key {key} not found and no mapper passed")]
    NoMapperRegistered { key: String },

    /// The mapper registered for a key produces a different type than requested
    #[error("Registered mapper for key {key} does not produce {expected}")]
    MapperTypeMismatch { key: String, expected: &'static str },

    /// A mapper rejected the reconstructed object
    #[error("Failed to map property {key}: {message}")]
    Mapping { key: String, message: String },

    /// A value that cannot be flattened into string leaves (arrays)
    #[error("Unsupported property type in key {key}: {kind}")]
    UnsupportedValueKind { key: String, kind: &'static str },

    /// A loader failed to produce its sources
    #[error("Loader {loader} failed: {source}")]
    LoaderFailure {
        loader: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Wrap an arbitrary loader error, recording which loader produced it
    pub fn loader(loader: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::LoaderFailure {
            loader: loader.into(),
            source: source.into(),
        }
    }

    /// Create a mapping error for the given key
    pub fn mapping(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Mapping {
            key: key.into(),
            message: message.into(),
        }
    }

    pub(crate) fn not_set(key: &str, kind: PropertyKind) -> Self {
        Self::PropertyNotSet {
            key: key.to_string(),
            kind,
        }
    }
}
