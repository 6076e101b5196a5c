//! The loader capability consumed by the database

use crate::Result;
use crate::source::PropertySource;
use async_trait::async_trait;

/// Produces property sources from some raw input.
///
/// The first source returned has the highest precedence within the loader.
#[async_trait]
pub trait PropertyLoader: Send + Sync {
    /// Human-readable identity used in logs and errors
    fn name(&self) -> &str;

    /// Load all sources that apply to the given active profiles
    async fn load_properties(&self, profiles: &[String]) -> Result<Vec<PropertySource>>;
}
