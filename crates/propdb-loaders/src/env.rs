//! Environment variable loader

use async_trait::async_trait;
use propdb_core::{Metadata, PropertyLoader, PropertySource, Result};
use serde_json::Value;

/// Source name used for environment variables
pub const ENVIRONMENT_SOURCE: &str = "EnvironmentVariables";

/// Loads `NAME_WITH_UNDERSCORES=value` pairs into a single source.
///
/// Names are normalized like every other key, so `SERVER_PORT` becomes
/// `server.port`.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentPropertyLoader {
    vars: Vec<(String, String)>,
}

impl EnvironmentPropertyLoader {
    pub fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process_env() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::new(vars)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[async_trait]
impl PropertyLoader for EnvironmentPropertyLoader {
    fn name(&self) -> &str {
        ENVIRONMENT_SOURCE
    }

    async fn load_properties(&self, _profiles: &[String]) -> Result<Vec<PropertySource>> {
        let mut source = PropertySource::new(ENVIRONMENT_SOURCE);
        let metadata = Metadata::new();
        for (name, value) in &self.vars {
            source.set_property(name, &Value::String(value.clone()), &metadata)?;
        }
        tracing::debug!(variables = source.len(), "Loaded environment variables");
        Ok(vec![source])
    }
}
