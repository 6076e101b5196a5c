//! Config-server payload loader
//!
//! Accepts the property-source list returned by a Spring-style config
//! server:
//!
//! ```json
//! {
//!   "PropertySources": [
//!     { "Name": "app-production.yml", "Source": { "app.config.value": 12345 } },
//!     { "Name": "application.yml", "Source": { "app.config.name": "foo" } }
//!   ]
//! }
//! ```
//!
//! Entries are listed highest precedence first. Lower-case field names
//! (`propertySources`, `name`, `source`) are accepted as well.

use crate::{Error, Result};
use async_trait::async_trait;
use propdb_core::{Metadata, PropertyLoader, PropertySource};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// One named entry of a config-server payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigServerPropertySource {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,

    #[serde(rename = "Source", alias = "source", default)]
    pub source: Map<String, Value>,
}

/// A full config-server payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigServerProperties {
    #[serde(rename = "PropertySources", alias = "propertySources", default)]
    pub property_sources: Vec<ConfigServerPropertySource>,
}

impl ConfigServerProperties {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::InvalidPayload {
            message: e.to_string(),
        })
    }
}

/// Emits one source per payload entry, preserving names and order
#[derive(Debug, Clone)]
pub struct ConfigServerPropertyLoader {
    name: String,
    properties: ConfigServerProperties,
}

impl ConfigServerPropertyLoader {
    pub fn new(properties: ConfigServerProperties) -> Self {
        Self {
            name: "ConfigServer".to_string(),
            properties,
        }
    }

    /// Parse a JSON payload.
    pub fn from_json(content: &str) -> Result<Self> {
        ConfigServerProperties::from_json(content).map(Self::new)
    }

    /// Read and parse a JSON payload from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut loader = Self::from_json(&content)?;
        loader.name = format!("ConfigServer:{}", path.display());
        Ok(loader)
    }

    pub fn properties(&self) -> &ConfigServerProperties {
        &self.properties
    }
}

#[async_trait]
impl PropertyLoader for ConfigServerPropertyLoader {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_properties(&self, _profiles: &[String]) -> propdb_core::Result<Vec<PropertySource>> {
        let metadata = Metadata::new();
        let mut sources = Vec::with_capacity(self.properties.property_sources.len());
        for entry in &self.properties.property_sources {
            let mut source = PropertySource::new(entry.name.clone());
            source.set_property("", &Value::Object(entry.source.clone()), &metadata)?;
            tracing::debug!(source = %entry.name, keys = source.len(), "Loaded config server source");
            sources.push(source);
        }
        Ok(sources)
    }
}
