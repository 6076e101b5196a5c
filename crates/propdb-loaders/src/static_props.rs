//! In-memory static property loader

use async_trait::async_trait;
use propdb_core::{Metadata, PropertyLoader, PropertySource, Result};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

/// Source name used for static properties
pub const STATIC_SOURCE: &str = "StaticProperties";

/// Wraps a nested in-memory value as a single source.
///
/// Clones share the backing value; [`replace`](Self::replace) on any clone
/// is observed by the next `load_properties` call of every other clone.
#[derive(Debug, Clone)]
pub struct StaticPropertyLoader {
    properties: Arc<RwLock<Value>>,
}

impl StaticPropertyLoader {
    pub fn new(properties: Value) -> Self {
        Self {
            properties: Arc::new(RwLock::new(properties)),
        }
    }

    /// Swap the backing value, returning the previous one.
    pub fn replace(&self, properties: Value) -> Value {
        let mut guard = self
            .properties
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, properties)
    }

    /// A copy of the current backing value.
    pub fn current(&self) -> Value {
        self.properties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PropertyLoader for StaticPropertyLoader {
    fn name(&self) -> &str {
        STATIC_SOURCE
    }

    async fn load_properties(&self, _profiles: &[String]) -> Result<Vec<PropertySource>> {
        let properties = self.current();
        let mut source = PropertySource::new(STATIC_SOURCE);
        source.set_property("", &properties, &Metadata::new())?;
        Ok(vec![source])
    }
}
