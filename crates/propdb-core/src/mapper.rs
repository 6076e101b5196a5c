//! Mapping functions and the per-key mapper registry
//!
//! Mappers turn a reconstructed object into a typed value. The registry
//! stores them type-erased and hands them back to the call site that asks
//! for a concrete `T`.

use crate::Result;
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps a reconstructed object to `T`
pub type Mapper<T> = Arc<dyn Fn(Value) -> Result<T> + Send + Sync>;

/// Maps one `(child key, child value)` pair of a reconstructed object to `T`
pub type ArrayMapper<T> = Arc<dyn Fn(&str, Value) -> Result<T> + Send + Sync>;

pub(crate) type ErasedMapper = Arc<dyn Any + Send + Sync>;

/// Registry mapping property roots to mapping functions.
///
/// Registering a key twice replaces the previous mapper.
#[derive(Clone, Default)]
pub struct MapperRegistry {
    mappers: HashMap<String, ErasedMapper>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register<M: Send + Sync + 'static>(&mut self, key: impl Into<String>, mapper: M) {
        self.mappers.insert(key.into(), Arc::new(mapper));
    }

    pub(crate) fn get(&self, key: &str) -> Option<ErasedMapper> {
        self.mappers.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.mappers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}

impl std::fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.mappers.keys().collect();
        keys.sort();
        f.debug_struct("MapperRegistry").field("keys", &keys).finish()
    }
}
