//! Typed views over one key of the merged property space
//!
//! Every accessor follows the same policy:
//!
//! - key not set, no default: [`Error::PropertyNotSet`]
//! - key not set, default given: the default, unchanged
//! - key set: the real value
//!
//! Scalar accessors (`as_string`, `as_number`, `as_boolean`) consider a key
//! set only when it has an exact leaf record. Object accessors consider it
//! set when at least one record lives below it (`<key>.`).

use crate::error::PropertyKind;
use crate::map::PropertyMap;
use crate::mapper::{ArrayMapper, ErasedMapper, Mapper};
use crate::record::PropertyRecord;
use crate::scalar::parse_float;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A view over the merged properties rooted at one key
#[derive(Clone)]
pub struct PropertyContext {
    key: String,
    properties: Arc<PropertyMap>,
    mapper: Option<ErasedMapper>,
    array_mapper: Option<ErasedMapper>,
}

impl PropertyContext {
    pub(crate) fn new(
        key: String,
        properties: Arc<PropertyMap>,
        mapper: Option<ErasedMapper>,
        array_mapper: Option<ErasedMapper>,
    ) -> Self {
        Self {
            key,
            properties,
            mapper,
            array_mapper,
        }
    }

    /// The normalized key this context is bound to
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The exact leaf record for this key, if one exists
    pub fn record(&self) -> Option<&PropertyRecord> {
        self.properties.get(&self.key)
    }

    /// Whether the key has a leaf record or any descendants
    pub fn is_set(&self) -> bool {
        self.has_leaf() || self.has_root()
    }

    pub fn as_string(&self) -> Result<String> {
        self.scalar(PropertyKind::String, |v| v.to_string())
    }

    pub fn as_string_or(&self, default: impl Into<String>) -> String {
        self.leaf_or(default.into(), |v| v.to_string())
    }

    /// Parse the leaf value with `parseFloat` rules; non-numeric values are `NaN`.
    pub fn as_number(&self) -> Result<f64> {
        self.scalar(PropertyKind::Number, parse_float)
    }

    pub fn as_number_or(&self, default: f64) -> f64 {
        self.leaf_or(default, parse_float)
    }

    /// `true` only when the leaf value is `"true"`, ignoring case.
    pub fn as_boolean(&self) -> Result<bool> {
        self.scalar(PropertyKind::Boolean, parse_bool)
    }

    pub fn as_boolean_or(&self, default: bool) -> bool {
        self.leaf_or(default, parse_bool)
    }

    /// Rebuild the nested object below this key from its flat descendants.
    pub fn as_object(&self) -> Result<Map<String, Value>> {
        self.object(PropertyKind::Object, None, Ok)
    }

    pub fn as_object_or(&self, default: Map<String, Value>) -> Map<String, Value> {
        if self.has_root() {
            self.reconstruct()
        } else {
            default
        }
    }

    /// Map the reconstructed object with the mapper registered for this key.
    pub fn as_mapped<T: 'static>(&self) -> Result<T> {
        self.object(PropertyKind::Mapped, None, |obj| {
            let mapper = self.registered_mapper::<T>()?;
            mapper(Value::Object(obj))
        })
    }

    pub fn as_mapped_or<T: 'static>(&self, default: T) -> Result<T> {
        self.object(PropertyKind::Mapped, Some(default), |obj| {
            let mapper = self.registered_mapper::<T>()?;
            mapper(Value::Object(obj))
        })
    }

    /// Map the reconstructed object with an explicit mapper.
    pub fn as_mapped_with<T, F>(&self, mapper: F) -> Result<T>
    where
        F: FnOnce(Value) -> Result<T>,
    {
        self.object(PropertyKind::Mapped, None, |obj| mapper(Value::Object(obj)))
    }

    pub fn as_mapped_with_or<T, F>(&self, mapper: F, default: T) -> Result<T>
    where
        F: FnOnce(Value) -> Result<T>,
    {
        self.object(PropertyKind::Mapped, Some(default), |obj| mapper(Value::Object(obj)))
    }

    /// Map each direct child of the reconstructed object with the registered
    /// array mapper. Elements follow the object's key order.
    pub fn as_mapped_array<T: 'static>(&self) -> Result<Vec<T>> {
        self.object(PropertyKind::MappedArray, None, |obj| {
            let mapper = self.registered_array_mapper::<T>()?;
            map_children(obj, |k, v| mapper(k, v))
        })
    }

    pub fn as_mapped_array_or<T: 'static>(&self, default: Vec<T>) -> Result<Vec<T>> {
        self.object(PropertyKind::MappedArray, Some(default), |obj| {
            let mapper = self.registered_array_mapper::<T>()?;
            map_children(obj, |k, v| mapper(k, v))
        })
    }

    /// Map each direct child of the reconstructed object with an explicit mapper.
    pub fn as_mapped_array_with<T, F>(&self, mapper: F) -> Result<Vec<T>>
    where
        F: Fn(&str, Value) -> Result<T>,
    {
        self.object(PropertyKind::MappedArray, None, |obj| map_children(obj, mapper))
    }

    pub fn as_mapped_array_with_or<T, F>(&self, mapper: F, default: Vec<T>) -> Result<Vec<T>>
    where
        F: Fn(&str, Value) -> Result<T>,
    {
        self.object(PropertyKind::MappedArray, Some(default), |obj| map_children(obj, mapper))
    }

    fn has_leaf(&self) -> bool {
        self.properties.contains_key(&self.key)
    }

    fn has_root(&self) -> bool {
        self.properties.has_descendants(&self.key)
    }

    fn scalar<T>(&self, kind: PropertyKind, f: impl FnOnce(&str) -> T) -> Result<T> {
        self.record()
            .map(|record| f(&record.value))
            .ok_or_else(|| Error::not_set(&self.key, kind))
    }

    fn leaf_or<T>(&self, default: T, f: impl FnOnce(&str) -> T) -> T {
        match self.record() {
            Some(record) => f(&record.value),
            None => default,
        }
    }

    fn object<T>(
        &self,
        kind: PropertyKind,
        default: Option<T>,
        f: impl FnOnce(Map<String, Value>) -> Result<T>,
    ) -> Result<T> {
        if self.has_root() {
            return f(self.reconstruct());
        }
        default.ok_or_else(|| Error::not_set(&self.key, kind))
    }

    fn reconstruct(&self) -> Map<String, Value> {
        let mut root = Map::new();
        for (path, record) in self.properties.descendants(&self.key) {
            let segments: Vec<&str> = path.split('.').collect();
            insert_path(&mut root, &segments, &record.value);
        }
        root
    }

    fn registered_mapper<T: 'static>(&self) -> Result<Mapper<T>> {
        let erased = self.mapper.as_ref().ok_or_else(|| Error::NoMapperRegistered {
            key: self.key.clone(),
        })?;
        erased
            .downcast_ref::<Mapper<T>>()
            .cloned()
            .ok_or_else(|| Error::MapperTypeMismatch {
                key: self.key.clone(),
                expected: std::any::type_name::<T>(),
            })
    }

    fn registered_array_mapper<T: 'static>(&self) -> Result<ArrayMapper<T>> {
        let erased = self
            .array_mapper
            .as_ref()
            .ok_or_else(|| Error::NoMapperRegistered {
                key: self.key.clone(),
            })?;
        erased
            .downcast_ref::<ArrayMapper<T>>()
            .cloned()
            .ok_or_else(|| Error::MapperTypeMismatch {
                key: self.key.clone(),
                expected: std::any::type_name::<T>(),
            })
    }
}

impl std::fmt::Debug for PropertyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyContext")
            .field("key", &self.key)
            .field("is_set", &self.is_set())
            .field("has_mapper", &self.mapper.is_some())
            .field("has_array_mapper", &self.array_mapper.is_some())
            .finish()
    }
}

fn parse_bool(value: &str) -> bool {
    value.to_lowercase() == "true"
}

// A scalar already sitting on an intermediate segment shadows anything deeper.
fn insert_path(obj: &mut Map<String, Value>, path: &[&str], value: &str) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    if rest.is_empty() {
        obj.insert((*head).to_string(), Value::String(value.to_string()));
        return;
    }
    let child = obj
        .entry((*head).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(child) = child {
        insert_path(child, rest, value);
    }
}

fn map_children<T>(
    obj: Map<String, Value>,
    mapper: impl Fn(&str, Value) -> Result<T>,
) -> Result<Vec<T>> {
    obj.into_iter().map(|(k, v)| mapper(&k, v)).collect()
}
