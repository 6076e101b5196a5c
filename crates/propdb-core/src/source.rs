//! Named containers of flattened property records
//!
//! A `PropertySource` holds everything one loader produced from one input
//! (a file, the environment, a config-server entry). Structured values are
//! flattened into dot-delimited leaves as they are set:
//!
//! ```text
//! set_property("app", {"db": {"Port": 5432}})  =>  app.db.port = "5432"
//! ```

use crate::key::{join_key, normalize_key};
use crate::map::PropertyMap;
use crate::record::{Metadata, PropertyRecord};
use crate::scalar::number_to_string;
use crate::{Error, Result};
use serde_json::Value;

/// An ordered, named container of property records
#[derive(Debug, Clone)]
pub struct PropertySource {
    name: String,
    records: PropertyMap,
}

impl PropertySource {
    /// Create an empty source. `name` becomes the provenance of every record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: PropertyMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set `value` under `key`, flattening objects into one record per leaf.
    ///
    /// `Null` is a no-op. Arrays anywhere in `value` fail with
    /// [`Error::UnsupportedValueKind`] and leave the source untouched.
    pub fn set_property(&mut self, key: &str, value: &Value, metadata: &Metadata) -> Result<()> {
        let mut leaves = Vec::new();
        flatten(key, value, &mut leaves)?;

        for (leaf_key, leaf_value) in leaves {
            let record = PropertyRecord::new(
                normalize_key(&leaf_key),
                leaf_value,
                self.name.clone(),
                metadata.clone(),
            );
            tracing::trace!(source = %self.name, key = %record.key, "Setting property");
            self.records.insert_linked(record);
        }
        Ok(())
    }

    /// Look up a record by its normalized key.
    pub fn get_property(&self, key: &str) -> Option<&PropertyRecord> {
        self.records.get(key)
    }

    /// All normalized keys held by this source.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &PropertyRecord> {
        self.records.iter()
    }

    /// Consume the source, yielding its records in first-set order.
    pub fn into_records(self) -> Vec<PropertyRecord> {
        self.records.into_records()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn flatten(key: &str, value: &Value, out: &mut Vec<(String, String)>) -> Result<()> {
    match value {
        Value::Null => {}
        Value::String(s) => out.push((key.to_string(), s.clone())),
        Value::Number(n) => out.push((key.to_string(), number_to_string(n))),
        Value::Bool(b) => out.push((key.to_string(), b.to_string())),
        Value::Object(map) => {
            for (child, child_value) in map {
                flatten(&join_key(key, child), child_value, out)?;
            }
        }
        Value::Array(_) => {
            return Err(Error::UnsupportedValueKind {
                key: key.to_string(),
                kind: "Array",
            });
        }
    }
    Ok(())
}
