//! Format-agnostic parsing of configuration documents
//!
//! Every format is parsed into a `serde_json::Value` tree so that sources
//! can flatten them the same way regardless of where they came from.

use crate::properties;
use crate::{Error, Result};
use propdb_core::scalar::float_to_string;
use serde_json::{Map, Number, Value};
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
    Toml,
    Properties,
}

impl FileFormat {
    /// Detect the format from a file extension:
    /// - `.yaml`, `.yml` -> YAML
    /// - `.json` -> JSON
    /// - `.toml` -> TOML
    /// - `.properties` -> Java properties
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "properties" => Ok(Self::Properties),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Toml => "TOML",
            Self::Properties => "properties",
        }
    }

    /// Parse `content` read from `path`.
    ///
    /// An empty YAML document parses to `Value::Null`.
    pub fn parse(&self, content: &str, path: &Path) -> Result<Value> {
        match self {
            Self::Yaml => {
                let doc: serde_yaml::Value = serde_yaml::from_str(content)
                    .map_err(|e| Error::parse(path, self.name(), e))?;
                yaml_to_json(doc).map_err(|message| Error::parse(path, self.name(), message))
            }
            Self::Json => {
                serde_json::from_str(content).map_err(|e| Error::parse(path, self.name(), e))
            }
            Self::Toml => {
                let doc: toml::Table =
                    toml::from_str(content).map_err(|e| Error::parse(path, self.name(), e))?;
                Ok(toml_to_json(toml::Value::Table(doc)))
            }
            Self::Properties => properties::parse(content)
                .map(properties::to_value)
                .map_err(|e| Error::parse(path, self.name(), e)),
        }
    }
}

fn float_value(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(float_to_string(value)))
}

fn yaml_to_json(value: serde_yaml::Value) -> std::result::Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                float_value(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<std::result::Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Number(n) => n.to_string(),
                    other => return Err(format!("unsupported mapping key: {other:?}")),
                };
                map.insert(key, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => float_value(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
