//! Java `.properties` parsing
//!
//! Lines are read with the `java-properties` crate, so comments, the `=`,
//! `:` and whitespace separators, line continuations and `\uXXXX` escapes
//! follow `java.util.Properties`. Input is decoded as ISO-8859-1 like
//! `Properties.load(InputStream)`.

use java_properties::{PropertiesError, PropertiesIter};
use serde_json::{Map, Value};

/// Parse `content` into `(key, value)` pairs in document order.
pub fn parse(content: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    let mut pairs = Vec::new();
    PropertiesIter::new(content.as_bytes()).read_into(|key, value| pairs.push((key, value)))?;
    Ok(pairs)
}

/// Build a flat object from parsed pairs; later duplicates win.
pub fn to_value(pairs: Vec<(String, String)>) -> Value {
    let mut map = Map::new();
    for (key, value) in pairs {
        map.insert(key, Value::String(value));
    }
    Value::Object(map)
}
