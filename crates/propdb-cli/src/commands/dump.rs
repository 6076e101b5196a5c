//! The `dump` command

use crate::error::Result;
use colored::Colorize;
use propdb_core::key::strip_root;
use propdb_core::{PropertyDatabase, PropertyRecord, normalize_key};
use serde_json::{Map, Value, json};

/// Run the dump command
pub fn run_dump(db: &PropertyDatabase, prefix: Option<&str>, json: bool) -> Result<()> {
    println!("{}", render_dump(db, prefix, json)?);
    Ok(())
}

/// Format every merged record at or below `prefix`, sorted by key.
pub fn render_dump(db: &PropertyDatabase, prefix: Option<&str>, json: bool) -> Result<String> {
    let prefix = prefix.map(normalize_key);
    let mut records: Vec<PropertyRecord> = db
        .records()?
        .into_iter()
        .filter(|r| match &prefix {
            Some(p) => r.key == *p || strip_root(p, &r.key).is_some(),
            None => true,
        })
        .collect();
    records.sort_by(|a, b| a.key.cmp(&b.key));

    if json {
        let entries: Map<String, Value> = records
            .iter()
            .map(|r| (r.key.clone(), json!({ "value": r.value, "source": r.source_name })))
            .collect();
        return Ok(serde_json::to_string_pretty(&entries)?);
    }

    if records.is_empty() {
        return Ok(format!("{}", "No properties found".dimmed()));
    }

    let width = records.iter().map(|r| r.key.len()).max().unwrap_or(0);
    let lines: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "{} = {}  {}",
                format!("{:<width$}", r.key).green(),
                r.value,
                format!("({})", r.source_name).dimmed(),
            )
        })
        .collect();
    Ok(lines.join("\n"))
}
