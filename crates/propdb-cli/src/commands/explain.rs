//! The `explain` command

use crate::error::{CliError, Result};
use colored::Colorize;
use propdb_core::PropertyDatabase;

/// Run the explain command
pub fn run_explain(db: &PropertyDatabase, key: &str, json: bool) -> Result<()> {
    println!("{}", render_explain(db, key, json)?);
    Ok(())
}

/// Describe the winning record for `key` and every value it overrode.
///
/// A key that only exists as a namespace is reported with its child count.
pub fn render_explain(db: &PropertyDatabase, key: &str, json: bool) -> Result<String> {
    let context = db.get(key)?;

    let Some(record) = context.record() else {
        let snapshot = db.snapshot()?;
        let children = snapshot.descendants(context.key()).count();
        if children > 0 {
            return Ok(format!(
                "{} is a namespace with {} properties; use {} to list them",
                context.key().green(),
                children,
                format!("propdb dump --prefix {}", context.key()).cyan()
            ));
        }
        return Err(CliError::user(format!("Property {} is not set", context.key())));
    };

    if json {
        return Ok(serde_json::to_string_pretty(record)?);
    }

    let mut lines = vec![
        format!("{} = {}", record.key.green().bold(), record.value),
        format!("  {} {}", "from".dimmed(), record.source_name),
    ];
    for previous in record.history() {
        lines.push(format!(
            "  {} {} {} {}",
            "overrides".yellow(),
            previous.value,
            "from".dimmed(),
            previous.source_name
        ));
    }
    Ok(lines.join("\n"))
}
