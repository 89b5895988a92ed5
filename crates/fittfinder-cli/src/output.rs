//! Terminal rendering for command results; logs go to stderr separately.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Confirmation line for a completed mutation.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// `label: value` line with a dimmed label.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Single-line JSON, suitable for piping into other tools.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Indented JSON for reading.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
