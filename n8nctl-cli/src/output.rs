//! Shared terminal output helpers

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Format an optional timestamp for table/detail output
pub fn format_time(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

/// Pretty-print any serializable value as JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
