//! Output formatting and persistence for query results.
//!
//! Supports pretty-printing, JSON serialization, and CSV append for both
//! aggregate rows and raw filtered records.

use anyhow::Result;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs rows using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(rows: &[T]) {
    debug!("{:#?}", rows);
}

/// Logs a serializable value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends serializable rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_rows<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = rows.len(), "Appending CSV rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Generates a csv filename with 7 uppercase alphanumeric characters, so
/// each export lands in a unique file.
pub fn random_export_filename() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    let name: String = (0..7)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("{name}.csv")
}
