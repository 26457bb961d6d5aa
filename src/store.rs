//! File layer: loading and storing tables and structured records on disk.
//!
//! Failures carry the offending path as `anyhow` context; the typed codec
//! error remains available through `downcast_ref::<crate::Error>()`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::{
    encoder,
    error::Error,
    io_utils,
    record::Record,
    table::{self, Tabular},
};

/// Reads one CSV or TSV file and appends its records to `target`.
pub fn load_table<T: Tabular>(path: &Path, target: &mut Vec<T>) -> Result<usize> {
    let delimiter = io_utils::resolve_delimiter(path, None);
    let text = io_utils::read_to_string(path)?;
    let rows = table::read_rows(text.as_bytes(), delimiter)
        .map_err(Error::from)
        .with_context(|| format!("Parsing rows from {path:?}"))?;
    let added = table::decode_rows(&rows, target)
        .map_err(Error::from)
        .with_context(|| format!("Decoding records from {path:?}"))?;
    debug!("Loaded {added} record(s) from {path:?}");
    Ok(added)
}

/// Accumulates every file named `file_name` below `dir`, in path order.
///
/// Stops at the first file that fails; records from files already read stay in
/// `target`, the failing file contributes nothing.
pub fn load_tables<T: Tabular>(dir: &Path, file_name: &str, target: &mut Vec<T>) -> Result<usize> {
    let mut total = 0;
    let paths = matching_files(dir, file_name)?;
    for path in &paths {
        total += load_table(path, target)?;
    }
    info!(
        "Loaded {total} record(s) from {} '{file_name}' file(s) under {dir:?}",
        paths.len()
    );
    Ok(total)
}

pub fn table_string<T: Tabular>(records: &[T]) -> Result<String> {
    Ok(table::to_csv_string(records)?)
}

/// Writes `records` as a table, replacing any existing file.
pub fn store_table<T: Tabular>(path: &Path, records: &[T]) -> Result<()> {
    let delimiter = io_utils::resolve_delimiter(path, None);
    let rows = table::encode_rows(records)
        .map_err(Error::from)
        .with_context(|| format!("Encoding records for {path:?}"))?;
    let mut buffer = Vec::new();
    table::write_rows(&mut buffer, &rows, delimiter)
        .map_err(Error::from)
        .with_context(|| format!("Formatting rows for {path:?}"))?;
    let text = String::from_utf8(buffer).with_context(|| format!("Formatting rows for {path:?}"))?;
    io_utils::write_string(path, &text)?;
    debug!("Stored {} record(s) to {path:?}", records.len());
    Ok(())
}

pub fn load_record<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = io_utils::read_to_string(path)?;
    let record = toml::from_str(&text)
        .map_err(Error::from)
        .with_context(|| format!("Decoding structured file {path:?}"))?;
    debug!("Loaded record from {path:?}");
    Ok(record)
}

/// Decodes every file named `file_name` below `dir`, in path order.
pub fn load_records<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Result<Vec<T>> {
    let records = matching_files(dir, file_name)?
        .iter()
        .map(|path| load_record(path))
        .collect::<Result<Vec<T>>>()?;
    info!(
        "Loaded {} '{file_name}' record(s) under {dir:?}",
        records.len()
    );
    Ok(records)
}

/// Writes the structured encoding of `record`, replacing any existing file.
pub fn store_record(path: &Path, record: &dyn Record) -> Result<()> {
    let text = encoder::encode_string(record)
        .with_context(|| format!("Encoding record for {path:?}"))?;
    io_utils::write_string(path, &text)?;
    debug!("Stored record to {path:?}");
    Ok(())
}

fn matching_files(dir: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Walking directory {dir:?}"))?;
        if entry.file_type().is_file() && entry.file_name() == file_name {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}
