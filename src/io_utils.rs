//! I/O utilities for reading and writing metadata files.
//!
//! - **Delimiter resolution**: extension-based detection (`.tsv` → tab,
//!   anything else → comma) with manual override support.
//! - **Reader/writer construction**: CSV readers accept ragged rows so that
//!   width checking happens in the tabular decoder, which reports the row;
//!   writers quote only where needed and end records with `\n`.
//! - **Whole-file text**: `read_to_string` / `write_string` with the path
//!   attached to any error.

use std::{
    fs::{self, File},
    io::{Read, Write},
    path::Path,
};

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn resolve_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_writer<W>(writer: W, delimiter: u8) -> csv::Writer<W>
where
    W: Write,
{
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true)
        .terminator(Terminator::Any(b'\n'));
    builder.from_writer(writer)
}

pub fn read_to_string(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    let mut buf = String::new();
    file.read_to_string(&mut buf)
        .with_context(|| format!("Reading input file {path:?}"))?;
    Ok(buf)
}

/// Replaces the file at `path` with `contents`, creating parent directories.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Creating directory {parent:?}"))?;
    }
    let mut file = File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Writing output file {path:?}"))?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_follows_extension_unless_overridden() {
        assert_eq!(resolve_delimiter(Path::new("radios.tsv"), None), b'\t');
        assert_eq!(resolve_delimiter(Path::new("radios.TSV"), None), b'\t');
        assert_eq!(resolve_delimiter(Path::new("radios.csv"), None), b',');
        assert_eq!(resolve_delimiter(Path::new("radios"), None), b',');
        assert_eq!(resolve_delimiter(Path::new("radios.tsv"), Some(b';')), b';');
    }

    #[test]
    fn reader_tolerates_ragged_rows() {
        let mut reader = open_csv_reader("a,b\nc\n".as_bytes(), b',');
        let lengths = reader
            .records()
            .map(|record| record.expect("record").len())
            .collect::<Vec<_>>();
        assert_eq!(lengths, vec![2, 1]);
    }

    #[test]
    fn write_string_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("deeper").join("file.toml");
        write_string(&path, "name = \"x\"\n").expect("write");
        assert_eq!(read_to_string(&path).unwrap(), "name = \"x\"\n");
    }
}
