//! Tabular (CSV) coder for flat row types.
//!
//! A [`Tabular`] type declares its columns once in a static table and exposes
//! a positional accessor ([`Tabular::cells`]) and setter
//! ([`Tabular::set_cell`]). Encoding produces a header row followed by one row
//! per record; decoding skips the header and appends to a caller-owned vector,
//! so several files can be accumulated into the same target.

use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use heck::ToUpperCamelCase;

use crate::{
    data::{format_date_time, parse_date_time},
    error::{DecodeError, Error, Result, ShapeError},
    io_utils,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Text,
    Int32,
    Float32,
    Float64,
    Timestamp,
}

impl CellKind {
    pub fn name(self) -> &'static str {
        match self {
            CellKind::Text => "text",
            CellKind::Int32 => "32-bit integer",
            CellKind::Float32 => "32-bit float",
            CellKind::Float64 => "64-bit float",
            CellKind::Timestamp => "timestamp",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int32(i32),
    Float32(f32),
    Float64(f64),
    Timestamp(DateTime<Utc>),
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Text(_) => CellKind::Text,
            Cell::Int32(_) => CellKind::Int32,
            Cell::Float32(_) => CellKind::Float32,
            Cell::Float64(_) => CellKind::Float64,
            Cell::Timestamp(_) => CellKind::Timestamp,
        }
    }

    /// Text written to the CSV field. Floats use the shortest form that reads
    /// back to the same value.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Int32(number) => number.to_string(),
            Cell::Float32(number) => number.to_string(),
            Cell::Float64(number) => number.to_string(),
            Cell::Timestamp(stamp) => format_date_time(stamp),
        }
    }

    pub fn parse(kind: CellKind, text: &str) -> std::result::Result<Cell, String> {
        let cell = match kind {
            CellKind::Text => Cell::Text(text.to_string()),
            CellKind::Int32 => Cell::Int32(text.parse().map_err(|err| format!("{err}"))?),
            CellKind::Float32 => Cell::Float32(text.parse().map_err(|err| format!("{err}"))?),
            CellKind::Float64 => Cell::Float64(text.parse().map_err(|err| format!("{err}"))?),
            CellKind::Timestamp => {
                Cell::Timestamp(parse_date_time(text).map_err(|err| format!("{err}"))?)
            }
        };
        Ok(cell)
    }

    pub fn into_text(self, column: &'static str) -> std::result::Result<String, DecodeError> {
        match self {
            Cell::Text(text) => Ok(text),
            other => Err(other.mismatch(column)),
        }
    }

    pub fn into_i32(self, column: &'static str) -> std::result::Result<i32, DecodeError> {
        match self {
            Cell::Int32(number) => Ok(number),
            other => Err(other.mismatch(column)),
        }
    }

    pub fn into_f32(self, column: &'static str) -> std::result::Result<f32, DecodeError> {
        match self {
            Cell::Float32(number) => Ok(number),
            other => Err(other.mismatch(column)),
        }
    }

    pub fn into_f64(self, column: &'static str) -> std::result::Result<f64, DecodeError> {
        match self {
            Cell::Float64(number) => Ok(number),
            other => Err(other.mismatch(column)),
        }
    }

    pub fn into_timestamp(
        self,
        column: &'static str,
    ) -> std::result::Result<DateTime<Utc>, DecodeError> {
        match self {
            Cell::Timestamp(stamp) => Ok(stamp),
            other => Err(other.mismatch(column)),
        }
    }

    fn mismatch(&self, column: &'static str) -> DecodeError {
        DecodeError::KindMismatch {
            column,
            found: self.kind().name(),
        }
    }
}

/// Static description of one column of a row type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub label: Option<&'static str>,
    pub kind: CellKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: CellKind) -> Self {
        Self {
            name,
            label: None,
            kind,
        }
    }

    pub const fn labelled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Header text: the label if set, else the field name in upper camel case.
    pub fn header(&self) -> String {
        match self.label.map(str::trim).filter(|label| !label.is_empty()) {
            Some(label) => label.to_string(),
            None => self.name.to_upper_camel_case(),
        }
    }
}

/// A record whose fields are all plain scalars, one per CSV column.
pub trait Tabular: Default {
    fn columns() -> &'static [Column];

    /// Field values in column order.
    fn cells(&self) -> Vec<Cell>;

    fn set_cell(&mut self, index: usize, cell: Cell) -> std::result::Result<(), DecodeError>;
}

pub fn header_row<T: Tabular>() -> Vec<String> {
    T::columns().iter().map(Column::header).collect()
}

/// Header plus one row per record. An empty slice produces no rows at all.
pub fn encode_rows<T: Tabular>(records: &[T]) -> std::result::Result<Vec<Vec<String>>, ShapeError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }
    let expected = T::columns().len();
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(header_row::<T>());
    for record in records {
        let cells = record.cells();
        if cells.len() != expected {
            return Err(ShapeError::ColumnMismatch {
                expected,
                found: cells.len(),
            });
        }
        rows.push(cells.iter().map(Cell::render).collect());
    }
    Ok(rows)
}

/// Decodes every row after the header and appends the records to `target`.
///
/// Fewer than two rows means there is no data and is not an error. On failure
/// nothing is appended. Returns the number of records added.
pub fn decode_rows<T: Tabular>(
    rows: &[Vec<String>],
    target: &mut Vec<T>,
) -> std::result::Result<usize, DecodeError> {
    if rows.len() <= 1 {
        return Ok(0);
    }
    let columns = T::columns();
    let mut decoded = Vec::with_capacity(rows.len() - 1);
    for (idx, row) in rows.iter().enumerate().skip(1) {
        let line = idx + 1;
        if row.len() != columns.len() {
            return Err(DecodeError::ColumnCount {
                row: line,
                expected: columns.len(),
                found: row.len(),
            });
        }
        let mut record = T::default();
        for (position, (column, value)) in columns.iter().zip(row).enumerate() {
            let cell =
                Cell::parse(column.kind, value).map_err(|reason| DecodeError::InvalidValue {
                    row: line,
                    column: column.header(),
                    kind: column.kind.name(),
                    value: value.clone(),
                    reason,
                })?;
            record.set_cell(position, cell)?;
        }
        decoded.push(record);
    }
    let added = decoded.len();
    target.extend(decoded);
    Ok(added)
}

/// Reads every CSV row, header included. Row widths are not checked here.
pub fn read_rows<R: Read>(reader: R, delimiter: u8) -> std::result::Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = io_utils::open_csv_reader(reader, delimiter);
    reader
        .records()
        .map(|record| record.map(|fields| fields.iter().map(str::to_string).collect()))
        .collect()
}

pub fn write_rows<W: Write>(
    writer: W,
    rows: &[Vec<String>],
    delimiter: u8,
) -> std::result::Result<(), csv::Error> {
    let mut writer = io_utils::open_csv_writer(writer, delimiter);
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_string<T: Tabular>(records: &[T]) -> Result<String> {
    let rows = encode_rows(records)?;
    let mut buffer = Vec::new();
    write_rows(&mut buffer, &rows, io_utils::DEFAULT_CSV_DELIMITER)?;
    String::from_utf8(buffer)
        .map_err(|err| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}

pub fn from_csv_str<T: Tabular>(text: &str, target: &mut Vec<T>) -> Result<usize> {
    let rows = read_rows(text.as_bytes(), io_utils::DEFAULT_CSV_DELIMITER)?;
    Ok(decode_rows(&rows, target)?)
}
