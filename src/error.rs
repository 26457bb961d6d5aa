//! Error types for the record codecs.
//!
//! Encoding, decoding and shape failures are typed with `thiserror` so callers
//! can match on them; the file layer in [`crate::store`] wraps these in
//! `anyhow` with the offending path attached.

use std::{fmt, io};

use thiserror::Error;

use crate::record::ScalarKind;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A record type whose field table cannot be used as declared.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Duplicate serialization key '{key}'")]
    DuplicateKey { key: String },

    #[error("Row type declares {expected} column(s) but produced {found} cell(s)")]
    ColumnMismatch { expected: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Cannot encode field '{key}' of kind {kind}: {reason}")]
    Unsupported {
        key: String,
        kind: ScalarKind,
        reason: &'static str,
    },

    #[error("Writing encoded output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Row {row}: expected {expected} field(s) but found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Row {row} column '{column}': failed to parse '{value}' as {kind}: {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        kind: &'static str,
        value: String,
        reason: String,
    },

    #[error("Column '{column}' does not accept a {found} cell")]
    KindMismatch {
        column: &'static str,
        found: &'static str,
    },

    #[error("Column index {index} is outside the {columns} declared column(s)")]
    NoSuchColumn { index: usize, columns: usize },
}

/// Every field-level problem found while validating one record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    problems: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, problem: impl Into<String>) {
        self.problems.push(problem.into());
    }

    /// Folds another record's problems in, prefixing each with `context`.
    pub fn extend_with(&mut self, context: &str, other: ValidationErrors) {
        self.problems.extend(
            other
                .problems
                .into_iter()
                .map(|problem| format!("{context}: {problem}")),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn problems(&self) -> &[String] {
        &self.problems
    }

    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.problems.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_names_row_and_counts() {
        let err = DecodeError::ColumnCount {
            row: 3,
            expected: 5,
            found: 4,
        };
        assert_eq!(err.to_string(), "Row 3: expected 5 field(s) but found 4");
    }

    #[test]
    fn validation_errors_join_every_problem() {
        let mut inner = ValidationErrors::new();
        inner.push("missing model");
        let mut errors = ValidationErrors::new();
        errors.push("missing tag");
        errors.extend_with("equipment 'a'", inner);

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "missing tag; equipment 'a': missing model"
        );
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn umbrella_error_is_transparent_for_decode() {
        let err: Error = DecodeError::KindMismatch {
            column: "start",
            found: "text",
        }
        .into();
        assert_eq!(err.to_string(), "Column 'start' does not accept a text cell");
    }
}
