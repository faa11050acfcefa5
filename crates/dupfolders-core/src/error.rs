//! Error types for reading duplicate reports.

use std::path::PathBuf;

use compact_str::CompactString;
use thiserror::Error;

/// Errors that can occur while reading a duplicate report.
///
/// Row-level variants carry the 1-based line number of the offending row.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Report file does not exist.
    #[error("Report file not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header row does not match the expected columns.
    #[error("Invalid report header: expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Row could not be parsed or has the wrong number of fields.
    #[error("Malformed row at line {line}: {message}")]
    MalformedRow { line: u64, message: String },

    /// Size column is not a non-negative integer.
    #[error("Invalid size value at line {line}: {value:?}")]
    InvalidSize { line: u64, value: String },

    /// A required field is empty.
    #[error("Empty {field} at line {line}")]
    EmptyField { line: u64, field: &'static str },

    /// Path does not follow the `<root>/<folder>/...` convention.
    #[error("Invalid path format: {path} (expected {root}/<folder>/...)")]
    PathPattern { path: String, root: String },

    /// Invalid reader configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Records of one duplicate group disagree on size.
    #[error("Size mismatch in group {group_id} at line {line}: expected {expected}, found {found}")]
    SizeMismatch {
        line: u64,
        group_id: CompactString,
        expected: u64,
        found: u64,
    },
}

impl ReportError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a malformed row error.
    pub fn malformed(line: u64, message: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            message: message.into(),
        }
    }

    /// Line number of the offending row, if the error is row-level.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MalformedRow { line, .. }
            | Self::InvalidSize { line, .. }
            | Self::EmptyField { line, .. }
            | Self::SizeMismatch { line, .. } => Some(*line),
            _ => None,
        }
    }
}
