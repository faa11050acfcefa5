//! Parsing of individual report rows.

use csv::{ReaderBuilder, StringRecord};

use dupfolders_core::{EXPECTED_HEADER, ReportError};

/// A validated report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Duplicate group identifier.
    pub group_id: String,
    /// Shared folder column.
    pub folder: String,
    /// Full file path.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
    /// Modification time as written in the report (may be empty).
    pub modified: String,
}

impl ParsedLine {
    /// Validate a CSV record read at `line`.
    pub fn from_record(record: &StringRecord, line: u64) -> Result<Self, ReportError> {
        if record.len() != EXPECTED_HEADER.len() {
            return Err(ReportError::malformed(
                line,
                format!("expected {} fields, got {}", EXPECTED_HEADER.len(), record.len()),
            ));
        }

        let field = |idx: usize, name: &'static str| -> Result<String, ReportError> {
            let value = &record[idx];
            if value.is_empty() {
                return Err(ReportError::EmptyField { line, field: name });
            }
            Ok(value.to_string())
        };

        let group_id = field(0, "group")?;
        let folder = field(1, "folder")?;
        let path = field(2, "path")?;

        let size_str = &record[3];
        let size = size_str
            .trim()
            .parse::<u64>()
            .map_err(|_| ReportError::InvalidSize {
                line,
                value: size_str.to_string(),
            })?;

        Ok(Self {
            group_id,
            folder,
            path,
            size,
            modified: record[4].to_string(),
        })
    }
}

/// Parse a single raw report line.
///
/// Handles quoted fields with embedded commas and UTF-8 content. Unlike
/// rows read by the report reader, a single line must carry a modification
/// time. Errors report line 1.
pub fn parse_csv_line(line: &str) -> Result<ParsedLine, ReportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.trim().as_bytes());

    let mut record = StringRecord::new();
    let parsed = match reader.read_record(&mut record) {
        Ok(true) => ParsedLine::from_record(&record, 1)?,
        Ok(false) => return Err(ReportError::malformed(1, "empty line")),
        Err(e) => return Err(ReportError::malformed(1, e.to_string())),
    };

    if parsed.modified.is_empty() {
        return Err(ReportError::EmptyField {
            line: 1,
            field: "modified",
        });
    }
    Ok(parsed)
}
