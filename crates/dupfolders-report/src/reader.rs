//! Duplicate report reader.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use compact_str::CompactString;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use dupfolders_core::{DuplicateRecord, EXPECTED_HEADER, ReportConfig, ReportError};

use crate::folder::FolderExtractor;
use crate::line::ParsedLine;

/// Reads duplicate reports into validated [`DuplicateRecord`]s.
///
/// A report is a CSV file whose first row is [`EXPECTED_HEADER`] followed
/// by one row per file copy.
#[derive(Debug)]
pub struct ReportReader {
    config: ReportConfig,
    extractor: Option<FolderExtractor>,
}

impl ReportReader {
    /// Create a reader with default config.
    pub fn new() -> Result<Self, ReportError> {
        Self::with_config(ReportConfig::default())
    }

    /// Create a reader with custom config.
    pub fn with_config(config: ReportConfig) -> Result<Self, ReportError> {
        let extractor = if config.needs_path_parsing() {
            Some(FolderExtractor::new(config.volume_root.as_str())?)
        } else {
            None
        };
        Ok(Self { config, extractor })
    }

    /// Reader configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Read a report file.
    pub fn read(&self, path: &Path) -> Result<Vec<DuplicateRecord>, ReportError> {
        if !path.exists() {
            return Err(ReportError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
        debug!(path = %path.display(), "reading duplicate report");

        let records = self.read_from(file).map_err(|e| match e {
            ReportError::Io { source, .. } => ReportError::io(path, source),
            other => other,
        })?;

        info!(
            path = %path.display(),
            records = records.len(),
            "loaded duplicate report"
        );
        Ok(records)
    }

    /// Read a report from any byte source.
    ///
    /// Blank rows are skipped.
    pub fn read_from<R: Read>(&self, source: R) -> Result<Vec<DuplicateRecord>, ReportError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source);

        let mut row = StringRecord::new();
        if !read_row(&mut reader, &mut row)? {
            return Err(ReportError::HeaderMismatch {
                expected: expected_header(),
                found: Vec::new(),
            });
        }
        check_header(&row)?;

        let mut records = Vec::new();
        let mut sizes: HashMap<CompactString, u64> = HashMap::new();

        while read_row(&mut reader, &mut row)? {
            let line = row.position().map_or(0, |p| p.line());
            let record = self.to_record(ParsedLine::from_record(&row, line)?)?;

            let expected = *sizes.entry(record.group_id.clone()).or_insert(record.size);
            if expected != record.size {
                return Err(ReportError::SizeMismatch {
                    line,
                    group_id: record.group_id,
                    expected,
                    found: record.size,
                });
            }

            records.push(record);
        }

        debug!(
            records = records.len(),
            clusters = sizes.len(),
            "parsed report rows"
        );
        Ok(records)
    }

    fn to_record(&self, parsed: ParsedLine) -> Result<DuplicateRecord, ReportError> {
        let folder = match &self.extractor {
            Some(extractor) => {
                let derived = extractor.extract(&parsed.path)?;
                if self.config.derive_folder_from_path {
                    CompactString::from(derived)
                } else {
                    CompactString::from(parsed.folder)
                }
            }
            None => CompactString::from(parsed.folder),
        };

        Ok(DuplicateRecord::new(parsed.group_id, folder, parsed.path, parsed.size))
    }
}

fn read_row<R: Read>(
    reader: &mut csv::Reader<R>,
    row: &mut StringRecord,
) -> Result<bool, ReportError> {
    reader.read_record(row).map_err(|e| {
        let line = e.position().map_or(0, |p| p.line());
        match e.into_kind() {
            csv::ErrorKind::Io(source) => ReportError::Io {
                path: Default::default(),
                source,
            },
            kind => ReportError::malformed(line, format!("{kind:?}")),
        }
    })
}

fn expected_header() -> Vec<String> {
    EXPECTED_HEADER.iter().map(|s| s.to_string()).collect()
}

fn check_header(row: &StringRecord) -> Result<(), ReportError> {
    let found: Vec<&str> = row.iter().collect();
    // Tolerate a UTF-8 byte order mark on the first column.
    let matches = found.len() == EXPECTED_HEADER.len()
        && found
            .iter()
            .zip(EXPECTED_HEADER)
            .enumerate()
            .all(|(idx, (got, want))| {
                let got: &str = if idx == 0 { got.trim_start_matches('\u{feff}') } else { *got };
                got == want
            });

    if matches {
        Ok(())
    } else {
        Err(ReportError::HeaderMismatch {
            expected: expected_header(),
            found: found.into_iter().map(str::to_string).collect(),
        })
    }
}
