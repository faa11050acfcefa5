//! Duplicate report ingestion for dupfolders.
//!
//! Reads the CSV duplicate report produced by a NAS storage analyzer and
//! turns it into validated [`DuplicateRecord`]s for analysis.
//!
//! # Report format
//!
//! ```text
//! Group,Shared Folder,File,Size(Byte),Modified Time
//! 1,photos,/volume1/photos/vacation/img1.jpg,1000,2024/01/01 12:00:00
//! 1,backup,/volume1/backup/pictures/img1.jpg,1000,2024/01/01 12:00:00
//! ```
//!
//! Every row is checked before it reaches the analysis: five columns,
//! non-empty group, folder and path, an integer size, a path under the
//! configured volume root, and one size per duplicate group.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dupfolders_report::{ReportReader, summarize};
//!
//! let reader = ReportReader::new().unwrap();
//! let records = reader.read(Path::new("duplicates.csv")).unwrap();
//!
//! let summary = summarize(&records);
//! println!("{} copies in {} groups", summary.records, summary.clusters);
//! ```

mod folder;
mod line;
mod reader;
mod summary;

pub use folder::{FolderExtractor, extract_folder_name};
pub use line::{ParsedLine, parse_csv_line};
pub use reader::ReportReader;
pub use summary::{ReportSummary, summarize};

// Re-export core types for convenience
pub use dupfolders_core::{DuplicateRecord, EXPECTED_HEADER, ReportConfig, ReportError};
