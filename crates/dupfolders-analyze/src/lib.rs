//! Folder relationship analysis for dupfolders.
//!
//! Given the records of a duplicate report, this crate finds which shared
//! folders hold the same content:
//!
//! - **Grouping** - clusters spanning the same set of folders are combined
//!   into one [`FolderGroup`] with shared and wasted byte totals; groups
//!   below the size threshold are dropped
//! - **Compaction** - groups whose folders are equal or nested
//!   (`photos` / `photos/vacation`) are merged until no pair is left
//!
//! ```rust,ignore
//! use dupfolders_analyze::FolderAnalyzer;
//! use dupfolders_report::ReportReader;
//!
//! let records = ReportReader::new()?.read("duplicates.csv".as_ref())?;
//! let report = FolderAnalyzer::new().analyze(records);
//!
//! for group in &report.groups {
//!     println!("{:?}: {} bytes shared", group.sorted_folders(), group.total_shared_size());
//! }
//! ```

mod analyzer;
mod builder;
mod merger;

pub use analyzer::{AnalysisReport, FolderAnalyzer};
pub use builder::{GroupBuilder, sort_by_shared_size};
pub use merger::{NestedMerger, is_nested_or_equal, should_merge};

// Re-export core types
pub use dupfolders_core::{AnalyzerConfig, DuplicateRecord, FolderGroup, FolderSet, SharedFiles};
