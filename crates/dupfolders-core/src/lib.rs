//! Core types for dupfolders.
//!
//! This crate provides the data structures shared by the report reader and
//! the folder analysis: duplicate records, folder groups, configuration and
//! the ingestion error type.

mod config;
mod error;
mod group;
mod record;

pub use config::{
    AnalyzerConfig, AnalyzerConfigBuilder, DEFAULT_MIN_GROUP_SIZE, DEFAULT_VOLUME_ROOT,
    EXPECTED_HEADER, ReportConfig, ReportConfigBuilder,
};
pub use error::ReportError;
pub use group::{FolderGroup, FolderSet, SharedFiles};
pub use record::DuplicateRecord;
