//! Summary statistics for a loaded report.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use dupfolders_core::DuplicateRecord;

/// Counts describing a loaded duplicate report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of file copies.
    pub records: usize,
    /// Number of distinct duplicate groups.
    pub clusters: usize,
    /// Number of distinct shared folders.
    pub folders: usize,
    /// Sum of all copy sizes in bytes.
    pub total_bytes: u64,
}

/// Summarize a set of records.
pub fn summarize(records: &[DuplicateRecord]) -> ReportSummary {
    let clusters: HashSet<&str> = records.iter().map(|r| r.group_id.as_str()).collect();
    let folders: HashSet<&str> = records.iter().map(|r| r.folder.as_str()).collect();

    ReportSummary {
        records: records.len(),
        clusters: clusters.len(),
        folders: folders.len(),
        total_bytes: records.iter().map(|r| r.size).sum(),
    }
}
