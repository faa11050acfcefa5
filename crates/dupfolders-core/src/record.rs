//! Duplicate file records as listed in a duplicate report.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One copy of a duplicated file.
///
/// Records sharing a `group_id` describe the same content stored at
/// different paths. The report reader guarantees that all records of a
/// group carry the same `size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRecord {
    /// Identifier of the duplicate cluster this copy belongs to.
    pub group_id: CompactString,

    /// Top-level shared folder holding this copy.
    pub folder: CompactString,

    /// Full path of this copy.
    pub path: String,

    /// Size of the file in bytes.
    pub size: u64,
}

impl DuplicateRecord {
    /// Create a new duplicate record.
    pub fn new(
        group_id: impl Into<CompactString>,
        folder: impl Into<CompactString>,
        path: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            folder: folder.into(),
            path: path.into(),
            size,
        }
    }
}
