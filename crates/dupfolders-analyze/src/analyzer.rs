//! End-to-end folder analysis: build, filter, compact.

use serde::Serialize;
use tracing::info;

use dupfolders_core::{AnalyzerConfig, DuplicateRecord, FolderGroup};

use crate::builder::GroupBuilder;
use crate::merger::NestedMerger;

/// Results from folder analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Folder groups, sorted by shared size descending.
    pub groups: Vec<FolderGroup>,

    /// Number of duplicate records analyzed.
    pub records_analyzed: usize,

    /// Number of groups that passed the size threshold before compaction.
    pub groups_before_compaction: usize,

    /// Shared size summed over the reported groups.
    pub total_shared_size: u64,

    /// Wasted space summed over the reported groups.
    pub total_wasted_space: u64,
}

impl AnalysisReport {
    /// Check if any folder groups were found.
    pub fn has_groups(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Number of reported groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Finds folders that share duplicate content.
///
/// Runs [`GroupBuilder`] with the configured threshold, then optionally
/// [`NestedMerger`]. The threshold is applied before merging, so a group
/// below it is dropped even when its folders nest into a larger group.
#[derive(Debug, Clone)]
pub struct FolderAnalyzer {
    config: AnalyzerConfig,
    builder: GroupBuilder,
    merger: NestedMerger,
}

impl FolderAnalyzer {
    /// Create an analyzer with default config.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create an analyzer with custom config.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            builder: GroupBuilder::new(config.min_group_size),
            merger: NestedMerger::new(),
            config,
        }
    }

    /// Analyzer configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Build folder groups that meet the size threshold.
    pub fn analyze_folder_groups(&self, records: Vec<DuplicateRecord>) -> Vec<FolderGroup> {
        self.builder.build(records)
    }

    /// Merge groups whose folders are nested in one another.
    pub fn compact_nested_folders(&self, groups: Vec<FolderGroup>) -> Vec<FolderGroup> {
        self.merger.merge(groups)
    }

    /// Run the full analysis.
    pub fn analyze(&self, records: Vec<DuplicateRecord>) -> AnalysisReport {
        let records_analyzed = records.len();

        let groups = self.analyze_folder_groups(records);
        let groups_before_compaction = groups.len();

        let mut groups = if self.config.compact_nested {
            self.compact_nested_folders(groups)
        } else {
            groups
        };

        if self.config.max_groups > 0 {
            groups.truncate(self.config.max_groups);
        }

        let total_shared_size: u64 = groups.iter().map(FolderGroup::total_shared_size).sum();
        let total_wasted_space: u64 = groups.iter().map(FolderGroup::wasted_space).sum();

        info!(
            records = records_analyzed,
            groups = groups.len(),
            total_shared_size,
            total_wasted_space,
            "folder analysis complete"
        );

        AnalysisReport {
            groups,
            records_analyzed,
            groups_before_compaction,
            total_shared_size,
            total_wasted_space,
        }
    }
}

impl Default for FolderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
