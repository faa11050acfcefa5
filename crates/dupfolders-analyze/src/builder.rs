//! Folder group construction from duplicate clusters.
//!
//! Works in three steps:
//! 1. Partition records by duplicate group id
//! 2. Key every cluster spanning two or more folders by its exact folder set
//! 3. Turn each folder set into a [`FolderGroup`], drop the ones below the
//!    size threshold and sort the rest by shared size

use std::collections::BTreeSet;

use compact_str::CompactString;
use indexmap::IndexMap;
use tracing::debug;

use dupfolders_core::{
    DEFAULT_MIN_GROUP_SIZE, DuplicateRecord, FolderGroup, FolderSet, SharedFiles,
};

/// Builds folder groups from duplicate records.
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    min_group_size: u64,
}

impl GroupBuilder {
    /// Create a builder that keeps groups sharing at least `min_group_size` bytes.
    pub fn new(min_group_size: u64) -> Self {
        Self { min_group_size }
    }

    /// Minimum shared size a group needs to be kept.
    pub fn min_group_size(&self) -> u64 {
        self.min_group_size
    }

    /// Build folder groups, sorted by shared size descending.
    ///
    /// Clusters whose copies all live in one folder are ignored. Groups with
    /// equal shared size keep the order in which their folder sets were
    /// first seen.
    pub fn build(&self, records: impl IntoIterator<Item = DuplicateRecord>) -> Vec<FolderGroup> {
        let clusters = partition_by_group_id(records);
        let cluster_count = clusters.len();

        let mut by_folders: IndexMap<BTreeSet<CompactString>, (FolderSet, SharedFiles)> =
            IndexMap::new();

        for (group_id, cluster) in clusters {
            let folders: FolderSet = cluster.iter().map(|r| r.folder.clone()).collect();
            if folders.len() < 2 {
                continue;
            }

            let key: BTreeSet<CompactString> = folders.iter().cloned().collect();
            let (_, shared) = by_folders
                .entry(key)
                .or_insert_with(|| (folders, SharedFiles::new()));
            shared.entry(group_id).or_default().extend(cluster);
        }

        let candidates = by_folders.len();
        let mut groups: Vec<FolderGroup> = by_folders
            .into_values()
            .map(|(folders, shared)| FolderGroup::from_clusters(folders, shared))
            .filter(|group| group.total_shared_size() >= self.min_group_size)
            .collect();

        sort_by_shared_size(&mut groups);

        debug!(
            clusters = cluster_count,
            candidates,
            kept = groups.len(),
            min_group_size = self.min_group_size,
            "built folder groups"
        );

        groups
    }
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_GROUP_SIZE)
    }
}

/// Sort groups by shared size descending, keeping the order of ties.
pub fn sort_by_shared_size(groups: &mut [FolderGroup]) {
    groups.sort_by(|a, b| b.total_shared_size().cmp(&a.total_shared_size()));
}

/// Group records by duplicate group id, in order of first appearance.
fn partition_by_group_id(
    records: impl IntoIterator<Item = DuplicateRecord>,
) -> IndexMap<CompactString, Vec<DuplicateRecord>> {
    let mut clusters: IndexMap<CompactString, Vec<DuplicateRecord>> = IndexMap::new();
    for record in records {
        clusters.entry(record.group_id.clone()).or_default().push(record);
    }
    clusters
}
