//! Folder groups: folders entangled by shared duplicate content.

use compact_str::CompactString;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::record::DuplicateRecord;

/// Set of folder names. Iteration follows insertion order.
pub type FolderSet = IndexSet<CompactString>;

/// Duplicate clusters keyed by group id.
pub type SharedFiles = IndexMap<CompactString, Vec<DuplicateRecord>>;

/// A set of folders linked by one or more duplicate clusters.
///
/// `total_shared_size` counts each cluster once, `wasted_space` counts every
/// copy beyond the first. Both are derived from `shared_files` on
/// construction and only change through [`FolderGroup::absorb`].
#[derive(Debug, Clone, Serialize)]
pub struct FolderGroup {
    folders: FolderSet,
    shared_files: SharedFiles,
    total_shared_size: u64,
    wasted_space: u64,
}

impl FolderGroup {
    /// Create a group and compute its metrics from the clusters it holds.
    pub fn from_clusters(folders: FolderSet, shared_files: SharedFiles) -> Self {
        let (total_shared_size, wasted_space) = cluster_metrics(&shared_files);
        Self {
            folders,
            shared_files,
            total_shared_size,
            wasted_space,
        }
    }

    /// Folders in this group.
    pub fn folders(&self) -> &FolderSet {
        &self.folders
    }

    /// Folder names in lexical order, for display.
    pub fn sorted_folders(&self) -> Vec<&str> {
        let mut folders: Vec<&str> = self.folders.iter().map(CompactString::as_str).collect();
        folders.sort_unstable();
        folders
    }

    /// Check whether `folder` is one of this group's folders.
    pub fn contains_folder(&self, folder: &str) -> bool {
        self.folders.contains(folder)
    }

    /// Duplicate clusters shared by the folders of this group.
    pub fn shared_files(&self) -> &SharedFiles {
        &self.shared_files
    }

    /// Bytes of distinct content shared between the folders.
    pub fn total_shared_size(&self) -> u64 {
        self.total_shared_size
    }

    /// Bytes recoverable by keeping a single copy of every cluster.
    pub fn wasted_space(&self) -> u64 {
        self.wasted_space
    }

    /// Number of duplicate clusters in this group.
    pub fn cluster_count(&self) -> usize {
        self.shared_files.len()
    }

    /// Number of file copies across all clusters.
    pub fn file_count(&self) -> usize {
        self.shared_files.values().map(Vec::len).sum()
    }

    /// Merge `other` into this group.
    ///
    /// Folder sets are unioned with this group's folders first. Records of a
    /// cluster present in both groups are appended to the existing list. The
    /// metrics are summed rather than recomputed.
    pub fn absorb(&mut self, other: FolderGroup) {
        self.folders.extend(other.folders);
        for (group_id, records) in other.shared_files {
            self.shared_files.entry(group_id).or_default().extend(records);
        }
        self.total_shared_size = self.total_shared_size.saturating_add(other.total_shared_size);
        self.wasted_space = self.wasted_space.saturating_add(other.wasted_space);
    }
}

/// Compute `(total_shared_size, wasted_space)` for a set of clusters.
fn cluster_metrics(shared_files: &SharedFiles) -> (u64, u64) {
    shared_files
        .values()
        .filter_map(|records| records.first().map(|first| (first.size, records.len() as u64)))
        .fold((0, 0), |(total, wasted), (size, copies)| {
            (
                total.saturating_add(size),
                wasted.saturating_add(size.saturating_mul(copies - 1)),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(id: &str, size: u64, folders: &[&str]) -> (CompactString, Vec<DuplicateRecord>) {
        let records = folders
            .iter()
            .map(|folder| {
                DuplicateRecord::new(id, *folder, format!("/volume1/{folder}/{id}.bin"), size)
            })
            .collect();
        (id.into(), records)
    }

    fn folder_set(folders: &[&str]) -> FolderSet {
        folders.iter().map(|f| CompactString::from(*f)).collect()
    }

    #[test]
    fn test_metrics_from_clusters() {
        let shared: SharedFiles = [
            cluster("1", 1000, &["photos", "backup"]),
            cluster("2", 2000, &["photos", "backup", "backup"]),
        ]
        .into_iter()
        .collect();

        let group = FolderGroup::from_clusters(folder_set(&["photos", "backup"]), shared);

        assert_eq!(group.total_shared_size(), 3000);
        assert_eq!(group.wasted_space(), 1000 + 2 * 2000);
        assert_eq!(group.cluster_count(), 2);
        assert_eq!(group.file_count(), 5);
    }

    #[test]
    fn test_empty_cluster_contributes_nothing() {
        let mut shared = SharedFiles::new();
        shared.insert("1".into(), Vec::new());

        let group = FolderGroup::from_clusters(folder_set(&["a", "b"]), shared);
        assert_eq!(group.total_shared_size(), 0);
        assert_eq!(group.wasted_space(), 0);
    }

    #[test]
    fn test_absorb_unions_and_sums() {
        let mut target = FolderGroup::from_clusters(
            folder_set(&["photos", "backup"]),
            [cluster("1", 1000, &["photos", "backup"])].into_iter().collect(),
        );
        let other = FolderGroup::from_clusters(
            folder_set(&["backup", "photos/vacation"]),
            [
                cluster("1", 1000, &["photos/vacation"]),
                cluster("2", 500, &["backup", "photos/vacation"]),
            ]
            .into_iter()
            .collect(),
        );
        let other_total = other.total_shared_size();
        let other_wasted = other.wasted_space();

        target.absorb(other);

        let folders: Vec<&str> = target.folders().iter().map(|f| f.as_str()).collect();
        assert_eq!(folders, vec!["photos", "backup", "photos/vacation"]);
        assert_eq!(target.shared_files()["1"].len(), 3);
        assert_eq!(target.shared_files()["2"].len(), 2);
        assert_eq!(target.total_shared_size(), 1000 + other_total);
        assert_eq!(target.wasted_space(), 1000 + other_wasted);
    }

    #[test]
    fn test_sorted_folders() {
        let group = FolderGroup::from_clusters(
            folder_set(&["photos", "backup", "archive"]),
            [cluster("1", 10, &["photos", "backup", "archive"])].into_iter().collect(),
        );
        assert_eq!(group.sorted_folders(), vec!["archive", "backup", "photos"]);
        assert!(group.contains_folder("backup"));
        assert!(!group.contains_folder("music"));
    }

    #[test]
    fn test_metrics_saturate() {
        let big = FolderGroup::from_clusters(
            folder_set(&["a", "b", "c"]),
            [cluster("1", u64::MAX, &["a", "b", "c"])].into_iter().collect(),
        );
        assert_eq!(big.total_shared_size(), u64::MAX);
        assert_eq!(big.wasted_space(), u64::MAX);

        let mut target = big.clone();
        target.absorb(big);
        assert_eq!(target.total_shared_size(), u64::MAX);
        assert_eq!(target.wasted_space(), u64::MAX);
    }
}
