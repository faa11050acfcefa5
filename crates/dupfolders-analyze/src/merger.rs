//! Compaction of folder groups whose folders are nested in one another.

use tracing::{debug, trace};

use dupfolders_core::FolderGroup;

use crate::builder::sort_by_shared_size;

/// Merges folder groups that share a folder or a parent/child folder pair.
///
/// Merging is greedy and pairwise: the first pair `(i, j)` with `i < j` that
/// should merge is combined into `i`, `j` is removed and the scan restarts
/// from the front. The loop ends when a full scan finds nothing to merge,
/// so chains of nested folders spread over several groups collapse into one.
#[derive(Debug, Clone, Default)]
pub struct NestedMerger;

impl NestedMerger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self
    }

    /// Merge nested groups, returning them sorted by shared size descending.
    pub fn merge(&self, mut groups: Vec<FolderGroup>) -> Vec<FolderGroup> {
        let initial = groups.len();

        while let Some((i, j)) = find_mergeable_pair(&groups) {
            let absorbed = groups.remove(j);
            trace!(
                target_group = i,
                absorbed_group = j,
                folders = absorbed.folders().len(),
                "merging nested folder groups"
            );
            groups[i].absorb(absorbed);
        }

        sort_by_shared_size(&mut groups);

        debug!(
            before = initial,
            after = groups.len(),
            "compacted nested folder groups"
        );

        groups
    }
}

/// Check whether two folder names are equal or one lies beneath the other.
///
/// `photos` and `photos/vacation` are nested; `photos` and `photos2` are not.
pub fn is_nested_or_equal(a: &str, b: &str) -> bool {
    a == b || is_parent_of(a, b) || is_parent_of(b, a)
}

/// Check whether any folder of one group is nested with any folder of the other.
pub fn should_merge(first: &FolderGroup, second: &FolderGroup) -> bool {
    first.folders().iter().any(|a| {
        second
            .folders()
            .iter()
            .any(|b| is_nested_or_equal(a, b))
    })
}

fn is_parent_of(parent: &str, child: &str) -> bool {
    child
        .strip_prefix(parent)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn find_mergeable_pair(groups: &[FolderGroup]) -> Option<(usize, usize)> {
    (0..groups.len()).find_map(|i| {
        (i + 1..groups.len())
            .find(|&j| should_merge(&groups[i], &groups[j]))
            .map(|j| (i, j))
    })
}
