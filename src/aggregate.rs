//! Pure transformations applied to catalog results before rendering.

use std::collections::BTreeMap;

use crate::types::{BranchGroup, MediaRecord};

/// Keeps the records that can be borrowed right now, in their original order.
pub fn filter_available(media: Vec<MediaRecord>) -> Vec<MediaRecord> {
    media.into_iter().filter(|m| m.is_available).collect()
}

/// Partitions records by branch.
///
/// Records are first collected into a map keyed by branch name and the map is
/// then flattened into groups. Every branch shows up in exactly one group and
/// each group keeps the catalog order of its records. Callers must not rely on
/// the order of the groups themselves.
pub fn group_by_branch(media: Vec<MediaRecord>) -> Vec<BranchGroup> {
    let by_branch = collect_by_branch(media);
    flatten_groups(by_branch)
}

fn collect_by_branch(media: Vec<MediaRecord>) -> BTreeMap<String, Vec<MediaRecord>> {
    let mut by_branch: BTreeMap<String, Vec<MediaRecord>> = BTreeMap::new();
    for record in media {
        by_branch
            .entry(record.branch.clone())
            .or_default()
            .push(record);
    }
    by_branch
}

fn flatten_groups(by_branch: BTreeMap<String, Vec<MediaRecord>>) -> Vec<BranchGroup> {
    by_branch
        .into_iter()
        .map(|(branch, media)| BranchGroup { branch, media })
        .collect()
}

/// Total number of records across all groups
pub fn item_count(groups: &[BranchGroup]) -> usize {
    groups.iter().map(|g| g.media.len()).sum()
}
