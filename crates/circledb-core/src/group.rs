// crates/circledb-core/src/group.rs

//! # Result Grouper
//!
//! Collapses a ranked or filtered run of records into one entry per
//! `(thana_no, circle_name)` key.

use crate::model::{GroupKey, GroupedResult, VillageRecord};
use crate::text::thana_sort_key;
use std::collections::HashMap;

/// Groups `records` by `(thana_no, circle_name)`.
///
/// - Groups are created in first-seen order, each with the village names of
///   its records in first-seen order and without duplicates.
/// - The output is then stably sorted by [`thana_sort_key`]: groups whose
///   numbers do not parse all share the key `0` and keep their relative order.
///
/// The result depends only on the input sequence.
///
/// # Examples
/// ```rust
/// use circledb_core::{group_records, VillageRecord};
///
/// let rows = vec![
///     VillageRecord::new("B", "20", "X"),
///     VillageRecord::new("A", "5", "X"),
///     VillageRecord::new("A", "5", "X"),
/// ];
/// let groups = group_records(&rows);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].thana_no, "5");
/// assert_eq!(groups[0].villages, vec!["A".to_string()]);
/// ```
pub fn group_records<'a, I>(records: I) -> Vec<GroupedResult>
where
    I: IntoIterator<Item = &'a VillageRecord>,
{
    let mut groups: Vec<GroupedResult> = Vec::new();
    let mut slots: HashMap<GroupKey<'a>, usize> = HashMap::new();

    for record in records {
        let slot = *slots.entry(record.group_key()).or_insert_with(|| {
            groups.push(GroupedResult::keyed_by(record));
            groups.len() - 1
        });
        let villages = &mut groups[slot].villages;
        if !villages.iter().any(|v| *v == record.village_name) {
            villages.push(record.village_name.clone());
        }
    }

    // `sort_by_key` is stable.
    groups.sort_by_key(|g| thana_sort_key(&g.thana_no));
    groups
}

/// Total number of village names across `groups`.
pub fn total_villages(groups: &[GroupedResult]) -> usize {
    groups.iter().map(|g| g.villages.len()).sum()
}
