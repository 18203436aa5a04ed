// crates/circledb-core/src/select.rs

//! # Selection Resolver
//!
//! Expands one picked record to every record sharing its
//! `(thana_no, circle_name)` key, and the exact-number filter used by the
//! thana channel.

use crate::group::group_records;
use crate::model::{GroupedResult, RecordStore, VillageRecord};

/// Every record of `store` that is a sibling of `selected`, in store order.
///
/// `selected` itself does not have to come from `store`: only its key fields
/// are compared.
pub fn siblings<'a>(store: &'a RecordStore, selected: &VillageRecord) -> Vec<&'a VillageRecord> {
    store.iter().filter(|r| r.is_sibling_of(selected)).collect()
}

/// Records whose `thana_no` equals `thana_no` exactly, in store order.
///
/// No trimming or numeric comparison happens here: `"012"` does not match
/// `"12"`.
pub fn records_with_thana<'a>(store: &'a RecordStore, thana_no: &str) -> Vec<&'a VillageRecord> {
    store.iter().filter(|r| r.thana_no == thana_no).collect()
}

/// The grouped view of an explicit selection; at most one group.
///
/// ```rust
/// use circledb_core::{resolve_selection, RecordStore, VillageRecord};
///
/// let store = RecordStore::new(vec![
///     VillageRecord::new("A", "5", "X"),
///     VillageRecord::new("B", "5", "X"),
///     VillageRecord::new("C", "5", "Y"),
/// ]);
/// let groups = resolve_selection(&store, &store.records()[0]);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].villages, vec!["A", "B"]);
/// ```
pub fn resolve_selection(store: &RecordStore, selected: &VillageRecord) -> Vec<GroupedResult> {
    group_records(siblings(store, selected))
}
