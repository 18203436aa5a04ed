// crates/circledb-core/src/search.rs

//! # Query Dispatch
//!
//! Turns the live [`QueryState`] into a grouped result list, and feeds the two
//! suggestion dropdowns. Everything here is a pure function of the store, the
//! matcher built over it and the query; nothing fails.
//!
//! Precedence, first match wins:
//! 1. number channel holding only digits: exact thana filter,
//! 2. explicit selection: sibling expansion,
//! 3. name channel long enough: fuzzy search capped at `result_limit`,
//! 4. otherwise nothing.

use crate::group::group_records;
use crate::model::{GroupedResult, RecordStore, VillageRecord};
use crate::query::{classify, QueryKind, QueryState, SearchPolicy};
use crate::select::{records_with_thana, siblings};
use crate::traits::VillageMatcher;
use std::collections::HashSet;

/// Grouped results for `state`.
///
/// A number channel whose text is not all digits gives an empty list rather
/// than falling through to a name search.
pub fn grouped_results<M: VillageMatcher>(
    store: &RecordStore,
    matcher: &M,
    state: &QueryState,
    policy: &SearchPolicy,
) -> Vec<GroupedResult> {
    match state {
        QueryState::Number(raw) if policy.admits_number(raw) => match classify(raw) {
            QueryKind::Number => group_records(records_with_thana(store, raw.trim())),
            QueryKind::Name => Vec::new(),
        },
        QueryState::Selected(record) => group_records(siblings(store, record)),
        QueryState::Name(raw) if policy.admits_name(raw) => {
            group_records(matcher.ranked(raw, policy.result_limit))
        }
        _ => Vec::new(),
    }
}

/// Best fuzzy matches for the village-name box, at most `suggestion_limit`.
///
/// Queries shorter than `name_min_chars` never reach the matcher.
pub fn village_suggestions<'a, M: VillageMatcher>(
    matcher: &'a M,
    query: &str,
    policy: &SearchPolicy,
) -> Vec<&'a VillageRecord> {
    if !policy.admits_name(query) {
        return Vec::new();
    }
    matcher.ranked(query, policy.suggestion_limit)
}

/// One record per distinct thana number starting with the trimmed `query`.
///
/// The first record seen for a number represents it; store order is kept and
/// the list is cut at `suggestion_limit`. The length gate looks at the raw
/// input, so a lone space passes the gate and then prefixes every number.
///
/// ```rust
/// use circledb_core::search::thana_suggestions;
/// use circledb_core::{RecordStore, SearchPolicy, VillageRecord};
///
/// let store = RecordStore::new(vec![
///     VillageRecord::new("A", "12", "X"),
///     VillageRecord::new("B", "120", "X"),
///     VillageRecord::new("C", "12", "Y"),
///     VillageRecord::new("D", "3", "X"),
/// ]);
/// let hits = thana_suggestions(&store, "12", &SearchPolicy::default());
/// let numbers: Vec<&str> = hits.iter().map(|r| r.thana_no.as_str()).collect();
/// assert_eq!(numbers, vec!["12", "120"]);
/// ```
pub fn thana_suggestions<'a>(
    store: &'a RecordStore,
    query: &str,
    policy: &SearchPolicy,
) -> Vec<&'a VillageRecord> {
    if !policy.admits_number(query) {
        return Vec::new();
    }
    let prefix = query.trim();
    let mut seen = HashSet::new();
    store
        .iter()
        .filter(|r| r.thana_no.starts_with(prefix))
        .filter(|r| seen.insert(r.thana_no.as_str()))
        .take(policy.suggestion_limit)
        .collect()
}
