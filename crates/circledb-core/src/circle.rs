// crates/circledb-core/src/circle.rs
use crate::model::{RecordStore, VillageRecord};
use crate::text::{compare_names, thana_sort_key};
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Ordering of the villages listed for one circle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleSort {
    /// Alphabetical on folded village name.
    #[default]
    NameAsc,
    /// Ascending integer thana number.
    ThanaAsc,
}

impl FromStr for CircleSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "name_asc" => Ok(CircleSort::NameAsc),
            "thana" | "thana_asc" => Ok(CircleSort::ThanaAsc),
            other => Err(format!("unknown circle sort `{other}` (expected name|thana)")),
        }
    }
}

/// Distinct, non-empty circle names of `store`, sorted ascending.
pub fn circles(store: &RecordStore) -> Vec<&str> {
    store
        .iter()
        .map(|r| r.circle_name.as_str())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Records of one circle, optionally narrowed by a village-name substring.
///
/// - `circle` is compared exactly.
/// - `filter` is matched case- and accent-insensitively anywhere in the
///   village name; `None` or a blank filter keeps every record.
/// - Both sort orders are stable.
///
/// # Examples
/// ```rust
/// use circledb_core::circle::{villages_in_circle, CircleSort};
/// use circledb_core::{RecordStore, VillageRecord};
///
/// let store = RecordStore::new(vec![
///     VillageRecord::new("Sultanpur", "20", "Bihta"),
///     VillageRecord::new("Amhara", "3", "Bihta"),
///     VillageRecord::new("Rampur", "1", "Maner"),
/// ]);
/// let rows = villages_in_circle(&store, "Bihta", None, CircleSort::ThanaAsc);
/// assert_eq!(rows[0].village_name, "Amhara");
/// ```
pub fn villages_in_circle<'a>(
    store: &'a RecordStore,
    circle: &str,
    filter: Option<&str>,
    sort: CircleSort,
) -> Vec<&'a VillageRecord> {
    let needle = filter.map(str::trim).filter(|f| !f.is_empty());

    let mut rows: Vec<&VillageRecord> = store
        .iter()
        .filter(|r| r.circle_name == circle)
        .filter(|r| match &needle {
            Some(n) => r.name_contains(n),
            None => true,
        })
        .collect();

    match sort {
        CircleSort::NameAsc => rows.sort_by(|a, b| compare_names(&a.village_name, &b.village_name)),
        CircleSort::ThanaAsc => rows.sort_by_key(|r| thana_sort_key(&r.thana_no)),
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        RecordStore::new(vec![
            VillageRecord::new("sultanpur", "20", "Bihta"),
            VillageRecord::new("Amhara", "3", "Bihta"),
            VillageRecord::new("Rampur", "1", "Maner"),
            VillageRecord::new("Bela", "3", "Bihta"),
            VillageRecord::new("Orphan", "4", ""),
        ])
    }

    #[test]
    fn circle_names_are_distinct_sorted_and_non_empty() {
        assert_eq!(circles(&store()), vec!["Bihta", "Maner"]);
        assert!(circles(&RecordStore::empty()).is_empty());
    }

    #[test]
    fn name_sort_ignores_case() {
        let store = store();
        let names: Vec<&str> = villages_in_circle(&store, "Bihta", None, CircleSort::NameAsc)
            .into_iter()
            .map(|r| r.village_name.as_str())
            .collect();
        assert_eq!(names, vec!["Amhara", "Bela", "sultanpur"]);
    }

    #[test]
    fn thana_sort_is_stable() {
        let store = store();
        let names: Vec<&str> = villages_in_circle(&store, "Bihta", None, CircleSort::ThanaAsc)
            .into_iter()
            .map(|r| r.village_name.as_str())
            .collect();
        assert_eq!(names, vec!["Amhara", "Bela", "sultanpur"]);
    }

    #[test]
    fn filter_matches_substring_without_case() {
        let store = store();
        let rows = villages_in_circle(&store, "Bihta", Some("PUR"), CircleSort::NameAsc);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].village_name, "sultanpur");
        assert_eq!(
            villages_in_circle(&store, "Bihta", Some("  "), CircleSort::NameAsc).len(),
            3
        );
    }

    #[test]
    fn filter_ignores_accents() {
        let store = RecordStore::new(vec![
            VillageRecord::new("Bhāgalpur Tola", "7", "Bihta"),
            VillageRecord::new("Amhara", "3", "Bihta"),
        ]);
        let rows = villages_in_circle(&store, "Bihta", Some("bhagal"), CircleSort::NameAsc);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].thana_no, "7");
    }

    #[test]
    fn sort_parses_from_cli_words() {
        assert_eq!("thana".parse::<CircleSort>(), Ok(CircleSort::ThanaAsc));
        assert_eq!("Name".parse::<CircleSort>(), Ok(CircleSort::NameAsc));
        assert!("size".parse::<CircleSort>().is_err());
    }
}
