// crates/circledb-core/src/model.rs
use crate::common::StoreStats;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// A single row of a district dataset: one village, its thana number and the
/// circle it belongs to.
///
/// All three fields are already trimmed by the loader. None of them is unique
/// on its own; two records are siblings when both `thana_no` and
/// `circle_name` match (see [`VillageRecord::group_key`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VillageRecord {
    pub village_name: String,
    pub thana_no: String,
    pub circle_name: String,
}

impl VillageRecord {
    pub fn new(
        village_name: impl Into<String>,
        thana_no: impl Into<String>,
        circle_name: impl Into<String>,
    ) -> Self {
        Self {
            village_name: village_name.into(),
            thana_no: thana_no.into(),
            circle_name: circle_name.into(),
        }
    }

    /// The composite `(thana_no, circle_name)` key used for grouping.
    ///
    /// Thana numbers are scoped per circle, so the number alone would merge
    /// unrelated villages from different circles.
    pub fn group_key(&self) -> GroupKey<'_> {
        GroupKey {
            thana_no: &self.thana_no,
            circle_name: &self.circle_name,
        }
    }

    /// Exact string equality on both key fields.
    pub fn is_sibling_of(&self, other: &VillageRecord) -> bool {
        self.group_key() == other.group_key()
    }
}

/// Borrowed view of the grouping key of a record or a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey<'a> {
    pub thana_no: &'a str,
    pub circle_name: &'a str,
}

/// Villages sharing one `(thana_no, circle_name)` key.
///
/// `villages` keeps first-seen order and never contains the same name twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedResult {
    pub thana_no: String,
    pub circle_name: String,
    pub villages: Vec<String>,
}

impl GroupedResult {
    /// An empty group carrying the key of `record`.
    pub fn keyed_by(record: &VillageRecord) -> Self {
        Self {
            thana_no: record.thana_no.clone(),
            circle_name: record.circle_name.clone(),
            villages: Vec::new(),
        }
    }
}

/// Immutable snapshot of one district's records.
///
/// Cloning is cheap (the rows live behind an `Arc`), so a snapshot can be
/// handed to an index or a session without copying. A district switch builds
/// a new store; an existing store is never mutated.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Arc<[VillageRecord]>,
}

impl RecordStore {
    pub fn new(records: Vec<VillageRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[VillageRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VillageRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct counts over the snapshot.
    pub fn stats(&self) -> StoreStats {
        let mut villages = HashSet::new();
        let mut circles = HashSet::new();
        let mut thanas = HashSet::new();
        for r in self.iter() {
            villages.insert(r.village_name.as_str());
            if !r.circle_name.is_empty() {
                circles.insert(r.circle_name.as_str());
            }
            thanas.insert(r.group_key());
        }
        StoreStats {
            records: self.len(),
            villages: villages.len(),
            circles: circles.len(),
            thanas: thanas.len(),
        }
    }
}

impl From<Vec<VillageRecord>> for RecordStore {
    fn from(records: Vec<VillageRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<VillageRecord> for RecordStore {
    fn from_iter<I: IntoIterator<Item = VillageRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a VillageRecord;
    type IntoIter = std::slice::Iter<'a, VillageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The districts of Bihar for which datasets are published.
///
/// Names are used verbatim as keys into a [`DistrictSource`]; spelling and
/// parenthesised aliases match the published file names.
///
/// [`DistrictSource`]: crate::loader::DistrictSource
pub const DISTRICTS: [&str; 38] = [
    "Araria",
    "Arwal",
    "Aurangabad",
    "Banka",
    "Begusarai",
    "Bettiah",
    "Bhabhua (Kaimur)",
    "Bhagalpur",
    "Bhojpur",
    "Buxar",
    "Darbhanga",
    "Gaya",
    "Gopalganj",
    "Jamui",
    "Jehanabad",
    "Katihar",
    "Khagaria",
    "Kishanganj",
    "Lakhisarai",
    "Madhepura",
    "Madhubani",
    "Motihari",
    "Munger",
    "Muzaffarpur",
    "Nalanda",
    "Nawada",
    "Patna",
    "Purnea",
    "Rohtas (Sasaram)",
    "Saharsa",
    "Samastipur",
    "Saran",
    "Seikhpura",
    "Shivhar",
    "Sitamarhi",
    "Siwan",
    "Supaul",
    "Vaishali (Hajipur)",
];

/// Exact, case-sensitive membership in [`DISTRICTS`].
pub fn is_known_district(name: &str) -> bool {
    DISTRICTS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn siblings_need_both_key_fields() {
        let a = VillageRecord::new("A", "5", "X");
        let b = VillageRecord::new("B", "5", "X");
        let c = VillageRecord::new("C", "5", "Y");
        assert!(a.is_sibling_of(&b));
        assert!(!a.is_sibling_of(&c));
    }

    #[test]
    fn stats_count_distinct_values() {
        let store = RecordStore::new(vec![
            VillageRecord::new("A", "5", "X"),
            VillageRecord::new("A", "5", "X"),
            VillageRecord::new("B", "5", "Y"),
            VillageRecord::new("C", "7", ""),
        ]);
        let stats = store.stats();
        assert_eq!(stats.records, 4);
        assert_eq!(stats.villages, 3);
        assert_eq!(stats.circles, 2);
        assert_eq!(stats.thanas, 3);
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(VillageRecord::new("Ramnagar", "12", "Bihta")).unwrap();
        assert_eq!(json["villageName"], "Ramnagar");
        assert_eq!(json["thanaNo"], "12");
        assert_eq!(json["circleName"], "Bihta");
    }

    #[test]
    fn district_list_is_fixed() {
        assert_eq!(DISTRICTS.len(), 38);
        assert!(is_known_district("Bhabhua (Kaimur)"));
        assert!(!is_known_district("patna"));
    }
}
