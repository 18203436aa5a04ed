use circledb_core::text::thana_sort_key;
use circledb_core::{group_records, GroupedResult, VillageRecord};
use proptest::prelude::*;
use std::collections::HashSet;

fn record() -> impl Strategy<Value = VillageRecord> {
    (
        prop::sample::select(vec!["Amhara", "Bela", "Rampur", "Sua", ""]),
        prop::sample::select(vec!["1", "2", "10", "12", "120", "abc", "", "0", "7A"]),
        prop::sample::select(vec!["Bihta", "Maner", ""]),
    )
        .prop_map(|(v, t, c)| VillageRecord::new(v, t, c))
}

fn records() -> impl Strategy<Value = Vec<VillageRecord>> {
    prop::collection::vec(record(), 0..40)
}

fn first_seen_index(input: &[VillageRecord], group: &GroupedResult) -> usize {
    input
        .iter()
        .position(|r| r.thana_no == group.thana_no && r.circle_name == group.circle_name)
        .unwrap_or(usize::MAX)
}

proptest! {
    #[test]
    fn grouping_is_deterministic(input in records()) {
        prop_assert_eq!(group_records(&input), group_records(&input));
    }

    #[test]
    fn villages_are_unique_per_group(input in records()) {
        for group in group_records(&input) {
            let distinct: HashSet<&String> = group.villages.iter().collect();
            prop_assert_eq!(distinct.len(), group.villages.len());
        }
    }

    #[test]
    fn one_group_per_key(input in records()) {
        let groups = group_records(&input);
        let keys: HashSet<(&str, &str)> = groups
            .iter()
            .map(|g| (g.thana_no.as_str(), g.circle_name.as_str()))
            .collect();
        prop_assert_eq!(keys.len(), groups.len());

        let input_keys: HashSet<(&str, &str)> = input
            .iter()
            .map(|r| (r.thana_no.as_str(), r.circle_name.as_str()))
            .collect();
        prop_assert_eq!(input_keys, keys);
    }

    #[test]
    fn every_record_lands_in_its_group(input in records()) {
        let groups = group_records(&input);
        for r in &input {
            let group = groups
                .iter()
                .find(|g| g.thana_no == r.thana_no && g.circle_name == r.circle_name);
            prop_assert!(group.is_some_and(|g| g.villages.contains(&r.village_name)));
        }
    }

    #[test]
    fn groups_are_sorted_and_stable(input in records()) {
        let groups = group_records(&input);
        for pair in groups.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (ka, kb) = (thana_sort_key(&a.thana_no), thana_sort_key(&b.thana_no));
            prop_assert!(ka <= kb);
            if ka == kb {
                prop_assert!(first_seen_index(&input, a) < first_seen_index(&input, b));
            }
        }
    }
}
