//! Advanced filtering example for circledb-rs
//!
//! This example demonstrates:
//! - Tuning the search policy (threshold, limits)
//! - Browsing circles with filters and sort orders
//! - Thana-number prefix suggestions
//! - Plugging a custom matcher into the session

use circledb_rs::circle::{circles, villages_in_circle, CircleSort};
use circledb_rs::prelude::*;

/// Plain case-insensitive substring matching, for comparison with the fuzzy
/// index.
struct SubstringMatcher {
    store: RecordStore,
}

impl VillageMatcher for SubstringMatcher {
    fn build(store: &RecordStore, _options: &FuzzyOptions) -> Self {
        Self {
            store: store.clone(),
        }
    }

    fn ranked<'a>(&'a self, query: &str, limit: usize) -> Vec<&'a VillageRecord> {
        self.store
            .iter()
            .filter(|r| r.name_contains(query))
            .take(limit)
            .collect()
    }
}

fn main() -> anyhow::Result<()> {
    println!("=== circledb-rs Advanced Filtering Example ===\n");
    let source = DirectorySource::bundled();

    // Example 1: A stricter threshold drops distant spellings
    println!("--- Example 1: Threshold ---");
    for threshold in [0.4, 0.1] {
        let mut policy = SearchPolicy::default();
        policy.fuzzy = policy.fuzzy.with_threshold(threshold);
        let mut session: Session = Session::new(policy);
        session.load_with(&source, "Patna")?;
        session.type_name("Rampor");
        let names: Vec<&str> = session
            .village_suggestions()
            .iter()
            .map(|r| r.village_name.as_str())
            .collect();
        println!("threshold {threshold}: {names:?}");
    }
    println!();

    let mut session: Session = Session::default();
    session.load_with(&source, "Patna")?;

    // Example 2: Circle browser
    println!("--- Example 2: Circles ---");
    let store = session.store();
    println!("{}", circles(store).join(", "));
    for r in villages_in_circle(store, "Bihta", Some("pur"), CircleSort::ThanaAsc) {
        println!("  {} (thana {})", r.village_name, r.thana_no);
    }
    println!();

    // Example 3: Thana prefix suggestions
    println!("--- Example 3: Thana numbers starting with 4 ---");
    session.type_number("4");
    for r in session.thana_suggestions() {
        println!("  {} ({})", r.thana_no, r.circle_name);
    }
    println!();

    // Example 4: Same session API over a different matcher
    println!("--- Example 4: Substring matcher ---");
    let mut plain: Session<SubstringMatcher> = Session::default();
    plain.load_with(&source, "Patna")?;
    plain.type_name("Ramnagr");
    println!("substring hits for \"Ramnagr\": {}", plain.results().len());
    plain.type_name("Ramnagar");
    println!("substring hits for \"Ramnagar\": {}", plain.results().len());

    Ok(())
}
