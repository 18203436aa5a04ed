//! circledb-cli
//! ============
//!
//! Command-line interface for the `circledb-core` village lookup.
//!
//! The binary is `circledb`. This library target holds the output formatting
//! so it can be tested without spawning the binary.
//!
//! Quick start
//! -----------
//!
//! ```text
//! circledb districts
//! circledb --district Patna search Ramnagr
//! circledb search 12
//! circledb select Sultanpur --pick 0
//! circledb circle Bihta --sort thana --json
//! ```
//!
//! Districts are read from `--data-dir` (default: the sample data bundled
//! with `circledb-core`) or fetched from `--remote-url`.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod render {
    use circledb_core::{GroupedResult, StoreStats, VillageRecord};
    use serde::Serialize;
    use std::fmt::Write;

    /// One block per group: the key line, then the villages indented.
    pub fn groups_text(groups: &[GroupedResult]) -> String {
        if groups.is_empty() {
            return "No villages or thana numbers matched.\n".to_owned();
        }
        let mut out = String::new();
        for g in groups {
            let _ = writeln!(out, "Thana {} | Circle {}", g.thana_no, g.circle_name);
            for v in &g.villages {
                let _ = writeln!(out, "  - {v}");
            }
        }
        let total: usize = groups.iter().map(|g| g.villages.len()).sum();
        let _ = writeln!(out, "{total} villages in {} groups", groups.len());
        out
    }

    /// Numbered rows, as a suggestion dropdown would show them.
    pub fn records_text(records: &[&VillageRecord]) -> String {
        if records.is_empty() {
            return "No suggestions.\n".to_owned();
        }
        let mut out = String::new();
        for (i, r) in records.iter().enumerate() {
            let _ = writeln!(
                out,
                "{i:>2}. {} (thana {}, {})",
                r.village_name, r.thana_no, r.circle_name
            );
        }
        out
    }

    pub fn stats_text(district: &str, stats: &StoreStats) -> String {
        format!(
            "District {district}:\n  Records: {}\n  Villages: {}\n  Circles: {}\n  Thanas: {}\n",
            stats.records, stats.villages, stats.circles, stats.thanas
        )
    }

    pub fn lines_text<S: AsRef<str>>(items: &[S]) -> String {
        items.iter().fold(String::new(), |mut out, s| {
            let _ = writeln!(out, "{}", s.as_ref());
            out
        })
    }

    pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(value)? + "\n")
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use rstest::rstest;

        fn group(t: &str, c: &str, villages: &[&str]) -> GroupedResult {
            GroupedResult {
                thana_no: t.into(),
                circle_name: c.into(),
                villages: villages.iter().map(|v| v.to_string()).collect(),
            }
        }

        #[test]
        fn groups_list_villages_and_totals() {
            let text = groups_text(&[group("5", "Bihta", &["A", "B"]), group("9", "Maner", &["C"])]);
            assert!(text.starts_with("Thana 5 | Circle Bihta\n  - A\n  - B\n"));
            assert!(text.ends_with("3 villages in 2 groups\n"));
        }

        #[rstest]
        #[case(groups_text(&[]), "No villages or thana numbers matched.\n")]
        #[case(records_text(&[]), "No suggestions.\n")]
        fn empty_output_says_so(#[case] text: String, #[case] expected: &str) {
            assert_eq!(text, expected);
        }

        #[test]
        fn suggestions_are_numbered_from_zero() {
            let r = VillageRecord::new("Ramnagar", "12", "Bihta");
            assert_eq!(records_text(&[&r]), " 0. Ramnagar (thana 12, Bihta)\n");
        }

        #[test]
        fn json_uses_camel_case() {
            let json = to_json(&[group("5", "Bihta", &["A"])]).unwrap();
            assert!(json.contains("\"thanaNo\": \"5\""));
            assert!(json.contains("\"circleName\": \"Bihta\""));
        }
    }
}
