// crates/circledb-core/src/query.rs

//! # Query Router
//!
//! Decides what a raw input means (thana number or village name), whether it
//! is long enough to search at all, and which single query channel is live.

use crate::fuzzy::FuzzyOptions;
use crate::model::VillageRecord;
use crate::text::is_all_digits;
use serde::{Deserialize, Serialize};

/// Syntactic class of an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Only ASCII digits after trimming.
    Number,
    /// Anything else, including the empty string.
    Name,
}

/// Classifies `raw` without looking at any data.
///
/// ```rust
/// use circledb_core::query::{classify, QueryKind};
///
/// assert_eq!(classify(" 120 "), QueryKind::Number);
/// assert_eq!(classify("Ramnagar"), QueryKind::Name);
/// assert_eq!(classify("12A"), QueryKind::Name);
/// ```
pub fn classify(raw: &str) -> QueryKind {
    if is_all_digits(raw.trim()) {
        QueryKind::Number
    } else {
        QueryKind::Name
    }
}

/// The live query. Being an enum, at most one of name query, number query or
/// explicit selection can be active at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", content = "value", rename_all = "lowercase")]
pub enum QueryState {
    #[default]
    Idle,
    /// Raw text of the village-name box.
    Name(String),
    /// Raw text of the thana-number box.
    Number(String),
    /// A record picked from the village suggestions.
    Selected(VillageRecord),
}

impl QueryState {
    /// Routes a single free-text input to the channel its shape calls for.
    /// Empty input is [`QueryState::Idle`].
    pub fn route(raw: &str) -> Self {
        if raw.is_empty() {
            return QueryState::Idle;
        }
        match classify(raw) {
            QueryKind::Number => QueryState::Number(raw.to_owned()),
            QueryKind::Name => QueryState::Name(raw.to_owned()),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, QueryState::Idle)
    }

    /// The text shown in whichever box is live; a selection shows its village
    /// name.
    pub fn text(&self) -> &str {
        match self {
            QueryState::Idle => "",
            QueryState::Name(q) | QueryState::Number(q) => q,
            QueryState::Selected(record) => &record.village_name,
        }
    }
}

/// Limits and gates shared by every search surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    /// Shortest village-name query that triggers a fuzzy search.
    pub name_min_chars: usize,
    /// Shortest thana-number input that triggers a lookup.
    pub number_min_chars: usize,
    /// Rows shown in a suggestion list.
    pub suggestion_limit: usize,
    /// Fuzzy hits fed into grouping for a full result list.
    pub result_limit: usize,
    pub fuzzy: FuzzyOptions,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            name_min_chars: 3,
            number_min_chars: 1,
            suggestion_limit: 8,
            result_limit: 50,
            fuzzy: FuzzyOptions::default(),
        }
    }
}

impl SearchPolicy {
    /// Length gate for the name channel, counted in characters of the raw
    /// input.
    pub fn admits_name(&self, raw: &str) -> bool {
        raw.chars().count() >= self.name_min_chars
    }

    /// Length gate for the number channel, counted on the raw input.
    pub fn admits_number(&self, raw: &str) -> bool {
        raw.chars().count() >= self.number_min_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12", QueryKind::Number)]
    #[case("  7 ", QueryKind::Number)]
    #[case("", QueryKind::Name)]
    #[case("   ", QueryKind::Name)]
    #[case("12-A", QueryKind::Name)]
    #[case("Ram", QueryKind::Name)]
    fn classification_is_purely_syntactic(#[case] raw: &str, #[case] kind: QueryKind) {
        assert_eq!(classify(raw), kind);
    }

    #[rstest]
    #[case("Ra", false)]
    #[case("Ram", true)]
    #[case("रामन", true)]
    fn name_gate_counts_characters(#[case] raw: &str, #[case] admitted: bool) {
        assert_eq!(SearchPolicy::default().admits_name(raw), admitted);
    }

    #[test]
    fn number_gate_needs_one_character() {
        let policy = SearchPolicy::default();
        assert!(!policy.admits_number(""));
        assert!(policy.admits_number("1"));
    }

    #[test]
    fn routing_picks_one_channel() {
        assert_eq!(QueryState::route(""), QueryState::Idle);
        assert_eq!(QueryState::route("42"), QueryState::Number("42".into()));
        assert_eq!(QueryState::route("Rampur"), QueryState::Name("Rampur".into()));
    }

    #[test]
    fn selection_displays_village_name() {
        let state = QueryState::Selected(VillageRecord::new("Rampur", "4", "Bihta"));
        assert_eq!(state.text(), "Rampur");
        assert!(!state.is_idle());
    }

    #[test]
    fn policy_reads_partial_config() {
        let policy: SearchPolicy =
            serde_json::from_str(r#"{ "name_min_chars": 4, "fuzzy": { "threshold": 0.2 } }"#)
                .unwrap();
        assert_eq!(policy.name_min_chars, 4);
        assert_eq!(policy.suggestion_limit, 8);
        assert_eq!(policy.fuzzy.threshold, 0.2);
        assert_eq!(policy.fuzzy.min_match_char_length, 2);
    }
}
