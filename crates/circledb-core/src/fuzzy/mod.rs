// crates/circledb-core/src/fuzzy/mod.rs

//! # Fuzzy Village Index
//!
//! Typo-tolerant search over village names. The matcher is a bit-parallel
//! approximate substring search (bitap) scored by `errors / pattern length`,
//! so a score of `0.0` is an exact hit and `threshold` bounds how many edits a
//! query may carry relative to its length.
//!
//! The index is a pure function of a [`RecordStore`](crate::model::RecordStore):
//! building it twice over the same store gives the same index, and a district
//! switch simply builds a new one.

mod bitap;
mod index;

pub use bitap::{BitapPattern, MatchOutcome};
pub use index::{FuzzyHit, FuzzyIndex};

use serde::{Deserialize, Serialize};

/// Tuning knobs of the approximate matcher.
///
/// The defaults are the calibrated values of the village search box: threshold
/// `0.4`, matches anywhere in the name, at least two adjacent matched
/// characters, and every qualifying record is scored before ranking.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyOptions {
    /// Highest accepted score, `0.0` = exact, `1.0` = anything.
    pub threshold: f64,
    /// Shortest run of pattern characters the name must contain.
    pub min_match_char_length: usize,
    /// Ignore where in the name the match sits.
    pub ignore_location: bool,
    /// Keep scanning the whole name instead of a window around `location`.
    pub find_all_matches: bool,
    /// Expected match position, only used when `ignore_location` is off.
    pub location: usize,
    /// How far from `location` a match may drift per unit of score.
    pub distance: usize,
    pub case_sensitive: bool,
    /// Skip the name-length normalization of scores.
    pub ignore_field_norm: bool,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            min_match_char_length: 2,
            ignore_location: true,
            find_all_matches: true,
            location: 0,
            distance: 100,
            case_sensitive: false,
            ignore_field_norm: false,
        }
    }
}

impl FuzzyOptions {
    /// Same options with a different threshold, clamped to `0.0..=1.0`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

/// Folds text the way the matcher compares it: lowercase unless
/// `case_sensitive`. Accents are kept, so `Rāmnagar` is one edit away from
/// `ramnagar` rather than equal to it.
pub(crate) fn normalize(s: &str, case_sensitive: bool) -> Vec<char> {
    if case_sensitive {
        s.chars().collect()
    } else {
        s.to_lowercase().chars().collect()
    }
}
