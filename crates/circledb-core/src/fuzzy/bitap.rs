// crates/circledb-core/src/fuzzy/bitap.rs
use super::{normalize, FuzzyOptions};
use std::collections::HashMap;

/// Width of the bit masks. Longer patterns are searched in chunks.
const MAX_BITS: usize = 32;

/// Scores are floored here so that a hit is always distinguishable from an
/// exact whole-name equality (score `0.0`).
const MIN_SCORE: f64 = 0.001;

/// Result of matching one pattern against one text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchOutcome {
    pub is_match: bool,
    /// `0.0` for an exact match, up to `1.0`.
    pub score: f64,
}

impl MatchOutcome {
    const MISS: MatchOutcome = MatchOutcome {
        is_match: false,
        score: 1.0,
    };
}

#[derive(Clone, Debug)]
struct Chunk {
    pattern: Vec<char>,
    /// Offset of this chunk inside the whole pattern.
    start_index: usize,
    /// Bit `len - 1 - i` is set for every position `i` holding the char.
    alphabet: HashMap<char, u32>,
}

impl Chunk {
    fn new(pattern: &[char], start_index: usize) -> Self {
        let len = pattern.len();
        let mut alphabet: HashMap<char, u32> = HashMap::new();
        for (i, ch) in pattern.iter().enumerate() {
            *alphabet.entry(*ch).or_insert(0) |= 1 << (len - i - 1);
        }
        Self {
            pattern: pattern.to_vec(),
            start_index,
            alphabet,
        }
    }

    fn char_mask(&self, ch: Option<&char>) -> u32 {
        ch.and_then(|c| self.alphabet.get(c)).copied().unwrap_or(0)
    }
}

/// A compiled query, reusable against any number of names.
///
/// # Examples
/// ```rust
/// use circledb_core::fuzzy::{BitapPattern, FuzzyOptions};
///
/// let pattern = BitapPattern::new("Ramnagr", &FuzzyOptions::default());
/// assert!(pattern.search_in("Ramnagar").is_match);
/// assert!(!pattern.search_in("Sultanpur").is_match);
/// ```
#[derive(Clone, Debug)]
pub struct BitapPattern {
    pattern: Vec<char>,
    chunks: Vec<Chunk>,
    options: FuzzyOptions,
}

impl BitapPattern {
    pub fn new(pattern: &str, options: &FuzzyOptions) -> Self {
        let chars = normalize(pattern, options.case_sensitive);
        let len = chars.len();
        let mut chunks = Vec::new();

        if len > MAX_BITS {
            let remainder = len % MAX_BITS;
            let end = len - remainder;
            let mut i = 0;
            while i < end {
                chunks.push(Chunk::new(&chars[i..i + MAX_BITS], i));
                i += MAX_BITS;
            }
            // The tail overlaps the previous chunk so every chunk is full width.
            if remainder > 0 {
                chunks.push(Chunk::new(&chars[len - MAX_BITS..], len - MAX_BITS));
            }
        } else if len > 0 {
            chunks.push(Chunk::new(&chars, 0));
        }

        Self {
            pattern: chars,
            chunks,
            options: *options,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Match against raw text (folded here).
    pub fn search_in(&self, text: &str) -> MatchOutcome {
        let text = normalize(text, self.options.case_sensitive);
        self.search_normalized(&text)
    }

    /// Match against text already folded with the same options.
    pub(crate) fn search_normalized(&self, text: &[char]) -> MatchOutcome {
        if self.pattern == text {
            return MatchOutcome {
                is_match: true,
                score: 0.0,
            };
        }
        if self.chunks.is_empty() {
            return MatchOutcome::MISS;
        }

        let mut total = 0.0;
        let mut has_matches = false;
        for chunk in &self.chunks {
            let outcome = search_chunk(text, chunk, &self.options);
            has_matches |= outcome.is_match;
            total += outcome.score;
        }

        if has_matches {
            MatchOutcome {
                is_match: true,
                score: total / self.chunks.len() as f64,
            }
        } else {
            MatchOutcome::MISS
        }
    }
}

fn compute_score(
    pattern_len: usize,
    errors: usize,
    current_location: usize,
    expected_location: usize,
    options: &FuzzyOptions,
) -> f64 {
    let accuracy = errors as f64 / pattern_len as f64;
    if options.ignore_location {
        return accuracy;
    }
    let proximity = expected_location.abs_diff(current_location);
    if options.distance == 0 {
        return if proximity > 0 { 1.0 } else { accuracy };
    }
    accuracy + proximity as f64 / options.distance as f64
}

fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if from > text.len() || pattern.len() > text.len() - from {
        return None;
    }
    text[from..]
        .windows(pattern.len())
        .position(|w| w == pattern)
        .map(|pos| pos + from)
}

/// Longest run of `true` is at least `min_len`.
fn has_run(mask: &[bool], min_len: usize) -> bool {
    let mut run = 0;
    for &hit in mask {
        if hit {
            run += 1;
            if run >= min_len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Approximate search of one chunk with a growing error budget.
///
/// Each pass `i` allows `i` edits (insertions, deletions, substitutions). A
/// pass only runs while `i / len` still fits under the best score seen so
/// far, so the first pass that finds anything fixes the score.
fn search_chunk(text: &[char], chunk: &Chunk, options: &FuzzyOptions) -> MatchOutcome {
    let pattern = &chunk.pattern;
    let pattern_len = pattern.len();
    let text_len = text.len();
    let expected_location = (options.location + chunk.start_index).min(text_len);

    let mut current_threshold = options.threshold;
    let compute_matches = options.min_match_char_length > 1;
    let mut match_mask = vec![false; if compute_matches { text_len } else { 0 }];

    // 1. Exact occurrences tighten the threshold up front.
    let mut from = expected_location;
    while let Some(index) = find_from(text, pattern, from) {
        let score = compute_score(pattern_len, 0, index, expected_location, options);
        current_threshold = current_threshold.min(score);
        from = index + pattern_len;
        if compute_matches {
            for slot in &mut match_mask[index..index + pattern_len] {
                *slot = true;
            }
        }
    }

    // 2. Bitap passes.
    let mut best_location: Option<usize> = None;
    let mut last_bits: Vec<u32> = Vec::new();
    let mut final_score = 1.0;
    let mut bin_max = pattern_len + text_len;
    let mask: u32 = 1 << (pattern_len - 1);

    for errors in 0..pattern_len {
        // Widest window in which `errors` edits could still beat the threshold.
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            let score = compute_score(
                pattern_len,
                errors,
                expected_location + bin_mid,
                expected_location,
                options,
            );
            if score <= current_threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        bin_max = bin_mid;

        let mut start = (expected_location + 1).saturating_sub(bin_mid).max(1);
        let finish = if options.find_all_matches {
            text_len
        } else {
            (expected_location + bin_mid).min(text_len) + pattern_len
        };

        let mut bits = vec![0u32; finish + 2];
        bits[finish + 1] = (1u32 << errors) - 1;

        let mut j = finish;
        while j >= start {
            let current_location = j - 1;
            let char_match = chunk.char_mask(text.get(current_location));
            if compute_matches {
                if let Some(slot) = match_mask.get_mut(current_location) {
                    *slot = char_match != 0;
                }
            }

            bits[j] = ((bits[j + 1] << 1) | 1) & char_match;
            if errors > 0 {
                let prev = last_bits.get(j).copied().unwrap_or(0);
                let prev_next = last_bits.get(j + 1).copied().unwrap_or(0);
                bits[j] |= ((prev_next | prev) << 1) | 1 | prev_next;
            }

            if bits[j] & mask != 0 {
                final_score = compute_score(
                    pattern_len,
                    errors,
                    current_location,
                    expected_location,
                    options,
                );
                if final_score <= current_threshold {
                    current_threshold = final_score;
                    best_location = Some(current_location);
                    if current_location <= expected_location {
                        break;
                    }
                    start = (2 * expected_location).saturating_sub(current_location).max(1);
                }
            }
            j -= 1;
        }

        let next_score = compute_score(
            pattern_len,
            errors + 1,
            expected_location,
            expected_location,
            options,
        );
        if next_score > current_threshold {
            break;
        }
        last_bits = bits;
    }

    let mut outcome = MatchOutcome {
        is_match: best_location.is_some(),
        score: f64::max(MIN_SCORE, final_score),
    };
    if compute_matches && !has_run(&match_mask, options.min_match_char_length) {
        outcome.is_match = false;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn outcome(pattern: &str, text: &str) -> MatchOutcome {
        BitapPattern::new(pattern, &FuzzyOptions::default()).search_in(text)
    }

    #[test]
    fn whole_name_equality_scores_zero() {
        let hit = outcome("Ramnagar", "ramnagar");
        assert!(hit.is_match);
        assert_eq!(hit.score, 0.0);
    }

    #[test]
    fn exact_substring_gets_floor_score() {
        let hit = outcome("nagar", "Ramnagar");
        assert!(hit.is_match);
        assert_eq!(hit.score, MIN_SCORE);
    }

    #[rstest]
    #[case("Ramnagr", "Ramnagar")] // deletion
    #[case("Ramnaggar", "Ramnagar")] // insertion
    #[case("Ramnegar", "Ramnagar")] // substitution
    #[case("sultanpur", "Sultanpur Diara")]
    fn one_edit_is_tolerated(#[case] query: &str, #[case] name: &str) {
        let hit = outcome(query, name);
        assert!(hit.is_match, "{query} should match {name}");
        assert!(hit.score > 0.0 && hit.score <= 0.4);
    }

    #[test]
    fn score_is_errors_over_length() {
        let hit = outcome("Ramnegar", "Ramnagar");
        assert!((hit.score - 1.0 / 8.0).abs() < 1e-9);
    }

    #[rstest]
    #[case("qqq", "Ramnagar")]
    #[case("xyzw", "Rampur")]
    #[case("Patna", "Gaya")]
    fn unrelated_names_do_not_match(#[case] query: &str, #[case] name: &str) {
        assert!(!outcome(query, name).is_match);
    }

    #[test]
    fn threshold_bounds_the_error_budget() {
        let strict = FuzzyOptions::default().with_threshold(0.0);
        let pattern = BitapPattern::new("Ramnagr", &strict);
        assert!(!pattern.search_in("Ramnagar").is_match);
        assert!(pattern.search_in("Ramnagra Tola").is_match);
    }

    #[test]
    fn match_may_sit_anywhere_in_the_name() {
        let hit = outcome("bazar", "Purani Bazaar Tola Ramnagar Khas");
        assert!(hit.is_match);
    }

    #[test]
    fn min_run_rejects_scattered_characters() {
        // Every char of the name is in the query alphabet only as isolated hits.
        let options = FuzzyOptions {
            threshold: 1.0,
            ..FuzzyOptions::default()
        };
        let pattern = BitapPattern::new("ab", &options);
        assert!(!pattern.search_in("a-b").is_match);
        assert!(pattern.search_in("ab-").is_match);
    }

    #[test]
    fn long_patterns_are_chunked() {
        let long = "a".repeat(40);
        let pattern = BitapPattern::new(&long, &FuzzyOptions::default());
        assert_eq!(pattern.chunks.len(), 2);
        assert!(pattern.search_in(&"a".repeat(45)).is_match);
    }

    #[test]
    fn empty_pattern_matches_nothing_but_empty_text() {
        let pattern = BitapPattern::new("", &FuzzyOptions::default());
        assert!(pattern.is_empty());
        assert!(!pattern.search_in("Ramnagar").is_match);
        assert!(pattern.search_in("").is_match);
    }

    #[test]
    fn accents_are_an_edit_not_a_fold() {
        let hit = outcome("ramnagar", "Rāmnagar");
        assert!(hit.is_match);
        assert!((hit.score - 1.0 / 8.0).abs() < 1e-9);

        let hit = outcome("Strasse", "Straße");
        assert!(hit.score > 0.0);
    }

    #[rstest]
    #[case(0, true, 0.03)]
    #[case(0, false, 0.03)]
    #[case(3, false, MIN_SCORE)]
    fn location_adds_proximity_penalty(
        #[case] location: usize,
        #[case] find_all_matches: bool,
        #[case] expected: f64,
    ) {
        let options = FuzzyOptions {
            ignore_location: false,
            find_all_matches,
            location,
            distance: 100,
            ..FuzzyOptions::default()
        };
        let hit = BitapPattern::new("nagar", &options).search_in("Ramnagar");
        assert!(hit.is_match);
        assert!((hit.score - expected).abs() < 1e-9, "score {}", hit.score);
    }

    #[test]
    fn distant_match_exceeds_threshold() {
        let options = FuzzyOptions {
            ignore_location: false,
            distance: 10,
            ..FuzzyOptions::default()
        };
        // Exact hit 6 characters from `location` scores 0.6 > 0.4.
        let hit = BitapPattern::new("tola", &options).search_in("Bazaartola");
        assert!(!hit.is_match);
    }

    #[test]
    fn case_sensitivity_is_optional() {
        let options = FuzzyOptions {
            case_sensitive: true,
            threshold: 0.0,
            ..FuzzyOptions::default()
        };
        let pattern = BitapPattern::new("ram", &options);
        assert!(!pattern.search_in("RAMPUR").is_match);
        assert!(pattern.search_in("rampur").is_match);
    }
}
