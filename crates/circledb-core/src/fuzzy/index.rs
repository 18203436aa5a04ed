// crates/circledb-core/src/fuzzy/index.rs
use super::{normalize, BitapPattern, FuzzyOptions};
use crate::model::{RecordStore, VillageRecord};
use crate::text::space_token_count;
use crate::traits::VillageMatcher;

/// One searchable name: the folded characters plus its length norm.
#[derive(Clone, Debug)]
struct IndexedName {
    record: usize,
    text: Vec<char>,
    norm: f64,
}

/// A ranked hit from [`FuzzyIndex::search`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FuzzyHit<'a> {
    pub record: &'a VillageRecord,
    /// Position of the record in the store, used as the tie-break.
    pub position: usize,
    /// Lower is better; `0.0 < score <= 1.0` for any hit.
    pub score: f64,
}

/// Search structure over the village names of one [`RecordStore`].
///
/// Names that are blank after trimming are not indexed and can never be
/// returned. The index keeps its own clone of the store (an `Arc` bump), so it
/// stays valid on its own after the caller replaces the store.
#[derive(Clone, Debug)]
pub struct FuzzyIndex {
    store: RecordStore,
    names: Vec<IndexedName>,
    options: FuzzyOptions,
}

impl FuzzyIndex {
    pub fn build(store: &RecordStore, options: FuzzyOptions) -> Self {
        let names = store
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.village_name.trim().is_empty())
            .map(|(record, r)| IndexedName {
                record,
                text: normalize(&r.village_name, options.case_sensitive),
                norm: field_norm(&r.village_name),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            records = store.len(),
            indexed = names.len(),
            "built fuzzy village index"
        );

        Self {
            store: store.clone(),
            names,
            options,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn options(&self) -> &FuzzyOptions {
        &self.options
    }

    /// Number of indexed (non-blank) names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Scores every indexed name, then ranks and truncates.
    ///
    /// Ranking is by ascending score; equal scores keep store order. An empty
    /// index or a zero `limit` returns an empty vector.
    pub fn search(&self, query: &str, limit: usize) -> Vec<FuzzyHit<'_>> {
        if self.names.is_empty() || limit == 0 {
            return Vec::new();
        }

        let pattern = BitapPattern::new(query, &self.options);
        let records = self.store.records();
        let mut hits: Vec<FuzzyHit<'_>> = self
            .names
            .iter()
            .filter_map(|name| {
                let outcome = pattern.search_normalized(&name.text);
                outcome.is_match.then(|| FuzzyHit {
                    record: &records[name.record],
                    position: name.record,
                    score: self.weigh(outcome.score, name.norm),
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.position.cmp(&b.position))
        });
        hits.truncate(limit);
        hits
    }

    /// Multi-word names are favoured: the raw score is raised to the name's
    /// norm, `1 / sqrt(words)`, which pulls scores below 1 towards 1 less for
    /// longer names.
    fn weigh(&self, score: f64, norm: f64) -> f64 {
        let base = if score == 0.0 { f64::EPSILON } else { score };
        let exponent = if self.options.ignore_field_norm {
            1.0
        } else {
            norm
        };
        base.powf(exponent)
    }
}

impl VillageMatcher for FuzzyIndex {
    fn build(store: &RecordStore, options: &FuzzyOptions) -> Self {
        FuzzyIndex::build(store, *options)
    }

    fn ranked<'a>(&'a self, query: &str, limit: usize) -> Vec<&'a VillageRecord> {
        self.search(query, limit)
            .into_iter()
            .map(|hit| hit.record)
            .collect()
    }
}

/// `1 / sqrt(word count)`, rounded to three decimals.
fn field_norm(name: &str) -> f64 {
    let tokens = space_token_count(name).max(1) as f64;
    let norm = 1.0 / tokens.sqrt();
    (norm * 1000.0).round() / 1000.0
}
