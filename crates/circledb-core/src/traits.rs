// crates/circledb-core/src/traits.rs
use crate::fuzzy::FuzzyOptions;
use crate::model::{RecordStore, VillageRecord};
use crate::text::fold_key;

/// The seam between the lookup logic and the approximate matcher.
///
/// The dispatcher only needs two things from a matcher: build it over a
/// store, and ask it for ranked records. [`FuzzyIndex`] is the shipped
/// implementation; tests and embedders can plug in their own.
///
/// [`FuzzyIndex`]: crate::fuzzy::FuzzyIndex
pub trait VillageMatcher {
    /// Build a fresh matcher over every record of `store`.
    fn build(store: &RecordStore, options: &FuzzyOptions) -> Self
    where
        Self: Sized;

    /// Records whose village name approximately matches `query`, best first,
    /// at most `limit` of them.
    fn ranked<'a>(&'a self, query: &str, limit: usize) -> Vec<&'a VillageRecord>;
}

/// Accent- and case-insensitive substring filter over a display name, based
/// on [`fold_key`]. The circle browser filters its rows with it.
///
/// # Examples
/// ```rust
/// use circledb_core::traits::NameMatch;
/// use circledb_core::VillageRecord;
///
/// let village = VillageRecord::new("Rāmnagar Diara", "12", "Bihta");
/// assert!(village.name_contains("ramnagar"));
/// assert!(village.name_contains("DIARA"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}

impl NameMatch for VillageRecord {
    fn name_str(&self) -> &str {
        &self.village_name
    }
}
