// crates/circledb-core/src/lib.rs

//! Village-to-thana lookup for Bihar land-record circles.
//!
//! Load one district's village records, then find the thana number and
//! circle of a village by typo-tolerant name search, by exact thana number,
//! or by expanding a picked village to its siblings.

pub mod circle;
pub mod common;
pub mod error;
pub mod fuzzy;
pub mod group;
pub mod loader;
pub mod model;
pub mod query;
pub mod search;
pub mod select;
pub mod session;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::common::StoreStats;
pub use crate::error::{CircleDbError, Result};
pub use crate::fuzzy::{FuzzyIndex, FuzzyOptions};
pub use crate::group::group_records;
pub use crate::loader::{DistrictSource, StaticSource};
#[cfg(feature = "json")]
pub use crate::loader::DirectorySource;
#[cfg(feature = "fetch")]
pub use crate::loader::RemoteSource;
pub use crate::model::{
    is_known_district, GroupedResult, RecordStore, VillageRecord, DISTRICTS,
};
pub use crate::query::{QueryState, SearchPolicy};
pub use crate::select::resolve_selection;
pub use crate::session::{LoadOutcome, LoadTicket, Session};
pub use crate::traits::VillageMatcher;

/// Everything a typical caller needs in one import.
pub mod prelude {
    pub use crate::circle::{circles, villages_in_circle, CircleSort};
    pub use crate::search::{grouped_results, thana_suggestions, village_suggestions};
    pub use crate::traits::NameMatch;
    pub use crate::{
        group_records, resolve_selection, CircleDbError, DistrictSource, FuzzyIndex,
        FuzzyOptions, GroupedResult, QueryState, RecordStore, Result, SearchPolicy, Session,
        StaticSource, VillageMatcher, VillageRecord, DISTRICTS,
    };
    #[cfg(feature = "json")]
    pub use crate::DirectorySource;
}
