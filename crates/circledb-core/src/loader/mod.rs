// crates/circledb-core/src/loader/mod.rs

//! # District Loaders
//!
//! The I/O boundary. A [`DistrictSource`] turns a district name into trimmed
//! [`VillageRecord`]s; everything past this point works on plain records.
//!
//! - [`DirectorySource`] reads `<dir>/<district>.json` or `.json.gz`.
//! - [`RemoteSource`] fetches `<base>/<district>.json` over HTTP, by default
//!   from [`DEFAULT_BASE_URL`].
//! - [`StaticSource`] serves records from memory.

use crate::error::{CircleDbError, Result};
use crate::model::VillageRecord;
use std::collections::HashMap;

#[cfg(feature = "json")]
mod common_io;
#[cfg(feature = "json")]
mod local;
#[cfg(feature = "json")]
pub mod raw;
#[cfg(feature = "fetch")]
mod remote;

#[cfg(feature = "json")]
pub use local::DirectorySource;
#[cfg(feature = "json")]
pub use raw::{parse_district, parse_district_slice, VillageRaw};
#[cfg(feature = "fetch")]
pub use remote::{RemoteSource, DEFAULT_BASE_URL};

/// Anything that can produce the records of a district.
pub trait DistrictSource {
    /// Fetches every record of `district`.
    ///
    /// A district the source has no data for is
    /// [`CircleDbError::NotFound`]; other failures keep their own variant.
    fn fetch(&self, district: &str) -> Result<Vec<VillageRecord>>;
}

/// In-memory district map.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    districts: HashMap<String, Vec<VillageRecord>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_district(mut self, district: impl Into<String>, records: Vec<VillageRecord>) -> Self {
        self.insert(district, records);
        self
    }

    pub fn insert(&mut self, district: impl Into<String>, records: Vec<VillageRecord>) {
        self.districts.insert(district.into(), records);
    }
}

impl DistrictSource for StaticSource {
    fn fetch(&self, district: &str) -> Result<Vec<VillageRecord>> {
        self.districts
            .get(district)
            .cloned()
            .ok_or_else(|| CircleDbError::NotFound(format!("No data for district {district}")))
    }
}

/// Rejects names that could escape a data directory.
pub(crate) fn check_district_name(district: &str) -> Result<()> {
    let bad = district.trim().is_empty()
        || district.contains(['/', '\\', '\0'])
        || district.contains("..");
    if bad {
        return Err(CircleDbError::InvalidData(format!(
            "Unusable district name: {district:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn static_source_serves_known_districts() {
        let source =
            StaticSource::new().with_district("Patna", vec![VillageRecord::new("A", "1", "X")]);
        assert_eq!(source.fetch("Patna").unwrap().len(), 1);
        assert!(source.fetch("Gaya").unwrap_err().is_not_found());
    }

    #[rstest]
    #[case("Patna", true)]
    #[case("Bhabhua (Kaimur)", true)]
    #[case("", false)]
    #[case("  ", false)]
    #[case("../etc/passwd", false)]
    #[case("a/b", false)]
    #[case("a\\b", false)]
    fn district_names_are_checked(#[case] name: &str, #[case] ok: bool) {
        assert_eq!(check_district_name(name).is_ok(), ok);
    }
}
