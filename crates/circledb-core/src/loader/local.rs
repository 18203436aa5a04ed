// crates/circledb-core/src/loader/local.rs
use super::common_io;
use super::raw::parse_district;
use super::{check_district_name, DistrictSource};
use crate::error::{CircleDbError, Result};
use crate::model::VillageRecord;
use std::path::{Path, PathBuf};

/// District files in one directory, named `<district>.json` or
/// `<district>.json.gz`. The plain file wins when both exist.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The sample data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Self::default_data_dir())
    }

    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Candidate files for `district`, in lookup order.
    pub fn candidates(&self, district: &str) -> Vec<PathBuf> {
        let mut paths = vec![self.dir.join(format!("{district}.json"))];
        if cfg!(feature = "compact") {
            paths.push(self.dir.join(format!("{district}.json.gz")));
        }
        paths
    }

    /// The file that would be read for `district`, if any.
    pub fn locate(&self, district: &str) -> Option<PathBuf> {
        self.candidates(district).into_iter().find(|p| p.is_file())
    }
}

impl DistrictSource for DirectorySource {
    fn fetch(&self, district: &str) -> Result<Vec<VillageRecord>> {
        check_district_name(district)?;
        let path = self.locate(district).ok_or_else(|| {
            CircleDbError::NotFound(format!(
                "No file for district {district} in {}",
                self.dir.display()
            ))
        })?;
        tracing::debug!(district, path = %path.display(), "reading district file");
        let reader = common_io::open_stream(&path)?;
        parse_district(reader)
    }
}
