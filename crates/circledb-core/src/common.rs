// crates/circledb-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for one district snapshot.
///
/// Returned by [`RecordStore::stats`]. `thanas` counts distinct
/// `(thana_no, circle_name)` keys, i.e. the number of groups a query matching
/// every record would produce.
///
/// [`RecordStore::stats`]: crate::model::RecordStore::stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub records: usize,
    pub villages: usize,
    pub circles: usize,
    pub thanas: usize,
}
