// crates/circledb-core/src/error.rs
use thiserror::Error;

/// Errors raised at the I/O boundary of the crate.
///
/// The search path itself never fails: short queries and empty stores simply
/// produce empty results. Only loading a district (reading files, talking to a
/// remote content store, parsing rows) reports errors, and the [`Session`]
/// turns any of them into [`CircleDbError::DataUnavailable`] after installing
/// an empty record store.
///
/// [`Session`]: crate::session::Session
#[derive(Debug, Error)]
pub enum CircleDbError {
    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("District data unavailable for {district}: {reason}")]
    DataUnavailable { district: String, reason: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A fetch done outside the crate (e.g. by a browser host) failed.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "fetch")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "fetch")]
    #[error("Remote store answered {status} for district {district}")]
    Status { district: String, status: u16 },
}

impl CircleDbError {
    /// `true` when the error means "there is no data for this key" rather than
    /// a transport or parsing fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CircleDbError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CircleDbError>;
