//! Store error types.

use std::path::PathBuf;

use crate::domain::{InvalidVehicleId, TimeError};

/// Errors that can occur when opening or mutating the schedule store.
///
/// "Not found" is not an error: operations that target a missing
/// identifier report it through their return value instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A time field failed validation
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    /// The vehicle identifier failed validation
    #[error(transparent)]
    InvalidId(#[from] InvalidVehicleId),

    /// A record with this identifier already exists
    #[error("duplicate vehicle id: {0}")]
    DuplicateId(String),

    /// The schedule file exists but could not be read back
    #[error("corrupt schedule file {}: {}", path.display(), message)]
    CorruptStorage { path: PathBuf, message: String },

    /// Rewriting the schedule file failed
    #[error("failed to write schedule file {}: {}", path.display(), message)]
    Write { path: PathBuf, message: String },
}
