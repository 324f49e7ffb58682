use simek_common::LaneError;
use thiserror::Error;

/// The common error type used by this crate
#[derive(Error, Debug)]
pub enum SimekStorageError {
    /// An error that occurs while encoding a snapshot
    #[error("Failed to encode a snapshot: {0}")]
    EncodeFailed(String),

    /// An error that occurs while decoding a snapshot
    #[error("Failed to decode a snapshot: {0}")]
    DecodeFailed(String),

    /// An error that occurs when working with a snapshot backend
    #[error("Snapshot backend error: {0}")]
    StorageBackend(String),

    /// The I/O lane could not run the operation
    #[error(transparent)]
    Lane(#[from] LaneError),
}

impl From<std::io::Error> for SimekStorageError {
    fn from(error: std::io::Error) -> Self {
        SimekStorageError::StorageBackend(format!("{error}"))
    }
}
