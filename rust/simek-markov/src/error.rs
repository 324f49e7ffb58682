use simek_common::LaneError;
use simek_storage::SimekStorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkovError {
    #[error(transparent)]
    Storage(#[from] SimekStorageError),

    #[error(transparent)]
    Lane(#[from] LaneError),
}
