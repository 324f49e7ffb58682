use serde::{Serialize, de::DeserializeOwned};

use crate::SimekStorageError;

mod cbor;
pub use cbor::*;

mod json;
pub use json::*;

/// An [Encoder] converts snapshots to and from the bytes held by a
/// [crate::SnapshotBackend]
pub trait Encoder: Clone + Send + Sync + 'static {
    /// Encode a serializable snapshot into bytes
    fn encode<T>(&self, snapshot: &T) -> Result<Vec<u8>, SimekStorageError>
    where
        T: Serialize;

    /// Decode bytes into some deserializable snapshot
    fn decode<T>(&self, bytes: &[u8]) -> Result<T, SimekStorageError>
    where
        T: DeserializeOwned;
}
