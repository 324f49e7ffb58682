use serde::{Serialize, de::DeserializeOwned};

use super::Encoder;
use crate::SimekStorageError;

/// A basic [`Encoder`] implementation that encodes data as IPLD-compatible CBOR
#[derive(Clone, Copy, Debug, Default)]
pub struct CborEncoder;

impl Encoder for CborEncoder {
    fn encode<T>(&self, snapshot: &T) -> Result<Vec<u8>, SimekStorageError>
    where
        T: Serialize,
    {
        serde_ipld_dagcbor::to_vec(snapshot)
            .map_err(|error| SimekStorageError::EncodeFailed(format!("{error}")))
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T, SimekStorageError>
    where
        T: DeserializeOwned,
    {
        serde_ipld_dagcbor::from_slice::<T>(bytes)
            .map_err(|error| SimekStorageError::DecodeFailed(format!("{error}")))
    }
}
