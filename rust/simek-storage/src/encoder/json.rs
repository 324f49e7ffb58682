use serde::{Serialize, de::DeserializeOwned};

use super::Encoder;
use crate::SimekStorageError;

/// An [`Encoder`] that writes pretty-printed JSON, for snapshots that are meant
/// to be inspected by hand
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode<T>(&self, snapshot: &T) -> Result<Vec<u8>, SimekStorageError>
    where
        T: Serialize,
    {
        serde_json::to_vec_pretty(snapshot)
            .map_err(|error| SimekStorageError::EncodeFailed(format!("{error}")))
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T, SimekStorageError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice::<T>(bytes)
            .map_err(|error| SimekStorageError::DecodeFailed(format!("{error}")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use crate::{CborEncoder, Encoder, JsonEncoder};

    fn snapshot() -> BTreeMap<String, Vec<u64>> {
        BTreeMap::from([
            ("ahoj".to_string(), vec![1, 2]),
            ("světe".to_string(), vec![3]),
        ])
    }

    #[test]
    fn it_decodes_what_it_encoded_as_json() -> Result<()> {
        let bytes = JsonEncoder.encode(&snapshot())?;
        let decoded: BTreeMap<String, Vec<u64>> = JsonEncoder.decode(&bytes)?;
        assert_eq!(decoded, snapshot());
        Ok(())
    }

    #[test]
    fn it_decodes_what_it_encoded_as_cbor() -> Result<()> {
        let bytes = CborEncoder.encode(&snapshot())?;
        let decoded: BTreeMap<String, Vec<u64>> = CborEncoder.decode(&bytes)?;
        assert_eq!(decoded, snapshot());
        Ok(())
    }

    #[test]
    fn it_reports_garbage_as_a_decode_failure() {
        let result: Result<Vec<u64>, _> = CborEncoder.decode(b"\xff\xff not cbor");
        assert!(matches!(
            result,
            Err(crate::SimekStorageError::DecodeFailed(_))
        ));
    }
}
