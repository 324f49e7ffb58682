use std::sync::Arc;

use parking_lot::RwLock;

use super::SnapshotBackend;
use crate::SimekStorageError;

/// A trivial implementation of [SnapshotBackend] where the snapshot is kept in
/// memory and never persisted. Clones share the same snapshot.
#[derive(Clone, Debug, Default)]
pub struct MemorySnapshotBackend {
    target: String,
    bytes: Arc<RwLock<Option<Vec<u8>>>>,
}

impl MemorySnapshotBackend {
    /// Creates an empty backend identified by `target`
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_owned(),
            bytes: Arc::default(),
        }
    }
}

impl SnapshotBackend for MemorySnapshotBackend {
    fn target(&self) -> &str {
        &self.target
    }

    fn read(&self) -> Result<Option<Vec<u8>>, SimekStorageError> {
        Ok(self.bytes.read().clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<(), SimekStorageError> {
        *self.bytes.write() = Some(bytes.to_vec());
        Ok(())
    }
}
