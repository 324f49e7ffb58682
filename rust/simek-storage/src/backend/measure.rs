use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use super::SnapshotBackend;
use crate::SimekStorageError;

/// A [MeasuredSnapshotBackend] acts as a proxy over a [SnapshotBackend]
/// implementation that measures reads and writes.
#[derive(Clone)]
pub struct MeasuredSnapshotBackend<Backend>
where
    Backend: SnapshotBackend,
{
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
    backend: Backend,
}

impl<Backend> MeasuredSnapshotBackend<Backend>
where
    Backend: SnapshotBackend,
{
    /// Wrap the provided [SnapshotBackend] so that reads and writes to it may
    /// be measured.
    pub fn new(backend: Backend) -> Self {
        Self {
            reads: Arc::new(AtomicUsize::default()),
            writes: Arc::new(AtomicUsize::default()),
            backend,
        }
    }

    /// The aggregate number of reads from the wrapped [SnapshotBackend]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    /// The aggregate number of writes to the wrapped [SnapshotBackend]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl<Backend> SnapshotBackend for MeasuredSnapshotBackend<Backend>
where
    Backend: SnapshotBackend,
{
    fn target(&self) -> &str {
        self.backend.target()
    }

    fn read(&self) -> Result<Option<Vec<u8>>, SimekStorageError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.backend.read()
    }

    fn write(&self, bytes: &[u8]) -> Result<(), SimekStorageError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.backend.write(bytes)
    }
}
