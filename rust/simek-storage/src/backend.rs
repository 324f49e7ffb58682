use std::sync::Arc;

use crate::SimekStorageError;

mod fs;
pub use fs::*;

mod memory;
pub use memory::*;

#[cfg(any(test, feature = "helpers"))]
mod measure;
#[cfg(any(test, feature = "helpers"))]
pub use measure::*;

/// A [SnapshotBackend] is a facade over a single named resource that holds
/// one complete snapshot. Writes replace the resource wholesale.
///
/// Backends are driven from the I/O lane, so their methods are blocking.
pub trait SnapshotBackend: Send + Sync {
    /// A stable identifier of the underlying resource. Two backends with the
    /// same target share a save guard.
    fn target(&self) -> &str;

    /// Read the stored snapshot, or `None` if nothing has been stored yet
    fn read(&self) -> Result<Option<Vec<u8>>, SimekStorageError>;

    /// Replace the stored snapshot with the given bytes
    fn write(&self, bytes: &[u8]) -> Result<(), SimekStorageError>;
}

impl<T> SnapshotBackend for Arc<T>
where
    T: SnapshotBackend + ?Sized,
{
    fn target(&self) -> &str {
        self.as_ref().target()
    }

    fn read(&self) -> Result<Option<Vec<u8>>, SimekStorageError> {
        self.as_ref().read()
    }

    fn write(&self, bytes: &[u8]) -> Result<(), SimekStorageError> {
        self.as_ref().write(bytes)
    }
}
