use anyhow::Result;

use crate::FileSystemSnapshotBackend;

/// Creates a [`FileSystemSnapshotBackend`] inside a fresh temporary
/// directory, for use in tests. The directory is removed when the returned
/// [`tempfile::TempDir`] is dropped.
pub fn make_target_backend(name: &str) -> Result<(FileSystemSnapshotBackend, tempfile::TempDir)> {
    let root = tempfile::tempdir()?;
    let backend = FileSystemSnapshotBackend::new(root.path().join(name));
    Ok((backend, root))
}
