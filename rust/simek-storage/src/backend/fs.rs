use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use super::SnapshotBackend;
use crate::SimekStorageError;

/// A file-system-based [SnapshotBackend]. The snapshot lives in a single file;
/// every write goes to a temporary sibling file that is then atomically
/// renamed over the target, so readers only ever observe a complete snapshot.
#[derive(Clone, Debug)]
pub struct FileSystemSnapshotBackend {
    path: PathBuf,
    target: String,
}

impl FileSystemSnapshotBackend {
    /// Creates a new [`FileSystemSnapshotBackend`] that keeps its snapshot at
    /// `path`. Missing parent directories are created on first write.
    pub fn new<Pathlike>(path: Pathlike) -> Self
    where
        Pathlike: AsRef<Path>,
    {
        let path = path.as_ref().to_owned();
        let target = path.display().to_string();
        Self { path, target }
    }

    /// The location of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl SnapshotBackend for FileSystemSnapshotBackend {
    fn target(&self) -> &str {
        &self.target
    }

    fn read(&self) -> Result<Option<Vec<u8>>, SimekStorageError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<(), SimekStorageError> {
        let parent_dir = self.parent_dir();
        std::fs::create_dir_all(parent_dir)?;

        let mut file = NamedTempFile::new_in(parent_dir)?;
        file.write_all(bytes)?;
        file.as_file().sync_all()?;
        file.persist(&self.path)
            .map_err(|error| SimekStorageError::StorageBackend(format!("{}", error.error)))?;

        Ok(())
    }
}
