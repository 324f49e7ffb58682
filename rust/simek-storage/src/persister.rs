use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use serde::{Serialize, de::DeserializeOwned};
use simek_common::Lane;
use tokio::sync::Semaphore;

use crate::{Encoder, SimekStorageError, SnapshotBackend};

/// How many saves may wait on the I/O lane at once, across all targets
pub const DEFAULT_IO_CAPACITY: usize = 64;

/// The outcome of [Persister::request_save]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveRequest {
    /// The snapshot was handed to the I/O lane
    Scheduled,
    /// A save for the same target was still pending, so this one was dropped
    Skipped,
}

/// A [PersistencePool] owns the I/O lane that all snapshot reads and writes
/// run on, along with one save guard (a binary semaphore) per target.
#[derive(Clone, Debug)]
pub struct PersistencePool {
    lane: Lane,
    guards: Arc<Mutex<HashMap<String, Arc<Semaphore>>>>,
}

impl PersistencePool {
    /// Start a pool with its own I/O lane named `name`
    pub fn new(name: &str) -> Result<Self, SimekStorageError> {
        Ok(Self::with_lane(Lane::new(name, DEFAULT_IO_CAPACITY)?))
    }

    /// Build a pool on top of an existing lane
    pub fn with_lane(lane: Lane) -> Self {
        Self {
            lane,
            guards: Arc::default(),
        }
    }

    /// Produce a [Persister] for the given backend. Persisters for backends
    /// that report the same [SnapshotBackend::target] share one save guard.
    pub fn persister<Backend, E>(&self, backend: Arc<Backend>, encoder: E) -> Persister<E>
    where
        Backend: SnapshotBackend + 'static,
        E: Encoder,
    {
        let guard = self
            .guards
            .lock()
            .entry(backend.target().to_owned())
            .or_insert_with(|| Arc::new(Semaphore::new(1)))
            .clone();

        Persister {
            backend,
            encoder,
            lane: self.lane.clone(),
            guard,
        }
    }
}

/// Saves and loads snapshots of one target through the pool's I/O lane.
#[derive(Clone)]
pub struct Persister<E>
where
    E: Encoder,
{
    backend: Arc<dyn SnapshotBackend>,
    encoder: E,
    lane: Lane,
    guard: Arc<Semaphore>,
}

impl<E> Persister<E>
where
    E: Encoder,
{
    /// The target this persister writes to
    pub fn target(&self) -> &str {
        self.backend.target()
    }

    /// Ask for `snapshot` to be written in the background and return
    /// immediately. If a save for this target is still pending the request is
    /// dropped. Failures of the background write are logged, never returned.
    pub fn request_save<T>(&self, snapshot: T) -> SaveRequest
    where
        T: Serialize + Send + 'static,
    {
        let Ok(permit) = self.guard.clone().try_acquire_owned() else {
            tracing::debug!("Save to {} already pending, skipping", self.target());
            return SaveRequest::Skipped;
        };

        let backend = self.backend.clone();
        let encoder = self.encoder.clone();
        let scheduled = self.lane.spawn_detached(move || {
            let _permit = permit;
            match write_snapshot(backend.as_ref(), &encoder, &snapshot) {
                Ok(()) => tracing::debug!("Saved snapshot to {}", backend.target()),
                Err(error) => {
                    tracing::warn!("Failed to save snapshot to {}: {error}", backend.target())
                }
            }
        });

        if scheduled {
            SaveRequest::Scheduled
        } else {
            SaveRequest::Skipped
        }
    }

    /// Write `snapshot` and wait until it is durable. Unlike
    /// [Persister::request_save] this waits for any pending save of the same
    /// target instead of being skipped, which makes it suitable for a final
    /// flush.
    pub async fn save<T>(&self, snapshot: T) -> Result<(), SimekStorageError>
    where
        T: Serialize + Send + 'static,
    {
        let permit = self
            .guard
            .clone()
            .acquire_owned()
            .await
            .map_err(|error| SimekStorageError::StorageBackend(format!("{error}")))?;

        let backend = self.backend.clone();
        let encoder = self.encoder.clone();
        self.lane
            .run(move || {
                let _permit = permit;
                write_snapshot(backend.as_ref(), &encoder, &snapshot)
            })
            .await?
    }

    /// Read and decode the stored snapshot, if there is one
    pub async fn load<T>(&self) -> Result<Option<T>, SimekStorageError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let backend = self.backend.clone();
        let encoder = self.encoder.clone();
        self.lane
            .run(move || match backend.read()? {
                Some(bytes) => encoder.decode(&bytes).map(Some),
                None => Ok(None),
            })
            .await?
    }
}

impl<E> std::fmt::Debug for Persister<E>
where
    E: Encoder,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persister")
            .field("target", &self.target())
            .field("lane", &self.lane)
            .finish()
    }
}

fn write_snapshot<T, E>(
    backend: &dyn SnapshotBackend,
    encoder: &E,
    snapshot: &T,
) -> Result<(), SimekStorageError>
where
    T: Serialize,
    E: Encoder,
{
    let bytes = encoder.encode(snapshot)?;
    backend.write(&bytes)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, mpsc};

    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        CborEncoder, JsonEncoder, MeasuredSnapshotBackend, MemorySnapshotBackend,
        make_target_backend,
    };

    /// Holds every write until the test releases it
    struct GatedBackend {
        inner: MemorySnapshotBackend,
        gate: std::sync::Mutex<mpsc::Receiver<()>>,
    }

    impl SnapshotBackend for GatedBackend {
        fn target(&self) -> &str {
            self.inner.target()
        }

        fn read(&self) -> Result<Option<Vec<u8>>, SimekStorageError> {
            self.inner.read()
        }

        fn write(&self, bytes: &[u8]) -> Result<(), SimekStorageError> {
            let _ = self.gate.lock().unwrap().recv();
            self.inner.write(bytes)
        }
    }

    struct FailingBackend;

    impl SnapshotBackend for FailingBackend {
        fn target(&self) -> &str {
            "failing"
        }

        fn read(&self) -> Result<Option<Vec<u8>>, SimekStorageError> {
            Ok(None)
        }

        fn write(&self, _bytes: &[u8]) -> Result<(), SimekStorageError> {
            Err(SimekStorageError::StorageBackend("disk full".into()))
        }
    }

    #[tokio::test]
    async fn it_loads_nothing_from_an_empty_target() -> Result<()> {
        let pool = PersistencePool::new("io")?;
        let persister = pool.persister(Arc::new(MemorySnapshotBackend::new("empty")), CborEncoder);

        let loaded: Option<Vec<String>> = persister.load().await?;
        assert_eq!(loaded, None);
        Ok(())
    }

    #[tokio::test]
    async fn it_loads_what_was_saved_to_the_file_system() -> Result<()> {
        let (backend, _tempdir) = make_target_backend("snapshot.json")?;
        let pool = PersistencePool::new("io")?;
        let persister = pool.persister(Arc::new(backend), JsonEncoder);

        persister.save(vec!["jedna".to_string(), "dva".to_string()]).await?;

        let loaded: Option<Vec<String>> = persister.load().await?;
        assert_eq!(loaded, Some(vec!["jedna".to_string(), "dva".to_string()]));
        Ok(())
    }

    #[tokio::test]
    async fn it_completes_a_requested_save_in_the_background() -> Result<()> {
        let backend = Arc::new(MeasuredSnapshotBackend::new(MemorySnapshotBackend::new(
            "background",
        )));
        let pool = PersistencePool::new("io")?;
        let persister = pool.persister(backend.clone(), CborEncoder);

        assert_eq!(persister.request_save(vec![1u64, 2, 3]), SaveRequest::Scheduled);

        // Waits behind the requested save on the same lane
        let loaded: Option<Vec<u64>> = persister.load().await?;
        assert_eq!(loaded, Some(vec![1, 2, 3]));
        assert_eq!(backend.writes(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn it_skips_requests_while_a_save_is_pending() -> Result<()> {
        let (release, gate) = mpsc::channel();
        let inner = MemorySnapshotBackend::new("gated");
        let backend = Arc::new(GatedBackend {
            inner: inner.clone(),
            gate: std::sync::Mutex::new(gate),
        });
        let pool = PersistencePool::new("io")?;
        let persister = pool.persister(backend, CborEncoder);

        assert_eq!(persister.request_save(vec![0u64]), SaveRequest::Scheduled);
        for i in 1..10u64 {
            assert_eq!(persister.request_save(vec![i]), SaveRequest::Skipped);
        }

        release.send(())?;
        let loaded: Option<Vec<u64>> = persister.load().await?;
        assert_eq!(loaded, Some(vec![0]));

        // The guard is free again once the pending save completed
        assert_eq!(persister.request_save(vec![42u64]), SaveRequest::Scheduled);
        release.send(())?;
        let loaded: Option<Vec<u64>> = persister.load().await?;
        assert_eq!(loaded, Some(vec![42]));
        Ok(())
    }

    #[tokio::test]
    async fn it_shares_the_guard_between_persisters_of_one_target() -> Result<()> {
        let (release, gate) = mpsc::channel();
        let backend = Arc::new(GatedBackend {
            inner: MemorySnapshotBackend::new("shared"),
            gate: std::sync::Mutex::new(gate),
        });
        let pool = PersistencePool::new("io")?;
        let first = pool.persister(backend.clone(), CborEncoder);
        let second = pool.persister(backend, CborEncoder);

        assert_eq!(first.request_save(1u64), SaveRequest::Scheduled);
        assert_eq!(second.request_save(2u64), SaveRequest::Skipped);

        release.send(())?;
        let loaded: Option<u64> = second.load().await?;
        assert_eq!(loaded, Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn it_never_interleaves_overlapping_saves() -> Result<()> {
        let (backend, _tempdir) = make_target_backend("overlap.cbor")?;
        let pool = PersistencePool::new("io")?;
        let persister = pool.persister(Arc::new(backend), CborEncoder);

        let snapshots: Vec<Vec<String>> = (0..8)
            .map(|i| (0..200).map(|j| format!("{i}-{j}")).collect())
            .collect();

        let mut handles = Vec::new();
        for snapshot in snapshots.clone() {
            let persister = persister.clone();
            handles.push(tokio::spawn(async move {
                if persister.request_save(snapshot.clone()) == SaveRequest::Skipped {
                    persister.save(snapshot).await
                } else {
                    Ok(())
                }
            }));
        }
        for handle in handles {
            handle.await??;
        }

        let loaded: Vec<String> = persister.load().await?.unwrap_or_default();
        assert!(snapshots.contains(&loaded));
        Ok(())
    }

    #[tokio::test]
    async fn it_releases_the_guard_after_a_failed_save() -> Result<()> {
        let pool = PersistencePool::new("io")?;
        let persister = pool.persister(Arc::new(FailingBackend), CborEncoder);

        assert_eq!(persister.request_save(1u64), SaveRequest::Scheduled);
        assert!(persister.save(2u64).await.is_err());
        assert_eq!(persister.request_save(3u64), SaveRequest::Scheduled);
        Ok(())
    }
}
