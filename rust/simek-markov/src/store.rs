use rand::Rng;
use simek_common::SharedCell;
use simek_storage::{Encoder, Persister, SaveRequest, SimekStorageError};

use crate::{MarkovError, TableStats, TrigramTable, build_counts, walk};

/// The resident trigram table together with the persister that keeps its
/// snapshot on disk current.
pub struct TrigramStore<E>
where
    E: Encoder,
{
    table: SharedCell<TrigramTable>,
    persister: Persister<E>,
}

impl<E> TrigramStore<E>
where
    E: Encoder,
{
    /// Load the table from the persister's target. A missing snapshot starts
    /// an empty table, and so does one that cannot be read or decoded.
    pub async fn open(persister: Persister<E>) -> Result<Self, MarkovError> {
        let table = match persister.load::<TrigramTable>().await {
            Ok(Some(table)) => {
                tracing::debug!(
                    "Loaded {} trigram keys from {}",
                    table.len(),
                    persister.target()
                );
                table
            }
            Ok(None) => {
                tracing::debug!(
                    "No trigram snapshot at {}, starting empty",
                    persister.target()
                );
                TrigramTable::default()
            }
            Err(SimekStorageError::Lane(error)) => return Err(error.into()),
            Err(error) => {
                tracing::warn!(
                    "Unable to load trigram snapshot from {}, starting empty: {error}",
                    persister.target()
                );
                TrigramTable::default()
            }
        };

        Ok(Self::with_table(table, persister))
    }

    pub fn with_table(table: TrigramTable, persister: Persister<E>) -> Self {
        Self {
            table: SharedCell::new(table),
            persister,
        }
    }

    /// Learn from `messages`, then produce up to `max_words` words of text.
    /// Returns [crate::NOT_ENOUGH_DATA] while nothing has been learned.
    pub fn generate<S>(&self, messages: &[S], max_words: usize) -> String
    where
        S: AsRef<str>,
    {
        self.generate_with(messages, max_words, &mut rand::thread_rng())
    }

    pub fn generate_with<S, R>(&self, messages: &[S], max_words: usize, rng: &mut R) -> String
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        self.learn(messages);
        walk(&self.table.read(), max_words, rng)
    }

    /// Fold the trigrams of `messages` into the table and request a save of
    /// the result.
    ///
    /// The save is requested while the table is still locked, so snapshots
    /// reach the backend in the order they were taken.
    pub fn learn<S>(&self, messages: &[S]) -> Option<SaveRequest>
    where
        S: AsRef<str>,
    {
        let delta = build_counts(messages);
        if delta.is_empty() {
            return None;
        }

        let mut table = self.table.write();
        table.merge(delta);
        Some(self.persister.request_save(table.clone()))
    }

    pub fn snapshot(&self) -> TrigramTable {
        self.table.read().clone()
    }

    pub fn stats(&self, top: usize) -> TableStats {
        TableStats::collect(&self.table.read(), top)
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Write the current table and wait until it is durable
    pub async fn flush(&self) -> Result<(), MarkovError> {
        Ok(self.persister.save(self.snapshot()).await?)
    }
}

impl<E> std::fmt::Debug for TrigramStore<E>
where
    E: Encoder,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrigramStore")
            .field("keys", &self.len())
            .field("persister", &self.persister)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use simek_storage::{
        CborEncoder, Encoder, JsonEncoder, MeasuredSnapshotBackend, MemorySnapshotBackend,
        PersistencePool, SnapshotBackend, make_target_backend,
    };

    use super::*;
    use crate::{NOT_ENOUGH_DATA, TrigramKey};

    /// Keeps every snapshot written to it, oldest first
    #[derive(Default)]
    struct RecordingBackend {
        writes: std::sync::Mutex<Vec<Vec<u8>>>,
    }

    impl SnapshotBackend for RecordingBackend {
        fn target(&self) -> &str {
            "recording"
        }

        fn read(&self) -> Result<Option<Vec<u8>>, SimekStorageError> {
            Ok(self.writes.lock().unwrap().last().cloned())
        }

        fn write(&self, bytes: &[u8]) -> Result<(), SimekStorageError> {
            self.writes.lock().unwrap().push(bytes.to_vec());
            Ok(())
        }
    }

    #[tokio::test]
    async fn it_needs_data_before_generating() -> Result<()> {
        let pool = PersistencePool::new("io")?;
        let store = TrigramStore::open(
            pool.persister(Arc::new(MemorySnapshotBackend::new("markov")), CborEncoder),
        )
        .await?;

        assert_eq!(store.generate(&["hi"], 20), NOT_ENOUGH_DATA);
        assert!(store.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn it_learns_from_every_request() -> Result<()> {
        let pool = PersistencePool::new("io")?;
        let store = TrigramStore::open(
            pool.persister(Arc::new(MemorySnapshotBackend::new("markov")), CborEncoder),
        )
        .await?;
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let text = store.generate_with(&["jedna dva tři"], 20, &mut rng);
        store.generate_with(&["jedna dva čtyři"], 20, &mut rng);

        assert_eq!(text, "jedna dva tři");
        let snapshot = store.snapshot();
        let key = TrigramKey::new("jedna", "dva");
        assert_eq!(snapshot.count(&key, "tři"), 1);
        assert_eq!(snapshot.count(&key, "čtyři"), 1);
        Ok(())
    }

    #[tokio::test]
    async fn it_restores_the_table_from_disk() -> Result<()> {
        let (backend, _tempdir) = make_target_backend("markov_trigram.cbor")?;
        let backend = Arc::new(backend);

        let written = {
            let pool = PersistencePool::new("io")?;
            let store = TrigramStore::open(pool.persister(backend.clone(), CborEncoder)).await?;
            store.generate(&["Ahoj krásný světe, jak se máš?", "dobře, světe"], 10);
            store.flush().await?;
            store.snapshot()
        };

        let pool = PersistencePool::new("io")?;
        let restored = TrigramStore::open(pool.persister(backend, CborEncoder)).await?;

        assert!(!written.is_empty());
        assert_eq!(restored.snapshot(), written);
        Ok(())
    }

    #[tokio::test]
    async fn it_reads_the_snapshot_once_when_opening() -> Result<()> {
        let backend = Arc::new(MeasuredSnapshotBackend::new(MemorySnapshotBackend::new(
            "markov",
        )));
        let pool = PersistencePool::new("io")?;

        let store = TrigramStore::open(pool.persister(backend.clone(), CborEncoder)).await?;
        store.generate(&["jedna dva tři"], 10);
        store.flush().await?;

        assert_eq!(backend.reads(), 1);
        assert!(backend.writes() >= 1);
        Ok(())
    }

    #[tokio::test]
    async fn it_starts_empty_from_a_corrupt_snapshot() -> Result<()> {
        let backend = MemorySnapshotBackend::new("corrupt");
        backend.write(b"definitely not json")?;
        let pool = PersistencePool::new("io")?;

        let store = TrigramStore::open(pool.persister(Arc::new(backend), JsonEncoder)).await?;

        assert!(store.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn it_keeps_the_snapshot_whole_under_concurrent_requests() -> Result<()> {
        let (backend, _tempdir) = make_target_backend("markov_trigram.json")?;
        let backend = Arc::new(backend);
        let pool = PersistencePool::new("io")?;
        let store = Arc::new(
            TrigramStore::open(pool.persister(backend.clone(), JsonEncoder)).await?,
        );

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                store.learn(&[format!("slovo{i} a pak další slovo{i} znovu")]);
            }));
        }
        for handle in handles {
            handle.join().map_err(|_| anyhow::anyhow!("learner panicked"))?;
        }
        store.flush().await?;

        let restored: Option<TrigramTable> = pool.persister(backend, JsonEncoder).load().await?;
        assert_eq!(restored, Some(store.snapshot()));
        Ok(())
    }

    #[tokio::test]
    async fn it_never_writes_an_older_snapshot_after_a_newer_one() -> Result<()> {
        let backend = Arc::new(RecordingBackend::default());
        let pool = PersistencePool::new("io")?;
        let store = Arc::new(TrigramStore::open(pool.persister(backend.clone(), JsonEncoder)).await?);

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                for round in 0..8 {
                    store.learn(&[format!("slovo{i} kolo{round} a pak další")]);
                }
            }));
        }
        for handle in handles {
            handle.join().map_err(|_| anyhow::anyhow!("learner panicked"))?;
        }
        store.flush().await?;

        let totals = backend
            .writes
            .lock()
            .unwrap()
            .iter()
            .map(|bytes| -> Result<u64> {
                let table: TrigramTable = JsonEncoder.decode(bytes)?;
                Ok(TableStats::collect(&table, 0).total_transitions)
            })
            .collect::<Result<Vec<u64>>>()?;

        assert!(totals.len() >= 2);
        assert!(totals.windows(2).all(|pair| pair[0] <= pair[1]), "{totals:?}");
        assert_eq!(totals.last().copied(), Some(store.stats(0).total_transitions));
        Ok(())
    }
}
