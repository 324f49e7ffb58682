use std::sync::Arc;

use simek_common::Lane;
use simek_storage::Encoder;

use crate::{MarkovError, TrigramStore};

/// Runs [TrigramStore::generate] on a [Lane], making the lane the only writer
/// of the table.
pub struct TrigramGenerator<E>
where
    E: Encoder,
{
    store: Arc<TrigramStore<E>>,
    lane: Lane,
}

impl<E> Clone for TrigramGenerator<E>
where
    E: Encoder,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            lane: self.lane.clone(),
        }
    }
}

impl<E> TrigramGenerator<E>
where
    E: Encoder,
{
    pub fn new(store: Arc<TrigramStore<E>>, lane: Lane) -> Self {
        Self { store, lane }
    }

    pub fn store(&self) -> &Arc<TrigramStore<E>> {
        &self.store
    }

    pub async fn generate(
        &self,
        messages: Vec<String>,
        max_words: usize,
    ) -> Result<String, MarkovError> {
        let store = self.store.clone();
        Ok(self
            .lane
            .run(move || store.generate(&messages, max_words))
            .await?)
    }
}
