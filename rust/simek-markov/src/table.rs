use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Two consecutive lower-case words
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrigramKey {
    first: String,
    second: String,
}

impl TrigramKey {
    pub fn new(first: &str, second: &str) -> Self {
        Self {
            first: first.to_owned(),
            second: second.to_owned(),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }
}

/// How often each word followed each pair of words.
///
/// Counts only ever grow. Both levels are ordered maps, so iterating a table
/// (and a seeded walk over it) is deterministic.
///
/// Encoded as a list of entries rather than a map, since snapshot formats
/// like CBOR expect string map keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TrigramEntry>", into = "Vec<TrigramEntry>")]
pub struct TrigramTable {
    transitions: BTreeMap<TrigramKey, BTreeMap<String, u64>>,
}

impl TrigramTable {
    /// Count one more occurrence of `successor` after `key`
    pub fn record(&mut self, key: TrigramKey, successor: &str) {
        self.add(key, successor, 1);
    }

    fn add(&mut self, key: TrigramKey, successor: &str, count: u64) {
        let successors = self.transitions.entry(key).or_default();
        match successors.get_mut(successor) {
            Some(existing) => *existing = existing.saturating_add(count),
            None => {
                successors.insert(successor.to_owned(), count);
            }
        }
    }

    /// Fold `delta` into this table; counts of shared transitions add up
    pub fn merge(&mut self, delta: TrigramTable) {
        for (key, successors) in delta.transitions {
            let existing = self.transitions.entry(key).or_default();
            for (word, count) in successors {
                let slot = existing.entry(word).or_default();
                *slot = slot.saturating_add(count);
            }
        }
    }

    pub fn successors(&self, key: &TrigramKey) -> Option<&BTreeMap<String, u64>> {
        self.transitions.get(key)
    }

    pub fn count(&self, key: &TrigramKey, successor: &str) -> u64 {
        self.successors(key)
            .and_then(|successors| successors.get(successor))
            .copied()
            .unwrap_or_default()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &TrigramKey> {
        self.transitions.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TrigramKey, &BTreeMap<String, u64>)> {
        self.transitions.iter()
    }

    /// The number of distinct word pairs
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// Count every `(w[i], w[i+1]) → w[i+2]` transition of the messages, read as
/// one lower-cased, whitespace-separated text. Fewer than three words yield
/// an empty table.
pub fn build_counts<S>(messages: &[S]) -> TrigramTable
where
    S: AsRef<str>,
{
    let text = messages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut table = TrigramTable::default();
    for window in words.windows(3) {
        table.record(TrigramKey::new(window[0], window[1]), window[2]);
    }
    table
}

#[derive(Serialize, Deserialize)]
struct TrigramEntry {
    first: String,
    second: String,
    successors: Vec<(String, u64)>,
}

impl From<TrigramTable> for Vec<TrigramEntry> {
    fn from(table: TrigramTable) -> Self {
        table
            .transitions
            .into_iter()
            .map(|(key, successors)| TrigramEntry {
                first: key.first,
                second: key.second,
                successors: successors.into_iter().collect(),
            })
            .collect()
    }
}

impl From<Vec<TrigramEntry>> for TrigramTable {
    fn from(entries: Vec<TrigramEntry>) -> Self {
        let mut table = TrigramTable::default();
        for entry in entries {
            let key = TrigramKey {
                first: entry.first,
                second: entry.second,
            };
            for (word, count) in entry.successors {
                table.add(key.clone(), &word, count);
            }
        }
        table
    }
}
