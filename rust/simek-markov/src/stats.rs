use std::{collections::BTreeMap, fmt};

use crate::{TrigramKey, TrigramTable};

/// A summary of what a [TrigramTable] has learned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStats {
    pub total_keys: usize,
    /// Sum of all counts
    pub total_transitions: u64,
    /// Distinct words seen as a successor of any pair
    pub unique_successors: usize,
    pub average_transitions_per_key: f64,
    /// Word pairs with the most transitions, most frequent first
    pub top_keys: Vec<(TrigramKey, u64)>,
    /// Successor words with the highest total count, most frequent first
    pub top_successors: Vec<(String, u64)>,
}

impl TableStats {
    /// Summarize `table`, keeping the `top` most frequent keys and successors.
    /// Ties are listed in table order.
    pub fn collect(table: &TrigramTable, top: usize) -> Self {
        let mut successor_counts: BTreeMap<&str, u64> = BTreeMap::new();
        let mut key_counts: Vec<(&TrigramKey, u64)> = Vec::with_capacity(table.len());

        for (key, successors) in table.iter() {
            let mut key_total = 0u64;
            for (word, count) in successors {
                key_total = key_total.saturating_add(*count);
                let slot = successor_counts.entry(word.as_str()).or_default();
                *slot = slot.saturating_add(*count);
            }
            key_counts.push((key, key_total));
        }

        let total_transitions = key_counts
            .iter()
            .fold(0u64, |total, (_, count)| total.saturating_add(*count));
        let average_transitions_per_key = if key_counts.is_empty() {
            0.0
        } else {
            total_transitions as f64 / key_counts.len() as f64
        };

        key_counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        let mut successors: Vec<(&str, u64)> = successor_counts.into_iter().collect();
        let unique_successors = successors.len();
        successors.sort_by_key(|(_, count)| std::cmp::Reverse(*count));

        Self {
            total_keys: table.len(),
            total_transitions,
            unique_successors,
            average_transitions_per_key,
            top_keys: key_counts
                .into_iter()
                .take(top)
                .map(|(key, count)| (key.clone(), count))
                .collect(),
            top_successors: successors
                .into_iter()
                .take(top)
                .map(|(word, count)| (word.to_owned(), count))
                .collect(),
        }
    }
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_keys == 0 {
            return writeln!(f, "Empty markov model.");
        }

        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "MARKOV TRIGRAM STATISTICS")?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "Total bigram keys:        {}", self.total_keys)?;
        writeln!(f, "Total transitions:        {}", self.total_transitions)?;
        writeln!(f, "Unique next words:        {}", self.unique_successors)?;
        writeln!(
            f,
            "Avg transitions per key:  {:.2}",
            self.average_transitions_per_key
        )?;
        writeln!(f)?;
        writeln!(f, "Top {} most common bigram keys:", self.top_keys.len())?;
        for (rank, (key, count)) in self.top_keys.iter().enumerate() {
            writeln!(
                f,
                "  {:2}. {:?} {:?} -> {count} transitions",
                rank + 1,
                key.first(),
                key.second()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Top {} most common next words:", self.top_successors.len())?;
        for (rank, (word, count)) in self.top_successors.iter().enumerate() {
            writeln!(f, "  {:2}. {word:?} -> {count} occurrences", rank + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::build_counts;

    #[test]
    fn it_summarizes_a_table() {
        let table = build_counts(&["a b c a b c a b d"]);

        let stats = TableStats::collect(&table, 2);

        assert_eq!(stats.total_keys, 3);
        assert_eq!(stats.total_transitions, 7);
        assert_eq!(stats.unique_successors, 4);
        assert!((stats.average_transitions_per_key - 7.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(stats.top_keys, vec![(TrigramKey::new("a", "b"), 3), (TrigramKey::new("b", "c"), 2)]);
        assert_eq!(stats.top_successors[0], ("a".to_string(), 2));
        assert_eq!(stats.top_successors.len(), 2);
    }

    #[test]
    fn it_describes_an_empty_table() {
        let stats = TableStats::collect(&TrigramTable::default(), 10);

        assert_eq!(stats, TableStats::default());
        assert_eq!(stats.to_string(), "Empty markov model.\n");
    }
}
