use std::collections::BTreeMap;

use rand::{
    Rng,
    distributions::{Distribution, WeightedIndex},
    seq::IteratorRandom,
};

use crate::{TrigramKey, TrigramTable};

/// Returned instead of generated text while the table is empty
pub const NOT_ENOUGH_DATA: &str = "Not enough data for trigram Markov chain.";

/// A generated word ending in one of these closes the sentence. Words are
/// lower-case, so the ":D" emoticon appears as ":d".
pub const TERMINAL_SUFFIXES: [&str; 8] = [".", "!", "?", ":d", ":)", "😂", "🤣", ":kekw:"];

pub fn is_terminal(word: &str) -> bool {
    TERMINAL_SUFFIXES.iter().any(|suffix| word.ends_with(suffix))
}

/// Walk `table` from a random word pair, picking each next word with
/// probability proportional to its count.
///
/// The walk stops after a terminal word, at a pair with no successors, or once
/// `max_words` words were produced. The starting pair is always included, so
/// the result has between 2 and `max(max_words, 2)` words.
pub fn walk<R>(table: &TrigramTable, max_words: usize, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let Some(mut key) = table.keys().choose(rng).cloned() else {
        return NOT_ENOUGH_DATA.to_owned();
    };

    let mut words = vec![key.first().to_owned(), key.second().to_owned()];
    for _ in 2..max_words {
        let Some(next) = table
            .successors(&key)
            .and_then(|successors| pick_successor(successors, rng))
        else {
            break;
        };

        words.push(next.to_owned());
        if is_terminal(next) {
            break;
        }
        key = TrigramKey::new(key.second(), next);
    }

    words.join(" ").to_lowercase()
}

fn pick_successor<'a, R>(successors: &'a BTreeMap<String, u64>, rng: &mut R) -> Option<&'a str>
where
    R: Rng + ?Sized,
{
    let weights = WeightedIndex::<u64>::new(successors.values()).ok()?;
    successors
        .keys()
        .nth(weights.sample(rng))
        .map(String::as_str)
}
