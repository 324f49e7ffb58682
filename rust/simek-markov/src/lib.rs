//! A word trigram model that learns from every request.
//!
//! Each call to [TrigramStore::generate] first counts the trigrams of the
//! messages it was given, folds them into the resident [TrigramTable] and asks
//! for the table to be saved in the background. Only then does it walk the
//! table to produce text, so the model grows with every use.
//!
//! The table lives in memory for the life of the process. Saves go through a
//! [simek_storage::Persister], which drops a save request while an earlier
//! one for the same file is still being written; the next request carries the
//! complete table again, so nothing is lost.

mod error;
pub use error::*;

mod table;
pub use table::*;

mod walk;
pub use walk::*;

mod stats;
pub use stats::*;

mod store;
pub use store::*;

mod generator;
pub use generator::*;
