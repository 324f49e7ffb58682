#![warn(missing_docs)]

//! This crate persists resident in-memory state as whole snapshots.
//!
//! A snapshot is written by first selecting an [Encoder] and a
//! [SnapshotBackend], then obtaining a [Persister] for that backend from a
//! [PersistencePool]. The pool owns a dedicated I/O [simek_common::Lane], so
//! requesting a save never blocks the caller:
//!
//! ```rust
//! use std::sync::Arc;
//! use simek_storage::{CborEncoder, MemorySnapshotBackend, PersistencePool, SaveRequest};
//!
//! # fn main() -> Result<(), simek_storage::SimekStorageError> {
//! let pool = PersistencePool::new("io")?;
//! let backend = Arc::new(MemorySnapshotBackend::new("counts"));
//! let persister = pool.persister(backend, CborEncoder);
//!
//! assert_eq!(persister.request_save(vec![1u64, 2, 3]), SaveRequest::Scheduled);
//! # Ok(())
//! # }
//! ```
//!
//! While a save for a target is pending, further requests for the same target
//! are skipped rather than queued. The caller still holds the latest state, so
//! the next successful save includes everything that was skipped.

mod encoder;
pub use encoder::*;

mod error;
pub use error::*;

mod backend;
pub use backend::*;

mod persister;
pub use persister::*;

#[cfg(any(test, feature = "helpers"))]
mod helpers;
#[cfg(any(test, feature = "helpers"))]
pub use helpers::*;
