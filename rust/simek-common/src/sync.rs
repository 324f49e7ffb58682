//! Shared interior mutability for state that is owned by one lane but
//! observed from others.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared interior mutability cell.
///
/// Wraps a [`parking_lot::RwLock`], so a panicking writer never poisons the
/// value for the remaining readers.
///
/// # Example
/// ```
/// use simek_common::SharedCell;
///
/// let cell = SharedCell::new(42);
///
/// // Reading
/// {
///     let value = cell.read();
///     assert_eq!(*value, 42);
/// }
///
/// // Writing
/// {
///     let mut value = cell.write();
///     *value = 100;
/// }
///
/// assert_eq!(*cell.read(), 100);
/// ```
#[derive(Debug, Default)]
pub struct SharedCell<T>(RwLock<T>);

impl<T> SharedCell<T> {
    /// Creates a new SharedCell with the given value
    pub fn new(value: T) -> Self {
        Self(RwLock::new(value))
    }

    /// Acquires a read lock, blocking until it can be acquired
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    /// Acquires a write lock, blocking until it can be acquired
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }
}
