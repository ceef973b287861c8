//! A module for routing diagnostics from the lexical phase to whoever is interested in them.

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

/// Represents a trait responsible for handling diagnostics.
pub trait Handler<T> {
    /// Receives an error and handles it.
    fn receive(&self, error: T);
}

/// Is a struct that implements [`Handler`] trait by storing all errors in a vector.
#[derive(Debug)]
pub struct Storage<T: Send + Sync> {
    errors: RwLock<Vec<T>>,
}

impl<T: Send + Sync> Storage<T> {
    /// Creates a new empty [`Storage`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            errors: RwLock::new(Vec::new()),
        }
    }

    /// Consumes the [`Storage`] and returns the underlying vector of errors.
    pub fn into_vec(self) -> Vec<T> {
        self.errors
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a reference to the underlying vector of errors.
    pub fn as_vec(&self) -> RwLockReadGuard<Vec<T>> {
        self.errors.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Checks whether no diagnostic has been received so far.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.as_vec().is_empty() }
}

impl<T: Send + Sync> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send + Sync, U> Handler<U> for Storage<T>
where
    U: Into<T>,
{
    fn receive(&self, error: U) {
        self.errors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error.into());
    }
}

/// Is a struct that implements [`Handler`] trait by doing nothing with the errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _error: T) {}
}
