//! Processed-file bookkeeping shared by the poll loop and the watcher.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Names of files that produced a report since the last full scan.
///
/// Clones share the same set. Bookkeeping only: a full scan reprocesses
/// every file regardless of its contents.
#[derive(Debug, Clone, Default)]
pub struct ProcessedFiles {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl ProcessedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // The set stays consistent even if a holder panicked.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a file name. Returns `false` if it was already present.
    pub fn insert(&self, name: impl Into<String>) -> bool {
        self.lock().insert(name.into())
    }

    /// Forget a file name. Returns `true` if it was present.
    pub fn remove(&self, name: &str) -> bool {
        self.lock().remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sorted copy of the recorded names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().iter().cloned().collect();
        names.sort();
        names
    }
}
