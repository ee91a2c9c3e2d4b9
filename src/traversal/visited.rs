use std::{
    borrow::Borrow,
    collections::HashSet,
    hash::Hash,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Nodes already processed in the current traversal.
///
/// Shared by reference between recursion levels, threads and concurrently
/// polled futures. The lock is never held across an await point.
#[derive(Debug)]
pub struct VisitedSet<N> {
    inner: Mutex<HashSet<N>>,
}

impl<N: Eq + Hash> VisitedSet<N> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashSet::new()),
        }
    }

    /// Claims `node`. Returns false if it was already visited.
    pub fn insert(&self, node: N) -> bool {
        self.guard().insert(node)
    }

    pub fn contains<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.guard().contains(node)
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    pub fn into_inner(self) -> HashSet<N> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn guard(&self) -> MutexGuard<'_, HashSet<N>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<N: Eq + Hash> Default for VisitedSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Eq + Hash> FromIterator<N> for VisitedSet<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            inner: Mutex::new(iter.into_iter().collect()),
        }
    }
}
