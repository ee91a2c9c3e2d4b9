use std::{
    hash::Hash,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use smol::Timer;
use spin_sleep::sleep;

use super::{BoxedTraversal, Expand, ExpandAsync, Traverse, TraverseAsync, VisitedSet};
use crate::pacing::{ConfigError, DelayRange, Pacer, RandomPacer};

/// Waits a paced interval before every expansion, then hands the call to the
/// wrapped expander unchanged.
///
/// The expander recurses through this wrapper, so the delay is paid once per
/// node, including the root at depth 0.
pub struct PacedTraversal<X, P = RandomPacer> {
    expander: X,
    pacer: Mutex<P>,
}

impl<X, P: Pacer> PacedTraversal<X, P> {
    pub fn new(expander: X, pacer: P) -> Self {
        Self {
            expander,
            pacer: Mutex::new(pacer),
        }
    }

    pub fn expander(&self) -> &X {
        &self.expander
    }

    /// Delay owed before expanding `node`, `None` if it was already visited.
    fn gate<N: Eq + Hash>(&self, node: &N, visited: &VisitedSet<N>) -> Option<Duration> {
        if visited.contains(node) {
            return None;
        }
        let mut pacer = self.pacer.lock().unwrap_or_else(PoisonError::into_inner);
        Some(pacer.next_delay())
    }
}

impl<X> PacedTraversal<X, RandomPacer> {
    /// Uniform delays in `[min, max]` seconds. Fails before any traversal if `min > max`.
    pub fn with_bounds(expander: X, min: f64, max: f64) -> Result<Self, ConfigError> {
        let range = DelayRange::new(min, max)?;
        Ok(Self::new(expander, RandomPacer::from_entropy(range)))
    }
}

impl<N, X, P> Traverse<N> for PacedTraversal<X, P>
where
    N: Eq + Hash,
    X: Expand<N>,
    P: Pacer,
{
    type Item = X::Item;
    type Error = X::Error;

    fn traverse(
        &self,
        node: &N,
        visited: &VisitedSet<N>,
        depth: usize,
    ) -> Result<Vec<Self::Item>, Self::Error> {
        if let Some(delay) = self.gate(node, visited) {
            sleep(delay);
        }
        self.expander.expand(self, node, visited, depth)
    }
}

impl<N, X, P> TraverseAsync<N> for PacedTraversal<X, P>
where
    N: Eq + Hash,
    X: ExpandAsync<N>,
    P: Pacer,
{
    type Session = X::Session;

    fn traverse_async<'a>(
        &'a self,
        node: &'a N,
        visited: &'a VisitedSet<N>,
        session: &'a Self::Session,
        depth: usize,
    ) -> BoxedTraversal<'a, Self::Item, Self::Error> {
        Box::pin(async move {
            if let Some(delay) = self.gate(node, visited) {
                Timer::after(delay).await;
            }
            self.expander
                .expand_async(self, node, visited, session, depth)
                .await
        })
    }
}
