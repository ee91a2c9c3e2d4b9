/// Pacing decorator over a recursive expansion collaborator
mod paced;
pub use paced::PacedTraversal;

mod visited;
pub use visited::VisitedSet;

use std::{future::Future, pin::Pin};

/// Future returned by [`TraverseAsync::traverse_async`].
///
/// Boxed so an expander can recurse through it without an infinitely sized future.
pub type BoxedTraversal<'a, T, E> = Pin<Box<dyn Future<Output = Result<Vec<T>, E>> + 'a>>;

/// Re-entry point handed to an expander for each child it wants to visit.
pub trait Traverse<N> {
    type Item;
    type Error;

    fn traverse(
        &self,
        node: &N,
        visited: &VisitedSet<N>,
        depth: usize,
    ) -> Result<Vec<Self::Item>, Self::Error>;
}

pub trait TraverseAsync<N>: Traverse<N> {
    type Session;

    fn traverse_async<'a>(
        &'a self,
        node: &'a N,
        visited: &'a VisitedSet<N>,
        session: &'a Self::Session,
        depth: usize,
    ) -> BoxedTraversal<'a, Self::Item, Self::Error>;
}

/// Expands one node into its results, recursing into children through `recurse`.
///
/// Implementers own the visited-set discipline: a node already claimed in
/// `visited` must not be expanded again.
pub trait Expand<N> {
    type Item;
    type Error;

    fn expand<T>(
        &self,
        recurse: &T,
        node: &N,
        visited: &VisitedSet<N>,
        depth: usize,
    ) -> Result<Vec<Self::Item>, Self::Error>
    where
        T: Traverse<N, Item = Self::Item, Error = Self::Error>;
}

/// Suspending counterpart of [`Expand`].
#[allow(async_fn_in_trait)]
pub trait ExpandAsync<N>: Expand<N> {
    type Session;

    async fn expand_async<T>(
        &self,
        recurse: &T,
        node: &N,
        visited: &VisitedSet<N>,
        session: &Self::Session,
        depth: usize,
    ) -> Result<Vec<Self::Item>, Self::Error>
    where
        T: TraverseAsync<N, Item = Self::Item, Error = Self::Error, Session = Self::Session>;
}
