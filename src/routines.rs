use anyhow::{anyhow, Result};
use smol::future::{or, pending};
type ShutdownReceiver = smol::channel::Receiver<()>;

use crate::{
    graph::{CrawlError, CrawlSession, Page},
    traversal::{Traverse, TraverseAsync, VisitedSet},
};

/// Blocking crawl from `root`.
///
/// Every page waits out its delay on the calling thread.
pub fn crawl_loop<T>(traversal: &T, root: &str) -> Result<Vec<Page>, CrawlError>
where
    T: Traverse<String, Item = Page, Error = CrawlError>,
{
    let visited = VisitedSet::new();
    traversal.traverse(&root.to_string(), &visited, 0)
}

/// Cooperative crawl from `root`.
///
/// Sibling pages wait out their delays concurrently. A message on `shutdown`
/// abandons the crawl and resolves to an error.
pub async fn crawl_loop_async<T>(
    traversal: &T,
    root: &str,
    shutdown: ShutdownReceiver,
) -> Result<Vec<Page>>
where
    T: TraverseAsync<String, Item = Page, Error = CrawlError, Session = CrawlSession>,
{
    let root = root.to_string();
    let visited = VisitedSet::new();
    let session = CrawlSession::new();
    let crawl = async {
        traversal
            .traverse_async(&root, &visited, &session, 0)
            .await
            .map_err(anyhow::Error::from)
    };
    let cancelled = async {
        if shutdown.recv().await.is_err() {
            // no sender left, nobody can cancel
            pending::<()>().await;
        }
        Err::<Vec<Page>, _>(anyhow!("crawl cancelled"))
    };
    or(crawl, cancelled).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{GraphCrawler, LinkGraph},
        pacing::{DelayRange, RandomPacer},
        traversal::PacedTraversal,
    };

    fn traversal(min: f64, max: f64) -> PacedTraversal<GraphCrawler> {
        let graph = LinkGraph::parse("https://s/ https://s/a\nhttps://s/a\n");
        let crawler = GraphCrawler::new(graph, "https://s/");
        let range = DelayRange::new(min, max).unwrap();
        PacedTraversal::new(crawler, RandomPacer::seeded(range, 3))
    }

    #[test]
    fn test_crawl_loop() {
        let pages = crawl_loop(&traversal(0.0, 0.0), "https://s/").unwrap();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn test_dropped_shutdown_sender_does_not_cancel() {
        let (tx, rx) = smol::channel::bounded(1);
        drop(tx);
        let pages = smol::block_on(crawl_loop_async(
            &traversal(0.0, 0.0),
            "https://s/",
            rx,
        ))
        .unwrap();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn test_shutdown_cancels_pending_delay() {
        let (tx, rx) = smol::channel::bounded(1);
        tx.try_send(()).unwrap();
        let result = smol::block_on(crawl_loop_async(
            &traversal(30.0, 30.0),
            "https://s/",
            rx,
        ));
        assert_eq!(result.unwrap_err().to_string(), "crawl cancelled");
    }
}
