//! In-memory link graph and a depth-limited recursive crawler over it.
use std::{collections::HashMap, fmt, fs, path::Path};

use futures::future::try_join_all;
use log::{debug, warn};
use thiserror::Error;

use crate::traversal::{Expand, ExpandAsync, Traverse, TraverseAsync, VisitedSet};

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Page {0} is unreachable")]
    Unreachable(String),
    #[error("IO Error: {0}")]
    IOErr(#[from] std::io::Error),
}

/// Outgoing links per page.
///
/// Text form is one page per line, `<url> <link> <link>...`. Blank lines and
/// lines starting with `#` are skipped.
#[derive(Debug, Default, Clone)]
pub struct LinkGraph {
    links: HashMap<String, Vec<String>>,
}

impl LinkGraph {
    pub fn parse(text: &str) -> Self {
        let mut links = HashMap::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace().map(str::to_string);
            if let Some(url) = fields.next() {
                links
                    .entry(url)
                    .or_insert_with(Vec::new)
                    .extend(fields);
            }
        }
        Self { links }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CrawlError> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    pub fn links(&self, url: &str) -> Option<&[String]> {
        self.links.get(url).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub depth: usize,
    pub links: Vec<String>,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{} links", self.depth, self.url, self.links.len())
    }
}

/// Per-crawl state shared by concurrently expanded siblings.
///
/// A child is scheduled by the first sibling that links to it, so only one
/// recursion (and one delay) is spent on it.
#[derive(Debug, Default)]
pub struct CrawlSession {
    scheduled: VisitedSet<String>,
}

impl CrawlSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn schedule(&self, url: &str) -> bool {
        self.scheduled.insert(url.to_string())
    }
}

/// Recursive crawler over a [`LinkGraph`], starting from `root`.
pub struct GraphCrawler {
    graph: LinkGraph,
    root: String,
    max_depth: usize,
    prevent_outside: bool,
    continue_on_failure: bool,
}

impl GraphCrawler {
    pub fn new(graph: LinkGraph, root: impl Into<String>) -> Self {
        Self {
            graph,
            root: root.into(),
            max_depth: 2,
            prevent_outside: true,
            continue_on_failure: true,
        }
    }

    /// Pages at `depth >= max_depth` are never fetched.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Only follow links under the root URL.
    pub fn prevent_outside(mut self, prevent: bool) -> Self {
        self.prevent_outside = prevent;
        self
    }

    /// Log and skip unreachable pages instead of aborting the crawl.
    pub fn continue_on_failure(mut self, skip: bool) -> Self {
        self.continue_on_failure = skip;
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    fn follows(&self, link: &str) -> bool {
        !self.prevent_outside || link.starts_with(&self.root)
    }

    /// Claims and fetches `url`, returning the page and the children worth
    /// recursing into.
    fn visit(
        &self,
        url: &str,
        visited: &VisitedSet<String>,
        depth: usize,
    ) -> Result<Option<(Page, Vec<String>)>, CrawlError> {
        if depth >= self.max_depth || !visited.insert(url.to_string()) {
            return Ok(None);
        }
        let Some(links) = self.graph.links(url) else {
            let err = CrawlError::Unreachable(url.to_string());
            if self.continue_on_failure {
                warn!("Skipping page: {err}");
                return Ok(None);
            }
            return Err(err);
        };
        let mut children: Vec<String> = Vec::new();
        if depth + 1 < self.max_depth {
            for link in links {
                if self.follows(link) && !visited.contains(link) && !children.contains(link) {
                    children.push(link.clone());
                }
            }
        }
        debug!("Fetched {url} at depth {depth}, {} new children", children.len());
        let page = Page {
            url: url.to_string(),
            depth,
            links: links.to_vec(),
        };
        Ok(Some((page, children)))
    }
}

impl Expand<String> for GraphCrawler {
    type Item = Page;
    type Error = CrawlError;

    fn expand<T>(
        &self,
        recurse: &T,
        node: &String,
        visited: &VisitedSet<String>,
        depth: usize,
    ) -> Result<Vec<Page>, CrawlError>
    where
        T: Traverse<String, Item = Page, Error = CrawlError>,
    {
        let Some((page, children)) = self.visit(node, visited, depth)? else {
            return Ok(vec![]);
        };
        let mut pages = vec![page];
        for child in &children {
            // an earlier sibling's subtree may have reached it first
            if !visited.contains(child) {
                pages.extend(recurse.traverse(child, visited, depth + 1)?);
            }
        }
        Ok(pages)
    }
}

impl ExpandAsync<String> for GraphCrawler {
    type Session = CrawlSession;

    async fn expand_async<T>(
        &self,
        recurse: &T,
        node: &String,
        visited: &VisitedSet<String>,
        session: &CrawlSession,
        depth: usize,
    ) -> Result<Vec<Page>, CrawlError>
    where
        T: TraverseAsync<String, Item = Page, Error = CrawlError, Session = CrawlSession>,
    {
        let Some((page, children)) = self.visit(node, visited, depth)? else {
            return Ok(vec![]);
        };
        let children: Vec<String> = children
            .into_iter()
            .filter(|child| session.schedule(child))
            .collect();
        let subtrees = try_join_all(
            children
                .iter()
                .map(|child| recurse.traverse_async(child, visited, session, depth + 1)),
        )
        .await?;
        let mut pages = vec![page];
        pages.extend(subtrees.into_iter().flatten());
        Ok(pages)
    }
}
