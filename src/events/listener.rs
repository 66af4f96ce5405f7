use super::Discovery;
use std::sync::{Mutex, PoisonError};

/// Receives the URLs found by the parsers
///
/// Called synchronously from inside `parse`, possibly from several crawl
/// workers at once, so implementations must be thread-safe and should return
/// quickly.
pub trait ParserListener: Send + Sync {
    fn url_found(&self, discovery: &Discovery);
}

impl<F> ParserListener for F
where
    F: Fn(&Discovery) + Send + Sync,
{
    fn url_found(&self, discovery: &Discovery) {
        self(discovery)
    }
}

/// Listener that keeps every discovery in arrival order
#[derive(Debug, Default)]
pub struct CollectingListener {
    found: Mutex<Vec<Discovery>>,
}

impl CollectingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the discoveries seen so far
    pub fn discoveries(&self) -> Vec<Discovery> {
        self.found
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The discovered URLs, in arrival order
    pub fn urls(&self) -> Vec<String> {
        self.discoveries()
            .into_iter()
            .map(|d| d.url().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.found
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ParserListener for CollectingListener {
    fn url_found(&self, discovery: &Discovery) {
        self.found
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(discovery.clone());
    }
}
