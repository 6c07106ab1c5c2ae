//! Mock indexer provider for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::providers::{IndexerProvider, ProviderError, RawRelease, SearchCategory};

/// Mock implementation of the [`IndexerProvider`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable releases
/// - Track search terms for assertions
/// - Toggle failures at runtime
pub struct MockIndexer {
    id: String,
    name: String,
    results: Arc<RwLock<Vec<RawRelease>>>,
    searches: Arc<RwLock<Vec<String>>>,
    failing: Arc<AtomicBool>,
    search_count: Arc<AtomicU32>,
}

impl MockIndexer {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("Mock {id}"),
            results: Arc::new(RwLock::new(Vec::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            failing: Arc::new(AtomicBool::new(false)),
            search_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Configure the releases every search returns.
    pub async fn set_results(&self, results: Vec<RawRelease>) {
        *self.results.write().await = results;
    }

    /// Make subsequent searches fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Terms searched so far, in order.
    pub async fn recorded_searches(&self) -> Vec<String> {
        self.searches.read().await.clone()
    }

    pub fn search_count(&self) -> u32 {
        self.search_count.load(Ordering::SeqCst)
    }

    /// Build a release attributed to this indexer.
    pub fn release(&self, title: &str, size_bytes: u64, seeders: u32) -> RawRelease {
        RawRelease {
            title: title.to_string(),
            size_bytes,
            seeders,
            leechers: seeders / 4,
            magnet_uri: Some(format!(
                "magnet:?xt=urn:btih:{}",
                title.to_lowercase().replace(' ', "")
            )),
            torrent_url: None,
            publish_date: None,
            indexer_id: self.id.clone(),
            indexer_name: self.name.clone(),
        }
    }
}

#[async_trait]
impl IndexerProvider for MockIndexer {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn search(
        &self,
        term: &str,
        _categories: Option<&[SearchCategory]>,
    ) -> Result<Vec<RawRelease>, ProviderError> {
        self.search_count.fetch_add(1, Ordering::SeqCst);
        self.searches.write().await.push(term.to_string());

        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::ConnectionFailed("mock failure".to_string()));
        }

        Ok(self.results.read().await.clone())
    }
}
