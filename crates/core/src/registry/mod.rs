//! Provider registry with a per-provider circuit breaker.
//!
//! Tracks named backend instances per category (metadata, indexer,
//! torrent-client) and exposes only healthy ones to callers. Three
//! consecutive failures trip a one-hour cooldown; any success fully resets
//! the failure history. Both thresholds come from [`RegistryConfig`].
//!
//! State is in-memory and process-scoped; a restart is a clean slate.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::metrics;
use crate::providers::{IndexerProvider, MetadataProvider, TorrentClient};

/// Failure bookkeeping for one registered provider.
#[derive(Debug, Clone, Default)]
pub struct FailureState {
    /// Consecutive failures since the last success.
    pub failure_count: u32,
    /// When the most recent failure was recorded.
    pub last_failure_at: Option<Instant>,
    /// While set and in the future, the provider is out of rotation.
    pub cooldown_until: Option<Instant>,
}

struct ProviderEntry<P: ?Sized> {
    id: String,
    instance: Arc<P>,
    failure: FailureState,
}

/// Health-tracking registry for one provider category.
///
/// Polymorphic over the provider payload: the registry never interprets
/// provider semantics, it only adds availability tracking. Entries keep
/// registration order. All mutation goes through one `RwLock`, so
/// concurrent success/failure reports cannot lose updates.
pub struct ProviderRegistry<P: ?Sized> {
    category: &'static str,
    config: RegistryConfig,
    entries: RwLock<Vec<ProviderEntry<P>>>,
}

impl<P: ?Sized> ProviderRegistry<P> {
    pub fn new(category: &'static str, config: RegistryConfig) -> Self {
        Self {
            category,
            config,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Register a provider instance under `id`.
    ///
    /// Idempotent: re-registering an existing id replaces the instance and
    /// keeps its position and failure history.
    pub async fn register(&self, id: &str, instance: Arc<P>) {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.iter_mut().find(|e| e.id == id) {
            entry.instance = instance;
            debug!(category = self.category, id, "provider re-registered");
            return;
        }
        entries.push(ProviderEntry {
            id: id.to_string(),
            instance,
            failure: FailureState::default(),
        });
        info!(category = self.category, id, "provider registered");
    }

    /// Remove a provider and purge its failure history.
    ///
    /// Returns whether the id was registered. Idempotent.
    pub async fn unregister(&self, id: &str) -> bool {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() < before;
        if removed {
            info!(category = self.category, id, "provider unregistered");
        }
        removed
    }

    /// Record a failed call against a provider.
    ///
    /// The third consecutive failure trips the breaker; further failures
    /// re-trip it, extending the cooldown from now.
    pub async fn record_failure(&self, id: &str) {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            return;
        };

        let now = Instant::now();
        entry.failure.failure_count += 1;
        entry.failure.last_failure_at = Some(now);

        if entry.failure.failure_count >= self.config.trip_threshold {
            let cooldown = Duration::from_secs(self.config.cooldown_secs);
            entry.failure.cooldown_until = Some(now + cooldown);
            warn!(
                category = self.category,
                id,
                failures = entry.failure.failure_count,
                cooldown_secs = self.config.cooldown_secs,
                "provider tripped, entering cooldown"
            );
            metrics::PROVIDER_TRIPS
                .with_label_values(&[self.category])
                .inc();
        } else {
            debug!(
                category = self.category,
                id,
                failures = entry.failure.failure_count,
                "provider failure recorded"
            );
        }
    }

    /// Record a successful call, fully resetting failure history.
    pub async fn record_success(&self, id: &str) {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            return;
        };
        if entry.failure.failure_count > 0 || entry.failure.cooldown_until.is_some() {
            debug!(category = self.category, id, "provider recovered");
        }
        entry.failure = FailureState::default();
    }

    /// Whether a provider is currently in rotation.
    ///
    /// True iff the id is registered and any cooldown has elapsed. An
    /// elapsed cooldown does not clear the accumulated failure count; only
    /// an explicit success does.
    pub async fn is_available(&self, id: &str) -> bool {
        let entries = self.entries.read().await;
        entries
            .iter()
            .find(|e| e.id == id)
            .is_some_and(|e| cooldown_elapsed(&e.failure))
    }

    /// Fetch a provider instance regardless of health.
    pub async fn get(&self, id: &str) -> Option<Arc<P>> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.instance.clone())
    }

    /// All available providers, in registration order.
    pub async fn available(&self) -> Vec<(String, Arc<P>)> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|e| cooldown_elapsed(&e.failure))
            .map(|e| (e.id.clone(), e.instance.clone()))
            .collect()
    }

    /// The first available provider, if any.
    pub async fn primary(&self) -> Option<(String, Arc<P>)> {
        self.available().await.into_iter().next()
    }

    /// All registered ids, in registration order, regardless of health.
    pub async fn ids(&self) -> Vec<String> {
        let entries = self.entries.read().await;
        entries.iter().map(|e| e.id.clone()).collect()
    }

    /// Snapshot of a provider's failure state, for status surfaces.
    pub async fn failure_state(&self, id: &str) -> Option<FailureState> {
        let entries = self.entries.read().await;
        entries.iter().find(|e| e.id == id).map(|e| e.failure.clone())
    }
}

fn cooldown_elapsed(failure: &FailureState) -> bool {
    match failure.cooldown_until {
        Some(until) => Instant::now() >= until,
        None => true,
    }
}

/// Registry of metadata catalog providers.
pub type MetadataRegistry = ProviderRegistry<dyn MetadataProvider>;
/// Registry of torrent indexer providers.
pub type IndexerRegistry = ProviderRegistry<dyn IndexerProvider>;
/// Registry of torrent download clients.
pub type TorrentClientRegistry = ProviderRegistry<dyn TorrentClient>;

/// The three provider registries, constructed once at process start and
/// passed by handle into request-scoped code.
pub struct Backends {
    pub metadata: Arc<MetadataRegistry>,
    pub indexers: Arc<IndexerRegistry>,
    pub torrent_clients: Arc<TorrentClientRegistry>,
}

impl Backends {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            metadata: Arc::new(ProviderRegistry::new("metadata", config.clone())),
            indexers: Arc::new(ProviderRegistry::new("indexer", config.clone())),
            torrent_clients: Arc::new(ProviderRegistry::new("torrent_client", config)),
        }
    }
}
