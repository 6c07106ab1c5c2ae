//! Boundary traits for pluggable backend providers.
//!
//! Implementations (Jackett-style indexers, metadata catalogs, download
//! clients) live outside this crate; the engine only consumes these
//! capability seams through the provider registry, which adds health
//! tracking without interpreting provider semantics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by provider implementations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Provider API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Content category for narrowing indexer searches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchCategory {
    Movies,
    Tv,
    Xxx,
    Other,
}

/// A raw search result from a single indexer, before parsing and scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRelease {
    /// Release title as listed.
    pub title: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Seeders reported by the indexer.
    pub seeders: u32,
    /// Leechers reported by the indexer.
    pub leechers: u32,
    /// Magnet URI, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnet_uri: Option<String>,
    /// .torrent download URL, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torrent_url: Option<String>,
    /// When the release was published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<DateTime<Utc>>,
    /// Id of the indexer that returned this result.
    pub indexer_id: String,
    /// Human-readable indexer name.
    pub indexer_name: String,
}

/// A torrent indexer backend.
#[async_trait]
pub trait IndexerProvider: Send + Sync {
    /// Stable provider id used for registration and health tracking.
    fn id(&self) -> &str;

    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Search the indexer for a free-text term.
    async fn search(
        &self,
        term: &str,
        categories: Option<&[SearchCategory]>,
    ) -> Result<Vec<RawRelease>, ProviderError>;
}

/// An external metadata catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataEntity {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
}

/// What a metadata entity refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Performer,
    Studio,
    Scene,
}

/// A metadata catalog backend.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Look up entities by name.
    async fn lookup(&self, name: &str) -> Result<Vec<MetadataEntity>, ProviderError>;
}

/// A request to hand a release to a download client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnet_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torrent_url: Option<String>,
}

/// A torrent download client backend.
#[async_trait]
pub trait TorrentClient: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Queue a release for download, returning a client-side handle.
    async fn add(&self, request: &DownloadRequest) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::ConnectionFailed("dns".to_string());
        assert_eq!(err.to_string(), "Provider connection failed: dns");
        assert_eq!(ProviderError::Timeout.to_string(), "Request timeout");
    }

    #[test]
    fn test_raw_release_serialization() {
        let release = RawRelease {
            title: "Scene.A.1080p.WEB-DL".to_string(),
            size_bytes: 4_000_000_000,
            seeders: 12,
            leechers: 3,
            magnet_uri: Some("magnet:?xt=urn:btih:abc".to_string()),
            torrent_url: None,
            publish_date: None,
            indexer_id: "idx-1".to_string(),
            indexer_name: "Test Indexer".to_string(),
        };

        let json = serde_json::to_string(&release).unwrap();
        assert!(!json.contains("torrent_url")); // None should be skipped

        let parsed: RawRelease = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title, "Scene.A.1080p.WEB-DL");
        assert_eq!(parsed.indexer_id, "idx-1");
    }

    #[test]
    fn test_search_category_serialization() {
        assert_eq!(
            serde_json::to_string(&SearchCategory::Movies).unwrap(),
            "\"movies\""
        );
        assert_eq!(serde_json::to_string(&SearchCategory::Xxx).unwrap(), "\"xxx\"");
    }
}
