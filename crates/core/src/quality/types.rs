//! Types for quality parsing, filtering and selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Video quality extracted from a release title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "2160p")]
    P2160,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "any")]
    Any,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quality::P2160 => "2160p",
            Quality::P1080 => "1080p",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::Any => "any",
        };
        f.write_str(s)
    }
}

/// Release source extracted from a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Bluray,
    Webdl,
    Webrip,
    Hdtv,
    Dvd,
    Any,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Source::Bluray => "bluray",
            Source::Webdl => "webdl",
            Source::Webrip => "webrip",
            Source::Hdtv => "hdtv",
            Source::Dvd => "dvd",
            Source::Any => "any",
        };
        f.write_str(s)
    }
}

/// Video codec tag. Informational only, never authoritative for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    H264,
    H265,
}

/// Audio tag. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioTag {
    Aac,
    Dts,
    Dd,
    Atmos,
}

/// An indexer result annotated with extracted quality metadata and its
/// relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedTorrent {
    /// Raw release title.
    pub title: String,
    /// Extracted quality; `any` when unrecognized.
    pub quality: Quality,
    /// Extracted source; `any` when unrecognized.
    pub source: Source,
    /// Extracted codec, if present in the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<Codec>,
    /// Extracted audio tag, if present in the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioTag>,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Seeders reported by the indexer.
    pub seeders: u32,
    /// Leechers reported by the indexer.
    pub leechers: u32,
    /// Magnet URI, if the indexer supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnet_uri: Option<String>,
    /// .torrent download URL, if supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torrent_url: Option<String>,
    /// Id of the indexer this result came from.
    pub indexer_id: String,
    /// Human-readable indexer name.
    pub indexer_name: String,
    /// Relevance score in 0-100, recomputed per search.
    pub match_score: f32,
}

impl ParsedTorrent {
    pub fn size_gb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0 * 1024.0)
    }
}

/// One entry of a quality profile. Order within the profile encodes
/// preference: earlier items are preferred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityProfileItem {
    pub quality: Quality,
    pub source: Source,
    /// Minimum seeders; `None` means any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_seeders: Option<u32>,
    /// Maximum size in GB; zero or negative means uncapped.
    #[serde(default)]
    pub max_size_gb: f64,
}

impl QualityProfileItem {
    /// Whether this item's quality and source constraints accept a torrent.
    ///
    /// `any` on the item side is a wildcard; an exact item value requires an
    /// exact torrent value.
    pub fn matches(&self, torrent: &ParsedTorrent) -> bool {
        let quality_ok = self.quality == Quality::Any || self.quality == torrent.quality;
        let source_ok = self.source == Source::Any || self.source == torrent.source;
        quality_ok && source_ok
    }

    /// Whether the torrent passes this item's seeder floor and size cap.
    pub fn passes_constraints(&self, torrent: &ParsedTorrent) -> bool {
        let seeders_ok = self
            .min_seeders
            .is_none_or(|min| torrent.seeders >= min);
        let size_ok = self.max_size_gb <= 0.0 || torrent.size_gb() <= self.max_size_gb;
        seeders_ok && size_ok
    }
}

/// A named, user-owned quality policy. Immutable during a selection pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityProfile {
    pub id: String,
    pub name: String,
    pub items: Vec<QualityProfileItem>,
}

/// Errors from quality selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Quality profile not found: {0}")]
    ProfileNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torrent(quality: Quality, source: Source, seeders: u32, size_gb: f64) -> ParsedTorrent {
        ParsedTorrent {
            title: "test".to_string(),
            quality,
            source,
            codec: None,
            audio: None,
            size_bytes: (size_gb * 1024.0 * 1024.0 * 1024.0) as u64,
            seeders,
            leechers: 0,
            magnet_uri: None,
            torrent_url: None,
            indexer_id: "idx-1".to_string(),
            indexer_name: "Test Indexer".to_string(),
            match_score: 80.0,
        }
    }

    #[test]
    fn test_quality_serialization() {
        assert_eq!(serde_json::to_string(&Quality::P2160).unwrap(), "\"2160p\"");
        assert_eq!(serde_json::to_string(&Quality::Any).unwrap(), "\"any\"");
        let parsed: Quality = serde_json::from_str("\"1080p\"").unwrap();
        assert_eq!(parsed, Quality::P1080);
    }

    #[test]
    fn test_source_serialization() {
        assert_eq!(serde_json::to_string(&Source::Webdl).unwrap(), "\"webdl\"");
        let parsed: Source = serde_json::from_str("\"bluray\"").unwrap();
        assert_eq!(parsed, Source::Bluray);
    }

    #[test]
    fn test_item_matches_wildcards() {
        let item = QualityProfileItem {
            quality: Quality::Any,
            source: Source::Any,
            min_seeders: None,
            max_size_gb: 0.0,
        };
        assert!(item.matches(&torrent(Quality::P1080, Source::Webdl, 5, 2.0)));
        assert!(item.matches(&torrent(Quality::Any, Source::Any, 0, 2.0)));
    }

    #[test]
    fn test_item_matches_exact() {
        let item = QualityProfileItem {
            quality: Quality::P1080,
            source: Source::Webdl,
            min_seeders: None,
            max_size_gb: 0.0,
        };
        assert!(item.matches(&torrent(Quality::P1080, Source::Webdl, 5, 2.0)));
        assert!(!item.matches(&torrent(Quality::P720, Source::Webdl, 5, 2.0)));
        assert!(!item.matches(&torrent(Quality::P1080, Source::Hdtv, 5, 2.0)));
        // An unrecognized torrent quality does not satisfy an exact item
        assert!(!item.matches(&torrent(Quality::Any, Source::Webdl, 5, 2.0)));
    }

    #[test]
    fn test_item_constraints() {
        let item = QualityProfileItem {
            quality: Quality::P1080,
            source: Source::Any,
            min_seeders: Some(5),
            max_size_gb: 8.0,
        };
        assert!(item.passes_constraints(&torrent(Quality::P1080, Source::Webdl, 5, 6.0)));
        assert!(!item.passes_constraints(&torrent(Quality::P1080, Source::Webdl, 3, 6.0)));
        assert!(!item.passes_constraints(&torrent(Quality::P1080, Source::Webdl, 10, 9.0)));
    }

    #[test]
    fn test_item_constraints_uncapped() {
        let item = QualityProfileItem {
            quality: Quality::Any,
            source: Source::Any,
            min_seeders: None,
            max_size_gb: 0.0,
        };
        assert!(item.passes_constraints(&torrent(Quality::P1080, Source::Webdl, 0, 500.0)));
    }

    #[test]
    fn test_profile_item_min_seeders_any_deserializes_from_null_absence() {
        let json = r#"{"quality": "1080p", "source": "any", "max_size_gb": 8.0}"#;
        let item: QualityProfileItem = serde_json::from_str(json).unwrap();
        assert!(item.min_seeders.is_none());
        assert_eq!(item.quality, Quality::P1080);
    }

    #[test]
    fn test_size_gb() {
        let t = torrent(Quality::P1080, Source::Webdl, 5, 6.0);
        assert!((t.size_gb() - 6.0).abs() < 0.001);
    }
}
