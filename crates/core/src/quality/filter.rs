//! Quality-profile filtering, ranking and selection.
//!
//! Turns a set of scored, parsed torrents into exactly one pick, or none.
//! A selection pass that finds nothing is a normal outcome, not an error;
//! only naming an unknown profile is fatal to the call.

use tracing::{debug, info};

use super::types::{ParsedTorrent, QualityProfile, QualityProfileItem, SelectionError};
use crate::metrics;

/// Default floor on the 0-100 relevance score.
pub const DEFAULT_MIN_MATCH_SCORE: f32 = 60.0;
/// Below this size a result is likely a sample or fake.
pub const DEFAULT_MIN_SIZE_BYTES: u64 = 100 * 1024 * 1024;
/// Above this size a result is likely a collection pack.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 50 * 1024 * 1024 * 1024;

/// Keep torrents accepted by at least one profile item.
///
/// The FIRST item whose quality/source match governs the seeder and size
/// check; later matching items are not consulted.
pub fn filter_by_profile(
    torrents: &[ParsedTorrent],
    items: &[QualityProfileItem],
) -> Vec<ParsedTorrent> {
    torrents
        .iter()
        .filter(|t| {
            items
                .iter()
                .find(|item| item.matches(t))
                .is_some_and(|item| item.passes_constraints(t))
        })
        .cloned()
        .collect()
}

/// Sort torrents best-first against a profile.
///
/// Primary key: index of the first matching profile item (lower wins,
/// unmatched last). Ties break on seeders, then on match score, both
/// descending. The sort is stable, so equal torrents keep input order and
/// repeated runs yield identical output.
pub fn rank(torrents: &[ParsedTorrent], items: &[QualityProfileItem]) -> Vec<ParsedTorrent> {
    let mut keyed: Vec<(usize, ParsedTorrent)> = torrents
        .iter()
        .map(|t| {
            let idx = items
                .iter()
                .position(|item| item.matches(t))
                .unwrap_or(usize::MAX);
            (idx, t.clone())
        })
        .collect();

    keyed.sort_by(|(ia, a), (ib, b)| {
        ia.cmp(ib)
            .then_with(|| b.seeders.cmp(&a.seeders))
            .then_with(|| {
                b.match_score
                    .partial_cmp(&a.match_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    keyed.into_iter().map(|(_, t)| t).collect()
}

/// Filter then rank against the named profile and return the head.
///
/// `Ok(None)` when filtering eliminates everything. Errs only when the
/// profile id is unknown.
pub fn select_best(
    torrents: &[ParsedTorrent],
    profiles: &[QualityProfile],
    profile_id: &str,
) -> Result<Option<ParsedTorrent>, SelectionError> {
    let profile = profiles
        .iter()
        .find(|p| p.id == profile_id)
        .ok_or_else(|| SelectionError::ProfileNotFound(profile_id.to_string()))?;

    let surviving = filter_by_profile(torrents, &profile.items);
    if surviving.is_empty() {
        info!(
            profile = %profile.name,
            candidates = torrents.len(),
            "no torrent passed the quality profile"
        );
        return Ok(None);
    }

    let ranked = rank(&surviving, &profile.items);
    Ok(ranked.into_iter().next())
}

/// Drop candidates that cannot plausibly be the wanted release: relevance
/// below the floor, sample/fake-sized, or collection-pack-sized.
pub fn apply_hard_filters(
    torrents: Vec<ParsedTorrent>,
    min_match_score: f32,
    min_size_bytes: u64,
    max_size_bytes: u64,
) -> Vec<ParsedTorrent> {
    let before = torrents.len();
    let mut low_score = 0usize;
    let mut too_small = 0usize;
    let mut too_large = 0usize;

    let surviving: Vec<ParsedTorrent> = torrents
        .into_iter()
        .filter(|t| {
            if t.match_score < min_match_score {
                low_score += 1;
                return false;
            }
            if t.size_bytes < min_size_bytes {
                too_small += 1;
                return false;
            }
            if t.size_bytes > max_size_bytes {
                too_large += 1;
                return false;
            }
            true
        })
        .collect();

    let eliminated = before - surviving.len();
    if eliminated > 0 {
        info!(
            before,
            after = surviving.len(),
            low_score,
            too_small,
            too_large,
            "hard filters eliminated candidates"
        );
        metrics::HARD_FILTER_ELIMINATIONS.inc_by(eliminated as u64);
    } else {
        debug!(count = before, "hard filters eliminated nothing");
    }

    surviving
}

/// Keep torrents at or above a relevance score floor.
pub fn apply_score_filter(torrents: Vec<ParsedTorrent>, min_score: f32) -> Vec<ParsedTorrent> {
    torrents
        .into_iter()
        .filter(|t| t.match_score >= min_score)
        .collect()
}

/// Keep torrents within a byte-size window.
pub fn apply_size_filters(
    torrents: Vec<ParsedTorrent>,
    min_bytes: u64,
    max_bytes: u64,
) -> Vec<ParsedTorrent> {
    torrents
        .into_iter()
        .filter(|t| t.size_bytes >= min_bytes && t.size_bytes <= max_bytes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::types::{Quality, Source};

    fn torrent(
        title: &str,
        quality: Quality,
        source: Source,
        seeders: u32,
        size_gb: f64,
        match_score: f32,
    ) -> ParsedTorrent {
        ParsedTorrent {
            title: title.to_string(),
            quality,
            source,
            codec: None,
            audio: None,
            size_bytes: (size_gb * 1024.0 * 1024.0 * 1024.0) as u64,
            seeders,
            leechers: 0,
            magnet_uri: Some(format!("magnet:?xt=urn:btih:{title}")),
            torrent_url: None,
            indexer_id: "idx-1".to_string(),
            indexer_name: "Test Indexer".to_string(),
            match_score,
        }
    }

    fn item(
        quality: Quality,
        source: Source,
        min_seeders: Option<u32>,
        max_size_gb: f64,
    ) -> QualityProfileItem {
        QualityProfileItem {
            quality,
            source,
            min_seeders,
            max_size_gb,
        }
    }

    fn profile(id: &str, items: Vec<QualityProfileItem>) -> QualityProfile {
        QualityProfile {
            id: id.to_string(),
            name: format!("profile {id}"),
            items,
        }
    }

    #[test]
    fn test_filter_seeder_floor() {
        // 1080p/any with min 5 seeders, torrent has 3
        let items = vec![item(Quality::P1080, Source::Any, Some(5), 8.0)];
        let torrents = vec![torrent("t", Quality::P1080, Source::Webdl, 3, 6.0, 90.0)];

        let result = filter_by_profile(&torrents, &items);
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_passes_within_constraints() {
        let items = vec![item(Quality::P1080, Source::Any, Some(5), 8.0)];
        let torrents = vec![torrent("t", Quality::P1080, Source::Webdl, 7, 6.0, 90.0)];

        let result = filter_by_profile(&torrents, &items);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_filter_first_matching_item_governs() {
        // First matching item demands 50 seeders; a later, looser item also
        // matches but must not rescue the torrent
        let items = vec![
            item(Quality::P1080, Source::Any, Some(50), 0.0),
            item(Quality::Any, Source::Any, None, 0.0),
        ];
        let torrents = vec![torrent("t", Quality::P1080, Source::Webdl, 3, 6.0, 90.0)];

        let result = filter_by_profile(&torrents, &items);
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_size_cap() {
        let items = vec![item(Quality::Any, Source::Any, None, 8.0)];
        let torrents = vec![
            torrent("small", Quality::P1080, Source::Webdl, 5, 6.0, 90.0),
            torrent("big", Quality::P1080, Source::Webdl, 5, 9.0, 90.0),
        ];

        let result = filter_by_profile(&torrents, &items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "small");
    }

    #[test]
    fn test_rank_profile_order_beats_seeders() {
        let items = vec![
            item(Quality::P2160, Source::Any, None, 0.0),
            item(Quality::P1080, Source::Any, None, 0.0),
        ];
        let torrents = vec![
            torrent("1080 popular", Quality::P1080, Source::Webdl, 500, 6.0, 90.0),
            torrent("2160 quiet", Quality::P2160, Source::Webdl, 2, 20.0, 90.0),
        ];

        let ranked = rank(&torrents, &items);
        assert_eq!(ranked[0].title, "2160 quiet");
    }

    #[test]
    fn test_rank_ties_on_seeders_then_score() {
        let items = vec![item(Quality::Any, Source::Any, None, 0.0)];
        let torrents = vec![
            torrent("low seed", Quality::P1080, Source::Webdl, 2, 6.0, 90.0),
            torrent("high seed", Quality::P1080, Source::Webdl, 50, 6.0, 70.0),
            torrent("high seed better score", Quality::P1080, Source::Webdl, 50, 6.0, 95.0),
        ];

        let ranked = rank(&torrents, &items);
        assert_eq!(ranked[0].title, "high seed better score");
        assert_eq!(ranked[1].title, "high seed");
        assert_eq!(ranked[2].title, "low seed");
    }

    #[test]
    fn test_rank_unmatched_sorted_last() {
        let items = vec![item(Quality::P2160, Source::Any, None, 0.0)];
        let torrents = vec![
            torrent("1080", Quality::P1080, Source::Webdl, 500, 6.0, 90.0),
            torrent("2160", Quality::P2160, Source::Webdl, 1, 20.0, 90.0),
        ];

        let ranked = rank(&torrents, &items);
        assert_eq!(ranked[0].title, "2160");
        assert_eq!(ranked[1].title, "1080");
    }

    #[test]
    fn test_rank_deterministic() {
        let items = vec![item(Quality::Any, Source::Any, None, 0.0)];
        // All keys equal: stable sort keeps input order across runs
        let torrents = vec![
            torrent("a", Quality::P1080, Source::Webdl, 10, 6.0, 80.0),
            torrent("b", Quality::P1080, Source::Webdl, 10, 6.0, 80.0),
            torrent("c", Quality::P1080, Source::Webdl, 10, 6.0, 80.0),
        ];

        let first = rank(&torrents, &items);
        let second = rank(&torrents, &items);
        let titles: Vec<&str> = first.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(
            titles,
            second.iter().map(|t| t.title.as_str()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_select_best_happy_path() {
        let profiles = vec![profile(
            "default",
            vec![
                item(Quality::P1080, Source::Webdl, Some(2), 8.0),
                item(Quality::Any, Source::Any, None, 0.0),
            ],
        )];
        let torrents = vec![
            torrent("720", Quality::P720, Source::Hdtv, 90, 2.0, 85.0),
            torrent("1080", Quality::P1080, Source::Webdl, 10, 6.0, 85.0),
        ];

        let best = select_best(&torrents, &profiles, "default").unwrap().unwrap();
        assert_eq!(best.title, "1080");
    }

    #[test]
    fn test_select_best_none_when_all_filtered() {
        let profiles = vec![profile(
            "strict",
            vec![item(Quality::P2160, Source::Bluray, Some(100), 1.0)],
        )];
        let torrents = vec![torrent("t", Quality::P720, Source::Hdtv, 5, 2.0, 85.0)];

        let best = select_best(&torrents, &profiles, "strict").unwrap();
        assert!(best.is_none());
    }

    #[test]
    fn test_select_best_unknown_profile_errors() {
        let profiles = vec![profile("default", vec![])];
        let err = select_best(&[], &profiles, "nope").unwrap_err();
        assert!(matches!(err, SelectionError::ProfileNotFound(id) if id == "nope"));
    }

    #[test]
    fn test_hard_filters() {
        let torrents = vec![
            torrent("good", Quality::P1080, Source::Webdl, 10, 6.0, 85.0),
            torrent("low score", Quality::P1080, Source::Webdl, 10, 6.0, 30.0),
            torrent("sample", Quality::P1080, Source::Webdl, 10, 0.05, 85.0),
            torrent("pack", Quality::P1080, Source::Webdl, 10, 80.0, 85.0),
        ];

        let surviving = apply_hard_filters(
            torrents,
            DEFAULT_MIN_MATCH_SCORE,
            DEFAULT_MIN_SIZE_BYTES,
            DEFAULT_MAX_SIZE_BYTES,
        );
        assert_eq!(surviving.len(), 1);
        assert_eq!(surviving[0].title, "good");
    }

    #[test]
    fn test_score_and_size_filters() {
        let torrents = vec![
            torrent("a", Quality::P1080, Source::Webdl, 10, 6.0, 85.0),
            torrent("b", Quality::P1080, Source::Webdl, 10, 6.0, 55.0),
        ];
        assert_eq!(apply_score_filter(torrents.clone(), 60.0).len(), 1);

        let torrents = vec![
            torrent("small", Quality::P1080, Source::Webdl, 10, 1.0, 85.0),
            torrent("large", Quality::P1080, Source::Webdl, 10, 10.0, 85.0),
        ];
        let windowed = apply_size_filters(
            torrents,
            2 * 1024 * 1024 * 1024,
            20 * 1024 * 1024 * 1024,
        );
        assert_eq!(windowed.len(), 1);
        assert_eq!(windowed[0].title, "large");
    }
}
