//! Acquisition engine - the end-to-end selection flow.
//!
//! Coordinates one search pass for a subscription query: healthy indexers
//! come from the registry, raw results are parsed and annotated, the
//! relevance scorer turns them into confidences, hard filters and the
//! quality profile narrow them down to a single selection, and every
//! indexer outcome is reported back to the registry.
//!
//! Finding nothing is a normal, retryable outcome, not an error; so is an
//! empty set of available indexers (degraded, not fatal).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::matching::{MatchCandidate, MatchQuery, PairScorer, RelevanceScorer, ScorerError};
use crate::metrics;
use crate::providers::{RawRelease, SearchCategory};
use crate::quality::{
    apply_hard_filters, parse_extended, select_best, ParsedTorrent, QualityProfile,
    SelectionError,
};
use crate::registry::IndexerRegistry;

/// Errors that end an acquisition pass.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Scorer(#[from] ScorerError),
}

/// Result of one acquisition pass.
#[derive(Debug)]
pub struct AcquisitionOutcome {
    /// The winning release, if any cleared the filters and the profile.
    pub selected: Option<ParsedTorrent>,
    /// Raw results returned by indexers before filtering.
    pub candidates_found: usize,
    /// Candidates remaining after hard filters.
    pub candidates_considered: usize,
    /// Indexers that failed this pass (id -> error message).
    pub indexer_errors: HashMap<String, String>,
    /// Total pass duration in milliseconds.
    pub duration_ms: u64,
}

/// The selection engine.
///
/// Constructed once at process start with its dependencies and passed by
/// handle into request-scoped code.
pub struct AcquisitionEngine {
    indexers: Arc<IndexerRegistry>,
    scorer: Arc<dyn PairScorer>,
    fallback: Option<Arc<dyn PairScorer>>,
    config: EngineConfig,
}

impl AcquisitionEngine {
    pub fn new(
        indexers: Arc<IndexerRegistry>,
        scorer: Arc<dyn PairScorer>,
        config: EngineConfig,
    ) -> Self {
        Self {
            indexers,
            scorer,
            fallback: None,
            config,
        }
    }

    /// Set the scorer used when the semantic backend is unavailable.
    pub fn with_fallback_scorer(mut self, fallback: Arc<dyn PairScorer>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Run one full search-score-select pass.
    ///
    /// Errs on an unknown profile id, or on scorer unavailability when no
    /// fallback is configured. Everything else degrades to an outcome with
    /// `selected: None`.
    pub async fn acquire(
        &self,
        query: &MatchQuery,
        profiles: &[QualityProfile],
        profile_id: &str,
        categories: Option<&[SearchCategory]>,
    ) -> Result<AcquisitionOutcome, AcquireError> {
        let started = Instant::now();

        // Fail on a bad profile before spending searches on it
        if !profiles.iter().any(|p| p.id == profile_id) {
            metrics::ACQUISITION_ATTEMPTS
                .with_label_values(&["failed"])
                .inc();
            return Err(SelectionError::ProfileNotFound(profile_id.to_string()).into());
        }

        let (releases, indexer_errors) = self.search_all(query, categories).await;
        if releases.is_empty() {
            let result = if indexer_errors.is_empty() && self.indexers.available().await.is_empty()
            {
                "degraded"
            } else {
                "no_match"
            };
            metrics::ACQUISITION_ATTEMPTS.with_label_values(&[result]).inc();
            return Ok(AcquisitionOutcome {
                selected: None,
                candidates_found: 0,
                candidates_considered: 0,
                indexer_errors,
                duration_ms: started.elapsed().as_millis() as u64,
            });
        }

        let candidates_found = releases.len();
        let scores = self.score_releases(query, &releases).await?;

        let parsed: Vec<ParsedTorrent> = releases
            .iter()
            .zip(&scores)
            .map(|(release, score)| annotate(release, score * 100.0))
            .collect();

        let surviving = apply_hard_filters(
            parsed,
            self.config.filter.min_match_score,
            self.config.filter.min_size_bytes,
            self.config.filter.max_size_bytes,
        );
        let candidates_considered = surviving.len();

        let selected = select_best(&surviving, profiles, profile_id)?;

        match &selected {
            Some(torrent) => {
                info!(
                    title = %torrent.title,
                    indexer = %torrent.indexer_name,
                    score = torrent.match_score,
                    quality = %torrent.quality,
                    source = %torrent.source,
                    "release selected"
                );
                metrics::ACQUISITION_ATTEMPTS
                    .with_label_values(&["selected"])
                    .inc();
                metrics::MATCH_CONFIDENCE
                    .with_label_values(&[])
                    .observe(f64::from(torrent.match_score) / 100.0);
            }
            None => {
                info!(
                    query = %query.title,
                    candidates_found,
                    candidates_considered,
                    "no release selected"
                );
                metrics::ACQUISITION_ATTEMPTS
                    .with_label_values(&["no_match"])
                    .inc();
            }
        }

        Ok(AcquisitionOutcome {
            selected,
            candidates_found,
            candidates_considered,
            indexer_errors,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Fan the query out to every available indexer, reporting each
    /// outcome back to the registry.
    async fn search_all(
        &self,
        query: &MatchQuery,
        categories: Option<&[SearchCategory]>,
    ) -> (Vec<RawRelease>, HashMap<String, String>) {
        let available = self.indexers.available().await;
        if available.is_empty() {
            warn!("no indexers available, acquisition degraded");
            return (Vec::new(), HashMap::new());
        }

        let term = build_search_term(query);
        let mut releases = Vec::new();
        let mut errors = HashMap::new();

        for (id, indexer) in available {
            match indexer.search(&term, categories).await {
                Ok(results) => {
                    debug!(indexer = %id, results = results.len(), "indexer search ok");
                    self.indexers.record_success(&id).await;
                    releases.extend(results);
                }
                Err(e) => {
                    warn!(indexer = %id, error = %e, "indexer search failed");
                    self.indexers.record_failure(&id).await;
                    errors.insert(id, e.to_string());
                }
            }
        }

        (releases, errors)
    }

    /// Score every release against the query, falling back to the
    /// similarity scorer when the semantic backend is out.
    ///
    /// The fallback only runs when `matcher.heuristic_fallback` is enabled
    /// AND a fallback scorer was installed; otherwise the scorer error
    /// propagates.
    async fn score_releases(
        &self,
        query: &MatchQuery,
        releases: &[RawRelease],
    ) -> Result<Vec<f32>, ScorerError> {
        let candidates: Vec<MatchCandidate> = releases
            .iter()
            .enumerate()
            .map(|(i, r)| MatchCandidate::new(format!("{}-{i}", r.indexer_id), &r.title))
            .collect();

        let scorer = RelevanceScorer::new(self.scorer.clone(), self.config.matcher.clone());
        match scorer.score_batch(std::slice::from_ref(query), &candidates).await {
            Ok(mut matrix) => Ok(matrix.remove(0)),
            Err(e @ (ScorerError::Unavailable(_) | ScorerError::LoadTimeout { .. })) => {
                if !self.config.matcher.heuristic_fallback {
                    return Err(e);
                }
                let Some(fallback) = &self.fallback else {
                    return Err(e);
                };
                warn!(error = %e, "semantic scorer unavailable, using heuristic fallback");
                let scorer =
                    RelevanceScorer::new(fallback.clone(), self.config.matcher.clone());
                let mut matrix = scorer
                    .score_batch(std::slice::from_ref(query), &candidates)
                    .await?;
                Ok(matrix.remove(0))
            }
            Err(e) => Err(e),
        }
    }
}

fn annotate(release: &RawRelease, match_score: f32) -> ParsedTorrent {
    let media = parse_extended(&release.title);
    ParsedTorrent {
        title: release.title.clone(),
        quality: media.quality,
        source: media.source,
        codec: media.codec,
        audio: media.audio,
        size_bytes: release.size_bytes,
        seeders: release.seeders,
        leechers: release.leechers,
        magnet_uri: release.magnet_uri.clone(),
        torrent_url: release.torrent_url.clone(),
        indexer_id: release.indexer_id.clone(),
        indexer_name: release.indexer_name.clone(),
        match_score,
    }
}

fn build_search_term(query: &MatchQuery) -> String {
    match &query.performer {
        Some(performer) => format!("{performer} {}", query.title),
        None => query.title.clone(),
    }
}
