//! Relevance scoring pipeline.
//!
//! Combines the external semantic pairwise signal with deterministic
//! heuristic penalties into one normalized confidence per query/candidate
//! pair, and turns scored rows into at most one selection per query.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::MatcherConfig;
use crate::matching::batch::plan_chunks;
use crate::matching::penalty::{combine, performer_contributor, title_contributor, PenaltyContributor};
use crate::matching::traits::{PairScorer, ScorerError};
use crate::matching::types::{BestMatch, MatchBand, MatchCandidate, MatchQuery};
use crate::metrics;

/// Logistic normalization of a raw logit into 0.0-1.0.
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Relevance scorer over an external pairwise scoring capability.
///
/// The scorer owns sigmoid normalization and penalty application; the
/// backing [`PairScorer`] only produces raw logits.
pub struct RelevanceScorer {
    scorer: Arc<dyn PairScorer>,
    config: MatcherConfig,
}

impl RelevanceScorer {
    pub fn new(scorer: Arc<dyn PairScorer>, config: MatcherConfig) -> Self {
        Self { scorer, config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Score one query against one candidate.
    ///
    /// Applies the performer penalty when the query names a performer and
    /// the candidate roster is non-empty. The title penalty is batch-only.
    pub async fn score_pair(
        &self,
        query: &MatchQuery,
        candidate: &MatchCandidate,
    ) -> Result<f32, ScorerError> {
        let logit = self
            .scorer
            .score(&query.canonical_text(), &candidate.canonical_text())
            .await?;
        let raw = sigmoid(logit);

        let mut contributors = Vec::with_capacity(1);
        if let Some(c) = performer_contributor(query.performer.as_deref(), &candidate.performers) {
            contributors.push(c);
        }

        Ok(self.apply_penalties(raw, &contributors, candidate))
    }

    /// Score every query against every candidate.
    ///
    /// Returns one row per query, one entry per candidate, both in input
    /// order. Batch scoring additionally applies the title penalty; the
    /// performer and title contributors are reduced by maximum, never
    /// summed.
    pub async fn score_batch(
        &self,
        queries: &[MatchQuery],
        candidates: &[MatchCandidate],
    ) -> Result<Vec<Vec<f32>>, ScorerError> {
        if queries.is_empty() || candidates.is_empty() {
            return Ok(queries.iter().map(|_| Vec::new()).collect());
        }

        let candidate_texts: Vec<String> =
            candidates.iter().map(|c| c.canonical_text()).collect();

        let mut pairs = Vec::with_capacity(queries.len() * candidates.len());
        for query in queries {
            let query_text = query.canonical_text();
            for candidate_text in &candidate_texts {
                pairs.push((query_text.clone(), candidate_text.clone()));
            }
        }

        let logits = self.scorer.score_batch(&pairs).await?;
        if logits.len() != pairs.len() {
            return Err(ScorerError::ScoringFailed(format!(
                "backend returned {} scores for {} pairs",
                logits.len(),
                pairs.len()
            )));
        }

        let mut matrix = Vec::with_capacity(queries.len());
        for (qi, query) in queries.iter().enumerate() {
            let mut row = Vec::with_capacity(candidates.len());
            for (ci, candidate) in candidates.iter().enumerate() {
                let raw = sigmoid(logits[qi * candidates.len() + ci]);

                let mut contributors = Vec::with_capacity(2);
                if let Some(c) =
                    performer_contributor(query.performer.as_deref(), &candidate.performers)
                {
                    contributors.push(c);
                }
                if let Some(c) = title_contributor(&query.title, &candidate.title) {
                    contributors.push(c);
                }

                row.push(self.apply_penalties(raw, &contributors, candidate));
            }
            matrix.push(row);
        }

        Ok(matrix)
    }

    fn apply_penalties(
        &self,
        raw: f32,
        contributors: &[PenaltyContributor],
        candidate: &MatchCandidate,
    ) -> f32 {
        let penalty = combine(contributors);
        let score = (raw * (1.0 - penalty)).clamp(0.0, 1.0);
        if penalty > 0.0 {
            debug!(
                candidate = %candidate.title,
                penalty,
                before = raw,
                after = score,
                contributors = ?contributors.iter().map(|c| c.name).collect::<Vec<_>>(),
                "penalty applied"
            );
            metrics::PENALTIES_APPLIED.inc();
        }
        score
    }

    /// Best candidate for a single query, or `None` when the best score
    /// falls below the configured threshold.
    ///
    /// Defined as the single-query case of [`find_best_match_batch`], so
    /// batch penalties and chunking semantics apply uniformly.
    ///
    /// [`find_best_match_batch`]: Self::find_best_match_batch
    pub async fn find_best_match(
        &self,
        query: &MatchQuery,
        candidates: &[MatchCandidate],
    ) -> Result<Option<BestMatch>, ScorerError> {
        let mut results = self
            .find_best_match_batch(std::slice::from_ref(query), candidates)
            .await?;
        Ok(results.pop().flatten())
    }

    /// Best candidate per query, in query order.
    ///
    /// Enforces the hard pair ceiling by partitioning queries into
    /// sequential chunks; results are identical to an unchunked call.
    /// Ties on score keep the first-occurring candidate index.
    pub async fn find_best_match_batch(
        &self,
        queries: &[MatchQuery],
        candidates: &[MatchCandidate],
    ) -> Result<Vec<Option<BestMatch>>, ScorerError> {
        let chunks = plan_chunks(queries.len(), candidates.len(), self.config.max_pairs_per_call);

        let mut results = Vec::with_capacity(queries.len());
        for chunk in chunks {
            let chunk_queries = &queries[chunk.clone()];
            let matrix = self.score_batch(chunk_queries, candidates).await?;
            for (query, row) in chunk_queries.iter().zip(matrix) {
                results.push(self.pick_best(query, candidates, &row));
            }
        }
        Ok(results)
    }

    fn pick_best(
        &self,
        query: &MatchQuery,
        candidates: &[MatchCandidate],
        scores: &[f32],
    ) -> Option<BestMatch> {
        let mut best: Option<(usize, f32)> = None;
        for (index, &score) in scores.iter().enumerate() {
            // Strictly greater keeps the first index on ties
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((index, score));
            }
        }

        let (index, score) = best?;
        if score < self.config.best_match_threshold {
            self.log_near_misses(query, candidates, scores);
            return None;
        }

        Some(BestMatch {
            candidate: candidates[index].clone(),
            score,
            index,
        })
    }

    /// Log the top-3 near misses when nothing clears the threshold.
    fn log_near_misses(&self, query: &MatchQuery, candidates: &[MatchCandidate], scores: &[f32]) {
        let mut ranked: Vec<(usize, f32)> =
            scores.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let near_misses: Vec<String> = ranked
            .iter()
            .take(3)
            .map(|(i, s)| format!("{} ({s:.3})", candidates[*i].title))
            .collect();

        info!(
            query = %query.title,
            threshold = self.config.best_match_threshold,
            near_misses = ?near_misses,
            "no candidate above threshold"
        );
    }

    /// Classify a confidence score into three bands.
    ///
    /// Independent of the binary best-match threshold; used by callers that
    /// retain uncertain and unknown candidates.
    pub fn classify(&self, score: f32) -> MatchBand {
        if score >= self.config.matched_threshold {
            MatchBand::Matched
        } else if score >= self.config.unknown_threshold {
            MatchBand::Uncertain
        } else {
            MatchBand::Unknown
        }
    }
}
