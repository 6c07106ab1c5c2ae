//! Similarity-backed fallback scorer.
//!
//! When the semantic backend is unavailable, callers can fall back to a
//! pure string-similarity score over the same canonical pair texts. Works
//! entirely offline, no model required.

use async_trait::async_trait;

use crate::matching::traits::{PairScorer, ScorerError};
use crate::similarity::similarity;

/// Pairwise scorer backed by edit-distance similarity.
///
/// The pipeline owns sigmoid normalization, so the similarity is emitted as
/// its own inverse-sigmoid logit; the normalized score then equals the raw
/// similarity (up to clamping at the extremes).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PairScorer for HeuristicScorer {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn score(&self, text_a: &str, text_b: &str) -> Result<f32, ScorerError> {
        let s = similarity(text_a, text_b).clamp(1e-4, 1.0 - 1e-4);
        Ok((s / (1.0 - s)).ln())
    }
}
