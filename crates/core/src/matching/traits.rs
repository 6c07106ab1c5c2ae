//! Traits for matching components.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the external pairwise scoring capability.
#[derive(Debug, Clone, Error)]
pub enum ScorerError {
    #[error("Pairwise scorer unavailable: {0}")]
    Unavailable(String),

    #[error("Pairwise scorer load timed out after {timeout_secs}s")]
    LoadTimeout { timeout_secs: u64 },

    #[error("Pairwise scoring failed: {0}")]
    ScoringFailed(String),
}

/// A semantic pairwise scorer (cross-encoder).
///
/// Ingests two free-text representations jointly and emits one unbounded
/// relevance logit; higher means more relevant. Sigmoid normalization is
/// owned by the caller, not the implementation.
#[async_trait]
pub trait PairScorer: Send + Sync {
    /// Implementation name for logging/audit.
    fn name(&self) -> &str;

    /// Score one text pair, returning a raw logit.
    async fn score(&self, text_a: &str, text_b: &str) -> Result<f32, ScorerError>;

    /// Score many pairs in one call, preserving input order.
    ///
    /// The default loops over `score`; implementations backed by a model
    /// runtime should override this with a true batched invocation.
    async fn score_batch(&self, pairs: &[(String, String)]) -> Result<Vec<f32>, ScorerError> {
        let mut out = Vec::with_capacity(pairs.len());
        for (a, b) in pairs {
            out.push(self.score(a, b).await?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScorerError::Unavailable("model missing".to_string());
        assert_eq!(err.to_string(), "Pairwise scorer unavailable: model missing");

        let err = ScorerError::LoadTimeout { timeout_secs: 600 };
        assert_eq!(
            err.to_string(),
            "Pairwise scorer load timed out after 600s"
        );
    }
}
