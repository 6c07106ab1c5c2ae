//! Mock pairwise scorer for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::matching::{PairScorer, ScorerError};

/// Mock implementation of the [`PairScorer`] trait.
///
/// Returns a scripted logit per pair, a configurable default, a
/// deterministic text-derived logit, or a configured error.
#[derive(Debug, Clone)]
pub struct MockPairScorer {
    default_logit: f32,
    pair_logits: HashMap<(String, String), f32>,
    hashed: bool,
    error: Option<String>,
}

impl MockPairScorer {
    /// Every pair scores `logit`.
    pub fn with_default(logit: f32) -> Self {
        Self {
            default_logit: logit,
            pair_logits: HashMap::new(),
            hashed: false,
            error: None,
        }
    }

    /// Every call fails with `ScorerError::Unavailable(reason)`.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            default_logit: 0.0,
            pair_logits: HashMap::new(),
            hashed: false,
            error: Some(reason.to_string()),
        }
    }

    /// Deterministic logits derived from the pair text, varied enough to
    /// exercise ordering and chunking without scripting every pair.
    pub fn hashed_logits() -> Self {
        Self {
            default_logit: 0.0,
            pair_logits: HashMap::new(),
            hashed: true,
            error: None,
        }
    }

    /// Script an exact logit for one (text_a, text_b) pair.
    pub fn with_pair_logit(mut self, text_a: &str, text_b: &str, logit: f32) -> Self {
        self.pair_logits
            .insert((text_a.to_string(), text_b.to_string()), logit);
        self
    }

    fn logit_for(&self, text_a: &str, text_b: &str) -> f32 {
        if let Some(&logit) = self
            .pair_logits
            .get(&(text_a.to_string(), text_b.to_string()))
        {
            return logit;
        }
        if self.hashed {
            let mut hasher = DefaultHasher::new();
            text_a.hash(&mut hasher);
            text_b.hash(&mut hasher);
            // Spread into roughly [-3, 5]
            return (hasher.finish() % 800) as f32 / 100.0 - 3.0;
        }
        self.default_logit
    }
}

#[async_trait]
impl PairScorer for MockPairScorer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn score(&self, text_a: &str, text_b: &str) -> Result<f32, ScorerError> {
        if let Some(reason) = &self.error {
            return Err(ScorerError::Unavailable(reason.clone()));
        }
        Ok(self.logit_for(text_a, text_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_logit() {
        let mock = MockPairScorer::with_default(1.5);
        assert_eq!(mock.score("a", "b").await.unwrap(), 1.5);
    }

    #[tokio::test]
    async fn test_scripted_pair_overrides_default() {
        let mock = MockPairScorer::with_default(0.0).with_pair_logit("a", "b", 4.0);
        assert_eq!(mock.score("a", "b").await.unwrap(), 4.0);
        assert_eq!(mock.score("a", "c").await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_unavailable() {
        let mock = MockPairScorer::unavailable("down");
        assert!(matches!(
            mock.score("a", "b").await.unwrap_err(),
            ScorerError::Unavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_hashed_deterministic() {
        let mock = MockPairScorer::hashed_logits();
        let first = mock.score("a", "b").await.unwrap();
        let second = mock.score("a", "b").await.unwrap();
        assert_eq!(first, second);
    }
}
