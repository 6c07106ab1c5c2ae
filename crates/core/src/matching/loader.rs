//! One-time scorer initialization.
//!
//! The semantic backend may need to load a model on first use, which can
//! take a while. [`LazyScorer`] wraps that load as a single suspension
//! point with a configurable timeout; a failed or timed-out load latches an
//! unavailable state for the rest of the process, it is never retried
//! automatically.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::matching::traits::{PairScorer, ScorerError};
use crate::metrics;

type LoadFuture = Pin<Box<dyn Future<Output = Result<Arc<dyn PairScorer>, ScorerError>> + Send>>;
type ScorerFactory = Box<dyn Fn() -> LoadFuture + Send + Sync>;

/// Lazily-initialized pairwise scorer.
///
/// The factory runs at most once, on first use, under `load_timeout`
/// (default 600s). Every caller after a failed load observes the same
/// [`ScorerError`].
pub struct LazyScorer {
    factory: ScorerFactory,
    load_timeout: Duration,
    cell: OnceCell<Result<Arc<dyn PairScorer>, ScorerError>>,
}

impl LazyScorer {
    pub fn new<F, Fut>(factory: F, load_timeout: Duration) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn PairScorer>, ScorerError>> + Send + 'static,
    {
        Self {
            factory: Box::new(move || Box::pin(factory())),
            load_timeout,
            cell: OnceCell::new(),
        }
    }

    /// Get the loaded scorer, driving the load on first call.
    pub async fn get(&self) -> Result<Arc<dyn PairScorer>, ScorerError> {
        let timeout_secs = self.load_timeout.as_secs();
        self.cell
            .get_or_init(|| async {
                info!(timeout_secs, "loading pairwise scorer");
                match tokio::time::timeout(self.load_timeout, (self.factory)()).await {
                    Ok(Ok(scorer)) => {
                        info!(scorer = scorer.name(), "pairwise scorer loaded");
                        metrics::SCORER_LOADS.with_label_values(&["loaded"]).inc();
                        Ok(scorer)
                    }
                    Ok(Err(e)) => {
                        warn!(error = %e, "pairwise scorer failed to load");
                        metrics::SCORER_LOADS.with_label_values(&["failed"]).inc();
                        Err(e)
                    }
                    Err(_) => {
                        warn!(timeout_secs, "pairwise scorer load timed out");
                        metrics::SCORER_LOADS.with_label_values(&["timeout"]).inc();
                        Err(ScorerError::LoadTimeout { timeout_secs })
                    }
                }
            })
            .await
            .clone()
    }

    /// Whether a load attempt has completed, successfully or not.
    pub fn initialized(&self) -> bool {
        self.cell.initialized()
    }
}

#[async_trait]
impl PairScorer for LazyScorer {
    fn name(&self) -> &str {
        "lazy"
    }

    async fn score(&self, text_a: &str, text_b: &str) -> Result<f32, ScorerError> {
        self.get().await?.score(text_a, text_b).await
    }

    async fn score_batch(&self, pairs: &[(String, String)]) -> Result<Vec<f32>, ScorerError> {
        self.get().await?.score_batch(pairs).await
    }
}
