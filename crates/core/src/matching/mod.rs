//! Candidate matching - relevance scoring and selection.
//!
//! This module turns indexer results into at most one confident selection
//! per subscription query:
//! - canonical pair texts scored by an external semantic [`PairScorer`]
//!   (cross-encoder), normalized by sigmoid;
//! - deterministic heuristic penalties (performer first-name rule, title
//!   divergence) reduced by maximum and multiplied into the score;
//! - chunked batch execution under a hard pair ceiling;
//! - a three-band classification for callers that keep uncertain results.
//!
//! The semantic backend is a boundary: [`LazyScorer`] handles its one-time
//! load, and [`HeuristicScorer`] is the offline fallback when it is
//! unavailable.

pub mod batch;
mod heuristic;
mod loader;
pub mod name;
pub mod penalty;
mod scorer;
mod traits;
mod types;

pub use batch::{plan_chunks, MAX_PAIRS_PER_CALL};
pub use heuristic::HeuristicScorer;
pub use loader::LazyScorer;
pub use scorer::{sigmoid, RelevanceScorer};
pub use traits::{PairScorer, ScorerError};
pub use types::{BestMatch, MatchBand, MatchCandidate, MatchQuery};
