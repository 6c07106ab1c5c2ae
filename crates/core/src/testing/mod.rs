//! Testing utilities and mock implementations.
//!
//! Mock implementations of the external boundary traits, allowing the full
//! acquisition flow to be exercised without a model runtime or real
//! indexers.

mod mock_indexer;
mod mock_scorer;

pub use mock_indexer::MockIndexer;
pub use mock_scorer::MockPairScorer;
