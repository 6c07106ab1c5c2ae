//! Chunk planning for batched pair scoring.
//!
//! A single scorer invocation is capped at a hard pair ceiling. When
//! `queries x candidates` exceeds it, the query set is partitioned into
//! sequential chunks small enough to respect the cap; chunks run one at a
//! time to bound peak memory and compute against the scoring backend.

use std::ops::Range;

/// Hard ceiling on query x candidate pairs per scorer call.
pub const MAX_PAIRS_PER_CALL: usize = 5000;

/// Partition `query_count` queries into ranges whose pair product with
/// `candidate_count` stays within `max_pairs`.
///
/// Each chunk holds `floor(max_pairs / candidate_count)` queries, minimum 1:
/// a single query whose candidate row alone exceeds the ceiling still runs,
/// in one oversized call. Ranges cover `0..query_count` in order without
/// gaps or overlap.
pub fn plan_chunks(query_count: usize, candidate_count: usize, max_pairs: usize) -> Vec<Range<usize>> {
    if query_count == 0 {
        return Vec::new();
    }

    let per_chunk = if candidate_count == 0 {
        query_count
    } else {
        (max_pairs / candidate_count).max(1)
    };

    let mut chunks = Vec::with_capacity(query_count.div_ceil(per_chunk));
    let mut start = 0;
    while start < query_count {
        let end = (start + per_chunk).min(query_count);
        chunks.push(start..end);
        start = end;
    }
    chunks
}
