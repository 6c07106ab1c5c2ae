//! Penalty contributors and their reducer.
//!
//! Each heuristic that can deduct confidence from a semantic score is
//! modeled as a named contributor returning a value in 0.0-1.0. Contributors
//! are combined by [`combine`], which takes the maximum: the strongest
//! single objection wins, penalties are not additive.

use crate::matching::name::performer_penalty;
use crate::similarity::similarity;

/// Title similarity below this triggers a title penalty.
const TITLE_PENALTY_FLOOR: f32 = 0.3;

/// A named penalty in 0.0-1.0 where 0.0 deducts nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyContributor {
    pub name: &'static str,
    pub value: f32,
}

/// Reduce contributors to a single penalty by taking the maximum.
///
/// Returns 0.0 for an empty set. The result is clamped to 0.0-1.0.
pub fn combine(contributors: &[PenaltyContributor]) -> f32 {
    contributors
        .iter()
        .fold(0.0f32, |acc, c| acc.max(c.value))
        .clamp(0.0, 1.0)
}

/// Performer-roster contributor.
///
/// Only produced when the query names a performer and the candidate roster
/// is non-empty; an absent roster is no evidence either way.
pub fn performer_contributor(
    query_performer: Option<&str>,
    candidate_performers: &[String],
) -> Option<PenaltyContributor> {
    let performer = query_performer?;
    if candidate_performers.is_empty() {
        return None;
    }
    Some(PenaltyContributor {
        name: "performer",
        value: performer_penalty(performer, candidate_performers),
    })
}

/// Title-divergence contributor, applied in batch scoring only.
///
/// Titles more than 70% apart draw `0.5 * (1 - similarity)`.
pub fn title_contributor(query_title: &str, candidate_title: &str) -> Option<PenaltyContributor> {
    let sim = similarity(query_title, candidate_title);
    if sim < TITLE_PENALTY_FLOOR {
        Some(PenaltyContributor {
            name: "title",
            value: 0.5 * (1.0 - sim),
        })
    } else {
        None
    }
}
