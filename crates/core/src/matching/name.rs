//! Performer name matching heuristic.
//!
//! Decides how much a candidate's performer roster supports or contradicts
//! the query's expected performer, producing a penalty in 0.0-1.0 where 0.0
//! means the match is fully trusted.
//!
//! The single strongest negative signal in this domain is a first-name
//! mismatch: distinct identities sharing a surname are common, so surname or
//! alias overlap is never allowed to rescue a wrong first name.

use crate::similarity::similarity;

/// Penalty for a best match below the rejection floor.
const REJECT_PENALTY: f32 = 0.95;
/// Best-match score at or above which no penalty applies.
const TRUST_FLOOR: f32 = 0.7;
/// Best-match score below which the match is rejected outright.
const REJECT_FLOOR: f32 = 0.3;

/// Normalize a performer name for comparison.
///
/// Lowercases, strips an "aka" / "also known as" suffix and everything after
/// it, strips non-word characters (keeping spaces), and collapses
/// whitespace.
pub fn normalize_performer(name: &str) -> String {
    let lower = name.to_lowercase();

    // Cut at an alias marker if present
    let base = strip_alias_suffix(&lower);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_alias_suffix(name: &str) -> &str {
    for marker in ["also known as", "aka"] {
        if let Some(pos) = find_word(name, marker) {
            return name[..pos].trim_end();
        }
    }
    name
}

/// Find `word` in `text` at word boundaries, returning its byte offset.
fn find_word(text: &str, word: &str) -> Option<usize> {
    let mut start = 0;
    while let Some(rel) = text[start..].find(word) {
        let pos = start + rel;
        let before_ok = pos == 0
            || text[..pos]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric());
        let after_ok = text[pos + word.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return Some(pos);
        }
        start = pos + word.len();
    }
    None
}

/// Extract the "main name" from a normalized query performer.
///
/// Takes the first two whitespace tokens longer than 2 chars, falling back
/// to the first token, then to the whole string. Tuned for "First Last"
/// naming; name orders from other conventions are not special-cased.
pub fn main_query_name(normalized: &str) -> String {
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let main: Vec<&str> = tokens.iter().filter(|t| t.len() > 2).take(2).copied().collect();
    if !main.is_empty() {
        return main.join(" ");
    }

    if let Some(first) = tokens.first() {
        return (*first).to_string();
    }

    normalized.to_string()
}

/// Similarity between two normalized performer names with a strict
/// first-token rule.
///
/// A first-name mismatch hard-caps the result: `0.2 * similarity` normally,
/// `0.5 * similarity` only when both first tokens are long (>3 chars) and
/// themselves >0.9 similar (typo tolerance). Matching first names unlock the
/// full blend of token overlap and string similarity.
pub fn performer_similarity(a: &str, b: &str) -> f32 {
    let a_tokens: Vec<&str> = a.split_whitespace().collect();
    let b_tokens: Vec<&str> = b.split_whitespace().collect();

    let (a_first, b_first) = match (a_tokens.first(), b_tokens.first()) {
        (Some(af), Some(bf)) => (*af, *bf),
        _ => return if a == b { 1.0 } else { 0.0 },
    };

    if a_first != b_first {
        let typo_tolerated =
            a_first.len() > 3 && b_first.len() > 3 && similarity(a_first, b_first) > 0.9;
        let cap = if typo_tolerated { 0.5 } else { 0.2 };
        return cap * similarity(a, b);
    }

    if a == b {
        return 1.0;
    }

    // One name contained in the other, e.g. "jade" vs "jade harper"
    let longer_len = a.chars().count().max(b.chars().count());
    if (a.contains(b) || b.contains(a)) && longer_len <= 15 {
        return 0.9;
    }

    let overlap = token_overlap_ratio(&a_tokens, &b_tokens);
    0.6 * overlap + 0.4 * similarity(a, b)
}

/// Ratio of matching post-first-name tokens over the larger token count.
fn token_overlap_ratio(a_tokens: &[&str], b_tokens: &[&str]) -> f32 {
    let max_tokens = a_tokens.len().max(b_tokens.len());
    if max_tokens == 0 {
        return 0.0;
    }

    let a_rest = &a_tokens[1..];
    let b_rest = &b_tokens[1..];

    let mut remaining: Vec<&str> = b_rest.to_vec();
    let mut matched = 0usize;
    for tok in a_rest {
        if let Some(pos) = remaining.iter().position(|r| r == tok) {
            remaining.swap_remove(pos);
            matched += 1;
        }
    }

    matched as f32 / max_tokens as f32
}

/// Map the best candidate similarity to a penalty.
///
/// `>= 0.7` fully trusts the match; the middle band scales with distance
/// from perfect; below `0.3` the match is all but rejected.
pub fn penalty_from_best_match(best: f32) -> f32 {
    if best >= TRUST_FLOOR {
        0.0
    } else if best >= REJECT_FLOOR {
        0.6 * (1.0 - best)
    } else {
        REJECT_PENALTY
    }
}

/// Penalty for a candidate performer roster against the query performer.
///
/// Normalizes both sides, reduces the query to its main name, takes the
/// maximum per-performer similarity and maps it to a penalty. An empty
/// roster yields the rejection penalty; callers decide whether to apply it
/// at all (the scorer only does when the roster is non-empty).
pub fn performer_penalty(query_performer: &str, candidate_performers: &[String]) -> f32 {
    let normalized_query = normalize_performer(query_performer);
    let main_name = main_query_name(&normalized_query);

    let best = candidate_performers
        .iter()
        .map(|p| performer_similarity(&main_name, &normalize_performer(p)))
        .fold(0.0f32, f32::max);

    penalty_from_best_match(best)
}
