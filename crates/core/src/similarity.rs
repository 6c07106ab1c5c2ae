//! Edit-distance based string similarity.
//!
//! The primitive under every fuzzy heuristic in the matching pipeline.
//! Inputs are short (names and release titles), so the full DP matrix is
//! computed without early exits.

/// Calculate Levenshtein edit distance between two strings.
///
/// Unit costs for insert, delete and substitute. Operates on chars, not
/// bytes, so multi-byte input is counted correctly.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(a_len + 1) {
        row[0] = i;
    }
    for (j, val) in matrix[0].iter_mut().enumerate().take(b_len + 1) {
        *val = j;
    }

    for (i, a_char) in a_chars.iter().enumerate() {
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if *a_char == *b_char { 0 } else { 1 };
            matrix[i + 1][j + 1] = (matrix[i][j + 1] + 1)
                .min(matrix[i + 1][j] + 1)
                .min(matrix[i][j] + cost);
        }
    }

    matrix[a_len][b_len]
}

/// Normalized similarity between two strings (0.0-1.0).
///
/// Defined as `(max_len - levenshtein) / max_len`. Two empty strings are
/// identical and score 1.0. Operand order does not affect the result.
pub fn similarity(a: &str, b: &str) -> f32 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let max_len = a_len.max(b_len);

    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein(a, b);
    (max_len - distance) as f32 / max_len as f32
}
