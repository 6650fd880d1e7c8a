//! Token-set string similarity
//!
//! Both inputs are split into whitespace tokens. The sorted intersection and
//! the two sorted differences are compared pairwise with a normalized Indel
//! ratio, and the best of those comparisons wins. Word order and repeated
//! words do not matter.

use std::collections::BTreeSet;

/// Normalized Indel similarity in [0, 1]
///
/// `1 - (insertions + deletions) / (len(a) + len(b))`, computed over chars.
/// Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();

    if total == 0 {
        return 1.0;
    }

    let lcs = longest_common_subsequence(&a, &b);
    let indel_distance = total - 2 * lcs;

    1.0 - indel_distance as f64 / total as f64
}

/// Token-set similarity in [0, 1]
///
/// Returns 0.0 when either side has no tokens, and 1.0 when the token sets
/// share at least one token and one is a subset of the other.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 1.0;
    }

    let sect = intersection.join(" ");
    let diff_a = only_a.join(" ");
    let diff_b = only_b.join(" ");

    let mut best = ratio(&diff_a, &diff_b);

    if !sect.is_empty() {
        let sect_a = format!("{sect} {diff_a}");
        let sect_b = format!("{sect} {diff_b}");
        best = best.max(ratio(&sect, &sect_a)).max(ratio(&sect, &sect_b));
    }

    best
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
