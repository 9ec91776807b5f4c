//! Word-order-insensitive string similarity.
//!
//! The score is an indel ratio: `2 * LCS / (len_a + len_b)` on characters,
//! scaled to 0..=100, computed after sorting each side's tokens. Sorting
//! makes "gare de lyon paris" and "paris gare de lyon" identical while a
//! missing or extra token still costs its characters.

use crate::text::tokens;

/// Similarity of two strings in `0..=100` based on indel distance.
///
/// Two empty strings score 0: an empty side carries no evidence of a match.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let lcs = lcs_len(&a, &b);
    let score = (200 * lcs) as f64 / total as f64;
    score.round() as u8
}

/// Token-sort ratio of two normalized strings.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut t: Vec<&str> = tokens(s).collect();
    t.sort_unstable();
    t.join(" ")
}

/// Longest common subsequence length, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Score is symmetric
        #[test]
        fn symmetric(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
            prop_assert_eq!(token_sort_ratio(&a, &b), token_sort_ratio(&b, &a));
        }

        /// Reversing token order never changes the score
        #[test]
        fn order_insensitive(words in proptest::collection::vec("[a-z]{1,8}", 1..5), other in "[a-z ]{1,20}") {
            let forward = words.join(" ");
            let reversed: Vec<_> = words.iter().rev().cloned().collect();
            let reversed = reversed.join(" ");
            prop_assert_eq!(
                token_sort_ratio(&forward, &other),
                token_sort_ratio(&reversed, &other)
            );
        }

        /// Scores stay within 0..=100
        #[test]
        fn bounded(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
            prop_assert!(token_sort_ratio(&a, &b) <= 100);
        }
    }
}
