//! Edit-distance based string similarity.

/// Similarity of two strings on a 0..=100 scale.
///
/// Uses the insertion/deletion distance normalized by the combined length,
/// which reduces to `2 * LCS / (len(a) + len(b))`. Identical non-empty
/// strings score 100; if either string is empty the score is 0.
/// Comparison is by Unicode scalar value and case-sensitive.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let common = longest_common_subsequence(&a, &b);
    let total = (a.len() + b.len()) as f64;
    let score = 100.0 * 2.0 * common as f64 / total;

    score.round_ties_even().clamp(0.0, 100.0) as u8
}

/// Length of the longest common subsequence, keeping a single DP row.
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];

    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(ratio("tiny titans", "tiny titans"), 100);
    }

    #[test]
    fn test_disjoint() {
        assert_eq!(ratio("abc", "xyz"), 0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(ratio("", ""), 0);
        assert_eq!(ratio("abc", ""), 0);
        assert_eq!(ratio("", "abc"), 0);
    }

    #[test]
    fn test_partial() {
        // LCS("kitten", "sitting") = "ittn" (4); 2*4/13 = 61.5 -> 62
        assert_eq!(ratio("kitten", "sitting"), 62);
        // One dropped character: 2*5/11 = 90.9 -> 91
        assert_eq!(ratio("lotus", "lotuss"), 91);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [("jeweled lotus", "jeweied l0tus"), ("a", "ab"), ("ocr", "0cr noise")];
        for (a, b) in pairs {
            assert_eq!(ratio(a, b), ratio(b, a));
        }
    }

    #[test]
    fn test_half_rounds_to_even() {
        // 2*1/16 = 12.5 -> 12
        assert_eq!(ratio("a", "abcdefghijklmno"), 12);
    }

    #[test]
    fn test_case_sensitive() {
        assert!(ratio("Lotus", "lotus") < 100);
    }

    #[test]
    fn test_lcs() {
        let a: Vec<char> = "abcbdab".chars().collect();
        let b: Vec<char> = "bdcaba".chars().collect();
        assert_eq!(longest_common_subsequence(&a, &b), 4);
    }
}
