use super::similarity::ratio;
use crate::data::model::ReferenceTable;

/// Result of matching a query against a table's keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyMatch<'a> {
    pub key: Option<&'a str>,
    pub score: u8,
}

impl KeyMatch<'_> {
    pub const NONE: KeyMatch<'static> = KeyMatch { key: None, score: 0 };
}

/// Finds the key most similar to `query`, ignoring case.
///
/// Scans every key and keeps the first one with the strictly highest
/// score. There is no minimum score: any key scoring above 0 can be
/// returned, even for a query unrelated to the table. A table that is
/// empty, or where every key scores 0, gives `KeyMatch::NONE`.
pub fn best_match<'a>(table: &'a ReferenceTable, query: &str) -> KeyMatch<'a> {
    let query = query.to_lowercase();
    let mut best = KeyMatch::NONE;

    for key in table.keys() {
        let score = ratio(&key.to_lowercase(), &query);
        if score > best.score {
            best = KeyMatch {
                key: Some(key.as_str()),
                score,
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::AugmentStats;

    fn table(names: &[&str]) -> ReferenceTable {
        names
            .iter()
            .map(|n| (n.to_string(), AugmentStats::default()))
            .collect()
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(best_match(&ReferenceTable::new(), "anything"), KeyMatch::NONE);
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let t = table(&["Jeweled Lotus", "Tiny Titans"]);
        let m = best_match(&t, "jeweled LOTUS");
        assert_eq!(m.key, Some("Jeweled Lotus"));
        assert_eq!(m.score, 100);
    }

    #[test]
    fn test_noisy_read_resolves() {
        let t = table(&["Jeweled Lotus", "Tiny Titans", "Level Up"]);
        let m = best_match(&t, "Jeweied L0tus");
        assert_eq!(m.key, Some("Jeweled Lotus"));
        assert!(m.score > 70 && m.score < 100);
    }

    #[test]
    fn test_tie_keeps_first_key() {
        // "ab" scores the same against both keys; first in key order wins
        let t = table(&["ac", "ad"]);
        let m = best_match(&t, "ab");
        assert_eq!(m.key, Some("ac"));
        assert_eq!(m.score, 50);
    }

    #[test]
    fn test_unrelated_query_still_matches() {
        // No threshold: any overlap is enough to return a key
        let t = table(&["Level Up"]);
        let m = best_match(&t, "xyz e");
        assert_eq!(m.key, Some("Level Up"));
        assert!(m.score > 0 && m.score < 40);
    }

    #[test]
    fn test_zero_scores_give_no_key() {
        let t = table(&["abc", "def"]);
        assert_eq!(best_match(&t, "xyz"), KeyMatch::NONE);
        assert_eq!(best_match(&t, ""), KeyMatch::NONE);
    }

    #[test]
    fn test_deterministic() {
        let t = table(&["Cybernetic Implants", "Cybernetic Uplink", "Cybernetic Shell"]);
        let first = best_match(&t, "Cybernetc Uplnk");
        for _ in 0..10 {
            assert_eq!(best_match(&t, "Cybernetc Uplnk"), first);
        }
        assert_eq!(first.key, Some("Cybernetic Uplink"));
    }
}
