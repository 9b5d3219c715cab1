use std::collections::HashMap;

use crate::domain::{RankedFrequencyMap, Token, WordCount};

/// Counts exact (case-sensitive) token occurrences and keeps the `top_k`
/// most frequent. Entries are kept in first-occurrence order before the
/// stable sort, so ties resolve the same way on every run.
pub fn aggregate<T: AsRef<str>>(tokens: &[T], top_k: usize) -> RankedFrequencyMap {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<WordCount> = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        match slots.get(token) {
            Some(&slot) => entries[slot].count += 1,
            None => {
                slots.insert(token, entries.len());
                entries.push(WordCount {
                    word: Token::from(token),
                    count: 1,
                });
            }
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top_k);
    RankedFrequencyMap::from_sorted(entries)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::{config::env::DEFAULT_TOP_K, text::tokenizer::tokenize};

    fn pairs(map: &RankedFrequencyMap) -> Vec<(&str, usize)> {
        map.iter().map(|e| (e.word.as_str(), e.count)).collect()
    }

    #[test]
    fn ranks_by_count_then_first_occurrence() {
        let tokens = tokenize("cat dog cat bird cat dog");
        let ranked = aggregate(&tokens, DEFAULT_TOP_K);
        assert_eq!(pairs(&ranked), vec![("cat", 3), ("dog", 2), ("bird", 1)]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let ranked = aggregate(&["zeta", "alpha", "mid", "alpha", "zeta"], DEFAULT_TOP_K);
        assert_eq!(pairs(&ranked), vec![("zeta", 2), ("alpha", 2), ("mid", 1)]);
    }

    #[test]
    fn case_sensitive_counts() {
        let ranked = aggregate(&["Word", "word", "word"], DEFAULT_TOP_K);
        assert_eq!(pairs(&ranked), vec![("word", 2), ("Word", 1)]);
    }

    #[test]
    fn empty_input_gives_empty_map() {
        let empty: [&str; 0] = [];
        let ranked = aggregate(&empty, DEFAULT_TOP_K);
        assert!(ranked.is_empty());
        assert_eq!(ranked.max_count(), None);
    }

    #[test]
    fn truncates_to_top_k() {
        let tokens: Vec<String> = (0..25)
            .flat_map(|i| std::iter::repeat(format!("w{i}")).take(25 - i))
            .collect();
        let ranked = aggregate(&tokens, DEFAULT_TOP_K);
        assert_eq!(ranked.len(), DEFAULT_TOP_K);
        assert_eq!(ranked.max_count(), Some(25));
        assert_eq!(ranked.iter().last().map(|e| e.word.as_str()), Some("w19"));
    }

    proptest! {
        #[test]
        fn ranked_map_invariants(
            tokens in proptest::collection::vec("[a-f]{2,3}", 0..200),
            top_k in 1usize..40,
        ) {
            let ranked = aggregate(&tokens, top_k);
            let distinct: HashSet<&String> = tokens.iter().collect();

            prop_assert!(ranked.len() <= top_k.min(distinct.len()));
            prop_assert!(ranked.counts().windows(2).all(|w| w[0] >= w[1]));
            prop_assert!(ranked.total() <= tokens.len());
            if distinct.len() <= top_k {
                prop_assert_eq!(ranked.total(), tokens.len());
            }
        }
    }
}
