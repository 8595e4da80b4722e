//! Property-based tests for commit subject filtering.
//!
//! These tests use proptest to generate random subjects and verify that
//! the include/exclude invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::filter::{compile, matches, PatternSet};
    use proptest::prelude::*;

    proptest! {
        /// Property: empty include and exclude lists accept every line
        #[test]
        fn empty_lists_accept_everything(line in ".*") {
            prop_assert!(matches(&line, &[], &[]));
            prop_assert!(PatternSet::empty().matches(&line));
        }

        /// Property: a line containing an exclude word is always rejected,
        /// whatever the include list says
        #[test]
        fn exclude_always_wins(prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}") {
            let line = format!("{}wip{}", prefix, suffix);
            let include = vec![compile(".*").unwrap(), compile("wip").unwrap()];
            let exclude = vec![compile("wip").unwrap()];
            prop_assert!(!matches(&line, &include, &exclude));
        }

        /// Property: a line is accepted only if every include pattern is found
        #[test]
        fn include_requires_all(words in proptest::collection::vec("[a-z]{3,8}", 1..5), line in "[a-z ]{0,40}") {
            let include: Vec<_> = words
                .iter()
                .map(|w| compile(&regex::escape(w)).unwrap())
                .collect();
            let accepted = matches(&line, &include, &[]);
            let all_present = words.iter().all(|w| line.contains(w.as_str()));
            prop_assert_eq!(accepted, all_present);
        }

        /// Property: matching ignores ASCII case
        #[test]
        fn matching_ignores_case(word in "[a-z]{1,10}", line in "[a-z ]{0,30}") {
            let set = PatternSet::new([word.to_uppercase()], Vec::<String>::new()).unwrap();
            prop_assert_eq!(set.matches(&line), line.contains(word.as_str()));
        }
    }
}
