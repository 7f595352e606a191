//! Resolve free-form category labels against a [`CanonicalIndex`].
//!
//! Rules, first hit wins:
//! 1. reject empty / ":" / "-" labels
//! 2. direct key lookup
//! 3. word overlap covering at least half of the shorter token list
//! 4. substring containment either way
//! 5. any entry that looks like "Other"
//! 6. "Uncategorized"
//!
//! Every scan walks the index in insertion order.

use serde::Serialize;
use tracing::trace;

use crate::index::{CanonicalEntry, CanonicalIndex};
use crate::normalize::{UNCATEGORIZED, is_js_whitespace, js_trim, normalize_for_matching};

/// Which rule resolved a label
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum MatchRule {
    #[serde(rename = "rejected")]
    Rejected,
    #[serde(rename = "direct")]
    Direct,
    #[serde(rename = "word-overlap")]
    WordOverlap,
    #[serde(rename = "substring")]
    Substring,
    #[serde(rename = "catch-all")]
    CatchAll,
    #[serde(rename = "fallback")]
    Fallback,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::Rejected => "rejected",
            MatchRule::Direct => "direct",
            MatchRule::WordOverlap => "word-overlap",
            MatchRule::Substring => "substring",
            MatchRule::CatchAll => "catch-all",
            MatchRule::Fallback => "fallback",
        }
    }
}

/// Outcome of classifying one label
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Classification<'a> {
    /// Canonical name, or "Uncategorized"
    pub name: &'a str,
    /// Matching key the label normalized to (absent when rejected early)
    pub key: Option<String>,
    pub entry: Option<&'a CanonicalEntry>,
    pub rule: MatchRule,
}

impl<'a> Classification<'a> {
    fn matched(key: String, entry: &'a CanonicalEntry, rule: MatchRule) -> Self {
        Self { name: &entry.name, key: Some(key), entry: Some(entry), rule }
    }

    fn unmatched(key: Option<String>, rule: MatchRule) -> Self {
        Self { name: UNCATEGORIZED, key, entry: None, rule }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.entry.is_none()
    }
}

fn split_words(s: &str) -> Vec<&str> {
    s.split(is_js_whitespace).collect()
}

/// True when the key's tokens overlap the label's tokens enough.
///
/// Every key token found among the label tokens counts, repeats included.
fn words_overlap(key: &str, cat_words: &[&str]) -> bool {
    let key_words = split_words(key);
    let matches = key_words
        .iter()
        .filter(|w| !w.is_empty() && cat_words.contains(*w))
        .count();
    let shorter = key_words.len().min(cat_words.len());
    matches > 0 && matches as f64 >= shorter as f64 * 0.5
}

fn is_other(entry: &CanonicalEntry) -> bool {
    entry.name.to_lowercase().contains("other") || entry.pretty_name.to_lowercase() == "other"
}

impl CanonicalIndex {
    /// Resolve `label` to a canonical name, or "Uncategorized".
    pub fn classify(&self, label: &str) -> &str {
        self.explain(label).name
    }

    /// Resolve `label` and report which rule fired.
    pub fn explain(&self, label: &str) -> Classification<'_> {
        if label.is_empty() {
            return Classification::unmatched(None, MatchRule::Rejected);
        }

        let clean = js_trim(label);
        if clean.is_empty() || clean == ":" || clean == "-" {
            return Classification::unmatched(None, MatchRule::Rejected);
        }

        let normalized = normalize_for_matching(clean);
        // normalization strips edge colons, so this only guards odd inputs
        if normalized == ":" {
            return Classification::unmatched(Some(normalized), MatchRule::Rejected);
        }

        if let Some(entry) = self.get(&normalized) {
            trace!(label, key = %normalized, "direct match");
            return Classification::matched(normalized, entry, MatchRule::Direct);
        }

        let cat_words = split_words(&normalized);
        if let Some((key, entry)) = self
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .find(|(key, _)| words_overlap(key, &cat_words))
        {
            trace!(label, key, "word overlap match");
            return Classification::matched(normalized, entry, MatchRule::WordOverlap);
        }

        if let Some((key, entry)) = self
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .find(|(key, _)| key.contains(normalized.as_str()) || normalized.contains(key))
        {
            trace!(label, key, "substring match");
            return Classification::matched(normalized, entry, MatchRule::Substring);
        }

        if let Some((_, entry)) = self.iter().find(|(_, entry)| is_other(entry)) {
            trace!(label, name = %entry.name, "catch-all match");
            return Classification::matched(normalized, entry, MatchRule::CatchAll);
        }

        trace!(label, key = %normalized, "no match");
        Classification::unmatched(Some(normalized), MatchRule::Fallback)
    }
}

/// Resolve a possibly missing label against a possibly missing index.
///
/// Total: never panics, always returns either a canonical name from `index`
/// or "Uncategorized".
pub fn classify_category<'a>(label: Option<&str>, index: Option<&'a CanonicalIndex>) -> &'a str {
    match (label, index) {
        (Some(label), Some(index)) => index.classify(label),
        _ => UNCATEGORIZED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BUILTIN_CATALOG, CatalogEntry, CategoryType};
    use crate::index::{CategoryRecord, build_canonical_index};

    #[test]
    fn test_rejected_labels() {
        let index = build_canonical_index(&[]);
        for label in ["", "   ", ":", "-", " - ", "\u{3000}"] {
            let c = index.explain(label);
            assert_eq!(c.name, "Uncategorized", "label {label:?}");
            assert_eq!(c.rule, MatchRule::Rejected);
        }
        assert_eq!(classify_category(None, Some(&index)), "Uncategorized");
        assert_eq!(classify_category(Some("🍜 Food"), None), "Uncategorized");
    }

    #[test]
    fn test_direct_match() {
        let index = build_canonical_index(&[]);
        let c = index.explain("🍜 Food");
        assert_eq!(c.name, "🍜 Food");
        assert_eq!(c.rule, MatchRule::Direct);
        assert_eq!(c.key.as_deref(), Some("food"));

        assert_eq!(index.classify("food"), "🍜 Food");
        assert_eq!(index.classify("FOOD BKD"), "🍗 Food BKD");
        assert_eq!(index.classify("Food night market"), "🥞 Food night market");
    }

    #[test]
    fn test_word_overlap_first_key_wins() {
        let index = build_canonical_index(&[]);
        // "coffee" precedes "coffee bkd" in the catalog
        let c = index.explain("coffee shop");
        assert_eq!(c.name, "☕ coffee");
        assert_eq!(c.rule, MatchRule::WordOverlap);

        // "food bkd" is the first key sharing the "food" token
        assert_eq!(index.classify("street food"), "🍗 Food BKD");
        assert_eq!(index.classify("salary"), "🌐 TA salary");
    }

    #[test]
    fn test_word_overlap_threshold_needs_half_of_shorter() {
        let catalog = [CatalogEntry {
            id: "t1",
            name: "alpha beta gamma delta",
            category_type: CategoryType::Expense,
        }];
        let index = CanonicalIndex::with_catalog(&catalog, &[]);
        // 1 of 4 key tokens, shorter list has 3 tokens: 1 < 1.5
        assert_eq!(index.explain("alpha x y").rule, MatchRule::Fallback);
        // 2 of 4 key tokens: 2 >= 1.5
        assert_eq!(index.explain("alpha beta y").rule, MatchRule::WordOverlap);
        // single-token label: 1 >= 0.5
        assert_eq!(index.explain("gamma").rule, MatchRule::WordOverlap);
    }

    #[test]
    fn test_substring_match() {
        let catalog = [CatalogEntry {
            id: "t1",
            name: "🏋️ Gymnasium",
            category_type: CategoryType::Expense,
        }];
        let index = CanonicalIndex::with_catalog(&catalog, &[]);
        let c = index.explain("gym");
        assert_eq!(c.name, "🏋️ Gymnasium");
        assert_eq!(c.rule, MatchRule::Substring);
        assert_eq!(index.explain("gymnasiums").rule, MatchRule::Substring);
    }

    #[test]
    fn test_catch_all_other() {
        let index = build_canonical_index(&[]);
        let c = index.explain("xyzzy-unknown-tag");
        assert_eq!(c.name, "Other");
        assert_eq!(c.rule, MatchRule::CatchAll);
        assert_eq!(c.entry.unwrap().category_type, CategoryType::Income);
    }

    #[test]
    fn test_fallback_without_other_entry() {
        let catalog = [CatalogEntry {
            id: "t1",
            name: "🍜 Food",
            category_type: CategoryType::Expense,
        }];
        let index = CanonicalIndex::with_catalog(&catalog, &[]);
        let c = index.explain("xyzzy-unknown-tag");
        assert_eq!(c.name, "Uncategorized");
        assert_eq!(c.rule, MatchRule::Fallback);
        assert!(c.is_uncategorized());

        let empty = CanonicalIndex::default();
        assert_eq!(empty.classify("anything"), "Uncategorized");
    }

    #[test]
    fn test_catch_all_matches_pretty_other() {
        let catalog = [
            CatalogEntry { id: "t1", name: "🍜 Food", category_type: CategoryType::Expense },
            CatalogEntry { id: "t2", name: "🧾 OTHER", category_type: CategoryType::Expense },
        ];
        let index = CanonicalIndex::with_catalog(&catalog, &[]);
        assert_eq!(index.classify("xyzzy"), "🧾 OTHER");
    }

    #[test]
    fn test_caller_extras_participate() {
        let index = build_canonical_index(&[CategoryRecord::new("🎮 Games", CategoryType::Expense)]);
        assert_eq!(index.classify("games"), "🎮 Games");
        assert_eq!(index.explain("board games").rule, MatchRule::WordOverlap);
    }

    #[test]
    fn test_seeded_names_classify_to_themselves() {
        let index = build_canonical_index(&[]);
        let shadowed: Vec<_> = index.shadowed().iter().map(|s| s.name.as_str()).collect();
        for seed in BUILTIN_CATALOG {
            let got = index.classify(seed.name);
            if shadowed.contains(&seed.name) {
                let owner = index.shadowed().iter().find(|s| s.name == seed.name).unwrap();
                assert_eq!(got, owner.kept_name);
            } else {
                assert_eq!(got, seed.name, "seed {:?}", seed.name);
            }
        }
    }

    #[test]
    fn test_digit_labels_hit_uncategorized_key() {
        let index = build_canonical_index(&[]);
        // digits are emoji code points, so "7-11" shares the "uncategorized" key
        assert_eq!(index.classify("7-11"), "🏪 7-11");
        assert_eq!(index.classify("🎉"), "🏪 7-11");
    }
}
