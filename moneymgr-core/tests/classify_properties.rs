use moneymgr_core::{
    BUILTIN_CATALOG, CanonicalIndex, CategoryRecord, CategoryType, MatchRule, build_canonical_index,
    classify_category, normalize_for_matching, prettify_category,
};
use std::sync::Arc;
use std::thread;

#[test]
fn test_documented_examples() {
    let index = build_canonical_index(&[]);

    assert_eq!(prettify_category("🍜 Food"), "Food");
    assert_eq!(prettify_category(""), "Uncategorized");
    assert_eq!(normalize_for_matching("🍜 Food"), "food");
    assert_eq!(normalize_for_matching("   "), "uncategorized");

    assert_eq!(classify_category(Some("🍜 Food"), Some(&index)), "🍜 Food");
    assert_eq!(classify_category(Some("food"), Some(&index)), "🍜 Food");
    assert_eq!(classify_category(Some("coffee shop"), Some(&index)), "☕ coffee");
    assert_eq!(classify_category(Some("xyzzy-unknown-tag"), Some(&index)), "Other");
}

#[test]
fn test_degenerate_labels_never_match() {
    let index = build_canonical_index(&[]);
    for label in [None, Some(""), Some(" "), Some("\t\n"), Some(":"), Some("-"), Some("  :  ")] {
        assert_eq!(classify_category(label, Some(&index)), "Uncategorized", "label {label:?}");
    }
}

#[test]
fn test_result_is_always_an_index_name_or_sentinel() {
    let index = build_canonical_index(&[CategoryRecord::new("🎮 Games", CategoryType::Expense)]);
    let labels = [
        "🍕", "pizza night", "KFC bucket", "TA", "salary advance", "Lotus's", "ค่าอาหาร",
        "\u{200D}\u{FE0F}", "___", "a b c d e f", "Transport (BTS)", "GAMES", "medical bills",
    ];
    for label in labels {
        let got = index.classify(label);
        assert!(
            got == "Uncategorized" || index.iter().any(|(_, e)| e.name == got),
            "{label:?} -> {got:?}"
        );
    }
}

#[test]
fn test_caller_food_is_dropped_in_favour_of_seed() {
    let index = build_canonical_index(&[
        CategoryRecord::new("🍜 Food", CategoryType::Expense),
        CategoryRecord::new("Food", CategoryType::Income),
    ]);
    assert_eq!(index.len(), build_canonical_index(&[]).len());
    assert_eq!(index.classify("Food"), "🍜 Food");
    assert_eq!(index.get("food").unwrap().category_type, CategoryType::Expense);
}

#[test]
fn test_every_unshadowed_seed_round_trips() {
    let index = build_canonical_index(&[]);
    let unshadowed = BUILTIN_CATALOG
        .iter()
        .filter(|seed| !index.shadowed().iter().any(|s| s.name == seed.name));
    for seed in unshadowed {
        let c = index.explain(seed.name);
        assert_eq!(c.name, seed.name);
        assert_eq!(c.rule, MatchRule::Direct);
    }
}

#[test]
fn test_index_is_shareable_across_threads() {
    let index: Arc<CanonicalIndex> = Arc::new(build_canonical_index(&[]));
    let handles: Vec<_> = ["🍜 Food", "coffee shop", "salary", "xyzzy"]
        .into_iter()
        .map(|label| {
            let index = Arc::clone(&index);
            thread::spawn(move || index.classify(label).to_string())
        })
        .collect();

    let got: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(got, vec!["🍜 Food", "☕ coffee", "🌐 TA salary", "Other"]);
}
