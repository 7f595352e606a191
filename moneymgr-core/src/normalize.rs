//! Label normalization: matching keys and display names.
//!
//! Both pipelines share the same Unicode cleanup (NFKC, zero-width,
//! variation selectors, combining marks, emoji). Only the matching key is
//! lowercased and stripped of edge punctuation.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Fallback matching key for labels that are empty after cleanup.
pub const UNCATEGORIZED_KEY: &str = "uncategorized";

/// Fallback display label, also the classifier's sentinel bucket.
pub const UNCATEGORIZED: &str = "Uncategorized";

// ECMAScript whitespace set (WhiteSpace + LineTerminator), kept identical to
// the web client so keys computed on either side agree.
const WS: &str = r"\t\n\x0B\x0C\r \x{00A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static ZERO_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{200B}-\x{200D}\x{FEFF}]").unwrap());
static VARIATION_SELECTORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{FE00}-\x{FE0F}]").unwrap());
static COMBINING_MARKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{M}+").unwrap());
// `Emoji` covers ASCII digits, '#', '*' as well; they are stripped on purpose.
static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Emoji_Presentation}\p{Emoji}\p{Extended_Pictographic}]").unwrap()
});
static UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("[{WS}]+")).unwrap());
static LEADING_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\-:.,]+").unwrap());
static TRAILING_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\-:.,]+$").unwrap());
// Pictograph prefix used by the CSV export label cleanup.
static LEADING_PICTOGRAPHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^[\x{{1F300}}-\x{{1F6FF}}\x{{1F900}}-\x{{1F9FF}}]+[{WS}]+(.*)"
    ))
    .unwrap()
});

pub(crate) fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub(crate) fn js_trim(s: &str) -> &str {
    s.trim_matches(is_js_whitespace)
}

/// NFKC, trim, then strip zero-width chars, variation selectors, combining
/// marks and emoji. Underscores become spaces and whitespace runs collapse.
fn strip_decoration(label: &str) -> String {
    let composed: String = label.nfkc().collect();
    let mut s = js_trim(&composed).to_string();

    for re in [&*ZERO_WIDTH, &*VARIATION_SELECTORS, &*COMBINING_MARKS, &*EMOJI] {
        s = re.replace_all(&s, "").into_owned();
    }

    let s = UNDERSCORES.replace_all(&s, " ");
    WHITESPACE_RUN.replace_all(&s, " ").into_owned()
}

/// Compute the matching key for a category label.
///
/// The result is never empty: labels that clean up to nothing (including the
/// empty string) yield [`UNCATEGORIZED_KEY`].
pub fn normalize_for_matching(label: &str) -> String {
    if label.is_empty() {
        return UNCATEGORIZED_KEY.to_string();
    }

    let cleaned = strip_decoration(label);
    let cleaned = LEADING_PUNCT.replace(&cleaned, "");
    let cleaned = TRAILING_PUNCT.replace(&cleaned, "");
    let key = js_trim(&cleaned).to_lowercase();

    if key.is_empty() {
        UNCATEGORIZED_KEY.to_string()
    } else {
        key
    }
}

/// Display form of a label: decoration stripped, case preserved.
pub fn prettify_category(label: &str) -> String {
    if label.is_empty() {
        return UNCATEGORIZED.to_string();
    }

    let cleaned = strip_decoration(label);
    let pretty = js_trim(&cleaned);

    if pretty.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        pretty.to_string()
    }
}

/// Drop a leading run of pictographs when it is followed by whitespace.
///
/// Labels without such a prefix come back unchanged.
pub fn strip_leading_emoji(label: &str) -> &str {
    match LEADING_PICTOGRAPHS.captures(label).and_then(|c| c.get(1)) {
        Some(rest) if !rest.as_str().is_empty() => rest.as_str(),
        _ => label,
    }
}
