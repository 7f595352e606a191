//! moneymgr-core: category normalization, the canonical catalog/index, and the
//! classifier that maps free-form labels onto canonical categories.
//!
//! Everything here is pure and synchronous; an index is immutable once built
//! and can be shared across threads.

pub mod catalog;
pub mod classify;
pub mod index;
pub mod normalize;
pub mod transaction;

pub use catalog::{BUILTIN_CATALOG, CatalogEntry, CategoryType};
pub use classify::{Classification, MatchRule, classify_category};
pub use index::{
    CanonicalEntry, CanonicalIndex, CategoryRecord, ShadowedEntry, build_canonical_index,
};
pub use normalize::{
    UNCATEGORIZED, UNCATEGORIZED_KEY, normalize_for_matching, prettify_category,
    strip_leading_emoji,
};
pub use transaction::Transaction;
