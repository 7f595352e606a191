//! Canonical category index: normalized key -> canonical entry.
//!
//! Built from the seeded catalog first, then caller-supplied categories. The
//! first entry inserted for a key owns it; nothing is ever overwritten.
//! Iteration follows insertion order, which the classifier relies on for
//! first-match-wins tie breaks.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::catalog::{BUILTIN_CATALOG, CatalogEntry, CategoryType};
use crate::normalize::{normalize_for_matching, prettify_category};

/// A caller-supplied category, as returned by the category endpoint.
///
/// Every field is optional; see [`CanonicalIndex::with_catalog`] for defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryRecord {
    #[serde(default)]
    pub name: Option<String>,
    /// Unknown or malformed values read as `None`
    #[serde(default, rename = "categoryType", deserialize_with = "deserialize_category_type")]
    pub category_type: Option<CategoryType>,
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
}

/// Lenient `categoryType`: anything other than Income/Expense becomes `None`
/// so one odd record does not reject a whole category list.
fn deserialize_category_type<'de, D>(deserializer: D) -> Result<Option<CategoryType>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => match s.parse() {
            Ok(kind) => Some(kind),
            Err(_) => {
                debug!(value = %s, "unknown categoryType; treating as unset");
                None
            }
        },
        _ => None,
    })
}

impl CategoryRecord {
    pub fn new(name: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            name: Some(name.into()),
            category_type: Some(category_type),
            id: None,
        }
    }
}

/// An index entry
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CanonicalEntry {
    /// Canonical display label, decoration included (e.g. "🍜 Food")
    pub name: String,
    /// `name` with emoji and extra whitespace stripped
    pub pretty_name: String,
    pub id: Option<String>,
    pub category_type: CategoryType,
}

/// A seeded category that lost its key to an earlier seeded category
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShadowedEntry {
    pub key: String,
    pub name: String,
    pub category_type: CategoryType,
    /// Name of the entry that owns the key
    pub kept_name: String,
}

/// Insertion-ordered, immutable lookup table keyed by normalized label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalIndex {
    entries: Vec<(String, CanonicalEntry)>,
    positions: HashMap<String, usize>,
    shadowed: Vec<ShadowedEntry>,
}

impl CanonicalIndex {
    /// Index over the built-in catalog plus `categories`.
    pub fn build(categories: &[CategoryRecord]) -> Self {
        Self::with_catalog(BUILTIN_CATALOG, categories)
    }

    /// Index over an explicit catalog plus `categories`.
    ///
    /// Caller records without a name are skipped. A missing `category_type`
    /// defaults to `Expense`, a missing or empty id to `None`.
    pub fn with_catalog(catalog: &[CatalogEntry], categories: &[CategoryRecord]) -> Self {
        let mut index = Self::default();

        for seed in catalog {
            let key = normalize_for_matching(seed.name);
            if let Some(kept_name) = index.get(&key).map(|e| e.name.clone()) {
                debug!(key = %key, name = seed.name, kept = %kept_name, "seeded category shadowed");
                index.shadowed.push(ShadowedEntry {
                    key,
                    name: seed.name.to_string(),
                    category_type: seed.category_type,
                    kept_name,
                });
                continue;
            }
            index.insert(
                key,
                CanonicalEntry {
                    name: seed.name.to_string(),
                    pretty_name: prettify_category(seed.name),
                    id: Some(seed.id.to_string()),
                    category_type: seed.category_type,
                },
            );
        }

        for record in categories {
            let Some(name) = record.name.as_deref().filter(|n| !n.is_empty()) else {
                continue;
            };
            let key = normalize_for_matching(name);
            if index.contains_key(&key) {
                debug!(key = %key, name, "caller category collides with existing key; dropped");
                continue;
            }
            index.insert(
                key,
                CanonicalEntry {
                    name: name.to_string(),
                    pretty_name: prettify_category(name),
                    id: record.id.clone().filter(|id| !id.is_empty()),
                    category_type: record.category_type.unwrap_or_default(),
                },
            );
        }

        debug!(
            keys = index.len(),
            shadowed = index.shadowed.len(),
            "canonical index built"
        );
        index
    }

    fn insert(&mut self, key: String, entry: CanonicalEntry) {
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, entry));
    }

    pub fn get(&self, key: &str) -> Option<&CanonicalEntry> {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Entries in insertion order: seeded categories first, then caller extras.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CanonicalEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seeded categories that did not make it into the index.
    pub fn shadowed(&self) -> &[ShadowedEntry] {
        &self.shadowed
    }
}

/// Build the canonical index from the built-in catalog and `categories`.
pub fn build_canonical_index(categories: &[CategoryRecord]) -> CanonicalIndex {
    CanonicalIndex::build(categories)
}
