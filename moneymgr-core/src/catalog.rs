//! Built-in canonical category catalog.
//!
//! The table mirrors the backend's seeded categories, in seed order. Some
//! names collide once normalized ("🌐 TA salary" / "💰 TA Salary",
//! "👦 RONIT" / "😎 Ronit"); both sides are kept here as loaded and the index
//! decides which one owns the key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ledger side of a category or transaction
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CategoryType {
    #[serde(rename = "Income", alias = "income")]
    Income,
    #[default]
    #[serde(rename = "Expense", alias = "expense")]
    Expense,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "Income",
            CategoryType::Expense => "Expense",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(CategoryType::Income),
            "expense" => Ok(CategoryType::Expense),
            other => Err(format!("unknown category type: {other:?} (expected Income or Expense)")),
        }
    }
}

/// One seeded category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub category_type: CategoryType,
}

const fn expense(id: &'static str, name: &'static str) -> CatalogEntry {
    CatalogEntry { id, name, category_type: CategoryType::Expense }
}

const fn income(id: &'static str, name: &'static str) -> CatalogEntry {
    CatalogEntry { id, name, category_type: CategoryType::Income }
}

/// Seeded categories, expense side first. Order matters for classification.
pub static BUILTIN_CATALOG: &[CatalogEntry] = &[
    // Expense
    expense("68ad389ce990cc5e9e26baa4", "🌐 work"),
    expense("68ad389ce990cc5e9e26baaf", "🏠 DORM TU or GV Rent"),
    expense("68ad389ce990cc5e9e26bab1", "🌐 TA salary"),
    expense("68ad389ce990cc5e9e26bab9", "🍗 Food BKD"),
    expense("68ad389ce990cc5e9e26baa8", "🏪 7-11"),
    expense("68ad389ce990cc5e9e26baaa", "☕ coffee"),
    expense("68ad389ce990cc5e9e26baab", "🎁 Lazada"),
    expense("68ad389ce990cc5e9e26baac", "🍊🍊 Lotus"),
    expense("68ad389ce990cc5e9e26baae", "😇 Me"),
    expense("68ad389ce990cc5e9e26bab0", "🥞 Food night market"),
    expense("68ad389ce990cc5e9e26bab6", "✂️ saloon"),
    expense("68ad389ce990cc5e9e26bab7", "🚲 Anywheel"),
    expense("68ad389ce990cc5e9e26baba", "🏊 swim"),
    expense("68ad389ce990cc5e9e26babd", "🍌 Fruits"),
    expense("68ad389ce990cc5e9e26baa6", "🚖 Transport"),
    expense("68ad389ce990cc5e9e26baad", "☕ coffee BKD"),
    expense("68ad389ce990cc5e9e26bab2", "🏛️ Recharge"),
    expense("68ad389ce990cc5e9e26babc", "📈 Bangkok"),
    expense("68ad389ce990cc5e9e26babe", "🍕 Pizza"),
    expense("68ad389ce990cc5e9e26baa5", "🍜 Food"),
    expense("68ad389ce990cc5e9e26baa7", "📒 Education"),
    expense("68ad389ce990cc5e9e26baa9", "🍗 KFC"),
    expense("68ad389ce990cc5e9e26bab3", "👦 RONIT"),
    expense("68ad389ce990cc5e9e26bab4", "🏡 GHAR"),
    expense("68ad389ce990cc5e9e26bab5", "🛂 immigration"),
    expense("68ad389ce990cc5e9e26bab8", "🎉 New Year"),
    expense("68ad389ce990cc5e9e26babb", "🌴 Tour"),
    expense("68ad389ce990cc5e9e26babf", "💊 medical"),
    expense("68ad389ce990cc5e9e26bac0", "kuch bhi"),
    // Income
    income("68ad3991a53fbafe55705814", "💰 TA Salary"),
    income("68ad3991a53fbafe55705817", "Other"),
    income("68ad3991a53fbafe55705815", "💵 Other's proctor duty"),
    income("68ad3991a53fbafe55705816", "🏅 Bonus"),
    income("68ad3991a53fbafe55705818", "😘 Other's people TA"),
    income("68ad3991a53fbafe55705813", "🤑 Allowance"),
    income("68ad3991a53fbafe55705819", "🌐 work salary"),
    income("68b2660281254fc33f42e886", "🤓 Bhaya USA"),
    income("68c8cf24f4d4016ad65f41f0", "😎 Ronit"),
];
