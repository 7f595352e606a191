//! Chart-ready aggregates: per-category breakdowns, side totals, monthly series.
//!
//! Transactions are bucketed by their classified canonical category, so
//! "food", "🍜 Food" and "FOOD" all land in the same slice.

use chrono::{Datelike, Month, NaiveDate, TimeZone};
use moneymgr_core::{
    CanonicalIndex, CategoryType, Transaction, classify_category, prettify_category,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Reporting window, evaluated on the transaction's local calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    Month { year: i32, month: u32 },
    Year(i32),
    All,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Period::Month { year, month } => date.year() == year && date.month() == month,
            Period::Year(year) => date.year() == year,
            Period::All => true,
        }
    }
}

/// One pie slice
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySlice {
    /// Canonical category name (or "Uncategorized")
    pub label: String,
    pub pretty_label: String,
    pub value: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub count: usize,
}

/// One bar of a yearly bar chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthValue {
    pub month: &'static str,
    pub value: f64,
}

/// Aggregation over a borrowed transaction list
pub struct Analysis<'a, Tz: TimeZone> {
    txns: &'a [Transaction],
    index: &'a CanonicalIndex,
    tz: Tz,
}

impl<'a, Tz: TimeZone> Analysis<'a, Tz> {
    pub fn new(txns: &'a [Transaction], index: &'a CanonicalIndex, tz: Tz) -> Self {
        Self { txns, index, tz }
    }

    fn in_period(&self, period: Period) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.txns
            .iter()
            .filter(move |t| period.contains(t.local_date(&self.tz)))
    }

    /// Sum amounts per classified category for one ledger side.
    /// Slices keep the order in which their category first appears.
    pub fn breakdown(&self, side: CategoryType, period: Period) -> Vec<CategorySlice> {
        let mut slices: Vec<CategorySlice> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for txn in self.in_period(period).filter(|t| t.kind == side) {
            let label = classify_category(Some(txn.category.as_str()), Some(self.index));
            let i = *positions.entry(label).or_insert_with(|| {
                slices.push(CategorySlice {
                    label: label.to_string(),
                    pretty_label: prettify_category(label),
                    value: 0.0,
                    count: 0,
                });
                slices.len() - 1
            });
            slices[i].value += txn.amount;
            slices[i].count += 1;
        }

        debug!(side = %side, ?period, slices = slices.len(), "category breakdown");
        slices
    }

    pub fn side_total(&self, side: CategoryType, period: Period) -> f64 {
        self.in_period(period)
            .filter(|t| t.kind == side)
            .map(|t| t.amount)
            .sum()
    }

    pub fn summary(&self, period: Period) -> Summary {
        let mut s = Summary::default();
        for txn in self.in_period(period) {
            match txn.kind {
                CategoryType::Income => s.income += txn.amount,
                CategoryType::Expense => s.expense += txn.amount,
            }
            s.net += txn.signed_amount();
            s.count += 1;
        }
        s
    }

    /// January..December totals for one side of `year`.
    pub fn monthly(&self, side: CategoryType, year: i32) -> [MonthValue; 12] {
        let mut sums = [0.0_f64; 12];
        for txn in self.in_period(Period::Year(year)).filter(|t| t.kind == side) {
            sums[txn.local_date(&self.tz).month0() as usize] += txn.amount;
        }

        let mut month = Month::January;
        std::array::from_fn(|i| {
            let bar = MonthValue { month: month.name(), value: sums[i] };
            month = month.succ();
            bar
        })
    }
}

/// Share of each slice in its side's total, as a percentage.
pub fn shares(slices: &[CategorySlice]) -> Vec<f64> {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    slices
        .iter()
        .map(|s| if total > 0.0 { s.value / total * 100.0 } else { 0.0 })
        .collect()
}
