//! Transaction records as served by the backend

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::CategoryType;

/// A logged income or expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Backend identifier, absent for locally built records
    #[serde(default, rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// When the transaction happened (stored in UTC)
    pub date: DateTime<Utc>,
    /// Cash, Online, ...
    #[serde(default)]
    pub account: String,
    /// Raw category label as typed or picked by the user
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub currency: String,
    /// Ledger side
    #[serde(rename = "type")]
    pub kind: CategoryType,
    /// Always positive; the side is carried by `kind`
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
}

/// Accepts `12.5`, `"12.5"`, `""` or `null` (the last two as 0).
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null(Option<()>),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) if s.trim().is_empty() => Ok(0.0),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {s:?}"))),
        Raw::Null(_) => Ok(0.0),
    }
}

impl Transaction {
    /// Create a new Transaction
    pub fn new(
        date: DateTime<Utc>,
        account: impl Into<String>,
        category: impl Into<String>,
        kind: CategoryType,
        amount: f64,
    ) -> Self {
        Self {
            id: None,
            date,
            account: account.into(),
            category: category.into(),
            note: String::new(),
            currency: String::new(),
            kind,
            amount,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == CategoryType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == CategoryType::Income
    }

    /// Calendar day of the transaction in `tz`
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.date.with_timezone(tz).date_naive()
    }

    /// Signed amount: income positive, expense negative
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            CategoryType::Income => self.amount,
            CategoryType::Expense => -self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_transaction_from_backend_json() {
        let json = r#"{
            "_id": "68c0",
            "date": "2025-09-01T18:30:00.000Z",
            "account": "Cash",
            "category": "🍜 Food",
            "note": "noodles",
            "currency": "THB",
            "type": "Expense",
            "amount": "120",
            "__v": 0
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id.as_deref(), Some("68c0"));
        assert_eq!(tx.amount, 120.0);
        assert!(tx.is_expense());
        assert_eq!(tx.signed_amount(), -120.0);

        // 18:30 UTC is already the next day in Bangkok
        let bkk = FixedOffset::east_opt(7 * 3600).unwrap();
        assert_eq!(tx.local_date(&bkk), NaiveDate::from_ymd_opt(2025, 9, 2).unwrap());
        assert_eq!(tx.local_date(&Utc), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    }

    #[test]
    fn test_amount_variants() {
        let base = r#"{"date": "2025-01-01T00:00:00Z", "type": "Income", "amount": AMT}"#;
        for (raw, want) in [("15.5", 15.5), ("\"15.5\"", 15.5), ("\"\"", 0.0), ("null", 0.0)] {
            let tx: Transaction = serde_json::from_str(&base.replace("AMT", raw)).unwrap();
            assert_eq!(tx.amount, want, "amount {raw}");
        }
        assert!(serde_json::from_str::<Transaction>(&base.replace("AMT", "\"abc\"")).is_err());
    }

    #[test]
    fn test_builder_helpers() {
        let date = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let tx = Transaction::new(date, "Online", "🏅 Bonus", CategoryType::Income, 500.0)
            .with_note("Q1")
            .with_currency("THB");
        assert!(tx.is_income());
        assert_eq!(tx.note, "Q1");
        assert_eq!(tx.currency, "THB");
        assert_eq!(tx.signed_amount(), 500.0);
    }
}
