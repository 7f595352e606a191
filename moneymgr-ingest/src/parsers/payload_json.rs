//! JSON payloads as returned by `/api/data` and `/api/category`.
//!
//! Transactions: `{"data": [ {date, account, category, note, currency, type, amount}, ... ]}`
//! Categories:   `[ {_id, name, categoryType}, ... ]`
//! Either shape is accepted for both.

use anyhow::{Context, Result};
use moneymgr_core::{CategoryRecord, Transaction};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::types::Payload;

pub fn parse_transactions_json(text: &str) -> Result<Vec<Transaction>> {
    let payload: Payload<Transaction> =
        serde_json::from_str(text).context("parse transactions payload")?;
    let txns = payload.into_items();
    debug!(count = txns.len(), "parsed transactions payload");
    Ok(txns)
}

pub fn parse_categories_json(text: &str) -> Result<Vec<CategoryRecord>> {
    let payload: Payload<CategoryRecord> =
        serde_json::from_str(text).context("parse categories payload")?;
    let records = payload.into_items();
    debug!(count = records.len(), "parsed categories payload");
    Ok(records)
}

pub fn load_transactions(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_transactions_json(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn load_categories(path: impl AsRef<Path>) -> Result<Vec<CategoryRecord>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_categories_json(&text).with_context(|| format!("parsing {}", path.display()))
}
