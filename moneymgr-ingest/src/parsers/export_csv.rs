//! Read back CSV files written by the export command.
//!
//! Layout (UTF-8, optional BOM):
//!   Date,Account,Category,Note,Currency,Type,Amount
//!   "01 Sep 2025, 10:00","Cash","Food","noodles","THB","Expense",120
//!
//! Dates carry no offset; they are local to the zone the export was written in.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDateTime, TimeZone, Utc};
use moneymgr_core::{CategoryType, Transaction};
use std::fs;
use std::path::Path;
use tracing::warn;

pub const EXPORT_HEADER: [&str; 7] =
    ["Date", "Account", "Category", "Note", "Currency", "Type", "Amount"];
pub const EXPORT_DATE_FORMAT: &str = "%d %b %Y, %H:%M";

fn parse_local_datetime<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<chrono::DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), EXPORT_DATE_FORMAT).ok()?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse export CSV text. Rows with an unreadable date, type or amount are skipped.
pub fn parse_export_csv_str<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<Vec<Transaction>> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let header = rdr.headers().context("read CSV header")?.clone();
    let found: Vec<&str> = header.iter().map(str::trim).collect();
    if found != EXPORT_HEADER {
        bail!("unexpected CSV header: {} (expected {})", found.join(","), EXPORT_HEADER.join(","));
    }

    let mut txns = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or("").trim();

        if field(0).is_empty() {
            continue;
        }

        let Some(date) = parse_local_datetime(field(0), tz) else {
            warn!(row = line + 2, value = field(0), "skipping row with unreadable date");
            continue;
        };
        let kind: CategoryType = match field(5).parse() {
            Ok(k) => k,
            Err(e) => {
                warn!(row = line + 2, error = %e, "skipping row with unknown type");
                continue;
            }
        };
        let amount: f64 = match field(6).parse() {
            Ok(a) => a,
            Err(_) => {
                warn!(row = line + 2, value = field(6), "skipping row with unreadable amount");
                continue;
            }
        };

        txns.push(
            Transaction::new(date, field(1), field(2), kind, amount)
                .with_note(field(3))
                .with_currency(field(4)),
        );
    }

    Ok(txns)
}

/// Parse an export CSV file.
pub fn parse_export_csv<Tz: TimeZone>(path: impl AsRef<Path>, tz: &Tz) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("opening {}", path.display()))?;
    parse_export_csv_str(&text, tz).with_context(|| format!("parsing {}", path.display()))
}
