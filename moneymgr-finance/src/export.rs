//! CSV export of a date range, with display-friendly category labels.

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone};
use moneymgr_core::{Transaction, prettify_category, strip_leading_emoji};
use moneymgr_ingest::parsers::export_csv::{EXPORT_DATE_FORMAT, EXPORT_HEADER};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const BOM: &str = "\u{FEFF}";

/// How the Category column is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelStyle {
    /// [`prettify_category`]: every emoji is stripped, ASCII digits included
    #[default]
    Pretty,
    /// Only a leading pictograph run is dropped, so "🏪 7-11" stays "7-11"
    AfterEmoji,
}

impl LabelStyle {
    pub fn render(self, label: &str) -> String {
        match self {
            LabelStyle::Pretty => prettify_category(label),
            LabelStyle::AfterEmoji => strip_leading_emoji(label).to_string(),
        }
    }
}

impl FromStr for LabelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LabelStyle::Pretty),
            "after-emoji" => Ok(LabelStyle::AfterEmoji),
            other => Err(format!(
                "unknown label style: {other:?} (expected pretty or after-emoji)"
            )),
        }
    }
}

/// Transactions whose local day falls within `start..=end`.
pub fn filter_by_date_range<'a, Tz: TimeZone>(
    txns: &'a [Transaction],
    start: NaiveDate,
    end: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Transaction> {
    txns.iter()
        .filter(|t| {
            let day = t.local_date(tz);
            day >= start && day <= end
        })
        .collect()
}

/// Default download name, e.g. `moneyMgr_export_20250801_20250831.csv`.
pub fn export_file_name(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "moneyMgr_export_{}_{}.csv",
        start.format("%Y%m%d"),
        end.format("%Y%m%d")
    )
}

/// Write `txns` as CSV with prettified labels. Returns the number of data rows written.
///
/// Output starts with a UTF-8 BOM so spreadsheet apps pick the right encoding.
pub fn write_csv<W, Tz>(out: W, txns: &[&Transaction], tz: &Tz) -> Result<usize>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    write_csv_with(out, txns, tz, LabelStyle::Pretty)
}

pub fn write_csv_with<W, Tz>(
    mut out: W,
    txns: &[&Transaction],
    tz: &Tz,
    labels: LabelStyle,
) -> Result<usize>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    writeln!(out, "{BOM}{}", EXPORT_HEADER.join(",")).context("write CSV header")?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::NonNumeric)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    for txn in txns {
        let when = txn.date.with_timezone(tz).format(EXPORT_DATE_FORMAT).to_string();
        wtr.write_record([
            when,
            txn.account.clone(),
            labels.render(&txn.category),
            txn.note.clone(),
            txn.currency.clone(),
            txn.kind.to_string(),
            txn.amount.to_string(),
        ])?;
    }

    wtr.flush().context("flush CSV")?;
    Ok(txns.len())
}

/// Write `txns` to a CSV file at `path`.
pub fn export_to_path<Tz>(
    path: impl AsRef<Path>,
    txns: &[&Transaction],
    tz: &Tz,
    labels: LabelStyle,
) -> Result<usize>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let rows = write_csv_with(BufWriter::new(file), txns, tz, labels)
        .with_context(|| format!("write {}", path.display()))?;
    info!(rows, path = %path.display(), "exported CSV");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use moneymgr_core::CategoryType;

    fn bkk() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(
                Utc.with_ymd_and_hms(2025, 8, 31, 18, 0, 0).unwrap(),
                "Cash",
                "🍜 Food",
                CategoryType::Expense,
                120.0,
            )
            .with_note("noodles, \"spicy\"")
            .with_currency("THB"),
            Transaction::new(
                Utc.with_ymd_and_hms(2025, 9, 15, 2, 30, 0).unwrap(),
                "Online",
                "💰 TA Salary",
                CategoryType::Income,
                9000.5,
            )
            .with_currency("THB"),
        ]
    }

    #[test]
    fn test_filter_is_inclusive_on_local_days() {
        let txns = sample();
        let sept_1 = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let sept_15 = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();

        // 18:00 UTC on Aug 31 is Sep 1 01:00 in UTC+7
        assert_eq!(filter_by_date_range(&txns, sept_1, sept_15, &bkk()).len(), 2);
        assert_eq!(filter_by_date_range(&txns, sept_1, sept_15, &Utc).len(), 1);
        assert_eq!(filter_by_date_range(&txns, sept_15, sept_15, &Utc).len(), 1);
    }

    #[test]
    fn test_write_csv_layout() {
        let txns = sample();
        let refs: Vec<&Transaction> = txns.iter().collect();
        let mut buf = Vec::new();
        let rows = write_csv(&mut buf, &refs, &bkk()).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "\u{FEFF}Date,Account,Category,Note,Currency,Type,Amount");
        assert_eq!(
            lines[1],
            r#""01 Sep 2025, 01:00","Cash","Food","noodles, ""spicy""","THB","Expense",120"#
        );
        assert_eq!(
            lines[2],
            r#""15 Sep 2025, 09:30","Online","TA Salary","","THB","Income",9000.5"#
        );
    }

    #[test]
    fn test_label_styles() {
        assert_eq!(LabelStyle::Pretty.render("🏪 7-11"), "-");
        assert_eq!(LabelStyle::AfterEmoji.render("🏪 7-11"), "7-11");
        assert_eq!(LabelStyle::AfterEmoji.render("🍜 Food"), "Food");
        assert_eq!(LabelStyle::AfterEmoji.render("Food"), "Food");
        assert_eq!("after-emoji".parse::<LabelStyle>().unwrap(), LabelStyle::AfterEmoji);
        assert_eq!(" Pretty ".parse::<LabelStyle>().unwrap(), LabelStyle::Pretty);
        assert!("raw".parse::<LabelStyle>().is_err());
    }

    #[test]
    fn test_after_emoji_keeps_digits() {
        let date = Utc.with_ymd_and_hms(2025, 9, 3, 7, 0, 0).unwrap();
        let txn = Transaction::new(date, "Cash", "🏪 7-11", CategoryType::Expense, 42.5);
        let mut buf = Vec::new();
        write_csv_with(&mut buf, &[&txn], &bkk(), LabelStyle::AfterEmoji).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.lines().nth(1).unwrap(),
            r#""03 Sep 2025, 14:00","Cash","7-11","","","Expense",42.5"#
        );
    }

    #[test]
    fn test_export_file_name() {
        let start = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        assert_eq!(export_file_name(start, end), "moneyMgr_export_20250801_20250831.csv");
    }
}
