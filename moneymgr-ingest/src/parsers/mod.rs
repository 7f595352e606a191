pub mod export_csv;
pub mod payload_json;

use anyhow::Result;
use chrono::TimeZone;
use moneymgr_core::Transaction;
use std::path::Path;

use crate::types::SourceKind;

/// Load transactions from a JSON payload or an export CSV, chosen by extension.
pub fn load_transactions_file<Tz: TimeZone>(
    path: impl AsRef<Path>,
    tz: &Tz,
) -> Result<(Vec<Transaction>, SourceKind)> {
    let path = path.as_ref();
    let kind = SourceKind::from_path(path);
    let txns = match kind {
        SourceKind::ExportCsv => export_csv::parse_export_csv(path, tz)?,
        _ => payload_json::load_transactions(path)?,
    };
    Ok((txns, kind))
}
