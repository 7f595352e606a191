//! moneymgr-ingest: loading transactions and categories from payload files,
//! exported CSVs, and the REST backend.

pub mod api;
pub mod parsers;
pub mod types;

pub use api::ApiClient;
pub use parsers::export_csv::{parse_export_csv, parse_export_csv_str};
pub use parsers::load_transactions_file;
pub use parsers::payload_json::{
    load_categories, load_transactions, parse_categories_json, parse_transactions_json,
};
pub use types::{Payload, SourceKind};
