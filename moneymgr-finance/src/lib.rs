//! moneymgr-finance: chart aggregates and CSV export over classified transactions

pub mod aggregate;
pub mod export;

pub use aggregate::{Analysis, CategorySlice, MonthValue, Period, Summary, shares};
pub use export::{
    LabelStyle, export_file_name, export_to_path, filter_by_date_range, write_csv, write_csv_with,
};
