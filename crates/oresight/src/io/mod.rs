//! Spreadsheet ingestion for measurement data.
pub mod spreadsheet;

pub use spreadsheet::{load_table, load_table_from_path, read_csv, read_xlsx, REQUIRED_COLUMNS};
