//! Flat-file datastore of per-symbol history and dividend CSV files.

pub mod store;
pub mod table;

pub use store::DataStore;
pub use table::{dates, empty_table, DividendRow, HistoryRow, Tag};
