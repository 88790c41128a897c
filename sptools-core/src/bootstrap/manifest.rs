//! The "stocks" manifest seeded into a new research datastore.
//!
//! Format: CSV with header `symbol,type,date,quantity,base_price`, one
//! row per symbol.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::error::{SpError, SpResult};

pub const STOCK_TYPE: &str = "stock";
pub const DEFAULT_QUANTITY: u32 = 100;
pub const DEFAULT_BASE_PRICE: &str = "0.00";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: NaiveDate,
    pub quantity: u32,
    /// Kept as text so "0.00" survives a round trip unchanged.
    pub base_price: String,
}

impl ManifestRow {
    /// A freshly seeded stock position.
    pub fn stock(symbol: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            kind: STOCK_TYPE.into(),
            date,
            quantity: DEFAULT_QUANTITY,
            base_price: DEFAULT_BASE_PRICE.into(),
        }
    }
}

/// Build one seed row per symbol, all on `date`.
pub fn seed_rows<S: AsRef<str>>(symbols: &[S], date: NaiveDate) -> Vec<ManifestRow> {
    symbols
        .iter()
        .map(|s| ManifestRow::stock(s.as_ref(), date))
        .collect()
}

/// Serialize rows (with header) to any writer.
pub fn write_rows<W: Write>(writer: W, rows: &[ManifestRow]) -> SpResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create the manifest file. Fails if it already exists.
pub fn write_manifest(path: &Path, rows: &[ManifestRow]) -> SpResult<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => SpError::AlreadyExists(path.to_path_buf()),
            _ => SpError::Io(e),
        })?;
    write_rows(file, rows)
}

pub fn read_rows<R: Read>(reader: R) -> SpResult<Vec<ManifestRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

pub fn read_manifest(path: &Path) -> SpResult<Vec<ManifestRow>> {
    read_rows(File::open(path)?)
}
