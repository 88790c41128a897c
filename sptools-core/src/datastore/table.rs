//! Symbol file schemas and their in-memory table form.
//!
//! Symbol files carry no header row; columns are positional. Each file is
//! decoded into typed rows with the csv crate and then laid out as a polars
//! `DataFrame` whose first column, `date`, acts as the index.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

use crate::error::SpResult;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01, the polars `Date` epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Kind of symbol file; selects both the file name prefix and its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    History,
    Dividends,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::History => "history",
            Tag::Dividends => "dividends",
        }
    }

    /// Column names in file order, the date index first.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Tag::History => &["date", "open", "high", "low", "close", "adj_close", "volume"],
            Tag::Dividends => &["date", "dividend"],
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "history" => Ok(Tag::History),
            "dividends" => Ok(Tag::Dividends),
            other => Err(format!("unknown tag '{other}' (expected history or dividends)")),
        }
    }
}

/// One line of a `history_<SYMBOL>.csv` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
}

/// One line of a `dividends_<SYMBOL>.csv` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendRow {
    pub date: NaiveDate,
    pub dividend: f64,
}

/// Decode headerless CSV into typed rows. Any row whose field count or
/// values do not match the tag's schema fails the whole read.
pub fn read_rows<T: DeserializeOwned, R: Read>(tag: Tag, reader: R) -> SpResult<Vec<T>> {
    let width = tag.columns().len();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() != width {
            let line = record.position().map_or(0, |p| p.line());
            return Err(csv::Error::from(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{tag} row on line {line}: found {} fields, expected {width}",
                    record.len()
                ),
            ))
            .into());
        }
        rows.push(record.deserialize(None)?);
    }
    Ok(rows)
}

/// Read a symbol file of the given tag into a table.
pub fn read_table<R: Read>(tag: Tag, reader: R) -> SpResult<DataFrame> {
    match tag {
        Tag::History => history_frame(&read_rows::<HistoryRow, _>(tag, reader)?),
        Tag::Dividends => dividend_frame(&read_rows::<DividendRow, _>(tag, reader)?),
    }
}

/// Zero-row table with the tag's columns and dtypes.
pub fn empty_table(tag: Tag) -> SpResult<DataFrame> {
    match tag {
        Tag::History => history_frame(&[]),
        Tag::Dividends => dividend_frame(&[]),
    }
}

pub fn history_frame(rows: &[HistoryRow]) -> SpResult<DataFrame> {
    let opens: Vec<f64> = rows.iter().map(|r| r.open).collect();
    let highs: Vec<f64> = rows.iter().map(|r| r.high).collect();
    let lows: Vec<f64> = rows.iter().map(|r| r.low).collect();
    let closes: Vec<f64> = rows.iter().map(|r| r.close).collect();
    let adj_closes: Vec<f64> = rows.iter().map(|r| r.adj_close).collect();
    let volumes: Vec<u64> = rows.iter().map(|r| r.volume).collect();

    Ok(DataFrame::new(vec![
        date_column(rows.iter().map(|r| r.date))?,
        Column::new("open".into(), opens),
        Column::new("high".into(), highs),
        Column::new("low".into(), lows),
        Column::new("close".into(), closes),
        Column::new("adj_close".into(), adj_closes),
        Column::new("volume".into(), volumes),
    ])?)
}

pub fn dividend_frame(rows: &[DividendRow]) -> SpResult<DataFrame> {
    let dividends: Vec<f64> = rows.iter().map(|r| r.dividend).collect();

    Ok(DataFrame::new(vec![
        date_column(rows.iter().map(|r| r.date))?,
        Column::new("dividend".into(), dividends),
    ])?)
}

/// Extract the `date` index of a table.
pub fn dates(df: &DataFrame) -> SpResult<Vec<NaiveDate>> {
    let date_ca = df.column("date")?.date()?;
    let mut dates = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let days = date_ca
            .get(i)
            .ok_or_else(|| PolarsError::ComputeError(format!("null date at row {i}").into()))?;
        let date = NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
            .ok_or_else(|| {
                PolarsError::ComputeError(format!("date out of range at row {i}").into())
            })?;
        dates.push(date);
    }
    Ok(dates)
}

fn date_column(dates: impl Iterator<Item = NaiveDate>) -> SpResult<Column> {
    let days: Vec<i32> = dates
        .map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
        .collect();
    Ok(Column::new("date".into(), days).cast(&DataType::Date)?)
}
