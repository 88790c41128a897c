use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A labeled time series decoded from a stats stream.
///
/// `data_dates` and `data` are parallel: the reducer pushes to both in the
/// same step, so they always have equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub symbol: Option<String>,
    pub field: Option<String>,
    /// Day count for windowed calculations.
    pub window: Option<String>,
    /// Name of the statistic (e.g. `sma`).
    pub calc: Option<String>,
    pub data_dates: Vec<NaiveDate>,
    pub data: Vec<f64>,
}

impl StatsRecord {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn push_point(&mut self, date: NaiveDate, value: f64) {
        self.data_dates.push(date);
        self.data.push(value);
    }

    /// `(date, value)` pairs in input order.
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.data_dates.iter().copied().zip(self.data.iter().copied())
    }

    /// Smallest and largest finite value, or `None` for an empty series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// First and last date of the series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.data_dates.first()?, *self.data_dates.last()?))
    }
}
