//! Line classifier for the `sp_stats` output format.
//!
//! ```text
//!   from: 2020-01-02
//!     to: 2020-12-31
//! symbol: IBM
//!  field: adj_close
//!    sma:
//! 2020-03-13 118.6120
//! ```
//!
//! Every line is split on whitespace into at most [`MAX_TOKENS`] tokens and
//! the first token decides what the line is.

use chrono::NaiveDate;

use crate::error::{SpError, SpResult};

/// Lines with more tokens than this are rejected.
pub const MAX_TOKENS: usize = 3;

/// Scalar header keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    FromDate,
    ToDate,
    Symbol,
    Field,
    Window,
}

impl MetaKey {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "from:" => Some(MetaKey::FromDate),
            "to:" => Some(MetaKey::ToDate),
            "symbol:" => Some(MetaKey::Symbol),
            "field:" => Some(MetaKey::Field),
            t if t.starts_with("window:") => Some(MetaKey::Window),
            _ => None,
        }
    }
}

/// A classified input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// Empty or whitespace only.
    Blank,
    Meta(MetaKey, String),
    Data(NaiveDate, f64),
    /// Anything else names the statistic: the first token up to its `:`.
    Calc(String),
}

pub fn classify(line: &str) -> SpResult<Line> {
    let text = line.trim();
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() > MAX_TOKENS {
        return Err(SpError::format(
            text,
            format!("expected at most {MAX_TOKENS} tokens, found {}", tokens.len()),
        ));
    }

    let Some(&first) = tokens.first() else {
        return Ok(Line::Blank);
    };
    let second = tokens.get(1).copied();

    if let Some(key) = MetaKey::from_token(first) {
        let value = second
            .ok_or_else(|| SpError::format(text, format!("missing value for '{first}'")))?;
        return Ok(Line::Meta(key, value.to_string()));
    }

    if first.starts_with("20") {
        let date = NaiveDate::parse_from_str(first, "%Y-%m-%d")
            .map_err(|e| SpError::format(text, format!("bad date '{first}': {e}")))?;
        let raw = second.ok_or_else(|| SpError::format(text, "missing value for data line"))?;
        let value = raw
            .parse::<f64>()
            .map_err(|e| SpError::format(text, format!("bad value '{raw}': {e}")))?;
        return Ok(Line::Data(date, value));
    }

    let calc = first.split_once(':').map_or(first, |(name, _)| name);
    Ok(Line::Calc(calc.to_string()))
}
