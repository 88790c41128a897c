//! Chart rendering.
//!
//! A renderer draws one line chart (x = dates, y = values) with the
//! synthesized labels, on a dark background with a grid. Backends are
//! interchangeable; which one runs is a configuration choice.

pub mod gnuplot;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SpResult;
use crate::stats::{Labels, StatsRecord};

pub use gnuplot::GnuplotRenderer;

/// Capability shared by every chart backend.
pub trait ChartRenderer {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Draw the chart. Blocks until the backend is done with it.
    fn render(&self, record: &StatsRecord, labels: &Labels) -> SpResult<()>;
}

/// Available backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// External gnuplot process.
    #[default]
    Gnuplot,
    /// In-process terminal chart.
    Terminal,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Gnuplot => "gnuplot",
            Backend::Terminal => "terminal",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gnuplot" => Ok(Backend::Gnuplot),
            "terminal" => Ok(Backend::Terminal),
            other => Err(format!(
                "unknown backend '{other}' (expected gnuplot or terminal)"
            )),
        }
    }
}
