//! sptools core — datastore access, research datastore bootstrap, stats
//! stream parsing and chart rendering.
//!
//! This crate contains everything that does not need a terminal:
//! - Flat-file datastore of per-symbol history/dividend CSV files
//! - Manifest seeding and `sp_dstool` orchestration
//! - Stats stream classifier and single-pass reducer
//! - Title/axis label synthesis
//! - Renderer capability and the gnuplot backend

pub mod bootstrap;
pub mod config;
pub mod datastore;
pub mod error;
pub mod render;
pub mod stats;
pub mod tool;

pub use config::Config;
pub use datastore::{DataStore, Tag};
pub use error::{SpError, SpResult};
pub use render::{Backend, ChartRenderer, GnuplotRenderer};
pub use stats::{LabelOptions, Labels, StatsRecord};
pub use tool::ToolCommand;
