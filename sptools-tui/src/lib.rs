//! Terminal chart backend for sptools.
//!
//! Draws a stats series as a ratatui line chart in the alternate screen,
//! styled like the gnuplot backend.

pub mod chart;
pub mod terminal;
pub mod theme;

pub use chart::{ChartBounds, StatsChart};
pub use terminal::TerminalRenderer;
pub use theme::Theme;
