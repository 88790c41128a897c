//! Dark chart theme for the terminal backend.
//!
//! Mirrors the gnuplot styling: near-black background, grey border, title
//! and axis text, and a single bright line for the series.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Series line
    pub line: Color,
    /// Border, axes and grid
    pub foreground: Color,
    /// Title and axis titles
    pub text: Color,
    /// Footer hint
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(0, 0, 0),
            // Electric cyan
            line: Color::Rgb(0, 255, 255),
            // #808080, same grey as the gnuplot script
            foreground: Color::Rgb(128, 128, 128),
            text: Color::Rgb(170, 170, 170),
            muted: Color::Rgb(100, 149, 237),
        }
    }
}
