//! Full-screen terminal backend.
//!
//! Takes over the terminal (raw mode + alternate screen), draws the chart
//! with a one-line key hint underneath, and blocks until the user closes it.

use std::io::{self, stdout, Stdout};
use std::sync::Once;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use sptools_core::error::SpResult;
use sptools_core::render::ChartRenderer;
use sptools_core::stats::{Labels, StatsRecord};

use crate::chart::StatsChart;
use crate::theme::Theme;

const HINT: &str = " q/Esc/Enter to close ";

static PANIC_HOOK: Once = Once::new();

/// Restores the terminal before the default hook prints the panic.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stderr(), LeaveAlternateScreen);
            default_hook(info);
        }));
    });
}

/// Whether a key event closes the chart.
pub fn is_close_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && matches!(
            key.code,
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter
        )
}

/// Draws one frame: chart on top, key hint in the last row.
pub fn draw(frame: &mut Frame, record: &StatsRecord, labels: &Labels, theme: &Theme) {
    let [chart_area, hint_area] = split(frame.area());
    frame.render_widget(StatsChart::new(record, labels, theme), chart_area);
    frame.render_widget(
        Paragraph::new(Span::styled(HINT, Style::default().fg(theme.muted))),
        hint_area,
    );
}

fn split(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    [chunks[0], chunks[1]]
}

#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    theme: Theme,
}

impl TerminalRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn run(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        record: &StatsRecord,
        labels: &Labels,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|f| draw(f, record, labels, &self.theme))?;

            // Resize events fall through and trigger a redraw.
            if let Event::Key(key) = event::read()? {
                if is_close_key(&key) {
                    return Ok(());
                }
            }
        }
    }
}

impl ChartRenderer for TerminalRenderer {
    fn name(&self) -> &str {
        "terminal"
    }

    fn render(&self, record: &StatsRecord, labels: &Labels) -> SpResult<()> {
        install_panic_hook();

        enable_raw_mode()?;
        let mut out = stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        let result = Terminal::new(CrosstermBackend::new(out)).and_then(|mut terminal| {
            terminal.clear()?;
            let shown = self.run(&mut terminal, record, labels);
            let _ = terminal.show_cursor();
            shown
        });

        // Restore regardless of how the loop ended.
        let restored = disable_raw_mode().and(execute!(stdout(), LeaveAlternateScreen));
        tracing::debug!(points = record.len(), ok = result.is_ok(), "terminal chart closed");

        result?;
        restored?;
        Ok(())
    }
}
