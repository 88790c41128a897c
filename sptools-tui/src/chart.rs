//! Line chart widget for a stats series.
//!
//! Displays:
//! - The series as a braille line (x = date, y = value)
//! - Dotted grid lines at each axis tick
//! - Title in the border, axis titles from the synthesized labels

use chrono::{Datelike, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};
use sptools_core::stats::{Labels, StatsRecord};

use crate::theme::Theme;

/// Number of labeled ticks per axis (first, middle, last).
const TICKS: usize = 3;

/// Axis bounds of a chart, `[min, max]` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl ChartBounds {
    /// Bounds covering every point, with 5% vertical padding. Degenerate
    /// ranges (single point, flat series, empty series) are widened so the
    /// axes stay drawable.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let finite = points.iter().filter(|(_, y)| y.is_finite());
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in finite {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        if !x_min.is_finite() {
            return Self {
                x: [0.0, 1.0],
                y: [0.0, 1.0],
            };
        }
        if x_max - x_min < 1.0 {
            x_min -= 1.0;
            x_max += 1.0;
        }

        // The span of two finite values can still overflow to infinity.
        let y_range = (y_max - y_min).min(f64::MAX);
        let y_pad = if y_range > 0.0 {
            y_range * 0.05
        } else {
            y_max.abs().max(1.0) * 0.05
        };

        Self {
            x: [x_min, x_max],
            y: [
                (y_min - y_pad).max(f64::MIN),
                (y_max + y_pad).min(f64::MAX),
            ],
        }
    }

    fn x_ticks(&self) -> [f64; TICKS] {
        ticks(self.x)
    }

    fn y_ticks(&self) -> [f64; TICKS] {
        ticks(self.y)
    }
}

fn ticks([lo, hi]: [f64; 2]) -> [f64; TICKS] {
    [lo, lo / 2.0 + hi / 2.0, hi]
}

/// X coordinate of a date: days since 0001-01-01.
pub fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    let days = x.round();
    if days < f64::from(i32::MIN) || days > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(days as i32)
}

/// Chart coordinates for every series point.
pub fn chart_points(record: &StatsRecord) -> Vec<(f64, f64)> {
    record
        .points()
        .map(|(date, value)| (date_to_x(date), value))
        .collect()
}

pub fn x_tick_labels(bounds: &ChartBounds) -> Vec<String> {
    bounds
        .x_ticks()
        .iter()
        .map(|&x| {
            x_to_date(x)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .collect()
}

pub fn y_tick_labels(bounds: &ChartBounds) -> Vec<String> {
    bounds
        .y_ticks()
        .iter()
        .map(|y| format!("{y:.2}"))
        .collect()
}

/// Two-point segments for the grid: one horizontal line per y tick and one
/// vertical line per x tick.
pub fn grid_lines(bounds: &ChartBounds) -> Vec<[(f64, f64); 2]> {
    let mut lines = Vec::with_capacity(2 * TICKS);
    for y in bounds.y_ticks() {
        lines.push([(bounds.x[0], y), (bounds.x[1], y)]);
    }
    for x in bounds.x_ticks() {
        lines.push([(x, bounds.y[0]), (x, bounds.y[1])]);
    }
    lines
}

/// The chart widget.
pub struct StatsChart<'a> {
    record: &'a StatsRecord,
    labels: &'a Labels,
    theme: &'a Theme,
}

impl<'a> StatsChart<'a> {
    pub fn new(record: &'a StatsRecord, labels: &'a Labels, theme: &'a Theme) -> Self {
        Self {
            record,
            labels,
            theme,
        }
    }
}

impl<'a> Widget for StatsChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let points = chart_points(self.record);
        let bounds = ChartBounds::from_points(&points);
        let grid = grid_lines(&bounds);

        let grid_style = Style::default().fg(self.theme.foreground);
        let mut datasets: Vec<Dataset> = grid
            .iter()
            .map(|segment| {
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Line)
                    .style(grid_style)
                    .data(segment)
            })
            .collect();
        // Drawn last so the series sits on top of the grid.
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.line))
                .data(&points),
        );

        let text_style = Style::default().fg(self.theme.text);
        let axis_style = Style::default().fg(self.theme.foreground);

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(Span::styled(format!(" {} ", self.labels.title), text_style))
                    .borders(Borders::ALL)
                    .border_style(axis_style)
                    .style(Style::default().bg(self.theme.background)),
            )
            .x_axis(
                Axis::default()
                    .title(Span::styled(self.labels.xlabel.clone(), text_style))
                    .style(axis_style)
                    .bounds(bounds.x)
                    .labels(x_tick_labels(&bounds).into_iter().map(Span::raw).collect::<Vec<_>>()),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(self.labels.ylabel.clone(), text_style))
                    .style(axis_style)
                    .bounds(bounds.y)
                    .labels(y_tick_labels(&bounds).into_iter().map(Span::raw).collect::<Vec<_>>()),
            );

        chart.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sptools_core::stats::parse_str;

    fn sample_record() -> StatsRecord {
        parse_str(
            "symbol: IBM\n field: adj_close\nwindow: 50\n   sma:\n\
             2020-03-13 100.0\n2020-03-16 110.0\n2020-03-17 105.0\n",
        )
        .unwrap()
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn bounds_pad_y_range() {
        let b = ChartBounds::from_points(&[(0.0, 100.0), (10.0, 200.0)]);
        assert_eq!(b.x, [0.0, 10.0]);
        assert!((b.y[0] - 95.0).abs() < 1e-9);
        assert!((b.y[1] - 205.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_widen_single_point() {
        let b = ChartBounds::from_points(&[(5.0, 2.0)]);
        assert_eq!(b.x, [4.0, 6.0]);
        assert!(b.y[0] < 2.0 && b.y[1] > 2.0);
    }

    #[test]
    fn bounds_for_empty_series() {
        let b = ChartBounds::from_points(&[]);
        assert_eq!(b, ChartBounds { x: [0.0, 1.0], y: [0.0, 1.0] });
    }

    #[test]
    fn bounds_ignore_nan() {
        let b = ChartBounds::from_points(&[(0.0, 1.0), (1.0, f64::NAN), (2.0, 3.0)]);
        assert!(b.y[0].is_finite() && b.y[1].is_finite());
    }

    #[test]
    fn bounds_stay_finite_for_extreme_span() {
        let b = ChartBounds::from_points(&[(0.0, -1e308), (1.0, 1e308)]);
        assert!(b.y[0].is_finite() && b.y[1].is_finite());
        assert!(b.y[0] <= -1e308 && b.y[1] >= 1e308);

        let labels = y_tick_labels(&b);
        assert!(labels.iter().all(|l| !l.contains("inf") && !l.contains("NaN")));
        assert_eq!(labels[1], "0.00");
    }

    #[test]
    fn dates_round_trip_through_x() {
        let d = NaiveDate::from_ymd_opt(2020, 3, 13).unwrap();
        assert_eq!(x_to_date(date_to_x(d)), Some(d));
        assert_eq!(x_to_date(f64::MAX), None);
    }

    #[test]
    fn x_labels_are_first_mid_last_dates() {
        let rec = sample_record();
        let bounds = ChartBounds::from_points(&chart_points(&rec));
        assert_eq!(
            x_tick_labels(&bounds),
            vec!["2020-03-13", "2020-03-15", "2020-03-17"]
        );
    }

    #[test]
    fn grid_has_a_line_per_tick() {
        let bounds = ChartBounds::from_points(&[(0.0, 0.0), (10.0, 10.0)]);
        let grid = grid_lines(&bounds);
        assert_eq!(grid.len(), 2 * TICKS);
        assert!(grid.iter().all(|[a, b]| a.0 == b.0 || a.1 == b.1));
    }

    #[test]
    fn renders_title_and_axis_titles() {
        let rec = sample_record();
        let labels = Labels {
            title: "IBM Adj Close".into(),
            ylabel: "50 Day SMA".into(),
            xlabel: "date".into(),
        };
        let theme = Theme::default();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        StatsChart::new(&rec, &labels, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("IBM Adj Close"));
        assert!(text.contains("50 Day SMA"));
    }

    #[test]
    fn empty_record_renders_without_panic() {
        let rec = StatsRecord::default();
        let labels = Labels::default();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        StatsChart::new(&rec, &labels, &theme).render(area, &mut buf);
    }
}
