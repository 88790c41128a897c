//! Rendering tests for the terminal chart.

use proptest::prelude::*;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use sptools_core::stats::{parse_str, LabelOptions, Labels};
use sptools_tui::chart::{chart_points, y_tick_labels};
use sptools_tui::{ChartBounds, StatsChart, Theme};

const STREAM: &str = "\
  from: 2020-01-02
    to: 2020-12-31
symbol: IBM
 field: adj_close
window: 50
   sma:
2020-03-13 118.6120
2020-03-16 117.2504
2020-03-17 116.9000
2020-03-18 115.0102
";

fn text_of(buf: &Buffer) -> String {
    buf.content.iter().map(|c| c.symbol()).collect()
}

#[test]
fn parsed_stream_renders_with_synthesized_labels() {
    let record = parse_str(STREAM).unwrap();
    let labels = Labels::new(&record, &LabelOptions::default());
    let area = Rect::new(0, 0, 120, 30);
    let mut buf = Buffer::empty(area);

    StatsChart::new(&record, &labels, &Theme::default()).render(area, &mut buf);

    let text = text_of(&buf);
    assert!(text.contains("IBM Adj Close 2020-01-02 - 2020-12-31"));
    assert!(text.contains("50 Day SMA"));
    assert!(text.contains("2020-03-13"));
    assert!(text.contains("2020-03-18"));
}

#[test]
fn y_labels_bracket_the_series() {
    let record = parse_str(STREAM).unwrap();
    let bounds = ChartBounds::from_points(&chart_points(&record));
    let labels = y_tick_labels(&bounds);
    assert_eq!(labels.len(), 3);

    let lo: f64 = labels[0].parse().unwrap();
    let hi: f64 = labels[2].parse().unwrap();
    assert!(lo < 115.0102);
    assert!(hi > 118.6120);
}

#[test]
fn tiny_area_does_not_panic() {
    let record = parse_str(STREAM).unwrap();
    let labels = Labels::default();
    let area = Rect::new(0, 0, 4, 2);
    let mut buf = Buffer::empty(area);
    StatsChart::new(&record, &labels, &Theme::default()).render(area, &mut buf);
}

proptest! {
    #[test]
    fn bounds_contain_every_point(
        points in prop::collection::vec((0.0f64..1.0e6, -1.0e6f64..1.0e6), 1..200)
    ) {
        let b = ChartBounds::from_points(&points);
        prop_assert!(b.x[0] < b.x[1]);
        prop_assert!(b.y[0] < b.y[1]);
        for (x, y) in points {
            prop_assert!(b.x[0] <= x && x <= b.x[1]);
            prop_assert!(b.y[0] <= y && y <= b.y[1]);
        }
    }
}
