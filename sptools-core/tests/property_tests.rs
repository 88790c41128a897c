//! Property tests for the stats stream parser.
//!
//! Uses proptest to verify:
//! 1. Idempotence: the same stream parsed twice gives the same record
//! 2. Series invariant: one date per value, in input order
//! 3. Token limit: any line with more than three tokens is rejected

use chrono::NaiveDate;
use proptest::prelude::*;
use sptools_core::stats::{classify, parse_str, MAX_TOKENS};
use sptools_core::SpError;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2099, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_value() -> impl Strategy<Value = f64> {
    (-1.0e6..1.0e6_f64).prop_map(|v| (v * 10_000.0).round() / 10_000.0)
}

fn arb_symbol() -> impl Strategy<Value = String> {
    "[A-Z]{1,5}"
}

fn arb_stream() -> impl Strategy<Value = (String, Vec<(NaiveDate, f64)>)> {
    (
        arb_symbol(),
        prop::option::of(1u32..400),
        prop::collection::vec((arb_date(), arb_value()), 0..50),
    )
        .prop_map(|(symbol, window, points)| {
            let mut s = String::new();
            s.push_str("  from: 2000-01-03\n    to: 2099-12-31\n");
            s.push_str(&format!("symbol: {symbol}\n field: adj_close\n"));
            if let Some(w) = window {
                s.push_str(&format!("window: {w}\n"));
            }
            s.push_str("   sma:\n");
            for (date, value) in &points {
                s.push_str(&format!("{} {value:.4}\n", date.format("%Y-%m-%d")));
            }
            (s, points)
        })
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn parsing_is_idempotent((stream, _) in arb_stream()) {
        let first = parse_str(&stream).unwrap();
        let second = parse_str(&stream).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn series_preserves_order_and_length((stream, points) in arb_stream()) {
        let record = parse_str(&stream).unwrap();
        prop_assert_eq!(record.data_dates.len(), record.data.len());
        prop_assert_eq!(record.len(), points.len());
        for ((date, value), (exp_date, exp_value)) in record.points().zip(points.iter()) {
            prop_assert_eq!(date, *exp_date);
            prop_assert!((value - exp_value).abs() < 1e-6);
        }
    }

    #[test]
    fn too_many_tokens_is_rejected(tokens in prop::collection::vec("[a-z0-9:.]{1,8}", (MAX_TOKENS + 1)..8)) {
        let line = tokens.join(" ");
        let is_format_error = matches!(classify(&line), Err(SpError::Format { .. }));
        prop_assert!(is_format_error);
    }
}
