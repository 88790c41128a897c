//! Chart title and axis labels synthesized from a [`StatsRecord`].
//!
//! Each label has a generated base text. A user supplied alternate text
//! either augments it, `"<base> (<alt>)"`, or replaces it outright when the
//! override flag is set.

use serde::{Deserialize, Serialize};

use super::record::StatsRecord;

/// User supplied label text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelOptions {
    pub title: String,
    pub ylabel: String,
    pub xlabel: String,
    /// Replace generated text instead of augmenting it.
    pub override_labels: bool,
}

/// Final chart text handed to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub title: String,
    pub ylabel: String,
    pub xlabel: String,
}

impl Labels {
    pub fn new(record: &StatsRecord, opts: &LabelOptions) -> Self {
        Self {
            title: make_title(record, opts),
            ylabel: make_ylabel(record, opts),
            xlabel: make_xlabel(opts),
        }
    }
}

pub fn augment_or_override(text: &str, alt_text: &str, override_text: bool) -> String {
    if alt_text.is_empty() {
        text.to_string()
    } else if override_text {
        alt_text.to_string()
    } else {
        format!("{text} ({alt_text})")
    }
}

/// `"<symbol> <Field Words> <from> - <to>"`.
pub fn make_title(record: &StatsRecord, opts: &LabelOptions) -> String {
    let field = record.field.as_deref().map(field_words).unwrap_or_default();
    let base = format!(
        "{} {} {} - {}",
        record.symbol.as_deref().unwrap_or_default(),
        field,
        record.from_date.as_deref().unwrap_or_default(),
        record.to_date.as_deref().unwrap_or_default(),
    );
    augment_or_override(&base, &opts.title, opts.override_labels)
}

/// `"<window> Day <CALC>"`, or just `"<CALC>"` without a window.
pub fn make_ylabel(record: &StatsRecord, opts: &LabelOptions) -> String {
    let calc = record
        .calc
        .as_deref()
        .unwrap_or_default()
        .to_uppercase();
    let base = match record.window.as_deref() {
        Some(window) => format!("{window} Day {calc}"),
        None => calc,
    };
    augment_or_override(&base, &opts.ylabel, opts.override_labels)
}

pub fn make_xlabel(opts: &LabelOptions) -> String {
    augment_or_override("date", &opts.xlabel, opts.override_labels)
}

/// `adj_close` -> `Adj Close`.
fn field_words(field: &str) -> String {
    field
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
