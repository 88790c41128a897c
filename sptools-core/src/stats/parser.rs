//! Single forward pass over a stats stream.

use std::io::BufRead;

use super::line::{classify, Line, MetaKey};
use super::record::StatsRecord;
use crate::error::{SpError, SpResult};

/// Reducer folding classified lines into a [`StatsRecord`].
///
/// Later metadata lines overwrite earlier ones.
#[derive(Debug, Default)]
pub struct StatsParser {
    record: StatsRecord,
    line_no: usize,
}

impl StatsParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and apply one input line.
    pub fn feed(&mut self, line: &str) -> SpResult<()> {
        self.line_no += 1;
        let classified = classify(line).map_err(|e| match e {
            SpError::Format { line, reason } => SpError::Format {
                line,
                reason: format!("line {}: {reason}", self.line_no),
            },
            other => other,
        })?;
        self.apply(classified);
        Ok(())
    }

    pub fn apply(&mut self, line: Line) {
        let rec = &mut self.record;
        match line {
            Line::Blank => {}
            Line::Meta(MetaKey::FromDate, v) => rec.from_date = Some(v),
            Line::Meta(MetaKey::ToDate, v) => rec.to_date = Some(v),
            Line::Meta(MetaKey::Symbol, v) => rec.symbol = Some(v),
            Line::Meta(MetaKey::Field, v) => rec.field = Some(v),
            Line::Meta(MetaKey::Window, v) => rec.window = Some(v),
            Line::Data(date, value) => rec.push_point(date, value),
            Line::Calc(name) => rec.calc = Some(name),
        }
    }

    pub fn finish(self) -> StatsRecord {
        self.record
    }
}

/// Parse a whole stream. The first malformed line aborts the parse.
pub fn parse_stats<R: BufRead>(reader: R) -> SpResult<StatsRecord> {
    let mut parser = StatsParser::new();
    for line in reader.lines() {
        parser.feed(&line?)?;
    }
    let record = parser.finish();
    if record.is_empty() {
        tracing::warn!(calc = ?record.calc, "stats stream has no data lines");
    }
    Ok(record)
}

pub fn parse_str(input: &str) -> SpResult<StatsRecord> {
    parse_stats(input.as_bytes())
}
