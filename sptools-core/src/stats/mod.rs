//! Stats stream decoding and chart label synthesis.

pub mod labels;
pub mod line;
pub mod parser;
pub mod record;

pub use labels::{augment_or_override, make_title, make_xlabel, make_ylabel, LabelOptions, Labels};
pub use line::{classify, Line, MetaKey, MAX_TOKENS};
pub use parser::{parse_stats, parse_str, StatsParser};
pub use record::StatsRecord;
