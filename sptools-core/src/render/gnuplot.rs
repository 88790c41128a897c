//! gnuplot backend: writes a script to a fixed path and runs
//! `gnuplot -p <script>`.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

use super::ChartRenderer;
use crate::error::SpResult;
use crate::stats::{Labels, StatsRecord};
use crate::tool::ToolCommand;

const FOREGROUND: &str = "#808080";

#[derive(Debug, Clone)]
pub struct GnuplotRenderer {
    program: String,
    script_path: PathBuf,
}

impl GnuplotRenderer {
    pub fn new(program: impl Into<String>, script_path: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script_path: script_path.into(),
        }
    }

    /// Full script text: styling, labels, then the inline data block.
    pub fn script(record: &StatsRecord, labels: &Labels) -> String {
        let mut s = String::new();
        // Writing into a String cannot fail.
        let _ = write_script(&mut s, record, labels);
        s
    }

    pub fn command(&self) -> ToolCommand {
        ToolCommand::new(&self.program)
            .arg("-p")
            .arg(self.script_path.display().to_string())
    }
}

impl ChartRenderer for GnuplotRenderer {
    fn name(&self) -> &str {
        "gnuplot"
    }

    fn render(&self, record: &StatsRecord, labels: &Labels) -> SpResult<()> {
        std::fs::write(&self.script_path, Self::script(record, labels))?;
        tracing::debug!(path = %self.script_path.display(), points = record.len(), "wrote gnuplot script");
        self.command().run(false)
    }
}

fn write_script(s: &mut String, record: &StatsRecord, labels: &Labels) -> fmt::Result {
    writeln!(s, "set terminal wxt background 0")?;
    writeln!(s, "set style line 101 lc rgb '{FOREGROUND}' lt 1 lw 1")?;
    writeln!(s, "set border 3 front ls 101 lc rgb '{FOREGROUND}'")?;
    writeln!(s, "set grid ls 101")?;
    writeln!(s, "set title '{}' tc rgb '{FOREGROUND}'", quote(&labels.title))?;
    writeln!(s, "set ylabel '{}' tc rgb '{FOREGROUND}'", quote(&labels.ylabel))?;
    writeln!(s, "set xlabel '{}' tc rgb '{FOREGROUND}'", quote(&labels.xlabel))?;
    writeln!(s, "set xdata time")?;
    writeln!(s, "set timefmt '%Y-%m-%d'")?;
    writeln!(s, "set format x '%Y-%m-%d'")?;
    writeln!(s, "plot '-' using 1:2 with lines notitle")?;
    for (date, value) in record.points() {
        writeln!(s, "{} {value}", date.format("%Y-%m-%d"))?;
    }
    writeln!(s, "e")
}

/// Escape text for a single-quoted gnuplot string.
fn quote(text: &str) -> String {
    text.replace('\'', "''")
}
