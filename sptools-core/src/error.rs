//! Error taxonomy shared by every sptools component.
//!
//! Errors are displayable as-is by the CLI: each variant carries enough
//! context (path, offending line, command line) to explain the failure
//! without a backtrace.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core crate.
pub type SpResult<T> = Result<T, SpError>;

#[derive(Debug, Error)]
pub enum SpError {
    /// Missing or invalid root, name, or a store path that does not exist.
    #[error("{0}")]
    Config(String),

    /// Malformed stats-stream line.
    #[error("Invalid line - {line}: {reason}")]
    Format { line: String, reason: String },

    /// Non-zero exit (or failed spawn) of an external executable.
    #[error("Failed to run command: {command}{}", format_stderr(.stderr))]
    ExternalTool { command: String, stderr: String },

    #[error("File {} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("table error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SpError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn format(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{trimmed}")
    }
}
