//! The datastore handle.
//!
//! Layout: `{root}/{name}/{tag}_{SYMBOL}.csv`, one headerless CSV file per
//! (tag, symbol) pair.

use polars::prelude::DataFrame;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use super::table::{empty_table, read_table, Tag};
use crate::config::DatastoreConfig;
use crate::error::{SpError, SpResult};

/// A validated datastore directory. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
    name: String,
    path: PathBuf,
}

impl DataStore {
    /// Resolve root and name from the config and check the store exists.
    pub fn new(config: &DatastoreConfig) -> SpResult<Self> {
        Self::open(config.resolved_root(), config.resolved_name())
    }

    /// Open the store at `root/name`.
    pub fn open(root: impl Into<PathBuf>, name: impl Into<String>) -> SpResult<Self> {
        let root = root.into();
        let name = name.into();
        if root.as_os_str().is_empty() {
            return Err(SpError::config("Missing datastore root"));
        }
        let path = root.join(&name);
        if !path.is_dir() {
            return Err(SpError::config(format!(
                "Datastore {} does not exist",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), "opened datastore");
        Ok(Self { root, name, path })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `root/name`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the file holding `tag` data for `symbol`.
    pub fn symbol_path(&self, tag: Tag, symbol: &str) -> PathBuf {
        self.path.join(format!("{tag}_{symbol}.csv"))
    }

    pub fn symbol_exists(&self, tag: Tag, symbol: &str) -> bool {
        self.symbol_path(tag, symbol).is_file()
    }

    pub fn read_history(&self, symbol: &str) -> SpResult<DataFrame> {
        self.read_data(Tag::History, symbol)
    }

    pub fn read_dividends(&self, symbol: &str) -> SpResult<DataFrame> {
        self.read_data(Tag::Dividends, symbol)
    }

    /// Read a symbol file. A missing file gives an empty table with the
    /// tag's columns, not an error.
    pub fn read_data(&self, tag: Tag, symbol: &str) -> SpResult<DataFrame> {
        let path = self.symbol_path(tag, symbol);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no symbol file, returning empty table");
            return empty_table(tag);
        }
        tracing::debug!(path = %path.display(), "reading symbol file");
        read_table(tag, File::open(&path)?)
    }
}

impl fmt::Display for DataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataStore[{}]", self.path.display())
    }
}
