//! Tool configuration.
//!
//! Loaded from an optional TOML file with three tables:
//!
//! ```toml
//! [datastore]
//! root = "/home/me"
//! name = "sp_datastore"
//!
//! [tools]
//! dstool = "sp_dstool"
//! gnuplot = "gnuplot"
//!
//! [plot]
//! backend = "gnuplot"          # or "terminal"
//! script_path = "/tmp/plot_stats.tmp"
//! ```
//!
//! Every field has a default, so a missing file or table is not an error.
//! The home directory is never looked up here: the binary resolves it once
//! at startup and injects it with [`Config::with_home`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::SpResult;
use crate::render::Backend;

/// Store name used when neither the config nor the command line sets one.
pub const DEFAULT_DATASTORE_NAME: &str = "sp_datastore";

/// Fixed location of the generated gnuplot script.
pub const DEFAULT_SCRIPT_PATH: &str = "/tmp/plot_stats.tmp";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub datastore: DatastoreConfig,
    pub tools: ToolsConfig,
    pub plot: PlotConfig,
}

/// Where the datastore lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatastoreConfig {
    /// Explicit root directory. Falls back to `home` when unset.
    pub root: Option<PathBuf>,
    /// Explicit store name. Falls back to [`DEFAULT_DATASTORE_NAME`].
    pub name: Option<String>,
    /// Injected home directory; not part of the file format.
    #[serde(skip)]
    pub home: Option<PathBuf>,
}

impl DatastoreConfig {
    /// Resolved root: explicit root, else home, else empty.
    pub fn resolved_root(&self) -> PathBuf {
        self.root
            .clone()
            .or_else(|| self.home.clone())
            .unwrap_or_default()
    }

    /// Resolved store name.
    pub fn resolved_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| DEFAULT_DATASTORE_NAME.to_string())
    }
}

/// External executables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub dstool: String,
    pub gnuplot: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            dstool: "sp_dstool".into(),
            gnuplot: "gnuplot".into(),
        }
    }
}

/// Chart rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub backend: Backend,
    pub script_path: PathBuf,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Gnuplot,
            script_path: PathBuf::from(DEFAULT_SCRIPT_PATH),
        }
    }
}

impl Config {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> SpResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> SpResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file, using defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SpResult<Self> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Inject the home directory used as the default datastore root.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.datastore.home = home;
        self
    }
}
