//! Research-datastore bootstrap.
//!
//! Seeds `<root>/<name>.csv` with one stock row per symbol, then asks
//! `sp_dstool` to create `<root>/sp_<name>` and, optionally, to update and
//! check it against the manifest. Any failure stops the run; files already
//! written are left in place.

pub mod manifest;

use chrono::NaiveDate;
use std::path::PathBuf;

use crate::error::{SpError, SpResult};
use crate::tool::ToolCommand;

pub use manifest::{read_manifest, seed_rows, write_manifest, ManifestRow};

/// Datastore operations understood by `sp_dstool --dsop=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DsOp {
    Create,
    Update,
    Check,
}

impl DsOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            DsOp::Create => "create",
            DsOp::Update => "update",
            DsOp::Check => "check",
        }
    }
}

/// Everything needed to bootstrap one research datastore.
#[derive(Debug, Clone)]
pub struct BootstrapRequest {
    pub root: PathBuf,
    pub name: String,
    pub base_date: NaiveDate,
    pub symbols: Vec<String>,
    /// Also run `update` and `check` after `create`.
    pub update: bool,
    pub verbose: bool,
    /// Datastore tool executable.
    pub dstool: String,
}

impl BootstrapRequest {
    /// Name of the datastore directory created under `root`.
    pub fn ds_name(&self) -> String {
        format!("sp_{}", self.name)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(format!("{}.csv", self.name))
    }

    pub fn validate(&self) -> SpResult<()> {
        if self.root.as_os_str().is_empty() {
            return Err(SpError::config("Missing root"));
        }
        if self.name.is_empty() {
            return Err(SpError::config("Missing name"));
        }
        if self.symbols.is_empty() {
            return Err(SpError::config("Missing symbols"));
        }
        Ok(())
    }

    /// The `sp_dstool` command line for one operation.
    pub fn dstool_command(&self, op: DsOp) -> ToolCommand {
        let cmd = ToolCommand::new(&self.dstool)
            .arg(format!("--root={}", self.root.display()))
            .arg(format!("--name={}", self.ds_name()))
            .arg(format!("--dsop={}", op.as_str()));
        match op {
            DsOp::Create => cmd,
            DsOp::Update | DsOp::Check => {
                cmd.arg(format!("--stocks={}", self.manifest_path().display()))
            }
        }
    }

    /// Operations to run, in order.
    pub fn operations(&self) -> Vec<DsOp> {
        if self.update {
            vec![DsOp::Create, DsOp::Update, DsOp::Check]
        } else {
            vec![DsOp::Create]
        }
    }
}

/// Split a comma-separated symbol list, trimming blanks.
pub fn parse_symbols(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Write the manifest, then drive `sp_dstool`.
pub fn run(request: &BootstrapRequest) -> SpResult<()> {
    request.validate()?;

    let path = request.manifest_path();
    tracing::info!(path = %path.display(), "create manifest");
    write_manifest(&path, &seed_rows(&request.symbols, request.base_date))?;

    for op in request.operations() {
        request.dstool_command(op).run(request.verbose)?;
    }
    Ok(())
}
