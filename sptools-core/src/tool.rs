//! Blocking invocation of external executables (`sp_dstool`, `gnuplot`).

use std::fmt;
use std::process::{Command, Stdio};

use crate::error::{SpError, SpResult};

/// A command line to run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Run the command and wait for it.
    ///
    /// In verbose mode the command line is logged and the child inherits
    /// stdout/stderr; otherwise both are captured and stderr is attached to
    /// the error on a non-zero exit.
    pub fn run(&self, verbose: bool) -> SpResult<()> {
        let command = self.to_string();
        if verbose {
            tracing::info!(%command, "run command");
        } else {
            tracing::debug!(%command, "run command");
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if verbose {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        }

        let output = cmd.output().map_err(|e| SpError::ExternalTool {
            command: command.clone(),
            stderr: e.to_string(),
        })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::debug!(%command, status = ?output.status.code(), "command failed");
            Err(SpError::ExternalTool { command, stderr })
        }
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let cmd = ToolCommand::new("sp_dstool")
            .arg("--root=/data")
            .arg("--dsop=create");
        assert_eq!(cmd.to_string(), "sp_dstool --root=/data --dsop=create");
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_ok() {
        ToolCommand::new("true").run(false).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_carries_command_and_stderr() {
        let cmd = ToolCommand::new("sh")
            .arg("-c")
            .arg("echo oops >&2; exit 3");
        match cmd.run(false) {
            Err(SpError::ExternalTool { command, stderr }) => {
                assert_eq!(command, cmd.to_string());
                assert_eq!(stderr.trim(), "oops");
            }
            other => panic!("expected ExternalTool error, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_an_external_tool_error() {
        let cmd = ToolCommand::new("sptools-definitely-not-installed").arg("--dsop=check");
        let err = cmd.run(false).unwrap_err();
        assert!(err
            .to_string()
            .contains("sptools-definitely-not-installed --dsop=check"));
    }
}
