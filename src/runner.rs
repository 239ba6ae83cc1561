//! Executes built commands and classifies their failures.
//!
//! Runs on the tokio runtime so a slow Julia startup never blocks the
//! server's request loop; the caller simply awaits. There is no timeout or
//! cancellation here: a format request runs to completion and the user
//! re-triggers manually after a failure.

use std::process::Stdio;

use tokio::process::Command;

use crate::command::FormatCommand;
use crate::error::{FormatError, MISSING_PACKAGE_MARKER};

/// Run a format invocation and return its stdout as text.
///
/// The missing-package case is recognized here, at the source, so callers
/// match on [`FormatError::MissingDependency`] instead of re-scanning stderr.
pub async fn run(command: &FormatCommand) -> Result<String, FormatError> {
    let output = spawn(command).await?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        log::debug!(
            "format command failed with {:?}: {}",
            output.status.code(),
            stderr.trim_end()
        );
        if stderr.contains(MISSING_PACKAGE_MARKER) {
            Err(FormatError::MissingDependency { stderr })
        } else {
            Err(FormatError::ProcessFailed {
                code: output.status.code(),
                stderr,
            })
        }
    }
}

/// Run the remediation install of the formatting package.
pub async fn run_install(command: &FormatCommand) -> Result<(), FormatError> {
    let output = spawn(command).await?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        Err(FormatError::InstallFailed { stderr })
    }
}

async fn spawn(command: &FormatCommand) -> Result<std::process::Output, FormatError> {
    log::info!("running: {}", command.to_command_line());
    let output = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .output()
        .await?;
    Ok(output)
}
