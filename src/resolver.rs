//! Locates a working Julia executable.
//!
//! Resolution order: explicit override (hard failure if it does not run),
//! then the default command names. Validation spawns the candidate with
//! `--version` and looks only at the exit status; stdout/stderr are
//! discarded, so a launcher script that prints nothing still validates.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::config::ToolConfig;
use crate::error::FormatError;

/// Command names tried, in order, when no path is configured.
pub const DEFAULT_COMMANDS: [&str; 2] = ["julia", "julia.exe"];

/// Flag used to validate a candidate executable.
pub const VERSION_FLAG: &str = "--version";

/// Resolve the Julia executable to use for this request.
///
/// A configured path that fails validation is a hard stop: the user asked
/// for that specific binary, so silently falling back to `julia` on PATH
/// would format with a different toolchain than they configured.
pub async fn resolve(config: &ToolConfig) -> Result<String, FormatError> {
    resolve_with(config, &DEFAULT_COMMANDS).await
}

async fn resolve_with(config: &ToolConfig, candidates: &[&str]) -> Result<String, FormatError> {
    if let Some(raw) = config.executable_override() {
        let expanded = expand_home(raw);
        if validate(&expanded).await {
            log::debug!("using configured Julia executable: {expanded}");
            return Ok(expanded);
        }
        log::warn!("configured Julia executable failed validation: {expanded}");
        return Err(FormatError::InvalidConfiguredPath { path: expanded });
    }

    for candidate in candidates {
        if validate(candidate).await {
            log::debug!("resolved Julia executable: {candidate}");
            return Ok((*candidate).to_string());
        }
    }

    Err(FormatError::ToolNotFound)
}

/// Spawn `<program> --version` and report whether it exited successfully.
async fn validate(program: &str) -> bool {
    let status = Command::new(program)
        .arg(VERSION_FLAG)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;
    match status {
        Ok(status) => status.success(),
        Err(_) => false,
    }
}

/// Expand a leading `~/` to the user's home directory.
fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        use etcetera::{BaseStrategy, choose_base_strategy};
        let home = choose_base_strategy()
            .map(|s| s.home_dir().to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("~"));
        return home.join(rest).to_string_lossy().into_owned();
    }
    path.to_string()
}
