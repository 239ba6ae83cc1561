//! jlfmt: an editor integration for JuliaFormatter.
//!
//! Formats Julia source by invoking the external `julia` runtime with the
//! JuliaFormatter package, parsing the unified diff it emits, and turning it
//! into minimal text edits the host editor applies to the live buffer.
//!
//! The pipeline: resolver locates the executable, the command builder
//! assembles the invocation, the runner executes it, the diff parser and
//! edit translator turn its output into [`tower_lsp::lsp_types::TextEdit`]s.

pub mod command;
pub mod config;
pub mod diff;
pub mod edits;
pub mod error;
pub mod lsp;
pub mod resolver;
pub mod runner;

pub use config::{CompileMode, FormatOptions, ToolConfig};
pub use error::{FormatError, Remediation};

use tower_lsp::lsp_types::TextEdit;

/// Run one full format request and return the edits for the live buffer.
///
/// The tool is always invoked with `overwrite=false` here so it emits a
/// diff instead of rewriting the file; the buffer is the source of truth
/// for an open document, not the disk. Either the whole hunk set
/// translates or the request fails; partial edit lists are never produced.
pub async fn format_to_edits(
    document_path: &str,
    config: &ToolConfig,
    options: &FormatOptions,
) -> Result<Vec<TextEdit>, FormatError> {
    let tool = resolver::resolve(config).await?;
    let diff_options = FormatOptions {
        overwrite: false,
        ..options.clone()
    };
    let command = command::format_command(&tool, document_path, config, &diff_options);
    let output = runner::run(&command).await?;
    let hunks = diff::parse(&output)?;
    Ok(edits::translate(&hunks))
}

/// Run one format invocation with the caller's `overwrite` setting and
/// return the tool's raw stdout (the diff text when `overwrite` is false,
/// typically empty when the tool rewrote the file in place).
pub async fn format_raw(
    document_path: &str,
    config: &ToolConfig,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let tool = resolver::resolve(config).await?;
    let command = command::format_command(&tool, document_path, config, options);
    runner::run(&command).await
}

/// Install JuliaFormatter into the resolved Julia environment.
pub async fn install_formatter(config: &ToolConfig) -> Result<(), FormatError> {
    let tool = resolver::resolve(config).await?;
    let command = command::install_command(&tool);
    runner::run_install(&command).await
}
