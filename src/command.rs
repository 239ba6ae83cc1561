//! Builds the exact Julia invocations used by the pipeline.
//!
//! Commands are assembled fresh for every request from the currently
//! resolved tool path and a snapshot of the configuration; nothing here is
//! cached, because settings may change between two edits of the same file.

use crate::config::{FormatOptions, ToolConfig};

/// The Julia package driving the actual formatting.
pub const FORMAT_LIBRARY: &str = "JuliaFormatter";

/// One ready-to-spawn invocation: program plus argv, no shell involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl FormatCommand {
    /// Single-line rendering for logs and test comparison. Arguments with
    /// spaces are single-quoted; this string is never handed to a shell.
    pub fn to_command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push('\'');
                line.push_str(arg);
                line.push('\'');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Build the format invocation for one document.
///
/// The named arguments of the inline `format` call are emitted in the exact
/// order of the JuliaFormatter signature; reordering them would still run
/// but makes output comparison (and the documented interface) unstable.
pub fn format_command(
    tool: &str,
    document_path: &str,
    config: &ToolConfig,
    options: &FormatOptions,
) -> FormatCommand {
    let path = escape_julia_string(document_path);
    let expression = format!(
        "using {FORMAT_LIBRARY}; format(\"{path}\"; overwrite={}, indent={}, margin={}, \
         always_for_in={}, whitespace_typedefs={}, whitespace_ops_in_indices={})",
        options.overwrite,
        options.indent,
        options.margin,
        options.always_for_in,
        options.whitespace_typedefs,
        options.whitespace_ops_in_indices,
    );
    FormatCommand {
        program: tool.to_string(),
        args: vec![
            format!("--compile={}", config.compile_mode.as_str()),
            "-e".to_string(),
            normalize_whitespace(&expression),
        ],
    }
}

/// Build the remediation invocation that installs the formatting package.
pub fn install_command(tool: &str) -> FormatCommand {
    FormatCommand {
        program: tool.to_string(),
        args: vec![
            "-e".to_string(),
            format!("using Pkg; Pkg.update(); Pkg.add(\"{FORMAT_LIBRARY}\")"),
        ],
    }
}

/// Collapse every whitespace run to a single space so the emitted command is
/// reproducible regardless of how the expression template is wrapped.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape a filesystem path for embedding in a Julia string literal.
///
/// Backslashes are normalized to forward slashes first (Julia accepts them
/// on every platform and they are the separators a shell won't eat), then
/// the characters Julia interpolates or terminates on are escaped.
fn escape_julia_string(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '\\' => escaped.push('/'),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            other => escaped.push(other),
        }
    }
    escaped
}
