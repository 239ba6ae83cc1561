//! User-facing configuration for the formatter integration.
//!
//! The host editor supplies these values as JSON (initialization options or
//! `workspace/didChangeConfiguration`); the CLI fills them from flags. Both
//! are snapshotted per format request so a settings change between edits is
//! picked up by the next request, never mid-flight.

use serde::{Deserialize, Serialize};

/// Julia's `--compile` level used when launching the formatter.
///
/// `min` keeps startup latency low, which matters because every format
/// request pays full Julia startup; `all` trades startup time for faster
/// formatting of very large files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompileMode {
    #[default]
    Min,
    All,
}

impl CompileMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompileMode::Min => "min",
            CompileMode::All => "all",
        }
    }
}

/// How to locate and launch the external tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolConfig {
    /// Explicit path to the Julia executable. Empty string means unset.
    pub executable_path: Option<String>,
    pub compile_mode: CompileMode,
}

impl ToolConfig {
    /// The configured path, with the empty string normalized to `None`.
    pub fn executable_override(&self) -> Option<&str> {
        match self.executable_path.as_deref() {
            Some("") | None => None,
            Some(path) => Some(path),
        }
    }
}

/// Style parameters forwarded to JuliaFormatter's `format` call.
///
/// Field names mirror the named arguments of the Julia signature; the
/// command builder relies on that correspondence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// Maximum line width. Must be positive.
    pub margin: u32,
    /// Spaces per indent level.
    pub indent: u32,
    /// Always rewrite `for x = range` as `for x in range`.
    pub always_for_in: bool,
    /// Let the tool rewrite the file on disk instead of emitting a diff.
    /// Ignored by LSP formatting, which always needs the diff.
    pub overwrite: bool,
    /// Surround `::` in typedefs with whitespace.
    pub whitespace_typedefs: bool,
    /// Surround operators inside indexing expressions with whitespace.
    pub whitespace_ops_in_indices: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            margin: 92,
            indent: 4,
            always_for_in: true,
            overwrite: true,
            whitespace_typedefs: false,
            whitespace_ops_in_indices: false,
        }
    }
}
