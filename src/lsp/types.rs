//! LSP-facing configuration types.

use serde::{Deserialize, Serialize};

use crate::config::{CompileMode, FormatOptions, ToolConfig};

/// Settings the host editor sends as `initializationOptions` and via
/// `workspace/didChangeConfiguration`. Every field is optional on the wire;
/// missing values fall back to the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JlfmtLspConfig {
    /// Explicit path to the Julia executable; empty means "find one".
    pub executable_path: Option<String>,
    pub compile_mode: CompileMode,
    /// Style parameters forwarded to JuliaFormatter.
    pub format: FormatOptions,
}

impl JlfmtLspConfig {
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig {
            executable_path: self.executable_path.clone(),
            compile_mode: self.compile_mode,
        }
    }
}
