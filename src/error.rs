//! Error taxonomy for the formatting pipeline.
//!
//! Classification happens at the source: the process runner inspects tool
//! output and picks the variant, so UI layers only ever match on the enum.

use thiserror::Error;

/// Marker phrase Julia prints when `using JuliaFormatter` fails because the
/// package is absent from the active environment. Substring-matched against
/// stderr, so this is coupled to Julia's exact wording.
pub const MISSING_PACKAGE_MARKER: &str = "Package JuliaFormatter not found";

/// URL offered to users when a failure is not actionable on their side.
pub const ISSUE_TRACKER_URL: &str = "https://github.com/jlfmt/jlfmt/issues/new";

#[derive(Debug, Error)]
pub enum FormatError {
    /// No configured path and neither default command validated.
    #[error("no Julia executable found: set jlfmt.executablePath or install Julia")]
    ToolNotFound,

    /// An explicitly configured path failed validation. Hard stop: the
    /// resolver never falls back to defaults past a bad override.
    #[error("configured Julia executable is not runnable: {path}")]
    InvalidConfiguredPath { path: String },

    /// Tool output was not a unified diff for a single file.
    #[error("formatter output is not a unified diff: {0}")]
    PatchParse(String),

    /// The Julia environment is missing the JuliaFormatter package.
    #[error("JuliaFormatter is not installed in the active Julia environment")]
    MissingDependency { stderr: String },

    /// Non-zero exit from the format invocation, cause unrecognized.
    #[error("julia exited with status {code:?}: {stderr}")]
    ProcessFailed { code: Option<i32>, stderr: String },

    /// The remediation install itself failed.
    #[error("installing JuliaFormatter failed: {stderr}")]
    InstallFailed { stderr: String },

    #[error("failed to launch process: {0}")]
    Io(#[from] std::io::Error),
}

/// Follow-up action to offer the user alongside an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    /// Offer to run the package-manager install of JuliaFormatter.
    InstallFormatter,
    /// Offer a link to the issue tracker.
    ReportBug,
    /// The message itself is the remediation (e.g. fix your settings).
    None,
}

impl FormatError {
    /// Decide which follow-up action fits this failure.
    pub fn remediation(&self) -> Remediation {
        match self {
            FormatError::MissingDependency { .. } => Remediation::InstallFormatter,
            FormatError::ProcessFailed { .. } | FormatError::PatchParse(_) | FormatError::Io(_) => {
                Remediation::ReportBug
            }
            FormatError::ToolNotFound
            | FormatError::InvalidConfiguredPath { .. }
            | FormatError::InstallFailed { .. } => Remediation::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dependency_offers_install() {
        let err = FormatError::MissingDependency {
            stderr: format!("ERROR: ArgumentError: {MISSING_PACKAGE_MARKER} in current path"),
        };
        assert_eq!(err.remediation(), Remediation::InstallFormatter);
    }

    #[test]
    fn generic_process_failure_offers_bug_report() {
        let err = FormatError::ProcessFailed {
            code: Some(1),
            stderr: "ERROR: LoadError: something else".to_string(),
        };
        assert_eq!(err.remediation(), Remediation::ReportBug);
    }

    #[test]
    fn resolver_errors_carry_their_own_remediation() {
        assert_eq!(FormatError::ToolNotFound.remediation(), Remediation::None);
        let err = FormatError::InvalidConfiguredPath {
            path: "/opt/julia/bin/julia".to_string(),
        };
        assert_eq!(err.remediation(), Remediation::None);
    }
}
