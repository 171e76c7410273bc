//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The packaged/override template source could not be found.
    #[error("Template not found: {hint}")]
    TemplateNotFound { hint: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A write was blocked by filesystem policy.
    ///
    /// Fatal everywhere except the sensitive env-example file, which gets one
    /// retry under a non-hidden fallback name.
    #[error("Permission denied writing {path}")]
    PermissionDenied { path: PathBuf },

    /// Materialization destination exists and is not empty.
    #[error("Destination already exists at {path}")]
    DestinationExists { path: PathBuf },

    /// The project already has a deploy/ directory.
    #[error("Deploy directory already exists at {path}")]
    DeployDirExists { path: PathBuf },

    /// The requested deploy script is absent from the project.
    #[error("Script not found: {path}")]
    ScriptNotFound { path: PathBuf },

    /// The deploy script could not be launched at all.
    ///
    /// Distinct from a script that ran and exited non-zero; that exit status
    /// is passed through verbatim, not wrapped in an error.
    #[error("Failed to launch {script}: {reason}")]
    ScriptLaunchFailed { script: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { hint } => vec![
                format!("Looked for: {}", hint),
                "Set FRVN_TEMPLATE_DIR to point at a template directory".into(),
                "Or reinstall frvn so the packaged template is available".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::PermissionDenied { path } => vec![
                format!("Write blocked by filesystem policy: {}", path.display()),
                "Check directory permissions and mount options".into(),
            ],
            Self::DestinationExists { path } => vec![
                format!("Directory is not empty: {}", path.display()),
                "Use --replace-existing to wipe and regenerate (destructive)".into(),
                "Or choose a different destination".into(),
            ],
            Self::DeployDirExists { path } => vec![
                format!("Already exists: {}", path.display()),
                "Use --force to overwrite the deploy/ directory".into(),
            ],
            Self::ScriptNotFound { path } => vec![
                format!("Expected script at: {}", path.display()),
                "Run 'frvn export deploy' to copy the deploy scripts first".into(),
            ],
            Self::ScriptLaunchFailed { .. } => vec![
                "Ensure 'bash' is installed and on your PATH".into(),
                "Check that the script file is readable".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::ScriptNotFound { .. } => ErrorCategory::NotFound,
            Self::DestinationExists { .. } | Self::DeployDirExists { .. } => {
                ErrorCategory::Validation
            }
            Self::FilesystemError { .. }
            | Self::PermissionDenied { .. }
            | Self::ScriptLaunchFailed { .. } => ErrorCategory::Internal,
        }
    }
}
