//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `frvn-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{EnvMap, TemplateEntry};
use crate::error::FrvnResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `frvn_adapters::filesystem::LocalFilesystem` (production)
/// - `frvn_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Text and binary writes are separate so adapters can report
///   permission-denied precisely per write.
/// - Permissions are capability-based (an executable flag), not Unix modes.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Idempotent.
    fn create_dir_all(&self, path: &Path) -> FrvnResult<()>;

    /// Write text content to a file, replacing any existing content.
    fn write_text(&self, path: &Path, content: &str) -> FrvnResult<()>;

    /// Write raw bytes to a file, replacing any existing content.
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> FrvnResult<()>;

    /// Mark a file executable (no-op on platforms without the concept).
    fn set_executable(&self, path: &Path) -> FrvnResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check whether a directory exists and contains no entries.
    fn dir_is_empty(&self, path: &Path) -> FrvnResult<bool>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> FrvnResult<()>;
}

/// Port for enumerating the template tree.
///
/// Classification happens here, once per enumeration: each returned entry is
/// already tagged directory/text/binary/sensitive (see
/// [`crate::domain::EntryPayload`]), so the materializer contains no
/// filename comparisons.
///
/// Implemented by:
/// - `frvn_adapters::template_source::BuiltinTemplate` (packaged, embedded)
/// - `frvn_adapters::template_source::DirectoryTemplate` (on-disk override)
pub trait TemplateSource: Send + Sync {
    /// Enumerate every entry of the source tree.
    ///
    /// Order is not significant for correctness, but parents should precede
    /// children so `create_dir_all` calls stay cheap.
    fn entries(&self) -> FrvnResult<Vec<TemplateEntry>>;
}

/// One packaged deploy asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployAsset {
    /// Path relative to the exported `deploy/` directory.
    pub name: String,
    pub bytes: Vec<u8>,
    pub executable: bool,
}

/// Port for the packaged deploy scripts.
///
/// Assets are opaque: they are exported byte-for-byte with no token
/// substitution. Any parameterization inside them resolves at run time via
/// environment variables.
pub trait DeployAssetSource: Send + Sync {
    fn assets(&self) -> FrvnResult<Vec<DeployAsset>>;
}

/// Port for running a deploy script as a child process.
///
/// Implemented by:
/// - `frvn_adapters::script_runner::LocalScriptRunner` (bash subprocess)
pub trait ScriptRunner: Send + Sync {
    /// Run `script` with `workdir` as the working directory.
    ///
    /// `extra_env` contains only variables absent from the parent
    /// environment (first-definition-wins merge already applied); the child
    /// inherits the parent's environment and standard streams. Blocks until
    /// the child exits and returns its exit code verbatim.
    fn run(&self, script: &Path, workdir: &Path, extra_env: &EnvMap) -> FrvnResult<i32>;
}
