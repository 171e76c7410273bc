//! Infrastructure adapters for FRVN.
//!
//! This crate implements the ports defined in `frvn-core::application::ports`.
//! It contains all external dependencies and I/O operations: the real and
//! in-memory filesystems, the embedded and on-disk template sources, the
//! embedded deploy scripts, the bash script runner, and project env-file
//! discovery.

pub mod deploy_assets;
pub mod env_file;
pub mod filesystem;
pub mod script_runner;
pub mod template_source;

// Re-export commonly used adapters
pub use deploy_assets::BuiltinDeployAssets;
pub use env_file::load_project_env;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use script_runner::LocalScriptRunner;
pub use template_source::{BuiltinTemplate, DirectoryTemplate, resolve_template_source};
