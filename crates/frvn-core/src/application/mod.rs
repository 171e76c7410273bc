//! Application layer for FRVN.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (Materialize, Export, Deploy)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    DeployService, ExportService, MaterializeOptions, MaterializeReport, MaterializeService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{DeployAsset, DeployAssetSource, Filesystem, ScriptRunner, TemplateSource};

pub use error::ApplicationError;
