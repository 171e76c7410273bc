//! FRVN Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the FRVN
//! project initializer, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            frvn-cli (CLI)               │
//! │      (Implements Driving Ports)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Materialize, Export, Deploy)          │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  (Filesystem, TemplateSource,           │
//! │   DeployAssetSource, ScriptRunner)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     frvn-adapters (Infrastructure)      │
//! │  (LocalFilesystem, BuiltinTemplate,     │
//! │   LocalScriptRunner, ...)               │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (TemplateEntry, RenderContext,         │
//! │   DeployTarget, EnvMap)                 │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use frvn_core::{
//!     application::{MaterializeOptions, MaterializeService},
//!     domain::RenderContext,
//! };
//!
//! let ctx = RenderContext::new("myapp", "myapp", "frvn-repo", "latest");
//! let service = MaterializeService::new(source, filesystem);
//! service.materialize("./myapp".as_ref(), &ctx, MaterializeOptions::default())?;
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DeployService, ExportService, MaterializeOptions, MaterializeReport, MaterializeService,
        ports::{DeployAsset, DeployAssetSource, Filesystem, ScriptRunner, TemplateSource},
    };
    pub use crate::domain::{
        DeployTarget, EntryPayload, EnvMap, RelativePath, RenderContext, TemplateEntry,
    };
    pub use crate::error::{FrvnError, FrvnResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
