//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `frvn-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateSource`: Template tree enumeration
//!   - `DeployAssetSource`: Packaged deploy scripts
//!   - `ScriptRunner`: Subprocess execution
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{DeployAsset, DeployAssetSource, Filesystem, ScriptRunner, TemplateSource};
