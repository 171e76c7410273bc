//! Application services - use case orchestration.

pub mod deploy_service;
pub mod export_service;
pub mod materialize_service;

pub use deploy_service::DeployService;
pub use export_service::{DEPLOY_DIR_NAME, ExportService};
pub use materialize_service::{MaterializeOptions, MaterializeReport, MaterializeService};
