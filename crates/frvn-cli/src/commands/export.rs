//! Implementation of the `frvn export deploy` command.

use tracing::instrument;

use frvn_adapters::{BuiltinDeployAssets, LocalFilesystem};
use frvn_core::application::services::ExportService;

use crate::{cli::ExportDeployArgs, error::CliResult, output::OutputManager};

/// Execute the `frvn export deploy` command.
#[instrument(skip_all, fields(to = %args.to.display(), force = args.force))]
pub fn execute(args: ExportDeployArgs, output: OutputManager) -> CliResult<()> {
    let service = ExportService::new(
        Box::new(BuiltinDeployAssets::new()),
        Box::new(LocalFilesystem::new()),
    );

    let destination = service.export(&args.to, args.force)?;
    output.success(&format!(
        "Exported deploy scripts to: {}",
        destination.display()
    ))?;
    Ok(())
}
