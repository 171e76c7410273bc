//! Implementation of the `frvn deploy` command.
//!
//! Responsibility: ensure the deploy scripts are in place, gather the env
//! map, and hand over to the core deploy service. The child's exit status is
//! the command's own result.

use std::path::Path;

use tracing::{debug, info, instrument};

use frvn_adapters::{BuiltinDeployAssets, LocalFilesystem, LocalScriptRunner, load_project_env};
use frvn_core::application::services::{DEPLOY_DIR_NAME, DeployService, ExportService};
use frvn_core::domain::{DeployTarget, EnvMap, merge_first_wins};

use crate::{
    cli::DeployArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `frvn deploy` command.
///
/// Dispatch sequence:
/// 1. Export the deploy scripts into the project (unless `--no-export`)
/// 2. Load the project env file and merge it first-definition-wins against
///    the live process environment
/// 3. Run the target's script with the project root as working directory
/// 4. Pass the child's exit code through verbatim
#[instrument(skip_all, fields(target = ?args.target, project_root = %args.project_root.display()))]
pub fn execute(args: DeployArgs, output: OutputManager) -> CliResult<()> {
    let target = DeployTarget::from(args.target);
    let project_root = &args.project_root;

    // 1. Ensure scripts are present
    if !args.no_export {
        let exporter = ExportService::new(
            Box::new(BuiltinDeployAssets::new()),
            Box::new(LocalFilesystem::new()),
        );
        exporter.export(project_root, args.force_export)?;
        debug!("deploy scripts exported");
    }

    // 2. Env merge: shell variables always win over the project env file
    let file_env = load_project_env(project_root);
    let current: EnvMap = std::env::vars().collect();
    let extra = merge_first_wins(&current, &file_env);
    debug!(from_file = file_env.len(), added = extra.len(), "env merged");

    // 3. Run
    let script = script_path(project_root, target);
    output.header(&format!("Running: {}", script.display()))?;
    info!(script = %script.display(), "Deploy started");

    let service = DeployService::new(
        Box::new(LocalScriptRunner::new()),
        Box::new(LocalFilesystem::new()),
    );
    let code = service.deploy(target, project_root, &extra)?;

    // 4. Verbatim pass-through
    if code != 0 {
        return Err(CliError::ScriptFailed { script, code });
    }

    output.success(&format!("Deployment to {target} finished"))?;
    Ok(())
}

fn script_path(project_root: &Path, target: DeployTarget) -> std::path::PathBuf {
    project_root.join(DEPLOY_DIR_NAME).join(target.script_name())
}
