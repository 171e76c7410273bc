//! Implementation of the `frvn doctor` command.

use tracing::{debug, instrument};

use crate::{
    error::{CliError, CliResult},
    output::OutputManager,
};

/// External executables a generated project needs for local development and
/// deployment.
pub const REQUIRED_TOOLS: [&str; 5] = ["docker", "gcloud", "node", "npm", "python3"];

/// Execute the `frvn doctor` command.
///
/// Probes each required tool on `PATH`. Missing tools are aggregated into a
/// single error so one run reports everything at once.
#[instrument(skip_all)]
pub fn execute(output: OutputManager) -> CliResult<()> {
    let mut missing = Vec::new();

    for tool in REQUIRED_TOOLS {
        match which::which(tool) {
            Ok(path) => {
                debug!(tool, path = %path.display(), "tool found");
                output.success(&format!("{tool:<8} {}", path.display()))?;
            }
            Err(_) => {
                output.error(&format!("{tool:<8} not found"))?;
                missing.push(tool.to_string());
            }
        }
    }

    if !missing.is_empty() {
        return Err(CliError::MissingTools { tools: missing });
    }

    output.print("")?;
    output.success("All required tools are available.")?;
    Ok(())
}
