//! Implementation of the `frvn init` command.
//!
//! Responsibility: resolve names and defaults from CLI arguments, call the
//! core materializer, and display results. No business logic lives here.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, instrument};

use frvn_adapters::{BuiltinDeployAssets, LocalFilesystem, resolve_template_source};
use frvn_core::application::services::{ExportService, MaterializeOptions, MaterializeService};
use frvn_core::domain::RenderContext;

use crate::{
    cli::{InitArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli as _},
    output::OutputManager,
};

/// Execute the `frvn init` command.
///
/// Dispatch sequence:
/// 1. Resolve the destination and derive project / service names
/// 2. Build the replacement context with config-backed defaults
/// 3. Materialize the packaged template
/// 4. Export the deploy scripts (unless `--no-export-deploy`)
/// 5. Print next-steps guidance
#[instrument(skip_all, fields(destination = %args.destination.display()))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve destination and names
    let destination = absolutize(&args.destination)?;
    let project_name = resolve_project_name(&destination, args.name.as_deref())?;
    let service_name = args
        .service
        .clone()
        .unwrap_or_else(|| project_name.replace('_', "-"));

    // 2. Replacement context with config-backed defaults
    let context = RenderContext::new(
        &project_name,
        &service_name,
        args.artifact_repo
            .as_deref()
            .unwrap_or(&config.defaults.artifact_repo),
        args.image_tag
            .as_deref()
            .unwrap_or(&config.defaults.image_tag),
    );

    debug!(
        project = %project_name,
        service = %service_name,
        replace_existing = args.replace_existing,
        "Init resolved"
    );

    // 3. Materialize
    let service = MaterializeService::new(resolve_template_source(), Box::new(LocalFilesystem::new()));

    output.header(&format!("Generating project into: {}", destination.display()))?;
    info!(project = %project_name, path = %destination.display(), "Materialization started");

    let report = service.materialize(
        &destination,
        &context,
        MaterializeOptions {
            replace_existing: args.replace_existing,
        },
    )?;

    output.success(&format!(
        "Project '{}' generated ({} files, {} directories)",
        project_name, report.files_written, report.directories_created
    ))?;
    if let Some(fallback) = &report.sensitive_fallback {
        output.warning(&format!(
            "Writing .envexample was blocked; wrote {} instead",
            fallback.display()
        ))?;
    }

    // 4. Deploy scripts, for convenience
    if !args.no_export_deploy {
        let exporter = ExportService::new(
            Box::new(BuiltinDeployAssets::new()),
            Box::new(LocalFilesystem::new()),
        );
        let deploy_dir = exporter.export(&destination, false)?;
        output.success(&format!("Deploy scripts exported to {}", deploy_dir.display()))?;
    }

    // 5. Next steps
    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", args.destination.display()))?;
        output.print("  cp .envexample .env   # then fill in PROJECT_ID etc.")?;
        output.print("  docker compose -f docker-compose.dev.yml up")?;
    }

    Ok(())
}

// ── Name resolution ───────────────────────────────────────────────────────────

/// Make `path` absolute against the current directory, collapsing `.` and
/// `..` components so the directory name is meaningful.
fn absolutize(path: &Path) -> CliResult<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .with_cli_context(|| "Failed to resolve the current directory")?
            .join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Project name: explicit `--name` wins, otherwise the destination
/// directory's own name.
fn resolve_project_name(destination: &Path, explicit: Option<&str>) -> CliResult<String> {
    if let Some(name) = explicit {
        validate_project_name(name)?;
        return Ok(name.to_string());
    }

    destination
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| CliError::InvalidProjectName {
            name: destination.display().to_string(),
            reason: "cannot derive a project name from this path; pass --name".into(),
        })
}

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot contain path separators".into(),
        });
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_name_wins() {
        let name = resolve_project_name(Path::new("/work/other"), Some("myapp")).unwrap();
        assert_eq!(name, "myapp");
    }

    #[test]
    fn name_derived_from_destination() {
        let name = resolve_project_name(Path::new("/work/myapp"), None).unwrap();
        assert_eq!(name, "myapp");
    }

    #[test]
    fn root_destination_needs_explicit_name() {
        assert!(resolve_project_name(Path::new("/"), None).is_err());
    }

    #[test]
    fn invalid_explicit_names_rejected() {
        assert!(resolve_project_name(Path::new("/work/x"), Some("")).is_err());
        assert!(resolve_project_name(Path::new("/work/x"), Some("a/b")).is_err());
    }

    #[test]
    fn absolutize_collapses_dot_components() {
        let p = absolutize(Path::new("/work/./myapp/../myapp")).unwrap();
        assert_eq!(p, PathBuf::from("/work/myapp"));
    }

    #[test]
    fn absolutize_keeps_absolute_paths() {
        let p = absolutize(Path::new("/work/myapp")).unwrap();
        assert_eq!(p, PathBuf::from("/work/myapp"));
    }
}
