//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use frvn_core::domain::DeployTarget;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "frvn",
    bin_name = "frvn",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "FRVN project initializer",
    long_about = "FRVN materializes a full-stack project template (FastAPI \
                  backend, Vite frontend, docker compose) and ships the GCP \
                  deploy scripts to run it.",
    after_help = "EXAMPLES:\n\
        \x20 frvn init ./myapp --name myapp\n\
        \x20 frvn doctor\n\
        \x20 frvn export deploy --to ./myapp\n\
        \x20 frvn deploy cloudrun --project-root ./myapp",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a new project from the packaged template.
    #[command(
        about = "Initialize a new project from template",
        after_help = "EXAMPLES:\n\
            \x20 frvn init                     # into the current directory\n\
            \x20 frvn init ./myapp             # name derived from 'myapp'\n\
            \x20 frvn init ./myapp --service my-svc --image-tag v1"
    )]
    Init(InitArgs),

    /// Check that the local toolchain is present.
    #[command(about = "Check local toolchain")]
    Doctor,

    /// Export auxiliary assets into a project.
    #[command(
        about = "Export auxiliary assets into current project",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 frvn export deploy\n\
            \x20 frvn export deploy --to ./myapp --force"
    )]
    Export(ExportCommands),

    /// Deploy a project using the exported scripts.
    #[command(
        about = "Deploy using embedded scripts",
        after_help = "EXAMPLES:\n\
            \x20 frvn deploy cloudrun --project-root ./myapp\n\
            \x20 frvn deploy vm --no-export"
    )]
    Deploy(DeployArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 frvn completions bash > ~/.local/share/bash-completion/completions/frvn\n\
            \x20 frvn completions zsh  > ~/.zfunc/_frvn"
    )]
    Completions(CompletionsArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `frvn init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Target directory for the new project.
    #[arg(
        value_name = "DESTINATION",
        default_value = ".",
        help = "Target directory (default: .)"
    )]
    pub destination: PathBuf,

    /// Project name; defaults to the destination directory name.
    #[arg(long = "name", value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    /// Service name; defaults to the project name with `_` replaced by `-`.
    #[arg(long = "service", value_name = "NAME", help = "Service name")]
    pub service: Option<String>,

    /// Artifact Registry repository name.
    #[arg(
        long = "artifact-repo",
        value_name = "REPO",
        help = "Artifact Registry repo name"
    )]
    pub artifact_repo: Option<String>,

    /// Container image tag.
    #[arg(long = "image-tag", value_name = "TAG", help = "Default image tag")]
    pub image_tag: Option<String>,

    /// Remove a non-empty destination before generating (destructive).
    #[arg(
        long = "replace-existing",
        help = "Replace a non-empty destination directory"
    )]
    pub replace_existing: bool,

    /// Skip copying the deploy scripts into the new project.
    #[arg(long = "no-export-deploy", help = "Do not export deploy/ scripts")]
    pub no_export_deploy: bool,
}

// ── export ────────────────────────────────────────────────────────────────────

/// Subcommands for `frvn export`.
#[derive(Debug, Subcommand)]
pub enum ExportCommands {
    /// Export the deploy scripts into a project.
    #[command(about = "Export deploy/ scripts")]
    Deploy(ExportDeployArgs),
}

/// Arguments for `frvn export deploy`.
#[derive(Debug, Args)]
pub struct ExportDeployArgs {
    /// Project root receiving the `deploy/` directory.
    #[arg(
        long = "to",
        value_name = "DIR",
        default_value = ".",
        help = "Destination project root (default: .)"
    )]
    pub to: PathBuf,

    /// Overwrite an existing `deploy/` directory.
    #[arg(long = "force", help = "Overwrite if exists")]
    pub force: bool,
}

// ── deploy ────────────────────────────────────────────────────────────────────

/// Arguments for `frvn deploy`.
#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Deployment target.
    #[arg(value_enum, value_name = "TARGET", help = "Deployment target")]
    pub target: TargetArg,

    /// Project root containing backend/ and frontend/.
    #[arg(
        long = "project-root",
        value_name = "DIR",
        default_value = ".",
        help = "Project root that has backend/frontend"
    )]
    pub project_root: PathBuf,

    /// Skip the export step before deploying.
    #[arg(long = "no-export", help = "Do not copy scripts into project")]
    pub no_export: bool,

    /// Overwrite an existing `deploy/` directory during the export step.
    #[arg(long = "force-export", help = "Overwrite deploy/ when exporting")]
    pub force_export: bool,
}

/// CLI-facing deployment target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TargetArg {
    /// Cloud Run backend + GCS frontend.
    Cloudrun,
    /// Single GCE VM running docker compose.
    Vm,
}

impl From<TargetArg> for DeployTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Cloudrun => DeployTarget::CloudRun,
            TargetArg::Vm => DeployTarget::Vm,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `frvn completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_init_with_overrides() {
        let cli = Cli::parse_from([
            "frvn",
            "init",
            "./myapp",
            "--name",
            "myapp",
            "--artifact-repo",
            "custom-repo",
        ]);
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.destination, PathBuf::from("./myapp"));
        assert_eq!(args.name.as_deref(), Some("myapp"));
        assert_eq!(args.artifact_repo.as_deref(), Some("custom-repo"));
        assert!(!args.replace_existing);
    }

    #[test]
    fn init_destination_defaults_to_cwd() {
        let cli = Cli::parse_from(["frvn", "init"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.destination, PathBuf::from("."));
    }

    #[test]
    fn parse_deploy_targets() {
        let cli = Cli::parse_from(["frvn", "deploy", "cloudrun"]);
        let Commands::Deploy(args) = cli.command else {
            panic!("expected deploy");
        };
        assert_eq!(args.target, TargetArg::Cloudrun);
        assert_eq!(DeployTarget::from(args.target), DeployTarget::CloudRun);

        let cli = Cli::parse_from(["frvn", "deploy", "vm", "--no-export"]);
        let Commands::Deploy(args) = cli.command else {
            panic!("expected deploy");
        };
        assert_eq!(DeployTarget::from(args.target), DeployTarget::Vm);
        assert!(args.no_export);
    }

    #[test]
    fn unknown_deploy_target_is_rejected() {
        assert!(Cli::try_parse_from(["frvn", "deploy", "gke"]).is_err());
    }

    #[test]
    fn export_requires_a_subcommand() {
        assert!(Cli::try_parse_from(["frvn", "export"]).is_err());
        assert!(Cli::try_parse_from(["frvn", "export", "deploy", "--force"]).is_ok());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["frvn", "--quiet", "--verbose", "doctor"]);
        assert!(result.is_err());
    }
}
