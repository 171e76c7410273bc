//! Deploy script execution via a bash subprocess.

use std::path::Path;
use std::process::Command;

use tracing::{info, instrument};

use frvn_core::application::{ApplicationError, ports::ScriptRunner};
use frvn_core::domain::EnvMap;
use frvn_core::error::FrvnResult;

/// Runs deploy scripts through `bash`, inheriting stdio.
///
/// The script runs with the project root as working directory so relative
/// paths inside it (compose files, Dockerfiles) resolve the same way as a
/// manual `bash deploy/...` invocation would.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScriptRunner;

impl LocalScriptRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ScriptRunner for LocalScriptRunner {
    #[instrument(skip(self, extra_env), fields(script = %script.display()))]
    fn run(&self, script: &Path, workdir: &Path, extra_env: &EnvMap) -> FrvnResult<i32> {
        info!(workdir = %workdir.display(), env_vars = extra_env.len(), "launching deploy script");

        let status = Command::new("bash")
            .arg(script)
            .current_dir(workdir)
            .envs(extra_env)
            .status()
            .map_err(|e| ApplicationError::ScriptLaunchFailed {
                script: script.to_path_buf(),
                reason: e.to_string(),
            })?;

        // Signal-terminated children have no exit code; report failure.
        let code = status.code().unwrap_or(1);
        info!(code, "deploy script finished");
        Ok(code)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use frvn_core::error::FrvnError;

    fn write_script(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("script.sh");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn passes_exit_code_through() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "exit 42\n");

        let code = LocalScriptRunner::new()
            .run(&script, dir.path(), &EnvMap::new())
            .unwrap();
        assert_eq!(code, 42);
    }

    #[test]
    fn runs_with_workdir_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "test -n \"$MARKER\" && test -e script.sh\n");

        let mut env = EnvMap::new();
        env.insert("MARKER".into(), "1".into());

        let code = LocalScriptRunner::new()
            .run(&script, dir.path(), &env)
            .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn missing_interpreter_target_reports_launch_failure() {
        // bash itself exists, but spawning with an unreadable cwd fails.
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "exit 0\n");

        let err = LocalScriptRunner::new()
            .run(&script, Path::new("/nonexistent/workdir"), &EnvMap::new())
            .unwrap_err();
        assert!(matches!(
            err,
            FrvnError::Application(ApplicationError::ScriptLaunchFailed { .. })
        ));
    }
}
