//! Deployment invoker.
//!
//! Resolves the requested target to a script under the project's `deploy/`
//! directory and runs it as a blocking child process. The child's exit
//! status is returned verbatim; a non-zero script exit is not an error at
//! this layer.

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ScriptRunner},
    },
    domain::{DeployTarget, EnvMap},
    error::FrvnResult,
};

use super::export_service::DEPLOY_DIR_NAME;

/// Runs deploy scripts inside a project.
pub struct DeployService {
    runner: Box<dyn ScriptRunner>,
    filesystem: Box<dyn Filesystem>,
}

impl DeployService {
    pub fn new(runner: Box<dyn ScriptRunner>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { runner, filesystem }
    }

    /// Run the deploy script for `target` and return the child's exit code.
    ///
    /// `extra_env` must already be first-definition-wins merged: only
    /// variables absent from the parent environment. Blocks until the child
    /// exits; termination is the child's business (or an external signal's).
    #[instrument(skip_all, fields(target = %target, project_root = %project_root.display()))]
    pub fn deploy(
        &self,
        target: DeployTarget,
        project_root: &Path,
        extra_env: &EnvMap,
    ) -> FrvnResult<i32> {
        let script = project_root.join(DEPLOY_DIR_NAME).join(target.script_name());

        if !self.filesystem.exists(&script) {
            return Err(ApplicationError::ScriptNotFound { path: script }.into());
        }

        info!(script = %script.display(), "Running deploy script");
        let code = self.runner.run(&script, project_root, extra_env)?;
        info!(code, "Deploy script exited");
        Ok(code)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrvnError;
    use mockall::mock;

    mock! {
        Runner {}
        impl ScriptRunner for Runner {
            fn run(&self, script: &Path, workdir: &Path, extra_env: &EnvMap) -> FrvnResult<i32>;
        }
    }

    mock! {
        Fs {}
        impl Filesystem for Fs {
            fn create_dir_all(&self, path: &Path) -> FrvnResult<()>;
            fn write_text(&self, path: &Path, content: &str) -> FrvnResult<()>;
            fn write_bytes(&self, path: &Path, bytes: &[u8]) -> FrvnResult<()>;
            fn set_executable(&self, path: &Path) -> FrvnResult<()>;
            fn exists(&self, path: &Path) -> bool;
            fn dir_is_empty(&self, path: &Path) -> FrvnResult<bool>;
            fn remove_dir_all(&self, path: &Path) -> FrvnResult<()>;
        }
    }

    #[test]
    fn missing_script_is_not_found() {
        let runner = MockRunner::new();
        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| false);

        let service = DeployService::new(Box::new(runner), Box::new(fs));
        let err = service
            .deploy(DeployTarget::CloudRun, Path::new("/proj"), &EnvMap::new())
            .unwrap_err();
        match err {
            FrvnError::Application(ApplicationError::ScriptNotFound { path }) => {
                assert_eq!(path, Path::new("/proj/deploy/deploy_gcp_cloudrun.sh"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn child_exit_code_passes_through() {
        let mut runner = MockRunner::new();
        runner
            .expect_run()
            .withf(|script, workdir, _| {
                script == Path::new("/proj/deploy/deploy_gcp_vm.sh")
                    && workdir == Path::new("/proj")
            })
            .times(1)
            .returning(|_, _, _| Ok(42));

        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| true);

        let service = DeployService::new(Box::new(runner), Box::new(fs));
        let code = service
            .deploy(DeployTarget::Vm, Path::new("/proj"), &EnvMap::new())
            .unwrap();
        assert_eq!(code, 42);
    }

    #[test]
    fn env_map_reaches_the_runner() {
        let mut env = EnvMap::new();
        env.insert("REGION".into(), "asia-northeast3".into());

        let mut runner = MockRunner::new();
        runner
            .expect_run()
            .withf(|_, _, extra| extra.get("REGION").map(String::as_str) == Some("asia-northeast3"))
            .times(1)
            .returning(|_, _, _| Ok(0));

        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| true);

        let service = DeployService::new(Box::new(runner), Box::new(fs));
        assert_eq!(
            service
                .deploy(DeployTarget::CloudRun, Path::new("/proj"), &env)
                .unwrap(),
            0
        );
    }
}
