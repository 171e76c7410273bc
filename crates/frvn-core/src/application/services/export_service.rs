//! Deploy asset exporter.
//!
//! Copies the packaged deploy scripts into `<project_root>/deploy` as an
//! unconditional byte-for-byte copy. No token substitution happens here:
//! the scripts parameterize themselves at run time from environment
//! variables.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{DeployAssetSource, Filesystem},
    },
    error::FrvnResult,
};

/// Name of the subdirectory created under the project root.
pub const DEPLOY_DIR_NAME: &str = "deploy";

/// Exports packaged deploy scripts into a project.
pub struct ExportService {
    assets: Box<dyn DeployAssetSource>,
    filesystem: Box<dyn Filesystem>,
}

impl ExportService {
    pub fn new(assets: Box<dyn DeployAssetSource>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { assets, filesystem }
    }

    /// Export the deploy scripts to `<project_root>/deploy`.
    ///
    /// An existing `deploy/` directory fails with already-exists unless
    /// `force`, which removes it before copying. Returns the path to the
    /// exported directory.
    #[instrument(skip_all, fields(project_root = %project_root.display(), force))]
    pub fn export(&self, project_root: &Path, force: bool) -> FrvnResult<PathBuf> {
        let destination = project_root.join(DEPLOY_DIR_NAME);

        if self.filesystem.exists(&destination) {
            if !force {
                return Err(ApplicationError::DeployDirExists { path: destination }.into());
            }
            self.filesystem.remove_dir_all(&destination)?;
        }

        self.filesystem.create_dir_all(&destination)?;

        let assets = self.assets.assets()?;
        for asset in &assets {
            let target = destination.join(&asset.name);
            if let Some(parent) = target.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_bytes(&target, &asset.bytes)?;
            if asset.executable {
                self.filesystem.set_executable(&target)?;
            }
        }

        info!(
            count = assets.len(),
            destination = %destination.display(),
            "Deploy assets exported"
        );
        Ok(destination)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::DeployAsset;
    use crate::error::FrvnError;
    use mockall::mock;

    mock! {
        Assets {}
        impl DeployAssetSource for Assets {
            fn assets(&self) -> FrvnResult<Vec<DeployAsset>>;
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

    fn script(name: &str) -> DeployAsset {
        DeployAsset {
            name: name.to_string(),
            bytes: b"#!/usr/bin/env bash\n".to_vec(),
            executable: true,
        }
    }

    #[test]
    fn existing_deploy_dir_without_force_is_an_error() {
        let assets = MockAssets::new();
        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_dir_all().times(0);

        let service = ExportService::new(Box::new(assets), Box::new(fs));
        let err = service.export(Path::new("/proj"), false).unwrap_err();
        assert!(matches!(
            err,
            FrvnError::Application(ApplicationError::DeployDirExists { .. })
        ));
    }

    #[test]
    fn force_removes_then_copies() {
        let mut assets = MockAssets::new();
        assets
            .expect_assets()
            .returning(|| Ok(vec![script("deploy_gcp_cloudrun.sh")]));

        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_dir_all()
            .withf(|p| p == Path::new("/proj/deploy"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_bytes()
            .withf(|p, _| p == Path::new("/proj/deploy/deploy_gcp_cloudrun.sh"))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_set_executable().times(1).returning(|_| Ok(()));

        let service = ExportService::new(Box::new(assets), Box::new(fs));
        let out = service.export(Path::new("/proj"), true).unwrap();
        assert_eq!(out, Path::new("/proj/deploy"));
    }

    #[test]
    fn fresh_export_writes_all_assets() {
        let mut assets = MockAssets::new();
        assets.expect_assets().returning(|| {
            Ok(vec![script("deploy_gcp_cloudrun.sh"), script("deploy_gcp_vm.sh")])
        });

        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_bytes().times(2).returning(|_, _| Ok(()));
        fs.expect_set_executable().times(2).returning(|_| Ok(()));

        let service = ExportService::new(Box::new(assets), Box::new(fs));
        service.export(Path::new("/proj"), false).unwrap();
    }
}
