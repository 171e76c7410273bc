//! Deploy script assets embedded at compile time.

use frvn_core::application::ports::{DeployAsset, DeployAssetSource};
use frvn_core::domain::DeployTarget;
use frvn_core::error::FrvnResult;

/// Deploy scripts compiled into the binary, one per [`DeployTarget`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDeployAssets;

impl BuiltinDeployAssets {
    pub fn new() -> Self {
        Self
    }
}

impl DeployAssetSource for BuiltinDeployAssets {
    fn assets(&self) -> FrvnResult<Vec<DeployAsset>> {
        Ok(vec![
            DeployAsset {
                name: DeployTarget::CloudRun.script_name().to_string(),
                bytes: include_str!("../assets/deploy/deploy_gcp_cloudrun.sh")
                    .as_bytes()
                    .to_vec(),
                executable: true,
            },
            DeployAsset {
                name: DeployTarget::Vm.script_name().to_string(),
                bytes: include_str!("../assets/deploy/deploy_gcp_vm.sh")
                    .as_bytes()
                    .to_vec(),
                executable: true,
            },
        ])
    }
}
