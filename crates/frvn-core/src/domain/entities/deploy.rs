//! Deployment targets and environment-file semantics.

use std::collections::BTreeMap;
use std::str::FromStr;

use super::super::DomainError;

/// Primary and fallback filenames probed for a project-local env file.
///
/// The first one that exists wins; the other is ignored.
pub const ENV_FILE_CANDIDATES: [&str; 2] = [".env", "env.example"];

/// The two fixed deployment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployTarget {
    CloudRun,
    Vm,
}

impl DeployTarget {
    /// Name of the deploy script this target resolves to, relative to the
    /// project's `deploy/` directory.
    pub fn script_name(self) -> &'static str {
        match self {
            Self::CloudRun => "deploy_gcp_cloudrun.sh",
            Self::Vm => "deploy_gcp_vm.sh",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CloudRun => "cloudrun",
            Self::Vm => "vm",
        }
    }
}

impl FromStr for DeployTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cloudrun" => Ok(Self::CloudRun),
            "vm" => Ok(Self::Vm),
            other => Err(DomainError::UnknownDeployTarget(other.to_string())),
        }
    }
}

impl std::fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment variables keyed by name.
///
/// `BTreeMap` keeps iteration deterministic, which makes child-process
/// invocations reproducible and tests stable.
pub type EnvMap = BTreeMap<String, String>;

/// Parse simple `KEY=VALUE` lines.
///
/// Blank lines and `#`-prefixed comments are ignored, as are lines without
/// an `=`. Keys and values are trimmed. Definition order is
/// first-wins: a duplicate key later in the file never overwrites an
/// earlier one.
pub fn parse_env(content: &str) -> EnvMap {
    let mut map = EnvMap::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            map.entry(key.trim().to_string())
                .or_insert_with(|| value.trim().to_string());
        }
    }
    map
}

/// First-definition-wins merge of a file's variables against the current
/// process environment.
///
/// Returns only the entries that should be *added* to the child process:
/// keys already defined in `current` are never overwritten.
pub fn merge_first_wins(current: &EnvMap, from_file: &EnvMap) -> EnvMap {
    from_file
        .iter()
        .filter(|(key, _)| !current.contains_key(*key))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_script_names_are_fixed() {
        assert_eq!(DeployTarget::CloudRun.script_name(), "deploy_gcp_cloudrun.sh");
        assert_eq!(DeployTarget::Vm.script_name(), "deploy_gcp_vm.sh");
    }

    #[test]
    fn target_parses_from_str() {
        assert_eq!("cloudrun".parse::<DeployTarget>().unwrap(), DeployTarget::CloudRun);
        assert_eq!("vm".parse::<DeployTarget>().unwrap(), DeployTarget::Vm);
        assert!("gke".parse::<DeployTarget>().is_err());
    }

    #[test]
    fn parse_env_skips_comments_and_blanks() {
        let map = parse_env("# comment\n\nSERVICE_NAME=myapp\n  \nREGION = eu-west1 \n");
        assert_eq!(map.get("SERVICE_NAME").map(String::as_str), Some("myapp"));
        assert_eq!(map.get("REGION").map(String::as_str), Some("eu-west1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn parse_env_ignores_lines_without_equals() {
        let map = parse_env("JUSTAWORD\nKEY=value");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn parse_env_splits_on_first_equals_only() {
        let map = parse_env("URL=https://x.test/?a=1");
        assert_eq!(map.get("URL").map(String::as_str), Some("https://x.test/?a=1"));
    }

    #[test]
    fn parse_env_first_definition_wins_within_file() {
        let map = parse_env("LOG_LEVEL=info\nLOG_LEVEL=debug\n");
        assert_eq!(map.get("LOG_LEVEL").map(String::as_str), Some("info"));
    }

    #[test]
    fn parse_env_allows_empty_values() {
        let map = parse_env("FRONTEND_DOMAIN=\n");
        assert_eq!(map.get("FRONTEND_DOMAIN").map(String::as_str), Some(""));
    }

    #[test]
    fn merge_never_overwrites_existing() {
        let mut current = EnvMap::new();
        current.insert("LOG_LEVEL".into(), "debug".into());

        let mut file = EnvMap::new();
        file.insert("LOG_LEVEL".into(), "info".into());
        file.insert("REGION".into(), "asia-northeast3".into());

        let added = merge_first_wins(&current, &file);
        assert!(!added.contains_key("LOG_LEVEL"));
        assert_eq!(added.get("REGION").map(String::as_str), Some("asia-northeast3"));
    }
}
