//! Project env-file discovery for deploy runs.

use std::path::Path;

use tracing::{debug, warn};

use frvn_core::domain::{ENV_FILE_CANDIDATES, EnvMap, parse_env};

/// Load deploy variables from the project's env file, best effort.
///
/// Probes [`ENV_FILE_CANDIDATES`] in order and parses the first candidate
/// that exists and is readable; an unreadable candidate is skipped in favour
/// of the next one. A project with no env file yields an empty map — the
/// deploy scripts validate their own required variables.
///
/// The returned map is the file's content only. Callers merge it against the
/// live process environment with
/// [`merge_first_wins`](frvn_core::domain::merge_first_wins) so variables
/// exported in the shell always win over the file.
pub fn load_project_env(project_root: &Path) -> EnvMap {
    for name in ENV_FILE_CANDIDATES {
        let path = project_root.join(name);
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let map = parse_env(&content);
                debug!(path = %path.display(), vars = map.len(), "loaded env file");
                return map;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "env file unreadable, trying next");
            }
        }
    }

    debug!(root = %project_root.display(), "no env file found");
    EnvMap::new()
}
