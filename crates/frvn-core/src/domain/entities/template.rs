//! Template tree entities and the render context.
//!
//! A template tree is an ordered list of [`TemplateEntry`] values. Each entry
//! carries a classification assigned when the tree is enumerated by a
//! `TemplateSource` adapter — the materializer never re-inspects filenames
//! during the walk, it only dispatches on [`EntryPayload`].

use std::collections::HashMap;

use super::common::RelativePath;

// ============================================================================
// Sensitive-file handling
// ============================================================================

/// Template filename whose content is synthesized instead of copied.
///
/// Some environments (CI sandboxes, secret scanners) block reading or writing
/// dotfiles that look like secret stores. The packaged template therefore
/// carries this entry as a marker only; its content is always generated from
/// [`DEFAULT_ENV_TEMPLATE`].
pub const SENSITIVE_FILE_NAME: &str = ".envexample";

/// Non-hidden fallback filename used when writing the sensitive file is
/// denied by the filesystem.
pub const ENV_FALLBACK_NAME: &str = "env.example";

/// Synthesized content for the sensitive env-example file.
///
/// Documents every variable the generated project and its deploy scripts
/// read at run time. Rendered through [`RenderContext::render`] before being
/// written, so the `{{...}}` tokens below are substituted per invocation.
pub const DEFAULT_ENV_TEMPLATE: &str = "\
# GCP project and region
PROJECT_ID={{PROJECT_NAME}}-gcp
REGION=asia-northeast3

# Service / image settings
# SERVICE_NAME: Cloud Run service name, also the container image name prefix
SERVICE_NAME={{SERVICE_NAME}}
# ARTIFACT_REPO: GCP Artifact Registry repository (must exist beforehand)
ARTIFACT_REPO={{ARTIFACT_REPO}}
# IMAGE_TAG: container image tag (latest recommended, change per release)
IMAGE_TAG={{IMAGE_TAG}}

# Static frontend assets (optional)
# FRONTEND_BUCKET: bucket hosting the built frontend
FRONTEND_BUCKET={{SERVICE_NAME}}-bucket
# CACHE_TTL: CDN/cache TTL in seconds
CACHE_TTL=3600
# CDN: 1 to enable the CDN, 0 to disable
CDN=1

# Custom domains (optional); deploy scripts only consult these if set
FRONTEND_DOMAIN=
BACKEND_DOMAIN=
ADMIN_EMAIL=

# Local development backend port and logging
BACKEND_PORT=8000
UVICORN_WORKERS=1
GUNICORN_WORKERS=2
LOG_LEVEL=info

# Local docker dev UID/GID (avoids bind-mount permission issues)
DEV_UID=1000
DEV_GID=1000
";

// ============================================================================
// Template entries
// ============================================================================

/// Content classification of a template entry.
///
/// Assigned once during enumeration. `Sensitive` marks the env-example file;
/// `Binary` marks payloads that failed UTF-8 decoding and must be copied
/// byte-for-byte with no substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPayload {
    Directory,
    Text(String),
    Binary(Vec<u8>),
    Sensitive,
}

/// One entry of a template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub path: RelativePath,
    pub payload: EntryPayload,
    /// Executable bit for rendered/copied files. Ignored for directories.
    pub executable: bool,
}

impl TemplateEntry {
    pub fn directory(path: impl Into<RelativePath>) -> Self {
        Self {
            path: path.into(),
            payload: EntryPayload::Directory,
            executable: false,
        }
    }

    pub fn text(path: impl Into<RelativePath>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            payload: EntryPayload::Text(content.into()),
            executable: false,
        }
    }

    pub fn binary(path: impl Into<RelativePath>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            payload: EntryPayload::Binary(bytes),
            executable: false,
        }
    }

    pub fn sensitive(path: impl Into<RelativePath>) -> Self {
        Self {
            path: path.into(),
            payload: EntryPayload::Sensitive,
            executable: false,
        }
    }

    pub fn with_executable(mut self, executable: bool) -> Self {
        self.executable = executable;
        self
    }

    /// `true` when the entry's filename matches the sensitive marker.
    ///
    /// Used by sources at classification time, not by the materializer.
    pub fn is_sensitive_name(name: &str) -> bool {
        name == SENSITIVE_FILE_NAME
    }
}

// ============================================================================
// Render context
// ============================================================================

/// Replacement map applied to template text.
///
/// A **Value Object** holding the four placeholder keys the packaged template
/// understands. Immutable after construction.
///
/// ## Keys
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `PROJECT_NAME`  | "myapp"     | CLI arg or destination dir name |
/// | `SERVICE_NAME`  | "myapp"     | CLI arg or project name, `_` → `-` |
/// | `ARTIFACT_REPO` | "frvn-repo" | CLI arg or config default |
/// | `IMAGE_TAG`     | "latest"    | CLI arg or config default |
///
/// Replacement is a set of independent literal replacements: a substituted
/// value is never re-scanned for further placeholders, and unknown `{{...}}`
/// tokens pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    project_name: String,
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(
        project_name: impl Into<String>,
        service_name: impl Into<String>,
        artifact_repo: impl Into<String>,
        image_tag: impl Into<String>,
    ) -> Self {
        let project_name = project_name.into();
        let mut variables = HashMap::new();
        variables.insert("PROJECT_NAME".to_string(), project_name.clone());
        variables.insert("SERVICE_NAME".to_string(), service_name.into());
        variables.insert("ARTIFACT_REPO".to_string(), artifact_repo.into());
        variables.insert("IMAGE_TAG".to_string(), image_tag.into());
        Self {
            project_name,
            variables,
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Look up a variable value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every literal `{{KEY}}` occurrence of a known key.
    ///
    /// Single left-to-right scan. Substituted values are appended to the
    /// output without being re-scanned, so a value that happens to contain a
    /// placeholder token is never expanded again. Unknown tokens pass through
    /// untouched.
    pub fn render(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            let Some(end) = rest[start + 2..].find("}}") else {
                break;
            };
            let key = &rest[start + 2..start + 2 + end];
            match self.variables.get(key) {
                Some(value) => {
                    result.push_str(&rest[..start]);
                    result.push_str(value);
                    rest = &rest[start + 2 + end + 2..];
                }
                None => {
                    result.push_str(&rest[..start + 2]);
                    rest = &rest[start + 2..];
                }
            }
        }
        result.push_str(rest);
        result
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RenderContext {
        RenderContext::new("myapp", "my-svc", "frvn-repo", "latest")
    }

    #[test]
    fn render_replaces_all_keys() {
        let out = ctx().render("{{PROJECT_NAME}}/{{SERVICE_NAME}}:{{IMAGE_TAG}}@{{ARTIFACT_REPO}}");
        assert_eq!(out, "myapp/my-svc:latest@frvn-repo");
    }

    #[test]
    fn render_leaves_unknown_tokens() {
        let out = ctx().render("{{PROJECT_NAME}} {{NOT_A_KEY}}");
        assert_eq!(out, "myapp {{NOT_A_KEY}}");
    }

    #[test]
    fn render_is_idempotent_on_substituted_text() {
        let once = ctx().render(DEFAULT_ENV_TEMPLATE);
        let twice = ctx().render(&once);
        assert_eq!(once, twice);
        assert!(!once.contains("{{PROJECT_NAME}}"));
        assert!(!once.contains("{{SERVICE_NAME}}"));
        assert!(!once.contains("{{ARTIFACT_REPO}}"));
        assert!(!once.contains("{{IMAGE_TAG}}"));
    }

    #[test]
    fn substituted_value_is_not_reexpanded() {
        // A value that looks like another placeholder must survive literally.
        let ctx = RenderContext::new("{{SERVICE_NAME}}", "svc", "repo", "tag");
        let out = ctx.render("{{PROJECT_NAME}}");
        assert_eq!(out, "{{SERVICE_NAME}}");
    }

    #[test]
    fn default_env_template_documents_expected_variables() {
        for var in [
            "PROJECT_ID", "REGION", "SERVICE_NAME", "ARTIFACT_REPO", "IMAGE_TAG",
            "FRONTEND_BUCKET", "CACHE_TTL", "CDN", "FRONTEND_DOMAIN", "BACKEND_DOMAIN",
            "ADMIN_EMAIL", "BACKEND_PORT", "UVICORN_WORKERS", "GUNICORN_WORKERS",
            "LOG_LEVEL", "DEV_UID", "DEV_GID",
        ] {
            assert!(
                DEFAULT_ENV_TEMPLATE.contains(&format!("{var}=")),
                "missing {var}"
            );
        }
    }

    #[test]
    fn sensitive_name_matches_marker_only() {
        assert!(TemplateEntry::is_sensitive_name(".envexample"));
        assert!(!TemplateEntry::is_sensitive_name("env.example"));
        assert!(!TemplateEntry::is_sensitive_name(".env"));
    }
}
