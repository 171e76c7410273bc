//! Built-in project template embedded at compile time.
//!
//! The payload files live under `assets/template/` in this crate and are
//! pulled in with `include_str!`, so the released binary needs no template
//! directory on disk. The `.envexample` slot is deliberately embedded with no
//! content: its text is synthesized at materialization time from the caller's
//! render context, never shipped.

use frvn_core::application::ports::TemplateSource;
use frvn_core::domain::{SENSITIVE_FILE_NAME, TemplateEntry};
use frvn_core::error::FrvnResult;

/// Template source backed by assets compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplate;

impl BuiltinTemplate {
    pub fn new() -> Self {
        Self
    }
}

macro_rules! text_entry {
    ($path:literal) => {
        TemplateEntry::text($path, include_str!(concat!("../../assets/template/", $path)))
    };
}

impl TemplateSource for BuiltinTemplate {
    fn entries(&self) -> FrvnResult<Vec<TemplateEntry>> {
        Ok(vec![
            TemplateEntry::directory("backend"),
            TemplateEntry::directory("backend/app"),
            TemplateEntry::directory("backend/app/core"),
            TemplateEntry::directory("backend/nginx"),
            TemplateEntry::directory("frontend"),
            TemplateEntry::directory("frontend/src"),
            TemplateEntry::sensitive(SENSITIVE_FILE_NAME),
            text_entry!("docker-compose.dev.yml"),
            text_entry!("docker-compose.prod.yml"),
            text_entry!("backend/requirements.txt"),
            text_entry!("backend/Dockerfile.backend"),
            text_entry!("backend/supervisord.conf"),
            text_entry!("backend/app/main.py"),
            text_entry!("backend/app/core/config.py"),
            text_entry!("backend/app/core/logging.py"),
            text_entry!("backend/nginx/nginx.conf.template"),
            text_entry!("frontend/package.json"),
            text_entry!("frontend/vite.config.ts"),
            text_entry!("frontend/Dockerfile.frontend"),
            text_entry!("frontend/src/App.tsx"),
        ])
    }
}
