//! Template source adapters.
//!
//! Two implementations of the `TemplateSource` port:
//!
//! - [`BuiltinTemplate`] — the project template compiled into the binary.
//!   This is what ships, and what `frvn init` uses by default.
//! - [`DirectoryTemplate`] — enumerates a template tree on disk, for teams
//!   that maintain their own variant of the template.
//!
//! [`resolve_template_source`] picks between them: if `FRVN_TEMPLATE_DIR` is
//! set it wins, otherwise the embedded template is used.

use std::path::PathBuf;

use tracing::{debug, info};

use frvn_core::application::ports::TemplateSource;

pub mod builtin;
pub mod directory;

pub use builtin::BuiltinTemplate;
pub use directory::DirectoryTemplate;

/// Environment variable overriding the template location.
pub const TEMPLATE_DIR_ENV: &str = "FRVN_TEMPLATE_DIR";

/// Choose the template source for this invocation.
///
/// `$FRVN_TEMPLATE_DIR`, when set, points at a directory tree to use instead
/// of the embedded template. Relative paths resolve against the current
/// working directory. The variable's existence decides the source; a missing
/// or unreadable directory surfaces later as `TemplateNotFound` when the
/// source is enumerated.
pub fn resolve_template_source() -> Box<dyn TemplateSource> {
    match std::env::var(TEMPLATE_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => {
            let root = PathBuf::from(dir);
            info!(root = %root.display(), "using template directory from ${TEMPLATE_DIR_ENV}");
            Box::new(DirectoryTemplate::new(root))
        }
        _ => {
            debug!("using embedded template");
            Box::new(BuiltinTemplate::new())
        }
    }
}
