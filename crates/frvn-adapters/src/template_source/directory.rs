//! Filesystem-backed template source.
//!
//! Walks a template directory on disk and classifies every entry up front:
//! the `.envexample` marker becomes a sensitive entry, UTF-8 files become
//! text, everything else is carried as opaque bytes.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use frvn_core::application::{ApplicationError, ports::TemplateSource};
use frvn_core::domain::{RelativePath, TemplateEntry};
use frvn_core::error::FrvnResult;

/// Template source that enumerates a directory tree on disk.
///
/// Used when `FRVN_TEMPLATE_DIR` points at a custom template collection.
#[derive(Debug, Clone)]
pub struct DirectoryTemplate {
    root: PathBuf,
}

impl DirectoryTemplate {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn classify(&self, relative: RelativePath, absolute: &Path) -> FrvnResult<TemplateEntry> {
        if relative
            .file_name()
            .is_some_and(TemplateEntry::is_sensitive_name)
        {
            return Ok(TemplateEntry::sensitive(relative));
        }

        let bytes = std::fs::read(absolute).map_err(|e| ApplicationError::FilesystemError {
            path: absolute.to_path_buf(),
            reason: format!("Failed to read template file: {e}"),
        })?;
        let executable = is_executable(absolute);

        let entry = match String::from_utf8(bytes) {
            Ok(text) => TemplateEntry::text(relative, text),
            Err(err) => {
                debug!(path = %absolute.display(), "not valid UTF-8, treating as binary");
                TemplateEntry::binary(relative, err.into_bytes())
            }
        };
        Ok(entry.with_executable(executable))
    }
}

impl TemplateSource for DirectoryTemplate {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn entries(&self) -> FrvnResult<Vec<TemplateEntry>> {
        if !self.root.is_dir() {
            warn!(root = %self.root.display(), "template directory not found");
            return Err(ApplicationError::TemplateNotFound {
                hint: self.root.display().to_string(),
            }
            .into());
        }

        let mut entries = Vec::new();
        for item in WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
        {
            let item = item.map_err(|e| ApplicationError::FilesystemError {
                path: self.root.clone(),
                reason: format!("Failed to walk template directory: {e}"),
            })?;

            let relative = item
                .path()
                .strip_prefix(&self.root)
                .map_err(|_| ApplicationError::FilesystemError {
                    path: item.path().to_path_buf(),
                    reason: "entry escapes template root".into(),
                })?
                .to_path_buf();
            let relative = RelativePath::try_new(relative)?;

            if item.file_type().is_dir() {
                entries.push(TemplateEntry::directory(relative));
            } else if item.file_type().is_file() {
                entries.push(self.classify(relative, item.path())?);
            }
            // symlinks and other special files are skipped
        }

        debug!(count = entries.len(), "template directory enumerated");
        Ok(entries)
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    false
}
