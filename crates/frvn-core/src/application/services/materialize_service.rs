//! Template materializer - the main application orchestrator.
//!
//! Walks the template tree supplied by a [`TemplateSource`] and produces an
//! isomorphic destination tree through a [`Filesystem`] port:
//! 1. Apply the destination overwrite policy
//! 2. Create directories (idempotent)
//! 3. Render text entries through the replacement map
//! 4. Copy binary entries byte-for-byte
//! 5. Synthesize the sensitive env-example file, with a fallback filename
//!    when the hidden name is blocked by filesystem policy

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateSource},
    },
    domain::{DEFAULT_ENV_TEMPLATE, ENV_FALLBACK_NAME, EntryPayload, RenderContext},
    error::{FrvnError, FrvnResult},
};

/// Destination overwrite policy.
///
/// One explicit flag instead of divergent per-caller behavior: a non-empty
/// destination is an error unless `replace_existing` is set, in which case
/// the destination is removed before writing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeOptions {
    pub replace_existing: bool,
}

/// Summary of a completed materialization, for CLI display and logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub directories_created: usize,
    pub files_written: usize,
    /// Set when the sensitive file was written under [`ENV_FALLBACK_NAME`]
    /// because the hidden name was denied.
    pub sensitive_fallback: Option<PathBuf>,
}

/// Main materialization service.
pub struct MaterializeService {
    source: Box<dyn TemplateSource>,
    filesystem: Box<dyn Filesystem>,
}

impl MaterializeService {
    /// Create a new materialize service with the given adapters.
    pub fn new(source: Box<dyn TemplateSource>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { source, filesystem }
    }

    /// Materialize the template tree into `destination`.
    ///
    /// Postcondition: the destination contains one entry per source entry,
    /// text files rendered, binary files preserved byte-for-byte. A failure
    /// mid-walk is fatal and may leave a partial tree; there is no rollback.
    #[instrument(skip_all, fields(destination = %destination.display()))]
    pub fn materialize(
        &self,
        destination: &Path,
        context: &RenderContext,
        options: MaterializeOptions,
    ) -> FrvnResult<MaterializeReport> {
        // Enumerate first so a missing source fails before we touch the
        // destination at all.
        let entries = self.source.entries()?;
        info!(entries = entries.len(), "Template enumerated");

        self.prepare_destination(destination, options)?;

        let mut report = MaterializeReport::default();

        for entry in &entries {
            let target = destination.join(entry.path.as_path());
            match &entry.payload {
                EntryPayload::Directory => {
                    self.filesystem.create_dir_all(&target)?;
                    report.directories_created += 1;
                }
                EntryPayload::Text(content) => {
                    self.ensure_parent(&target)?;
                    self.filesystem.write_text(&target, &context.render(content))?;
                    report.files_written += 1;
                }
                EntryPayload::Binary(bytes) => {
                    self.ensure_parent(&target)?;
                    self.filesystem.write_bytes(&target, bytes)?;
                    report.files_written += 1;
                }
                EntryPayload::Sensitive => {
                    self.ensure_parent(&target)?;
                    report.sensitive_fallback = self.write_sensitive(&target, context)?;
                    report.files_written += 1;
                }
            }

            if entry.executable && !matches!(entry.payload, EntryPayload::Directory) {
                let written = match &report.sensitive_fallback {
                    Some(alt) if matches!(entry.payload, EntryPayload::Sensitive) => alt.clone(),
                    _ => target,
                };
                self.filesystem.set_executable(&written)?;
            }
        }

        info!(
            files = report.files_written,
            directories = report.directories_created,
            "Materialization completed"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Apply the overwrite policy, then make sure the destination exists.
    fn prepare_destination(&self, destination: &Path, options: MaterializeOptions) -> FrvnResult<()> {
        if self.filesystem.exists(destination) {
            if options.replace_existing {
                warn!(path = %destination.display(), "Replacing existing destination");
                self.filesystem.remove_dir_all(destination)?;
            } else if !self.filesystem.dir_is_empty(destination)? {
                return Err(ApplicationError::DestinationExists {
                    path: destination.to_path_buf(),
                }
                .into());
            }
        }
        self.filesystem.create_dir_all(destination)
    }

    fn ensure_parent(&self, target: &Path) -> FrvnResult<()> {
        match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.filesystem.create_dir_all(parent)
            }
            _ => Ok(()),
        }
    }

    /// Render and write the synthesized env-example block.
    ///
    /// Permission-denied on the hidden filename triggers exactly one retry
    /// under the non-hidden fallback name in the same directory. Any other
    /// error, and any error on the fallback itself, propagates as fatal.
    fn write_sensitive(
        &self,
        target: &Path,
        context: &RenderContext,
    ) -> FrvnResult<Option<PathBuf>> {
        let rendered = context.render(DEFAULT_ENV_TEMPLATE);
        match self.filesystem.write_text(target, &rendered) {
            Ok(()) => Ok(None),
            Err(FrvnError::Application(ApplicationError::PermissionDenied { .. })) => {
                let fallback = target.with_file_name(ENV_FALLBACK_NAME);
                debug!(
                    denied = %target.display(),
                    fallback = %fallback.display(),
                    "Hidden env file blocked, using fallback name"
                );
                self.filesystem.write_text(&fallback, &rendered)?;
                Ok(Some(fallback))
            }
            Err(other) => Err(other),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TemplateEntry;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Source {}
        impl TemplateSource for Source {
            fn entries(&self) -> FrvnResult<Vec<TemplateEntry>>;
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

    fn ctx() -> RenderContext {
        RenderContext::new("myapp", "myapp", "frvn-repo", "test")
    }

    #[test]
    fn missing_source_fails_before_touching_destination() {
        let mut source = MockSource::new();
        source.expect_entries().times(1).returning(|| {
            Err(ApplicationError::TemplateNotFound {
                hint: "packaged template".into(),
            }
            .into())
        });

        let mut fs = MockFs::new();
        fs.expect_exists().times(0);
        fs.expect_create_dir_all().times(0);

        let service = MaterializeService::new(Box::new(source), Box::new(fs));
        let err = service
            .materialize(Path::new("/out"), &ctx(), MaterializeOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            FrvnError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn non_empty_destination_without_replace_is_an_error() {
        let mut source = MockSource::new();
        source
            .expect_entries()
            .returning(|| Ok(vec![TemplateEntry::directory("src")]));

        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_dir_is_empty().returning(|_| Ok(false));
        fs.expect_remove_dir_all().times(0);

        let service = MaterializeService::new(Box::new(source), Box::new(fs));
        let err = service
            .materialize(Path::new("/out"), &ctx(), MaterializeOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            FrvnError::Application(ApplicationError::DestinationExists { .. })
        ));
    }

    #[test]
    fn replace_existing_wipes_destination_first() {
        let mut source = MockSource::new();
        source.expect_entries().returning(|| Ok(vec![]));

        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_dir_all()
            .with(eq(Path::new("/out")))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_create_dir_all().returning(|_| Ok(()));

        let service = MaterializeService::new(Box::new(source), Box::new(fs));
        let options = MaterializeOptions {
            replace_existing: true,
        };
        service.materialize(Path::new("/out"), &ctx(), options).unwrap();
    }

    #[test]
    fn text_entries_are_rendered() {
        let mut source = MockSource::new();
        source.expect_entries().returning(|| {
            Ok(vec![TemplateEntry::text(
                "README.md",
                "# {{PROJECT_NAME}}",
            )])
        });

        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_text()
            .withf(|path, content| path == Path::new("/out/README.md") && content == "# myapp")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = MaterializeService::new(Box::new(source), Box::new(fs));
        let report = service
            .materialize(Path::new("/out"), &ctx(), MaterializeOptions::default())
            .unwrap();
        assert_eq!(report.files_written, 1);
    }

    #[test]
    fn binary_entries_bypass_substitution() {
        let payload = vec![0u8, 159, 146, 150]; // not valid UTF-8
        let expected = payload.clone();

        let mut source = MockSource::new();
        source.expect_entries().returning(move || {
            Ok(vec![TemplateEntry::binary("logo.png", payload.clone())])
        });

        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_bytes()
            .withf(move |path, bytes| path == Path::new("/out/logo.png") && bytes == expected.as_slice())
            .times(1)
            .returning(|_, _| Ok(()));

        let service = MaterializeService::new(Box::new(source), Box::new(fs));
        service
            .materialize(Path::new("/out"), &ctx(), MaterializeOptions::default())
            .unwrap();
    }

    #[test]
    fn sensitive_write_falls_back_on_permission_denied() {
        let mut source = MockSource::new();
        source
            .expect_entries()
            .returning(|| Ok(vec![TemplateEntry::sensitive(".envexample")]));

        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_text()
            .withf(|path, _| path == Path::new("/out/.envexample"))
            .times(1)
            .returning(|path, _| {
                Err(ApplicationError::PermissionDenied {
                    path: path.to_path_buf(),
                }
                .into())
            });
        fs.expect_write_text()
            .withf(|path, content| {
                path == Path::new("/out/env.example") && content.contains("SERVICE_NAME=myapp")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = MaterializeService::new(Box::new(source), Box::new(fs));
        let report = service
            .materialize(Path::new("/out"), &ctx(), MaterializeOptions::default())
            .unwrap();
        assert_eq!(
            report.sensitive_fallback.as_deref(),
            Some(Path::new("/out/env.example"))
        );
    }

    #[test]
    fn non_sensitive_permission_denied_is_fatal() {
        let mut source = MockSource::new();
        source
            .expect_entries()
            .returning(|| Ok(vec![TemplateEntry::text("a.txt", "x")]));

        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_text().times(1).returning(|path, _| {
            Err(ApplicationError::PermissionDenied {
                path: path.to_path_buf(),
            }
            .into())
        });

        let service = MaterializeService::new(Box::new(source), Box::new(fs));
        let err = service
            .materialize(Path::new("/out"), &ctx(), MaterializeOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            FrvnError::Application(ApplicationError::PermissionDenied { .. })
        ));
    }
}
