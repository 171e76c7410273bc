//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use frvn_core::application::{ApplicationError, ports::Filesystem};
use frvn_core::error::FrvnResult;

/// In-memory filesystem for testing.
///
/// Besides the port methods it offers helpers to inspect state and to mark
/// paths as write-denied, which simulates the filesystem policies that block
/// dotfile secret stores.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
    denied: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Deny all future writes to `path` with a permission error.
    pub fn deny_write(&self, path: impl Into<PathBuf>) {
        let mut inner = self.inner.write().unwrap();
        inner.denied.insert(path.into());
    }

    /// Read a file's bytes (testing helper).
    pub fn read_bytes(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Read a file as UTF-8 text (testing helper).
    pub fn read_text(&self, path: &Path) -> Option<String> {
        self.read_bytes(path)
            .and_then(|b| String::from_utf8(b).ok())
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.executables.contains(path)
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }

    fn check_denied(inner: &MemoryFilesystemInner, path: &Path) -> FrvnResult<()> {
        if inner.denied.contains(path) {
            return Err(ApplicationError::PermissionDenied {
                path: path.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    fn insert_file(&self, path: &Path, bytes: Vec<u8>) -> FrvnResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        Self::check_denied(&inner, path)?;
        inner.files.insert(path.to_path_buf(), bytes);
        Ok(())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> FrvnResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_text(&self, path: &Path, content: &str) -> FrvnResult<()> {
        self.insert_file(path, content.as_bytes().to_vec())
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> FrvnResult<()> {
        self.insert_file(path, bytes.to_vec())
    }

    fn set_executable(&self, path: &Path) -> FrvnResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        inner.executables.insert(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn dir_is_empty(&self, path: &Path) -> FrvnResult<bool> {
        let inner = self.inner.read().map_err(|_| lock_error(path))?;
        let has_child = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .any(|p| p != path && p.starts_with(path));
        Ok(!has_child)
    }

    fn remove_dir_all(&self, path: &Path) -> FrvnResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.executables.retain(|p| !p.starts_with(path));

        Ok(())
    }
}

fn lock_error(path: &Path) -> frvn_core::error::FrvnError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "memory filesystem lock poisoned".into(),
    }
    .into()
}
