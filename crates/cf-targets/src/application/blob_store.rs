//! Blob store: whole-file primitives over the targets directory.
//!
//! These are the only operations that mutate persisted state:
//!
//! - [`BlobStore::mkdir_targets`] – ensure the targets directory exists.
//! - [`BlobStore::copy`] – replace one file's content with another's.
//! - [`BlobStore::relink`] – point the `current` marker at a target.
//! - [`BlobStore::remove`] – delete a file or symlink.
//!
//! Any I/O error other than "not found" where that is tolerated is returned as
//! [`TargetsError::Io`] and ends the command.  Nothing is retried.

use std::io;
use std::path::{Path, PathBuf};

use targets_core::{ConfigData, TargetsLayout};
use tracing::debug;

use super::error::TargetsError;
use super::file_system::FileSystem;

/// File primitives bound to one [`TargetsLayout`].
pub struct BlobStore<F> {
    fs: F,
    layout: TargetsLayout,
}

impl<F: FileSystem> BlobStore<F> {
    pub fn new(fs: F, layout: TargetsLayout) -> Self {
        Self { fs, layout }
    }

    pub fn layout(&self) -> &TargetsLayout {
        &self.layout
    }

    /// Ensures the targets directory exists.  Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`TargetsError::Io`] for any failure other than "already exists".
    pub fn mkdir_targets(&self) -> Result<(), TargetsError> {
        let dir = self.layout.targets_dir();
        match self.fs.create_dir(dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(TargetsError::io("create directory", dir, e)),
        }
    }

    /// Reads the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TargetsError::Io`] on any failure, including "not found".
    pub fn read(&self, path: &Path) -> Result<Vec<u8>, TargetsError> {
        self.fs
            .read_file(path)
            .map_err(|e| TargetsError::io("read", path, e))
    }

    /// Loads and parses a configuration file.
    ///
    /// A missing file is the empty configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TargetsError::Io`] for read failures and
    /// [`TargetsError::MalformedConfig`] if the content does not parse.
    pub fn load_config(&self, path: &Path) -> Result<ConfigData, TargetsError> {
        let bytes = match self.fs.read_file(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ConfigData::default()),
            Err(e) => return Err(TargetsError::io("read", path, e)),
        };
        ConfigData::from_slice(&bytes).map_err(|source| TargetsError::MalformedConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the content of `dst` with the content of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`TargetsError::Io`] if `src` cannot be read or `dst` cannot be
    /// written.  A failed read leaves `dst` untouched.
    pub fn copy(&self, src: &Path, dst: &Path) -> Result<(), TargetsError> {
        let content = self.read(src)?;
        self.fs
            .write_file(dst, &content)
            .map_err(|e| TargetsError::io("write", dst, e))?;
        debug!(src = %src.display(), dst = %dst.display(), bytes = content.len(), "copied");
        Ok(())
    }

    /// Points the `current` marker at `target_path`, replacing any existing
    /// marker.
    ///
    /// Targets inside the targets directory are linked by file name so the
    /// marker keeps working if the whole directory is moved.
    ///
    /// # Errors
    ///
    /// Returns [`TargetsError::Io`] if the old marker cannot be removed or the
    /// new one cannot be created.
    pub fn relink(&self, target_path: &Path) -> Result<(), TargetsError> {
        let current = self.layout.current_path();
        self.remove(current)?;

        let original = link_destination(self.layout.targets_dir(), target_path);
        self.fs
            .symlink(&original, current)
            .map_err(|e| TargetsError::io("link", current, e))?;
        debug!(marker = %current.display(), destination = %original.display(), "relinked");
        Ok(())
    }

    /// Removes a file or symlink.  Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TargetsError::Io`] for any failure other than "not found".
    pub fn remove(&self, path: &Path) -> Result<(), TargetsError> {
        match self.fs.remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TargetsError::io("remove", path, e)),
        }
    }

    /// File names in the targets directory.  A missing directory is empty.
    ///
    /// # Errors
    ///
    /// Returns [`TargetsError::Io`] for any failure other than "not found".
    pub fn list_targets_dir(&self) -> Result<Vec<String>, TargetsError> {
        let dir = self.layout.targets_dir();
        match self.fs.read_dir(dir) {
            Ok(names) => Ok(names),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(TargetsError::io("list", dir, e)),
        }
    }

    /// Whether `path` exists after following symlinks.
    pub fn exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    /// Whether `path` is a symlink, dangling or not.
    pub fn is_symlink(&self, path: &Path) -> bool {
        self.fs.is_symlink(path)
    }

    /// Resolves every symlink in `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TargetsError::Io`] if resolution fails.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf, TargetsError> {
        self.fs
            .canonicalize(path)
            .map_err(|e| TargetsError::io("resolve", path, e))
    }
}

/// What the marker should store for `target_path`.
fn link_destination(targets_dir: &Path, target_path: &Path) -> PathBuf {
    match (target_path.parent(), target_path.file_name()) {
        (Some(parent), Some(file_name)) if parent == targets_dir => PathBuf::from(file_name),
        _ => target_path.to_path_buf(),
    }
}
