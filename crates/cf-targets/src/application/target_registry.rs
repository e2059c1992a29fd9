//! Target registry: which targets exist and where they are stored.
//!
//! Targets are discovered purely by file-name convention: every file in the
//! targets directory ending in the layout suffix is a target.  Callers only
//! see names, so storage could move to an explicit index without touching
//! them.

use std::path::PathBuf;

use targets_core::TargetName;

use super::blob_store::BlobStore;
use super::error::TargetsError;
use super::file_system::FileSystem;

/// Read-only view of the saved targets.
pub struct TargetRegistry<'a, F> {
    store: &'a BlobStore<F>,
}

impl<'a, F: FileSystem> TargetRegistry<'a, F> {
    pub fn new(store: &'a BlobStore<F>) -> Self {
        Self { store }
    }

    /// Names of all saved targets in lexical order.
    ///
    /// # Errors
    ///
    /// Returns [`TargetsError::Io`] if the targets directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>, TargetsError> {
        let layout = self.store.layout();
        let mut names: Vec<String> = self
            .store
            .list_targets_dir()?
            .iter()
            .filter_map(|file_name| layout.name_from_file(file_name))
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Whether a file is stored for `name`.
    pub fn exists(&self, name: &TargetName) -> bool {
        self.store.exists(&self.path_for(name))
    }

    /// Storage path for `name`.  Performs no I/O.
    pub fn path_for(&self, name: &TargetName) -> PathBuf {
        self.store.layout().path_for(name)
    }
}
