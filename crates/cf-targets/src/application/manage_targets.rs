//! ManageTargets: the list / switch / save / delete command handlers.
//!
//! A [`TargetsEngine`] is opened once per invocation.  Opening ensures the
//! targets directory exists and computes the [`TargetStatus`]; every handler
//! then decides from that snapshot whether it may proceed.
//!
//! # Decision table
//!
//! | Command          | Proceeds when                                   | Otherwise        |
//! |------------------|-------------------------------------------------|------------------|
//! | switch NAME      | NAME exists and (`force` or not `needs_saving`) | NotFound / refuse |
//! | save NAME        | NAME does not exist, or `force`                 | refuse           |
//! | save             | `has_name` and (`force` or not `needs_saving`)  | MissingName / refuse |
//! | delete NAME      | NAME exists                                     | NotFound         |
//!
//! Side effects go through the [`BlobStore`] only.  A refused command writes
//! nothing.

use std::io::Write;

use targets_core::{TargetName, TargetStatus, TargetsLayout};
use tracing::info;

use super::blob_store::BlobStore;
use super::check_status::check_status;
use super::error::TargetsError;
use super::file_system::FileSystem;
use super::target_registry::TargetRegistry;

/// Command-line hint printed when no targets exist yet.
pub const SAVE_HINT: &str = "   cf-targets save-target NAME";

/// One invocation's view of the targets directory.
pub struct TargetsEngine<F> {
    store: BlobStore<F>,
    status: TargetStatus,
}

impl<F: FileSystem> TargetsEngine<F> {
    /// Ensures the targets directory exists and computes the status snapshot.
    ///
    /// # Errors
    ///
    /// Propagates errors from directory creation and [`check_status`].
    pub fn open(fs: F, layout: TargetsLayout) -> Result<Self, TargetsError> {
        let store = BlobStore::new(fs, layout);
        store.mkdir_targets()?;
        let status = check_status(&store)?;
        Ok(Self { store, status })
    }

    /// The snapshot computed when the engine was opened.
    pub fn status(&self) -> &TargetStatus {
        &self.status
    }

    pub fn registry(&self) -> TargetRegistry<'_, F> {
        TargetRegistry::new(&self.store)
    }

    /// Prints every saved target, annotating the current one.
    ///
    /// # Errors
    ///
    /// Returns [`TargetsError::Io`] if the targets directory cannot be read and
    /// [`TargetsError::Output`] if `out` fails.
    pub fn list(&self, out: &mut dyn Write) -> Result<(), TargetsError> {
        let targets = self.registry().list()?;

        if targets.is_empty() {
            writeln!(
                out,
                "No targets have been saved yet. To save the current target, use:"
            )
            .map_err(TargetsError::Output)?;
            writeln!(out, "{SAVE_HINT}").map_err(TargetsError::Output)?;
            return Ok(());
        }

        for target in &targets {
            match self.status.qualifier_for(target) {
                Some(qualifier) => writeln!(out, "{target} {qualifier}"),
                None => writeln!(out, "{target}"),
            }
            .map_err(TargetsError::Output)?;
        }
        Ok(())
    }

    /// Makes `name` the active configuration.
    ///
    /// # Errors
    ///
    /// - [`TargetsError::NotFound`] if `name` is not saved.
    /// - [`TargetsError::UnsavedChanges`] if the active configuration has
    ///   unsaved edits and `force` is not set.
    /// - [`TargetsError::Io`] if the copy or relink fails.
    pub fn switch(
        &self,
        name: &TargetName,
        force: bool,
        out: &mut dyn Write,
    ) -> Result<(), TargetsError> {
        let registry = self.registry();
        if !registry.exists(name) {
            return Err(TargetsError::NotFound(name.to_string()));
        }
        if self.status.needs_saving && !force {
            return Err(TargetsError::UnsavedChanges);
        }

        let target_path = registry.path_for(name);
        self.store.copy(&target_path, self.store.layout().config_path())?;
        self.store.relink(&target_path)?;

        info!(target_name = %name, force, "switched target");
        writeln!(out, "Set target to {name}").map_err(TargetsError::Output)
    }

    /// Saves the active configuration, either under `name` or over the current
    /// target when `name` is `None`.
    ///
    /// # Errors
    ///
    /// See [`Self::save_named`] and [`Self::save_current`].
    pub fn save(
        &self,
        name: Option<&TargetName>,
        force: bool,
        out: &mut dyn Write,
    ) -> Result<(), TargetsError> {
        match name {
            Some(name) => self.save_named(name, force, out),
            None => self.save_current(force, out),
        }
    }

    /// Copies the active configuration to `name` and marks it current.
    ///
    /// # Errors
    ///
    /// - [`TargetsError::AlreadyExists`] if `name` is saved and `force` is not
    ///   set.
    /// - [`TargetsError::Io`] if the copy or relink fails.
    pub fn save_named(
        &self,
        name: &TargetName,
        force: bool,
        out: &mut dyn Write,
    ) -> Result<(), TargetsError> {
        let registry = self.registry();
        if registry.exists(name) && !force {
            return Err(TargetsError::AlreadyExists(name.to_string()));
        }

        let target_path = registry.path_for(name);
        self.store.copy(self.store.layout().config_path(), &target_path)?;
        self.store.relink(&target_path)?;

        info!(target_name = %name, force, "saved target");
        writeln!(out, "Saved current target as {name}").map_err(TargetsError::Output)
    }

    /// Copies the active configuration over the current target.  The marker
    /// already points there and is left alone.
    ///
    /// # Errors
    ///
    /// - [`TargetsError::MissingName`] if there is no current target.
    /// - [`TargetsError::SubstantialChanges`] if the active configuration has
    ///   non-token edits and `force` is not set.
    /// - [`TargetsError::Io`] if the copy fails.
    pub fn save_current(&self, force: bool, out: &mut dyn Write) -> Result<(), TargetsError> {
        if !self.status.has_name {
            return Err(TargetsError::MissingName);
        }
        let name = &self.status.name;
        if self.status.needs_saving && !force {
            return Err(TargetsError::SubstantialChanges(name.clone()));
        }

        let target_path = self.store.layout().current_path();
        let resolved = self.store.resolve(target_path)?;
        self.store.copy(self.store.layout().config_path(), &resolved)?;

        info!(target_name = %name, force, "saved current target");
        writeln!(out, "Saved current target as {name}").map_err(TargetsError::Output)
    }

    /// Deletes `name`, and the current marker too if it pointed there.
    ///
    /// # Errors
    ///
    /// - [`TargetsError::NotFound`] if `name` is not saved.
    /// - [`TargetsError::Io`] if a removal fails.
    pub fn delete(&self, name: &TargetName, out: &mut dyn Write) -> Result<(), TargetsError> {
        let registry = self.registry();
        if !registry.exists(name) {
            return Err(TargetsError::NotFound(name.to_string()));
        }

        self.store.remove(&registry.path_for(name))?;
        if self.status.is_current(name.as_str()) {
            self.store.remove(self.store.layout().current_path())?;
        }

        info!(target_name = %name, "deleted target");
        writeln!(out, "Deleted target {name}").map_err(TargetsError::Output)
    }
}
