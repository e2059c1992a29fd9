//! Status engine: is the active configuration saved?
//!
//! Runs at the start of every command, before anything is mutated:
//!
//! ```text
//! current marker missing or dangling?
//!   yes -> remove it, report "unnamed" (needs_saving = true)
//!   no  -> resolve marker to a target name
//!          load active configuration and the marked target
//!          needs_update = tokens differ
//!          needs_saving = canonical forms differ once the token is neutralised
//! ```
//!
//! The resulting [`TargetStatus`] decides whether a switch or an unnamed save
//! may proceed without `-f`.

use targets_core::TargetStatus;
use tracing::{debug, warn};

use super::blob_store::BlobStore;
use super::error::TargetsError;
use super::file_system::FileSystem;

/// Computes the status snapshot for the layout behind `store`.
///
/// # Errors
///
/// Returns [`TargetsError::Io`] if the marker cannot be resolved or a file
/// cannot be read, and [`TargetsError::MalformedConfig`] if either the active
/// configuration or the marked target does not parse.
pub fn check_status<F: FileSystem>(store: &BlobStore<F>) -> Result<TargetStatus, TargetsError> {
    let layout = store.layout();
    let current = layout.current_path();

    if !store.exists(current) {
        if store.is_symlink(current) {
            warn!(marker = %current.display(), "removing dangling current marker");
        }
        store.remove(current)?;
        debug!("no current target");
        return Ok(TargetStatus::unnamed());
    }

    let resolved = store.resolve(current)?;
    let name = layout.name_from_path(&resolved);

    let active = store.load_config(layout.config_path())?;
    let saved = store.load_config(current)?;

    let drift = active
        .drift_from(&saved)
        .map_err(|source| TargetsError::MalformedConfig {
            path: layout.config_path().to_path_buf(),
            source,
        })?;

    debug!(
        target_name = %name,
        needs_saving = drift.needs_saving,
        needs_update = drift.needs_update,
        "computed target status"
    );
    Ok(TargetStatus::named(
        name,
        drift.needs_saving,
        drift.needs_update,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::file_system::mock::{MemoryFileSystem, Mutation};
    use std::path::PathBuf;
    use targets_core::{Freshness, TargetsLayout};

    const CONFIG: &str = "/cf/config.json";
    const DEV: &str = "/cf/targets/dev.config.json";
    const MARKER: &str = "/cf/targets/current";

    fn status(fs: &MemoryFileSystem) -> Result<TargetStatus, TargetsError> {
        let store = BlobStore::new(fs, TargetsLayout::for_config(CONFIG));
        check_status(&store)
    }

    #[test]
    fn test_no_marker_is_unnamed() {
        let fs = MemoryFileSystem::new();
        fs.put_file(CONFIG, br#"{"Target":"a"}"#);

        let status = status(&fs).unwrap();

        assert_eq!(status, TargetStatus::unnamed());
    }

    #[test]
    fn test_dangling_marker_is_removed_and_unnamed() {
        // Arrange: marker points at a target that was deleted out of band
        let fs = MemoryFileSystem::new();
        fs.put_file(CONFIG, b"{}");
        fs.put_symlink("gone.config.json", MARKER);

        // Act
        let status = status(&fs).unwrap();

        // Assert
        assert_eq!(status.freshness(), Freshness::Unnamed);
        assert!(!fs.is_symlink(std::path::Path::new(MARKER)));
        assert_eq!(fs.mutations(), [Mutation::Remove(PathBuf::from(MARKER))]);
    }

    #[test]
    fn test_identical_target_is_clean() {
        let fs = MemoryFileSystem::new();
        fs.put_file(CONFIG, br#"{"AccessToken":"t","Target":"a"}"#);
        fs.put_file(DEV, br#"{"AccessToken":"t","Target":"a"}"#);
        fs.put_symlink("dev.config.json", MARKER);

        let status = status(&fs).unwrap();

        assert_eq!(status, TargetStatus::named("dev", false, false));
    }

    #[test]
    fn test_token_drift_needs_update_only() {
        let fs = MemoryFileSystem::new();
        fs.put_file(CONFIG, br#"{"AccessToken":"new","Target":"a"}"#);
        fs.put_file(DEV, br#"{"AccessToken":"old","Target":"a"}"#);
        fs.put_symlink("dev.config.json", MARKER);

        let status = status(&fs).unwrap();

        assert_eq!(status, TargetStatus::named("dev", false, true));
    }

    #[test]
    fn test_added_field_needs_saving() {
        let fs = MemoryFileSystem::new();
        fs.put_file(CONFIG, br#"{"Target":"a","SpaceFields":{"Name":"dev"}}"#);
        fs.put_file(DEV, br#"{"Target":"a"}"#);
        fs.put_symlink("dev.config.json", MARKER);

        let status = status(&fs).unwrap();

        assert!(status.needs_saving);
        assert!(!status.needs_update);
    }

    #[test]
    fn test_status_never_mutates_named_target() {
        let fs = MemoryFileSystem::new();
        fs.put_file(CONFIG, br#"{"AccessToken":"new"}"#);
        fs.put_file(DEV, br#"{"AccessToken":"old"}"#);
        fs.put_symlink("dev.config.json", MARKER);

        status(&fs).unwrap();

        assert!(fs.mutations().is_empty());
        assert_eq!(
            fs.file_content(DEV).as_deref(),
            Some(&br#"{"AccessToken":"old"}"#[..])
        );
    }

    #[test]
    fn test_malformed_target_is_fatal() {
        let fs = MemoryFileSystem::new();
        fs.put_file(CONFIG, b"{}");
        fs.put_file(DEV, b"<<<garbage>>>");
        fs.put_symlink("dev.config.json", MARKER);

        let err = status(&fs).unwrap_err();

        assert!(matches!(err, TargetsError::MalformedConfig { .. }));
    }

    #[test]
    fn test_malformed_active_config_is_fatal() {
        let fs = MemoryFileSystem::new();
        fs.put_file(CONFIG, b"[]");
        fs.put_file(DEV, b"{}");
        fs.put_symlink("dev.config.json", MARKER);

        let err = status(&fs).unwrap_err();

        match err {
            TargetsError::MalformedConfig { path, .. } => {
                assert_eq!(path, PathBuf::from(CONFIG));
            }
            other => panic!("expected MalformedConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_active_config_against_empty_target_is_clean() {
        let fs = MemoryFileSystem::new();
        fs.put_file(DEV, b"{}");
        fs.put_symlink("dev.config.json", MARKER);

        let status = status(&fs).unwrap();

        assert_eq!(status.freshness(), Freshness::Clean);
    }
}
