//! Error type shared by every cf-targets command.
//!
//! Every failure aborts the current command.  Handlers return
//! `Result<(), TargetsError>` and the binary's top level prints the message
//! and exits with [`TargetsError::exit_code`].  Nothing is retried.

use std::io;
use std::path::PathBuf;

use targets_core::{ConfigError, TargetNameError};
use thiserror::Error;

/// Broad failure class, used to pick how a message is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong argument shape; nothing was mutated.
    Usage,
    /// The command would discard unsaved changes or overwrite a target.
    Conflict,
    /// The named target does not exist.
    NotFound,
    /// File system failure or malformed configuration content.
    Io,
}

/// Error type for cf-targets commands.
#[derive(Debug, Error)]
pub enum TargetsError {
    #[error("Target {0} does not exist.")]
    NotFound(String),

    #[error("Target {0} already exists. Use -f to overwrite it.")]
    AlreadyExists(String),

    /// A switch would discard edits that were never saved.
    #[error(
        "Your current target has not been saved. Use save-target first, or use -f to discard your changes."
    )]
    UnsavedChanges,

    /// An unnamed save would overwrite a target with substantive edits.
    #[error(
        "You've made substantial changes to the current target.\nUse -f if you intend to overwrite the target named {0} or provide an alternate name"
    )]
    SubstantialChanges(String),

    #[error("Current target has not been previously saved. Please provide a name.")]
    MissingName,

    #[error(transparent)]
    InvalidName(#[from] TargetNameError),

    #[error("could not {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {source}")]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("could not write output: {0}")]
    Output(#[source] io::Error),
}

impl TargetsError {
    /// Builds an [`TargetsError::Io`] for `action` on `path`.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_) | Self::UnsavedChanges | Self::SubstantialChanges(_) => {
                ErrorKind::Conflict
            }
            Self::MissingName | Self::InvalidName(_) => ErrorKind::Usage,
            Self::Io { .. } | Self::MalformedConfig { .. } | Self::Output(_) => ErrorKind::Io,
        }
    }

    /// Process exit code.  Every failure class exits with 1; only the printed
    /// message tells them apart.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_target() {
        let err = TargetsError::NotFound("prod".to_string());
        assert_eq!(err.to_string(), "Target prod does not exist.");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_already_exists_suggests_force() {
        let err = TargetsError::AlreadyExists("prod".to_string());
        assert!(err.to_string().contains("Use -f to overwrite it."));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_unsaved_changes_suggests_save_or_force() {
        let msg = TargetsError::UnsavedChanges.to_string();
        assert!(msg.contains("save-target"));
        assert!(msg.contains("-f"));
    }

    #[test]
    fn test_substantial_changes_spans_two_lines() {
        let msg = TargetsError::SubstantialChanges("dev".to_string()).to_string();
        let lines: Vec<&str> = msg.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("target named dev"));
    }

    #[test]
    fn test_usage_kinds() {
        assert_eq!(TargetsError::MissingName.kind(), ErrorKind::Usage);
        assert_eq!(
            TargetsError::from(TargetNameError::Empty).kind(),
            ErrorKind::Usage
        );
    }

    #[test]
    fn test_io_error_includes_action_and_path() {
        // Arrange
        let source = io::Error::new(io::ErrorKind::PermissionDenied, "denied");

        // Act
        let err = TargetsError::io("write", "/tmp/cf/config.json", source);

        // Assert
        assert_eq!(
            err.to_string(),
            "could not write /tmp/cf/config.json: denied"
        );
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_every_kind_exits_with_one() {
        let errors = [
            TargetsError::NotFound("a".to_string()),
            TargetsError::UnsavedChanges,
            TargetsError::MissingName,
            TargetsError::io("read", "/x", io::Error::from(io::ErrorKind::Other)),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1, "{err:?}");
        }
    }
}
