//! Command dispatch: the single entry point used by the binary.
//!
//! The command line is parsed elsewhere into a [`Command`].  [`run`] opens a
//! [`TargetsEngine`] (which computes the status snapshot first) and hands the
//! command to the matching handler.  Every failure is returned as a
//! [`TargetsError`] for the caller to report.

use std::io::Write;

use targets_core::{TargetName, TargetsLayout};

use super::error::TargetsError;
use super::file_system::FileSystem;
use super::manage_targets::TargetsEngine;

/// A parsed cf-targets command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `targets`
    List,
    /// `set-target [-f] NAME`
    Switch { name: String, force: bool },
    /// `save-target [-f] [NAME]`
    Save { name: Option<String>, force: bool },
    /// `delete-target NAME`
    Delete { name: String },
}

impl Command {
    /// The command word as typed by the user.
    pub fn word(&self) -> &'static str {
        match self {
            Self::List => "targets",
            Self::Switch { .. } => "set-target",
            Self::Save { .. } => "save-target",
            Self::Delete { .. } => "delete-target",
        }
    }
}

/// Opens an engine over `fs` and `layout` and executes `command`.
///
/// # Errors
///
/// Propagates every [`TargetsError`] from opening the engine or running the
/// handler.
pub fn run<F: FileSystem>(
    fs: F,
    layout: TargetsLayout,
    command: &Command,
    out: &mut dyn Write,
) -> Result<(), TargetsError> {
    let engine = TargetsEngine::open(fs, layout)?;
    execute(&engine, command, out)
}

/// Executes `command` against an already opened engine.
///
/// Target names are validated here, after the status check, so a bad name
/// never reaches the blob store.
///
/// # Errors
///
/// Returns [`TargetsError::InvalidName`] for names that cannot be file names,
/// and whatever the handler returns.
pub fn execute<F: FileSystem>(
    engine: &TargetsEngine<F>,
    command: &Command,
    out: &mut dyn Write,
) -> Result<(), TargetsError> {
    tracing::debug!(command = command.word(), "dispatching");
    match command {
        Command::List => engine.list(out),
        Command::Switch { name, force } => engine.switch(&TargetName::parse(name)?, *force, out),
        Command::Save { name, force } => {
            let name = name.as_deref().map(TargetName::parse).transpose()?;
            engine.save(name.as_ref(), *force, out)
        }
        Command::Delete { name } => engine.delete(&TargetName::parse(name)?, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::ErrorKind;
    use crate::infrastructure::file_system::mock::MemoryFileSystem;

    fn layout() -> TargetsLayout {
        TargetsLayout::for_config("/cf/config.json")
    }

    fn run_capture(fs: &MemoryFileSystem, command: Command) -> (String, Result<(), TargetsError>) {
        let mut out = Vec::new();
        let result = run(fs, layout(), &command, &mut out);
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn test_command_words_match_cli() {
        assert_eq!(Command::List.word(), "targets");
        assert_eq!(
            Command::Switch {
                name: "a".into(),
                force: false
            }
            .word(),
            "set-target"
        );
        assert_eq!(
            Command::Save {
                name: None,
                force: false
            }
            .word(),
            "save-target"
        );
        assert_eq!(Command::Delete { name: "a".into() }.word(), "delete-target");
    }

    #[test]
    fn test_list_on_fresh_home_prints_hint() {
        let fs = MemoryFileSystem::new();

        let (text, result) = run_capture(&fs, Command::List);

        assert!(result.is_ok());
        assert!(text.starts_with("No targets have been saved yet."));
    }

    #[test]
    fn test_save_then_list_marks_current() {
        // Arrange
        let fs = MemoryFileSystem::new();
        fs.put_file("/cf/config.json", br#"{"Target":"a"}"#);

        // Act
        run_capture(
            &fs,
            Command::Save {
                name: Some("dev".into()),
                force: false,
            },
        )
        .1
        .unwrap();
        let (text, _) = run_capture(&fs, Command::List);

        // Assert
        assert_eq!(text, "dev (current)\n");
    }

    #[test]
    fn test_invalid_name_is_usage_error_and_mutates_nothing() {
        let fs = MemoryFileSystem::new();
        fs.put_file("/cf/config.json", b"{}");
        fs.put_dir("/cf/targets");

        let (_, result) = run_capture(
            &fs,
            Command::Save {
                name: Some("../escape".into()),
                force: true,
            },
        );

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(fs.mutations().is_empty());
    }

    #[test]
    fn test_unnamed_save_without_current_is_usage_error() {
        let fs = MemoryFileSystem::new();

        let (_, result) = run_capture(
            &fs,
            Command::Save {
                name: None,
                force: false,
            },
        );

        assert!(matches!(result, Err(TargetsError::MissingName)));
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let fs = MemoryFileSystem::new();

        let (_, result) = run_capture(&fs, Command::Delete { name: "x".into() });

        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_malformed_config_fails_every_command_once_named() {
        let fs = MemoryFileSystem::new();
        fs.put_file("/cf/config.json", b"{}");
        fs.put_file("/cf/targets/dev.config.json", b"{}");
        fs.put_symlink("dev.config.json", "/cf/targets/current");
        fs.put_file("/cf/config.json", b"{ broken");

        let (text, result) = run_capture(&fs, Command::List);

        assert!(text.is_empty());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Io);
    }
}
