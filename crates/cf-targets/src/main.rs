//! cf-targets entry point.
//!
//! Keeps several named copies ("targets") of the active cf configuration file
//! and switches between them without silently losing unsaved edits.
//!
//! # Usage
//!
//! ```text
//! cf-targets [OPTIONS] <COMMAND>
//!
//! Commands:
//!   targets                        List saved targets
//!   set-target [-f] NAME           Make NAME the active configuration
//!   save-target [-f] [NAME]        Save the active configuration
//!   delete-target NAME             Delete a saved target
//!
//! Options:
//!   --config  <PATH>   Active configuration file
//!   --cf-home <DIR>    cf home directory (config at DIR/.cf/config.json)
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable            | Description                               |
//! |---------------------|-------------------------------------------|
//! | `CF_TARGETS_CONFIG` | Same as `--config`                        |
//! | `CF_HOME`           | Same as `--cf-home`                       |
//! | `RUST_LOG`          | Log filter for stderr output (default `warn`) |
//!
//! # Exit codes
//!
//! `0` on success, `1` on any usage error, refusal, or I/O failure.  The
//! printed message tells the failure classes apart.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cf_targets::application::dispatch::{self, Command};
use cf_targets::application::error::{ErrorKind, TargetsError};
use cf_targets::infrastructure::file_system::DiskFileSystem;
use cf_targets::infrastructure::storage::paths::config_file_path;
use targets_core::TargetsLayout;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Save, switch between, and delete named copies of the cf configuration.
#[derive(Debug, Parser)]
#[command(name = "cf-targets", version)]
struct Cli {
    /// Path of the active configuration file.
    ///
    /// Overrides `--cf-home` and the home directory lookup.
    #[arg(long, global = true, env = "CF_TARGETS_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// cf home directory; the configuration is read from `DIR/.cf/config.json`.
    #[arg(long, global = true, env = "CF_HOME", value_name = "DIR")]
    cf_home: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// List saved targets, marking the current one.
    #[command(name = "targets", override_usage = "cf-targets targets")]
    Targets,

    /// Make a saved target the active configuration.
    #[command(name = "set-target", override_usage = "cf-targets set-target [-f] NAME")]
    SetTarget {
        /// Discard unsaved changes to the active configuration.
        #[arg(short, long)]
        force: bool,
        name: String,
    },

    /// Save the active configuration, as NAME or over the current target.
    #[command(
        name = "save-target",
        override_usage = "cf-targets save-target [-f] [NAME]"
    )]
    SaveTarget {
        /// Overwrite an existing target.
        #[arg(short, long)]
        force: bool,
        name: Option<String>,
    },

    /// Delete a saved target.
    #[command(name = "delete-target", override_usage = "cf-targets delete-target NAME")]
    DeleteTarget { name: String },
}

impl From<CliCommand> for Command {
    fn from(command: CliCommand) -> Self {
        match command {
            CliCommand::Targets => Command::List,
            CliCommand::SetTarget { force, name } => Command::Switch { name, force },
            CliCommand::SaveTarget { force, name } => Command::Save { name, force },
            CliCommand::DeleteTarget { name } => Command::Delete { name },
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Logs go to stderr so command output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; real usage errors fail.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Resolves the configuration location and executes one command.
fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = config_file_path(cli.config.as_deref(), cli.cf_home.as_deref())
        .context("could not locate the cf configuration")?;
    let layout = TargetsLayout::for_config(config_path);
    let command = Command::from(cli.command);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch::run(DiskFileSystem::new(), layout, &command, &mut out)?;
    out.flush().context("could not write output")?;
    Ok(())
}

/// Prints `err` to stderr the way the user should see it.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<TargetsError>() {
        Some(e) if e.kind() == ErrorKind::Io => eprintln!("Error: {e}"),
        Some(e) => eprintln!("{e}"),
        None => eprintln!("Error: {err:#}"),
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<TargetsError>()
        .map_or(1, TargetsError::exit_code)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
