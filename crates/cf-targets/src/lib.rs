//! cf-targets library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # Layers
//!
//! ```text
//! main.rs           clap command line, logging, exit code
//!   application/    status engine and command handlers (no direct OS calls)
//!   infrastructure/ FileSystem implementations, config file location
//! ```
//!
//! The application layer reaches the disk only through the
//! [`application::file_system::FileSystem`] trait, which is passed into
//! [`application::manage_targets::TargetsEngine::open`].  Tests pass an
//! in-memory implementation instead.

pub mod application;
pub mod infrastructure;
