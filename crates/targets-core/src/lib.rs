//! # targets-core
//!
//! Shared library for cf-targets containing the domain types and the
//! configuration comparison used to decide whether the active configuration
//! has unsaved changes.
//!
//! This crate has zero dependencies on the file system.  Every function here
//! works on paths, names, and bytes that the caller already holds.
//!
//! # Architecture overview (for beginners)
//!
//! cf-targets keeps several named copies ("targets") of a single active
//! configuration file and lets the user switch between them, much like
//! contexts in other command-line tools.  A symlink called `current` records
//! which target the active configuration was last loaded from or saved to.
//!
//! This crate (`targets-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – Target names, the on-disk layout of the targets directory,
//!   and the status snapshot computed on every invocation.
//!
//! - **`config`** – How the active configuration is parsed and compared.  One
//!   field (`AccessToken`) changes on routine use and is neutralised before
//!   the comparison so that a refreshed token never counts as an edit.

pub mod config;
pub mod domain;

pub use config::data::{ConfigData, ConfigError, Drift, VOLATILE_FIELD};
pub use domain::layout::TargetsLayout;
pub use domain::status::{Freshness, TargetStatus};
pub use domain::target::{TargetName, TargetNameError};
