//! Storage infrastructure: where the active configuration lives.
//!
//! The `paths` sub-module turns the command-line and environment inputs into
//! the absolute path of the active configuration file.  The targets directory
//! and marker are derived from that path by `targets_core::TargetsLayout`.

pub mod paths;
