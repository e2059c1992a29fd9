//! Application layer for cf-targets.
//!
//! Everything here orchestrates the domain types from `targets_core` over an
//! injected [`file_system::FileSystem`].  No module in this layer calls the OS
//! directly.
//!
//! # Sub-modules
//!
//! - **`file_system`** – The capability trait every OS access goes through.
//! - **`blob_store`** – Copy, relink, and remove primitives over the targets
//!   directory.
//! - **`target_registry`** – Which targets exist and where they are stored.
//! - **`check_status`** – Computes the [`targets_core::TargetStatus`] snapshot
//!   at the start of every command.
//! - **`manage_targets`** – The list / switch / save / delete handlers.
//! - **`dispatch`** – Maps a parsed [`dispatch::Command`] onto the handlers.
//! - **`error`** – [`error::TargetsError`] and its exit-code mapping.

pub mod blob_store;
pub mod check_status;
pub mod dispatch;
pub mod error;
pub mod file_system;
pub mod manage_targets;
pub mod target_registry;
