//! Infrastructure layer: everything that touches the operating system.
//!
//! - **`file_system`** – [`file_system::DiskFileSystem`], the real
//!   implementation of the application's `FileSystem` capability, plus an
//!   in-memory `mock` used by tests.
//! - **`storage`** – Locating the active cf configuration file.

pub mod file_system;
pub mod storage;
