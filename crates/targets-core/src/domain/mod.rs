//! Domain layer: pure value types with no I/O.
//!
//! - **`target`** – validated target names.
//! - **`layout`** – where the active configuration, the saved targets, and the
//!   `current` marker live relative to each other.
//! - **`status`** – the freshness snapshot every command consults before it
//!   mutates anything.

pub mod layout;
pub mod status;
pub mod target;
