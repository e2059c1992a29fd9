//! The status snapshot computed at the start of every command.
//!
//! # Two kinds of drift (for beginners)
//!
//! The active configuration can drift from its saved target in two ways:
//!
//! - **Needs update** – only the access token differs.  Tokens are refreshed
//!   on routine use, so this drift is benign.  The saved snapshot is merely
//!   stale and nothing the user did is at risk.
//! - **Needs saving** – anything else differs.  The user made real edits
//!   (switched org or space, logged into another API, ...) that only exist in
//!   the active configuration and would be lost by a switch.
//!
//! Commands consult [`TargetStatus::freshness`] before any destructive action.
//! The snapshot is never persisted.

/// Freshness of the active configuration relative to the current target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No current target is known; any content counts as unsaved.
    Unnamed,
    /// Active configuration matches the current target exactly.
    Clean,
    /// Only the volatile field differs.
    NeedsUpdate,
    /// A non-volatile field differs.
    NeedsSaving,
}

/// Snapshot of the active configuration versus the `current` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStatus {
    /// The marker resolves to a saved target.
    pub has_name: bool,
    /// Name of that target; empty when `has_name` is false.
    pub name: String,
    /// Non-volatile content differs from the saved target.
    pub needs_saving: bool,
    /// The volatile field differs from the saved target.
    pub needs_update: bool,
}

impl TargetStatus {
    /// Status used when no marker exists or it is dangling.
    ///
    /// `needs_saving` is true so that an unnamed save is refused and a switch
    /// without `-f` is blocked.
    pub fn unnamed() -> Self {
        Self {
            has_name: false,
            name: String::new(),
            needs_saving: true,
            needs_update: false,
        }
    }

    /// Status for a resolved current target.
    pub fn named(name: impl Into<String>, needs_saving: bool, needs_update: bool) -> Self {
        Self {
            has_name: true,
            name: name.into(),
            needs_saving,
            needs_update,
        }
    }

    /// Three-way classification of a named status; `Unnamed` otherwise.
    pub fn freshness(&self) -> Freshness {
        if !self.has_name {
            Freshness::Unnamed
        } else if self.needs_saving {
            Freshness::NeedsSaving
        } else if self.needs_update {
            Freshness::NeedsUpdate
        } else {
            Freshness::Clean
        }
    }

    /// Whether `target` is the current target.
    pub fn is_current(&self, target: &str) -> bool {
        self.has_name && self.name == target
    }

    /// Annotation shown next to `target` in the list, if any.
    ///
    /// Unsaved edits take precedence over a stale token.
    pub fn qualifier_for(&self, target: &str) -> Option<&'static str> {
        if !self.is_current(target) {
            return None;
        }
        Some(match self.freshness() {
            Freshness::NeedsSaving => "(current, modified)",
            Freshness::NeedsUpdate => "(current*)",
            Freshness::Clean | Freshness::Unnamed => "(current)",
        })
    }
}
