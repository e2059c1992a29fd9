//! Target names.
//!
//! A target is stored as `<name><suffix>` inside the targets directory, so a
//! name must be usable as a single path component.  [`TargetName::parse`] is
//! the only way to construct one from user input.

use std::fmt;

use thiserror::Error;

/// Reasons a string cannot be used as a target name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TargetNameError {
    #[error("target name must not be empty")]
    Empty,

    /// `.` and `..` would resolve outside the target file itself.
    #[error("target name {0:?} is reserved")]
    Reserved(String),

    #[error("target name {name:?} must not contain {found:?}")]
    InvalidCharacter { name: String, found: char },
}

/// A filesystem-safe target name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetName(String);

impl TargetName {
    /// Validates `raw` as a target name.
    ///
    /// # Errors
    ///
    /// Returns [`TargetNameError`] if the name is empty, is `.` or `..`, or
    /// contains a path separator or NUL byte.
    pub fn parse(raw: &str) -> Result<Self, TargetNameError> {
        if raw.is_empty() {
            return Err(TargetNameError::Empty);
        }
        if raw == "." || raw == ".." {
            return Err(TargetNameError::Reserved(raw.to_string()));
        }
        // Backslash is rejected everywhere so a target directory can be shared
        // between platforms.
        if let Some(found) = raw.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
            return Err(TargetNameError::InvalidCharacter {
                name: raw.to_string(),
                found,
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TargetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
