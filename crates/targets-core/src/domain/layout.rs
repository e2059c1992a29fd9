//! On-disk layout of the targets directory.
//!
//! Everything is derived from the path of the active configuration file:
//!
//! ```text
//! ~/.cf/config.json                     active configuration
//! ~/.cf/targets/                        targets directory (sibling of the file)
//! ~/.cf/targets/prod.config.json        target "prod"
//! ~/.cf/targets/dev.config.json         target "dev"
//! ~/.cf/targets/current -> prod.config.json
//! ```
//!
//! The suffix (`.config.json` above) is `.` plus the basename of the active
//! configuration, which ties saved targets to the file-format version of the
//! file they were copied from.  Nothing in this module touches the disk.

use std::path::{Path, PathBuf};

use super::target::TargetName;

/// Name of the directory holding the saved targets.
pub const TARGETS_DIR_NAME: &str = "targets";

/// Name of the symlink marking the current target.
pub const CURRENT_MARKER_NAME: &str = "current";

/// Paths used by every cf-targets operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetsLayout {
    config_path: PathBuf,
    targets_dir: PathBuf,
    current_path: PathBuf,
    suffix: String,
}

impl TargetsLayout {
    /// Derives the layout for the active configuration at `config_path`.
    pub fn for_config(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let targets_dir = config_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(TARGETS_DIR_NAME);
        let current_path = targets_dir.join(CURRENT_MARKER_NAME);
        let basename = config_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            config_path,
            targets_dir,
            current_path,
            suffix: format!(".{basename}"),
        }
    }

    /// Path of the active configuration file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Directory holding one file per saved target plus the `current` marker.
    pub fn targets_dir(&self) -> &Path {
        &self.targets_dir
    }

    /// Path of the `current` symlink.
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// File-name suffix shared by every saved target, e.g. `.config.json`.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Storage path of the target called `name`.  Pure; never fails.
    pub fn path_for(&self, name: &TargetName) -> PathBuf {
        self.targets_dir.join(format!("{}{}", name, self.suffix))
    }

    /// Returns the target name encoded in `file_name`, or `None` when the file
    /// does not follow the `<name><suffix>` convention.
    pub fn name_from_file<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.suffix.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Target name for a resolved marker destination.
    ///
    /// The final path segment is used with the suffix stripped when present.
    /// A marker pointing at a file outside the convention keeps its full file
    /// name, so it still compares unequal to every listed target.
    pub fn name_from_path(&self, path: &Path) -> String {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match file_name.strip_suffix(self.suffix.as_str()) {
            Some(name) => name.to_string(),
            None => file_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TargetsLayout {
        TargetsLayout::for_config("/home/dev/.cf/config.json")
    }

    #[test]
    fn test_targets_dir_is_sibling_of_config_file() {
        assert_eq!(layout().targets_dir(), Path::new("/home/dev/.cf/targets"));
    }

    #[test]
    fn test_current_marker_lives_in_targets_dir() {
        assert_eq!(
            layout().current_path(),
            Path::new("/home/dev/.cf/targets/current")
        );
    }

    #[test]
    fn test_suffix_is_dot_plus_config_basename() {
        assert_eq!(layout().suffix(), ".config.json");
    }

    #[test]
    fn test_suffix_follows_renamed_config_file() {
        // Arrange: a versioned file name changes the suffix
        let layout = TargetsLayout::for_config("/tmp/cf/config.v3.json");

        // Assert
        assert_eq!(layout.suffix(), ".config.v3.json");
    }

    #[test]
    fn test_path_for_joins_name_and_suffix() {
        let name = TargetName::parse("prod").unwrap();
        assert_eq!(
            layout().path_for(&name),
            PathBuf::from("/home/dev/.cf/targets/prod.config.json")
        );
    }

    #[test]
    fn test_relative_config_path_yields_relative_targets_dir() {
        let layout = TargetsLayout::for_config("config.json");
        assert_eq!(layout.targets_dir(), Path::new("targets"));
    }

    #[test]
    fn test_name_from_file_strips_suffix() {
        assert_eq!(layout().name_from_file("dev.config.json"), Some("dev"));
    }

    #[test]
    fn test_name_from_file_ignores_foreign_files() {
        let layout = layout();
        assert_eq!(layout.name_from_file("current"), None);
        assert_eq!(layout.name_from_file("notes.txt"), None);
        assert_eq!(layout.name_from_file("dev.config.toml"), None);
    }

    #[test]
    fn test_name_from_file_ignores_bare_suffix() {
        assert_eq!(layout().name_from_file(".config.json"), None);
    }

    #[test]
    fn test_name_from_path_uses_final_segment() {
        let path = Path::new("/elsewhere/targets/staging.config.json");
        assert_eq!(layout().name_from_path(path), "staging");
    }

    #[test]
    fn test_name_from_path_keeps_unsuffixed_file_name() {
        let path = Path::new("/elsewhere/backup.json");
        assert_eq!(layout().name_from_path(path), "backup.json");
    }
}
