//! The file system capability used by the engine.
//!
//! Every OS access goes through [`FileSystem`].  The engine receives an
//! implementation when it is opened, so several engines can run in one
//! process (for example in parallel tests) without sharing any global state.
//!
//! Implementations:
//!
//! - [`crate::infrastructure::file_system::DiskFileSystem`] – the real disk.
//! - [`crate::infrastructure::file_system::mock::MemoryFileSystem`] – an
//!   in-memory tree for tests.

use std::io;
use std::path::{Path, PathBuf};

/// Primitive file operations over the targets directory.
///
/// Methods mirror `std::fs` and report failures as [`io::Error`] so callers can
/// tell "not found" apart from real faults.
pub trait FileSystem {
    /// Creates `path` (and missing parents).  An existing directory is either
    /// accepted or reported as [`io::ErrorKind::AlreadyExists`].
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Reads the whole file, following symlinks.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replaces the content of `path` with `content`, readable and writable by
    /// the owner only.
    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Creates a symlink at `link` pointing at `original`.  A relative
    /// `original` is resolved against the directory containing `link`.
    fn symlink(&self, original: &Path, link: &Path) -> io::Result<()>;

    /// Removes a file or symlink (never its destination).
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// File names of the entries in `path`, in no particular order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Whether `path` exists after following symlinks.  A dangling symlink
    /// does not exist.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` itself is a symlink, dangling or not.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Resolves every symlink in `path`.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn create_dir(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        (**self).write_file(path, content)
    }

    fn symlink(&self, original: &Path, link: &Path) -> io::Result<()> {
        (**self).symlink(original, link)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        (**self).remove_file(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        (**self).read_dir(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        (**self).is_symlink(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).canonicalize(path)
    }
}
