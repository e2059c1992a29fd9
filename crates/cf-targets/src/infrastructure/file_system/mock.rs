//! In-memory file system for unit testing.
//!
//! [`MemoryFileSystem`] keeps a tree of files, directories, and symlinks in a
//! map and records every successful mutation, so tests can assert that a
//! refused command wrote nothing.  Writes to chosen paths can be made to fail.
//!
//! The `put_*` helpers arrange state without being recorded.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::file_system::FileSystem;

/// Symlink hops followed before giving up, as the kernel does.
const MAX_LINK_HOPS: usize = 40;

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
    Symlink(PathBuf),
}

/// A mutation performed through the [`FileSystem`] trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateDir(PathBuf),
    /// The path actually written, after following symlinks.
    Write(PathBuf),
    Symlink { original: PathBuf, link: PathBuf },
    Remove(PathBuf),
}

/// An in-memory implementation of [`FileSystem`].
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
    mutations: Mutex<Vec<Mutation>>,
    failing_writes: Mutex<BTreeSet<PathBuf>>,
}

impl MemoryFileSystem {
    /// Creates an empty tree containing only the root directory.
    pub fn new() -> Self {
        let fs = Self::default();
        fs.put_dir("/");
        fs
    }

    /// Places a file (and its parent directories) without recording it.
    pub fn put_file(&self, path: impl AsRef<Path>, content: &[u8]) {
        self.insert(path.as_ref(), Node::File(content.to_vec()));
    }

    /// Places a directory (and its parents) without recording it.
    pub fn put_dir(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::Dir);
    }

    /// Places a symlink at `link` pointing at `original` without recording it.
    pub fn put_symlink(&self, original: impl AsRef<Path>, link: impl AsRef<Path>) {
        self.insert(
            link.as_ref(),
            Node::Symlink(original.as_ref().to_path_buf()),
        );
    }

    /// Deletes an entry without recording it.
    pub fn remove_entry(&self, path: impl AsRef<Path>) {
        self.lock_nodes().remove(path.as_ref());
    }

    /// Content of the file at `path`, following symlinks.
    pub fn file_content(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let nodes = self.lock_nodes();
        let resolved = follow(&nodes, path.as_ref()).ok()?;
        match nodes.get(&resolved) {
            Some(Node::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// What the symlink at `path` stores, unresolved.
    pub fn link_destination(&self, path: impl AsRef<Path>) -> Option<PathBuf> {
        match self.lock_nodes().get(path.as_ref()) {
            Some(Node::Symlink(original)) => Some(original.clone()),
            _ => None,
        }
    }

    /// Every mutation recorded so far, oldest first.
    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().expect("lock poisoned").clone()
    }

    pub fn clear_mutations(&self) {
        self.mutations.lock().expect("lock poisoned").clear();
    }

    /// Makes every later write to `path` fail with `PermissionDenied`.
    pub fn fail_writes_to(&self, path: impl AsRef<Path>) {
        self.failing_writes
            .lock()
            .expect("lock poisoned")
            .insert(path.as_ref().to_path_buf());
    }

    fn lock_nodes(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.lock().expect("lock poisoned")
    }

    fn record(&self, mutation: Mutation) {
        self.mutations.lock().expect("lock poisoned").push(mutation);
    }

    fn insert(&self, path: &Path, node: Node) {
        let mut nodes = self.lock_nodes();
        for ancestor in path.ancestors().skip(1) {
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
        nodes.insert(path.to_path_buf(), node);
    }
}

/// Follows symlinks at `path` until a non-link entry or a missing one.
fn follow(nodes: &BTreeMap<PathBuf, Node>, path: &Path) -> io::Result<PathBuf> {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_LINK_HOPS {
        match nodes.get(&current) {
            Some(Node::Symlink(original)) => {
                current = match current.parent() {
                    Some(parent) if original.is_relative() => parent.join(original),
                    _ => original.clone(),
                };
            }
            _ => return Ok(current),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::Other,
        format!("too many levels of symbolic links: {}", path.display()),
    ))
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl FileSystem for MemoryFileSystem {
    fn create_dir(&self, path: &Path) -> io::Result<()> {
        {
            let nodes = self.lock_nodes();
            if nodes.contains_key(path) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("already exists: {}", path.display()),
                ));
            }
        }
        self.insert(path, Node::Dir);
        self.record(Mutation::CreateDir(path.to_path_buf()));
        Ok(())
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        let nodes = self.lock_nodes();
        let resolved = follow(&nodes, path)?;
        match nodes.get(&resolved) {
            Some(Node::File(content)) => Ok(content.clone()),
            Some(_) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("not a file: {}", resolved.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let resolved = {
            let nodes = self.lock_nodes();
            let resolved = follow(&nodes, path)?;
            let parent_is_dir = resolved
                .parent()
                .map_or(true, |parent| matches!(nodes.get(parent), Some(Node::Dir)));
            if !parent_is_dir {
                return Err(not_found(&resolved));
            }
            if matches!(nodes.get(&resolved), Some(Node::Dir)) {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("is a directory: {}", resolved.display()),
                ));
            }
            resolved
        };

        let failing = self.failing_writes.lock().expect("lock poisoned");
        if failing.contains(path) || failing.contains(&resolved) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", resolved.display()),
            ));
        }
        drop(failing);

        self.lock_nodes()
            .insert(resolved.clone(), Node::File(content.to_vec()));
        self.record(Mutation::Write(resolved));
        Ok(())
    }

    fn symlink(&self, original: &Path, link: &Path) -> io::Result<()> {
        {
            let mut nodes = self.lock_nodes();
            if nodes.contains_key(link) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("already exists: {}", link.display()),
                ));
            }
            if let Some(parent) = link.parent() {
                if !matches!(nodes.get(parent), Some(Node::Dir)) {
                    return Err(not_found(link));
                }
            }
            nodes.insert(link.to_path_buf(), Node::Symlink(original.to_path_buf()));
        }
        self.record(Mutation::Symlink {
            original: original.to_path_buf(),
            link: link.to_path_buf(),
        });
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        {
            let mut nodes = self.lock_nodes();
            match nodes.get(path) {
                None => return Err(not_found(path)),
                Some(Node::Dir) => {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        format!("is a directory: {}", path.display()),
                    ))
                }
                Some(_) => {
                    nodes.remove(path);
                }
            }
        }
        self.record(Mutation::Remove(path.to_path_buf()));
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let nodes = self.lock_nodes();
        let dir = follow(&nodes, path)?;
        if !matches!(nodes.get(&dir), Some(Node::Dir)) {
            return Err(not_found(path));
        }
        Ok(nodes
            .keys()
            .filter(|entry| entry.parent() == Some(dir.as_path()))
            .filter_map(|entry| entry.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        let nodes = self.lock_nodes();
        follow(&nodes, path).is_ok_and(|resolved| nodes.contains_key(&resolved))
    }

    fn is_symlink(&self, path: &Path) -> bool {
        matches!(self.lock_nodes().get(path), Some(Node::Symlink(_)))
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let nodes = self.lock_nodes();
        let resolved = follow(&nodes, path)?;
        if nodes.contains_key(&resolved) {
            Ok(resolved)
        } else {
            Err(not_found(path))
        }
    }
}
