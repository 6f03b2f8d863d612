//! File-system capability used by every pipeline component.
//!
//! The normalizer, lister, grid builder and pipeline never call `std::fs`
//! directly. They go through [`FileSystem`], which has two implementations:
//!
//! - [`RealFs`]: thin wrapper over `std::fs`
//! - [`InMemoryFs`]: a flat map of paths used by the test suite, with
//!   optional injected rename failures
//!
//! Paths are treated literally. Callers should join everything onto the same
//! root so lookups line up.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Minimal, synchronous filesystem abstraction.
pub trait FileSystem {
    /// Check whether a path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// List the entry names of a directory, sorted byte-wise.
    ///
    /// Names that are not valid UTF-8 are skipped with a warning.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Create a directory and any missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Rename `from` to `to`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Real filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.try_exists().unwrap_or(false)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            match entry?.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!(
                    "skipping non-UTF-8 filename in {}: {}",
                    path.display(),
                    raw.to_string_lossy()
                ),
            }
        }
        names.sort();
        Ok(names)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(String),
}

/// In-memory filesystem for tests.
///
/// Parent directories are created implicitly when a file is added. Renames
/// registered with [`InMemoryFs::fail_rename`] return `PermissionDenied`.
#[derive(Debug, Default)]
pub struct InMemoryFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    failing_renames: RefCell<HashSet<PathBuf>>,
}

impl InMemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir<P: Into<PathBuf>>(&self, path: P) {
        let path = path.into();
        self.ensure_parents(&path);
        self.nodes.borrow_mut().insert(path, Node::Dir);
    }

    pub fn add_file<P: Into<PathBuf>>(&self, path: P, contents: &str) {
        let path = path.into();
        self.ensure_parents(&path);
        self.nodes.borrow_mut().insert(path, Node::File(contents.to_string()));
    }

    /// Make every rename whose source is `from` fail.
    pub fn fail_rename<P: Into<PathBuf>>(&self, from: P) {
        self.failing_renames.borrow_mut().insert(from.into());
    }

    /// Contents of a file, if present.
    pub fn contents(&self, path: &Path) -> Option<String> {
        match self.nodes.borrow().get(path) {
            Some(Node::File(contents)) => Some(contents.clone()),
            _ => None,
        }
    }

    fn ensure_parents(&self, path: &Path) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }
}

impl FileSystem for InMemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let nodes = self.nodes.borrow();
        match nodes.get(path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(io::Error::other(format!("read_dir on file: {}", path.display())));
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("read_dir on missing path: {}", path.display()),
                ));
            }
        }
        let mut names: Vec<String> = nodes
            .keys()
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if let Some(Node::File(_)) = self.nodes.borrow().get(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("file exists: {}", path.display()),
            ));
        }
        self.add_dir(path);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.failing_renames.borrow().contains(from) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
        }
        let mut nodes = self.nodes.borrow_mut();
        let node = nodes.remove(from).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("rename of missing path: {}", from.display()),
            )
        })?;
        nodes.insert(to.to_path_buf(), node);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.contents(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !self.exists(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("missing parent directory: {}", parent.display()),
                ));
            }
        }
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(contents.to_string()));
        Ok(())
    }
}
