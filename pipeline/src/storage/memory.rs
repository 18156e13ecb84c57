use super::{normalize_lexically, SalesFileStore};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Map-backed store for exercising the pipeline without touching disk.
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    dirs: BTreeSet<PathBuf>,
    files: RefCell<BTreeMap<PathBuf, String>>,
    writes: Cell<usize>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.insert(dir.into());
        self
    }

    /// Adds a file, registering its parent directory too.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: &str) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.dirs.insert(parent.to_path_buf());
        }
        self.files.borrow_mut().insert(path, contents.to_string());
        self
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Number of successful `write_atomic` calls.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl SalesFileStore for InMemoryFileStore {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.dirs.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory '{}' not found", dir.display()),
            ));
        }
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.contents(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("file '{}' not found", path.display()))
        })
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        if !self.dirs.contains(parent) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory '{}' not found", parent.display()),
            ));
        }
        let text = String::from_utf8(contents.to_vec())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.files.borrow_mut().insert(path.to_path_buf(), text);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        normalize_lexically(path)
    }
}
