// File access used by the pipeline. Kept behind a trait so runs can be tested in memory.
pub mod fs;
pub mod memory;

pub use fs::FsFileStore;
pub use memory::InMemoryFileStore;

use std::io;
use std::path::{Component, Path, PathBuf};

pub trait SalesFileStore {
    /// Lists the regular files directly inside `dir` (no recursion), in any order.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replaces `path` with `contents` so readers see either the old file or the
    /// complete new one, never a partial write.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Normalized form of `path`; two paths naming the same file resolve equal.
    /// Works for files that do not exist yet.
    fn resolve(&self, path: &Path) -> PathBuf;
}

/// Drops `.` components and folds `..` into the preceding component, without
/// touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
