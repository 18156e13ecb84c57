use super::{normalize_lexically, SalesFileStore};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Filesystem-backed store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileStore;

impl SalesFileStore for FsFileStore {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        // The temp file must live on the same filesystem as the target for the rename to be atomic
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents)?;
        // Temp files are created owner-only; keep the replaced file's mode, or use 0644
        if let Some(permissions) = output_permissions(path)? {
            tmp.as_file().set_permissions(permissions)?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if let Ok(canonical) = fs::canonicalize(path) {
            return canonical;
        }
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            match std::env::current_dir() {
                Ok(cwd) => cwd.join(path),
                Err(_) => path.to_path_buf(),
            }
        };
        let normalized = normalize_lexically(&absolute);
        // The file may not exist yet; its directory usually does
        if let (Some(parent), Some(name)) = (normalized.parent(), normalized.file_name()) {
            if let Ok(parent) = fs::canonicalize(parent) {
                return parent.join(name);
            }
        }
        normalized
    }
}

fn output_permissions(path: &Path) -> io::Result<Option<fs::Permissions>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(default_permissions()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
