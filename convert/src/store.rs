//! File store: glob listing, reads and atomic writes.
//!
//! Every error carries the path it happened on, so a failed conversion
//! always names the offending file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{StoreError, StoreResult};
use crate::models::Record;
use crate::tree;

/// Build a glob pattern below `root`, escaping any glob syntax in the root.
pub fn pattern(root: &Path, tail: &str) -> String {
    let root = glob::Pattern::escape(&root.to_string_lossy());
    if root.is_empty() {
        tail.to_string()
    } else {
        format!("{}/{}", root.trim_end_matches('/'), tail)
    }
}

/// List paths matching a glob pattern, sorted.
pub fn list(pattern: &str) -> StoreResult<Vec<PathBuf>> {
    let mut paths = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
    paths.sort();
    Ok(paths)
}

pub fn read_bytes(path: &Path) -> StoreResult<Vec<u8>> {
    fs::read(path).map_err(|e| StoreError::io(path, e))
}

pub fn read_text(path: &Path) -> StoreResult<String> {
    fs::read_to_string(path).map_err(|e| StoreError::io(path, e))
}

/// Read a JSON document that must be an object.
pub fn read_json(path: &Path) -> StoreResult<Record> {
    let text = read_text(path)?;
    tree::decode(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `content` to `path`, creating parent directories.
///
/// The content goes to a temporary file next to the target first and is
/// renamed into place, so readers never see a half-written file.
pub fn write_text(path: &Path, content: &str) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    set_default_permissions(tmp.as_file()).map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}

// Temporary files are created 0600; published files should be readable.
#[cfg(unix)]
fn set_default_permissions(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &File) -> std::io::Result<()> {
    Ok(())
}
