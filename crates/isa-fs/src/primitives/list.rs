use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Immediate children of `dir` that are not hidden and not named in `ignored`.
///
/// Hidden means the name starts with `.`. Results are sorted by path.
pub fn visible_entries(dir: impl AsRef<Path>, ignored: &[String]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut visible = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| Error::Read {
        path: dir.to_path_buf(),
        source: e,
    })? {
        let entry = entry.map_err(|e| Error::Read {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || ignored.iter().any(|i| i.as_str() == name) {
            tracing::trace!(entry = %name, "skipping hidden or ignored entry");
            continue;
        }
        visible.push(entry.path());
    }

    visible.sort();
    Ok(visible)
}

/// All regular files below `root`, relative to it, sorted.
pub fn list_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();
    walk(root, Path::new(""), &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(root: &Path, relative: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let dir = root.join(relative);
    for entry in fs::read_dir(&dir).map_err(|e| Error::Read {
        path: dir.clone(),
        source: e,
    })? {
        let entry = entry.map_err(|e| Error::Read {
            path: dir.clone(),
            source: e,
        })?;
        let file_type = entry.file_type().map_err(|e| Error::Read {
            path: entry.path(),
            source: e,
        })?;
        let child = relative.join(entry.file_name());
        if file_type.is_dir() {
            walk(root, &child, files)?;
        } else if file_type.is_file() {
            files.push(child);
        }
    }
    Ok(())
}
