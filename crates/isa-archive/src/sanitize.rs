use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve an archive entry path against `base`, refusing anything that
/// would land outside of it.
pub fn sanitize_entry_path(entry: impl AsRef<Path>, base: impl AsRef<Path>) -> Result<PathBuf> {
    let entry = entry.as_ref();
    let base = normalize_path(base.as_ref());

    // Reject absolute paths (zip-slip protection)
    if entry.has_root() || matches!(entry.components().next(), Some(Component::Prefix(_))) {
        return Err(Error::ZipSlip {
            entry: entry.to_path_buf(),
            resolved: entry.to_path_buf(),
        });
    }

    let resolved = normalize_path(&base.join(entry));
    if !resolved.starts_with(&base) {
        return Err(Error::ZipSlip {
            entry: entry.to_path_buf(),
            resolved,
        });
    }

    Ok(resolved)
}

/// Resolve `.` and `..` lexically.
fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir => result.push(Component::RootDir.as_os_str()),
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::CurDir => {}
        }
    }

    result
}
