use crate::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Move a file or directory to `dest`.
///
/// Tries a rename first and falls back to copy-then-remove when the two
/// paths live on different filesystems.
pub fn move_entry(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.raw_os_error() == Some(18) || e.kind() == ErrorKind::CrossesDevices => {
            tracing::debug!(from = %src.display(), to = %dest.display(), "cross-device move, copying");
            copy_then_remove(src, dest)
        }
        Err(e) => Err(Error::Move {
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
            source: e,
        }),
    }
}

fn copy_then_remove(src: &Path, dest: &Path) -> Result<()> {
    let is_dir = fs::symlink_metadata(src)
        .map_err(|e| Error::Read {
            path: src.to_path_buf(),
            source: e,
        })?
        .is_dir();

    let removed = if is_dir {
        copy_tree(src, dest)?;
        fs::remove_dir_all(src)
    } else {
        fs::copy(src, dest).map_err(|e| Error::Write {
            path: dest.to_path_buf(),
            source: e,
        })?;
        fs::remove_file(src)
    };

    removed.map_err(|e| Error::Write {
        path: src.to_path_buf(),
        source: e,
    })
}

/// Copy the tree at `src` to a new directory `dest`. Symlinks are followed.
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).map_err(|e| Error::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let entries = fs::read_dir(src).map_err(|e| Error::Read {
        path: src.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::Read {
            path: src.to_path_buf(),
            source: e,
        })?;
        let from = entry.path();
        let to = dest.join(entry.file_name());

        if from.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| Error::Write { path: to, source: e })?;
        }
    }
    Ok(())
}

/// Move every entry directly under `src_dir` into `dest_dir`, keeping names.
///
/// `src_dir` itself is left in place, empty.
pub fn move_contents(src_dir: impl AsRef<Path>, dest_dir: impl AsRef<Path>) -> Result<usize> {
    let src_dir = src_dir.as_ref();
    let dest_dir = dest_dir.as_ref();
    let mut moved = 0;

    for entry in fs::read_dir(src_dir).map_err(|e| Error::Read {
        path: src_dir.to_path_buf(),
        source: e,
    })? {
        let entry = entry.map_err(|e| Error::Read {
            path: src_dir.to_path_buf(),
            source: e,
        })?;
        move_entry(entry.path(), dest_dir.join(entry.file_name()))?;
        moved += 1;
    }

    Ok(moved)
}
