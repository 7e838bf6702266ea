use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use super::{ensure_directory, write_file};
use crate::error::Result;
use crate::sanitize::sanitize_entry_path;

/// Entry names exactly as stored, read through the gzip layer.
pub(super) fn member_names<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    let mut names = Vec::new();

    for entry in archive.entries()? {
        let entry = entry?;
        names.push(String::from_utf8_lossy(&entry.path_bytes()).into_owned());
    }

    Ok(names)
}

/// Unpack regular files and directories below `dir`.
///
/// Links and special entries are skipped.
pub(super) fn unpack<R: Read>(reader: R, dir: &Path) -> Result<usize> {
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    let mut written = 0;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let raw_path = entry.path()?.into_owned();
        let target = sanitize_entry_path(&raw_path, dir)?;
        if target == dir {
            continue;
        }

        let entry_type = entry.header().entry_type();
        if entry_type.is_dir() {
            ensure_directory(&target)?;
        } else if entry_type.is_file() {
            write_file(&mut entry, &target)?;
        } else {
            tracing::debug!(entry = %raw_path.display(), ?entry_type, "skipping non-regular tar entry");
            continue;
        }
        written += 1;
    }

    Ok(written)
}
