use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use super::{ensure_directory, write_file};
use crate::error::Result;
use crate::sanitize::sanitize_entry_path;

/// Names from the central directory, in archive order.
pub(super) fn member_names<R: Read + Seek>(reader: R) -> Result<Vec<String>> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut names = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let file = archive.by_index_raw(index)?;
        names.push(file.name().to_owned());
    }

    Ok(names)
}

pub(super) fn unpack<R: Read + Seek>(reader: R, dir: &Path) -> Result<usize> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut written = 0;

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let raw_path = PathBuf::from(file.name());
        let target = sanitize_entry_path(&raw_path, dir)?;
        if target == dir {
            continue;
        }

        if file.is_dir() {
            ensure_directory(&target)?;
        } else {
            write_file(&mut file, &target)?;
        }
        written += 1;
    }

    Ok(written)
}
