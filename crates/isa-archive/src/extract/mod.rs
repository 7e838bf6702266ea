//! Unpacking archives into a destination directory.
//!
//! Everything is first unpacked into a scratch [`Workspace`]. Only the
//! visible top-level entries are then moved to the destination, and a
//! single wrapping folder is collapsed so its contents land directly in the
//! destination.

use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use isa_fs::Workspace;
use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::format::{ArchiveFormat, detect_format};
use crate::options::ExtractOptions;

#[cfg(feature = "tar")]
mod tar;
#[cfg(feature = "zip")]
mod zip;

/// How the unpacked top level was placed into the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// A single wrapping folder whose contents were moved up one level.
    Collapsed,
    /// Each visible top-level entry was moved as is.
    Flat { entries: usize },
}

/// Extract `reader` into `destination` and return the destination path.
///
/// Unsupported containers are rejected before anything is written, so the
/// destination is left untouched. The scratch directory is removed on
/// every path out of this function.
pub fn extract<R: Read + Seek>(
    reader: R,
    destination: &Path,
    options: &ExtractOptions,
) -> Result<PathBuf> {
    extract_with_placement(reader, destination, options).map(|_| destination.to_path_buf())
}

/// Extract into a fresh temporary directory owned by the caller.
///
/// Dropping the returned [`TempDir`] deletes the extracted tree.
pub fn extract_to_tempdir<R: Read + Seek>(reader: R, options: &ExtractOptions) -> Result<TempDir> {
    let mut reader = reader;
    let format = detect_format(&mut reader)?;
    if !format.is_extractable() {
        return Err(Error::UnsupportedFormat { format });
    }

    let destination = options.tempdir()?;
    extract_with_placement(reader, destination.path(), options)?;
    Ok(destination)
}

/// Like [`extract`], also reporting how the top level was placed.
pub fn extract_with_placement<R: Read + Seek>(
    mut reader: R,
    destination: &Path,
    options: &ExtractOptions,
) -> Result<Placement> {
    let format = detect_format(&mut reader)?;
    if !format.is_extractable() {
        return Err(Error::UnsupportedFormat { format });
    }

    let workspace = options.workspace()?;
    let unpacked = unpack(format, reader, workspace.path())?;
    tracing::debug!(
        %format,
        entries = unpacked,
        scratch = %workspace.path().display(),
        "unpacked archive into scratch directory"
    );

    let placement = place(&workspace, destination, &options.ignored_entries)?;
    workspace.close()?;

    tracing::info!(
        %format,
        ?placement,
        destination = %destination.display(),
        "extracted archive"
    );
    Ok(placement)
}

fn place(workspace: &Workspace, destination: &Path, ignored: &[String]) -> Result<Placement> {
    let visible = workspace.visible_children(ignored)?;
    if visible.is_empty() {
        return Err(Error::EmptyArchive);
    }
    ensure_directory(destination)?;

    match visible.as_slice() {
        [only] if only.is_dir() => {
            tracing::debug!(folder = %only.display(), "collapsing single top-level folder");
            isa_fs::move_contents(only, destination)?;
            Ok(Placement::Collapsed)
        }
        entries => {
            for entry in entries {
                if let Some(name) = entry.file_name() {
                    isa_fs::move_entry(entry, destination.join(name))?;
                }
            }
            Ok(Placement::Flat {
                entries: entries.len(),
            })
        }
    }
}

fn unpack<R: Read + Seek>(format: ArchiveFormat, reader: R, dir: &Path) -> Result<usize> {
    match format {
        #[cfg(feature = "tar")]
        ArchiveFormat::Gzip => tar::unpack(reader, dir),
        #[cfg(feature = "zip")]
        ArchiveFormat::Zip => zip::unpack(reader, dir),
        format => Err(Error::UnsupportedFormat { format }),
    }
}

/// Raw member names in container order.
pub(crate) fn member_names<R: Read + Seek>(format: ArchiveFormat, reader: R) -> Result<Vec<String>> {
    match format {
        #[cfg(feature = "tar")]
        ArchiveFormat::Gzip => tar::member_names(reader),
        #[cfg(feature = "zip")]
        ArchiveFormat::Zip => zip::member_names(reader),
        format => Err(Error::UnsupportedFormat { format }),
    }
}

fn write_file<R: Read>(reader: &mut R, target_path: &Path) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        ensure_directory(parent)?;
    }

    let mut file = fs::File::create(target_path).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;
    std::io::copy(reader, &mut file).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::ExtractionFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(all(test, feature = "zip"))]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    fn zip_of(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = ::zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = ::zip::write::SimpleFileOptions::default();
        for (name, content) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    fn scratch_options(root: &Path) -> ExtractOptions {
        ExtractOptions::default().scratch_root(root)
    }

    #[test]
    fn extract_invalid_format_leaves_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("dest");
        let result = extract(Cursor::new([0xDE, 0xAD, 0xBE, 0xEF]), &dest, &ExtractOptions::default());
        assert!(matches!(
            result,
            Err(Error::UnsupportedFormat {
                format: ArchiveFormat::Unknown
            })
        ));
        assert!(!dest.exists());
    }

    #[test]
    fn collapse_single_folder() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        let dest = dir.path().join("dest");
        let archive = zip_of(&[("data/", ""), ("data/i_inv.txt", "inv"), ("data/s_study.txt", "study")]);

        let placement = extract_with_placement(archive, &dest, &scratch_options(&scratch)).unwrap();
        assert_eq!(placement, Placement::Collapsed);
        assert_eq!(fs::read_to_string(dest.join("i_inv.txt")).unwrap(), "inv");
        assert!(dest.join("s_study.txt").is_file());
        assert!(!dest.join("data").exists());
        assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[test]
    fn flat_archive_moves_each_entry() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("dest");
        let archive = zip_of(&[
            ("i_inv.txt", "inv"),
            ("assay/a_assay.txt", "assay"),
            ("__MACOSX/._i_inv.txt", ""),
            (".hidden", ""),
        ]);

        let placement =
            extract_with_placement(archive, &dest, &scratch_options(dir.path())).unwrap();
        assert_eq!(placement, Placement::Flat { entries: 2 });
        assert!(dest.join("i_inv.txt").is_file());
        assert!(dest.join("assay/a_assay.txt").is_file());
        assert!(!dest.join("__MACOSX").exists());
        assert!(!dest.join(".hidden").exists());
    }

    #[test]
    fn single_top_level_file_is_moved() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("dest");
        let archive = zip_of(&[("isa.json", "{}")]);

        let placement =
            extract_with_placement(archive, &dest, &scratch_options(dir.path())).unwrap();
        assert_eq!(placement, Placement::Flat { entries: 1 });
        assert_eq!(fs::read_to_string(dest.join("isa.json")).unwrap(), "{}");
    }

    #[test]
    fn only_ignored_entries_is_empty_archive() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        let dest = dir.path().join("dest");
        let archive = zip_of(&[("__MACOSX/", ""), (".DS_Store", "")]);

        let result = extract(archive, &dest, &scratch_options(&scratch));
        assert!(matches!(result, Err(Error::EmptyArchive)));
        assert!(!dest.exists());
        assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[test]
    fn tempdir_extraction_is_owned_by_caller() {
        let archive = zip_of(&[("root/i_inv.txt", "inv")]);
        let extracted = extract_to_tempdir(archive, &ExtractOptions::default()).unwrap();
        let path = extracted.path().to_path_buf();
        assert!(path.join("i_inv.txt").is_file());
        drop(extracted);
        assert!(!path.exists());
    }
}
