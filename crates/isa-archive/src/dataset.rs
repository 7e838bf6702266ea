//! Turning an uploaded archive into a stored ISA dataset.

use std::fmt;
use std::fs;
use std::io::{Read, Seek};
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::extract::extract;
use crate::investigation::{DatasetKind, find_investigation, infer_investigation};
use crate::options::ExtractOptions;

/// An ingested dataset: its extra-files directory plus the file anchoring it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IsaDataset {
    pub kind: DatasetKind,
    pub files_path: PathBuf,
    /// Investigation file name, relative to `files_path`.
    pub investigation: PathBuf,
}

impl IsaDataset {
    pub fn investigation_path(&self) -> PathBuf {
        self.files_path.join(&self.investigation)
    }

    pub fn listing(&self) -> Result<Vec<CompositeEntry>> {
        composite_listing(&self.files_path, Some(&self.investigation))
    }

    pub fn peek(&self) -> Result<DatasetPeek> {
        let listing = self.listing()?;
        Ok(DatasetPeek {
            kind: self.kind,
            investigation: relative_name(&self.investigation),
            file_count: listing.len(),
            total_bytes: listing.iter().map(|entry| entry.size).sum(),
        })
    }
}

/// Extract `reader` into `files_path` and copy the investigation file to
/// `primary_file`.
///
/// `hint` restricts identification to one kind; without it Tab is tried
/// before JSON. When no single investigation file exists the extracted
/// files are left in `files_path` for the caller to dispose of, and
/// `InvestigationNotFound` is returned.
pub fn ingest<R: Read + Seek>(
    reader: R,
    files_path: &Path,
    primary_file: &Path,
    hint: Option<DatasetKind>,
    options: &ExtractOptions,
) -> Result<IsaDataset> {
    extract(reader, files_path, options)?;

    let names = top_level_files(files_path)?;
    let (kind, investigation) =
        infer_investigation(&names, hint).ok_or(Error::InvestigationNotFound { kind: hint })?;

    let source = files_path.join(&investigation);
    fs::copy(&source, primary_file).map_err(|e| Error::ExtractionFailed {
        path: primary_file.to_path_buf(),
        source: e,
    })?;
    tracing::info!(
        %kind,
        investigation = %investigation,
        primary = %primary_file.display(),
        "stored ISA dataset"
    );

    Ok(IsaDataset {
        kind,
        files_path: files_path.to_path_buf(),
        investigation: PathBuf::from(investigation),
    })
}

/// Path of the investigation file of an already stored dataset.
pub fn primary_filename(files_path: &Path, kind: DatasetKind) -> Result<Option<PathBuf>> {
    let names = top_level_files(files_path)?;
    Ok(find_investigation(&names, kind).map(|name| files_path.join(name)))
}

/// Like [`primary_filename`] when the kind is not known yet.
pub fn infer_primary_filename(
    files_path: &Path,
    hint: Option<DatasetKind>,
) -> Result<Option<(DatasetKind, PathBuf)>> {
    let names = top_level_files(files_path)?;
    Ok(infer_investigation(&names, hint).map(|(kind, name)| (kind, files_path.join(name))))
}

fn top_level_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// One file of a composite dataset, as the host lists it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompositeEntry {
    /// `/`-separated path relative to the dataset directory.
    pub name: String,
    pub size: u64,
    pub primary: bool,
}

/// Every file making up the dataset in `files_path`, sorted by name.
pub fn composite_listing(
    files_path: &Path,
    investigation: Option<&Path>,
) -> Result<Vec<CompositeEntry>> {
    let primary = investigation.map(relative_name);

    isa_fs::list_files(files_path)?
        .into_iter()
        .map(|relative| {
            let size = fs::metadata(files_path.join(&relative))?.len();
            let name = relative_name(&relative);
            Ok(CompositeEntry {
                primary: primary.as_deref() == Some(name.as_str()),
                name,
                size,
            })
        })
        .collect()
}

fn relative_name(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Short summary shown in place of the dataset's content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DatasetPeek {
    pub kind: DatasetKind,
    pub investigation: String,
    pub file_count: usize,
    pub total_bytes: u64,
}

impl fmt::Display for DatasetPeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = if self.file_count == 1 { "file" } else { "files" };
        write!(
            f,
            "{} dataset, {} {} ({} bytes), investigation {}",
            self.kind, self.file_count, files, self.total_bytes, self.investigation
        )
    }
}
