use std::io;
use std::path::PathBuf;

use crate::format::ArchiveFormat;
use crate::investigation::DatasetKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported archive format: {format}")]
    UnsupportedFormat { format: ArchiveFormat },

    #[error("{}", not_found_message(.kind))]
    InvestigationNotFound { kind: Option<DatasetKind> },

    #[error("archive contains no visible entries")]
    EmptyArchive,

    #[error("zip-slip attack detected: entry '{entry}' resolves to '{resolved}'")]
    ZipSlip { entry: PathBuf, resolved: PathBuf },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[cfg(feature = "zip")]
    #[error("zip archive is corrupted: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Fs(#[from] isa_fs::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] figment::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn not_found_message(kind: &Option<DatasetKind>) -> String {
    match kind {
        Some(kind) => format!("unable to identify a single {kind} investigation file"),
        None => "unable to identify a single investigation file".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
