//! Recognizing, unpacking and describing ISA (Investigation/Study/Assay)
//! experiment archives, in both ISA-Tab and ISA-JSON flavors.
//!
//! # Architecture
//!
//! - `format.rs` - Container detection from magic bytes
//! - `members.rs` - Member listing with common-root stripping
//! - `extract/` - Scratch unpacking and placement, per-format readers
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `investigation.rs` - Investigation file rules per dataset kind
//! - `sniff.rs` - Upload type detection
//! - `dataset.rs` - Ingestion, composite listing and peek
//! - `datatype.rs` - Host-facing entry point with injected logging
//! - `config.rs` - Layered configuration

pub use config::IsaConfig;
pub use dataset::{
    CompositeEntry, DatasetPeek, IsaDataset, composite_listing, infer_primary_filename, ingest,
    primary_filename,
};
pub use datatype::IsaDatatype;
pub use error::{Error, Result};
pub use extract::{Placement, extract, extract_to_tempdir, extract_with_placement};
pub use format::{ArchiveFormat, detect_format};
pub use investigation::{
    DatasetKind, InvestigationMatch, find_investigation, infer_investigation, locate_investigation,
};
pub use members::{list_members, strip_common_root};
pub use options::ExtractOptions;
pub use sanitize::sanitize_entry_path;
pub use sniff::{is_isa_archive, sniff_kind};

pub mod config;
pub mod dataset;
mod datatype;
mod error;
pub mod extract;
pub mod format;
pub mod investigation;
mod members;
pub mod options;
mod sanitize;
mod sniff;
