use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::investigation::{DatasetKind, infer_investigation};
use crate::members::list_members;

/// Whether the file at `path` is an ISA archive of either kind.
pub fn is_isa_archive(path: impl AsRef<Path>) -> bool {
    sniff_kind(path).is_some()
}

/// The kind of ISA archive at `path`, if it is one.
///
/// Unreadable files, unsupported containers and corrupt archives are all
/// simply "not ISA".
pub fn sniff_kind(path: impl AsRef<Path>) -> Option<DatasetKind> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "checking for an ISA archive");

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot open candidate file");
            return None;
        }
    };

    let members = match list_members(BufReader::new(file)) {
        Ok(members) => members,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "not a readable archive");
            return None;
        }
    };

    infer_investigation(&members, None).map(|(kind, _)| kind)
}
