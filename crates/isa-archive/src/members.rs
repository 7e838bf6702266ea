use std::io::{Read, Seek};

use crate::error::{Error, Result};
use crate::extract;
use crate::format::{ArchiveFormat, detect_format};

/// List the member paths of an archive without unpacking it.
///
/// Names come back with any common root folder removed, so archives made by
/// compressing a single folder list the same way as flat ones.
pub fn list_members<R: Read + Seek>(mut reader: R) -> Result<Vec<String>> {
    let format = detect_format(&mut reader)?;
    if !format.is_extractable() {
        return Err(Error::UnsupportedFormat { format });
    }

    let raw = extract::member_names(format, reader)?;
    let members = strip_common_root(raw);
    tracing::debug!(%format, count = members.len(), "listed archive members");
    Ok(members)
}

/// Drop the redundant top-level folder from a member list.
///
/// The root is the first entry's leading segment. It is stripped when
/// something is nested under it and either the folder itself is listed
/// (`root` or `root/`, depending on the container) or every entry lives
/// under it.
pub fn strip_common_root(names: Vec<String>) -> Vec<String> {
    let names: Vec<String> = names
        .into_iter()
        .map(|name| match name.strip_prefix("./") {
            Some(rest) => rest.to_owned(),
            None => name,
        })
        .filter(|name| !name.is_empty())
        .collect();

    let Some(root) = names.first().and_then(|first| first.split('/').next()) else {
        return names;
    };
    if root.is_empty() {
        return names;
    }
    let root = root.to_owned();
    let prefix = format!("{root}/");

    let is_root = |name: &str| name == root || name == prefix;
    let nested = names
        .iter()
        .any(|name| name.len() > prefix.len() && name.starts_with(&prefix));
    let listed = names.iter().any(|name| is_root(name));
    let shared = names
        .iter()
        .all(|name| is_root(name) || name.starts_with(&prefix));

    if !nested || !(listed || shared) {
        return names;
    }

    tracing::trace!(root = %root, "stripping common root from member names");
    names
        .iter()
        .filter(|name| !is_root(name))
        .map(|name| match name.strip_prefix(&prefix) {
            Some(rest) => rest.to_owned(),
            None => name.clone(),
        })
        .collect()
}
