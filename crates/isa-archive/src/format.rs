//! Container detection from leading magic bytes.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

/// Container format of an uploaded archive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// Gzip stream, unpacked as a tar archive.
    Gzip,
    /// Recognized, but no extraction routine exists for it.
    Bzip2,
    Zip,
    Unknown,
}

/// Known magic prefixes.
pub const SIGNATURES: &[(&[u8], ArchiveFormat)] = &[
    (&[0x1F, 0x8B, 0x08], ArchiveFormat::Gzip),
    (&[0x42, 0x5A, 0x68], ArchiveFormat::Bzip2),
    (&[0x50, 0x4B, 0x03, 0x04], ArchiveFormat::Zip),
];

/// Number of bytes read by [`detect_format`], the longest known prefix.
pub const PREFIX_LEN: usize = 4;

impl ArchiveFormat {
    /// Look `data` up in [`SIGNATURES`]; the longest matching prefix wins.
    pub fn from_prefix(data: &[u8]) -> Self {
        SIGNATURES
            .iter()
            .filter(|(magic, _)| data.starts_with(magic))
            .max_by_key(|(magic, _)| magic.len())
            .map(|(_, format)| *format)
            .unwrap_or(Self::Unknown)
    }

    /// Whether this build can list and unpack the format.
    pub fn is_extractable(self) -> bool {
        match self {
            Self::Gzip => cfg!(feature = "tar"),
            Self::Zip => cfg!(feature = "zip"),
            Self::Bzip2 | Self::Unknown => false,
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Zip => "zip",
            Self::Unknown => "unknown",
        })
    }
}

/// Detect the container of `reader` from its next [`PREFIX_LEN`] bytes.
///
/// The stream is always put back at the offset it had on entry, so it can be
/// read in full afterwards. Streams shorter than the prefix are fine and
/// simply come back as `Unknown`; only I/O failures are errors.
pub fn detect_format<R: Read + Seek>(reader: &mut R) -> io::Result<ArchiveFormat> {
    let start = reader.stream_position()?;

    let mut prefix = Vec::with_capacity(PREFIX_LEN);
    let read = reader.by_ref().take(PREFIX_LEN as u64).read_to_end(&mut prefix);
    reader.seek(SeekFrom::Start(start))?;
    read?;

    let format = ArchiveFormat::from_prefix(&prefix);
    tracing::debug!(%format, offset = start, "detected archive container");
    Ok(format)
}
