#![allow(dead_code)]

use std::io::{Cursor, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Zip with the given entries; names ending in `/` become directory entries.
pub fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Gzip-compressed tar with the given entries; names ending in `/` become
/// directory entries.
pub fn tar_gz_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_mode(0o644);
        if name.ends_with('/') {
            header.set_entry_type(tar::EntryType::Directory);
            header.set_size(0);
            builder
                .append_data(&mut header, name, std::io::empty())
                .unwrap();
        } else {
            header.set_entry_type(tar::EntryType::Regular);
            header.set_size(content.len() as u64);
            builder
                .append_data(&mut header, name, content.as_bytes())
                .unwrap();
        }
    }
    builder.into_inner().unwrap().finish().unwrap()
}

pub const TAB_DATASET: &[(&str, &str)] = &[
    ("data/", ""),
    ("data/i_investigation.txt", "Investigation Identifier\tBII-I-1\n"),
    ("data/s_study.txt", "Source Name\tSample Name\n"),
    ("data/a_assay.txt", "Sample Name\tAssay Name\n"),
];

pub const JSON_DATASET: &[(&str, &str)] = &[("isa.json", r#"{"identifier": "BII-I-1"}"#)];
