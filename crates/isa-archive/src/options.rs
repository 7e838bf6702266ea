use std::path::PathBuf;

/// Name the host gives the uploaded container when it is kept next to the
/// extracted files.
pub const DEFAULT_ARCHIVE_FILE_NAME: &str = "archive";

/// Metadata folder macOS adds to zip files.
pub const MACOS_METADATA_DIR: &str = "__MACOSX";

pub const DEFAULT_SCRATCH_PREFIX: &str = "isa-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub scratch_root: Option<PathBuf>,
    pub scratch_prefix: String,
    pub ignored_entries: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            scratch_root: None,
            scratch_prefix: DEFAULT_SCRATCH_PREFIX.to_string(),
            ignored_entries: vec![
                DEFAULT_ARCHIVE_FILE_NAME.to_string(),
                MACOS_METADATA_DIR.to_string(),
            ],
        }
    }
}

impl ExtractOptions {
    /// Directory under which scratch directories are created.
    pub fn scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    pub fn scratch_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.scratch_prefix = prefix.into();
        self
    }

    /// Skip a top-level entry name when placing extracted files.
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.ignored_entries.contains(&name) {
            self.ignored_entries.push(name);
        }
        self
    }

    pub(crate) fn workspace(&self) -> isa_fs::Result<isa_fs::Workspace> {
        match &self.scratch_root {
            Some(root) => isa_fs::Workspace::new_in(root, &self.scratch_prefix),
            None => isa_fs::Workspace::new(&self.scratch_prefix),
        }
    }

    pub(crate) fn tempdir(&self) -> std::io::Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(&self.scratch_prefix);
        match &self.scratch_root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
    }
}
