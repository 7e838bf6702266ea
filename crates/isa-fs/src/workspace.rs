use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{Error, Result};

/// A scratch directory that disappears when dropped.
///
/// Archives are unpacked here first; only the entries that survive
/// filtering are moved on to their final location.
pub struct Workspace {
    staging: TempDir,
}

impl Workspace {
    /// Create a scratch directory in the system temp location.
    pub fn new(prefix: &str) -> Result<Self> {
        Self::new_in(std::env::temp_dir(), prefix)
    }

    /// Create a scratch directory under `root`, creating `root` if needed.
    pub fn new_in(root: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            std::fs::create_dir_all(root).map_err(|e| Error::Write {
                path: root.to_path_buf(),
                source: e,
            })?;
        }

        let staging = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(root)
            .map_err(|e| Error::Staging {
                root: root.to_path_buf(),
                source: e,
            })?;
        tracing::trace!(path = %staging.path().display(), "created staging directory");

        Ok(Self { staging })
    }

    pub fn path(&self) -> &Path {
        self.staging.path()
    }

    /// Visible immediate children, see [`crate::visible_entries`].
    pub fn visible_children(&self, ignored: &[String]) -> Result<Vec<PathBuf>> {
        crate::visible_entries(self.path(), ignored)
    }

    /// Remove the scratch directory now, reporting failures instead of
    /// swallowing them on drop.
    pub fn close(self) -> Result<()> {
        let path = self.path().to_path_buf();
        self.staging
            .close()
            .map_err(|e| Error::Write { path, source: e })
    }
}
