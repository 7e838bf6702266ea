use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::Dispatch;
use tracing::dispatcher;

use crate::config::IsaConfig;
use crate::dataset::{self, IsaDataset};
use crate::error::Result;
use crate::extract;
use crate::investigation::DatasetKind;
use crate::members;
use crate::options::ExtractOptions;
use crate::sniff;

/// Entry point for a host's datatype registry.
///
/// Every call runs with this instance's [`Dispatch`] as the current
/// subscriber, so the host decides where diagnostics go without touching
/// global logging state.
#[derive(Clone)]
pub struct IsaDatatype {
    config: IsaConfig,
    options: ExtractOptions,
    dispatch: Dispatch,
}

impl IsaDatatype {
    /// Uses whatever subscriber is current at construction time.
    pub fn new(config: IsaConfig) -> Self {
        let dispatch = dispatcher::get_default(Dispatch::clone);
        Self::with_dispatch(config, dispatch)
    }

    pub fn with_dispatch(config: IsaConfig, dispatch: Dispatch) -> Self {
        let options = config.extract_options();
        Self {
            config,
            options,
            dispatch,
        }
    }

    /// Discards all diagnostics.
    pub fn silent(config: IsaConfig) -> Self {
        Self::with_dispatch(config, Dispatch::none())
    }

    pub fn config(&self) -> &IsaConfig {
        &self.config
    }

    pub fn extract_options(&self) -> &ExtractOptions {
        &self.options
    }

    fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    pub fn sniff(&self, path: impl AsRef<Path>) -> bool {
        self.scoped(|| sniff::is_isa_archive(path))
    }

    pub fn sniff_kind(&self, path: impl AsRef<Path>) -> Option<DatasetKind> {
        self.scoped(|| sniff::sniff_kind(path))
    }

    pub fn list_members<R: Read + Seek>(&self, reader: R) -> Result<Vec<String>> {
        self.scoped(|| members::list_members(reader))
    }

    pub fn extract<R: Read + Seek>(&self, reader: R, destination: &Path) -> Result<PathBuf> {
        self.scoped(|| extract::extract(reader, destination, &self.options))
    }

    pub fn extract_to_tempdir<R: Read + Seek>(&self, reader: R) -> Result<TempDir> {
        self.scoped(|| extract::extract_to_tempdir(reader, &self.options))
    }

    pub fn ingest<R: Read + Seek>(
        &self,
        reader: R,
        files_path: &Path,
        primary_file: &Path,
        hint: Option<DatasetKind>,
    ) -> Result<IsaDataset> {
        self.scoped(|| dataset::ingest(reader, files_path, primary_file, hint, &self.options))
    }

    pub fn primary_filename(&self, files_path: &Path, kind: DatasetKind) -> Result<Option<PathBuf>> {
        self.scoped(|| dataset::primary_filename(files_path, kind))
    }
}

impl Default for IsaDatatype {
    fn default() -> Self {
        Self::new(IsaConfig::default())
    }
}

impl std::fmt::Debug for IsaDatatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IsaDatatype")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_follow_config() {
        let config = IsaConfig {
            archive_file_name: "upload.dat".into(),
            ..IsaConfig::default()
        };
        let datatype = IsaDatatype::silent(config);
        assert!(
            datatype
                .extract_options()
                .ignored_entries
                .contains(&"upload.dat".to_string())
        );
    }

    #[test]
    fn silent_datatype_still_sniffs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        assert!(!IsaDatatype::silent(IsaConfig::default()).sniff(&path));
    }
}
