//! Layered configuration: defaults, then an optional TOML file, then
//! `ISA_ARCHIVE_*` environment variables.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::options::{
    DEFAULT_ARCHIVE_FILE_NAME, DEFAULT_SCRATCH_PREFIX, ExtractOptions, MACOS_METADATA_DIR,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsaConfig {
    /// Where scratch directories go; the system temp dir when unset.
    pub scratch_root: Option<PathBuf>,
    pub scratch_prefix: String,
    /// Reserved name of the stored container file, never treated as content.
    pub archive_file_name: String,
    pub ignored_entries: Vec<String>,
}

impl Default for IsaConfig {
    fn default() -> Self {
        Self {
            scratch_root: None,
            scratch_prefix: DEFAULT_SCRATCH_PREFIX.to_string(),
            archive_file_name: DEFAULT_ARCHIVE_FILE_NAME.to_string(),
            ignored_entries: vec![MACOS_METADATA_DIR.to_string()],
        }
    }
}

impl IsaConfig {
    pub const ENV_PREFIX: &'static str = "ISA_ARCHIVE_";

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let config = figment.merge(Env::prefixed(Self::ENV_PREFIX)).extract()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml))
            .extract()?)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions {
            scratch_root: self.scratch_root.clone(),
            scratch_prefix: self.scratch_prefix.clone(),
            ignored_entries: Vec::new(),
        };
        options = options.ignore(self.archive_file_name.clone());
        for name in &self.ignored_entries {
            options = options.ignore(name.clone());
        }
        options
    }
}
