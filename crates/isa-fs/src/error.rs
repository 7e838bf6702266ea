use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to move '{from}' to '{to}': {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create staging directory under '{root}': {source}")]
    Staging {
        root: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
