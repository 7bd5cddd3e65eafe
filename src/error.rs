use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PycompgenError {
    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write completion file '{path}': {source}")]
    CacheWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine {0} directory")]
    DirectoryUnavailable(&'static str),
}

pub type Result<T> = std::result::Result<T, PycompgenError>;
