use dlpconf::core::io::dlpoly::{DlpConfigError, OptionsLoadError};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to process CONFIG file '{path}': {source}", path = path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: DlpConfigError,
    },

    #[error(transparent)]
    Options(#[from] OptionsLoadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn config_file(path: impl Into<PathBuf>, source: DlpConfigError) -> Self {
        Self::ConfigFile {
            path: path.into(),
            source,
        }
    }
}
