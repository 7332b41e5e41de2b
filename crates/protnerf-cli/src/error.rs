use protnerf::core::models::residue::ParseResidueError;
use protnerf::core::topology::registry::TemplateLoadError;
use protnerf::engine::error::ReconstructionError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Reconstruction(#[from] ReconstructionError),

    #[error("Template error: {0}")]
    Templates(#[from] TemplateLoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write file '{path}': {source}", path = path.display())]
    FileWriting {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Row {row} of the input table: {source}")]
    Residue {
        row: usize,
        #[source]
        source: ParseResidueError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
