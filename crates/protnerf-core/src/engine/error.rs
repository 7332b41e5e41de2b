use super::config::ConfigError;
use super::validation::ValidationError;
use crate::core::models::internal::ShapeError;
use crate::core::models::residue::AminoAcid;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ReconstructionError {
    #[error("Malformed internal coordinates: {0}")]
    Shape(#[from] ShapeError),

    #[error(
        "Chain '{chain}' requests {requested} residues but only {available} are available"
    )]
    LengthExceedsInput {
        chain: String,
        requested: usize,
        available: usize,
    },

    #[error("Residue {residue_index} of chain '{chain}' ({residue_type}) has no geometry template")]
    MissingTemplate {
        chain: String,
        residue_index: usize,
        residue_type: AminoAcid,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Chain '{chain}' failed output validation: {source}")]
    Validation {
        chain: String,
        #[source]
        source: ValidationError,
    },
}
