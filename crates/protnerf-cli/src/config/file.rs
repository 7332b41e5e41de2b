use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Backbone bond lengths in angstroms.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileBondLengths {
    pub n_ca: Option<f64>,
    pub ca_c: Option<f64>,
    pub c_n: Option<f64>,
}

/// Geometry of the synthetic carbon preceding the first residue, in degrees.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSeedGeometry {
    pub c_n_ca_angle: Option<f64>,
    pub preceding_dihedral: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub bond_lengths: Option<FileBondLengths>,
    pub epsilon: Option<f64>,
    pub seed: Option<FileSeedGeometry>,
    pub validate_output: Option<bool>,
    pub input_degrees: Option<bool>,
    pub templates_path: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
