use crate::cli::Precision;
use protnerf::engine::config::ReconstructionConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// `None` selects the bundled standard templates.
    pub templates_path: Option<PathBuf>,
    pub input_degrees: bool,
    pub precision: Precision,
    pub core_config: ReconstructionConfig,
}
