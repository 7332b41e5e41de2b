pub mod build;
pub mod templates;

use crate::error::Result;
use protnerf::core::topology::registry::TemplateRegistry;
use std::path::Path;
use tracing::info;

/// Loads the template file at `path`, or the bundled standard templates.
pub(crate) fn load_registry(path: Option<&Path>) -> Result<TemplateRegistry> {
    match path {
        Some(path) => {
            info!("Loading residue templates from {:?}", path);
            Ok(TemplateRegistry::load(path)?)
        }
        None => {
            info!("Using bundled standard residue templates.");
            Ok(TemplateRegistry::standard())
        }
    }
}
