use super::load_registry;
use crate::cli::{BuildArgs, Precision};
use crate::config::builder::build_config;
use crate::error::Result;
use crate::io::{self, ChainTable};
use crate::utils::progress::CliProgressHandler;
use nalgebra::RealField;
use protnerf::core::models::chain::ChainInput;
use protnerf::core::topology::registry::TemplateRegistry;
use protnerf::engine::config::ReconstructionConfig;
use protnerf::engine::progress::ProgressReporter;
use protnerf::workflows::batch;
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: BuildArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_config(&args)?;

    let registry = load_registry(app.templates_path.as_deref())?;

    info!("Loading angle table from {:?}", &app.input_path);
    let tables = io::read_angle_table(&app.input_path, app.input_degrees)?;
    let residues: usize = tables.iter().map(|t| t.rows.len()).sum();
    println!(
        "Reconstructing {} chain(s), {} residue(s) in {:?} precision...",
        tables.len(),
        residues,
        app.precision
    );

    let written = match app.precision {
        Precision::F32 => {
            reconstruct_and_write::<f32>(&tables, &registry, &app.core_config, &app.output_path)?
        }
        Precision::F64 => {
            reconstruct_and_write::<f64>(&tables, &registry, &app.core_config, &app.output_path)?
        }
    };

    println!(
        "✓ {} atom(s) written to: {}",
        written,
        app.output_path.display()
    );
    Ok(())
}

/// Reconstructs every chain and writes the coordinates only if all chains succeed.
fn reconstruct_and_write<T>(
    tables: &[ChainTable],
    registry: &TemplateRegistry,
    config: &ReconstructionConfig,
    output: &Path,
) -> Result<usize>
where
    T: RealField + Copy + Send + Sync + Into<f64>,
{
    let inputs: Vec<ChainInput<T>> = tables.iter().map(|table| table.to_input()).collect();

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the batch reconstruction workflow...");
    let result = batch::run(&inputs, registry, config, &reporter);
    info!(
        "Workflow finished: {} succeeded, {} failed.",
        result.succeeded(),
        result.failed()
    );

    if progress_handler.failures() > 0 {
        warn!(
            "{} chain(s) failed; no coordinates will be written.",
            progress_handler.failures()
        );
    }
    let chains = result.into_all()?;

    info!("Writing coordinates to {:?}", output);
    io::write_coordinates(output, &chains)
}
