use super::reconstruct;
use crate::core::models::chain::{ChainInput, ReconstructedChain};
use crate::core::topology::registry::TemplateRegistry;
use crate::engine::config::ReconstructionConfig;
use crate::engine::error::ReconstructionError;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::RealField;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub type ChainResult<T> = Result<ReconstructedChain<T>, ReconstructionError>;

/// Per-chain outcomes of a batch, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult<T: RealField + Copy> {
    pub chains: Vec<ChainResult<T>>,
}

impl<T: RealField + Copy> BatchResult<T> {
    pub fn succeeded(&self) -> usize {
        self.chains.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.chains.len() - self.succeeded()
    }

    /// Fails with the first error in input order, otherwise returns every chain.
    pub fn into_all(self) -> Result<Vec<ReconstructedChain<T>>, ReconstructionError> {
        self.chains.into_iter().collect()
    }
}

/// Reconstructs independent chains, in parallel when the `parallel` feature is on.
///
/// A failing chain does not abort the others.
#[instrument(skip_all, name = "batch_workflow", fields(chains = chains.len()))]
pub fn run<T>(
    chains: &[ChainInput<T>],
    registry: &TemplateRegistry,
    config: &ReconstructionConfig,
    reporter: &ProgressReporter,
) -> BatchResult<T>
where
    T: RealField + Copy + Send + Sync,
{
    reporter.report(Progress::BatchStart {
        total_chains: chains.len() as u64,
    });
    info!("Reconstructing {} chains.", chains.len());

    #[cfg(not(feature = "parallel"))]
    let iterator = chains.iter();

    #[cfg(feature = "parallel")]
    let iterator = chains.par_iter();

    let results: Vec<ChainResult<T>> = iterator
        .map(|chain| {
            let result = reconstruct::run(chain, registry, config);
            match &result {
                Ok(out) => reporter.report(Progress::ChainFinished {
                    id: chain.id.clone(),
                    atoms: out.len(),
                }),
                Err(e) => {
                    warn!(chain = %chain.id, error = %e, "Chain reconstruction failed");
                    reporter.report(Progress::ChainFailed {
                        id: chain.id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
            result
        })
        .collect();

    let batch = BatchResult { chains: results };
    if batch.failed() > 0 {
        reporter.report(Progress::Message(format!(
            "{} of {} chains failed",
            batch.failed(),
            batch.chains.len()
        )));
    }
    reporter.report(Progress::BatchFinish);

    info!(
        succeeded = batch.succeeded(),
        failed = batch.failed(),
        "Batch reconstruction finished."
    );
    batch
}
