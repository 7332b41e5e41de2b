use crate::core::models::chain::{AtomSite, ChainInput, ReconstructedChain};
use crate::core::models::internal::InternalCoordinates;
use crate::core::models::residue::AminoAcid;
use crate::core::topology::registry::{ResidueTemplate, TemplateRegistry};
use crate::engine::backbone::{self, BackboneGeometry};
use crate::engine::config::ReconstructionConfig;
use crate::engine::error::ReconstructionError;
use crate::engine::frame::{BackboneFrame, ResidueBackbone};
use crate::engine::sidechain;
use crate::engine::validation;
use nalgebra::{Point3, RealField};
use tracing::{debug, instrument, trace};

/// Where the assembler stands in the per-residue recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    Initial,
    /// Residue 0's backbone and the synthetic preceding carbon are placed.
    BackboneSeeded,
    /// Residues before `next` are complete.
    Extending {
        next: usize,
    },
    Done,
}

/// Drives the NeRF recurrence over one chain, one transition per [`advance`](Self::advance).
///
/// Every shape and template check runs in [`new`](Self::new), so once an
/// assembler exists it always runs to completion.
pub struct ChainAssembler<'a, T: RealField + Copy> {
    chain: &'a ChainInput<T>,
    templates: Vec<&'a ResidueTemplate>,
    geometry: BackboneGeometry<T>,
    state: AssemblyState,
    frame: BackboneFrame<T>,
    seeded: ResidueBackbone<T>,
    positions: Vec<Point3<T>>,
    sites: Vec<AtomSite>,
}

impl<'a, T: RealField + Copy> ChainAssembler<'a, T> {
    pub fn new(
        chain: &'a ChainInput<T>,
        registry: &'a TemplateRegistry,
        config: &ReconstructionConfig,
    ) -> Result<Self, ReconstructionError> {
        let available = chain.sequence.len().min(chain.angles.len());
        if chain.length > available {
            return Err(ReconstructionError::LengthExceedsInput {
                chain: chain.id.clone(),
                requested: chain.length,
                available,
            });
        }

        let templates = chain.sequence[..chain.length]
            .iter()
            .enumerate()
            .map(|(residue_index, &residue_type)| {
                registry
                    .get(residue_type)
                    .ok_or_else(|| ReconstructionError::MissingTemplate {
                        chain: chain.id.clone(),
                        residue_index,
                        residue_type,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let capacity = 3 * chain.length + templates.iter().map(|t| t.len()).sum::<usize>();
        let origin = Point3::origin();

        Ok(Self {
            chain,
            templates,
            geometry: BackboneGeometry::from_config(config),
            state: AssemblyState::Initial,
            frame: BackboneFrame::new(origin, origin, origin),
            seeded: ResidueBackbone {
                preceding_carbon: origin,
                n: origin,
                ca: origin,
                c: origin,
            },
            positions: Vec::with_capacity(capacity),
            sites: Vec::with_capacity(capacity),
        })
    }

    pub fn state(&self) -> AssemblyState {
        self.state
    }

    /// Number of atoms emitted so far.
    pub fn emitted(&self) -> usize {
        self.positions.len()
    }

    /// Performs one transition and returns the new state. `Done` is terminal.
    pub fn advance(&mut self) -> AssemblyState {
        let chain = self.chain;
        let rows = chain.angles.rows();

        self.state = match self.state {
            AssemblyState::Initial if chain.length == 0 => AssemblyState::Done,
            AssemblyState::Initial => {
                let (bb, frame) = backbone::seed(&rows[0], &self.geometry);
                self.frame = frame;
                self.seeded = bb;
                self.emit_backbone(0, &bb);
                AssemblyState::BackboneSeeded
            }
            AssemblyState::BackboneSeeded => {
                let bb = self.seeded;
                self.emit_side_chain(0, &bb);
                AssemblyState::Extending { next: 1 }
            }
            AssemblyState::Extending { next } if next >= chain.length => AssemblyState::Done,
            AssemblyState::Extending { next } => {
                let bb = backbone::extend(
                    &mut self.frame,
                    &rows[next - 1],
                    &rows[next],
                    &self.geometry,
                );
                self.emit_backbone(next, &bb);
                self.emit_side_chain(next, &bb);
                AssemblyState::Extending { next: next + 1 }
            }
            AssemblyState::Done => AssemblyState::Done,
        };

        trace!(state = ?self.state, atoms = self.positions.len(), "Assembler advanced");
        self.state
    }

    /// Advances until `Done` and returns the emitted coordinates.
    pub fn assemble(mut self) -> ReconstructedChain<T> {
        while self.advance() != AssemblyState::Done {}
        ReconstructedChain {
            id: self.chain.id.clone(),
            positions: self.positions,
            sites: self.sites,
        }
    }

    fn emit_backbone(&mut self, residue_index: usize, bb: &ResidueBackbone<T>) {
        self.emit(residue_index, "N", bb.n);
        self.emit(residue_index, "CA", bb.ca);
        self.emit(residue_index, "C", bb.c);
    }

    fn emit_side_chain(&mut self, residue_index: usize, bb: &ResidueBackbone<T>) {
        let template = self.templates[residue_index];
        let row = &self.chain.angles.rows()[residue_index];
        let placed = sidechain::extend(template, bb, row, self.geometry.epsilon);
        for (atom, position) in template.atoms().iter().zip(placed) {
            self.emit(residue_index, &atom.name, position);
        }
    }

    fn emit(&mut self, residue_index: usize, name: &str, position: Point3<T>) {
        self.positions.push(position);
        self.sites.push(AtomSite {
            residue_index,
            residue_type: self.chain.sequence[residue_index],
            name: name.to_string(),
        });
    }
}

/// Reconstructs the Cartesian coordinates of one chain.
///
/// With [`ReconstructionConfig::validate_output`] set, output holding
/// non-finite or collapsed coordinates is rejected.
#[instrument(
    skip_all,
    name = "reconstruct_chain",
    fields(chain = %chain.id, length = chain.length)
)]
pub fn run<T: RealField + Copy>(
    chain: &ChainInput<T>,
    registry: &TemplateRegistry,
    config: &ReconstructionConfig,
) -> Result<ReconstructedChain<T>, ReconstructionError> {
    let reconstructed = ChainAssembler::new(chain, registry, config)?.assemble();
    debug!(atoms = reconstructed.len(), "Chain reconstructed");

    if config.validate_output {
        validation::check_finite(&reconstructed.positions)
            .and_then(|_| validation::check_not_collapsed(&reconstructed.positions))
            .map_err(|source| ReconstructionError::Validation {
                chain: chain.id.clone(),
                source,
            })?;
    }

    Ok(reconstructed)
}

/// Like [`run`], for angles supplied as a row-major flat buffer of `width` columns.
pub fn run_flat<T: RealField + Copy>(
    id: &str,
    sequence: Vec<AminoAcid>,
    angles: &[T],
    width: usize,
    registry: &TemplateRegistry,
    config: &ReconstructionConfig,
) -> Result<ReconstructedChain<T>, ReconstructionError> {
    let angles = InternalCoordinates::from_flat(angles, width)?;
    run(&ChainInput::new(id, sequence, angles), registry, config)
}
