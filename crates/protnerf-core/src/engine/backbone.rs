use super::config::ReconstructionConfig;
use super::frame::{BackboneFrame, ResidueBackbone};
use crate::core::models::internal::{AngleRow, CA_C_N, C_N_CA, N_CA_C, OMEGA, PHI, PSI};
use crate::core::nerf::{Placement, place_atom};
use crate::core::utils::geometry::to_real;
use nalgebra::{Point3, RealField, Vector3};

/// Backbone settings converted once into the working precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackboneGeometry<T: RealField + Copy> {
    pub n_ca: T,
    pub ca_c: T,
    pub c_n: T,
    pub epsilon: T,
    pub seed_c_n_ca_angle: T,
    pub seed_preceding_dihedral: T,
}

impl<T: RealField + Copy> BackboneGeometry<T> {
    pub fn from_config(config: &ReconstructionConfig) -> Self {
        Self {
            n_ca: to_real(config.bond_lengths.n_ca),
            ca_c: to_real(config.bond_lengths.ca_c),
            c_n: to_real(config.bond_lengths.c_n),
            epsilon: to_real(config.epsilon),
            seed_c_n_ca_angle: to_real(config.seed.c_n_ca_angle),
            seed_preceding_dihedral: to_real(config.seed.preceding_dihedral),
        }
    }
}

/// Places the first residue's backbone in a fixed reference orientation.
///
/// `N` sits at the origin, `CA` on the +x axis and `C` in the xy-plane at the
/// residue's `N-CA-C` angle. The synthetic preceding carbon is placed from these
/// three atoms with the seed geometry.
pub fn seed<T: RealField + Copy>(
    row: &AngleRow<T>,
    geometry: &BackboneGeometry<T>,
) -> (ResidueBackbone<T>, BackboneFrame<T>) {
    let n = Point3::origin();
    let ca = Point3::new(geometry.n_ca, T::zero(), T::zero());
    let exterior = T::pi() - row[N_CA_C];
    let c = ca + Vector3::new(exterior.cos(), exterior.sin(), T::zero()) * geometry.ca_c;

    let preceding_carbon = place_atom(
        &c,
        &ca,
        &n,
        &Placement::new(
            geometry.c_n,
            geometry.seed_c_n_ca_angle,
            geometry.seed_preceding_dihedral,
        ),
        geometry.epsilon,
    );

    (
        ResidueBackbone {
            preceding_carbon,
            n,
            ca,
            c,
        },
        BackboneFrame::new(n, ca, c),
    )
}

/// Places `N`, `CA` and `C` of the next residue.
///
/// The dihedrals placing `N` and `CA` are the preceding residue's `psi` and
/// `omega`; the peptide bond angles and `phi` come from the current row.
pub fn extend<T: RealField + Copy>(
    frame: &mut BackboneFrame<T>,
    previous: &AngleRow<T>,
    current: &AngleRow<T>,
    geometry: &BackboneGeometry<T>,
) -> ResidueBackbone<T> {
    let preceding_carbon = frame.recent()[2];
    let eps = geometry.epsilon;

    let n = frame.advance(
        &Placement::new(geometry.c_n, current[CA_C_N], previous[PSI]),
        eps,
    );
    let ca = frame.advance(
        &Placement::new(geometry.n_ca, current[C_N_CA], previous[OMEGA]),
        eps,
    );
    let c = frame.advance(
        &Placement::new(geometry.ca_c, current[N_CA_C], current[PHI]),
        eps,
    );

    ResidueBackbone {
        preceding_carbon,
        n,
        ca,
        c,
    }
}
