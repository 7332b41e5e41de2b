use super::config::BondLengths;
use crate::core::models::chain::ReconstructedChain;
use crate::core::utils::geometry::distance;
use nalgebra::{Point3, RealField};
use thiserror::Error;

/// Largest spread, in angstroms, below which a multi-atom output counts as collapsed.
pub const COLLAPSE_TOLERANCE: f64 = 1e-6;
/// Allowed drift of a backbone bond from its configured length, in angstroms.
pub const BOND_LENGTH_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ValidationError {
    #[error("Atom {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("All atoms collapsed onto a single point")]
    Collapsed,

    #[error("Bond ending at atom {index} is {found:.4} Å long, expected {expected:.4} Å")]
    BondLengthDeviation {
        index: usize,
        expected: f64,
        found: f64,
    },
}

pub fn check_finite<T: RealField + Copy>(positions: &[Point3<T>]) -> Result<(), ValidationError> {
    match positions
        .iter()
        .position(|p| p.iter().any(|v| !v.is_finite()))
    {
        Some(index) => Err(ValidationError::NonFinite { index }),
        None => Ok(()),
    }
}

/// Fails when two or more atoms were emitted and all of them coincide.
pub fn check_not_collapsed<T: RealField + Copy>(
    positions: &[Point3<T>],
) -> Result<(), ValidationError> {
    let Some((first, rest)) = positions.split_first() else {
        return Ok(());
    };
    if rest.is_empty() {
        return Ok(());
    }
    let tolerance: T = nalgebra::convert(COLLAPSE_TOLERANCE);
    if rest.iter().all(|p| distance(first, p) <= tolerance) {
        Err(ValidationError::Collapsed)
    } else {
        Ok(())
    }
}

/// Compares every `N-CA`, `CA-C` and inter-residue `C-N` bond with `expected`.
pub fn check_backbone_bond_lengths<T: RealField + Copy>(
    chain: &ReconstructedChain<T>,
    expected: &BondLengths,
    tolerance: f64,
) -> Result<(), ValidationError> {
    let mut previous: Option<(&str, usize, usize)> = None;

    for (index, (site, position)) in chain.atoms().enumerate() {
        let name = site.name.as_str();
        if !matches!(name, "N" | "CA" | "C") {
            continue;
        }

        if let Some((prev_name, prev_residue, prev_index)) = previous {
            let bond = match (prev_name, name) {
                ("N", "CA") if prev_residue == site.residue_index => Some(expected.n_ca),
                ("CA", "C") if prev_residue == site.residue_index => Some(expected.ca_c),
                ("C", "N") if prev_residue + 1 == site.residue_index => Some(expected.c_n),
                _ => None,
            };
            if let Some(expected) = bond {
                let found = distance(&chain.positions[prev_index], position);
                let found: f64 = nalgebra::try_convert(found).unwrap_or(f64::NAN);
                if !((found - expected).abs() <= tolerance) {
                    return Err(ValidationError::BondLengthDeviation {
                        index,
                        expected,
                        found,
                    });
                }
            }
        }

        previous = Some((name, site.residue_index, index));
    }

    Ok(())
}

/// Runs every check with the default tolerances.
pub fn validate<T: RealField + Copy>(
    chain: &ReconstructedChain<T>,
    expected: &BondLengths,
) -> Result<(), ValidationError> {
    check_finite(&chain.positions)?;
    check_not_collapsed(&chain.positions)?;
    check_backbone_bond_lengths(chain, expected, BOND_LENGTH_TOLERANCE)
}
