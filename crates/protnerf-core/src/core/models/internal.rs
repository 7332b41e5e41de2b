use nalgebra::RealField;
use thiserror::Error;

pub const PHI: usize = 0;
pub const PSI: usize = 1;
pub const OMEGA: usize = 2;
pub const N_CA_C: usize = 3;
pub const CA_C_N: usize = 4;
pub const C_N_CA: usize = 5;
pub const CHI_START: usize = 6;

pub const NUM_SIDECHAIN_DIHEDRALS: usize = 5;
pub const ANGLES_PER_RESIDUE: usize = CHI_START + NUM_SIDECHAIN_DIHEDRALS;

/// One residue's internal coordinates, in radians.
///
/// Layout: `[phi, psi, omega, N-CA-C, CA-C-N, C-N-CA, chi1, chi2, chi3, chi4, chi5]`.
/// The two peptide-bond angles (`CA-C-N`, `C-N-CA`) of residue `i` describe the
/// bond joining residue `i - 1` to residue `i`. Unused slots hold `0`.
pub type AngleRow<T> = [T; ANGLES_PER_RESIDUE];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Row {row} has {found} angles, expected {expected}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Flat table of {len} values cannot be split into rows of {width}")]
    RaggedFlatTable { len: usize, width: usize },
}

/// The fixed-width internal coordinate table of a chain, one row per residue.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalCoordinates<T: RealField + Copy> {
    rows: Vec<AngleRow<T>>,
}

impl<T: RealField + Copy> InternalCoordinates<T> {
    pub fn new(rows: Vec<AngleRow<T>>) -> Self {
        Self { rows }
    }

    /// Builds a table from variable-length rows, rejecting any row whose width
    /// is not [`ANGLES_PER_RESIDUE`].
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, ShapeError> {
        rows.iter()
            .enumerate()
            .map(|(row, values)| {
                let values = values.as_ref();
                <AngleRow<T>>::try_from(values).map_err(|_| ShapeError::WidthMismatch {
                    row,
                    expected: ANGLES_PER_RESIDUE,
                    found: values.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Builds a table from a row-major flat buffer of declared `width`.
    pub fn from_flat(values: &[T], width: usize) -> Result<Self, ShapeError> {
        if width != ANGLES_PER_RESIDUE {
            return Err(ShapeError::WidthMismatch {
                row: 0,
                expected: ANGLES_PER_RESIDUE,
                found: width,
            });
        }
        if values.len() % width != 0 {
            return Err(ShapeError::RaggedFlatTable {
                len: values.len(),
                width,
            });
        }
        let rows: Vec<&[T]> = values.chunks_exact(width).collect();
        Self::from_rows(&rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&AngleRow<T>> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[AngleRow<T>] {
        &self.rows
    }

    /// Side-chain dihedral `slot` (0-based, `chi1` is slot 0) of residue `index`.
    pub fn chi(&self, index: usize, slot: usize) -> Option<T> {
        if slot >= NUM_SIDECHAIN_DIHEDRALS {
            return None;
        }
        self.rows.get(index).map(|row| row[CHI_START + slot])
    }
}
