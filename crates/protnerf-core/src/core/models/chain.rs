use super::internal::InternalCoordinates;
use super::residue::AminoAcid;
use nalgebra::{Point3, RealField};

/// A chain to reconstruct.
///
/// `sequence` and `angles` may both be padded past the real chain; only the
/// first `length` residues are reconstructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainInput<T: RealField + Copy> {
    pub id: String,
    pub sequence: Vec<AminoAcid>,
    pub angles: InternalCoordinates<T>,
    pub length: usize,
}

impl<T: RealField + Copy> ChainInput<T> {
    /// A chain whose real length is the full sequence length.
    pub fn new(id: &str, sequence: Vec<AminoAcid>, angles: InternalCoordinates<T>) -> Self {
        let length = sequence.len();
        Self {
            id: id.to_string(),
            sequence,
            angles,
            length,
        }
    }

    /// Sets the padding boundary: residues at or past `length` contribute no atoms.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }
}

/// Label of one emitted atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomSite {
    pub residue_index: usize,
    pub residue_type: AminoAcid,
    pub name: String,
}

/// Reconstructed coordinates of a chain, in emission order.
///
/// `positions[k]` belongs to `sites[k]`. Within a residue the order is `N`,
/// `CA`, `C`, then the side-chain atoms in template order; residues follow
/// sequence order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedChain<T: RealField + Copy> {
    pub id: String,
    pub positions: Vec<Point3<T>>,
    pub sites: Vec<AtomSite>,
}

impl<T: RealField + Copy> ReconstructedChain<T> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions paired with their labels.
    pub fn atoms(&self) -> impl Iterator<Item = (&AtomSite, &Point3<T>)> {
        self.sites.iter().zip(self.positions.iter())
    }

    /// Position of `name` in residue `residue_index`, if it was emitted.
    pub fn find(&self, residue_index: usize, name: &str) -> Option<&Point3<T>> {
        self.atoms()
            .find(|(site, _)| site.residue_index == residue_index && site.name == name)
            .map(|(_, position)| position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::internal::ANGLES_PER_RESIDUE;

    #[test]
    fn new_uses_sequence_length_as_real_length() {
        let angles = InternalCoordinates::new(vec![[0.0f64; ANGLES_PER_RESIDUE]; 3]);
        let chain = ChainInput::new(
            "1abc_A",
            vec![AminoAcid::Alanine, AminoAcid::Glycine, AminoAcid::Serine],
            angles,
        );
        assert_eq!(chain.id, "1abc_A");
        assert_eq!(chain.length, 3);
    }

    #[test]
    fn with_length_sets_padding_boundary() {
        let angles = InternalCoordinates::new(vec![[0.0f32; ANGLES_PER_RESIDUE]; 4]);
        let chain = ChainInput::new("x", vec![AminoAcid::Alanine; 4], angles).with_length(2);
        assert_eq!(chain.length, 2);
        assert_eq!(chain.sequence.len(), 4);
    }

    #[test]
    fn find_locates_atom_by_residue_and_name() {
        let site = |residue_index: usize, name: &str| AtomSite {
            residue_index,
            residue_type: AminoAcid::Alanine,
            name: name.to_string(),
        };
        let chain = ReconstructedChain {
            id: "x".to_string(),
            positions: vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0)],
            sites: vec![site(0, "N"), site(1, "CA")],
        };
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.find(1, "CA"), Some(&Point3::new(1.0, 2.0, 3.0)));
        assert_eq!(chain.find(0, "CA"), None);
    }
}
