use crate::core::utils::identifiers::{amino_acid_from_one_letter, amino_acid_from_three_letter};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // ALA
    Glycine,    // GLY
    Isoleucine, // ILE
    Leucine,    // LEU
    Proline,    // PRO
    Valine,     // VAL

    // --- Aromatic ---
    Phenylalanine, // PHE
    Tryptophan,    // TRP
    Tyrosine,      // TYR

    // --- Polar, Uncharged ---
    Asparagine, // ASN
    Cysteine,   // CYS
    Glutamine,  // GLN
    Serine,     // SER
    Threonine,  // THR
    Methionine, // MET

    // --- Positively Charged ---
    Arginine,  // ARG
    Histidine, // HIS
    Lysine,    // LYS

    // --- Negatively Charged ---
    AsparticAcid, // ASP
    GlutamicAcid, // GLU
}

impl AminoAcid {
    pub const ALL: [AminoAcid; 20] = [
        AminoAcid::Alanine,
        AminoAcid::Glycine,
        AminoAcid::Isoleucine,
        AminoAcid::Leucine,
        AminoAcid::Proline,
        AminoAcid::Valine,
        AminoAcid::Phenylalanine,
        AminoAcid::Tryptophan,
        AminoAcid::Tyrosine,
        AminoAcid::Asparagine,
        AminoAcid::Cysteine,
        AminoAcid::Glutamine,
        AminoAcid::Serine,
        AminoAcid::Threonine,
        AminoAcid::Methionine,
        AminoAcid::Arginine,
        AminoAcid::Histidine,
        AminoAcid::Lysine,
        AminoAcid::AsparticAcid,
        AminoAcid::GlutamicAcid,
    ];

    pub fn three_letter_code(self) -> &'static str {
        match self {
            AminoAcid::Alanine => "ALA",
            AminoAcid::Glycine => "GLY",
            AminoAcid::Isoleucine => "ILE",
            AminoAcid::Leucine => "LEU",
            AminoAcid::Proline => "PRO",
            AminoAcid::Valine => "VAL",
            AminoAcid::Phenylalanine => "PHE",
            AminoAcid::Tryptophan => "TRP",
            AminoAcid::Tyrosine => "TYR",
            AminoAcid::Asparagine => "ASN",
            AminoAcid::Cysteine => "CYS",
            AminoAcid::Glutamine => "GLN",
            AminoAcid::Serine => "SER",
            AminoAcid::Threonine => "THR",
            AminoAcid::Methionine => "MET",
            AminoAcid::Arginine => "ARG",
            AminoAcid::Histidine => "HIS",
            AminoAcid::Lysine => "LYS",
            AminoAcid::AsparticAcid => "ASP",
            AminoAcid::GlutamicAcid => "GLU",
        }
    }

    pub fn one_letter_code(self) -> char {
        match self {
            AminoAcid::Alanine => 'A',
            AminoAcid::Glycine => 'G',
            AminoAcid::Isoleucine => 'I',
            AminoAcid::Leucine => 'L',
            AminoAcid::Proline => 'P',
            AminoAcid::Valine => 'V',
            AminoAcid::Phenylalanine => 'F',
            AminoAcid::Tryptophan => 'W',
            AminoAcid::Tyrosine => 'Y',
            AminoAcid::Asparagine => 'N',
            AminoAcid::Cysteine => 'C',
            AminoAcid::Glutamine => 'Q',
            AminoAcid::Serine => 'S',
            AminoAcid::Threonine => 'T',
            AminoAcid::Methionine => 'M',
            AminoAcid::Arginine => 'R',
            AminoAcid::Histidine => 'H',
            AminoAcid::Lysine => 'K',
            AminoAcid::AsparticAcid => 'D',
            AminoAcid::GlutamicAcid => 'E',
        }
    }

    /// Parses a sequence of one-letter codes such as `"MKTAYIAK"`.
    pub fn parse_sequence(sequence: &str) -> Result<Vec<AminoAcid>, ParseResidueError> {
        sequence
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                amino_acid_from_one_letter(c).ok_or_else(|| ParseResidueError(c.to_string()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown residue code '{0}'")]
pub struct ParseResidueError(pub String);

impl FromStr for AminoAcid {
    type Err = ParseResidueError;

    /// Accepts three-letter (`"ALA"`) or one-letter (`"A"`) codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let parsed = match (chars.next(), chars.next()) {
            (Some(c), None) => amino_acid_from_one_letter(c),
            _ => amino_acid_from_three_letter(trimmed),
        };
        parsed.ok_or_else(|| ParseResidueError(s.to_string()))
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.three_letter_code())
    }
}

impl<'de> Deserialize<'de> for AminoAcid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}
