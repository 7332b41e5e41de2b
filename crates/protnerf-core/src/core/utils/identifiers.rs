use crate::core::models::residue::AminoAcid;
use phf::{Map, Set, phf_map, phf_set};

static BACKBONE_ANCHOR_NAMES: Set<&'static str> = phf_set! {
    "C-", "N", "CA", "C",
};

static THREE_LETTER_CODES: Map<&'static str, AminoAcid> = phf_map! {
    "ALA" => AminoAcid::Alanine,
    "ARG" => AminoAcid::Arginine,
    "ASN" => AminoAcid::Asparagine,
    "ASP" => AminoAcid::AsparticAcid,
    "CYS" => AminoAcid::Cysteine,
    "GLN" => AminoAcid::Glutamine,
    "GLU" => AminoAcid::GlutamicAcid,
    "GLY" => AminoAcid::Glycine,
    "HIS" => AminoAcid::Histidine,
    "ILE" => AminoAcid::Isoleucine,
    "LEU" => AminoAcid::Leucine,
    "LYS" => AminoAcid::Lysine,
    "MET" => AminoAcid::Methionine,
    "PHE" => AminoAcid::Phenylalanine,
    "PRO" => AminoAcid::Proline,
    "SER" => AminoAcid::Serine,
    "THR" => AminoAcid::Threonine,
    "TRP" => AminoAcid::Tryptophan,
    "TYR" => AminoAcid::Tyrosine,
    "VAL" => AminoAcid::Valine,
};

static ONE_LETTER_CODES: Map<char, AminoAcid> = phf_map! {
    'A' => AminoAcid::Alanine,
    'R' => AminoAcid::Arginine,
    'N' => AminoAcid::Asparagine,
    'D' => AminoAcid::AsparticAcid,
    'C' => AminoAcid::Cysteine,
    'Q' => AminoAcid::Glutamine,
    'E' => AminoAcid::GlutamicAcid,
    'G' => AminoAcid::Glycine,
    'H' => AminoAcid::Histidine,
    'I' => AminoAcid::Isoleucine,
    'L' => AminoAcid::Leucine,
    'K' => AminoAcid::Lysine,
    'M' => AminoAcid::Methionine,
    'F' => AminoAcid::Phenylalanine,
    'P' => AminoAcid::Proline,
    'S' => AminoAcid::Serine,
    'T' => AminoAcid::Threonine,
    'W' => AminoAcid::Tryptophan,
    'Y' => AminoAcid::Tyrosine,
    'V' => AminoAcid::Valine,
};

/// True for the names a side-chain template may use to refer to backbone
/// atoms: `N`, `CA`, `C` of the current residue and `C-` for the preceding
/// residue's carbonyl carbon.
pub fn is_backbone_anchor(atom_name: &str) -> bool {
    BACKBONE_ANCHOR_NAMES.contains(atom_name.trim())
}

/// Looks up a three-letter residue code, ignoring case and surrounding whitespace.
pub fn amino_acid_from_three_letter(code: &str) -> Option<AminoAcid> {
    let code = code.trim();
    if code.len() != 3 {
        return None;
    }
    THREE_LETTER_CODES.get(code.to_ascii_uppercase().as_str()).copied()
}

/// Looks up a one-letter residue code, ignoring case.
pub fn amino_acid_from_one_letter(code: char) -> Option<AminoAcid> {
    ONE_LETTER_CODES.get(&code.to_ascii_uppercase()).copied()
}
