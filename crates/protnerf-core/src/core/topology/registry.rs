use crate::core::models::internal::NUM_SIDECHAIN_DIHEDRALS;
use crate::core::models::residue::AminoAcid;
use crate::core::utils::identifiers::is_backbone_anchor;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

const STANDARD_TEMPLATES: &str = include_str!("../../../data/templates.toml");

/// A reference to an already-placed atom used as one of the three NeRF anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorRef {
    /// Carbonyl carbon of the preceding residue (`C-`).
    PrecedingCarbon,
    Nitrogen,
    AlphaCarbon,
    Carbon,
    /// Earlier atom of the same side chain, by template index.
    SideChain(usize),
}

/// Where a side-chain atom's dihedral comes from. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DihedralSource {
    /// Side-chain dihedral slot of the residue's internal coordinates, plus a constant offset.
    Chi { slot: usize, offset: f64 },
    Fixed(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateAtom {
    pub name: String,
    pub anchors: [AnchorRef; 3],
    pub bond_length: f64,
    pub bond_angle: f64,
    pub dihedral: DihedralSource,
}

/// Ordered side-chain atoms of one residue type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResidueTemplate {
    atoms: Vec<TemplateAtom>,
}

impl ResidueTemplate {
    pub fn atoms(&self) -> &[TemplateAtom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResidueTemplate {
    atoms: Vec<RawTemplateAtom>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTemplateAtom {
    name: String,
    anchors: [String; 3],
    bond_length: f64,
    bond_angle: f64,
    dihedral: RawDihedral,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDihedral {
    Chi {
        chi: usize,
        #[serde(default)]
        offset: f64,
    },
    Fixed {
        fixed: f64,
    },
}

/// Side-chain geometry templates keyed by residue type.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    registry: HashMap<AminoAcid, ResidueTemplate>,
}

impl TemplateRegistry {
    /// Templates for the 20 standard residues, bundled with the crate.
    pub fn standard() -> Self {
        Self::from_toml_str(STANDARD_TEMPLATES).expect("bundled residue templates are valid")
    }

    pub fn load(path: &Path) -> Result<Self, TemplateLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| TemplateLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, TemplateLoadError> {
        Self::parse(content, "<memory>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, TemplateLoadError> {
        let raw: HashMap<String, RawResidueTemplate> =
            toml::from_str(content).map_err(|e| TemplateLoadError::Toml {
                path: origin.to_string(),
                source: e,
            })?;

        let mut registry = HashMap::with_capacity(raw.len());
        for (key, raw_template) in raw {
            let residue: AminoAcid = key
                .parse()
                .map_err(|_| TemplateLoadError::UnknownResidueType(key.clone()))?;
            let template = resolve_template(residue, raw_template)?;
            if registry.insert(residue, template).is_some() {
                return Err(TemplateLoadError::DuplicateResidue(residue));
            }
        }
        Ok(Self { registry })
    }

    pub fn get(&self, residue: AminoAcid) -> Option<&ResidueTemplate> {
        self.registry.get(&residue)
    }

    pub fn contains(&self, residue: AminoAcid) -> bool {
        self.registry.contains_key(&residue)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Templates in a stable order, sorted by residue type.
    pub fn iter(&self) -> impl Iterator<Item = (AminoAcid, &ResidueTemplate)> {
        self.registry
            .iter()
            .map(|(aa, template)| (*aa, template))
            .collect::<BTreeMap<_, _>>()
            .into_iter()
    }
}

fn resolve_template(
    residue: AminoAcid,
    raw: RawResidueTemplate,
) -> Result<ResidueTemplate, TemplateLoadError> {
    let mut atoms: Vec<TemplateAtom> = Vec::with_capacity(raw.atoms.len());

    for raw_atom in raw.atoms {
        let name = raw_atom.name.trim().to_string();
        if is_backbone_anchor(&name) || atoms.iter().any(|a| a.name == name) {
            return Err(TemplateLoadError::DuplicateAtomName { residue, atom: name });
        }
        if !(raw_atom.bond_length > 0.0 && raw_atom.bond_length.is_finite()) {
            return Err(TemplateLoadError::InvalidBondLength {
                residue,
                atom: name,
                value: raw_atom.bond_length,
            });
        }

        let mut anchors = [AnchorRef::Nitrogen; 3];
        for (slot, anchor_name) in anchors.iter_mut().zip(raw_atom.anchors.iter()) {
            *slot = resolve_anchor(anchor_name, &atoms).ok_or_else(|| {
                TemplateLoadError::UnresolvedAnchor {
                    residue,
                    atom: name.clone(),
                    anchor: anchor_name.clone(),
                }
            })?;
        }

        let dihedral = match raw_atom.dihedral {
            RawDihedral::Chi { chi, offset } => {
                if chi >= NUM_SIDECHAIN_DIHEDRALS {
                    return Err(TemplateLoadError::ChiSlotOutOfRange {
                        residue,
                        atom: name,
                        slot: chi,
                    });
                }
                DihedralSource::Chi {
                    slot: chi,
                    offset: offset.to_radians(),
                }
            }
            RawDihedral::Fixed { fixed } => DihedralSource::Fixed(fixed.to_radians()),
        };

        atoms.push(TemplateAtom {
            name,
            anchors,
            bond_length: raw_atom.bond_length,
            bond_angle: raw_atom.bond_angle.to_radians(),
            dihedral,
        });
    }

    Ok(ResidueTemplate { atoms })
}

fn resolve_anchor(name: &str, earlier: &[TemplateAtom]) -> Option<AnchorRef> {
    match name.trim() {
        "C-" => Some(AnchorRef::PrecedingCarbon),
        "N" => Some(AnchorRef::Nitrogen),
        "CA" => Some(AnchorRef::AlphaCarbon),
        "C" => Some(AnchorRef::Carbon),
        other => earlier
            .iter()
            .position(|atom| atom.name == other)
            .map(AnchorRef::SideChain),
    }
}

#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unknown residue type '{0}' found in template file")]
    UnknownResidueType(String),
    #[error("Residue type {0} is defined more than once in template file")]
    DuplicateResidue(AminoAcid),
    #[error("Atom '{atom}' of {residue} references unknown or later anchor '{anchor}'")]
    UnresolvedAnchor {
        residue: AminoAcid,
        atom: String,
        anchor: String,
    },
    #[error(
        "Atom '{atom}' of {residue} reads side-chain dihedral slot {slot}, only {max} slots exist",
        max = NUM_SIDECHAIN_DIHEDRALS
    )]
    ChiSlotOutOfRange {
        residue: AminoAcid,
        atom: String,
        slot: usize,
    },
    #[error("Atom '{atom}' of {residue} has invalid bond length {value}")]
    InvalidBondLength {
        residue: AminoAcid,
        atom: String,
        value: f64,
    },
    #[error("Atom name '{atom}' is used more than once in {residue}")]
    DuplicateAtomName { residue: AminoAcid, atom: String },
}
