use super::frame::ResidueBackbone;
use crate::core::models::internal::{AngleRow, CHI_START};
use crate::core::nerf::{Placement, place_atom};
use crate::core::topology::registry::{AnchorRef, DihedralSource, ResidueTemplate};
use crate::core::utils::geometry::to_real;
use nalgebra::{Point3, RealField};

/// Places every side-chain atom of `template` onto an already built backbone.
///
/// Atoms come back in template order. Anchors are resolved by the registry at
/// load time, so every `SideChain` reference points at an earlier index.
pub fn extend<T: RealField + Copy>(
    template: &ResidueTemplate,
    backbone: &ResidueBackbone<T>,
    row: &AngleRow<T>,
    eps: T,
) -> Vec<Point3<T>> {
    let mut placed: Vec<Point3<T>> = Vec::with_capacity(template.len());

    for atom in template.atoms() {
        let [a, b, c] = atom.anchors.map(|anchor| resolve(anchor, backbone, &placed));
        let dihedral = match atom.dihedral {
            DihedralSource::Chi { slot, offset } => row[CHI_START + slot] + to_real(offset),
            DihedralSource::Fixed(value) => to_real(value),
        };
        let placement = Placement::new(
            to_real(atom.bond_length),
            to_real(atom.bond_angle),
            dihedral,
        );
        placed.push(place_atom(&a, &b, &c, &placement, eps));
    }

    placed
}

fn resolve<T: RealField + Copy>(
    anchor: AnchorRef,
    backbone: &ResidueBackbone<T>,
    placed: &[Point3<T>],
) -> Point3<T> {
    match anchor {
        AnchorRef::PrecedingCarbon => backbone.preceding_carbon,
        AnchorRef::Nitrogen => backbone.n,
        AnchorRef::AlphaCarbon => backbone.ca,
        AnchorRef::Carbon => backbone.c,
        AnchorRef::SideChain(index) => placed[index],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::internal::ANGLES_PER_RESIDUE;
    use crate::core::models::residue::AminoAcid;
    use crate::core::topology::registry::TemplateRegistry;
    use crate::core::utils::geometry::{bond_angle, dihedral_angle, distance, wrap_angle};

    const TOL: f64 = 1e-9;

    fn backbone() -> ResidueBackbone<f64> {
        ResidueBackbone {
            preceding_carbon: Point3::new(-0.5, 1.3, 0.2),
            n: Point3::new(0.0, 0.0, 0.0),
            ca: Point3::new(1.442, 0.0, 0.0),
            c: Point3::new(1.98, 1.40, 0.0),
        }
    }

    #[test]
    fn empty_template_places_nothing() {
        let registry = TemplateRegistry::standard();
        let gly = registry.get(AminoAcid::Glycine).unwrap();
        let atoms = extend(gly, &backbone(), &[0.0; ANGLES_PER_RESIDUE], 1e-12);
        assert!(atoms.is_empty());
    }

    #[test]
    fn chi_dihedrals_and_offsets_are_realized() {
        let registry = TemplateRegistry::from_toml_str(
            r#"
[SER]
atoms = [
    { name = "CB", anchors = ["C-", "N", "CA"], bond_length = 1.52, bond_angle = 110.5, dihedral = { chi = 0 } },
    { name = "OG", anchors = ["N", "CA", "CB"], bond_length = 1.417, bond_angle = 110.8, dihedral = { chi = 1, offset = 180.0 } },
]
"#,
        )
        .unwrap();
        let template = registry.get(AminoAcid::Serine).unwrap();
        let bb = backbone();
        let mut row = [0.0; ANGLES_PER_RESIDUE];
        row[CHI_START] = -2.1;
        row[CHI_START + 1] = 0.4;

        let atoms = extend(template, &bb, &row, 1e-12);
        let (cb, og) = (atoms[0], atoms[1]);

        assert!((distance(&bb.ca, &cb) - 1.52).abs() < TOL);
        assert!((bond_angle(&bb.n, &bb.ca, &cb) - 110.5f64.to_radians()).abs() < TOL);
        let chi0 = dihedral_angle(&bb.preceding_carbon, &bb.n, &bb.ca, &cb);
        assert!(wrap_angle(chi0 + 2.1).abs() < TOL);

        assert!((distance(&cb, &og) - 1.417).abs() < TOL);
        let chi1 = dihedral_angle(&bb.n, &bb.ca, &cb, &og);
        assert!(wrap_angle(chi1 - (0.4 + std::f64::consts::PI)).abs() < TOL);
    }

    #[test]
    fn fixed_dihedral_ignores_angle_row() {
        let registry = TemplateRegistry::from_toml_str(
            r#"
[ALA]
atoms = [
    { name = "CB", anchors = ["C", "N", "CA"], bond_length = 1.52, bond_angle = 110.5, dihedral = { fixed = -122.5 } },
]
"#,
        )
        .unwrap();
        let template = registry.get(AminoAcid::Alanine).unwrap();
        let bb = backbone();

        let mut row = [0.0; ANGLES_PER_RESIDUE];
        let first = extend(template, &bb, &row, 1e-12);
        row[CHI_START] = 1.0;
        let second = extend(template, &bb, &row, 1e-12);

        assert_eq!(first, second);
        let measured = dihedral_angle(&bb.c, &bb.n, &bb.ca, &first[0]);
        assert!(wrap_angle(measured - (-122.5f64).to_radians()).abs() < TOL);
    }

    #[test]
    fn standard_templates_place_every_atom_finitely() {
        let registry = TemplateRegistry::standard();
        let row = [0.5; ANGLES_PER_RESIDUE];
        for (aa, template) in registry.iter() {
            let atoms = extend(template, &backbone(), &row, 1e-12);
            assert_eq!(atoms.len(), template.len(), "{aa}");
            assert!(atoms.iter().flat_map(|p| p.iter()).all(|v| v.is_finite()));
        }
    }
}
