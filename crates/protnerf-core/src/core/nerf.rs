//! The Natural Extension Reference Frame placement step.

use super::utils::geometry::Frame;
use nalgebra::{Point3, RealField, Vector3};

/// Internal coordinates of one atom relative to the three atoms placed before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<T: RealField + Copy> {
    /// Bond length between `c` and the new atom.
    pub bond_length: T,
    /// Angle at `c` between `c→b` and `c→d`, in radians.
    pub bond_angle: T,
    /// Dihedral `a-b-c-d` about the `b–c` axis, in radians.
    pub dihedral: T,
}

impl<T: RealField + Copy> Placement<T> {
    pub fn new(bond_length: T, bond_angle: T, dihedral: T) -> Self {
        Self {
            bond_length,
            bond_angle,
            dihedral,
        }
    }

    /// The displacement of the new atom expressed in the local frame of `a, b, c`.
    pub fn local_displacement(&self) -> Vector3<T> {
        let (l, theta, chi) = (self.bond_length, self.bond_angle, self.dihedral);
        Vector3::new(
            -l * theta.cos(),
            l * theta.sin() * chi.cos(),
            l * theta.sin() * chi.sin(),
        )
    }
}

/// Places atom `d` given `a, b, c` (most recent last).
///
/// Collinear `a, b, c` leave the frame's normal at zero through the epsilon
/// floor: the result is finite but only its component along `b→c` is meaningful.
pub fn place_atom<T: RealField + Copy>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    placement: &Placement<T>,
    eps: T,
) -> Point3<T> {
    let frame = Frame::from_points(a, b, c, eps);
    c + frame.matrix() * placement.local_displacement()
}
