use crate::core::nerf::{Placement, place_atom};
use nalgebra::{Point3, RealField};

/// The three most recently placed backbone atoms, oldest first.
///
/// Every backbone NeRF step reads this context and shifts the new atom in.
/// Only the chain assembler holds it mutably.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackboneFrame<T: RealField + Copy> {
    recent: [Point3<T>; 3],
}

impl<T: RealField + Copy> BackboneFrame<T> {
    pub fn new(a: Point3<T>, b: Point3<T>, c: Point3<T>) -> Self {
        Self { recent: [a, b, c] }
    }

    pub fn recent(&self) -> &[Point3<T>; 3] {
        &self.recent
    }

    /// Places the next backbone atom from the current context and advances the frame.
    pub fn advance(&mut self, placement: &Placement<T>, eps: T) -> Point3<T> {
        let [a, b, c] = self.recent;
        let d = place_atom(&a, &b, &c, placement, eps);
        self.recent = [b, c, d];
        d
    }
}

/// Backbone atoms of one residue plus the carbonyl carbon preceding its nitrogen.
///
/// Side-chain extension reads this and never writes to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueBackbone<T: RealField + Copy> {
    pub preceding_carbon: Point3<T>,
    pub n: Point3<T>,
    pub ca: Point3<T>,
    pub c: Point3<T>,
}
