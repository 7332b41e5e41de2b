use nalgebra::{Matrix3, Point3, RealField, Vector3};

/// Default floor applied to vector norms before division.
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Scales `v` to unit length, dividing by `max(|v|, eps)`.
///
/// A zero (or near-zero) vector comes back as a vector of magnitude below one
/// instead of NaN, so degenerate bond vectors never poison the arithmetic by
/// themselves.
pub fn normalize<T: RealField + Copy>(v: &Vector3<T>, eps: T) -> Vector3<T> {
    v / v.norm().max(eps)
}

/// Converts an `f64` setting into the working precision.
pub fn to_real<T: RealField + Copy>(value: f64) -> T {
    nalgebra::convert(value)
}

pub fn cross<T: RealField + Copy>(u: &Vector3<T>, v: &Vector3<T>) -> Vector3<T> {
    u.cross(v)
}

pub fn distance<T: RealField + Copy>(p: &Point3<T>, q: &Point3<T>) -> T {
    (q - p).norm()
}

/// Angle at `b` formed by the bonds `b→a` and `b→c`, in radians within `[0, π]`.
pub fn bond_angle<T: RealField + Copy>(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>) -> T {
    let u = a - b;
    let v = c - b;
    u.cross(&v).norm().atan2(u.dot(&v))
}

/// Dihedral angle of the four points about the `b–c` axis, in radians within `(−π, π]`.
///
/// Uses the IUPAC sign convention: looking down `b→c`, a clockwise rotation of
/// `a` onto `d` is positive.
pub fn dihedral_angle<T: RealField + Copy>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
) -> T {
    let b1 = b - a;
    let b2 = c - b;
    let b3 = d - c;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);

    let y = b2.norm() * b1.dot(&n2);
    let x = n1.dot(&n2);
    y.atan2(x)
}

/// Maps any angle onto `(−π, π]`.
pub fn wrap_angle<T: RealField + Copy>(angle: T) -> T {
    angle.sin().atan2(angle.cos())
}

/// Local orthonormal basis built from three consecutive atom positions.
///
/// `x` points along `b→c`, `z` is normal to the plane of `a, b, c`, and
/// `y = z × x` completes the right-handed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<T: RealField + Copy> {
    pub x: Vector3<T>,
    pub y: Vector3<T>,
    pub z: Vector3<T>,
}

impl<T: RealField + Copy> Frame<T> {
    pub fn from_points(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>, eps: T) -> Self {
        let x = normalize(&(c - b), eps);
        let z = normalize(&cross(&(b - a), &x), eps);
        let y = cross(&z, &x);
        Self { x, y, z }
    }

    /// The 3×3 rotation taking local displacements into the shared frame.
    pub fn matrix(&self) -> Matrix3<T> {
        Matrix3::from_columns(&[self.x, self.y, self.z])
    }
}
