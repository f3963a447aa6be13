// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::Real;

/// 3D vector used for positions, directions, velocities and accelerations.
///
/// * The same type represents points and directions; the calling context
///   decides. Use [`crate::Quat::rotate`] for directions and a pose transform
///   for points.
/// * Defaults to `f64`; see [`Real`] for the supported precisions.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3<R = f64> {
    data: [R; 3],
}

impl<R: Real> Vec3<R> {
    /// Zero vector.
    pub const ZERO: Self = Self::new(R::ZERO, R::ZERO, R::ZERO);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(R::ONE, R::ZERO, R::ZERO);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(R::ZERO, R::ONE, R::ZERO);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::new(R::ZERO, R::ZERO, R::ONE);

    /// Creates a vector from components.
    pub const fn new(x: R, y: R, z: R) -> Self {
        Self { data: [x, y, z] }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [R; 3] {
        self.data
    }

    /// X component.
    #[inline]
    pub fn x(&self) -> R {
        self.data[0]
    }

    /// Y component.
    #[inline]
    pub fn y(&self) -> R {
        self.data[1]
    }

    /// Z component.
    #[inline]
    pub fn z(&self) -> R {
        self.data[2]
    }

    /// Component by index (`0 = x`, `1 = y`, `2 = z`).
    ///
    /// # Panics
    /// Panics if `idx > 2`.
    #[inline]
    pub fn component(&self, idx: usize) -> R {
        self.data[idx]
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: R) -> Self {
        Self::new(
            self.data[0] * scalar,
            self.data[1] * scalar,
            self.data[2] * scalar,
        )
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> R {
        self.data[0] * other.data[0] + self.data[1] * other.data[1] + self.data[2] * other.data[2]
    }

    /// Cross product `self × other` (right-handed).
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Vector length (magnitude).
    pub fn length(&self) -> R {
        self.dot(self).sqrt()
    }

    /// Squared magnitude of the vector.
    pub fn length_squared(&self) -> R {
        self.dot(self)
    }

    /// Normalises the vector, returning the zero vector if length ≤ `R::EPSILON`.
    ///
    /// A zero result signals a degenerate input; callers that need a unit
    /// vector must check for it.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= R::EPSILON {
            return Self::ZERO;
        }
        self.scale(R::ONE / len)
    }

    /// Returns `true` if every component differs from `other` by at most `tol`.
    ///
    /// `tol = 0` demands exact equality.
    pub fn equals(&self, other: &Self, tol: R) -> bool {
        (self.data[0] - other.data[0]).abs() <= tol
            && (self.data[1] - other.data[1]).abs() <= tol
            && (self.data[2] - other.data[2]).abs() <= tol
    }
}

/// Converts a 3-element array into a `Vec3` interpreted as `(x, y, z)`.
///
/// # Examples
/// ```
/// use rigid_math::Vec3;
/// let v = Vec3::from([1.0, 2.0, 3.0]);
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// ```
impl<R: Real> From<[R; 3]> for Vec3<R> {
    fn from(value: [R; 3]) -> Self {
        Self { data: value }
    }
}

impl<R: Real> fmt::Display for Vec3<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.data[0], self.data[1], self.data[2])
    }
}

impl<R: Real> Add for Vec3<R> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.data[0] + rhs.data[0],
            self.data[1] + rhs.data[1],
            self.data[2] + rhs.data[2],
        )
    }
}

impl<R: Real> Sub for Vec3<R> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.data[0] - rhs.data[0],
            self.data[1] - rhs.data[1],
            self.data[2] - rhs.data[2],
        )
    }
}

impl<R: Real> Neg for Vec3<R> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.data[0], -self.data[1], -self.data[2])
    }
}

impl<R: Real> Mul<R> for Vec3<R> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: R) -> Self {
        self.scale(rhs)
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($t:ty) => {
        impl Mul<Vec3<$t>> for $t {
            type Output = Vec3<$t>;
            #[inline]
            fn mul(self, rhs: Vec3<$t>) -> Vec3<$t> {
                rhs.scale(self)
            }
        }
    };
}

impl_scalar_lhs_mul!(f32);
impl_scalar_lhs_mul!(f64);

impl<R: Real> AddAssign for Vec3<R> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<R: Real> SubAssign for Vec3<R> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<R: Real> MulAssign<R> for Vec3<R> {
    #[inline]
    fn mul_assign(&mut self, rhs: R) {
        *self = self.scale(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_follows_right_hand_rule() {
        let z: Vec3 = Vec3::UNIT_X.cross(&Vec3::UNIT_Y);
        assert_eq!(z, Vec3::UNIT_Z);
        let x: Vec3 = Vec3::UNIT_Y.cross(&Vec3::UNIT_Z);
        assert_eq!(x, Vec3::UNIT_X);
    }

    #[test]
    fn normalize_degenerate_returns_zero() {
        let tiny = Vec3::new(1e-14, 0.0, 0.0);
        assert_eq!(tiny.normalize(), Vec3::ZERO);
        let tiny32 = Vec3::<f32>::new(1e-7, 0.0, 0.0);
        assert_eq!(tiny32.normalize(), Vec3::ZERO);
    }

    #[test]
    fn display_matches_tuple_form() {
        let v = Vec3::new(1.5, -2.0, 0.25);
        assert_eq!(v.to_string(), "(1.5, -2, 0.25)");
    }

    #[test]
    fn equals_respects_tolerance() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(1.0, 2.0, 3.0 + 1e-10);
        assert!(a.equals(&b, 1e-9));
        assert!(!a.equals(&b, 0.0));
        assert!(a.equals(&a, 0.0));
    }
}
