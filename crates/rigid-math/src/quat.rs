// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::ops::Mul;

use crate::{Mat3, Real, Vec3};

/// Quaternion stored scalar-first as `(e0, e1, e2, e3)`.
///
/// * `e0` is the real part; `(e1, e2, e3)` is the vector part.
/// * Orientations are unit quaternions. Nothing re-normalises implicitly:
///   callers building from arbitrary data call [`Quat::normalize`], and long
///   composition chains should re-normalise periodically.
/// * All angles are expressed in radians.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat<R = f64> {
    data: [R; 4],
}

impl<R: Real> Quat<R> {
    /// Identity rotation `(1, 0, 0, 0)`.
    pub const IDENTITY: Self = Self::new(R::ONE, R::ZERO, R::ZERO, R::ZERO);

    /// Creates a quaternion from components.
    ///
    /// Components are taken verbatim; use [`Quat::from_axis_angle`] for
    /// axis/angle construction.
    pub const fn new(e0: R, e1: R, e2: R, e3: R) -> Self {
        Self {
            data: [e0, e1, e2, e3],
        }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns the quaternion as an array `[e0, e1, e2, e3]`.
    pub fn to_array(self) -> [R; 4] {
        self.data
    }

    /// Real (scalar) part.
    #[inline]
    pub fn e0(&self) -> R {
        self.data[0]
    }

    /// First imaginary component (X axis).
    #[inline]
    pub fn e1(&self) -> R {
        self.data[1]
    }

    /// Second imaginary component (Y axis).
    #[inline]
    pub fn e2(&self) -> R {
        self.data[2]
    }

    /// Third imaginary component (Z axis).
    #[inline]
    pub fn e3(&self) -> R {
        self.data[3]
    }

    /// Vector (imaginary) part `(e1, e2, e3)`.
    #[inline]
    pub fn vector(&self) -> Vec3<R> {
        Vec3::new(self.data[1], self.data[2], self.data[3])
    }

    /// Replaces the vector part, leaving `e0` untouched. No normalisation.
    #[inline]
    pub fn set_vector(&mut self, v: Vec3<R>) {
        self.data[1] = v.x();
        self.data[2] = v.y();
        self.data[3] = v.z();
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// The axis is normalised internally. Returns the identity quaternion
    /// when the axis length is ≤ `R::EPSILON`.
    pub fn from_axis_angle(axis: Vec3<R>, angle: R) -> Self {
        let len = axis.length();
        if len <= R::EPSILON {
            return Self::IDENTITY;
        }
        let (sin_half, cos_half) = (angle * R::HALF).sin_cos();
        let v = axis.scale(sin_half / len);
        Self::new(cos_half, v.x(), v.y(), v.z())
    }

    /// Rotation of `angle` radians about the X axis.
    pub fn from_rotation_x(angle: R) -> Self {
        let (s, c) = (angle * R::HALF).sin_cos();
        Self::new(c, s, R::ZERO, R::ZERO)
    }

    /// Rotation of `angle` radians about the Y axis.
    pub fn from_rotation_y(angle: R) -> Self {
        let (s, c) = (angle * R::HALF).sin_cos();
        Self::new(c, R::ZERO, s, R::ZERO)
    }

    /// Rotation of `angle` radians about the Z axis.
    pub fn from_rotation_z(angle: R) -> Self {
        let (s, c) = (angle * R::HALF).sin_cos();
        Self::new(c, R::ZERO, R::ZERO, s)
    }

    /// Returns `(angle, unit axis)` for this (unit) quaternion.
    ///
    /// The angle lies in `[0, 2π]`. A rotation of (near) zero angle reports
    /// the X axis.
    pub fn to_axis_angle(&self) -> (R, Vec3<R>) {
        let v = self.vector();
        let sin_half = v.length();
        if sin_half <= R::EPSILON {
            return (R::ZERO, Vec3::UNIT_X);
        }
        let angle = R::TWO * sin_half.atan2(self.data[0]);
        (angle, v.scale(R::ONE / sin_half))
    }

    /// Hamilton product `self ∘ other`.
    ///
    /// Operand order matters. For orientations, `a.multiply(&b)` is the
    /// rotation that first applies `b` and then `a` to a vector:
    /// `a.multiply(&b).rotate(v) == a.rotate(b.rotate(v))`.
    ///
    /// When both operands are unit quaternions the product is a unit
    /// quaternion up to rounding.
    ///
    /// # Examples
    /// ```
    /// use core::f64::consts::FRAC_PI_2;
    /// use rigid_math::{Quat, Vec3};
    /// let yaw = Quat::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2);
    /// let pitch = Quat::from_axis_angle(Vec3::UNIT_X, FRAC_PI_2);
    /// // Non-commutative: pitch*yaw is different
    /// assert!(!yaw.multiply(&pitch).equals(&pitch.multiply(&yaw), 1e-9));
    /// ```
    pub fn multiply(&self, other: &Self) -> Self {
        let [a0, a1, a2, a3] = self.data;
        let [b0, b1, b2, b3] = other.data;
        Self::new(
            a0 * b0 - a1 * b1 - a2 * b2 - a3 * b3,
            a0 * b1 + a1 * b0 - a3 * b2 + a2 * b3,
            a0 * b2 + a2 * b0 + a3 * b1 - a1 * b3,
            a0 * b3 + a3 * b0 - a2 * b1 + a1 * b2,
        )
    }

    /// Conjugate `(e0, -e1, -e2, -e3)`; the inverse rotation for unit quaternions.
    pub fn conjugate(&self) -> Self {
        Self::new(self.data[0], -self.data[1], -self.data[2], -self.data[3])
    }

    /// Squared norm.
    pub fn length_squared(&self) -> R {
        let [e0, e1, e2, e3] = self.data;
        e0 * e0 + e1 * e1 + e2 * e2 + e3 * e3
    }

    /// Euclidean norm.
    pub fn length(&self) -> R {
        self.length_squared().sqrt()
    }

    /// Normalises the quaternion; returns identity when the norm is ≤ `R::EPSILON`.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= R::EPSILON {
            return Self::IDENTITY;
        }
        let inv = R::ONE / len;
        Self::new(
            self.data[0] * inv,
            self.data[1] * inv,
            self.data[2] * inv,
            self.data[3] * inv,
        )
    }

    /// Returns `true` if `| |q| - 1 | ≤ tol`.
    pub fn is_normalized(&self, tol: R) -> bool {
        (self.length() - R::ONE).abs() <= tol
    }

    /// Rotates `v` by this quaternion (local → parent).
    ///
    /// Assumes a unit quaternion. Uses the expanded form of `q v q*`, i.e.
    /// `v + 2 e0 (u × v) + 2 u × (u × v)` with `u` the vector part.
    #[inline]
    pub fn rotate(&self, v: &Vec3<R>) -> Vec3<R> {
        let u = self.vector();
        let t = u.cross(v).scale(R::TWO);
        *v + t.scale(self.data[0]) + u.cross(&t)
    }

    /// Rotates `v` by the inverse of this quaternion (parent → local).
    #[inline]
    pub fn rotate_back(&self, v: &Vec3<R>) -> Vec3<R> {
        let u = -self.vector();
        let t = u.cross(v).scale(R::TWO);
        *v + t.scale(self.data[0]) + u.cross(&t)
    }

    /// Returns `true` if every component differs from `other` by at most `tol`.
    ///
    /// `q` and `-q` describe the same rotation but compare unequal here.
    pub fn equals(&self, other: &Self, tol: R) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (*a - *b).abs() <= tol)
    }

    /// Angle of the relative rotation between two unit quaternions, in `[0, π]`.
    ///
    /// Sign-insensitive: `q.angle_to(&-q)` is zero.
    pub fn angle_to(&self, other: &Self) -> R {
        let dot = self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(R::ZERO, |acc, (a, b)| acc + *a * *b);
        R::TWO * crate::clamp(dot.abs(), R::ZERO, R::ONE).acos()
    }

    /// Converts the (unit) quaternion to a rotation matrix whose columns are
    /// the rotated basis vectors.
    pub fn to_mat3(&self) -> Mat3<R> {
        Mat3::from_quat(self)
    }
}

impl<R: Real> Default for Quat<R> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Converts a 4-element array `[e0, e1, e2, e3]` into a `Quat`.
/// The components are taken verbatim; normalisation is not enforced.
impl<R: Real> From<[R; 4]> for Quat<R> {
    fn from(value: [R; 4]) -> Self {
        Self { data: value }
    }
}

impl<R: Real> Mul for Quat<R> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl<R: Real> fmt::Display for Quat<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [e0, e1, e2, e3] = self.data;
        write!(f, "q({e0}, {e1}, {e2}, {e3})")
    }
}
