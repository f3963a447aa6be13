// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::ops::Mul;

use rigid_math::{Quat, Real, Vec3};

use crate::error::FrameError;

/// Largest deviation of `|q|` from 1 accepted by [`Pose::try_new`].
pub const UNIT_NORM_TOLERANCE: f64 = 1e-6;

/// Rigid transform from a local frame to its parent frame.
///
/// Conventions:
/// - `position` is the local origin expressed in parent coordinates.
/// - `orientation` is a unit quaternion rotating local axes onto parent axes.
/// - A local point `p` maps to `position + orientation.rotate(p)`.
///
/// Composition is not commutative. `a.compose(&b)` reads "`b` is expressed in
/// `a`'s local frame"; the result is `b` expressed in `a`'s parent. See
/// [`crate::chain`] for whole-chain helpers.
///
/// Methods returning a new value leave the receiver untouched. The `*_in_place`
/// style methods (`invert_in_place`, `concatenate_pre`, `axis_cycle`, ...)
/// mutate only the receiver and follow the usual single-writer rule.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose<R = f64> {
    position: Vec3<R>,
    orientation: Quat<R>,
}

impl<R: Real> Pose<R> {
    /// Identity pose: origin position, identity rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Returns the identity pose.
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates a pose from a position and an orientation.
    ///
    /// The orientation is stored verbatim; callers supply a unit quaternion.
    #[must_use]
    pub const fn new(position: Vec3<R>, orientation: Quat<R>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Creates a pose, rejecting an orientation whose norm is not 1 within
    /// [`UNIT_NORM_TOLERANCE`] and a position with a NaN or infinite component.
    pub fn try_new(position: Vec3<R>, orientation: Quat<R>) -> Result<Self, FrameError> {
        if !position.to_array().into_iter().all(Real::is_finite) {
            return Err(FrameError::NonFiniteInput);
        }
        let norm = orientation.length().to_f64();
        if !norm.is_finite() || (norm - 1.0).abs() > UNIT_NORM_TOLERANCE {
            return Err(FrameError::NonUnitOrientation { norm });
        }
        Ok(Self::new(position, orientation))
    }

    /// Creates a pose at `position`, rotated by `angle` radians about `axis`.
    #[must_use]
    pub fn from_angle_axis(position: Vec3<R>, angle: R, axis: Vec3<R>) -> Self {
        Self::new(position, Quat::from_axis_angle(axis, angle))
    }

    /// Pure translation (identity rotation).
    #[must_use]
    pub const fn from_translation(position: Vec3<R>) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Pure rotation (zero position).
    #[must_use]
    pub const fn from_rotation(orientation: Quat<R>) -> Self {
        Self::new(Vec3::ZERO, orientation)
    }

    /// Local origin in parent coordinates.
    #[must_use]
    pub fn position(&self) -> Vec3<R> {
        self.position
    }

    /// Orientation of the local axes relative to the parent.
    #[must_use]
    pub fn orientation(&self) -> Quat<R> {
        self.orientation
    }

    /// Replaces the position.
    pub fn set_position(&mut self, position: Vec3<R>) {
        self.position = position;
    }

    /// Replaces the orientation (stored verbatim).
    pub fn set_orientation(&mut self, orientation: Quat<R>) {
        self.orientation = orientation;
    }

    /// Position X.
    #[must_use]
    pub fn x(&self) -> R {
        self.position.x()
    }

    /// Position Y.
    #[must_use]
    pub fn y(&self) -> R {
        self.position.y()
    }

    /// Position Z.
    #[must_use]
    pub fn z(&self) -> R {
        self.position.z()
    }

    /// Orientation scalar part.
    #[must_use]
    pub fn e0(&self) -> R {
        self.orientation.e0()
    }

    /// Orientation `e1`.
    #[must_use]
    pub fn e1(&self) -> R {
        self.orientation.e1()
    }

    /// Orientation `e2`.
    #[must_use]
    pub fn e2(&self) -> R {
        self.orientation.e2()
    }

    /// Orientation `e3`.
    #[must_use]
    pub fn e3(&self) -> R {
        self.orientation.e3()
    }

    /// Maps a point from local to parent coordinates.
    #[inline]
    #[must_use]
    pub fn transform_point_local_to_parent(&self, local: &Vec3<R>) -> Vec3<R> {
        self.position + self.orientation.rotate(local)
    }

    /// Maps a point from parent to local coordinates.
    #[inline]
    #[must_use]
    pub fn transform_point_parent_to_local(&self, parent: &Vec3<R>) -> Vec3<R> {
        self.orientation.rotate_back(&(*parent - self.position))
    }

    /// Maps a direction (no translation) from local to parent coordinates.
    #[inline]
    #[must_use]
    pub fn transform_direction_local_to_parent(&self, local: &Vec3<R>) -> Vec3<R> {
        self.orientation.rotate(local)
    }

    /// Maps a direction (no translation) from parent to local coordinates.
    #[inline]
    #[must_use]
    pub fn transform_direction_parent_to_local(&self, parent: &Vec3<R>) -> Vec3<R> {
        self.orientation.rotate_back(parent)
    }

    /// Composes `self ∘ local`: `local` is expressed in this pose's local frame,
    /// the result is the same frame expressed in this pose's parent.
    ///
    /// Equivalent to the post-multiplication `self * local`.
    #[inline]
    #[must_use]
    pub fn compose(&self, local: &Self) -> Self {
        Self::new(
            self.transform_point_local_to_parent(&local.position),
            self.orientation.multiply(&local.orientation),
        )
    }

    /// Composes `outer ∘ self`: this pose is pushed one level outward through
    /// `outer`. Reads left to right as "`self`, then `outer`".
    ///
    /// `p.compose_applied_after(&b).compose_applied_after(&a)` equals
    /// `a.compose(&b).compose(&p)`.
    #[inline]
    #[must_use]
    pub fn compose_applied_after(&self, outer: &Self) -> Self {
        outer.compose(self)
    }

    /// Alias of [`Pose::compose`] spelled as a frame transform.
    #[must_use]
    pub fn transform_pose_local_to_parent(&self, local: &Self) -> Self {
        self.compose(local)
    }

    /// Expresses `parent` (a pose in this pose's parent frame) in this pose's
    /// local frame. Inverse of [`Pose::transform_pose_local_to_parent`].
    #[must_use]
    pub fn transform_pose_parent_to_local(&self, parent: &Self) -> Self {
        Self::new(
            self.transform_point_parent_to_local(&parent.position),
            self.orientation.conjugate().multiply(&parent.orientation),
        )
    }

    /// Inverse transform: the parent frame expressed in this local frame.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self::new(
            self.orientation.rotate_back(&-self.position),
            self.orientation.conjugate(),
        )
    }

    /// Inverts the receiver in place.
    pub fn invert_in_place(&mut self) {
        *self = self.inverse();
    }

    /// Pre-multiplies by `t`: `self ← t ∘ self`.
    pub fn concatenate_pre(&mut self, t: &Self) {
        self.position = t.transform_point_local_to_parent(&self.position);
        self.orientation = t.orientation.multiply(&self.orientation);
    }

    /// Post-multiplies by `t`: `self ← self ∘ t`.
    pub fn concatenate_post(&mut self, t: &Self) {
        self.position = self.transform_point_local_to_parent(&t.position);
        self.orientation = self.orientation.multiply(&t.orientation);
    }

    /// Pre-multiplies by a bare displacement, in place.
    pub fn translate(&mut self, displacement: &Vec3<R>) {
        self.position += *displacement;
    }

    /// Pre-multiplies by a bare displacement: `Pose::from_translation(d) ∘ self`.
    #[must_use]
    pub fn translated(&self, displacement: &Vec3<R>) -> Self {
        Self::new(self.position + *displacement, self.orientation)
    }

    /// Pre-multiplies by a bare rotation, in place.
    pub fn rotate_by(&mut self, rotation: &Quat<R>) {
        *self = self.rotated_by(rotation);
    }

    /// Pre-multiplies by a bare rotation: `Pose::from_rotation(q) ∘ self`.
    #[must_use]
    pub fn rotated_by(&self, rotation: &Quat<R>) -> Self {
        Self::new(
            rotation.rotate(&self.position),
            rotation.multiply(&self.orientation),
        )
    }

    /// Post-multiplies by a bare displacement given in local coordinates:
    /// `self ∘ Pose::from_translation(d)`.
    #[must_use]
    pub fn then_translate_local(&self, displacement: &Vec3<R>) -> Self {
        Self::new(
            self.transform_point_local_to_parent(displacement),
            self.orientation,
        )
    }

    /// Post-multiplies by a bare rotation: `self ∘ Pose::from_rotation(q)`.
    #[must_use]
    pub fn then_rotate_local(&self, rotation: &Quat<R>) -> Self {
        Self::new(self.position, self.orientation.multiply(rotation))
    }

    /// Component-wise comparison of position and orientation within `tol`.
    ///
    /// `tol = 0` demands exact equality. `q` and `-q` compare unequal.
    #[must_use]
    pub fn equals(&self, other: &Self, tol: R) -> bool {
        self.position.equals(&other.position, tol) && self.orientation.equals(&other.orientation, tol)
    }

    /// Resets to the identity pose.
    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Projects onto the XY plane: zero Z position and zero `e1`/`e2`, leaving
    /// a rotation about Z only. The quaternion is not re-normalised.
    pub fn force_2d(&mut self) {
        self.position = Vec3::new(self.position.x(), self.position.y(), R::ZERO);
        self.orientation = Quat::new(
            self.orientation.e0(),
            R::ZERO,
            R::ZERO,
            self.orientation.e3(),
        );
    }

    /// Cyclically relabels the rotation axes by `n` steps (`n` taken modulo 3,
    /// negative values included). One step maps the vector part
    /// `(e1, e2, e3)` to `(e3, e1, e2)`. Position is untouched.
    pub fn axis_cycle(&mut self, n: i32) -> &mut Self {
        let [e0, e1, e2, e3] = self.orientation.to_array();
        self.orientation = match n.rem_euclid(3) {
            1 => Quat::new(e0, e3, e1, e2),
            2 => Quat::new(e0, e2, e3, e1),
            _ => self.orientation,
        };
        self
    }

    /// Functional form of [`Pose::axis_cycle`].
    #[must_use]
    pub fn cycled(&self, n: i32) -> Self {
        let mut out = *self;
        out.axis_cycle(n);
        out
    }
}

impl<R: Real> Default for Pose<R> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A bare displacement is a pose with identity orientation.
impl<R: Real> From<Vec3<R>> for Pose<R> {
    fn from(value: Vec3<R>) -> Self {
        Self::from_translation(value)
    }
}

/// A bare rotation is a pose with zero position.
impl<R: Real> From<Quat<R>> for Pose<R> {
    fn from(value: Quat<R>) -> Self {
        Self::from_rotation(value)
    }
}

/// `a * b` is [`Pose::compose`]: `b` expressed in `a`'s local frame.
impl<R: Real> Mul for Pose<R> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

/// `pose * point` maps a local point to the parent frame.
impl<R: Real> Mul<Vec3<R>> for Pose<R> {
    type Output = Vec3<R>;
    #[inline]
    fn mul(self, rhs: Vec3<R>) -> Vec3<R> {
        self.transform_point_local_to_parent(&rhs)
    }
}

/// `pose * q` rotates a local orientation into the parent frame.
impl<R: Real> Mul<Quat<R>> for Pose<R> {
    type Output = Quat<R>;
    #[inline]
    fn mul(self, rhs: Quat<R>) -> Quat<R> {
        self.orientation.multiply(&rhs)
    }
}

impl<R: Real> fmt::Display for Pose<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.position, self.orientation)
    }
}
