// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Poses with first- and second-order kinematic state.
//!
//! Frame conventions for a `MovingPose` `F` relative to its parent:
//! - `lin_vel`, `lin_acc`: velocity and acceleration of `F`'s origin, in
//!   parent axes.
//! - `ang_vel_local` (`ω`), `ang_acc_local` (`α`): angular velocity and
//!   acceleration of `F` relative to the parent, in `F`'s own axes. `α` is
//!   the time derivative of `ω`'s local components (which equals the local
//!   expression of the parent-frame derivative).
//!
//! With `R` the orientation and `r`, `v`, `a` a point's local position,
//! velocity and acceleration, the transport relations are
//!
//! ```text
//! v_parent = v_F + R (ω × r + v)
//! a_parent = a_F + R (α × r + ω × (ω × r) + 2 ω × v + a)
//! ```
//!
//! (tangential, centripetal, Coriolis, and relative terms). Composing a child
//! moving pose `C` (relative to `F`) gives, in the child's axes,
//!
//! ```text
//! ω_out = R_C⁻¹ ω_F + ω_C
//! α_out = R_C⁻¹ α_F + (R_C⁻¹ ω_F) × ω_C + α_C
//! ```

use core::fmt;
use core::ops::Mul;

use rigid_math::{Quat, Real, Vec3};

use crate::pose::Pose;

/// A [`Pose`] plus the linear and angular velocity/acceleration of the frame
/// relative to its parent. See the module docs for the frame of each vector.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovingPose<R = f64> {
    pose: Pose<R>,
    lin_vel: Vec3<R>,
    lin_acc: Vec3<R>,
    ang_vel_local: Vec3<R>,
    ang_acc_local: Vec3<R>,
}

/// Pure quaternion `(0, v)`.
#[inline]
fn pure<R: Real>(v: &Vec3<R>) -> Quat<R> {
    Quat::new(R::ZERO, v.x(), v.y(), v.z())
}

impl<R: Real> MovingPose<R> {
    /// Identity pose, at rest.
    pub const IDENTITY: Self = Self::new(Pose::IDENTITY);

    /// Stationary moving pose at `pose` (all rates zero).
    #[must_use]
    pub const fn new(pose: Pose<R>) -> Self {
        Self {
            pose,
            lin_vel: Vec3::ZERO,
            lin_acc: Vec3::ZERO,
            ang_vel_local: Vec3::ZERO,
            ang_acc_local: Vec3::ZERO,
        }
    }

    /// Same as [`MovingPose::new`].
    #[must_use]
    pub const fn from_pose(pose: Pose<R>) -> Self {
        Self::new(pose)
    }

    /// Returns the identity moving pose.
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Moving pose from all of its parts.
    ///
    /// `lin_vel`/`lin_acc` are in parent axes, `ang_vel_local`/`ang_acc_local`
    /// in local axes.
    #[must_use]
    pub const fn with_kinematics(
        pose: Pose<R>,
        lin_vel: Vec3<R>,
        lin_acc: Vec3<R>,
        ang_vel_local: Vec3<R>,
        ang_acc_local: Vec3<R>,
    ) -> Self {
        Self {
            pose,
            lin_vel,
            lin_acc,
            ang_vel_local,
            ang_acc_local,
        }
    }

    /// Returns a copy with the origin velocity replaced (parent axes).
    #[must_use]
    pub fn with_lin_vel(mut self, lin_vel: Vec3<R>) -> Self {
        self.lin_vel = lin_vel;
        self
    }

    /// Returns a copy with the origin acceleration replaced (parent axes).
    #[must_use]
    pub fn with_lin_acc(mut self, lin_acc: Vec3<R>) -> Self {
        self.lin_acc = lin_acc;
        self
    }

    /// Returns a copy with the angular velocity replaced (local axes).
    #[must_use]
    pub fn with_ang_vel_local(mut self, ang_vel_local: Vec3<R>) -> Self {
        self.ang_vel_local = ang_vel_local;
        self
    }

    /// Returns a copy with the angular acceleration replaced (local axes).
    #[must_use]
    pub fn with_ang_acc_local(mut self, ang_acc_local: Vec3<R>) -> Self {
        self.ang_acc_local = ang_acc_local;
        self
    }

    /// Static part.
    #[must_use]
    pub fn pose(&self) -> Pose<R> {
        self.pose
    }

    /// Origin in parent coordinates.
    #[must_use]
    pub fn position(&self) -> Vec3<R> {
        self.pose.position()
    }

    /// Orientation relative to the parent.
    #[must_use]
    pub fn orientation(&self) -> Quat<R> {
        self.pose.orientation()
    }

    /// Origin velocity (parent axes).
    #[must_use]
    pub fn lin_vel(&self) -> Vec3<R> {
        self.lin_vel
    }

    /// Origin acceleration (parent axes).
    #[must_use]
    pub fn lin_acc(&self) -> Vec3<R> {
        self.lin_acc
    }

    /// Angular velocity (local axes).
    #[must_use]
    pub fn ang_vel_local(&self) -> Vec3<R> {
        self.ang_vel_local
    }

    /// Angular acceleration (local axes).
    #[must_use]
    pub fn ang_acc_local(&self) -> Vec3<R> {
        self.ang_acc_local
    }

    /// Angular velocity expressed in parent axes.
    #[must_use]
    pub fn ang_vel_parent(&self) -> Vec3<R> {
        self.pose.orientation().rotate(&self.ang_vel_local)
    }

    /// Angular acceleration expressed in parent axes.
    #[must_use]
    pub fn ang_acc_parent(&self) -> Vec3<R> {
        self.pose.orientation().rotate(&self.ang_acc_local)
    }

    /// Replaces the static part, keeping the rates.
    pub fn set_pose(&mut self, pose: Pose<R>) {
        self.pose = pose;
    }

    /// Sets the origin velocity (parent axes).
    pub fn set_lin_vel(&mut self, lin_vel: Vec3<R>) {
        self.lin_vel = lin_vel;
    }

    /// Sets the origin acceleration (parent axes).
    pub fn set_lin_acc(&mut self, lin_acc: Vec3<R>) {
        self.lin_acc = lin_acc;
    }

    /// Sets the angular velocity from local axes.
    pub fn set_ang_vel_local(&mut self, w: Vec3<R>) {
        self.ang_vel_local = w;
    }

    /// Sets the angular acceleration from local axes.
    pub fn set_ang_acc_local(&mut self, a: Vec3<R>) {
        self.ang_acc_local = a;
    }

    /// Sets the angular velocity from parent axes (stored in local axes).
    pub fn set_ang_vel_parent(&mut self, w: Vec3<R>) {
        self.ang_vel_local = self.pose.orientation().rotate_back(&w);
    }

    /// Sets the angular acceleration from parent axes (stored in local axes).
    pub fn set_ang_acc_parent(&mut self, a: Vec3<R>) {
        self.ang_acc_local = self.pose.orientation().rotate_back(&a);
    }

    /// Orientation time derivative `q̇ = ½ q ∘ (0, ω)`.
    #[must_use]
    pub fn rot_dt(&self) -> Quat<R> {
        let q = self.pose.orientation().multiply(&pure(&self.ang_vel_local));
        scale_quat(&q, R::HALF)
    }

    /// Orientation second derivative `q̈ = ½ (q̇ ∘ (0, ω) + q ∘ (0, α))`.
    #[must_use]
    pub fn rot_dtdt(&self) -> Quat<R> {
        let a = self.rot_dt().multiply(&pure(&self.ang_vel_local));
        let b = self.pose.orientation().multiply(&pure(&self.ang_acc_local));
        scale_quat(&add_quat(&a, &b), R::HALF)
    }

    /// Sets the angular velocity from an orientation derivative:
    /// `ω = 2 (q* ∘ q̇)` (vector part).
    pub fn set_rot_dt(&mut self, rot_dt: &Quat<R>) {
        let w = self.pose.orientation().conjugate().multiply(rot_dt);
        self.ang_vel_local = w.vector().scale(R::TWO);
    }

    /// Sets the angular acceleration from an orientation second derivative,
    /// using the current angular velocity: `α = q* ∘ (2 q̈ − q̇ ∘ (0, ω))`
    /// (vector part).
    pub fn set_rot_dtdt(&mut self, rot_dtdt: &Quat<R>) {
        let qdot_w = self.rot_dt().multiply(&pure(&self.ang_vel_local));
        let rhs = add_quat(&scale_quat(rot_dtdt, R::TWO), &scale_quat(&qdot_w, -R::ONE));
        self.ang_acc_local = self.pose.orientation().conjugate().multiply(&rhs).vector();
    }

    /// Maps a point from local to parent coordinates.
    #[inline]
    #[must_use]
    pub fn transform_point_local_to_parent(&self, local: &Vec3<R>) -> Vec3<R> {
        self.pose.transform_point_local_to_parent(local)
    }

    /// Maps a point from parent to local coordinates.
    #[inline]
    #[must_use]
    pub fn transform_point_parent_to_local(&self, parent: &Vec3<R>) -> Vec3<R> {
        self.pose.transform_point_parent_to_local(parent)
    }

    /// Parent-frame velocity of a point given its local position and local
    /// (relative) velocity.
    #[inline]
    #[must_use]
    pub fn point_speed_local_to_parent(&self, local_pos: &Vec3<R>, local_vel: &Vec3<R>) -> Vec3<R> {
        let rel = self.ang_vel_local.cross(local_pos) + *local_vel;
        self.lin_vel + self.pose.orientation().rotate(&rel)
    }

    /// Parent-frame acceleration of a point given its local position,
    /// velocity and acceleration.
    #[inline]
    #[must_use]
    pub fn point_acceleration_local_to_parent(
        &self,
        local_pos: &Vec3<R>,
        local_vel: &Vec3<R>,
        local_acc: &Vec3<R>,
    ) -> Vec3<R> {
        let w = self.ang_vel_local;
        let rel = self.ang_acc_local.cross(local_pos)
            + w.cross(&w.cross(local_pos))
            + w.cross(local_vel).scale(R::TWO)
            + *local_acc;
        self.lin_acc + self.pose.orientation().rotate(&rel)
    }

    /// Velocity of a point as seen by an observer moving with this frame,
    /// given the point's parent-frame position and velocity.
    #[inline]
    #[must_use]
    pub fn point_speed_parent_to_local(&self, parent_pos: &Vec3<R>, parent_vel: &Vec3<R>) -> Vec3<R> {
        let local_pos = self.pose.transform_point_parent_to_local(parent_pos);
        self.pose.orientation().rotate_back(&(*parent_vel - self.lin_vel))
            - self.ang_vel_local.cross(&local_pos)
    }

    /// Acceleration of a point as seen by an observer moving with this frame,
    /// given the point's parent-frame position, velocity and acceleration.
    #[inline]
    #[must_use]
    pub fn point_acceleration_parent_to_local(
        &self,
        parent_pos: &Vec3<R>,
        parent_vel: &Vec3<R>,
        parent_acc: &Vec3<R>,
    ) -> Vec3<R> {
        let w = self.ang_vel_local;
        let local_pos = self.pose.transform_point_parent_to_local(parent_pos);
        let local_vel = self.pose.orientation().rotate_back(&(*parent_vel - self.lin_vel))
            - w.cross(&local_pos);
        self.pose.orientation().rotate_back(&(*parent_acc - self.lin_acc))
            - self.ang_acc_local.cross(&local_pos)
            - w.cross(&w.cross(&local_pos))
            - w.cross(&local_vel).scale(R::TWO)
    }

    /// Composes `self ∘ child`: `child` is expressed relative to this frame,
    /// the result is `child` relative to this frame's parent, with velocities
    /// and accelerations propagated through the transport relations.
    #[must_use]
    pub fn compose(&self, child: &Self) -> Self {
        let r = child.pose.position();
        let child_rot = child.pose.orientation();
        let pose = self.pose.compose(&child.pose);
        let lin_vel = self.point_speed_local_to_parent(&r, &child.lin_vel);
        let lin_acc = self.point_acceleration_local_to_parent(&r, &child.lin_vel, &child.lin_acc);
        let w_in_child = child_rot.rotate_back(&self.ang_vel_local);
        let ang_vel_local = w_in_child + child.ang_vel_local;
        let ang_acc_local = child_rot.rotate_back(&self.ang_acc_local)
            + w_in_child.cross(&child.ang_vel_local)
            + child.ang_acc_local;
        Self {
            pose,
            lin_vel,
            lin_acc,
            ang_vel_local,
            ang_acc_local,
        }
    }

    /// Composes `outer ∘ self` (this frame pushed one level outward).
    #[must_use]
    pub fn compose_applied_after(&self, outer: &Self) -> Self {
        outer.compose(self)
    }

    /// The parent frame as seen from this moving frame, so that
    /// `f.compose(&f.inverse())` is the identity at rest.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let q = self.pose.orientation();
        let origin = Vec3::ZERO;
        let lin_vel = self.point_speed_parent_to_local(&origin, &Vec3::ZERO);
        let lin_acc = self.point_acceleration_parent_to_local(&origin, &Vec3::ZERO, &Vec3::ZERO);
        Self {
            pose: self.pose.inverse(),
            lin_vel,
            lin_acc,
            ang_vel_local: -q.rotate(&self.ang_vel_local),
            ang_acc_local: -q.rotate(&self.ang_acc_local),
        }
    }

    /// Inverts the receiver in place.
    pub fn invert_in_place(&mut self) {
        *self = self.inverse();
    }

    /// Expresses `parent` (a moving frame relative to this frame's parent)
    /// relative to this frame. Inverse of [`MovingPose::compose`].
    #[must_use]
    pub fn transform_parent_to_local(&self, parent: &Self) -> Self {
        self.inverse().compose(parent)
    }

    /// Component-wise comparison of the pose and all rates within `tol`.
    #[must_use]
    pub fn equals(&self, other: &Self, tol: R) -> bool {
        self.pose.equals(&other.pose, tol)
            && self.lin_vel.equals(&other.lin_vel, tol)
            && self.lin_acc.equals(&other.lin_acc, tol)
            && self.ang_vel_local.equals(&other.ang_vel_local, tol)
            && self.ang_acc_local.equals(&other.ang_acc_local, tol)
    }
}

#[inline]
fn scale_quat<R: Real>(q: &Quat<R>, s: R) -> Quat<R> {
    let [e0, e1, e2, e3] = q.to_array();
    Quat::new(e0 * s, e1 * s, e2 * s, e3 * s)
}

#[inline]
fn add_quat<R: Real>(a: &Quat<R>, b: &Quat<R>) -> Quat<R> {
    let [a0, a1, a2, a3] = a.to_array();
    let [b0, b1, b2, b3] = b.to_array();
    Quat::new(a0 + b0, a1 + b1, a2 + b2, a3 + b3)
}

impl<R: Real> Default for MovingPose<R> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<R: Real> From<Pose<R>> for MovingPose<R> {
    fn from(pose: Pose<R>) -> Self {
        Self::new(pose)
    }
}

/// `a * b` is [`MovingPose::compose`].
impl<R: Real> Mul for MovingPose<R> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

impl<R: Real> fmt::Display for MovingPose<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v={} a={} w={} dw={}",
            self.pose, self.lin_vel, self.lin_acc, self.ang_vel_local, self.ang_acc_local
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    fn spinning() -> MovingPose {
        MovingPose::new(Pose::new(
            Vec3::new(5.0, 6.0, 7.0),
            Quat::new(1.0, 3.0, 4.0, 5.0).normalize(),
        ))
        .with_lin_vel(Vec3::new(0.5, 0.6, 0.7))
        .with_ang_vel_local(Vec3::new(1.1, 2.1, 5.1))
        .with_lin_acc(Vec3::new(7.0, 8.0, 9.0))
        .with_ang_acc_local(Vec3::new(4.3, 5.3, 2.3))
    }

    #[test]
    fn compose_with_inverse_is_identity_at_rest() {
        let f = spinning();
        let id = f.compose(&f.inverse());
        assert!(id.equals(&MovingPose::IDENTITY, EPS), "{id}");
    }

    #[test]
    fn rot_dt_round_trips_through_setter() {
        let f = spinning();
        let mut g = MovingPose::new(f.pose());
        g.set_rot_dt(&f.rot_dt());
        assert!(g.ang_vel_local().equals(&f.ang_vel_local(), EPS));
        g.set_rot_dtdt(&f.rot_dtdt());
        assert!(g.ang_acc_local().equals(&f.ang_acc_local(), EPS));
    }

    #[test]
    fn parent_axis_setters_store_local_axes() {
        let mut f = spinning();
        let w_parent = f.ang_vel_parent();
        f.set_ang_vel_local(Vec3::ZERO);
        f.set_ang_vel_parent(w_parent);
        assert!(f.ang_vel_local().equals(&spinning().ang_vel_local(), EPS));
        let a_parent = f.ang_acc_parent();
        f.set_ang_acc_parent(a_parent);
        assert!(f.ang_acc_local().equals(&spinning().ang_acc_local(), EPS));
    }

    #[test]
    fn point_speed_round_trip() {
        let f = spinning();
        let p = Vec3::new(0.1, 3.1, 1.1);
        let v = Vec3::new(3.2, 9.2, 7.2);
        let parent_pos = f.transform_point_local_to_parent(&p);
        let parent_vel = f.point_speed_local_to_parent(&p, &v);
        assert!(f.point_speed_parent_to_local(&parent_pos, &parent_vel).equals(&v, EPS));
    }

    #[test]
    fn point_acceleration_round_trip() {
        let f = spinning();
        let p = Vec3::new(0.1, 3.1, 1.1);
        let v = Vec3::new(3.2, 9.2, 7.2);
        let a = Vec3::new(5.3, 3.3, 2.3);
        let parent_pos = f.transform_point_local_to_parent(&p);
        let parent_vel = f.point_speed_local_to_parent(&p, &v);
        let parent_acc = f.point_acceleration_local_to_parent(&p, &v, &a);
        let back = f.point_acceleration_parent_to_local(&parent_pos, &parent_vel, &parent_acc);
        assert!(back.equals(&a, 1e-9), "{back}");
    }
}
