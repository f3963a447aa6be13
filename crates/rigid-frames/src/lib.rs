// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![doc = r"Rigid frame algebra for multibody simulation.

This crate provides:
- Poses (`Pose`): position + unit quaternion, mapping local coordinates to
  parent coordinates as `parent = position + orientation.rotate(local)`.
- Triad construction (`Pose::from_triad`): orientation from an origin and two
  auxiliary points, with a branch-selecting matrix-to-quaternion extraction.
- Moving poses (`MovingPose`): poses carrying linear/angular velocity and
  acceleration, composed through the transport (centripetal/Coriolis) relations.
- Chain helpers (`chain`): the two composition orders for kinematic chains.
- Contact poses (`contact`): disc-versus-terrain contact frames built on a
  caller-supplied `Terrain` height/normal query.

Design notes:
- Value types only: everything is `Copy`, nothing allocates, nothing locks.
- Hot-path operations are infallible and never validate; numeric degeneracy
  propagates as IEEE values. Checked constructors (`try_*`) return
  `FrameError` for callers that want validation.
- Angular velocity and acceleration of a `MovingPose` are always expressed in
  its local axes.
"]

/// Checked-constructor error type.
pub mod error;
/// Kinematic chain composition in both evaluation orders.
pub mod chain;
/// Disc/terrain contact pose construction.
pub mod contact;
/// Moving poses and transport kinematics.
pub mod moving;
/// Static poses.
pub mod pose;
/// Pose construction from three reference points.
pub mod triad;

pub use contact::{disc_terrain_contact, DiscContact, FlatTerrain, PlaneTerrain, Terrain};
pub use error::FrameError;
pub use moving::MovingPose;
pub use pose::Pose;
pub use rigid_math::{Mat3, Quat, Real, Vec3};
