// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Kinematic chain composition.
//!
//! A chain `F10, F21, F32` maps frame 3 into frame 0; `Fij` is the pose of
//! frame `i` in frame `j`. Two evaluation orders produce the same composite
//! pose (up to rounding):
//!
//! - [`compose_applied_after`] takes the frames innermost first
//!   (`[F32, F21, F10]`) and pushes the accumulated pose outward one frame at
//!   a time: `acc ← f ∘ acc`.
//! - [`compose_left_to_right`] takes the frames outermost first
//!   (`[F10, F21, F32]`) and post-multiplies: `acc ← acc ∘ f`.
//!
//! Both fold from the identity, so an empty chain yields [`Pose::IDENTITY`].
//! To map a single point through a chain, [`transform_point_applied_after`]
//! avoids building the intermediate poses altogether.

use rigid_math::{Real, Vec3};

use crate::pose::Pose;

/// Composite pose of a chain given innermost frame first.
#[must_use]
pub fn compose_applied_after<'a, R, I>(inner_to_outer: I) -> Pose<R>
where
    R: Real,
    I: IntoIterator<Item = &'a Pose<R>>,
{
    inner_to_outer
        .into_iter()
        .fold(Pose::IDENTITY, |acc, frame| acc.compose_applied_after(frame))
}

/// Composite pose of a chain given outermost frame first.
#[must_use]
pub fn compose_left_to_right<'a, R, I>(outer_to_inner: I) -> Pose<R>
where
    R: Real,
    I: IntoIterator<Item = &'a Pose<R>>,
{
    outer_to_inner
        .into_iter()
        .fold(Pose::IDENTITY, |acc, frame| acc.compose(frame))
}

/// Maps `point` from the innermost frame of the chain to the outermost one,
/// one frame at a time (frames given innermost first).
#[must_use]
pub fn transform_point_applied_after<'a, R, I>(point: Vec3<R>, inner_to_outer: I) -> Vec3<R>
where
    R: Real,
    I: IntoIterator<Item = &'a Pose<R>>,
{
    inner_to_outer
        .into_iter()
        .fold(point, |p, frame| frame.transform_point_local_to_parent(&p))
}
