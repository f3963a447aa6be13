// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Disc-versus-terrain contact frames.
//!
//! The terrain is only ever queried through [`Terrain`]: a height and a unit
//! normal at a horizontal location. The contact search approximates the
//! terrain by its tangent plane at the disc's lowest point.

use rigid_math::{Mat3, Real, Vec3};

use crate::error::FrameError;
use crate::pose::Pose;

/// Height-field query consumed by [`disc_terrain_contact`].
pub trait Terrain<R: Real = f64> {
    /// Terrain height below `(x, y)`.
    fn height(&self, x: R, y: R) -> R;
    /// Unit terrain normal at `(x, y)`.
    fn normal(&self, x: R, y: R) -> Vec3<R>;
}

/// Horizontal plane `z = height`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatTerrain<R = f64> {
    /// Constant terrain height.
    pub height: R,
}

impl<R: Real> FlatTerrain<R> {
    /// Flat terrain at `height`.
    #[must_use]
    pub const fn new(height: R) -> Self {
        Self { height }
    }
}

impl<R: Real> Terrain<R> for FlatTerrain<R> {
    fn height(&self, _x: R, _y: R) -> R {
        self.height
    }

    fn normal(&self, _x: R, _y: R) -> Vec3<R> {
        Vec3::UNIT_Z
    }
}

/// Inclined plane `{p : normal · p = offset}`.
///
/// The normal must have a positive Z component; a vertical plane has no
/// height function.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneTerrain<R = f64> {
    normal: Vec3<R>,
    offset: R,
}

impl<R: Real> PlaneTerrain<R> {
    /// Plane through `point` with the given (not necessarily unit) normal.
    ///
    /// The normal must point upward; see [`PlaneTerrain::try_through_point`]
    /// for the checked form.
    #[must_use]
    pub fn through_point(point: Vec3<R>, normal: Vec3<R>) -> Self {
        let normal = normal.normalize();
        debug_assert!(normal.z() > R::EPSILON, "terrain normal must point upward: {normal}");
        Self {
            normal,
            offset: normal.dot(&point),
        }
    }

    /// Checked form of [`PlaneTerrain::through_point`].
    ///
    /// Fails with [`FrameError::NonFiniteInput`] on NaN or infinite input and
    /// with [`FrameError::NonUpwardNormal`] when the normalised normal has a
    /// Z component of at most `R::EPSILON`.
    pub fn try_through_point(point: Vec3<R>, normal: Vec3<R>) -> Result<Self, FrameError> {
        let finite = point.to_array().into_iter().chain(normal.to_array()).all(Real::is_finite);
        if !finite {
            return Err(FrameError::NonFiniteInput);
        }
        let unit = normal.normalize();
        if unit.z() <= R::EPSILON {
            return Err(FrameError::NonUpwardNormal {
                normal_z: unit.z().to_f64(),
            });
        }
        Ok(Self::through_point(point, normal))
    }

    /// Unit plane normal.
    #[must_use]
    pub fn plane_normal(&self) -> Vec3<R> {
        self.normal
    }
}

impl<R: Real> Terrain<R> for PlaneTerrain<R> {
    fn height(&self, x: R, y: R) -> R {
        (self.offset - self.normal.x() * x - self.normal.y() * y) / self.normal.z()
    }

    fn normal(&self, _x: R, _y: R) -> Vec3<R> {
        self.normal
    }
}

/// Contact frame and penetration depth of a disc touching the terrain.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscContact<R = f64> {
    /// Contact frame: origin at the disc's lowest point, local X longitudinal,
    /// local Y lateral, local Z along the terrain normal.
    pub pose: Pose<R>,
    /// Penetration depth measured along the terrain normal.
    pub depth: R,
}

/// Smallest `|n × ẑ|²` for which the disc counts as tilted enough to have a
/// unique lowest point.
const MIN_SIN_TILT_SQUARED: f64 = 1e-3;

/// Contact between a disc (centre, unit normal, radius) and the terrain.
///
/// Returns `None` when the centre is below the terrain or at least one radius
/// above it, when the disc is (almost) horizontal, or when its lowest point
/// is above the terrain.
#[must_use]
pub fn disc_terrain_contact<R, T>(
    terrain: &T,
    disc_center: &Vec3<R>,
    disc_normal: &Vec3<R>,
    disc_radius: R,
) -> Option<DiscContact<R>>
where
    R: Real,
    T: Terrain<R> + ?Sized,
{
    let hc = terrain.height(disc_center.x(), disc_center.y());
    if disc_center.z() <= hc || disc_center.z() >= hc + disc_radius {
        tracing::trace!(center = %disc_center, terrain_height = %hc, "no contact: disc centre out of range");
        return None;
    }

    let dir1 = disc_normal.cross(&Vec3::UNIT_Z);
    let sin_tilt2 = dir1.length_squared();
    if sin_tilt2 < R::from_f64(MIN_SIN_TILT_SQUARED) {
        tracing::trace!(normal = %disc_normal, "no contact: disc is almost horizontal");
        return None;
    }

    let down = disc_normal.cross(&dir1.scale(R::ONE / sin_tilt2.sqrt()));
    let lowest = *disc_center + down.scale(disc_radius);
    let hp = terrain.height(lowest.x(), lowest.y());
    if lowest.z() > hp {
        tracing::trace!(lowest = %lowest, terrain_height = %hp, "no contact: lowest point above terrain");
        return None;
    }

    let normal = terrain.normal(lowest.x(), lowest.y());
    let longitudinal = disc_normal.cross(&normal).normalize();
    let lateral = normal.cross(&longitudinal);
    let orientation = Mat3::from_columns(longitudinal, lateral, normal).to_quat();
    let depth = Vec3::new(R::ZERO, R::ZERO, hp - lowest.z()).dot(&normal);

    tracing::debug!(point = %lowest, depth = %depth, "disc contact");
    Some(DiscContact {
        pose: Pose::new(lowest, orientation),
        depth,
    })
}
