// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Rigid-body math primitives: scalar precision abstraction, 3D vectors,
//! unit quaternions, and 3×3 rotation matrices.
//!
//! Conventions:
//! - Quaternions are scalar-first, `(e0, e1, e2, e3)`, with `e0` the real part.
//! - `Quat::rotate` maps a vector from a local frame into its parent frame;
//!   `Quat::rotate_back` is the inverse mapping.
//! - `Mat3` columns are the local axes expressed in parent coordinates, so
//!   `Mat3::transform` agrees with `Quat::rotate` for the same orientation.
//!
//! Every type is generic over [`Real`] (implemented for `f32` and `f64`) and
//! defaults to `f64`. Values are `Copy`; no operation allocates.

mod mat3;
mod quat;
mod real;
mod vec3;

pub use mat3::Mat3;
pub use quat::Quat;
pub use real::Real;
pub use vec3::Vec3;

/// Default absolute tolerance for `equals`-style comparisons in tests and
/// diagnostics.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Clamps `value` to the inclusive `[min, max]` range.
pub fn clamp<R: Real>(value: R, min: R, max: R) -> R {
    debug_assert!(min <= max, "invalid clamp range: {min} > {max}");
    value.max(min).min(max)
}

/// Converts degrees to radians.
pub fn deg_to_rad<R: Real>(value: R) -> R {
    value * R::from_f64(core::f64::consts::PI / 180.0)
}

/// Converts radians to degrees.
pub fn rad_to_deg<R: Real>(value: R) -> R {
    value * R::from_f64(180.0 / core::f64::consts::PI)
}
