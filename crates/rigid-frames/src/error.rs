// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

/// Errors reported by the checked (`try_*`) constructors.
///
/// The unchecked hot-path API never returns these; it computes through
/// degenerate input instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FrameError {
    /// An auxiliary triad point coincides with the origin.
    #[error("triad point coincides with the origin")]
    CoincidentPoints,
    /// The Y-plane point is collinear with the X axis.
    #[error("triad points are collinear (|x × y| = {cross_length})")]
    CollinearTriad {
        /// Length of `ux × (y_point - origin)`.
        cross_length: f64,
    },
    /// An input coordinate is NaN or infinite, or the construction overflowed.
    #[error("input contains a non-finite component")]
    NonFiniteInput,
    /// The terrain plane normal does not point upward.
    #[error("terrain normal must have a positive z component (n_z = {normal_z})")]
    NonUpwardNormal {
        /// Z component of the normalised plane normal.
        normal_z: f64,
    },
    /// The orientation quaternion is not unit length.
    #[error("orientation is not a unit quaternion (norm = {norm})")]
    NonUnitOrientation {
        /// Observed quaternion norm.
        norm: f64,
    },
}
