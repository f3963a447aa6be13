// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Orientation from three reference points.
//!
//! Given an origin, a point on the local X axis, and a point in the local XY
//! plane, the local basis is
//!
//! ```text
//! ux = normalize(x_point - origin)
//! uz = normalize(ux × (y_point - origin))
//! uy = uz × ux
//! ```
//!
//! and the orientation quaternion is extracted from the matrix with columns
//! `(ux, uy, uz)`. The extraction branches on the trace: for `trace ≥ 0` the
//! scalar part is the largest divisor, otherwise the dominant diagonal element
//! selects the largest vector component so the divisor stays away from zero
//! near half-turns.
//!
//! Precondition: `x_point` and `y_point` differ from `origin` and the three
//! points are not collinear. [`Pose::from_triad`] does not check it (the
//! result is undefined for degenerate input); [`Pose::try_from_triad`] does.

use rigid_math::{Mat3, Quat, Real, Vec3};

use crate::error::FrameError;
use crate::pose::Pose;

/// Index of the largest of three diagonal values.
///
/// Ties resolve toward the lower index: `0` beats `1` and `2` on equality,
/// `1` beats `2`.
#[must_use]
pub fn max_diagonal_index<R: Real>(d0: R, d1: R, d2: R) -> usize {
    if d0 >= d1 && d0 >= d2 {
        0
    } else if d1 >= d2 {
        1
    } else {
        2
    }
}

/// Orthonormal triad basis as a matrix with columns `(ux, uy, uz)`.
///
/// Returns the matrix and the length of the unnormalised `uz`, which
/// callers use to detect a collinear triad.
#[must_use]
pub fn triad_basis<R: Real>(origin: &Vec3<R>, x_point: &Vec3<R>, y_point: &Vec3<R>) -> (Mat3<R>, R) {
    let ux = (*x_point - *origin).normalize();
    let raw_z = ux.cross(&(*y_point - *origin));
    let uz = raw_z.normalize();
    let uy = uz.cross(&ux).normalize();
    (Mat3::from_columns(ux, uy, uz), raw_z.length())
}

/// Quaternion extracted from a triad basis matrix.
///
/// In the `trace ≥ 0` branch the vector part is built from the row-minus-column
/// differences `R[1][2] - R[2][1]`, `R[2][0] - R[0][2]`, `R[0][1] - R[1][0]`;
/// in the `trace < 0` branch the scalar part is `(R[i2][i1] - R[i1][i2]) / s`.
/// The pinned triad outputs (identity, the three half-turns, the ±45° and
/// 135° planar cases) depend on exactly these signs.
#[must_use]
pub fn triad_quaternion<R: Real>(m: &Mat3<R>) -> Quat<R> {
    let r = |row: usize, col: usize| m.get(row, col);
    let quarter = R::HALF * R::HALF;
    let trace = m.trace();

    if trace >= R::ZERO {
        let s = (R::ONE + trace).sqrt() * R::TWO;
        return Quat::new(
            s * quarter,
            (r(1, 2) - r(2, 1)) / s,
            (r(2, 0) - r(0, 2)) / s,
            (r(0, 1) - r(1, 0)) / s,
        );
    }

    let i0 = max_diagonal_index(r(0, 0), r(1, 1), r(2, 2));
    let i1 = (i0 + 1) % 3;
    let i2 = (i1 + 1) % 3;
    let s = (R::ONE + r(i0, i0) - r(i1, i1) - r(i2, i2)).sqrt() * R::TWO;

    let mut e = [R::ZERO; 4];
    e[0] = (r(i2, i1) - r(i1, i2)) / s;
    e[i0 + 1] = s * quarter;
    e[i1 + 1] = (r(i0, i1) + r(i1, i0)) / s;
    e[i2 + 1] = (r(i0, i2) + r(i2, i0)) / s;
    Quat::from(e)
}

impl<R: Real> Pose<R> {
    /// Pose at `origin` whose local X axis points at `x_point` and whose local
    /// XY plane contains `y_point`.
    ///
    /// Unchecked: degenerate input (coincident or collinear points) still
    /// produces a value, with undefined orientation. A warning is traced when
    /// the basis is degenerate.
    #[must_use]
    pub fn from_triad(origin: Vec3<R>, x_point: Vec3<R>, y_point: Vec3<R>) -> Self {
        let (basis, cross_length) = triad_basis(&origin, &x_point, &y_point);
        if cross_length <= R::EPSILON {
            tracing::warn!(
                origin = %origin,
                x_point = %x_point,
                y_point = %y_point,
                "degenerate triad: y point is collinear with the x axis"
            );
        }
        Self::new(origin, triad_quaternion(&basis))
    }

    /// Checked form of [`Pose::from_triad`].
    ///
    /// Fails with [`FrameError::CoincidentPoints`] if either auxiliary point
    /// lies within `R::EPSILON` of the origin, and with
    /// [`FrameError::CollinearTriad`] if the Y-plane point is collinear with
    /// the X axis. NaN or infinite coordinates, and spans that overflow,
    /// fail with [`FrameError::NonFiniteInput`]. Input is never adjusted.
    pub fn try_from_triad(origin: Vec3<R>, x_point: Vec3<R>, y_point: Vec3<R>) -> Result<Self, FrameError> {
        let x_len = (x_point - origin).length();
        let y_len = (y_point - origin).length();
        if !x_len.is_finite() || !y_len.is_finite() {
            return Err(FrameError::NonFiniteInput);
        }
        if x_len <= R::EPSILON || y_len <= R::EPSILON {
            return Err(FrameError::CoincidentPoints);
        }
        let (basis, cross_length) = triad_basis(&origin, &x_point, &y_point);
        if cross_length <= R::EPSILON {
            return Err(FrameError::CollinearTriad {
                cross_length: cross_length.to_f64(),
            });
        }
        Ok(Self::new(origin, triad_quaternion(&basis)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn triad(x: [f64; 3], y: [f64; 3]) -> Quat {
        Pose::from_triad(Vec3::ZERO, Vec3::from(x), Vec3::from(y)).orientation()
    }

    #[test]
    fn ties_resolve_toward_lower_index() {
        assert_eq!(max_diagonal_index(1.0, 1.0, 1.0), 0);
        assert_eq!(max_diagonal_index(-1.0, 0.5, 0.5), 1);
        assert_eq!(max_diagonal_index(-1.0, -1.0, 0.5), 2);
        assert_eq!(max_diagonal_index(0.2, -1.0, 0.2), 0);
    }

    #[test]
    fn identity_triad() {
        let q = triad([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(q.equals(&Quat::IDENTITY, EPS), "{q}");
    }

    #[test]
    fn half_turns_take_the_negative_trace_branch() {
        let x = triad([1.0, 0.0, 0.0], [0.0, -1.0, 0.0]);
        assert!(x.equals(&Quat::new(0.0, 1.0, 0.0, 0.0), EPS), "{x}");
        let y = triad([-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(y.equals(&Quat::new(0.0, 0.0, 1.0, 0.0), EPS), "{y}");
        let z = triad([-1.0, 0.0, 0.0], [0.0, -1.0, 0.0]);
        assert!(z.equals(&Quat::new(0.0, 0.0, 0.0, 1.0), EPS), "{z}");
    }

    #[test]
    fn try_from_triad_rejects_degenerate_input() {
        let o = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(
            Pose::try_from_triad(o, o, Vec3::new(0.0, 1.0, 0.0)),
            Err(FrameError::CoincidentPoints)
        );
        let collinear = Pose::try_from_triad(o, o + Vec3::UNIT_X, o + Vec3::new(3.0, 0.0, 0.0));
        assert!(matches!(collinear, Err(FrameError::CollinearTriad { .. })));
    }

    #[test]
    fn try_from_triad_rejects_nan_and_infinite_points() {
        let nan_x = Pose::try_from_triad(Vec3::ZERO, Vec3::new(f64::NAN, 0.0, 0.0), Vec3::UNIT_Y);
        assert_eq!(nan_x, Err(FrameError::NonFiniteInput));
        let nan_origin = Pose::try_from_triad(Vec3::new(0.0, 0.0, f64::NAN), Vec3::UNIT_X, Vec3::UNIT_Y);
        assert_eq!(nan_origin, Err(FrameError::NonFiniteInput));
        let inf_y = Pose::try_from_triad(Vec3::ZERO, Vec3::UNIT_X, Vec3::new(0.0, f64::INFINITY, 0.0));
        assert_eq!(inf_y, Err(FrameError::NonFiniteInput));
    }

    #[test]
    fn try_from_triad_rejects_overflowing_span() {
        let huge = f64::MAX;
        let overflow = Pose::try_from_triad(Vec3::ZERO, Vec3::new(huge, huge, 0.0), Vec3::UNIT_Y);
        assert_eq!(overflow, Err(FrameError::NonFiniteInput));
    }
}
