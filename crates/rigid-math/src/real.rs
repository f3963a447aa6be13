// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Floating-point precision abstraction for the rigid-body math types.
//!
//! Vectors, quaternions and matrices are generic over [`Real`] so callers can
//! pick `f32` or `f64` storage. Mixed-precision arithmetic is not supported:
//! every operand of an operation shares the same `Real`.
//!
//! Contract:
//! - Operations are plain IEEE-754 arithmetic; NaN and infinities propagate
//!   and are never trapped.
//! - `EPSILON` is a degeneracy threshold (lengths at or below it are treated
//!   as zero), not machine precision.

use core::fmt::{Debug, Display};
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Real scalar used by [`crate::Vec3`], [`crate::Quat`] and [`crate::Mat3`].
///
/// Arithmetic is required through the standard operator traits so generic
/// code can use `+`, `-`, `*`, `/` and unary `-` directly.
pub trait Real:
    Copy
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// `2`.
    const TWO: Self;
    /// `0.5`.
    const HALF: Self;
    /// Degeneracy threshold for lengths and norms.
    const EPSILON: Self;

    /// Square root.
    fn sqrt(self) -> Self;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Sine and cosine of `self` (radians).
    fn sin_cos(self) -> (Self, Self);

    /// Four-quadrant arctangent of `self / other`.
    fn atan2(self, other: Self) -> Self;

    /// Arc cosine (radians).
    fn acos(self) -> Self;

    /// `true` unless the value is NaN or infinite.
    fn is_finite(self) -> bool;

    /// Larger of two values (NaN-ignoring, as the std float methods).
    fn max(self, other: Self) -> Self;

    /// Smaller of two values (NaN-ignoring, as the std float methods).
    fn min(self, other: Self) -> Self;

    /// Converts from `f64`, rounding to this precision.
    fn from_f64(value: f64) -> Self;

    /// Widens to `f64` for diagnostics and interop.
    fn to_f64(self) -> f64;
}

macro_rules! impl_real {
    ($t:ty, $eps:expr) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const HALF: Self = 0.5;
            const EPSILON: Self = $eps;

            #[inline]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }

            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }

            #[inline]
            fn sin_cos(self) -> (Self, Self) {
                <$t>::sin_cos(self)
            }

            #[inline]
            fn atan2(self, other: Self) -> Self {
                <$t>::atan2(self, other)
            }

            #[inline]
            fn acos(self) -> Self {
                <$t>::acos(self)
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }

            #[inline]
            fn max(self, other: Self) -> Self {
                <$t>::max(self, other)
            }

            #[inline]
            fn min(self, other: Self) -> Self {
                <$t>::min(self, other)
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }
        }
    };
}

impl_real!(f32, 1e-6);
impl_real!(f64, 1e-12);

#[cfg(test)]
mod tests {
    use super::Real;

    fn hypot<R: Real>(a: R, b: R) -> R {
        (a * a + b * b).sqrt()
    }

    #[test]
    fn generic_code_runs_in_both_precisions() {
        assert_eq!(hypot(3.0_f32, 4.0_f32), 5.0);
        assert_eq!(hypot(3.0_f64, 4.0_f64), 5.0);
    }

    #[test]
    fn from_f64_rounds_to_target_precision() {
        let third = <f32 as Real>::from_f64(1.0 / 3.0);
        assert_eq!(third, 1.0_f32 / 3.0);
        assert_eq!(<f64 as Real>::from_f64(0.1).to_f64(), 0.1);
    }

    #[test]
    fn non_finite_values_are_detected() {
        assert!(<f64 as Real>::is_finite(1.0));
        assert!(!<f64 as Real>::is_finite(f64::NAN));
        assert!(!<f32 as Real>::is_finite(f32::INFINITY));
        assert!((<f64 as Real>::acos(0.0) - core::f64::consts::FRAC_PI_2).abs() < 1e-15);
    }

    #[test]
    fn epsilon_is_tighter_for_double_precision() {
        assert!(<f64 as Real>::EPSILON.to_f64() < <f32 as Real>::EPSILON.to_f64());
    }
}
