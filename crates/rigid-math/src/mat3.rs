// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::ops::Mul;

use crate::{Quat, Real, Vec3};

/// Column-major 3×3 matrix, used for rotation (direction cosine) matrices.
///
/// - Column `i` holds the image of the `i`-th basis vector, so a rotation
///   matrix built from a quaternion has the local axes as its columns.
/// - `get(row, col)` indexes mathematically; storage order is an
///   implementation detail.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat3<R = f64> {
    data: [R; 9],
}

impl<R: Real> Mat3<R> {
    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self {
            data: [
                R::ONE, R::ZERO, R::ZERO, // col 0
                R::ZERO, R::ONE, R::ZERO, // col 1
                R::ZERO, R::ZERO, R::ONE, // col 2
            ],
        }
    }

    /// Builds a matrix from its three columns.
    pub fn from_columns(x: Vec3<R>, y: Vec3<R>, z: Vec3<R>) -> Self {
        Self {
            data: [
                x.x(), x.y(), x.z(), //
                y.x(), y.y(), y.z(), //
                z.x(), z.y(), z.z(),
            ],
        }
    }

    /// Builds a matrix from row-major nested arrays (`rows[row][col]`).
    pub fn from_rows(rows: [[R; 3]; 3]) -> Self {
        let mut data = [R::ZERO; 9];
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                data[col * 3 + row] = *value;
            }
        }
        Self { data }
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` or `col` exceeds 2.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> R {
        self.data[col * 3 + row]
    }

    /// Column `col` as a vector.
    ///
    /// # Panics
    /// Panics if `col > 2`.
    pub fn column(&self, col: usize) -> Vec3<R> {
        Vec3::new(
            self.data[col * 3],
            self.data[col * 3 + 1],
            self.data[col * 3 + 2],
        )
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> R {
        self.data[0] + self.data[4] + self.data[8]
    }

    /// Transposed matrix (the inverse, for rotations).
    pub fn transpose(&self) -> Self {
        let mut data = [R::ZERO; 9];
        for row in 0..3 {
            for col in 0..3 {
                data[row * 3 + col] = self.get(row, col);
            }
        }
        Self { data }
    }

    /// Matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut data = [R::ZERO; 9];
        for row in 0..3 {
            for col in 0..3 {
                let mut sum = R::ZERO;
                for k in 0..3 {
                    sum += self.get(row, k) * rhs.get(k, col);
                }
                data[col * 3 + row] = sum;
            }
        }
        Self { data }
    }

    /// Matrix-vector product `self * v`.
    pub fn transform(&self, v: &Vec3<R>) -> Vec3<R> {
        let [x, y, z] = v.to_array();
        Vec3::new(
            self.get(0, 0) * x + self.get(0, 1) * y + self.get(0, 2) * z,
            self.get(1, 0) * x + self.get(1, 1) * y + self.get(1, 2) * z,
            self.get(2, 0) * x + self.get(2, 1) * y + self.get(2, 2) * z,
        )
    }

    /// Rotation matrix of a unit quaternion.
    pub fn from_quat(q: &Quat<R>) -> Self {
        let [w, x, y, z] = q.to_array();
        let two = R::TWO;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Self::from_rows([
            [R::ONE - two * (yy + zz), two * (xy - wz), two * (xz + wy)],
            [two * (xy + wz), R::ONE - two * (xx + zz), two * (yz - wx)],
            [two * (xz - wy), two * (yz + wx), R::ONE - two * (xx + yy)],
        ])
    }

    /// Unit quaternion of a rotation matrix (inverse of [`Mat3::from_quat`]).
    ///
    /// Selects the branch with the largest divisor (trace, or the dominant
    /// diagonal element), which keeps the result accurate near 180°.
    pub fn to_quat(&self) -> Quat<R> {
        let m = |r: usize, c: usize| self.get(r, c);
        let quarter = R::HALF * R::HALF;
        let trace = self.trace();
        if trace > R::ZERO {
            let s = (trace + R::ONE).sqrt() * R::TWO; // 4 e0
            Quat::new(
                quarter * s,
                (m(2, 1) - m(1, 2)) / s,
                (m(0, 2) - m(2, 0)) / s,
                (m(1, 0) - m(0, 1)) / s,
            )
        } else if m(0, 0) > m(1, 1) && m(0, 0) > m(2, 2) {
            let s = (R::ONE + m(0, 0) - m(1, 1) - m(2, 2)).sqrt() * R::TWO; // 4 e1
            Quat::new(
                (m(2, 1) - m(1, 2)) / s,
                quarter * s,
                (m(0, 1) + m(1, 0)) / s,
                (m(0, 2) + m(2, 0)) / s,
            )
        } else if m(1, 1) > m(2, 2) {
            let s = (R::ONE + m(1, 1) - m(0, 0) - m(2, 2)).sqrt() * R::TWO; // 4 e2
            Quat::new(
                (m(0, 2) - m(2, 0)) / s,
                (m(0, 1) + m(1, 0)) / s,
                quarter * s,
                (m(1, 2) + m(2, 1)) / s,
            )
        } else {
            let s = (R::ONE + m(2, 2) - m(0, 0) - m(1, 1)).sqrt() * R::TWO; // 4 e3
            Quat::new(
                (m(1, 0) - m(0, 1)) / s,
                (m(0, 2) + m(2, 0)) / s,
                (m(1, 2) + m(2, 1)) / s,
                quarter * s,
            )
        }
    }
}

impl<R: Real> Default for Mat3<R> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<R: Real> Mul for Mat3<R> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl<R: Real> Mul<Vec3<R>> for Mat3<R> {
    type Output = Vec3<R>;
    fn mul(self, rhs: Vec3<R>) -> Vec3<R> {
        self.transform(&rhs)
    }
}
