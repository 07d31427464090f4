//! 3x3 matrices acting on color triplets.
//!
//! Storage is row-major and matrices multiply column vectors, so
//! `a * b` applied to `v` equals `a * (b * v)`.

use std::ops::{Index, Mul};

/// A 3x3 matrix for RGB/XYZ transforms.
///
/// # Example
///
/// ```rust
/// use imgalgo_math::Mat3;
///
/// let scale = Mat3::diagonal(2.0, 1.0, 0.5);
/// assert_eq!(scale * [1.0, 1.0, 1.0], [2.0, 1.0, 0.5]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    /// Rows.
    pub m: [[f32; 3]; 3],
}

#[inline]
fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[1] * b[2] - a[2] * b[1], a[2] * b[0] - a[0] * b[2], a[0] * b[1] - a[1] * b[0]]
}

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self::diagonal(1.0, 1.0, 1.0);

    /// Creates a matrix from rows.
    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates a matrix whose columns are `c0`, `c1`, `c2`.
    #[inline]
    pub const fn from_cols(c0: [f32; 3], c1: [f32; 3], c2: [f32; 3]) -> Self {
        Self::from_rows([[c0[0], c1[0], c2[0]], [c0[1], c1[1], c2[1]], [c0[2], c1[2], c2[2]]])
    }

    /// Creates a diagonal (per-channel scale) matrix.
    #[inline]
    pub const fn diagonal(d0: f32, d1: f32, d2: f32) -> Self {
        Self::from_rows([[d0, 0.0, 0.0], [0.0, d1, 0.0], [0.0, 0.0, d2]])
    }

    /// Determinant, as the triple product of the rows.
    #[inline]
    pub fn determinant(&self) -> f32 {
        dot(self.m[0], cross(self.m[1], self.m[2]))
    }

    /// Inverse, or `None` for a (near-)singular matrix.
    ///
    /// The columns of the inverse are the pairwise cross products of the
    /// rows, scaled by `1 / det`.
    ///
    /// ```rust
    /// use imgalgo_math::Mat3;
    ///
    /// let inv = Mat3::diagonal(2.0, 4.0, 8.0).inverse().unwrap();
    /// assert_eq!(inv, Mat3::diagonal(0.5, 0.25, 0.125));
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let [r0, r1, r2] = self.m;
        let c0 = cross(r1, r2);
        let det = dot(r0, c0);
        if det.abs() < 1e-10 {
            return None;
        }
        let s = det.recip();
        let scaled = |c: [f32; 3]| [c[0] * s, c[1] * s, c[2] * s];
        Some(Self::from_cols(scaled(c0), scaled(cross(r2, r0)), scaled(cross(r0, r1))))
    }

    /// Multiplies a triplet.
    #[inline]
    pub const fn apply(&self, v: [f32; 3]) -> [f32; 3] {
        let m = &self.m;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }
}

impl Mul<[f32; 3]> for Mat3 {
    type Output = [f32; 3];

    #[inline]
    fn mul(self, rhs: [f32; 3]) -> [f32; 3] {
        self.apply(rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let cols = [0usize, 1, 2].map(|j| self.apply([rhs.m[0][j], rhs.m[1][j], rhs.m[2][j]]));
        Self::from_cols(cols[0], cols[1], cols[2])
    }
}

impl Index<usize> for Mat3 {
    type Output = [f32; 3];

    #[inline]
    fn index(&self, row: usize) -> &[f32; 3] {
        &self.m[row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_identity(m: Mat3, epsilon: f32) {
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(m[i][j], expected, epsilon = epsilon);
            }
        }
    }

    #[test]
    fn test_inverse() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-6);
        let inv = m.inverse().unwrap();
        assert_identity(m * inv, 1e-5);
        assert_identity(inv * m, 1e-5);
    }

    #[test]
    fn test_singular() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_product_order() {
        // Scale then permute: (a * b) v == a (b v)
        let a = Mat3::from_rows([[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]);
        let b = Mat3::diagonal(2.0, 3.0, 4.0);
        let v = [1.0, 1.0, 1.0];
        assert_eq!((a * b) * v, a * (b * v));
        assert_eq!((a * b) * v, [3.0, 4.0, 2.0]);
    }

    #[test]
    fn test_from_cols() {
        let m = Mat3::from_cols([1.0, 2.0, 3.0], [0.0; 3], [0.0; 3]);
        assert_eq!(m.apply([1.0, 0.0, 0.0]), [1.0, 2.0, 3.0]);
        assert_eq!(m[1], [2.0, 0.0, 0.0]);
    }
}
