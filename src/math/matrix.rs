//! Row-major 3×3 and 4×4 matrices
//!
//! `m[row][col]`. Matrices act on column vectors (`M * v`); `v * M` is the
//! row-vector product and equals `Mᵀ * v`.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::angle::deg_to_rad;
use super::vector::{Axis, check_divisor, parse_rotation_order};
use super::{MathError, Real, Vector3, Vector4};

fn rotation_angle<T: Real>(axis: Axis, pitch: T, yaw: T, roll: T) -> T {
    match axis {
        Axis::X => pitch,
        Axis::Y => yaw,
        Axis::Z => roll,
    }
}

/// Reject a determinant that is zero relative to the entries' magnitude.
///
/// `det` scales with the `n`th power of the entries, so the cutoff is
/// `EPSILON * max|m_ij|^n` rather than a bare `EPSILON`.
fn check_determinant<T: Real, const N: usize>(det: T, m: &[[T; N]; N]) -> Result<T, MathError> {
    let largest = m
        .iter()
        .flatten()
        .fold(T::ZERO, |acc, &e| if e.abs() > acc { e.abs() } else { acc });
    let mut cutoff = T::EPSILON;
    for _ in 0..N {
        cutoff = cutoff * largest;
    }
    if !det.is_finite() || det.abs() <= cutoff {
        Err(MathError::NotInvertible)
    } else {
        Ok(det)
    }
}

// ============================================================================
// Matrix3x3
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3x3<T> {
    pub m: [[T; 3]; 3],
}

impl<T: Real> Default for Matrix3x3<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> Matrix3x3<T> {
    pub fn new(m: [[T; 3]; 3]) -> Self {
        Self { m }
    }

    pub fn from_rows(r0: Vector3<T>, r1: Vector3<T>, r2: Vector3<T>) -> Self {
        Self::new([[r0.x, r0.y, r0.z], [r1.x, r1.y, r1.z], [r2.x, r2.y, r2.z]])
    }

    pub fn zero() -> Self {
        Self::new([[T::ZERO; 3]; 3])
    }

    pub fn identity() -> Self {
        Self::scale(T::ONE, T::ONE, T::ONE)
    }

    /// Diagonal scale matrix
    pub fn scale(x: T, y: T, z: T) -> Self {
        let o = T::ZERO;
        Self::new([[x, o, o], [o, y, o], [o, o, z]])
    }

    /// Rotation about X by `angle` degrees (same sense as `Vector3::pitch`)
    pub fn rotation_x(angle: T) -> Self {
        let rad = deg_to_rad(angle);
        let (c, s) = (rad.cos(), rad.sin());
        let (o, l) = (T::ZERO, T::ONE);
        Self::new([[l, o, o], [o, c, -s], [o, s, c]])
    }

    /// Rotation about Y by `angle` degrees (same sense as `Vector3::yaw`)
    pub fn rotation_y(angle: T) -> Self {
        let rad = deg_to_rad(angle);
        let (c, s) = (rad.cos(), rad.sin());
        let (o, l) = (T::ZERO, T::ONE);
        Self::new([[c, o, s], [o, l, o], [-s, o, c]])
    }

    /// Rotation about Z by `angle` degrees (same sense as `Vector3::roll`)
    pub fn rotation_z(angle: T) -> Self {
        let rad = deg_to_rad(angle);
        let (c, s) = (rad.cos(), rad.sin());
        let (o, l) = (T::ZERO, T::ONE);
        Self::new([[c, -s, o], [s, c, o], [o, o, l]])
    }

    pub fn rotation_axis(axis: Axis, angle: T) -> Self {
        match axis {
            Axis::X => Self::rotation_x(angle),
            Axis::Y => Self::rotation_y(angle),
            Axis::Z => Self::rotation_z(angle),
        }
    }

    /// Composite rotation such that `rotation(p, y, r, order) * v` equals
    /// `v.rotate(p, y, r, order)`.
    pub fn rotation(pitch: T, yaw: T, roll: T, order: &str) -> Result<Self, MathError> {
        let axes = parse_rotation_order(order)?;
        Ok(axes.into_iter().fold(Self::identity(), |acc, axis| {
            Self::rotation_axis(axis, rotation_angle(axis, pitch, yaw, roll)) * acc
        }))
    }

    pub fn row(&self, i: usize) -> Vector3<T> {
        Vector3::new(self.m[i][0], self.m[i][1], self.m[i][2])
    }

    pub fn col(&self, j: usize) -> Vector3<T> {
        Vector3::new(self.m[0][j], self.m[1][j], self.m[2][j])
    }

    pub fn determinant(&self) -> T {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    pub fn trace(&self) -> T {
        self.m[0][0] + self.m[1][1] + self.m[2][2]
    }

    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self::new([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Closed-form cofactor inverse
    pub fn inverse(&self) -> Result<Self, MathError> {
        let det = check_determinant(self.determinant(), &self.m)?;
        let m = &self.m;
        let adj = [
            [
                m[1][1] * m[2][2] - m[1][2] * m[2][1],
                m[0][2] * m[2][1] - m[0][1] * m[2][2],
                m[0][1] * m[1][2] - m[0][2] * m[1][1],
            ],
            [
                m[1][2] * m[2][0] - m[1][0] * m[2][2],
                m[0][0] * m[2][2] - m[0][2] * m[2][0],
                m[0][2] * m[1][0] - m[0][0] * m[1][2],
            ],
            [
                m[1][0] * m[2][1] - m[1][1] * m[2][0],
                m[0][1] * m[2][0] - m[0][0] * m[2][1],
                m[0][0] * m[1][1] - m[0][1] * m[1][0],
            ],
        ];
        Ok(Self::new(adj) * (T::ONE / det))
    }

    pub fn checked_div(&self, s: T) -> Result<Self, MathError> {
        let s = check_divisor(s)?;
        Ok(self.map(|e| e / s))
    }

    fn map(&self, f: impl Fn(T) -> T) -> Self {
        let mut out = self.m;
        for row in out.iter_mut() {
            for e in row.iter_mut() {
                *e = f(*e);
            }
        }
        Self::new(out)
    }

    fn zip(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        let mut out = self.m;
        for (i, row) in out.iter_mut().enumerate() {
            for (j, e) in row.iter_mut().enumerate() {
                *e = f(*e, other.m[i][j]);
            }
        }
        Self::new(out)
    }
}

impl<T: Real> Add for Matrix3x3<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip(&rhs, |a, b| a + b)
    }
}

impl<T: Real> AddAssign for Matrix3x3<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Real> Sub for Matrix3x3<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip(&rhs, |a, b| a - b)
    }
}

impl<T: Real> SubAssign for Matrix3x3<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Real> Neg for Matrix3x3<T> {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|e| -e)
    }
}

impl<T: Real> Mul<T> for Matrix3x3<T> {
    type Output = Self;
    fn mul(self, s: T) -> Self {
        self.map(|e| e * s)
    }
}

impl<T: Real> MulAssign<T> for Matrix3x3<T> {
    fn mul_assign(&mut self, s: T) {
        *self = *self * s;
    }
}

impl<T: Real> Mul for Matrix3x3<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = [[T::ZERO; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, e) in row.iter_mut().enumerate() {
                *e = self.row(i).dot(rhs.col(j));
            }
        }
        Self::new(out)
    }
}

impl<T: Real> Mul<Vector3<T>> for Matrix3x3<T> {
    type Output = Vector3<T>;
    fn mul(self, v: Vector3<T>) -> Vector3<T> {
        Vector3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }
}

impl<T: Real> Mul<Matrix3x3<T>> for Vector3<T> {
    type Output = Vector3<T>;
    fn mul(self, m: Matrix3x3<T>) -> Vector3<T> {
        Vector3::new(self.dot(m.col(0)), self.dot(m.col(1)), self.dot(m.col(2)))
    }
}

// ============================================================================
// Matrix4x4
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4x4<T> {
    pub m: [[T; 4]; 4],
}

impl<T: Real> Default for Matrix4x4<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> Matrix4x4<T> {
    pub fn new(m: [[T; 4]; 4]) -> Self {
        Self { m }
    }

    pub fn zero() -> Self {
        Self::new([[T::ZERO; 4]; 4])
    }

    pub fn identity() -> Self {
        Self::scale(T::ONE, T::ONE, T::ONE, T::ONE)
    }

    pub fn scale(x: T, y: T, z: T, w: T) -> Self {
        let o = T::ZERO;
        Self::new([[x, o, o, o], [o, y, o, o], [o, o, z, o], [o, o, o, w]])
    }

    /// Embed a 3×3 block in the upper left with 1 in the corner
    pub fn from_matrix3x3(b: Matrix3x3<T>) -> Self {
        let mut out = Self::identity();
        for i in 0..3 {
            for j in 0..3 {
                out.m[i][j] = b.m[i][j];
            }
        }
        out
    }

    /// Affine translation in the last column
    pub fn from_translation(t: Vector3<T>) -> Self {
        let mut out = Self::identity();
        out.m[0][3] = t.x;
        out.m[1][3] = t.y;
        out.m[2][3] = t.z;
        out
    }

    pub fn rotation_x(angle: T) -> Self {
        Self::from_matrix3x3(Matrix3x3::rotation_x(angle))
    }

    pub fn rotation_y(angle: T) -> Self {
        Self::from_matrix3x3(Matrix3x3::rotation_y(angle))
    }

    pub fn rotation_z(angle: T) -> Self {
        Self::from_matrix3x3(Matrix3x3::rotation_z(angle))
    }

    pub fn rotation(pitch: T, yaw: T, roll: T, order: &str) -> Result<Self, MathError> {
        Matrix3x3::rotation(pitch, yaw, roll, order).map(Self::from_matrix3x3)
    }

    pub fn upper_left(&self) -> Matrix3x3<T> {
        let m = &self.m;
        Matrix3x3::new([
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ])
    }

    pub fn row(&self, i: usize) -> Vector4<T> {
        Vector4::new(self.m[i][0], self.m[i][1], self.m[i][2], self.m[i][3])
    }

    pub fn col(&self, j: usize) -> Vector4<T> {
        Vector4::new(self.m[0][j], self.m[1][j], self.m[2][j], self.m[3][j])
    }

    /// 3×3 matrix left after deleting `row` and `col`
    fn minor(&self, row: usize, col: usize) -> Matrix3x3<T> {
        let mut out = [[T::ZERO; 3]; 3];
        for (oi, i) in (0..4).filter(|&i| i != row).enumerate() {
            for (oj, j) in (0..4).filter(|&j| j != col).enumerate() {
                out[oi][oj] = self.m[i][j];
            }
        }
        Matrix3x3::new(out)
    }

    fn cofactor(&self, row: usize, col: usize) -> T {
        let d = self.minor(row, col).determinant();
        if (row + col) % 2 == 0 { d } else { -d }
    }

    /// Cofactor expansion along the first row
    pub fn determinant(&self) -> T {
        (0..4).fold(T::ZERO, |acc, j| acc + self.m[0][j] * self.cofactor(0, j))
    }

    pub fn trace(&self) -> T {
        self.m[0][0] + self.m[1][1] + self.m[2][2] + self.m[3][3]
    }

    pub fn transpose(&self) -> Self {
        let mut out = self.m;
        for (i, row) in out.iter_mut().enumerate() {
            for (j, e) in row.iter_mut().enumerate() {
                *e = self.m[j][i];
            }
        }
        Self::new(out)
    }

    /// Adjugate over determinant
    pub fn inverse(&self) -> Result<Self, MathError> {
        let det = check_determinant(self.determinant(), &self.m)?;
        let inv_det = T::ONE / det;
        let mut out = [[T::ZERO; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, e) in row.iter_mut().enumerate() {
                *e = self.cofactor(j, i) * inv_det;
            }
        }
        Ok(Self::new(out))
    }

    pub fn checked_div(&self, s: T) -> Result<Self, MathError> {
        let s = check_divisor(s)?;
        Ok(self.map(|e| e / s))
    }

    /// Transform a point (w = 1) and divide back out of homogeneous space
    pub fn transform_point(&self, p: Vector3<T>) -> Vector3<T> {
        (*self * p.to_vector4(T::ONE)).to_vector3()
    }

    fn map(&self, f: impl Fn(T) -> T) -> Self {
        let mut out = self.m;
        for row in out.iter_mut() {
            for e in row.iter_mut() {
                *e = f(*e);
            }
        }
        Self::new(out)
    }

    fn zip(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        let mut out = self.m;
        for (i, row) in out.iter_mut().enumerate() {
            for (j, e) in row.iter_mut().enumerate() {
                *e = f(*e, other.m[i][j]);
            }
        }
        Self::new(out)
    }
}

impl<T: Real> Add for Matrix4x4<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip(&rhs, |a, b| a + b)
    }
}

impl<T: Real> AddAssign for Matrix4x4<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Real> Sub for Matrix4x4<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip(&rhs, |a, b| a - b)
    }
}

impl<T: Real> SubAssign for Matrix4x4<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Real> Neg for Matrix4x4<T> {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|e| -e)
    }
}

impl<T: Real> Mul<T> for Matrix4x4<T> {
    type Output = Self;
    fn mul(self, s: T) -> Self {
        self.map(|e| e * s)
    }
}

impl<T: Real> MulAssign<T> for Matrix4x4<T> {
    fn mul_assign(&mut self, s: T) {
        *self = *self * s;
    }
}

impl<T: Real> Mul for Matrix4x4<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = [[T::ZERO; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, e) in row.iter_mut().enumerate() {
                *e = self.row(i).dot(rhs.col(j));
            }
        }
        Self::new(out)
    }
}

impl<T: Real> Mul<Vector4<T>> for Matrix4x4<T> {
    type Output = Vector4<T>;
    fn mul(self, v: Vector4<T>) -> Vector4<T> {
        Vector4::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
            self.row(3).dot(v),
        )
    }
}

impl<T: Real> Mul<Matrix4x4<T>> for Vector4<T> {
    type Output = Vector4<T>;
    fn mul(self, m: Matrix4x4<T>) -> Vector4<T> {
        Vector4::new(
            self.dot(m.col(0)),
            self.dot(m.col(1)),
            self.dot(m.col(2)),
            self.dot(m.col(3)),
        )
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($t:ty) => {
        impl Mul<Matrix3x3<$t>> for $t {
            type Output = Matrix3x3<$t>;
            fn mul(self, m: Matrix3x3<$t>) -> Matrix3x3<$t> {
                m * self
            }
        }

        impl Mul<Matrix4x4<$t>> for $t {
            type Output = Matrix4x4<$t>;
            fn mul(self, m: Matrix4x4<$t>) -> Matrix4x4<$t> {
                m * self
            }
        }
    };
}

impl_scalar_lhs_mul!(f32);
impl_scalar_lhs_mul!(f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::scalar_triple_product;

    fn approx3(a: &Matrix3x3<f64>, b: &Matrix3x3<f64>, eps: f64) -> bool {
        (0..3).all(|i| (0..3).all(|j| (a.m[i][j] - b.m[i][j]).abs() < eps))
    }

    fn approx4(a: &Matrix4x4<f64>, b: &Matrix4x4<f64>, eps: f64) -> bool {
        (0..4).all(|i| (0..4).all(|j| (a.m[i][j] - b.m[i][j]).abs() < eps))
    }

    #[test]
    fn test_rotation_matrices_orthogonal() {
        for angle in [0.0f64, 17.0, 90.0, -135.0, 400.0] {
            for r in [
                Matrix3x3::rotation_x(angle),
                Matrix3x3::rotation_y(angle),
                Matrix3x3::rotation_z(angle),
            ] {
                assert!(approx3(&(r * r.transpose()), &Matrix3x3::identity(), 1e-12));
                assert!((r.determinant() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_axis_matrices_match_vector_rotations() {
        let v = Vector3::new(0.3f64, -1.2, 2.5);
        let close = |a: Vector3<f64>, b: Vector3<f64>| (a - b).magnitude() < 1e-12;
        assert!(close(Matrix3x3::rotation_x(40.0) * v, v.pitch(40.0)));
        assert!(close(Matrix3x3::rotation_y(40.0) * v, v.yaw(40.0)));
        assert!(close(Matrix3x3::rotation_z(40.0) * v, v.roll(40.0)));
    }

    #[test]
    fn test_composite_rotation_matches_vector() {
        let v = Vector3::new(1.0f64, 2.0, 3.0);
        for order in ["xyz", "zyx", "yx", "zz", ""] {
            let m = Matrix3x3::rotation(15.0, -40.0, 75.0, order).unwrap();
            let expected = v.rotate(15.0, -40.0, 75.0, order).unwrap();
            assert!((m * v - expected).magnitude() < 1e-12, "order {order}");
        }
        assert_eq!(
            Matrix3x3::<f64>::rotation(1.0, 2.0, 3.0, "xw"),
            Err(MathError::InvalidRotationOrder('w'))
        );
    }

    #[test]
    fn test_triple_product_equals_determinant() {
        let u = Vector3::new(1.0f64, 2.0, 3.0);
        let v = Vector3::new(0.0, -1.0, 4.0);
        let w = Vector3::new(5.0, 0.5, -2.0);
        let det = Matrix3x3::from_rows(u, v, w).determinant();
        assert!((scalar_triple_product(u, v, w) - det).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_3x3() {
        let m = Matrix3x3::new([[2.0f64, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 2.0]]);
        assert_eq!(m.determinant(), 6.0);
        let inv = m.inverse().unwrap();
        assert!(approx3(&(m * inv), &Matrix3x3::identity(), 1e-12));
        assert!(approx3(&(inv * m), &Matrix3x3::identity(), 1e-12));
    }

    #[test]
    fn test_small_entries_invert() {
        let m = Matrix3x3::<f64>::scale(1e-6, 1e-6, 1e-6);
        let inv = m.inverse().unwrap();
        assert!(approx3(&(m * inv), &Matrix3x3::identity(), 1e-9));
        assert!((inv.m[0][0] - 1e6).abs() < 1e-3);

        let m = Matrix3x3::<f32>::scale(0.004, 0.004, 0.004);
        assert!(m.inverse().is_ok());

        let m = Matrix4x4::<f64>::scale(1e-5, 2e-5, 3e-5, 4e-5);
        let inv = m.inverse().unwrap();
        assert!(approx4(&(m * inv), &Matrix4x4::identity(), 1e-9));

        // nearly dependent rows stay rejected at any magnitude
        let m = Matrix3x3::new([[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(m.inverse(), Err(MathError::NotInvertible));
        assert_eq!((m * 1e-6).inverse(), Err(MathError::NotInvertible));
    }

    #[test]
    fn test_singular_3x3_not_invertible() {
        let m = Matrix3x3::new([[1.0f64, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
        assert_eq!(m.inverse(), Err(MathError::NotInvertible));
        assert_eq!(Matrix3x3::<f32>::zero().inverse(), Err(MathError::NotInvertible));
    }

    #[test]
    fn test_vector_times_matrix_is_transpose_product() {
        let m = Matrix3x3::new([[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]);
        let v = Vector3::new(1.0, -1.0, 2.0);
        assert_eq!(v * m, m.transpose() * v);
    }

    #[test]
    fn test_trace_and_scalar_ops() {
        let m = Matrix3x3::<f64>::scale(1.0, 2.0, 3.0);
        assert_eq!(m.trace(), 6.0);
        assert_eq!((2.0 * m).trace(), 12.0);
        assert_eq!(m.checked_div(0.0), Err(MathError::DivideByZero));
        assert_eq!(m.checked_div(2.0).unwrap().trace(), 3.0);
        assert_eq!((m - m), Matrix3x3::zero());
        assert_eq!((m + m).trace(), 12.0);
    }

    #[test]
    fn test_4x4_determinant_and_inverse() {
        let m = Matrix4x4::new([
            [4.0f64, 7.0, 2.0, 3.0],
            [0.0, 5.0, 1.0, 2.0],
            [1.0, 0.0, 6.0, 1.0],
            [2.0, 3.0, 1.0, 8.0],
        ]);
        let det = m.determinant();
        assert!(det.abs() > 1.0);
        let inv = m.inverse().unwrap();
        assert!(approx4(&(m * inv), &Matrix4x4::identity(), 1e-10));
        assert!((m.transpose().determinant() - det).abs() < 1e-9);

        let scale = Matrix4x4::<f64>::scale(2.0, 3.0, 4.0, 5.0);
        assert_eq!(scale.determinant(), 120.0);
        assert_eq!(
            Matrix4x4::<f64>::scale(1.0, 1.0, 0.0, 1.0).inverse(),
            Err(MathError::NotInvertible)
        );
    }

    #[test]
    fn test_4x4_translation_and_blocks() {
        let t = Matrix4x4::from_translation(Vector3::new(1.0f64, 2.0, 3.0));
        assert_eq!(t.transform_point(Vector3::zero()), Vector3::new(1.0, 2.0, 3.0));
        let inv = t.inverse().unwrap();
        assert_eq!(
            inv.transform_point(Vector3::new(1.0, 2.0, 3.0)),
            Vector3::zero()
        );

        let r = Matrix4x4::rotation(30.0f64, 0.0, 0.0, "x").unwrap();
        assert!(approx3(&r.upper_left(), &Matrix3x3::rotation_x(30.0), 1e-15));
        assert_eq!(r.m[3][3], 1.0);
        assert_eq!(r.trace(), r.upper_left().trace() + 1.0);

        let v = Vector4::new(1.0f64, 2.0, 3.0, 4.0);
        assert_eq!(v * t, t.transpose() * v);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_composite_rotation_is_orthogonal(p in -360.0f64..360.0, y in -360.0f64..360.0, r in -360.0f64..360.0) {
            let m = Matrix3x3::rotation(p, y, r, "zxy").unwrap();
            let id = m * m.transpose();
            for i in 0..3 {
                for j in 0..3 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    prop_assert!((id.m[i][j] - expected).abs() < 1e-9);
                }
            }
            let inv = m.inverse().unwrap();
            let t = m.transpose();
            for i in 0..3 {
                for j in 0..3 {
                    prop_assert!((inv.m[i][j] - t.m[i][j]).abs() < 1e-9);
                }
            }
        }

        #[test]
        fn prop_scaled_rotation_inverts(
            p in -180.0f64..180.0,
            y in -180.0f64..180.0,
            sx in 0.5f64..2.0,
            sy in 0.5f64..2.0,
            sz in 0.5f64..2.0,
            exp in -8i32..8,
        ) {
            // well conditioned at every magnitude
            let k = 10f64.powi(exp);
            let m = Matrix3x3::rotation(p, y, 0.0, "xy").unwrap() * Matrix3x3::scale(sx * k, sy * k, sz * k);
            let inv = m.inverse().unwrap();
            let id = m * inv;
            for i in 0..3 {
                for j in 0..3 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    prop_assert!((id.m[i][j] - expected).abs() < 1e-9);
                }
            }
        }
    }
}
