//! 2-, 3- and 4-component vectors
//!
//! Angles passed to `pitch`/`yaw`/`roll` and to the composite `rotate` are
//! in degrees. Rotations are right-handed:
//! - pitch: about X, `(x, y cos - z sin, y sin + z cos)`
//! - yaw: about Y, `(x cos + z sin, y, -x sin + z cos)`
//! - roll: about Z, `(x cos - y sin, x sin + y cos, z)`

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::angle::deg_to_rad;
use super::{Matrix3x3, Matrix4x4, MathError, Quaternion, Real};

/// Body axis named by a letter of a composite rotation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Pitch axis
    X,
    /// Yaw axis
    Y,
    /// Roll axis
    Z,
}

impl Axis {
    pub fn from_char(c: char) -> Result<Self, MathError> {
        match c {
            'x' => Ok(Axis::X),
            'y' => Ok(Axis::Y),
            'z' => Ok(Axis::Z),
            other => Err(MathError::InvalidRotationOrder(other)),
        }
    }
}

/// Parse a rotation order such as `"xyz"` or `"zx"`.
///
/// The whole string is validated before anything is returned, so a caller
/// that parses first never applies a partial rotation.
pub fn parse_rotation_order(order: &str) -> Result<Vec<Axis>, MathError> {
    order.chars().map(Axis::from_char).collect()
}

/// Cosine and sine of an angle given in degrees
#[inline]
fn cos_sin<T: Real>(angle_deg: T) -> (T, T) {
    let rad = deg_to_rad(angle_deg);
    (rad.cos(), rad.sin())
}

/// Reject divisors at or below machine epsilon
#[inline]
pub(crate) fn check_divisor<T: Real>(s: T) -> Result<T, MathError> {
    if s.abs() <= T::EPSILON {
        Err(MathError::DivideByZero)
    } else {
        Ok(s)
    }
}

// ============================================================================
// Vector2
// ============================================================================

/// A 2-component vector, used for ground-plane footprints and particles
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

impl<T: Real> Vector2<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(T::ZERO, T::ZERO)
    }

    pub fn magnitude(&self) -> T {
        self.dot(*self).sqrt()
    }

    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// 2-D cross product (z component of the 3-D cross of the embedded vectors)
    pub fn perp_dot(&self, other: Self) -> T {
        self.x * other.y - self.y * other.x
    }

    /// Normalize in place; near-zero vectors become zero
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    pub fn normalized(&self) -> Self {
        let m = self.magnitude();
        if m < T::TOLERANCE {
            Self::zero()
        } else {
            Self::new(self.x / m, self.y / m)
        }
    }

    pub fn checked_div(&self, s: T) -> Result<Self, MathError> {
        let s = check_divisor(s)?;
        Ok(Self::new(self.x / s, self.y / s))
    }

    /// Rotate counter-clockwise by a degree angle
    pub fn rotate(&self, angle_deg: T) -> Self {
        let (c, s) = cos_sin(angle_deg);
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }
}

impl<T: Real> Add for Vector2<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Real> AddAssign for Vector2<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T: Real> Sub for Vector2<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Real> SubAssign for Vector2<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<T: Real> Mul<T> for Vector2<T> {
    type Output = Self;
    fn mul(self, s: T) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

impl<T: Real> MulAssign<T> for Vector2<T> {
    fn mul_assign(&mut self, s: T) {
        self.x *= s;
        self.y *= s;
    }
}

impl<T: Real> Neg for Vector2<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

// ============================================================================
// Vector3
// ============================================================================

/// A 3-component vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Real> Vector3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO)
    }

    pub fn splat(v: T) -> Self {
        Self::new(v, v, v)
    }

    pub fn unit_x() -> Self {
        Self::new(T::ONE, T::ZERO, T::ZERO)
    }

    pub fn unit_y() -> Self {
        Self::new(T::ZERO, T::ONE, T::ZERO)
    }

    pub fn unit_z() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ONE)
    }

    pub fn magnitude_squared(&self) -> T {
        self.dot(*self)
    }

    pub fn magnitude(&self) -> T {
        self.magnitude_squared().sqrt()
    }

    /// Normalize in place. A magnitude below 1e-6 yields the zero vector.
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    pub fn normalized(&self) -> Self {
        let m = self.magnitude();
        if m < T::TOLERANCE {
            Self::zero()
        } else {
            Self::new(self.x / m, self.y / m, self.z / m)
        }
    }

    /// Flip direction in place
    pub fn reverse(&mut self) {
        *self = -*self;
    }

    pub fn reversed(&self) -> Self {
        -*self
    }

    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn distance(&self, other: Self) -> T {
        (*self - other).magnitude()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component-wise division by a scalar
    pub fn checked_div(&self, s: T) -> Result<Self, MathError> {
        let s = check_divisor(s)?;
        Ok(Self::new(self.x / s, self.y / s, self.z / s))
    }

    /// Rotate about the X axis by `angle` degrees
    pub fn pitch(&self, angle: T) -> Self {
        let (c, s) = cos_sin(angle);
        Self::new(self.x, self.y * c - self.z * s, self.y * s + self.z * c)
    }

    /// Rotate about the Y axis by `angle` degrees
    pub fn yaw(&self, angle: T) -> Self {
        let (c, s) = cos_sin(angle);
        Self::new(self.x * c + self.z * s, self.y, -self.x * s + self.z * c)
    }

    /// Rotate about the Z axis by `angle` degrees
    pub fn roll(&self, angle: T) -> Self {
        let (c, s) = cos_sin(angle);
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c, self.z)
    }

    /// Rotate about a single axis; the angle is picked from (pitch, yaw, roll)
    pub fn rotate_axis(&self, axis: Axis, angle: T) -> Self {
        match axis {
            Axis::X => self.pitch(angle),
            Axis::Y => self.yaw(angle),
            Axis::Z => self.roll(angle),
        }
    }

    /// Apply pitch/yaw/roll in the order given by `order`, left to right.
    ///
    /// `"xy"` pitches first and then yaws. An unknown letter rejects the
    /// whole call.
    pub fn rotate(&self, pitch: T, yaw: T, roll: T, order: &str) -> Result<Self, MathError> {
        let axes = parse_rotation_order(order)?;
        Ok(axes.into_iter().fold(*self, |v, axis| {
            let angle = match axis {
                Axis::X => pitch,
                Axis::Y => yaw,
                Axis::Z => roll,
            };
            v.rotate_axis(axis, angle)
        }))
    }

    pub fn to_vector4(&self, w: T) -> Vector4<T> {
        Vector4::new(self.x, self.y, self.z, w)
    }

    /// Quaternion rotating by `angle` radians about this vector (normalized first)
    pub fn to_quaternion(&self, angle: T) -> Quaternion<T> {
        Quaternion::from_axis_angle(self.normalized(), angle)
    }

    /// Diagonal matrix with this vector on the diagonal
    pub fn to_matrix3x3(&self) -> Matrix3x3<T> {
        Matrix3x3::scale(self.x, self.y, self.z)
    }

    /// Diagonal matrix with this vector on the diagonal and 1 in the corner
    pub fn to_matrix4x4(&self) -> Matrix4x4<T> {
        Matrix4x4::scale(self.x, self.y, self.z, T::ONE)
    }

    /// Drop the y component, projecting onto the ground (x, z) plane
    pub fn ground_xz(&self) -> Vector2<T> {
        Vector2::new(self.x, self.z)
    }
}

/// u · (v × w)
pub fn scalar_triple_product<T: Real>(u: Vector3<T>, v: Vector3<T>, w: Vector3<T>) -> T {
    u.dot(v.cross(w))
}

/// u × (v × w)
pub fn vector_triple_product<T: Real>(u: Vector3<T>, v: Vector3<T>, w: Vector3<T>) -> Vector3<T> {
    u.cross(v.cross(w))
}

impl<T: Real> Add for Vector3<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Real> AddAssign for Vector3<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T: Real> Sub for Vector3<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Real> SubAssign for Vector3<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl<T: Real> Mul<T> for Vector3<T> {
    type Output = Self;
    fn mul(self, s: T) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl<T: Real> MulAssign<T> for Vector3<T> {
    fn mul_assign(&mut self, s: T) {
        self.x *= s;
        self.y *= s;
        self.z *= s;
    }
}

impl<T: Real> Neg for Vector3<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// ============================================================================
// Vector4
// ============================================================================

/// A 4-component vector (homogeneous coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector4<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

impl<T: Real> Vector4<T> {
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    pub fn zero() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO, T::ZERO)
    }

    pub fn xyz(&self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }

    fn with_xyz(v: Vector3<T>, w: T) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn magnitude(&self) -> T {
        self.dot(*self).sqrt()
    }

    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    pub fn normalized(&self) -> Self {
        let m = self.magnitude();
        if m < T::TOLERANCE {
            Self::zero()
        } else {
            Self::new(self.x / m, self.y / m, self.z / m, self.w / m)
        }
    }

    /// Cross product of the xyz parts; w of the result is zero
    pub fn cross(&self, other: Self) -> Self {
        Self::with_xyz(self.xyz().cross(other.xyz()), T::ZERO)
    }

    pub fn checked_div(&self, s: T) -> Result<Self, MathError> {
        let s = check_divisor(s)?;
        Ok(Self::new(self.x / s, self.y / s, self.z / s, self.w / s))
    }

    pub fn pitch(&self, angle: T) -> Self {
        Self::with_xyz(self.xyz().pitch(angle), self.w)
    }

    pub fn yaw(&self, angle: T) -> Self {
        Self::with_xyz(self.xyz().yaw(angle), self.w)
    }

    pub fn roll(&self, angle: T) -> Self {
        Self::with_xyz(self.xyz().roll(angle), self.w)
    }

    /// Composite rotation of the xyz part; w is preserved
    pub fn rotate(&self, pitch: T, yaw: T, roll: T, order: &str) -> Result<Self, MathError> {
        let rotated = self.xyz().rotate(pitch, yaw, roll, order)?;
        Ok(Self::with_xyz(rotated, self.w))
    }

    /// Perspective divide when w is non-zero, otherwise the raw xyz
    pub fn to_vector3(&self) -> Vector3<T> {
        if self.w != T::ZERO {
            Vector3::new(self.x / self.w, self.y / self.w, self.z / self.w)
        } else {
            self.xyz()
        }
    }

    /// Reinterpret as a quaternion with `w` as the scalar part
    pub fn to_quaternion(&self) -> Quaternion<T> {
        Quaternion::new(self.w, self.x, self.y, self.z)
    }

    /// Diagonal matrix from xyz (w dropped)
    pub fn to_matrix3x3(&self) -> Matrix3x3<T> {
        Matrix3x3::scale(self.x, self.y, self.z)
    }

    pub fn to_matrix4x4(&self) -> Matrix4x4<T> {
        Matrix4x4::scale(self.x, self.y, self.z, self.w)
    }
}

impl<T: Real> Add for Vector4<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl<T: Real> AddAssign for Vector4<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Real> Sub for Vector4<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl<T: Real> SubAssign for Vector4<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Real> Mul<T> for Vector4<T> {
    type Output = Self;
    fn mul(self, s: T) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl<T: Real> MulAssign<T> for Vector4<T> {
    fn mul_assign(&mut self, s: T) {
        *self = *self * s;
    }
}

impl<T: Real> Neg for Vector4<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

// scalar * vector for the concrete float widths
macro_rules! impl_scalar_lhs_mul {
    ($t:ty) => {
        impl Mul<Vector2<$t>> for $t {
            type Output = Vector2<$t>;
            fn mul(self, v: Vector2<$t>) -> Vector2<$t> {
                v * self
            }
        }

        impl Mul<Vector3<$t>> for $t {
            type Output = Vector3<$t>;
            fn mul(self, v: Vector3<$t>) -> Vector3<$t> {
                v * self
            }
        }

        impl Mul<Vector4<$t>> for $t {
            type Output = Vector4<$t>;
            fn mul(self, v: Vector4<$t>) -> Vector4<$t> {
                v * self
            }
        }
    };
}

impl_scalar_lhs_mul!(f32);
impl_scalar_lhs_mul!(f64);


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn vec3() -> impl Strategy<Value = Vector3<f64>> {
        (-1e3f64..1e3, -1e3f64..1e3, -1e3f64..1e3).prop_map(|(x, y, z)| Vector3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn prop_rotation_inverse_restores_vector(v in vec3(), angle in -360.0f64..360.0) {
            let scale = v.magnitude().max(1.0);
            for axis in [Axis::X, Axis::Y, Axis::Z] {
                let back = v.rotate_axis(axis, angle).rotate_axis(axis, -angle);
                prop_assert!((back - v).magnitude() / scale < 1e-6);
            }
        }

        #[test]
        fn prop_rotation_preserves_length(v in vec3(), p in -180.0f64..180.0, y in -180.0f64..180.0, r in -180.0f64..180.0) {
            let rotated = v.rotate(p, y, r, "xyz").unwrap();
            prop_assert!((rotated.magnitude() - v.magnitude()).abs() < 1e-9 * v.magnitude().max(1.0));
        }

        #[test]
        fn prop_cross_is_orthogonal(a in vec3(), b in vec3()) {
            let c = a.cross(b);
            let scale = (a.magnitude() * b.magnitude()).max(1.0) * c.magnitude().max(1.0);
            prop_assert!(c.dot(a).abs() / scale < 1e-9);
            prop_assert!(c.dot(b).abs() / scale < 1e-9);
        }

        #[test]
        fn prop_normalize_never_nan(x in -1e-5f64..1e-5, y in -1e-5f64..1e-5, z in -1e-5f64..1e-5) {
            let n = Vector3::new(x, y, z).normalized();
            prop_assert!(n.is_finite());
            let m = n.magnitude();
            prop_assert!(m == 0.0 || (m - 1.0).abs() < 1e-9);
        }
    }
}
