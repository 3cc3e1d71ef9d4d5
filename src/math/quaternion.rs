//! Orientation quaternion
//!
//! Products follow the Hamilton convention
//! `n = n1 n2 - v1·v2`, `v = n1 v2 + n2 v1 + v1 × v2`, so `a * b` applies
//! `b` first when used to rotate vectors.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::angle::{deg_to_rad, rad_to_deg};
use super::vector::check_divisor;
use super::{MathError, Real, Vector3};

/// Quaternion with scalar part `n` and vector part `v`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion<T> {
    pub n: T,
    pub v: Vector3<T>,
}

impl<T: Real> Default for Quaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> Quaternion<T> {
    pub fn new(n: T, x: T, y: T, z: T) -> Self {
        Self {
            n,
            v: Vector3::new(x, y, z),
        }
    }

    pub fn from_parts(n: T, v: Vector3<T>) -> Self {
        Self { n, v }
    }

    /// The identity rotation (1, 0, 0, 0)
    pub fn identity() -> Self {
        Self::new(T::ONE, T::ZERO, T::ZERO, T::ZERO)
    }

    /// Pure quaternion (0, v)
    pub fn pure(v: Vector3<T>) -> Self {
        Self::from_parts(T::ZERO, v)
    }

    pub fn scalar(&self) -> T {
        self.n
    }

    pub fn vector(&self) -> Vector3<T> {
        self.v
    }

    /// Rotation of `angle` radians about a unit `axis`
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        let half = angle * T::HALF;
        Self::from_parts(half.cos(), axis * half.sin())
    }

    /// Build from pitch (X), yaw (Y) and roll (Z) in degrees.
    ///
    /// The result rotates a vector the same way as
    /// `v.rotate(pitch, yaw, roll, "xyz")`.
    pub fn from_euler_angles(pitch: T, yaw: T, roll: T) -> Self {
        let hp = deg_to_rad(pitch) * T::HALF;
        let hy = deg_to_rad(yaw) * T::HALF;
        let hr = deg_to_rad(roll) * T::HALF;

        let (cp, sp) = (hp.cos(), hp.sin());
        let (cy, sy) = (hy.cos(), hy.sin());
        let (cr, sr) = (hr.cos(), hr.sin());

        Self::new(
            cp * cy * cr + sp * sy * sr,
            sp * cy * cr - cp * sy * sr,
            cp * sy * cr + sp * cy * sr,
            cp * cy * sr - sp * sy * cr,
        )
    }

    /// Extract (pitch, yaw, roll) in degrees as a vector (x, y, z).
    ///
    /// The yaw term goes through `asin`, whose argument is clamped to
    /// [-1, 1]. Near yaw = ±90° pitch and roll are not separable.
    pub fn to_euler_angles(&self) -> Vector3<T> {
        let Vector3 { x, y, z } = self.v;
        let n = self.n;

        let pitch = (T::TWO * (n * x + y * z)).atan2(T::ONE - T::TWO * (x * x + y * y));
        let sin_yaw = (T::TWO * (n * y - z * x)).clamp(-T::ONE, T::ONE);
        let yaw = sin_yaw.asin();
        let roll = (T::TWO * (n * z + x * y)).atan2(T::ONE - T::TWO * (y * y + z * z));

        Vector3::new(rad_to_deg(pitch), rad_to_deg(yaw), rad_to_deg(roll))
    }

    /// Small-angle delta rotation for angular velocity `omega` over `dt`.
    ///
    /// Not unit length; callers renormalize after composing.
    pub fn from_angular_velocity(omega: Vector3<T>, dt: T) -> Self {
        Self::from_parts(T::ONE, omega * (dt * T::HALF))
    }

    pub fn magnitude(&self) -> T {
        (self.n * self.n + self.v.magnitude_squared()).sqrt()
    }

    pub fn conjugate(&self) -> Self {
        Self::from_parts(self.n, -self.v)
    }

    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Unit-length copy; a near-zero quaternion becomes the identity
    pub fn normalized(&self) -> Self {
        let m = self.magnitude();
        if m < T::TOLERANCE {
            Self::identity()
        } else {
            Self::from_parts(self.n / m, self.v * (T::ONE / m))
        }
    }

    pub fn checked_div(&self, s: T) -> Result<Self, MathError> {
        let s = check_divisor(s)?;
        Ok(Self::from_parts(self.n / s, self.v * (T::ONE / s)))
    }

    /// Rotation angle in radians, `2 acos(n)`
    pub fn angle(&self) -> T {
        T::TWO * self.n.clamp(-T::ONE, T::ONE).acos()
    }

    /// Unit rotation axis; X when the rotation is too small to define one
    pub fn axis(&self) -> Vector3<T> {
        let sin_sq = T::ONE - self.n * self.n;
        let s = if sin_sq > T::ZERO { sin_sq.sqrt() } else { T::ZERO };
        if s < T::TOLERANCE {
            Vector3::unit_x()
        } else {
            self.v * (T::ONE / s)
        }
    }

    /// Rotate `v` by this quaternion, `q (0, v) q*`
    pub fn rotate(&self, v: Vector3<T>) -> Vector3<T> {
        (*self * v * self.conjugate()).v
    }
}

impl<T: Real> Mul for Quaternion<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::from_parts(
            self.n * rhs.n - self.v.dot(rhs.v),
            rhs.v * self.n + self.v * rhs.n + self.v.cross(rhs.v),
        )
    }
}

impl<T: Real> MulAssign for Quaternion<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// q * (0, v)
impl<T: Real> Mul<Vector3<T>> for Quaternion<T> {
    type Output = Self;
    fn mul(self, v: Vector3<T>) -> Self {
        self * Quaternion::pure(v)
    }
}

/// (0, v) * q
impl<T: Real> Mul<Quaternion<T>> for Vector3<T> {
    type Output = Quaternion<T>;
    fn mul(self, q: Quaternion<T>) -> Quaternion<T> {
        Quaternion::pure(self) * q
    }
}

impl<T: Real> Mul<T> for Quaternion<T> {
    type Output = Self;
    fn mul(self, s: T) -> Self {
        Self::from_parts(self.n * s, self.v * s)
    }
}

impl<T: Real> MulAssign<T> for Quaternion<T> {
    fn mul_assign(&mut self, s: T) {
        *self = *self * s;
    }
}

impl<T: Real> Add for Quaternion<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::from_parts(self.n + rhs.n, self.v + rhs.v)
    }
}

impl<T: Real> AddAssign for Quaternion<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Real> Sub for Quaternion<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::from_parts(self.n - rhs.n, self.v - rhs.v)
    }
}

impl<T: Real> SubAssign for Quaternion<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Real> Neg for Quaternion<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::from_parts(-self.n, -self.v)
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($t:ty) => {
        impl Mul<Quaternion<$t>> for $t {
            type Output = Quaternion<$t>;
            fn mul(self, q: Quaternion<$t>) -> Quaternion<$t> {
                q * self
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

    proptest! {
        #[test]
        fn prop_unit_quaternion_times_conjugate(p in -180.0f64..180.0, y in -180.0f64..180.0, r in -180.0f64..180.0) {
            let q = Quaternion::from_euler_angles(p, y, r);
            let prod = q * q.conjugate();
            prop_assert!((prod.n - 1.0).abs() < 1e-6);
            prop_assert!(prod.v.magnitude() < 1e-6);
        }

        #[test]
        fn prop_euler_roundtrip(p in -89.0f64..89.0, y in -89.0f64..89.0, r in -89.0f64..89.0) {
            let e = Quaternion::from_euler_angles(p, y, r).to_euler_angles();
            prop_assert!((e.x - p).abs() < 1e-4);
            prop_assert!((e.y - y).abs() < 1e-4);
            prop_assert!((e.z - r).abs() < 1e-4);
        }

        #[test]
        fn prop_rotation_preserves_length(
            x in -100.0f64..100.0, y in -100.0f64..100.0, z in -100.0f64..100.0,
            angle in -6.3f64..6.3,
        ) {
            let v = Vector3::new(x, y, z);
            let axis = Vector3::new(z, x, 1.0).normalized();
            let rotated = Quaternion::from_axis_angle(axis, angle).rotate(v);
            prop_assert!((rotated.magnitude() - v.magnitude()).abs() < 1e-9 * v.magnitude().max(1.0));
        }
    }
}
