//! Floating-point scalar abstraction
//!
//! Every math type in the kernel is generic over [`Real`], which is
//! implemented for `f32` and `f64`. The trait exposes exactly the constants
//! and transcendental functions the kernel uses.

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Floating-point scalar used by vectors, quaternions and matrices.
pub trait Real:
    Copy
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const HALF: Self;
    const PI: Self;
    /// Machine epsilon; divisors at or below this magnitude are rejected.
    const EPSILON: Self;
    /// Magnitude below which a vector normalizes to zero (1e-6).
    const TOLERANCE: Self;

    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;

    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn abs(self) -> Self;
    fn clamp(self, min: Self, max: Self) -> Self;
    fn is_finite(self) -> bool;
}

macro_rules! impl_real {
    ($t:ident) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const HALF: Self = 0.5;
            const PI: Self = std::$t::consts::PI;
            const EPSILON: Self = $t::EPSILON;
            const TOLERANCE: Self = 1e-6;

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn sqrt(self) -> Self {
                $t::sqrt(self)
            }

            #[inline]
            fn sin(self) -> Self {
                $t::sin(self)
            }

            #[inline]
            fn cos(self) -> Self {
                $t::cos(self)
            }

            #[inline]
            fn asin(self) -> Self {
                $t::asin(self)
            }

            #[inline]
            fn acos(self) -> Self {
                $t::acos(self)
            }

            #[inline]
            fn atan2(self, other: Self) -> Self {
                $t::atan2(self, other)
            }

            #[inline]
            fn abs(self) -> Self {
                $t::abs(self)
            }

            #[inline]
            fn clamp(self, min: Self, max: Self) -> Self {
                $t::clamp(self, min, max)
            }

            #[inline]
            fn is_finite(self) -> bool {
                $t::is_finite(self)
            }
        }
    };
}

impl_real!(f32);
impl_real!(f64);
