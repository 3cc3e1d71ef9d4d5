//! Degree/radian conversion

use super::Real;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad<T: Real>(deg: T) -> T {
    deg * T::PI / T::from_f64(180.0)
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg<T: Real>(rad: T) -> T {
    rad * T::from_f64(180.0) / T::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deg_rad_roundtrip() {
        assert!((deg_to_rad(180.0f64) - std::f64::consts::PI).abs() < 1e-12);
        assert!((rad_to_deg(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
        assert!((rad_to_deg(deg_to_rad(37.5f32)) - 37.5).abs() < 1e-4);
    }
}
