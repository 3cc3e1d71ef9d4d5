//! Failures raised by the math kernel

/// Errors from scalar division, matrix inversion and composite rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Division by a scalar whose magnitude is at or below machine epsilon.
    DivideByZero,
    /// Determinant is zero, or an inertia tensor was requested for a
    /// non-positive mass or a zero scale component.
    NotInvertible,
    /// A composite rotation order contained a letter outside `{x, y, z}`.
    InvalidRotationOrder(char),
}

impl std::fmt::Display for MathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MathError::DivideByZero => write!(f, "division by zero"),
            MathError::NotInvertible => write!(f, "matrix is not invertible"),
            MathError::InvalidRotationOrder(axis) => {
                write!(f, "invalid rotation axis '{axis}' (expected x, y or z)")
            }
        }
    }
}

impl std::error::Error for MathError {}
