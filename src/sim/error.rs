//! Simulator construction and configuration errors

use crate::math::MathError;

#[derive(Debug)]
pub enum SimError {
    /// A configuration value is out of range
    InvalidConfig { field: &'static str, reason: String },
    /// Body setup failed (degenerate mass or scale)
    Math(MathError),
    /// Config file could not be read
    Io(std::io::Error),
    /// Config file is not valid JSON for `SimConfig`
    Json(serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::InvalidConfig { field, reason } => {
                write!(f, "invalid config field `{field}`: {reason}")
            }
            SimError::Math(e) => write!(f, "math error: {e}"),
            SimError::Io(e) => write!(f, "IO error: {e}"),
            SimError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::InvalidConfig { .. } => None,
            SimError::Math(e) => Some(e),
            SimError::Io(e) => Some(e),
            SimError::Json(e) => Some(e),
        }
    }
}

impl From<MathError> for SimError {
    fn from(e: MathError) -> Self {
        SimError::Math(e)
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Json(e)
    }
}
