//! Simulator configuration
//!
//! SI units, angles in degrees. Missing JSON fields take the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SimError;
use crate::consts::{DEFAULT_TIMEOUT_SECS, GRAVITY, TARGET_DENSITY};

/// Immutable parameters for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Muzzle speed (m/s)
    pub muzzle_speed: f64,
    /// Launch elevation above the horizon (degrees)
    pub elevation_deg: f64,
    /// Launch azimuth about the vertical axis (degrees)
    pub azimuth_deg: f64,
    /// Launch height above the origin (m)
    pub launch_height: f64,

    // === Target ===
    /// Target footprint center, x (m)
    pub target_x: f64,
    /// Target footprint center, z (m)
    pub target_z: f64,
    /// Footprint extent along x (m)
    pub target_length: f64,
    /// Footprint extent along z (m)
    pub target_width: f64,
    /// Vertical extent (m); only used for mass and inertia
    pub target_height: f64,
    /// kg/m³
    pub target_density: f64,

    // === Integration ===
    /// Fixed timestep (s)
    pub time_step: f64,
    pub floor_height: f64,
    /// Simulated seconds before giving up
    pub timeout_secs: f64,
    /// Gravitational acceleration magnitude (m/s²)
    pub gravity: f64,
    /// End the run on the first off-target floor contact
    pub terminal_miss: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            muzzle_speed: 100.0,
            elevation_deg: 45.0,
            azimuth_deg: 0.0,
            launch_height: 10.0,

            target_x: 1020.0,
            target_z: 0.0,
            target_length: 10.0,
            target_width: 10.0,
            target_height: 10.0,
            target_density: TARGET_DENSITY,

            time_step: 0.1,
            floor_height: 0.0,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            gravity: GRAVITY,
            terminal_miss: true,
        }
    }
}

impl SimConfig {
    /// Parse from JSON and validate
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges. Every numeric field must be finite.
    pub fn validate(&self) -> Result<(), SimError> {
        let fields = [
            ("muzzle_speed", self.muzzle_speed),
            ("elevation_deg", self.elevation_deg),
            ("azimuth_deg", self.azimuth_deg),
            ("launch_height", self.launch_height),
            ("target_x", self.target_x),
            ("target_z", self.target_z),
            ("target_length", self.target_length),
            ("target_width", self.target_width),
            ("target_height", self.target_height),
            ("target_density", self.target_density),
            ("time_step", self.time_step),
            ("floor_height", self.floor_height),
            ("timeout_secs", self.timeout_secs),
            ("gravity", self.gravity),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SimError::invalid(field, "must be finite"));
            }
        }

        let positive = [
            ("target_length", self.target_length),
            ("target_width", self.target_width),
            ("target_height", self.target_height),
            ("target_density", self.target_density),
            ("time_step", self.time_step),
            ("timeout_secs", self.timeout_secs),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(SimError::invalid(field, format!("must be > 0, got {value}")));
            }
        }

        if self.muzzle_speed < 0.0 {
            return Err(SimError::invalid(
                "muzzle_speed",
                format!("must be >= 0, got {}", self.muzzle_speed),
            ));
        }

        Ok(())
    }

    /// Target mass from density and volume
    pub fn target_mass(&self) -> f64 {
        self.target_density * self.target_length * self.target_width * self.target_height
    }
}
