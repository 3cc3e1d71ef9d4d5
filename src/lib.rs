//! Trajectory Sim - projectile flight against a ground target
//!
//! Core modules:
//! - `math`: Vectors, quaternions and matrices generic over `f32`/`f64`
//! - `sim`: Rigid-body integrator and the HIT/MISS/TIMED_OUT state machine
//! - `telemetry`: Sinks for per-tick status lines

pub mod math;
pub mod sim;
pub mod telemetry;

pub use math::{MathError, Matrix3x3, Matrix4x4, Quaternion, Real, Vector2, Vector3, Vector4};
pub use sim::{RigidBody, SimConfig, SimError, SimStatus, Simulator, StatusSnapshot};
pub use telemetry::{ChannelSink, LogSink, StatusSink};

/// Physical constants and defaults
pub mod consts {
    /// Standard gravity (m/s²)
    pub const GRAVITY: f64 = 9.81;
    /// Simulated seconds before a run times out
    pub const DEFAULT_TIMEOUT_SECS: f64 = 60.0;
    /// Target density (kg/m³)
    pub const TARGET_DENSITY: f64 = 500.0;
    /// Vertical velocity kept after a floor bounce
    pub const GROUND_RESTITUTION: f64 = 0.8;
    /// Velocity kept by both bodies in a two-body collision
    pub const COLLISION_RESTITUTION: f64 = 0.8;
}
