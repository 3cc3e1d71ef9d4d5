//! Deterministic simulation module
//!
//! Rigid-body integration and the projectile state machine:
//! - Fixed timestep only
//! - Seeded RNG only (impact particles)
//! - No I/O beyond config loading and the `log` facade

pub mod body;
pub mod config;
pub mod error;
pub mod particles;
pub mod simulator;

pub use body::{RigidBody, inertia_tensor};
pub use config::SimConfig;
pub use error::SimError;
pub use particles::{Particle, ParticleBurst};
pub use simulator::{SimStatus, Simulator, StatusSnapshot, launch_velocity};
