//! Projectile simulator state machine
//!
//! `Running` until the projectile lands on the target footprint (`Hit`),
//! lands anywhere else (`Miss`, when enabled) or runs past the timeout
//! (`TimedOut`). Terminal states latch.

use serde::{Deserialize, Serialize};

use super::{RigidBody, SimConfig, SimError};
use crate::consts::COLLISION_RESTITUTION;
use crate::math::{Vector2, Vector3};
use crate::telemetry::StatusSink;

/// Outcome of the run so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimStatus {
    Running,
    Hit,
    Miss,
    TimedOut,
}

impl SimStatus {
    /// Wire code: 0 running, 1 hit, 2 miss, 3 timed out
    pub fn code(&self) -> u8 {
        match self {
            SimStatus::Running => 0,
            SimStatus::Hit => 1,
            SimStatus::Miss => 2,
            SimStatus::TimedOut => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SimStatus::Running),
            1 => Some(SimStatus::Hit),
            2 => Some(SimStatus::Miss),
            3 => Some(SimStatus::TimedOut),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SimStatus::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimStatus::Running => "RUNNING",
            SimStatus::Hit => "HIT",
            SimStatus::Miss => "MISS",
            SimStatus::TimedOut => "TIMED_OUT",
        }
    }
}

impl std::fmt::Display for SimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializable copy of the simulator state for transports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub time: f64,
    pub steps: u64,
    pub status: SimStatus,
    pub code: u8,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

/// Initial projectile velocity: `(speed, 0, 0)` raised by `elevation` in the
/// vertical x-y plane, then turned by `azimuth` about the vertical axis.
pub fn launch_velocity(speed: f64, elevation_deg: f64, azimuth_deg: f64) -> Vector3<f64> {
    Vector3::new(speed, 0.0, 0.0)
        .roll(elevation_deg)
        .yaw(azimuth_deg)
}

/// Projectile and target driven by a fixed timestep
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimConfig,
    projectile: RigidBody<f64>,
    target: RigidBody<f64>,
    time: f64,
    steps: u64,
    status: SimStatus,
}

impl Simulator {
    /// Validate `config` and place both bodies
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let mut sim = Self {
            config,
            projectile: RigidBody::new(),
            target: RigidBody::new(),
            time: 0.0,
            steps: 0,
            status: SimStatus::Running,
        };
        sim.initialize()?;
        Ok(sim)
    }

    /// Reset to t = 0 with the projectile at the launch point
    pub fn initialize(&mut self) -> Result<(), SimError> {
        let c = &self.config;

        let mut projectile = RigidBody::new();
        projectile.set_position(Vector3::new(0.0, c.launch_height, 0.0));
        projectile.set_mass(1.0)?;
        projectile.set_ground_height(c.floor_height);
        projectile.set_velocity(launch_velocity(
            c.muzzle_speed,
            c.elevation_deg,
            c.azimuth_deg,
        ));

        let target = RigidBody::with_mass_and_scale(
            Vector3::new(c.target_x, 0.0, c.target_z),
            c.target_mass(),
            Vector3::new(c.target_length, c.target_height, c.target_width),
        )?;

        log::debug!(
            "Launch: v0=({:.3}, {:.3}, {:.3}), target at ({}, {}), mass {}",
            projectile.velocity().x,
            projectile.velocity().y,
            projectile.velocity().z,
            c.target_x,
            c.target_z,
            target.mass()
        );

        self.projectile = projectile;
        self.target = target;
        self.time = 0.0;
        self.steps = 0;
        self.status = SimStatus::Running;
        Ok(())
    }

    /// Advance one `time_step`.
    ///
    /// Order: integrate under gravity, resolve floor contact, then test hit,
    /// miss and timeout. A hit applies the two-body collision response.
    /// Once terminal this is a no-op returning the latched status.
    pub fn step(&mut self) -> SimStatus {
        if self.status.is_terminal() {
            return self.status;
        }

        log::trace!("{}", self.status_line());

        let dt = self.config.time_step;
        let weight = Vector3::new(0.0, -self.projectile.mass() * self.config.gravity, 0.0);
        self.projectile.apply_force(weight);
        self.projectile.integrate(dt);
        self.projectile.resolve_ground_contact();
        self.steps += 1;

        if self.check_collision() {
            self.projectile.on_collision(&mut self.target, COLLISION_RESTITUTION);
            return self.finish(SimStatus::Hit);
        }

        if self.config.terminal_miss && self.on_floor() {
            return self.finish(SimStatus::Miss);
        }

        if self.time > self.config.timeout_secs {
            return self.finish(SimStatus::TimedOut);
        }

        self.time += dt;
        self.status
    }

    /// Step until terminal or until `max_steps` calls, sending each tick's
    /// status line to `sink`
    pub fn run(&mut self, max_steps: u64, sink: &mut impl StatusSink) -> SimStatus {
        for _ in 0..max_steps {
            if self.status.is_terminal() {
                break;
            }
            self.step();
            sink.send(self.status_line());
        }
        self.status
    }

    fn finish(&mut self, status: SimStatus) -> SimStatus {
        self.status = status;
        let p = self.projectile.position();
        log::info!(
            "{} after {} steps at t={:.3}s, position ({:.3}, {:.3}, {:.3})",
            status,
            self.steps,
            self.time,
            p.x,
            p.y,
            p.z
        );
        status
    }

    fn on_floor(&self) -> bool {
        self.projectile.position().y <= self.config.floor_height
    }

    /// Projectile on the floor inside the target's ground footprint.
    ///
    /// The target position is the footprint center; height is ignored.
    pub fn check_collision(&self) -> bool {
        if !self.on_floor() {
            return false;
        }
        let offset = self.projectile.position().ground_xz() - self.target.position().ground_xz();
        let half = Vector2::new(self.config.target_length, self.config.target_width) * 0.5;
        offset.x.abs() <= half.x && offset.y.abs() <= half.y
    }

    /// `Time: <t>s, Position: (<x>, <y>, <z>)`, six decimals each
    pub fn status_line(&self) -> String {
        let p = self.projectile.position();
        format!(
            "Time: {:.6}s, Position: ({:.6}, {:.6}, {:.6})",
            self.time, p.x, p.y, p.z
        )
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            time: self.time,
            steps: self.steps,
            status: self.status,
            code: self.status.code(),
            position: self.projectile.position(),
            velocity: self.projectile.velocity(),
        }
    }

    pub fn status(&self) -> SimStatus {
        self.status
    }

    /// Simulated seconds; not advanced on the terminal step
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of integration steps taken
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn projectile(&self) -> &RigidBody<f64> {
        &self.projectile
    }

    pub fn target(&self) -> &RigidBody<f64> {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_shot() -> SimConfig {
        SimConfig {
            muzzle_speed: 20.0,
            elevation_deg: 90.0,
            azimuth_deg: 0.0,
            launch_height: 0.0,
            target_x: 0.0,
            target_z: 0.0,
            time_step: 0.01,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_status_codes() {
        for status in [
            SimStatus::Running,
            SimStatus::Hit,
            SimStatus::Miss,
            SimStatus::TimedOut,
        ] {
            assert_eq!(SimStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(SimStatus::from_code(4), None);
        assert!(!SimStatus::Running.is_terminal());
        assert!(SimStatus::TimedOut.is_terminal());
        assert_eq!(SimStatus::TimedOut.to_string(), "TIMED_OUT");
    }

    #[test]
    fn test_launch_velocity_axes() {
        let v = launch_velocity(100.0, 45.0, 0.0);
        assert!((v.x - v.y).abs() < 1e-9);
        assert_eq!(v.z, 0.0);
        assert!((v.magnitude() - 100.0).abs() < 1e-9);

        let up = launch_velocity(20.0, 90.0, 0.0);
        assert!(up.x.abs() < 1e-9);
        assert!((up.y - 20.0).abs() < 1e-12);

        // azimuth turns about the vertical axis only
        let turned = launch_velocity(100.0, 30.0, 90.0);
        let flat = launch_velocity(100.0, 30.0, 0.0);
        assert!((turned.y - flat.y).abs() < 1e-9);
        assert!(turned.x.abs() < 1e-9);
        assert!((turned.z + flat.x).abs() < 1e-9);
    }

    #[test]
    fn test_initialize_places_bodies() {
        let sim = Simulator::new(SimConfig::default()).unwrap();
        assert_eq!(sim.projectile().position(), Vector3::new(0.0, 10.0, 0.0));
        assert_eq!(sim.projectile().mass(), 1.0);
        assert_eq!(sim.target().position(), Vector3::new(1020.0, 0.0, 0.0));
        assert_eq!(sim.target().mass(), 500_000.0);
        assert_eq!(sim.target().scale(), Vector3::new(10.0, 10.0, 10.0));
        assert_eq!(sim.status(), SimStatus::Running);
        assert_eq!(sim.time(), 0.0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimConfig {
            target_height: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            Simulator::new(config),
            Err(SimError::InvalidConfig { field: "target_height", .. })
        ));
    }

    #[test]
    fn test_small_target_accepted() {
        let config = SimConfig {
            target_length: 0.01,
            target_width: 0.01,
            target_height: 0.01,
            ..vertical_shot()
        };
        let mut sim = Simulator::new(config).unwrap();
        assert!((sim.target().mass() - 5e-4).abs() < 1e-12);
        let mut sink: Vec<String> = Vec::new();
        assert_eq!(sim.run(10_000, &mut sink), SimStatus::Hit);
    }

    #[test]
    fn test_time_advances_by_exactly_one_step() {
        let mut sim = Simulator::new(SimConfig::default()).unwrap();
        for _ in 0..50 {
            let before = sim.time();
            assert_eq!(sim.step(), SimStatus::Running);
            assert_eq!(sim.time(), before + 0.1);
        }
        assert_eq!(sim.steps(), 50);
    }

    #[test]
    fn test_status_line_format() {
        let sim = Simulator::new(SimConfig::default()).unwrap();
        assert_eq!(
            sim.status_line(),
            "Time: 0.000000s, Position: (0.000000, 10.000000, 0.000000)"
        );
    }

    #[test]
    fn test_vertical_shot_hits_and_latches() {
        let mut sim = Simulator::new(vertical_shot()).unwrap();
        let mut status = SimStatus::Running;
        while !status.is_terminal() {
            status = sim.step();
            assert!(sim.steps() < 1000, "never landed");
        }
        assert_eq!(status, SimStatus::Hit);

        let snapshot = sim.snapshot();
        let steps = sim.steps();
        for _ in 0..5 {
            assert_eq!(sim.step(), SimStatus::Hit);
        }
        assert_eq!(sim.steps(), steps);
        assert_eq!(sim.snapshot(), snapshot);
        assert_eq!(snapshot.code, 1);
    }

    #[test]
    fn test_miss_outside_footprint() {
        let config = SimConfig {
            target_x: 500.0,
            ..vertical_shot()
        };
        let mut sim = Simulator::new(config).unwrap();
        let mut sink: Vec<String> = Vec::new();
        assert_eq!(sim.run(10_000, &mut sink), SimStatus::Miss);
        assert_eq!(sink.len() as u64, sim.steps());
    }

    #[test]
    fn test_footprint_edges_are_inclusive() {
        let mut sim = Simulator::new(SimConfig::default()).unwrap();
        let target = sim.target().position();
        sim.projectile.set_position(Vector3::new(target.x + 5.0, 0.0, target.z - 5.0));
        assert!(sim.check_collision());
        sim.projectile.set_position(Vector3::new(target.x + 5.001, 0.0, target.z));
        assert!(!sim.check_collision());
        // airborne above the footprint is not a hit
        sim.projectile.set_position(Vector3::new(target.x, 3.0, target.z));
        assert!(!sim.check_collision());
    }

    #[test]
    fn test_run_respects_max_steps() {
        let mut sim = Simulator::new(SimConfig::default()).unwrap();
        let mut sink: Vec<String> = Vec::new();
        assert_eq!(sim.run(3, &mut sink), SimStatus::Running);
        assert_eq!(sink.len(), 3);
        assert!(sink[2].starts_with("Time: 0.300000s"));
    }

    #[test]
    fn test_initialize_resets() {
        let mut sim = Simulator::new(vertical_shot()).unwrap();
        let mut sink = crate::telemetry::NullSink;
        sim.run(10_000, &mut sink);
        assert!(sim.status().is_terminal());
        sim.initialize().unwrap();
        assert_eq!(sim.status(), SimStatus::Running);
        assert_eq!(sim.steps(), 0);
        assert_eq!(sim.projectile().position(), Vector3::zero());
    }

    #[test]
    fn test_snapshot_serializes() {
        let sim = Simulator::new(SimConfig::default()).unwrap();
        let json = serde_json::to_string(&sim.snapshot()).unwrap();
        assert!(json.contains("\"status\":\"Running\""));
        assert!(json.contains("\"code\":0"));
    }
}
