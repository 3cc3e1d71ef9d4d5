//! Rigid body state and the per-tick integrator

use serde::{Deserialize, Serialize};

use crate::consts::GROUND_RESTITUTION;
use crate::math::{MathError, Matrix3x3, Quaternion, Real, Vector3};

/// Inertia tensor and its inverse for a body of `mass` and `scale`.
///
/// Equal scale components are treated as a sphere of radius `scale.x`,
/// `I = 2/5 m r²`. Anything else is a box, `I_x = m/12 (s_y² + s_z²)` and so
/// on around the diagonal.
pub fn inertia_tensor<T: Real>(
    mass: T,
    scale: Vector3<T>,
) -> Result<(Matrix3x3<T>, Matrix3x3<T>), MathError> {
    let degenerate = |v: T| !v.is_finite() || v <= T::ZERO;
    if degenerate(mass) || degenerate(scale.x) || degenerate(scale.y) || degenerate(scale.z) {
        return Err(MathError::NotInvertible);
    }

    let tensor = if scale.x == scale.y && scale.y == scale.z {
        let r = scale.x;
        let i = T::from_f64(2.0 / 5.0) * mass * r * r;
        Matrix3x3::scale(i, i, i)
    } else {
        let k = mass / T::from_f64(12.0);
        let (x2, y2, z2) = (scale.x * scale.x, scale.y * scale.y, scale.z * scale.z);
        Matrix3x3::scale(k * (y2 + z2), k * (x2 + z2), k * (x2 + y2))
    };

    let inverse = tensor.inverse()?;
    Ok((tensor, inverse))
}

/// A rigid body with linear and angular motion state.
///
/// Forces and torques accumulate between ticks and are cleared by
/// [`RigidBody::integrate`]. Mass and scale only change through setters that
/// keep the cached inverse mass and inertia tensors consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody<T = f64> {
    position: Vector3<T>,
    orientation: Quaternion<T>,
    scale: Vector3<T>,
    mass: T,
    inverse_mass: T,
    velocity: Vector3<T>,
    acceleration: Vector3<T>,
    force: Vector3<T>,
    torque: Vector3<T>,
    inertia_tensor: Matrix3x3<T>,
    inverse_inertia_tensor: Matrix3x3<T>,
    angular_velocity: Vector3<T>,
    ground_height: T,
}

impl<T: Real> Default for RigidBody<T> {
    /// Unit mass, unit scale, at rest at the origin
    fn default() -> Self {
        let i = T::from_f64(2.0 / 5.0);
        Self {
            position: Vector3::zero(),
            orientation: Quaternion::identity(),
            scale: Vector3::splat(T::ONE),
            mass: T::ONE,
            inverse_mass: T::ONE,
            velocity: Vector3::zero(),
            acceleration: Vector3::zero(),
            force: Vector3::zero(),
            torque: Vector3::zero(),
            inertia_tensor: Matrix3x3::scale(i, i, i),
            inverse_inertia_tensor: Matrix3x3::scale(T::ONE / i, T::ONE / i, T::ONE / i),
            angular_velocity: Vector3::zero(),
            ground_height: T::ZERO,
        }
    }
}

impl<T: Real> RigidBody<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body of the given mass and scale at `position`
    pub fn with_mass_and_scale(
        position: Vector3<T>,
        mass: T,
        scale: Vector3<T>,
    ) -> Result<Self, MathError> {
        let mut body = Self::default();
        body.position = position;
        body.set_mass_and_scale(mass, scale)?;
        Ok(body)
    }

    pub fn position(&self) -> Vector3<T> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector3<T>) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vector3<T> {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector3<T>) {
        self.velocity = velocity;
    }

    /// Acceleration computed by the last `integrate`
    pub fn acceleration(&self) -> Vector3<T> {
        self.acceleration
    }

    pub fn orientation(&self) -> Quaternion<T> {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Quaternion<T>) {
        self.orientation = orientation.normalized();
    }

    pub fn angular_velocity(&self) -> Vector3<T> {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: Vector3<T>) {
        self.angular_velocity = angular_velocity;
    }

    pub fn mass(&self) -> T {
        self.mass
    }

    pub fn inverse_mass(&self) -> T {
        self.inverse_mass
    }

    pub fn scale(&self) -> Vector3<T> {
        self.scale
    }

    pub fn inertia_tensor(&self) -> Matrix3x3<T> {
        self.inertia_tensor
    }

    pub fn inverse_inertia_tensor(&self) -> Matrix3x3<T> {
        self.inverse_inertia_tensor
    }

    /// Force accumulated since the last `integrate`
    pub fn force(&self) -> Vector3<T> {
        self.force
    }

    pub fn torque(&self) -> Vector3<T> {
        self.torque
    }

    pub fn ground_height(&self) -> T {
        self.ground_height
    }

    pub fn set_ground_height(&mut self, ground_height: T) {
        self.ground_height = ground_height;
    }

    /// Set mass and recompute inertia. Leaves the body untouched on error.
    pub fn set_mass(&mut self, mass: T) -> Result<(), MathError> {
        self.set_mass_and_scale(mass, self.scale)
    }

    /// Set scale and recompute inertia. Leaves the body untouched on error.
    pub fn set_scale(&mut self, scale: Vector3<T>) -> Result<(), MathError> {
        self.set_mass_and_scale(self.mass, scale)
    }

    pub fn set_mass_and_scale(&mut self, mass: T, scale: Vector3<T>) -> Result<(), MathError> {
        let (tensor, inverse) = inertia_tensor(mass, scale)?;
        self.mass = mass;
        self.inverse_mass = T::ONE / mass;
        self.scale = scale;
        self.inertia_tensor = tensor;
        self.inverse_inertia_tensor = inverse;
        Ok(())
    }

    pub fn apply_force(&mut self, force: Vector3<T>) {
        self.force += force;
    }

    pub fn apply_torque(&mut self, torque: Vector3<T>) {
        self.torque += torque;
    }

    /// Advance one step of `dt` seconds with semi-implicit Euler.
    ///
    /// Gravity is not added here; it must already be in the accumulated
    /// force. Both accumulators are cleared afterwards.
    pub fn integrate(&mut self, dt: T) {
        self.acceleration = self.force * self.inverse_mass;
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;

        let angular_acceleration = self.inverse_inertia_tensor * self.torque;
        self.angular_velocity += angular_acceleration;

        let delta = Quaternion::from_angular_velocity(self.angular_velocity, dt);
        self.orientation = delta * self.orientation;
        self.orientation.normalize();

        self.force = Vector3::zero();
        self.torque = Vector3::zero();
    }

    /// Clamp to the ground plane and bounce.
    ///
    /// Returns true when the body was below `ground_height`.
    pub fn resolve_ground_contact(&mut self) -> bool {
        if self.position.y < self.ground_height {
            self.position.y = self.ground_height;
            self.velocity.y = -self.velocity.y * T::from_f64(GROUND_RESTITUTION);
            true
        } else {
            false
        }
    }

    /// Reverse both bodies' velocities, scaled by `restitution`.
    ///
    /// Ignores mass ratio, contact normal and impact point.
    pub fn on_collision(&mut self, other: &mut RigidBody<T>, restitution: T) {
        self.velocity = -self.velocity * restitution;
        other.velocity = -other.velocity * restitution;
    }
}
