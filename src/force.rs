//! Force contributions and the sources that produce them.
//!
//! A [`ForceSource`] is evaluated once per active body per step with the
//! body's position and mass. Sources report failure through `Result` rather
//! than panicking; the step logs and drops a failed contribution and carries
//! on (see [`PhysicsWorld::step`](crate::world::PhysicsWorld::step)).

use nalgebra::Vector3;

use crate::error::PhysicsError;

/// A single queued force.
///
/// The application point is carried for collision bookkeeping but the
/// integrator is linear-only: the point does not currently produce torque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceContribution {
    /// Force vector in world space (Newtons).
    pub force: Vector3<f32>,
    /// Application point relative to the body origin.
    pub point: Vector3<f32>,
}

impl ForceContribution {
    /// Create a contribution applied at the given body-relative point.
    pub fn new(force: Vector3<f32>, point: Vector3<f32>) -> Self {
        Self { force, point }
    }

    /// Create a contribution applied at the body origin.
    pub fn at_origin(force: Vector3<f32>) -> Self {
        Self {
            force,
            point: Vector3::zeros(),
        }
    }
}

/// Produces a force contribution for a body, given its position and mass.
pub trait ForceSource {
    /// Evaluate the force on a body at `position` with the given `mass`.
    fn evaluate(&self, position: Vector3<f32>, mass: f32)
        -> Result<ForceContribution, PhysicsError>;
}

impl<F> ForceSource for F
where
    F: Fn(Vector3<f32>, f32) -> Result<ForceContribution, PhysicsError>,
{
    fn evaluate(
        &self,
        position: Vector3<f32>,
        mass: f32,
    ) -> Result<ForceContribution, PhysicsError> {
        self(position, mass)
    }
}

/// Uniform gravity: `acceleration * mass` applied at the body origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    /// Acceleration in world space (m/s²).
    pub acceleration: Vector3<f32>,
}

impl Gravity {
    /// Gravity with the given acceleration vector.
    pub fn new(acceleration: Vector3<f32>) -> Self {
        Self { acceleration }
    }

    /// Earth-like gravity: (0, -9.8, 0).
    pub fn standard() -> Self {
        Self {
            acceleration: Vector3::new(0.0, -9.8, 0.0),
        }
    }
}

impl ForceSource for Gravity {
    fn evaluate(
        &self,
        _position: Vector3<f32>,
        mass: f32,
    ) -> Result<ForceContribution, PhysicsError> {
        Ok(ForceContribution::at_origin(self.acceleration * mass))
    }
}
