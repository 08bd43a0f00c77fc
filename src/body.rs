//! Rigid bodies: geometry snapshot, pose, motion state and the pending-force
//! queue.
//!
//! A body's world-space vertices and bounding sphere are always derived on
//! demand from the immutable shape plus the current pose — both change every
//! step, so nothing is cached.

use log::warn;
use nalgebra::Vector3;

use crate::error::PhysicsError;
use crate::force::ForceContribution;
use crate::math::{self, EulerAngles};
use crate::shape::{BoundingSphere, ConvexShape};

/// Maximum number of force contributions a body can hold between steps.
/// Contributions past this are dropped with a warning.
pub const PENDING_FORCE_CAP: usize = 16;

/// A simulated rigid body.
///
/// Pose and motion fields are public for the rendering collaborator to read
/// after a tick completes; the shape and the pending-force queue are managed
/// through methods.
#[derive(Debug, Clone)]
pub struct RigidBody<'a> {
    shape: ConvexShape<'a>,
    /// World-space origin of the body's local frame.
    pub position: Vector3<f32>,
    /// Euler-angle orientation of the body's frame (radians).
    pub orientation: EulerAngles,
    /// World-space linear velocity (units/second).
    pub velocity: Vector3<f32>,
    /// Rotation delta per second, same representation as `orientation`.
    pub angular_velocity: EulerAngles,
    /// Positive, finite mass (kg).
    pub mass: f32,
    /// Collision response multiplier in [0, 1]; 1 = fully elastic.
    pub elasticity: f32,
    /// Inactive bodies (walls, floor) skip force application and pose
    /// updates but still participate as collision targets.
    pub active: bool,
    // Removed bodies are out of the simulation entirely: never integrated,
    // never a collision target. The slot stays allocated so ids hold.
    removed: bool,
    pending_forces: heapless::Vec<ForceContribution, PENDING_FORCE_CAP>,
}

impl<'a> RigidBody<'a> {
    /// Create an active body from an immutable shape and a mass.
    ///
    /// Rejects non-positive or non-finite mass.
    pub fn new(shape: ConvexShape<'a>, mass: f32) -> Result<Self, PhysicsError> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(PhysicsError::InvalidMass { mass });
        }
        Ok(Self {
            shape,
            position: Vector3::zeros(),
            orientation: EulerAngles::zeros(),
            velocity: Vector3::zeros(),
            angular_velocity: EulerAngles::zeros(),
            mass,
            elasticity: 1.0,
            active: true,
            removed: false,
            pending_forces: heapless::Vec::new(),
        })
    }

    /// Builder: set initial position.
    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    /// Builder: set initial orientation.
    pub fn with_orientation(mut self, orientation: EulerAngles) -> Self {
        self.orientation = orientation;
        self
    }

    /// Builder: set initial velocity.
    pub fn with_velocity(mut self, velocity: Vector3<f32>) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder: set initial angular velocity (radians per second per axis).
    pub fn with_angular_velocity(mut self, angular_velocity: EulerAngles) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Builder: set elasticity (0.0..=1.0, clamped).
    pub fn with_elasticity(mut self, elasticity: f32) -> Self {
        self.elasticity = elasticity.clamp(0.0, 1.0);
        self
    }

    /// Builder: mark the body active or inactive. Inactive bodies act as
    /// static collision targets (floors, walls).
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// The body's immutable geometry snapshot.
    #[inline]
    pub fn shape(&self) -> &ConvexShape<'a> {
        &self.shape
    }

    /// Set position and orientation in one call.
    pub fn set_pose(&mut self, position: Vector3<f32>, orientation: EulerAngles) {
        self.position = position;
        self.orientation = orientation;
    }

    /// Queue a force contribution for the next integration pass.
    ///
    /// Contributions queued on an inactive body are dropped, as are
    /// contributions past [`PENDING_FORCE_CAP`].
    pub fn queue_force(&mut self, contribution: ForceContribution) {
        if !self.active {
            return;
        }
        if self.pending_forces.push(contribution).is_err() {
            warn!("pending-force queue full; contribution dropped");
        }
    }

    /// Number of contributions waiting for the next integration pass.
    pub fn pending_force_count(&self) -> usize {
        self.pending_forces.len()
    }

    /// Fold every queued contribution into the velocity and clear the queue:
    /// `velocity += (force / mass) * dt` per contribution.
    pub(crate) fn integrate_forces(&mut self, dt: f32) {
        let inv_mass = 1.0 / self.mass;
        for contribution in &self.pending_forces {
            self.velocity += contribution.force * (inv_mass * dt);
        }
        self.pending_forces.clear();
    }

    /// Clear motion state and pending forces.
    pub(crate) fn halt(&mut self) {
        self.velocity = Vector3::zeros();
        self.angular_velocity = EulerAngles::zeros();
        self.pending_forces.clear();
    }

    /// Whether the body has been removed from the simulation.
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Take the body out of the simulation: deactivate it, drop all motion
    /// and pending forces, and stop it acting as a collision target.
    pub(crate) fn mark_removed(&mut self) {
        self.removed = true;
        self.active = false;
        self.halt();
    }

    /// Activate or deactivate the body. Activating a removed body returns
    /// it to the simulation.
    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
        if active {
            self.removed = false;
        }
    }

    /// World-space position of vertex `index`, derived from the current pose.
    pub fn world_vertex(&self, index: usize) -> Vector3<f32> {
        math::rotation(&self.orientation) * self.shape.vertices()[index] + self.position
    }

    /// Bounding sphere at the body's current pose. The radius is fixed; the
    /// center follows both position and orientation, so off-origin geometry
    /// stays covered when the body rotates.
    pub fn bounding_sphere_world(&self) -> BoundingSphere {
        let local = self.shape.bounding_sphere();
        BoundingSphere {
            center: math::rotation(&self.orientation) * local.center + self.position,
            radius: local.radius,
        }
    }

    /// Current speed (magnitude of velocity).
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    /// Kinetic energy: `0.5 * m * v²`.
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.norm_squared()
    }
}
