//! The simulation registry and step orchestrator.
//!
//! A [`PhysicsWorld`] is the explicit simulation context owned by the
//! caller: a fixed-capacity, ordered collection of bodies. One call to
//! [`PhysicsWorld::step`] advances every active body by one tick and runs to
//! completion before the next tick may start; the rendering collaborator
//! reads poses only between ticks.

use log::warn;
use nalgebra::Vector3;

use crate::body::RigidBody;
use crate::collision;
use crate::force::ForceSource;
use crate::math::EulerAngles;

/// Unique identifier for a body within a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyId(usize);

/// The simulation world.
///
/// # Type Parameters
/// * `N` - Maximum number of bodies (compile-time capacity).
///
/// # Example
/// ```
/// use rigid3d::{ConvexShape, Gravity, PhysicsWorld, RigidBody};
/// use rigid3d::shape::{cuboid_faces, cuboid_vertices};
/// use nalgebra::Vector3;
///
/// # fn main() -> Result<(), rigid3d::PhysicsError> {
/// let vertices = cuboid_vertices(Vector3::new(0.5, 0.5, 0.5));
/// let faces = cuboid_faces();
/// let shape = ConvexShape::new(&vertices, &faces)?;
///
/// let mut world = PhysicsWorld::<8>::new();
/// let id = world
///     .add_body(RigidBody::new(shape, 1.0)?.with_position(Vector3::new(0.0, 5.0, 0.0)))
///     .unwrap();
///
/// let gravity = Gravity::standard();
/// for _ in 0..100 {
///     world.step(10.0, &[&gravity]);
/// }
/// assert!(world.body(id).unwrap().position.y < 5.0);
/// # Ok(())
/// # }
/// ```
pub struct PhysicsWorld<'a, const N: usize> {
    bodies: heapless::Vec<RigidBody<'a>, N>,
}

impl<'a, const N: usize> PhysicsWorld<'a, N> {
    /// Create an empty world.
    pub fn new() -> Self {
        Self {
            bodies: heapless::Vec::new(),
        }
    }

    /// Add a body to the registry. Returns its [`BodyId`], or `None` if the
    /// world is at capacity.
    pub fn add_body(&mut self, body: RigidBody<'a>) -> Option<BodyId> {
        let id = BodyId(self.bodies.len());
        self.bodies.push(body).ok()?;
        Some(id)
    }

    /// Get an immutable reference to a body by its ID.
    pub fn body(&self, id: BodyId) -> Option<&RigidBody<'a>> {
        self.bodies.get(id.0)
    }

    /// Get a mutable reference to a body by its ID.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody<'a>> {
        self.bodies.get_mut(id.0)
    }

    /// Total number of bodies in the registry (including inactive).
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of active bodies.
    pub fn active_body_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.active).count()
    }

    /// Remove a body from the simulation without invalidating existing
    /// [`BodyId`]s. The slot keeps its pose but loses all motion and
    /// pending forces, is never integrated again, and stops acting as a
    /// collision target. [`set_active`](Self::set_active) with `true`
    /// reinstates the slot.
    ///
    /// Returns `true` if the body was found and not already removed;
    /// `false` (a no-op) otherwise.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        if let Some(body) = self.bodies.get_mut(id.0) {
            if !body.is_removed() {
                body.mark_removed();
                return true;
            }
        }
        false
    }

    /// Set whether a body participates in integration and pose updates.
    /// Activating a removed body returns it to the simulation.
    ///
    /// Returns `true` if the body exists.
    pub fn set_active(&mut self, id: BodyId, active: bool) -> bool {
        if let Some(body) = self.bodies.get_mut(id.0) {
            body.set_active(active);
            true
        } else {
            false
        }
    }

    /// Iterate over all bodies immutably.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &RigidBody<'a>)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    /// Advance the simulation by `dt_ms` milliseconds.
    ///
    /// For every active body, in registry order: queue every world force
    /// contribution (a failing source is logged and that single contribution
    /// dropped), fold pending forces into the velocity, then test the body
    /// against every other body — broad phase first, narrow phase on the
    /// survivors — keeping the most restrictive motion found. Collision
    /// impulses are queued on both bodies of a contact and take effect at
    /// their next integration pass. Finally the constrained translation and
    /// rotation are applied.
    ///
    /// Inactive bodies hold their pose and act only as collision targets;
    /// removed bodies are skipped entirely. Never panics or reports errors
    /// for well-formed input.
    pub fn step(&mut self, dt_ms: f32, world_forces: &[&dyn ForceSource]) {
        let dt = dt_ms * 0.001;
        if dt <= 0.0 {
            return;
        }

        for i in 0..self.bodies.len() {
            if self.bodies[i].active {
                let position = self.bodies[i].position;
                let mass = self.bodies[i].mass;
                for source in world_forces {
                    match source.evaluate(position, mass) {
                        Ok(contribution) => self.bodies[i].queue_force(contribution),
                        Err(err) => warn!("world force dropped: {err}"),
                    }
                }
                self.bodies[i].integrate_forces(dt);
            } else {
                continue;
            }

            let mut step_velocity = self.bodies[i].velocity * dt;
            let mut step_rotation = self.bodies[i].angular_velocity * dt;

            for j in 0..self.bodies.len() {
                if i == j || self.bodies[j].is_removed() {
                    continue;
                }
                if !collision::broad_phase(&self.bodies[i], &self.bodies[j], &step_velocity) {
                    continue;
                }

                let outcome = collision::constrain_pair(
                    &self.bodies[i],
                    &self.bodies[j],
                    step_velocity,
                    step_rotation,
                    dt,
                );
                if let Some(impulse) = outcome.impulse_a {
                    self.bodies[i].queue_force(impulse);
                }
                if let Some(impulse) = outcome.impulse_b {
                    self.bodies[j].queue_force(impulse);
                }

                // A collision never increases the step's motion.
                if outcome.velocity.norm_squared() < step_velocity.norm_squared() {
                    step_velocity = outcome.velocity;
                }
                if outcome.rotation.norm_squared() < step_rotation.norm_squared() {
                    step_rotation = outcome.rotation;
                }
            }

            self.bodies[i].position += step_velocity;
            self.bodies[i].orientation += step_rotation;
        }
    }
}

impl<const N: usize> Default for PhysicsWorld<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-aligned arena box consumed by the external spawn/interaction layer.
///
/// Not part of the physics step itself: bodies are kept in play by the wall
/// bodies, not by this box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Minimum corner.
    pub lower: Vector3<f32>,
    /// Maximum corner.
    pub upper: Vector3<f32>,
}

impl WorldBounds {
    /// Create bounds from the two opposite corners.
    pub fn new(lower: Vector3<f32>, upper: Vector3<f32>) -> Self {
        Self { lower, upper }
    }

    /// Whether `point` lies strictly inside the box.
    pub fn contains(&self, point: &Vector3<f32>) -> bool {
        point.x > self.lower.x
            && point.x < self.upper.x
            && point.y > self.lower.y
            && point.y < self.upper.y
            && point.z > self.lower.z
            && point.z < self.upper.z
    }
}
