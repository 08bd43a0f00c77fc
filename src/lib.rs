//! Impulse-based rigid body simulation for convex polyhedra in a bounded
//! arena.
//!
//! Bodies carry an immutable convex shape, a pose (position + Euler-angle
//! orientation), linear and angular velocity, mass and an elasticity
//! response multiplier. One call to [`PhysicsWorld::step`] advances the
//! simulation by a tick:
//!
//! - queued [`ForceContribution`]s and world [`ForceSource`]s are folded
//!   into each active body's velocity,
//! - candidate pairs are pruned with swept bounding spheres, then tested
//!   exactly by sweeping every vertex of one body against every face of the
//!   other,
//! - a confirmed contact clamps the body's motion for this step and queues a
//!   mass- and elasticity-weighted impulse on both bodies for the next step.
//!
//! Rendering, picking and input are external collaborators: they supply
//! geometry and initial placement, call `step` each frame, and read back
//! poses afterwards.
//!
//! Designed for `no_std` environments using fixed-capacity `heapless`
//! collections; no heap allocation anywhere in the core.
//!
//! # Example
//! ```
//! use rigid3d::shape::{cuboid_faces, cuboid_vertices};
//! use rigid3d::{ConvexShape, Gravity, PhysicsWorld, RigidBody};
//! use nalgebra::Vector3;
//!
//! # fn main() -> Result<(), rigid3d::PhysicsError> {
//! let vertices = cuboid_vertices(Vector3::new(0.5, 0.5, 0.5));
//! let faces = cuboid_faces();
//! let shape = ConvexShape::new(&vertices, &faces)?;
//!
//! let mut world = PhysicsWorld::<16>::new();
//! let ball = world
//!     .add_body(
//!         RigidBody::new(shape, 1.0)?
//!             .with_position(Vector3::new(0.0, 5.0, 0.0))
//!             .with_elasticity(0.9),
//!     )
//!     .unwrap();
//!
//! // 10 ms ticks under standard gravity.
//! let gravity = Gravity::standard();
//! for _ in 0..100 {
//!     world.step(10.0, &[&gravity]);
//! }
//! assert!(world.body(ball).unwrap().position.y < 5.0);
//! # Ok(())
//! # }
//! ```
#![no_std]

pub mod body;
pub mod collision;
pub mod error;
pub mod force;
pub mod math;
pub mod shape;
pub mod world;

pub use body::{RigidBody, PENDING_FORCE_CAP};
pub use collision::{broad_phase, detect_contact, Contact};
pub use error::PhysicsError;
pub use force::{ForceContribution, ForceSource, Gravity};
pub use math::EulerAngles;
pub use shape::{BoundingSphere, ConvexShape, Face};
pub use world::{BodyId, PhysicsWorld, WorldBounds};
