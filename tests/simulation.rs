//! End-to-end simulation scenarios driving the public API only.

use nalgebra::Vector3;
use rigid3d::shape::{cuboid_faces, cuboid_vertices, Face};
use rigid3d::{ConvexShape, Gravity, PhysicsWorld, RigidBody};

const FLOOR_TOP: f32 = 0.05;
const TOLERANCE: f32 = 1e-3;

fn floor_parts() -> ([Vector3<f32>; 8], [Face; 12]) {
    (
        cuboid_vertices(Vector3::new(7.5, 0.05, 7.5)),
        cuboid_faces(),
    )
}

fn lowest_vertex_y(body: &RigidBody<'_>) -> f32 {
    (0..body.shape().vertices().len())
        .map(|i| body.world_vertex(i).y)
        .fold(f32::INFINITY, f32::min)
}

#[test]
fn test_falling_cube_stops_on_floor() {
    let cube_vertices = cuboid_vertices(Vector3::new(0.5, 0.5, 0.5));
    let cube_faces = cuboid_faces();
    let (floor_vertices, floor_faces) = floor_parts();

    let mut world = PhysicsWorld::<4>::new();
    let faller = world
        .add_body(
            RigidBody::new(ConvexShape::new(&cube_vertices, &cube_faces).unwrap(), 1.0)
                .unwrap()
                .with_position(Vector3::new(0.1, 5.0, 0.07))
                .with_elasticity(0.0),
        )
        .unwrap();
    world
        .add_body(
            RigidBody::new(
                ConvexShape::new(&floor_vertices, &floor_faces).unwrap(),
                1.0,
            )
            .unwrap()
            .with_active(false),
        )
        .unwrap();

    let gravity = Gravity::standard();
    for step in 0..600 {
        world.step(10.0, &[&gravity]);
        let body = world.body(faller).unwrap();
        assert!(
            lowest_vertex_y(body) >= FLOOR_TOP - TOLERANCE,
            "cube sank through the floor at step {}: lowest vertex y = {}",
            step,
            lowest_vertex_y(body)
        );
    }

    // Settled: bottom face resting on the slab.
    let body = world.body(faller).unwrap();
    assert!(
        (body.position.y - (FLOOR_TOP + 0.5)).abs() < 1e-2,
        "cube did not come to rest on the floor: y = {}",
        body.position.y
    );
}

#[test]
fn test_resting_cube_stays_put() {
    let cube_vertices = cuboid_vertices(Vector3::new(0.5, 0.5, 0.5));
    let cube_faces = cuboid_faces();
    let (floor_vertices, floor_faces) = floor_parts();

    let mut world = PhysicsWorld::<4>::new();
    let cube = world
        .add_body(
            RigidBody::new(ConvexShape::new(&cube_vertices, &cube_faces).unwrap(), 1.0)
                .unwrap()
                // Bottom face exactly on the slab top, off-center to land
                // strictly inside one face triangle.
                .with_position(Vector3::new(0.1, FLOOR_TOP + 0.5, 0.07))
                .with_elasticity(0.0),
        )
        .unwrap();
    world
        .add_body(
            RigidBody::new(
                ConvexShape::new(&floor_vertices, &floor_faces).unwrap(),
                1.0,
            )
            .unwrap()
            .with_active(false),
        )
        .unwrap();

    let gravity = Gravity::standard();
    for _ in 0..300 {
        world.step(10.0, &[&gravity]);
    }

    let body = world.body(cube).unwrap();
    assert!(
        (body.position.y - (FLOOR_TOP + 0.5)).abs() < TOLERANCE,
        "resting cube drifted to y = {}",
        body.position.y
    );
}

#[test]
fn test_removed_body_no_longer_blocks() {
    // A removed slab must not keep catching fallers: removal takes the body
    // out of the collision pair loops, not just out of integration.
    let cube_vertices = cuboid_vertices(Vector3::new(0.5, 0.5, 0.5));
    let cube_faces = cuboid_faces();
    let (floor_vertices, floor_faces) = floor_parts();

    let mut world = PhysicsWorld::<4>::new();
    let faller = world
        .add_body(
            RigidBody::new(ConvexShape::new(&cube_vertices, &cube_faces).unwrap(), 1.0)
                .unwrap()
                .with_position(Vector3::new(0.1, 5.0, 0.07)),
        )
        .unwrap();
    let slab = world
        .add_body(
            RigidBody::new(
                ConvexShape::new(&floor_vertices, &floor_faces).unwrap(),
                1.0,
            )
            .unwrap()
            .with_active(false),
        )
        .unwrap();

    assert!(world.remove_body(slab));

    let gravity = Gravity::standard();
    for _ in 0..200 {
        world.step(10.0, &[&gravity]);
    }

    // Two seconds of free fall carry the cube far below the slab.
    let y = world.body(faller).unwrap().position.y;
    assert!(y < FLOOR_TOP - 1.0, "faller was blocked at y = {}", y);
}

#[test]
fn test_head_on_equal_mass_exchange_swaps_velocities() {
    // Fully elastic, equal masses: the bodies trade their approach speeds.
    // The tick length is chosen so the queued impulse reproduces the speed
    // exactly when it is folded in on the following integration pass:
    // dv = speed * dt * 1000 * dt, so dt = sqrt(0.001) s.
    let dt_ms = 31.6228;

    let small_vertices = cuboid_vertices(Vector3::new(0.25, 0.25, 0.25));
    let small_faces = cuboid_faces();
    let big_vertices = cuboid_vertices(Vector3::new(0.5, 0.5, 0.5));
    let big_faces = cuboid_faces();

    let mut world = PhysicsWorld::<4>::new();
    let a = world
        .add_body(
            RigidBody::new(
                ConvexShape::new(&small_vertices, &small_faces).unwrap(),
                1.0,
            )
            .unwrap()
            .with_position(Vector3::new(-0.3, 0.1, -0.06))
            .with_velocity(Vector3::new(5.0, 0.0, 0.0)),
        )
        .unwrap();
    let b = world
        .add_body(
            RigidBody::new(ConvexShape::new(&big_vertices, &big_faces).unwrap(), 1.0)
                .unwrap()
                .with_position(Vector3::new(0.55, 0.0, 0.0))
                .with_velocity(Vector3::new(-5.0, 0.0, 0.0)),
        )
        .unwrap();

    for _ in 0..3 {
        world.step(dt_ms, &[]);

        // The contact clamps motion before it can overlap.
        let right_of_a = world.body(a).unwrap().position.x + 0.25;
        let left_of_b = world.body(b).unwrap().position.x - 0.5;
        assert!(
            right_of_a <= left_of_b + TOLERANCE,
            "bodies interpenetrated: a = {}, b = {}",
            right_of_a,
            left_of_b
        );
    }

    let va = world.body(a).unwrap().velocity;
    let vb = world.body(b).unwrap().velocity;
    assert!((va.x - (-5.0)).abs() < 1e-2, "va.x = {}", va.x);
    assert!((vb.x - 5.0).abs() < 1e-2, "vb.x = {}", vb.x);
    assert!(va.y.abs() < 1e-2 && va.z.abs() < 1e-2);
    assert!(vb.y.abs() < 1e-2 && vb.z.abs() < 1e-2);
}

#[test]
fn test_inelastic_faller_receives_no_impulse() {
    // Elasticity 0 zeroes the queued force; the cube is held up purely by
    // the per-step motion clamp and never bounces.
    let cube_vertices = cuboid_vertices(Vector3::new(0.5, 0.5, 0.5));
    let cube_faces = cuboid_faces();
    let (floor_vertices, floor_faces) = floor_parts();

    let mut world = PhysicsWorld::<4>::new();
    let faller = world
        .add_body(
            RigidBody::new(ConvexShape::new(&cube_vertices, &cube_faces).unwrap(), 1.0)
                .unwrap()
                .with_position(Vector3::new(0.1, 1.0, 0.07))
                .with_elasticity(0.0),
        )
        .unwrap();
    world
        .add_body(
            RigidBody::new(
                ConvexShape::new(&floor_vertices, &floor_faces).unwrap(),
                1.0,
            )
            .unwrap()
            .with_active(false),
        )
        .unwrap();

    let gravity = Gravity::standard();
    let mut max_y_after_contact = f32::NEG_INFINITY;
    let mut touched = false;
    for _ in 0..300 {
        world.step(10.0, &[&gravity]);
        let y = world.body(faller).unwrap().position.y;
        if touched {
            max_y_after_contact = max_y_after_contact.max(y);
        } else if (y - (FLOOR_TOP + 0.5)).abs() < 1e-2 {
            touched = true;
        }
    }

    assert!(touched, "cube never reached the floor");
    assert!(
        max_y_after_contact <= FLOOR_TOP + 0.5 + 1e-2,
        "inelastic cube bounced to y = {}",
        max_y_after_contact
    );
}
