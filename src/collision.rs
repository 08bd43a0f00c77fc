//! Collision detection and impulse response.
//!
//! Detection is two-phase. The broad phase sweeps the moving body's bounding
//! sphere along its tentative step displacement and tests it against the
//! other body's sphere at rest — a cheap conservative reject. The narrow
//! phase then sweeps every vertex of one body against every face of the
//! other (and the reverse, using the negated candidate velocity for the
//! relative motion) and keeps the earliest crossing that lands inside a
//! face triangle.
//!
//! Response is deliberately two-phase as well: the governing contact clamps
//! the body's motion for the current step immediately, while the
//! momentum-exchange impulse is queued as a pending force and only folded
//! into velocities on the next integration pass. This trades one step of
//! resolution latency for a simpler solver.

use nalgebra::Vector3;

// ComplexField provides cos()/sqrt() for f32 in no_std via libm
#[allow(unused_imports)]
use nalgebra::ComplexField;

use crate::body::RigidBody;
use crate::force::ForceContribution;
use crate::math::{self, EulerAngles};

/// Empirical scale applied to approach speeds in the impulse computation.
const IMPULSE_SCALE: f32 = 1000.0;

/// Slack below t = 0 accepted at step boundaries to absorb floating error.
const TIME_TOLERANCE: f32 = 0.01;

/// Upper crossing-time bound for the forward (A-into-B) sweep.
const FORWARD_WINDOW: f32 = 1.1;

/// Upper crossing-time bound for the reverse (B-into-A) sweep.
const REVERSE_WINDOW: f32 = 1.01;

/// A confirmed collision for one step of one body pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal of the struck face, flipped so the queued impulse pushes
    /// the moving body back out.
    pub normal: Vector3<f32>,
    /// World-space contact point.
    pub point: Vector3<f32>,
    /// Fraction of the tested step that is safe to take, clamped to ≤ 1.
    pub time: f32,
}

/// The result of testing one pair: the motion the moving body may still
/// take this step, plus the impulses to queue on both bodies.
#[derive(Debug, Clone)]
pub(crate) struct PairOutcome {
    pub velocity: Vector3<f32>,
    pub rotation: EulerAngles,
    pub contact: Option<Contact>,
    pub impulse_a: Option<ForceContribution>,
    pub impulse_b: Option<ForceContribution>,
}

/// Broad-phase reject for body `a` moving by `step_velocity` against body
/// `b` at its current position.
///
/// `a`'s sphere is translated by the displacement and inflated by its
/// length, so the full swept vertex set stays covered — false negatives are
/// impossible, false positives fall through to the narrow phase. The test is
/// asymmetric by design: each body is tested against the others' present
/// positions, not their own tentative moves.
pub fn broad_phase(a: &RigidBody<'_>, b: &RigidBody<'_>, step_velocity: &Vector3<f32>) -> bool {
    let mut swept = a.bounding_sphere_world();
    swept.center += step_velocity;
    swept.radius += step_velocity.norm();

    let other = b.bounding_sphere_world();
    let reach = swept.radius + other.radius;
    (other.center - swept.center).norm_squared() <= reach * reach
}

/// Test one pair and report the governing contact, if any.
///
/// Runs the same sweep the step orchestrator uses for body `a` moving by
/// `step_velocity` and `step_rotation` over one tick of length `dt`
/// seconds, without applying any response. Useful for spawn-placement and
/// picking checks between ticks.
pub fn detect_contact(
    a: &RigidBody<'_>,
    b: &RigidBody<'_>,
    step_velocity: Vector3<f32>,
    step_rotation: EulerAngles,
    dt: f32,
) -> Option<Contact> {
    constrain_pair(a, b, step_velocity, step_rotation, dt).contact
}

/// Narrow phase plus response for one pair.
///
/// `step_velocity` and `step_rotation` are body `a`'s candidate displacement
/// and rotation delta for this step (already scaled by dt); `dt` itself is
/// needed to put body `b`'s velocity on the same per-step footing for the
/// impulse computation.
pub(crate) fn constrain_pair(
    a: &RigidBody<'_>,
    b: &RigidBody<'_>,
    step_velocity: Vector3<f32>,
    step_rotation: EulerAngles,
    dt: f32,
) -> PairOutcome {
    let mut best_time = f32::INFINITY;
    let mut contact: Option<Contact> = None;
    let mut constrained_velocity = step_velocity;
    // The sweep never tightens rotation; the orchestrator's min-compare
    // keeps the candidate as-is.
    let constrained_rotation = step_rotation;

    let rot_a = math::rotation(&a.orientation);
    let rot_b = math::rotation(&b.orientation);
    let rotating = step_rotation.norm_squared() != 0.0;
    let rot_a_stepped = math::rotation(&(a.orientation + step_rotation));

    // Forward sweep: every vertex of A against every face of B.
    for vertex in a.shape().vertices() {
        let rotated = rot_a * vertex;
        // A rotating vertex sees the rotational displacement folded into its
        // path for this step; otherwise the linear displacement alone.
        let velocity = if rotating {
            rotated - rot_a_stepped * vertex + step_velocity
        } else {
            step_velocity
        };
        let point = rotated + a.position;

        for face in b.shape().faces() {
            let face_normal = rot_b * face.normal;
            if face_normal.dot(&velocity) >= 0.0 {
                continue; // face is not approaching
            }
            let face_point = rot_b * b.shape().vertices()[face.indices[0]] + b.position;
            let Some(time) =
                math::time_of_plane_crossing(&velocity, &point, &face_normal, &face_point)
            else {
                continue;
            };
            if !(-TIME_TOLERANCE..FORWARD_WINDOW).contains(&time) {
                continue;
            }

            let crossing = point + velocity * time;
            let tri_a = rot_b * b.shape().vertices()[face.indices[0]];
            let tri_b = rot_b * b.shape().vertices()[face.indices[1]];
            let tri_c = rot_b * b.shape().vertices()[face.indices[2]];
            if !math::point_in_triangle(&(crossing - b.position), &tri_a, &tri_b, &tri_c) {
                continue;
            }

            let time = time.min(1.0);
            if time < best_time {
                best_time = time;
                contact = Some(Contact {
                    normal: -face_normal,
                    point: crossing,
                    time,
                });
                constrained_velocity = velocity * time;
            }
        }
    }

    // Reverse sweep: every vertex of B against every face of A, with B
    // carrying the negated candidate velocity as the relative motion.
    let reverse_velocity = -step_velocity;
    for vertex in b.shape().vertices() {
        let point = rot_b * vertex + b.position;

        for face in a.shape().faces() {
            let face_normal = rot_a * face.normal;
            if face_normal.dot(&reverse_velocity) >= 0.0 {
                continue;
            }
            let face_point = rot_a * a.shape().vertices()[face.indices[0]] + a.position;
            let Some(time) =
                math::time_of_plane_crossing(&reverse_velocity, &point, &face_normal, &face_point)
            else {
                continue;
            };
            if !(-TIME_TOLERANCE..=REVERSE_WINDOW).contains(&time) {
                continue;
            }

            let crossing = point + reverse_velocity * time;
            let tri_a = rot_a * a.shape().vertices()[face.indices[0]];
            let tri_b = rot_a * a.shape().vertices()[face.indices[1]];
            let tri_c = rot_a * a.shape().vertices()[face.indices[2]];
            if !math::point_in_triangle(&(crossing - a.position), &tri_a, &tri_b, &tri_c) {
                continue;
            }

            // The reverse direction governs by the remaining step fraction.
            let remaining = 1.0 - time.min(1.0);
            if remaining < best_time {
                best_time = remaining;
                contact = Some(Contact {
                    normal: -face_normal,
                    point: crossing,
                    time: remaining,
                });
                constrained_velocity = reverse_velocity * -remaining;
            }
        }
    }

    let (impulse_a, impulse_b) = match &contact {
        Some(contact) => {
            let (fa, fb) = exchange_impulses(a, b, contact, &step_velocity, dt);
            (Some(fa), Some(fb))
        }
        None => (None, None),
    };

    PairOutcome {
        velocity: constrained_velocity,
        rotation: constrained_rotation,
        contact,
        impulse_a,
        impulse_b,
    }
}

/// Signed approach speed of a per-step displacement along the contact
/// normal, scaled by [`IMPULSE_SCALE`]. A displacement too short to have a
/// direction contributes nothing.
fn approach_speed(step_displacement: &Vector3<f32>, normal: &Vector3<f32>) -> f32 {
    match math::angle_between(step_displacement, normal) {
        Some(angle) => {
            (core::f32::consts::PI - angle).cos() * step_displacement.norm() * IMPULSE_SCALE
        }
        None => 0.0,
    }
}

/// 1D elastic/inelastic exchange along the contact normal.
///
/// Both incoming speeds are measured on per-step displacements so the two
/// bodies are weighted consistently. Each body's queued force is
/// `(incoming - outgoing) * mass * elasticity` along the unit normal,
/// applied at the contact point; it takes effect on the next integration
/// pass, one step after the contact.
fn exchange_impulses(
    a: &RigidBody<'_>,
    b: &RigidBody<'_>,
    contact: &Contact,
    step_velocity: &Vector3<f32>,
    dt: f32,
) -> (ForceContribution, ForceContribution) {
    let vai = approach_speed(step_velocity, &contact.normal);
    let vbi = approach_speed(&(b.velocity * dt), &contact.normal);

    let total_mass = a.mass + b.mass;
    let vaf = ((a.mass - b.mass) / total_mass) * vai + (2.0 * b.mass / total_mass) * vbi;
    let vbf = (2.0 * a.mass / total_mass) * vai + ((b.mass - a.mass) / total_mass) * vbi;

    let normal = contact.normal.normalize();
    (
        ForceContribution::new(
            normal * ((vai - vaf) * a.mass * a.elasticity),
            contact.point - a.position,
        ),
        ForceContribution::new(
            normal * ((vbi - vbf) * b.mass * b.elasticity),
            contact.point - b.position,
        ),
    )
}
