//! Vector and orientation helpers shared by the collision pipeline.
//!
//! Orientations are plain Euler angles (radians about X, Y and Z), combined
//! into a single rotation for every local-to-world transform. All helpers
//! that feed `acos` or divide by a projected length guard against degenerate
//! inputs and report `None` instead of propagating non-finite values.

use nalgebra::{Rotation3, Vector3};

// ComplexField provides sqrt()/acos() for f32 in no_std via libm
#[allow(unused_imports)]
use nalgebra::ComplexField;

/// Orientation as rotation angles in radians about the X, Y and Z axes.
pub type EulerAngles = Vector3<f32>;

/// Minimum squared-length product for two vectors to span a defined angle.
pub const DIRECTION_EPSILON: f32 = 1e-12;

/// Plane/path denominators below this magnitude are treated as parallel.
pub const PARALLEL_EPSILON: f32 = 1e-9;

/// Angular tolerance (radians) for the triangle containment test.
pub const CONTAINMENT_EPSILON: f32 = 1e-3;

/// Combined rotation for an Euler-angle orientation.
#[inline]
pub fn rotation(orientation: &EulerAngles) -> Rotation3<f32> {
    Rotation3::from_euler_angles(orientation.x, orientation.y, orientation.z)
}

/// Angle between two vectors in radians.
///
/// Returns `None` when either vector is too short to have a direction.
pub fn angle_between(a: &Vector3<f32>, b: &Vector3<f32>) -> Option<f32> {
    let len_product = a.norm_squared() * b.norm_squared();
    if len_product < DIRECTION_EPSILON {
        return None;
    }
    let cos = (a.dot(b) / len_product.sqrt()).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// Time at which a point travelling along `line_vector` from `line_point`
/// crosses the plane through `plane_point` with normal `plane_normal`.
///
/// One unit of time corresponds to the full `line_vector` displacement.
/// Returns `None` when the path is parallel to the plane.
pub fn time_of_plane_crossing(
    line_vector: &Vector3<f32>,
    line_point: &Vector3<f32>,
    plane_normal: &Vector3<f32>,
    plane_point: &Vector3<f32>,
) -> Option<f32> {
    let denominator = plane_normal.dot(line_vector);
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }
    Some(-plane_normal.dot(&(line_point - plane_point)) / denominator)
}

/// Angle-sum containment check from one corner of the triangle.
///
/// `edge1` and `edge2` are the two triangle edges leaving the corner and
/// `to_point` runs from the corner to the candidate point. The point lies
/// inside the wedge iff the angles it forms with both edges sum to the wedge
/// angle. A zero-length `to_point` (point on the corner) counts as outside.
fn wedge_contains(edge1: &Vector3<f32>, edge2: &Vector3<f32>, to_point: &Vector3<f32>) -> bool {
    match (
        angle_between(edge1, edge2),
        angle_between(edge2, to_point),
        angle_between(edge1, to_point),
    ) {
        (Some(wedge), Some(from_edge2), Some(from_edge1)) => {
            (from_edge1 + from_edge2 - wedge).abs() < CONTAINMENT_EPSILON
        }
        _ => false,
    }
}

/// Whether `point` lies inside the triangle `a`, `b`, `c`.
///
/// Assumes the point is on the triangle's plane. The wedge test runs from
/// vertex `a` and again from vertex `b`; the second check rejects co-planar
/// points that line up with an edge but fall outside the segment.
pub fn point_in_triangle(
    point: &Vector3<f32>,
    a: &Vector3<f32>,
    b: &Vector3<f32>,
    c: &Vector3<f32>,
) -> bool {
    wedge_contains(&(b - a), &(c - a), &(point - a))
        && wedge_contains(&(a - b), &(c - b), &(point - b))
}
