//! Immutable convex polyhedron snapshots.
//!
//! A [`ConvexShape`] borrows its vertex and face slices for its entire
//! lifetime, mirroring how meshes reference static geometry data. The shape
//! is validated and its bounding sphere computed once at construction;
//! afterwards only the owning body's pose moves it.

use nalgebra::Vector3;

// ComplexField provides sqrt() for f32 in no_std via libm
#[allow(unused_imports)]
use nalgebra::ComplexField;

use crate::error::PhysicsError;
use crate::math::DIRECTION_EPSILON;

/// A triangular face: three vertex indices plus a precomputed outward unit
/// normal in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Indices into the owning shape's vertex list.
    pub indices: [usize; 3],
    /// Outward unit normal in local space.
    pub normal: Vector3<f32>,
}

impl Face {
    /// Create a face from three vertex indices and an outward normal.
    pub fn new(a: usize, b: usize, c: usize, normal: Vector3<f32>) -> Self {
        Self {
            indices: [a, b, c],
            normal,
        }
    }
}

/// Local-space bounding sphere, computed once per shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vector3<f32>,
    pub radius: f32,
}

/// An immutable convex polyhedron: ordered vertices, triangular faces with
/// outward normals, and a fixed bounding sphere.
#[derive(Debug, Clone, Copy)]
pub struct ConvexShape<'a> {
    vertices: &'a [Vector3<f32>],
    faces: &'a [Face],
    bounding_sphere: BoundingSphere,
}

impl<'a> ConvexShape<'a> {
    /// Validate the geometry and compute its bounding sphere.
    ///
    /// Rejects empty vertex or face lists, out-of-range face indices, and
    /// zero-length face normals.
    pub fn new(vertices: &'a [Vector3<f32>], faces: &'a [Face]) -> Result<Self, PhysicsError> {
        if vertices.is_empty() || faces.is_empty() {
            return Err(PhysicsError::EmptyGeometry);
        }
        for (i, face) in faces.iter().enumerate() {
            for &index in &face.indices {
                if index >= vertices.len() {
                    return Err(PhysicsError::FaceIndexOutOfRange {
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
            if face.normal.norm_squared() < DIRECTION_EPSILON {
                return Err(PhysicsError::DegenerateFaceNormal { face: i });
            }
        }

        Ok(Self {
            vertices,
            faces,
            bounding_sphere: bounding_sphere_of(vertices),
        })
    }

    /// Local-space vertices, in construction order.
    #[inline]
    pub fn vertices(&self) -> &'a [Vector3<f32>] {
        self.vertices
    }

    /// Triangular faces with outward normals.
    #[inline]
    pub fn faces(&self) -> &'a [Face] {
        self.faces
    }

    /// Local-space bounding sphere. The radius is fixed at construction;
    /// only the center moves with the owning body's position.
    #[inline]
    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounding_sphere
    }
}

/// Bounding sphere with its center at the AABB midpoint and radius reaching
/// the farthest vertex.
fn bounding_sphere_of(vertices: &[Vector3<f32>]) -> BoundingSphere {
    let mut min = vertices[0];
    let mut max = vertices[0];
    for v in vertices {
        min = min.inf(v);
        max = max.sup(v);
    }
    let center = (min + max) * 0.5;

    let mut radius_sq: f32 = 0.0;
    for v in vertices {
        radius_sq = radius_sq.max((v - center).norm_squared());
    }

    BoundingSphere {
        center,
        radius: radius_sq.sqrt(),
    }
}

/// Vertex positions for an axis-aligned cuboid centered on the origin.
///
/// Pairs with [`cuboid_faces`]; the ordering matches the face index table.
pub fn cuboid_vertices(half_extents: Vector3<f32>) -> [Vector3<f32>; 8] {
    let (hx, hy, hz) = (half_extents.x, half_extents.y, half_extents.z);
    [
        Vector3::new(-hx, -hy, hz),
        Vector3::new(hx, -hy, hz),
        Vector3::new(hx, hy, hz),
        Vector3::new(-hx, hy, hz),
        Vector3::new(-hx, -hy, -hz),
        Vector3::new(hx, -hy, -hz),
        Vector3::new(hx, hy, -hz),
        Vector3::new(-hx, hy, -hz),
    ]
}

/// Triangulated cuboid faces with outward unit normals, indexing the vertex
/// order produced by [`cuboid_vertices`].
pub fn cuboid_faces() -> [Face; 12] {
    let x = Vector3::new(1.0, 0.0, 0.0);
    let y = Vector3::new(0.0, 1.0, 0.0);
    let z = Vector3::new(0.0, 0.0, 1.0);
    [
        // front (+z)
        Face::new(0, 1, 2, z),
        Face::new(0, 2, 3, z),
        // back (-z)
        Face::new(5, 4, 7, -z),
        Face::new(5, 7, 6, -z),
        // top (+y)
        Face::new(3, 2, 6, y),
        Face::new(3, 6, 7, y),
        // bottom (-y)
        Face::new(4, 5, 1, -y),
        Face::new(4, 1, 0, -y),
        // right (+x)
        Face::new(1, 5, 6, x),
        Face::new(1, 6, 2, x),
        // left (-x)
        Face::new(4, 0, 3, -x),
        Face::new(4, 3, 7, -x),
    ]
}
