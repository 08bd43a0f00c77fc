//! Unified error type for the simulation core.
//!
//! Construction-time validation (mass, geometry) returns
//! `Result<T, PhysicsError>`; the step itself never returns an error and
//! instead logs and drops individual failing contributions.

use core::fmt;

/// Errors reported by body and shape construction and by force sources.
#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsError {
    /// Body mass was zero, negative, or non-finite.
    InvalidMass {
        /// The rejected mass value.
        mass: f32,
    },
    /// A shape was constructed with no vertices or no faces.
    EmptyGeometry,
    /// A face referenced a vertex index outside the vertex list.
    FaceIndexOutOfRange {
        /// The offending vertex index.
        index: usize,
        /// Number of vertices in the shape.
        vertex_count: usize,
    },
    /// A face carried a zero-length outward normal.
    DegenerateFaceNormal {
        /// Index of the offending face.
        face: usize,
    },
    /// A force source failed to produce a contribution.
    ForceEvaluation {
        /// Description of the failure, supplied by the source.
        reason: &'static str,
    },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMass { mass } => {
                write!(f, "body mass must be positive and finite, got {mass}")
            }
            Self::EmptyGeometry => write!(f, "shape needs at least one vertex and one face"),
            Self::FaceIndexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "face references vertex {index} but the shape has {vertex_count} vertices"
            ),
            Self::DegenerateFaceNormal { face } => {
                write!(f, "face {face} has a zero-length outward normal")
            }
            Self::ForceEvaluation { reason } => write!(f, "force evaluation failed: {reason}"),
        }
    }
}

impl core::error::Error for PhysicsError {}
