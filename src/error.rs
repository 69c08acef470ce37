use std::error::Error;
use std::fmt;

/// Structural input problems surfaced by the construction entry points.
///
/// Degenerate geometry (zero triangles, coincident vertices, zero-area
/// triangles) is not an error; those inputs build a trivial but well-formed
/// BVH. These variants cover inputs that would otherwise read out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BvhError {
    /// The index count is not a multiple of 3
    IndexCountNotTriangles { index_count: usize },
    /// The vertex stride is smaller than one position (3 floats)
    VertexStrideTooSmall { stride: usize },
    /// The vertex buffer is too small for the declared count and stride
    UndersizedVertexBuffer { expected: usize, actual: usize },
    /// The index buffer is too small for the declared count and width
    UndersizedIndexBuffer { expected: usize, actual: usize },
    /// A triangle references a vertex past the end of the vertex array
    IndexOutOfBounds { index: u32, vertex_count: usize },
}

impl fmt::Display for BvhError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BvhError::IndexCountNotTriangles { index_count } => {
                write!(
                    f,
                    "index count {} is not a multiple of 3",
                    index_count
                )
            }
            BvhError::VertexStrideTooSmall { stride } => {
                write!(
                    f,
                    "vertex stride {} is smaller than a position (12 bytes)",
                    stride
                )
            }
            BvhError::UndersizedVertexBuffer { expected, actual } => {
                write!(
                    f,
                    "vertex buffer holds {} bytes but the declared layout needs {}",
                    actual, expected
                )
            }
            BvhError::UndersizedIndexBuffer { expected, actual } => {
                write!(
                    f,
                    "index buffer holds {} bytes but the declared layout needs {}",
                    actual, expected
                )
            }
            BvhError::IndexOutOfBounds {
                index,
                vertex_count,
            } => {
                write!(
                    f,
                    "vertex index {} out of bounds for {} vertices",
                    index, vertex_count
                )
            }
        }
    }
}

impl Error for BvhError {}
