extern crate glam;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3A};

use crate::BvhError;

/// Size in bytes of one position (3 floats) inside a strided vertex buffer
pub(crate) const POSITION_SIZE: usize = 3 * std::mem::size_of::<f32>();

/// A mesh vertex. The BVH builder only reads `position`; `normal` and `uv`
/// ride along for callers that keep full vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3A,
    pub normal: Vec3A,
    pub uv: Vec2,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Vec3A::ZERO,
            normal: Vec3A::ZERO,
            uv: Vec2::ZERO,
        }
    }
}

/// One triangle as three indices into a vertex/position array
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct TriangleIndices {
    pub i0: u32,
    pub i1: u32,
    pub i2: u32,
}

impl TriangleIndices {
    #[inline]
    pub fn new(i0: u32, i1: u32, i2: u32) -> Self {
        Self { i0, i1, i2 }
    }
}

/// Structured geometry in the canonical vertex/triangle-index layout
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<TriangleIndices>,
}

/// Element width of a raw index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWidth {
    /// 2-byte unsigned indices
    U16,
    /// 4-byte unsigned indices
    U32,
}

impl IndexWidth {
    #[inline]
    pub fn size(self) -> usize {
        match self {
            IndexWidth::U16 => std::mem::size_of::<u16>(),
            IndexWidth::U32 => std::mem::size_of::<u32>(),
        }
    }
}

/// Read one position from a byte buffer at `offset`, or `None` if the
/// buffer is too short. Unaligned reads are fine; interleaved vertex
/// layouts rarely keep positions 4-byte aligned.
#[inline]
pub(crate) fn read_position(data: &[u8], offset: usize) -> Option<Vec3A> {
    let bytes = data.get(offset..offset + POSITION_SIZE)?;
    let [x, y, z]: [f32; 3] = bytemuck::pod_read_unaligned(bytes);
    Some(Vec3A::new(x, y, z))
}

/// Copy `count` positions out of a strided raw vertex buffer. Attributes
/// past the leading 3 floats of each element are ignored.
pub(crate) fn read_positions(
    data: &[u8],
    stride: usize,
    count: usize,
) -> Result<Vec<Vec3A>, BvhError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if stride < POSITION_SIZE {
        return Err(BvhError::VertexStrideTooSmall { stride });
    }

    let expected = stride * (count - 1) + POSITION_SIZE;
    if data.len() < expected {
        return Err(BvhError::UndersizedVertexBuffer {
            expected,
            actual: data.len(),
        });
    }

    let mut positions = Vec::with_capacity(count);
    for i in 0..count {
        // Bounds were checked above, so the read cannot fail
        let position = read_position(data, i * stride).ok_or(BvhError::UndersizedVertexBuffer {
            expected,
            actual: data.len(),
        })?;
        positions.push(position);
    }
    Ok(positions)
}

/// Decode `count` indices out of a raw index buffer of the given width
pub(crate) fn read_indices(
    data: &[u8],
    count: usize,
    width: IndexWidth,
) -> Result<Vec<u32>, BvhError> {
    let expected = count * width.size();
    if data.len() < expected {
        return Err(BvhError::UndersizedIndexBuffer {
            expected,
            actual: data.len(),
        });
    }

    let indices = match width {
        IndexWidth::U16 => {
            let narrow: Vec<u16> = bytemuck::pod_collect_to_vec(&data[..expected]);
            narrow.into_iter().map(u32::from).collect()
        }
        IndexWidth::U32 => bytemuck::pod_collect_to_vec(&data[..expected]),
    };
    Ok(indices)
}

/// Group a flat index list into triangles, validating every index against
/// the vertex count
pub(crate) fn triangles_from_indices(
    indices: &[u32],
    vertex_count: usize,
) -> Result<Vec<TriangleIndices>, BvhError> {
    if indices.len() % 3 != 0 {
        return Err(BvhError::IndexCountNotTriangles {
            index_count: indices.len(),
        });
    }

    for &index in indices {
        if index as usize >= vertex_count {
            return Err(BvhError::IndexOutOfBounds {
                index,
                vertex_count,
            });
        }
    }

    Ok(indices
        .chunks_exact(3)
        .map(|tri| TriangleIndices::new(tri[0], tri[1], tri[2]))
        .collect())
}
