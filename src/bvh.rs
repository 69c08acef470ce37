extern crate glam;

use glam::Vec3A;

use smallvec::SmallVec;

use crate::geometry::{read_indices, read_positions, triangles_from_indices};
use crate::{
    partition_by_centroid, BinnedSahSplit, Bounds, BvhError, BvhNode, CentroidIndex, GeometryData,
    IndexWidth, MidpointSplit, SplitPlane, SplitStrategy, TriangleIndices,
};

/// Ranges at or below this size become leaves without consulting the split
/// strategy
pub const MAX_LEAF_PRIMS: u32 = 4;

/// A flattened bounding volume hierarchy over a triangle mesh.
///
/// The root is always node 0 and children of an internal node sit at
/// consecutive indices. Every array is exclusively owned by the instance;
/// construction copies out of caller buffers and nothing aliases them
/// afterwards. Dropping the instance releases everything.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    tri_ids: Vec<u32>,
    positions: Vec<Vec3A>,
    triangles: Vec<TriangleIndices>,
    centroids: Vec<Vec3A>,
    nodes_used: u32,
    use_sah: bool,
}

/// Pending subdivision work: a node slot and its `[start, start + count)`
/// range of the id array
struct BuildRange {
    node: u32,
    start: u32,
    count: u32,
}

impl Bvh {
    /// Inline capacity of the subdivision work-stack. Ranges at least halve
    /// every two levels, so spills past this are rare even for huge meshes.
    const STACK_CAPACITY: usize = 64;

    /// Build from raw buffers: a strided vertex buffer (`vertex_stride` in
    /// bytes, only the leading 3 floats of each element are read) and an
    /// index buffer of `index_count` indices of the given width.
    /// `index_count` must be a multiple of 3.
    pub fn from_float_data(
        vertex_data: &[u8],
        vertex_stride: usize,
        vertex_count: usize,
        index_data: &[u8],
        index_count: usize,
        index_width: IndexWidth,
        use_sah: bool,
    ) -> Result<Bvh, BvhError> {
        if index_count % 3 != 0 {
            return Err(BvhError::IndexCountNotTriangles { index_count });
        }

        let positions = read_positions(vertex_data, vertex_stride, vertex_count)?;
        let flat_indices = read_indices(index_data, index_count, index_width)?;
        let triangles = triangles_from_indices(&flat_indices, vertex_count)?;

        Ok(Self::build_with(positions, triangles, use_sah))
    }

    /// Build from structured geometry. Normals and uvs are ignored; only
    /// the vertex positions and the triangle indices are copied out.
    pub fn from_geometry(geometry: &GeometryData, use_sah: bool) -> Result<Bvh, BvhError> {
        let vertex_count = geometry.vertices.len();
        for tri in &geometry.indices {
            for index in [tri.i0, tri.i1, tri.i2] {
                if index as usize >= vertex_count {
                    return Err(BvhError::IndexOutOfBounds {
                        index,
                        vertex_count,
                    });
                }
            }
        }

        let positions: Vec<Vec3A> = geometry.vertices.iter().map(|v| v.position).collect();
        Ok(Self::build_with(positions, geometry.indices.clone(), use_sah))
    }

    fn build_with(positions: Vec<Vec3A>, triangles: Vec<TriangleIndices>, use_sah: bool) -> Bvh {
        if use_sah {
            Self::build::<BinnedSahSplit>(positions, triangles, use_sah)
        } else {
            Self::build::<MidpointSplit>(positions, triangles, use_sah)
        }
    }

    /// Top-down construction over an explicit work-stack. Identical input
    /// and strategy always produce a bit-identical node array.
    fn build<Strat>(positions: Vec<Vec3A>, triangles: Vec<TriangleIndices>, use_sah: bool) -> Bvh
    where
        Strat: SplitStrategy,
    {
        let tri_count = triangles.len();
        let index = CentroidIndex::build(&positions, &triangles);

        let mut tri_ids: Vec<u32> = (0..tri_count as u32).collect();

        // Worst case for a strictly binary tree with non-empty leaves;
        // trimmed back to nodes_used once the build finishes
        let node_capacity = if tri_count > 0 { 2 * tri_count - 1 } else { 1 };
        let mut nodes = vec![BvhNode::default(); node_capacity];
        let mut nodes_used: u32 = 1;

        let mut stack: SmallVec<[BuildRange; Self::STACK_CAPACITY]> = SmallVec::new();
        if tri_count > 0 {
            stack.push(BuildRange {
                node: 0,
                start: 0,
                count: tri_count as u32,
            });
        }

        while let Some(BuildRange { node, start, count }) = stack.pop() {
            let range = &tri_ids[start as usize..(start + count) as usize];

            let mut aabb = Bounds::default();
            for &id in range {
                aabb.grow_bounds(index.tri_bounds(id));
            }

            let plane = if count <= MAX_LEAF_PRIMS {
                SplitPlane::default()
            } else {
                Strat::split_plane(&index, range, &aabb)
            };

            if !plane.should_split {
                let node = &mut nodes[node as usize];
                node.aabb = aabb;
                node.setup_prims(start, count);
                continue;
            }

            let range = &mut tri_ids[start as usize..(start + count) as usize];
            let mut left_count =
                partition_by_centroid(range, &index, plane.axis, plane.split_position) as u32;
            if left_count == 0 || left_count == count {
                // The plane separated nothing; fall back to the range's
                // median index so subdivision always makes progress
                left_count = count / 2;
            }

            let left_child = nodes_used;
            nodes_used += 2;

            {
                let node = &mut nodes[node as usize];
                node.aabb = aabb;
                node.setup_left_child(left_child);
            }

            stack.push(BuildRange {
                node: left_child,
                start,
                count: left_count,
            });
            stack.push(BuildRange {
                node: left_child + 1,
                start: start + left_count,
                count: count - left_count,
            });
        }

        nodes.truncate(nodes_used as usize);

        log::debug!(
            "built bvh; triangles = {}, nodes = {}, sah = {}",
            tri_count,
            nodes_used,
            use_sah
        );

        Bvh {
            nodes,
            tri_ids,
            positions,
            triangles,
            centroids: index.into_centroids(),
            nodes_used,
            use_sah,
        }
    }

    /// Flattened node array, `nodes_used` entries, root at index 0
    #[inline]
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Permutation of `0..triangle_count`; leaf ranges index into this
    #[inline]
    pub fn tri_ids(&self) -> &[u32] {
        &self.tri_ids
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3A] {
        &self.positions
    }

    #[inline]
    pub fn triangles(&self) -> &[TriangleIndices] {
        &self.triangles
    }

    /// Per-triangle centroids, indexed by original triangle id
    #[inline]
    pub fn centroids(&self) -> &[Vec3A] {
        &self.centroids
    }

    #[inline]
    pub fn nodes_used(&self) -> u32 {
        self.nodes_used
    }

    /// Which heuristic produced this tree
    #[inline]
    pub fn use_sah(&self) -> bool {
        self.use_sah
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Root bounds; the empty bounds for a BVH over zero triangles
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.nodes.first().map_or_else(Bounds::default, |n| n.aabb)
    }
}
