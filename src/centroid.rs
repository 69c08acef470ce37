extern crate glam;

use glam::Vec3A;

use crate::{Bounds, TriangleIndices};

/// Per-triangle centroids and local bounds, computed once from the
/// position/index arrays before subdivision starts and read-only afterwards.
/// Indexed by original triangle id.
#[derive(Debug, Clone, Default)]
pub struct CentroidIndex {
    centroids: Vec<Vec3A>,
    tri_bounds: Vec<Bounds>,
}

impl CentroidIndex {
    pub fn build(positions: &[Vec3A], triangles: &[TriangleIndices]) -> Self {
        let mut centroids = Vec::with_capacity(triangles.len());
        let mut tri_bounds = Vec::with_capacity(triangles.len());

        for tri in triangles {
            let v0 = positions[tri.i0 as usize];
            let v1 = positions[tri.i1 as usize];
            let v2 = positions[tri.i2 as usize];

            centroids.push((v0 + v1 + v2) / 3.0);

            let mut bounds = Bounds::default();
            bounds.grow(v0);
            bounds.grow(v1);
            bounds.grow(v2);
            tri_bounds.push(bounds);
        }

        Self {
            centroids,
            tri_bounds,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    #[inline]
    pub fn centroid(&self, tri_id: u32) -> Vec3A {
        self.centroids[tri_id as usize]
    }

    #[inline]
    pub fn tri_bounds(&self, tri_id: u32) -> &Bounds {
        &self.tri_bounds[tri_id as usize]
    }

    #[inline]
    pub fn centroids(&self) -> &[Vec3A] {
        &self.centroids
    }

    /// Give up the centroid array so the finished BVH can own it
    #[inline]
    pub(crate) fn into_centroids(self) -> Vec<Vec3A> {
        self.centroids
    }
}
