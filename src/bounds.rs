extern crate glam;

use glam::{Affine3A, Vec3A};

use crate::geometry::{read_position, Vertex};

/// Axis-aligned bounding box.
///
/// The default value is the empty box (`min = +inf`, `max = -inf` per
/// component), the identity for [`Bounds::union`] and [`Bounds::grow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3A,
    pub max: Vec3A,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec3A::splat(f32::INFINITY),
            max: Vec3A::splat(-f32::INFINITY),
        }
    }
}

impl Bounds {
    /// Grow the box to contain a new point
    #[inline]
    pub fn grow(&mut self, point: Vec3A) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grow the box to contain another box
    #[inline]
    pub fn grow_bounds(&mut self, other: &Bounds) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Smallest box containing `self` and `point`
    #[inline]
    pub fn expand(&self, point: Vec3A) -> Bounds {
        Bounds {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Smallest box containing both operands. Commutative and associative
    /// with `Bounds::default()` as identity.
    #[inline]
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Bounds of a set of points
    pub fn from_points(points: &[Vec3A]) -> Bounds {
        let mut bounds = Bounds::default();
        for point in points {
            bounds.grow(*point);
        }
        bounds
    }

    /// Bounds of the positions of a set of vertices
    pub fn from_vertices(vertices: &[Vertex]) -> Bounds {
        let mut bounds = Bounds::default();
        for vertex in vertices {
            bounds.grow(vertex.position);
        }
        bounds
    }

    /// Bounds of a set of vertices after applying `transform` to each
    /// position. Used for world-space bounds of transformed geometry.
    pub fn from_vertices_with_transform(vertices: &[Vertex], transform: &Affine3A) -> Bounds {
        let mut bounds = Bounds::default();
        for vertex in vertices {
            bounds.grow(transform.transform_point3a(vertex.position));
        }
        bounds
    }

    /// Bounds of `count` positions read from a strided raw buffer. Only the
    /// leading three floats of each element are read; trailing attributes
    /// are skipped via `stride` (in bytes).
    pub fn from_float_data(data: &[u8], stride: usize, count: usize) -> Bounds {
        let mut bounds = Bounds::default();
        for i in 0..count {
            if let Some(position) = read_position(data, i * stride) {
                bounds.grow(position);
            }
        }
        bounds
    }

    /// One of the 8 box corners. Bit 0 of `index` selects x, bit 1 selects
    /// y, bit 2 selects z; a set bit picks `max` on that axis, a clear bit
    /// picks `min`. Downstream frustum/occlusion code relies on this
    /// ordering.
    #[inline]
    pub fn corner(&self, index: usize) -> Vec3A {
        debug_assert!(index < 8);
        Vec3A::new(
            if index & 1 != 0 { self.max.x } else { self.min.x },
            if index & 2 != 0 { self.max.y } else { self.min.y },
            if index & 4 != 0 { self.max.z } else { self.min.z },
        )
    }

    /// Bounds of the box under a general affine map. Axis alignment is not
    /// preserved, so all 8 corners are transformed and re-accumulated, not
    /// just the two extremes.
    pub fn transform(&self, transform: &Affine3A) -> Bounds {
        let mut bounds = Bounds::default();
        for i in 0..8 {
            bounds.grow(transform.transform_point3a(self.corner(i)));
        }
        bounds
    }

    /// If the bounds are valid (min <= max)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    #[inline]
    pub fn center(&self) -> Vec3A {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn extent(&self) -> Vec3A {
        self.max - self.min
    }

    /// Surface area of the box, 0 for empty bounds
    #[inline]
    pub fn surface_area(&self) -> f32 {
        if !self.is_valid() {
            return 0.0;
        }
        let e = self.extent();
        2.0 * (e.x * e.y + e.y * e.z + e.z * e.x)
    }
}
