//! Flattened triangle-mesh BVH construction.
//!
//! [`Bvh::from_float_data`] and [`Bvh::from_geometry`] copy a mesh out of
//! caller buffers and build a binary tree of axis-aligned boxes over its
//! triangles, using either binned SAH or midpoint splits. The result is a
//! pointer-free node array (root at index 0, siblings adjacent) plus a
//! permutation of the triangle ids that leaves index into.

pub mod axis;
pub use axis::*;

pub mod bounds;
pub use bounds::*;

pub mod error;
pub use error::*;

pub mod geometry;
pub use geometry::*;

pub mod centroid;
pub use centroid::*;

pub mod node;
pub use node::*;

pub mod split;
pub use split::*;

pub mod partition;
pub use partition::*;

pub mod bvh;
pub use bvh::*;
