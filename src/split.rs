extern crate glam;

use std::cmp::min;

use strum::IntoEnumIterator;

use crate::{Axis, Bounds, CentroidIndex};

/// Number of SAH bins per axis
pub const BIN_COUNT: usize = 8;

/// Centroid extents below this are treated as flat; a flat axis cannot
/// separate anything
pub(crate) const FLAT_AXIS_EPSILON: f32 = 1e-6;

/// A split decision for a contiguous range of triangle ids
#[derive(Debug, Clone, Copy)]
pub struct SplitPlane {
    pub axis: Axis,
    pub split_position: f32,
    pub should_split: bool,
}

impl Default for SplitPlane {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            split_position: f32::INFINITY,
            should_split: false,
        }
    }
}

/// Strategy deciding whether and where to split a range of triangle ids.
/// `ids` is the range's slice of the permutation array and `node_bounds`
/// the range's aggregate bounds.
pub trait SplitStrategy {
    fn split_plane(index: &CentroidIndex, ids: &[u32], node_bounds: &Bounds) -> SplitPlane;
}

/// Bounds of the range's centroids
fn centroid_bounds(index: &CentroidIndex, ids: &[u32]) -> Bounds {
    let mut bounds = Bounds::default();
    for &id in ids {
        bounds.grow(index.centroid(id));
    }
    bounds
}

/// Binned surface-area-heuristic splits. Centroids are binned per axis; the
/// cheapest bin boundary wins if it beats keeping the range as one leaf.
pub struct BinnedSahSplit;

impl SplitStrategy for BinnedSahSplit {
    fn split_plane(index: &CentroidIndex, ids: &[u32], node_bounds: &Bounds) -> SplitPlane {
        let mut best_axis = Axis::X;
        let mut best_pos: f32 = 0.0;
        let mut best_cost = f32::INFINITY;

        let cbounds = centroid_bounds(index, ids);

        #[derive(Debug, Clone, Copy, Default)]
        struct Bin {
            bounds: Bounds,
            tri_count: u32,
        }

        for axis in Axis::iter() {
            let bounds_min = cbounds.min[axis];
            let bounds_max = cbounds.max[axis];

            if approx::abs_diff_eq!(bounds_min, bounds_max, epsilon = FLAT_AXIS_EPSILON) {
                continue;
            }

            let mut bins: [Bin; BIN_COUNT] = [Default::default(); BIN_COUNT];

            let scale = BIN_COUNT as f32 / (bounds_max - bounds_min);
            for &id in ids {
                let bin_id = min(
                    BIN_COUNT - 1,
                    ((index.centroid(id)[axis] - bounds_min) * scale) as usize,
                );
                let bin = &mut bins[bin_id];
                bin.tri_count += 1;
                bin.bounds.grow_bounds(index.tri_bounds(id));
            }

            // Prefix/suffix sweep over the bin boundaries
            let mut left_area = [0.0f32; BIN_COUNT - 1];
            let mut right_area = [0.0f32; BIN_COUNT - 1];
            let mut left_count = [0u32; BIN_COUNT - 1];
            let mut right_count = [0u32; BIN_COUNT - 1];

            let mut left_box = Bounds::default();
            let mut right_box = Bounds::default();
            let mut left_sum = 0u32;
            let mut right_sum = 0u32;

            for i in 0..(BIN_COUNT - 1) {
                left_sum += bins[i].tri_count;
                left_count[i] = left_sum;
                left_box.grow_bounds(&bins[i].bounds);
                left_area[i] = left_box.surface_area();

                right_sum += bins[BIN_COUNT - 1 - i].tri_count;
                right_count[BIN_COUNT - 2 - i] = right_sum;
                right_box.grow_bounds(&bins[BIN_COUNT - 1 - i].bounds);
                right_area[BIN_COUNT - 2 - i] = right_box.surface_area();
            }

            let scale = (bounds_max - bounds_min) / BIN_COUNT as f32;
            for i in 0..(BIN_COUNT - 1) {
                if left_count[i] == 0 || right_count[i] == 0 {
                    continue;
                }
                let plane_cost =
                    left_count[i] as f32 * left_area[i] + right_count[i] as f32 * right_area[i];
                if plane_cost < best_cost {
                    best_pos = bounds_min + scale * (i + 1) as f32;
                    best_axis = axis;
                    best_cost = plane_cost;
                }
            }
        }

        // Splitting has to beat keeping the whole range as one leaf
        let leaf_cost = ids.len() as f32 * node_bounds.surface_area();
        if best_cost >= leaf_cost {
            return SplitPlane::default();
        }

        SplitPlane {
            axis: best_axis,
            split_position: best_pos,
            should_split: true,
        }
    }
}

/// Cheap alternative to SAH: split at the midpoint of the longest axis of
/// the range's centroid bounds, no cost model.
pub struct MidpointSplit;

impl SplitStrategy for MidpointSplit {
    fn split_plane(index: &CentroidIndex, ids: &[u32], _node_bounds: &Bounds) -> SplitPlane {
        let cbounds = centroid_bounds(index, ids);
        let extent = cbounds.extent();
        let axis = Axis::longest(extent);

        // All centroids coincident on every axis; nothing left to separate
        if extent[axis] <= FLAT_AXIS_EPSILON {
            return SplitPlane::default();
        }

        SplitPlane {
            axis,
            split_position: cbounds.min[axis] + extent[axis] * 0.5,
            should_split: true,
        }
    }
}
