extern crate glam;

use crate::{Axis, CentroidIndex};

/// Reorder `ids` in place so every id whose centroid coordinate on `axis`
/// is `< split_position` precedes every id whose coordinate is `>=` it.
/// Two-pointer swap partition; every id stays in the slice, so the
/// permutation invariant of the id array is preserved. Returns the number
/// of ids on the left side (possibly 0 or `ids.len()`).
pub fn partition_by_centroid(
    ids: &mut [u32],
    index: &CentroidIndex,
    axis: Axis,
    split_position: f32,
) -> usize {
    // j can go below 0 when every id belongs on the right
    let mut i = 0_isize;
    let mut j = ids.len() as isize - 1;
    while i <= j {
        if index.centroid(ids[i as usize])[axis] < split_position {
            i += 1;
        } else {
            ids.swap(i as usize, j as usize);
            j -= 1;
        }
    }
    i as usize
}

#[cfg(test)]
mod tests {
    use glam::Vec3A;

    use rand::{seq::SliceRandom, thread_rng, Rng};

    use crate::{Axis, CentroidIndex, TriangleIndices};

    use super::partition_by_centroid;

    fn index_from_centroids(centroids: &[Vec3A]) -> CentroidIndex {
        // Degenerate triangles whose three vertices sit on the centroid
        let mut positions = Vec::new();
        let mut triangles = Vec::new();
        for (i, c) in centroids.iter().enumerate() {
            positions.push(*c);
            let i = i as u32;
            triangles.push(TriangleIndices::new(i, i, i));
        }
        CentroidIndex::build(&positions, &triangles)
    }

    #[test]
    fn partitions_by_split_position() {
        let mut rng = thread_rng();
        let centroids: Vec<Vec3A> = (0..64)
            .map(|_| rng.gen::<Vec3A>() * 9.0 - Vec3A::splat(5.0))
            .collect();
        let index = index_from_centroids(&centroids);

        let mut ids: Vec<u32> = (0..64).collect();
        ids.shuffle(&mut rng);

        let left_count = partition_by_centroid(&mut ids, &index, Axis::Y, 0.0);

        for (slot, &id) in ids.iter().enumerate() {
            if slot < left_count {
                assert!(index.centroid(id).y < 0.0);
            } else {
                assert!(index.centroid(id).y >= 0.0);
            }
        }
    }

    #[test]
    fn preserves_the_id_permutation() {
        let mut rng = thread_rng();
        let centroids: Vec<Vec3A> = (0..64)
            .map(|_| rng.gen::<Vec3A>() * 9.0 - Vec3A::splat(5.0))
            .collect();
        let index = index_from_centroids(&centroids);

        let mut ids: Vec<u32> = (0..64).collect();
        partition_by_centroid(&mut ids, &index, Axis::X, 0.7);

        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..64).collect::<Vec<u32>>());
    }

    #[test]
    fn one_sided_ranges_yield_empty_sides() {
        let centroids: Vec<Vec3A> = (0..8).map(|i| Vec3A::splat(i as f32)).collect();
        let index = index_from_centroids(&centroids);

        let mut ids: Vec<u32> = (0..8).collect();
        assert_eq!(partition_by_centroid(&mut ids, &index, Axis::X, -1.0), 0);
        assert_eq!(partition_by_centroid(&mut ids, &index, Axis::X, 100.0), 8);
    }

    #[test]
    fn empty_range_is_a_no_op() {
        let index = index_from_centroids(&[]);
        let mut ids: Vec<u32> = Vec::new();
        assert_eq!(partition_by_centroid(&mut ids, &index, Axis::Z, 0.0), 0);
    }
}
