use crate::Bounds;

/// One node of the flattened BVH.
///
/// `left_first` is dual-purpose: for an internal node (`tri_count == 0`) it
/// is the index of the first child, with the sibling always at
/// `left_first + 1`; for a leaf (`tri_count > 0`) it is the start offset of
/// the leaf's range in the triangle-id permutation array. This packed layout
/// is a stable contract for downstream traversal code; use [`BvhNode::content`]
/// for a tagged view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BvhNode {
    pub aabb: Bounds,
    left_first: u32,
    pub tri_count: u32,
}

/// Tagged view of the dual-purpose node fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeContent {
    Internal { first_child: u32 },
    Leaf { first_prim: u32, prim_count: u32 },
}

impl BvhNode {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.tri_count > 0
    }

    #[inline]
    pub fn content(&self) -> NodeContent {
        if self.is_leaf() {
            NodeContent::Leaf {
                first_prim: self.left_first,
                prim_count: self.tri_count,
            }
        } else {
            NodeContent::Internal {
                first_child: self.left_first,
            }
        }
    }

    #[inline]
    pub fn left_child(&self) -> u32 {
        assert!(!self.is_leaf());
        self.left_first
    }

    #[inline]
    pub fn right_child(&self) -> u32 {
        self.left_child() + 1
    }

    #[inline]
    pub fn first_prim(&self) -> u32 {
        assert!(self.is_leaf());
        self.left_first
    }

    #[inline]
    pub fn setup_prims(&mut self, first_prim: u32, tri_count: u32) {
        self.left_first = first_prim;
        self.tri_count = tri_count;
    }

    #[inline]
    pub fn setup_left_child(&mut self, left_child: u32) {
        self.left_first = left_child;
        self.tri_count = 0;
    }

    /// SAH cost of keeping this node a leaf
    #[inline]
    pub fn leaf_cost(&self) -> f32 {
        self.tri_count as f32 * self.aabb.surface_area()
    }
}
