extern crate glam;

use std::ops::{Index, IndexMut};

use strum::EnumIter;

/// 3D Axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[repr(u8)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// Axis of the largest component of `extent`. Ties resolve to the
    /// earlier axis (x before y before z) so split decisions stay
    /// deterministic.
    #[inline]
    pub fn longest(extent: glam::Vec3A) -> Axis {
        let mut axis = Axis::X;
        if extent.y > extent.x {
            axis = Axis::Y;
        }
        if extent.z > extent[axis] {
            axis = Axis::Z;
        }
        axis
    }
}

impl Index<Axis> for glam::Vec3A {
    type Output = f32;

    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl IndexMut<Axis> for glam::Vec3A {
    fn index_mut(&mut self, axis: Axis) -> &mut Self::Output {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}
