use std::array;

use super::{Face, IndexBox};

/// Where a region lies along one axis: below the interior, across it, or
/// above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Middle,
    Right,
}

impl Side {
    /// Side of the region lying outside `face`.
    pub fn of_face(upper: bool) -> Self {
        if upper { Side::Right } else { Side::Left }
    }

    pub fn is_outside(self) -> bool {
        self != Side::Middle
    }
}

/// A block of the `3^N` grid formed by splitting every axis of a patch into
/// the cells below, inside and above the interior. Regions outside the
/// interior along one axis lie along a face, along two axes an edge (or a 2D
/// corner), along three a 3D corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region<const N: usize> {
    sides: [Side; N],
}

impl<const N: usize> Region<N> {
    pub const fn new(sides: [Side; N]) -> Self {
        Self { sides }
    }

    /// The region lying just outside a face.
    pub fn from_face(face: Face<N>) -> Self {
        let mut sides = [Side::Middle; N];
        sides[face.axis] = Side::of_face(face.side);
        Self::new(sides)
    }

    pub fn sides(&self) -> [Side; N] {
        self.sides
    }

    pub fn side(&self, axis: usize) -> Side {
        self.sides[axis]
    }

    /// Number of axes along which the region lies outside the interior.
    pub fn codim(&self) -> usize {
        self.sides.iter().filter(|side| side.is_outside()).count()
    }

    /// Ghost cells of this region for a patch with `size` interior cells,
    /// reaching `width` cells past the interior.
    pub fn ghost_box(&self, size: [usize; N], width: usize) -> IndexBox<N> {
        let origin = array::from_fn(|axis| match self.sides[axis] {
            Side::Left => -(width as isize),
            Side::Middle => 0,
            Side::Right => size[axis] as isize,
        });

        let extent = array::from_fn(|axis| match self.sides[axis] {
            Side::Middle => size[axis],
            _ => width,
        });

        IndexBox::new(origin, extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codimension() {
        let edge = Region::new([Side::Left, Side::Right, Side::Middle]);
        assert_eq!(edge.codim(), 2);
        assert_eq!(
            Region::<3>::from_face(Face::positive(2)),
            Region::new([Side::Middle, Side::Middle, Side::Right])
        );
        assert_eq!(Region::<2>::from_face(Face::negative(0)).codim(), 1);
    }

    #[test]
    fn ghost_boxes() {
        let corner = Region::new([Side::Right, Side::Left]).ghost_box([4, 3], 2);
        assert_eq!(corner.origin, [4, -2]);
        assert_eq!(corner.size, [2, 2]);

        let face = Region::new([Side::Middle, Side::Right]).ghost_box([4, 3], 1);
        assert_eq!(face.origin, [0, 3]);
        assert_eq!(face.size, [4, 1]);
    }
}
