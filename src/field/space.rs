use std::array;

use crate::geometry::IndexBox;

/// A cell centred index space with a uniform ghost halo.
///
/// Interior cells have indices `0..size[axis]` along each axis, ghost cells
/// extend `ghost` cells beyond either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpace<const N: usize> {
    /// Number of interior cells along each axis.
    pub size: [usize; N],
    /// Number of ghost cells along each face.
    pub ghost: usize,
}

impl<const N: usize> CellSpace<N> {
    pub fn new(size: [usize; N], ghost: usize) -> Self {
        Self { size, ghost }
    }

    pub fn ghost(&self) -> usize {
        self.ghost
    }

    pub fn interior_size(&self) -> [usize; N] {
        self.size
    }

    /// Size of the space including ghost cells.
    pub fn storage_size(&self) -> [usize; N] {
        array::from_fn(|axis| self.size[axis] + 2 * self.ghost)
    }

    /// Total number of cells, including ghost cells.
    pub fn num_cells(&self) -> usize {
        self.storage_size().iter().product()
    }

    pub fn is_interior(&self, cell: [isize; N]) -> bool {
        (0..N).all(|axis| cell[axis] >= 0 && cell[axis] < self.size[axis] as isize)
    }

    /// Whether the cell lies in the interior or the ghost halo.
    pub fn contains(&self, cell: [isize; N]) -> bool {
        self.full_window().contains(cell)
    }

    /// Computes a linear index from a (possibly ghost) cell index.
    pub fn index_from_cell(&self, cell: [isize; N]) -> usize {
        debug_assert!(self.contains(cell), "cell {cell:?} outside of {self:?}");

        let storage = self.storage_size();
        let mut index = 0;
        // First axis varies fastest.
        for axis in (0..N).rev() {
            index = index * storage[axis] + (cell[axis] + self.ghost as isize) as usize;
        }
        index
    }

    /// Window of just the interior cells.
    pub fn inner_window(&self) -> IndexBox<N> {
        IndexBox::new([0; N], self.size)
    }

    /// Window covering the whole space, ghost cells included.
    pub fn full_window(&self) -> IndexBox<N> {
        IndexBox::new([-(self.ghost as isize); N], self.storage_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing() {
        let space = CellSpace::new([4, 3], 2);

        assert_eq!(space.storage_size(), [8, 7]);
        assert_eq!(space.num_cells(), 56);
        assert_eq!(space.index_from_cell([-2, -2]), 0);
        assert_eq!(space.index_from_cell([0, 0]), 2 + 2 * 8);
        assert_eq!(space.index_from_cell([5, 4]), 55);

        assert!(space.is_interior([3, 2]));
        assert!(!space.is_interior([4, 2]));
        assert!(space.contains([5, -2]));
        assert!(!space.contains([6, 0]));
    }

    #[test]
    fn windows() {
        let space = CellSpace::new([4, 3], 2);
        assert_eq!(space.inner_window().num_cells(), 12);
        assert_eq!(space.full_window().origin, [-2, -2]);
        assert_eq!(space.full_window().num_cells(), space.num_cells());
    }
}
