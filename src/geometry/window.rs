/// An axis-aligned box of (signed) cell indices. Ghost cells have indices
/// below zero or at/above the interior size along some axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBox<const N: usize> {
    pub origin: [isize; N],
    pub size: [usize; N],
}

impl<const N: usize> IndexBox<N> {
    pub fn new(origin: [isize; N], size: [usize; N]) -> Self {
        Self { origin, size }
    }

    /// Constructs a box from inclusive lower and upper corners.
    pub fn from_bounds(lower: [isize; N], upper: [isize; N]) -> Self {
        let size = std::array::from_fn(|axis| (upper[axis] - lower[axis] + 1).max(0) as usize);
        Self {
            origin: lower,
            size,
        }
    }

    /// Inclusive upper corner.
    pub fn upper(&self) -> [isize; N] {
        std::array::from_fn(|axis| self.origin[axis] + self.size[axis] as isize - 1)
    }

    pub fn num_cells(&self) -> usize {
        self.size.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.num_cells() == 0
    }

    pub fn contains(&self, cell: [isize; N]) -> bool {
        (0..N).all(|axis| {
            cell[axis] >= self.origin[axis]
                && cell[axis] < self.origin[axis] + self.size[axis] as isize
        })
    }

    /// Iterate over all cells in the box.
    pub fn iter(&self) -> IndexBoxIter<N> {
        IndexBoxIter {
            window: *self,
            cursor: self.origin,
            done: self.is_empty(),
        }
    }

    /// Collapses the box to a single layer along `axis` at `intercept`.
    pub fn plane(&self, axis: usize, intercept: isize) -> Self {
        let mut result = *self;
        result.origin[axis] = intercept;
        result.size[axis] = 1;
        result
    }
}

impl<const N: usize> IntoIterator for IndexBox<N> {
    type IntoIter = IndexBoxIter<N>;
    type Item = [isize; N];

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterates the cells of an `IndexBox`, first axis fastest.
#[derive(Debug, Clone)]
pub struct IndexBoxIter<const N: usize> {
    window: IndexBox<N>,
    cursor: [isize; N],
    done: bool,
}

impl<const N: usize> Iterator for IndexBoxIter<N> {
    type Item = [isize; N];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let cell = self.cursor;

        self.done = true;
        for axis in 0..N {
            self.cursor[axis] += 1;
            if self.cursor[axis] < self.window.origin[axis] + self.window.size[axis] as isize {
                self.done = false;
                break;
            }
            self.cursor[axis] = self.window.origin[axis];
        }

        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        let window = IndexBox::from_bounds([-3, 0], [-1, 4]);

        assert_eq!(window.size, [3, 5]);
        assert_eq!(window.upper(), [-1, 4]);
        assert_eq!(window.num_cells(), 15);
        assert!(window.contains([-2, 4]));
        assert!(!window.contains([0, 4]));
        assert_eq!(window.iter().next(), Some([-3, 0]));
        assert_eq!(window.iter().last(), Some([-1, 4]));

        assert_eq!(
            window.plane(1, 2).iter().collect::<Vec<_>>(),
            vec![[-3, 2], [-2, 2], [-1, 2]]
        );

        assert!(IndexBox::from_bounds([2], [1]).is_empty());
        assert_eq!(IndexBox::<2>::new([0, 0], [3, 0]).iter().count(), 0);
        assert_eq!(window.plane(0, -1).num_cells(), 5);
    }
}
