use std::ops::{Index, IndexMut};

/// Axis labels used when naming faces and boundary locations.
pub const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// One of the `2N` faces of a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face<const N: usize> {
    pub axis: usize,
    /// `false` for the lower face, `true` for the upper face.
    pub side: bool,
}

impl<const N: usize> Face<N> {
    pub fn negative(axis: usize) -> Self {
        debug_assert!(axis < N);
        Self { axis, side: false }
    }

    pub fn positive(axis: usize) -> Self {
        debug_assert!(axis < N);
        Self { axis, side: true }
    }

    /// Position in the ordering `xlo, xhi, ylo, yhi, zlo, zhi`.
    pub fn to_linear(self) -> usize {
        2 * self.axis + self.side as usize
    }

    /// Sign of the outward normal along the face axis.
    pub fn outward(self) -> isize {
        if self.side { 1 } else { -1 }
    }

    /// Short name, e.g. `xlo` or `zhi`.
    pub fn name(self) -> String {
        let side = if self.side { "hi" } else { "lo" };
        format!("{}{side}", AXIS_NAMES[self.axis])
    }
}

/// One value per face of a patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceArray<const N: usize, T>([[T; 2]; N]);

impl<const N: usize, T> FaceArray<N, T> {
    pub fn from_fn(mut f: impl FnMut(Face<N>) -> T) -> Self {
        Self(std::array::from_fn(|axis| {
            [f(Face::negative(axis)), f(Face::positive(axis))]
        }))
    }
}

impl<const N: usize, T: Clone> FaceArray<N, T> {
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<const N: usize, T> Index<Face<N>> for FaceArray<N, T> {
    type Output = T;

    fn index(&self, face: Face<N>) -> &T {
        &self.0[face.axis][face.side as usize]
    }
}

impl<const N: usize, T> IndexMut<Face<N>> for FaceArray<N, T> {
    fn index_mut(&mut self, face: Face<N>) -> &mut T {
        &mut self.0[face.axis][face.side as usize]
    }
}
