//! Geometry of a single structured patch.

use crate::boundary::BoundaryLocation;
use crate::geometry::{Face, FaceArray, IndexBox};

/// A rectangular patch of cells, together with which of its faces lie on the
/// physical (non-periodic) boundary of the domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch<const N: usize> {
    size: [usize; N],
    spacing: [f64; N],
    regular: FaceArray<N, bool>,
    periodic: [bool; N],
}

impl<const N: usize> Patch<N> {
    /// A patch covering the whole domain, with every face on the physical
    /// boundary.
    pub fn new(size: [usize; N], spacing: [f64; N]) -> Self {
        Self {
            size,
            spacing,
            regular: FaceArray::splat(true),
            periodic: [false; N],
        }
    }

    /// Marks an axis as periodic. Its faces no longer lie on the physical
    /// boundary.
    pub fn with_periodic(mut self, axis: usize) -> Self {
        self.periodic[axis] = true;
        self.regular[Face::negative(axis)] = false;
        self.regular[Face::positive(axis)] = false;
        self
    }

    /// Marks a face as touching (or not touching) the physical boundary.
    pub fn with_regular(mut self, face: Face<N>, regular: bool) -> Self {
        self.regular[face] = regular;
        self
    }

    pub fn size(&self) -> [usize; N] {
        self.size
    }

    pub fn spacing(&self) -> [f64; N] {
        self.spacing
    }

    /// Does this face lie on a physical boundary?
    pub fn touches_regular(&self, face: Face<N>) -> bool {
        self.regular[face]
    }

    pub fn touches_periodic(&self, axis: usize) -> bool {
        self.periodic[axis]
    }

    /// Does this face lie on any domain boundary, physical or periodic?
    pub fn touches_boundary(&self, face: Face<N>) -> bool {
        self.touches_regular(face) || self.touches_periodic(face.axis)
    }

    /// Physical boundary locations of a codimension: those whose parent faces
    /// all touch the physical boundary.
    pub fn boundary_locations(&self, codim: usize) -> impl Iterator<Item = BoundaryLocation<N>> + '_ {
        BoundaryLocation::iterate(codim)
            .filter(|location| location.parent_faces().all(|face| self.regular[face]))
    }

    /// Every physical boundary location, faces first.
    pub fn all_boundary_locations(&self) -> impl Iterator<Item = BoundaryLocation<N>> + '_ {
        (1..=N).flat_map(|codim| self.boundary_locations(codim))
    }

    /// Ghost cells that must be filled for a location at the given width.
    pub fn ghost_fill_box(&self, location: BoundaryLocation<N>, width: usize) -> IndexBox<N> {
        location.region().ghost_box(self.size, width)
    }

    /// Interior cells adjacent to a face.
    pub fn boundary_plane(&self, face: Face<N>) -> IndexBox<N> {
        let intercept = if face.side {
            self.size[face.axis] as isize - 1
        } else {
            0
        };

        IndexBox::new([0; N], self.size).plane(face.axis, intercept)
    }
}
