use std::fmt;

use super::topology::{codim_word, location_count, location_table, parent_faces};
use crate::geometry::{AXIS_NAMES, Face, Region, Side};

/// A face, edge or corner of a patch on which ghost data may have to be filled.
///
/// Locations are identified by their codimension and an integer code (see
/// `topology`), and carry the equivalent `Region` so that ghost boxes and
/// parent faces can be computed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryLocation<const N: usize> {
    codim: usize,
    code: usize,
    region: Region<N>,
}

impl<const N: usize> BoundaryLocation<N> {
    /// Looks up the location with the given code. Returns `None` if no such
    /// location exists in `N` dimensions.
    pub fn new(codim: usize, code: usize) -> Option<Self> {
        let sides = location_table(N, codim).get(code)?;
        let region = Region::new(std::array::from_fn(|axis| sides[axis]));

        Some(Self {
            codim,
            code,
            region,
        })
    }

    /// Finds the location corresponding to a region surrounding the interior.
    pub fn from_region(region: Region<N>) -> Option<Self> {
        let codim = region.codim();
        let code = location_table(N, codim)
            .iter()
            .position(|sides| *sides == region.sides().as_slice())?;

        Some(Self {
            codim,
            code,
            region,
        })
    }

    /// The planar location lying along a face.
    pub fn from_face(face: Face<N>) -> Self {
        // Planar codes coincide with the linear face ordering.
        Self {
            codim: 1,
            code: face.to_linear(),
            region: Region::from_face(face),
        }
    }

    /// Iterates all locations of a codimension in code order.
    pub fn iterate(codim: usize) -> impl Iterator<Item = Self> {
        (0..location_count(N, codim)).filter_map(move |code| Self::new(codim, code))
    }

    /// Iterates all locations of every codimension, faces first.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=N).flat_map(Self::iterate)
    }

    pub fn codim(&self) -> usize {
        self.codim
    }

    pub fn code(&self) -> usize {
        self.code
    }

    pub fn region(&self) -> Region<N> {
        self.region
    }

    pub fn side(&self, axis: usize) -> Side {
        self.region.side(axis)
    }

    /// Is this a planar location (a face in 3D, an edge in 2D, a node in 1D)?
    pub fn is_planar(&self) -> bool {
        self.codim == 1
    }

    /// For planar locations, the face the location lies on.
    pub fn face(&self) -> Option<Face<N>> {
        if !self.is_planar() {
            return None;
        }

        self.parent_faces().next()
    }

    /// Faces adjacent to this location, in x, y, z priority order.
    pub fn parent_faces(&self) -> impl Iterator<Item = Face<N>> {
        let sides = self.region.sides();
        parent_faces(&sides).collect::<Vec<_>>().into_iter()
    }

    /// Parent face of this location along the given axis, if the location is
    /// outside the interior along that axis.
    pub fn parent_face_on_axis(&self, axis: usize) -> Option<Face<N>> {
        self.parent_faces().find(|face| face.axis == axis)
    }

    /// The name used to refer to this location in boundary databases, e.g.
    /// `boundary_face_xlo` or `boundary_node_xlo_yhi`.
    pub fn name(&self) -> String {
        let faces = self
            .parent_faces()
            .map(Face::name)
            .collect::<Vec<_>>()
            .join("_");

        format!("boundary_{}_{}", codim_word(N, self.codim), faces)
    }

    /// Inverse of `name`.
    pub fn from_name(name: &str) -> Option<Self> {
        let rest = name.strip_prefix("boundary_")?;
        let (word, faces) = rest.split_once('_')?;

        let mut sides = [Side::Middle; N];
        for face in faces.split('_') {
            let axis = AXIS_NAMES[..N]
                .iter()
                .position(|prefix| face.strip_prefix(prefix).is_some())?;
            let side = match &face[1..] {
                "lo" => Side::Left,
                "hi" => Side::Right,
                _ => return None,
            };
            // Each axis may appear only once.
            if sides[axis] != Side::Middle {
                return None;
            }
            sides[axis] = side;
        }

        let location = Self::from_region(Region::new(sides))?;

        (word == codim_word(N, location.codim)).then_some(location)
    }
}

impl<const N: usize> fmt::Display for BoundaryLocation<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (codim {}, code {})",
            self.name(),
            self.codim,
            self.code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for location in BoundaryLocation::<3>::all() {
            assert_eq!(
                BoundaryLocation::<3>::from_name(&location.name()),
                Some(location)
            );
        }

        for location in BoundaryLocation::<2>::all() {
            assert_eq!(
                BoundaryLocation::<2>::from_name(&location.name()),
                Some(location)
            );
        }
    }

    #[test]
    fn conventional_names() {
        assert_eq!(
            BoundaryLocation::<1>::new(1, 1).unwrap().name(),
            "boundary_node_xhi"
        );
        assert_eq!(
            BoundaryLocation::<2>::new(1, 2).unwrap().name(),
            "boundary_edge_ylo"
        );
        assert_eq!(
            BoundaryLocation::<2>::new(2, 1).unwrap().name(),
            "boundary_node_xhi_ylo"
        );
        assert_eq!(
            BoundaryLocation::<3>::new(1, 5).unwrap().name(),
            "boundary_face_zhi"
        );
        assert_eq!(
            BoundaryLocation::<3>::new(2, 0).unwrap().name(),
            "boundary_edge_ylo_zlo"
        );
        assert_eq!(
            BoundaryLocation::<3>::new(3, 6).unwrap().name(),
            "boundary_node_xlo_yhi_zhi"
        );

        assert_eq!(BoundaryLocation::<2>::from_name("boundary_face_xlo"), None);
        assert_eq!(BoundaryLocation::<2>::from_name("boundary_edge_zlo"), None);
        assert_eq!(
            BoundaryLocation::<3>::from_name("boundary_edge_xlo_xhi"),
            None
        );
        assert_eq!(BoundaryLocation::<3>::new(2, 12), None);
    }

    #[test]
    fn faces_and_parents() {
        let xhi = BoundaryLocation::<2>::from_face(Face::positive(0));
        assert_eq!(xhi.code(), 1);
        assert_eq!(xhi.face(), Some(Face::positive(0)));

        let corner = BoundaryLocation::<2>::new(2, 2).unwrap();
        assert_eq!(corner.face(), None);
        assert_eq!(
            corner.parent_faces().collect::<Vec<_>>(),
            vec![Face::negative(0), Face::positive(1)]
        );
        assert_eq!(corner.parent_face_on_axis(1), Some(Face::positive(1)));
        assert_eq!(BoundaryLocation::<3>::all().count(), 26);
    }
}
