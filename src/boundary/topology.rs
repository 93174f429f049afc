//! Static tables describing boundary locations of a patch.
//!
//! Every boundary location is identified by its codimension and an integer code.
//! Codes follow the conventional structured-AMR numbering: faces are ordered
//! `xlo, xhi, ylo, yhi, zlo, zhi`, 3D edges are grouped by the axis they run
//! along (x-edges, then y-edges, then z-edges) and corner nodes are ordered with
//! the x side varying fastest.

use crate::geometry::{Face, Side};

use Side::{Left as L, Middle as M, Right as R};

/// Order in which parent faces are consulted when more than one could supply
/// data to a composite edge or corner condition.
pub const AXIS_PRIORITY: [usize; 3] = [0, 1, 2];

/// Largest codimension of a location in `N` dimensions.
pub const fn max_codim(dim: usize) -> usize {
    dim
}

static NODES_1D: [&[Side]; 2] = [&[L], &[R]];

static EDGES_2D: [&[Side]; 4] = [&[L, M], &[R, M], &[M, L], &[M, R]];

static NODES_2D: [&[Side]; 4] = [&[L, L], &[R, L], &[L, R], &[R, R]];

static FACES_3D: [&[Side]; 6] = [
    &[L, M, M],
    &[R, M, M],
    &[M, L, M],
    &[M, R, M],
    &[M, M, L],
    &[M, M, R],
];

static EDGES_3D: [&[Side]; 12] = [
    &[M, L, L],
    &[M, R, L],
    &[M, L, R],
    &[M, R, R],
    &[L, M, L],
    &[L, M, R],
    &[R, M, L],
    &[R, M, R],
    &[L, L, M],
    &[R, L, M],
    &[L, R, M],
    &[R, R, M],
];

static NODES_3D: [&[Side]; 8] = [
    &[L, L, L],
    &[R, L, L],
    &[L, R, L],
    &[R, R, L],
    &[L, L, R],
    &[R, L, R],
    &[L, R, R],
    &[R, R, R],
];

/// Returns the table of side patterns for every location of the given
/// codimension, indexed by location code. Empty for unsupported combinations.
pub fn location_table(dim: usize, codim: usize) -> &'static [&'static [Side]] {
    match (dim, codim) {
        (1, 1) => &NODES_1D,
        (2, 1) => &EDGES_2D,
        (2, 2) => &NODES_2D,
        (3, 1) => &FACES_3D,
        (3, 2) => &EDGES_3D,
        (3, 3) => &NODES_3D,
        _ => &[],
    }
}

/// Number of locations of a codimension in `dim` dimensions.
pub fn location_count(dim: usize, codim: usize) -> usize {
    location_table(dim, codim).len()
}

/// Parent faces of a location given by its sides, in `AXIS_PRIORITY` order.
pub fn parent_faces<const N: usize>(sides: &[Side; N]) -> impl Iterator<Item = Face<N>> + '_ {
    AXIS_PRIORITY
        .into_iter()
        .filter(|&axis| axis < N && sides[axis].is_outside())
        .map(|axis| Face {
            axis,
            side: sides[axis] == Side::Right,
        })
}

/// The word used for locations of a codimension in configuration names.
pub fn codim_word(dim: usize, codim: usize) -> &'static str {
    match dim - codim {
        0 => "node",
        1 => "edge",
        _ => "face",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        assert_eq!(location_count(1, 1), 2);
        assert_eq!(location_count(2, 1), 4);
        assert_eq!(location_count(2, 2), 4);
        assert_eq!(location_count(3, 1), 6);
        assert_eq!(location_count(3, 2), 12);
        assert_eq!(location_count(3, 3), 8);
        assert_eq!(location_count(2, 3), 0);
    }

    #[test]
    fn tables_are_consistent() {
        for dim in 1..=3 {
            for codim in 1..=max_codim(dim) {
                let table = location_table(dim, codim);

                for (code, sides) in table.iter().enumerate() {
                    assert_eq!(sides.len(), dim);
                    assert_eq!(
                        sides.iter().filter(|&&s| s != Side::Middle).count(),
                        codim,
                        "location {code} of codim {codim} in {dim}D"
                    );
                    // No duplicate entries.
                    assert_eq!(table.iter().filter(|other| *other == sides).count(), 1);
                }
            }
        }
    }

    #[test]
    fn parents_follow_priority() {
        let parents = parent_faces(&[R, M, L]).collect::<Vec<Face<3>>>();
        assert_eq!(parents, vec![Face::positive(0), Face::negative(2)]);

        let parents = parent_faces(&[L, R, R]).collect::<Vec<Face<3>>>();
        assert_eq!(
            parents,
            vec![Face::negative(0), Face::positive(1), Face::positive(2)]
        );

        assert_eq!(codim_word(3, 1), "face");
        assert_eq!(codim_word(2, 1), "edge");
        assert_eq!(codim_word(1, 1), "node");
    }
}
