//! Lattice topology: neighbor enumeration and distance on bounded or
//! toroidal grids.
//!
//! Avida worlds wrap at every edge, so all neighbor and distance math
//! lives here rather than being re-derived at each call site. Cells are
//! `(x, y)` pairs with `x` the column and `y` the row; wraparound is
//! applied via modulo against explicit world dimensions, never by
//! storing negative coordinates.

use serde::{Deserialize, Serialize};

/// A cell coordinate: `(x, y)` = `(column, row)`, 0-indexed.
pub type Cell = (usize, usize);

/// Adjacency rule for neighbor enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    /// 4-connected: orthogonal neighbors only
    Rook,
    /// 8-connected: orthogonal + diagonal neighbors
    Moore,
}

impl Connectivity {
    /// Relative offsets for this adjacency rule (center excluded)
    pub fn offsets(&self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Rook => &[(1, 0), (-1, 0), (0, 1), (0, -1)],
            Connectivity::Moore => &[
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1),
            ],
        }
    }

    /// Neighbor count on a toroidal lattice (4 or 8)
    pub fn degree(&self) -> usize {
        self.offsets().len()
    }
}

/// A `width x height` lattice, either toroidal (every edge wraps to the
/// opposite edge) or bounded (cells fall off the edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lattice {
    pub width: usize,
    pub height: usize,
    pub toroidal: bool,
}

impl Lattice {
    /// A toroidal lattice (the Avida default)
    pub fn torus(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            toroidal: true,
        }
    }

    /// A bounded lattice with hard edges
    pub fn bounded(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            toroidal: false,
        }
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether the lattice has no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the coordinate lies inside the lattice bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.0 < self.width && cell.1 < self.height
    }

    /// Reduce any signed coordinate pair into the lattice via modulo
    pub fn wrap(&self, x: isize, y: isize) -> Cell {
        (
            wrap_coord(x, self.width),
            wrap_coord(y, self.height),
        )
    }

    /// Linear index of a cell (`y * width + x`), the ordering used by
    /// [`crate::weights::SpatialWeights`]
    pub fn index(&self, cell: Cell) -> usize {
        cell.1 * self.width + cell.0
    }

    /// Cell at a linear index
    pub fn cell_at(&self, index: usize) -> Cell {
        (index % self.width, index / self.width)
    }

    /// Neighbors of a cell under the given adjacency rule.
    ///
    /// On a toroidal lattice every cell has exactly 4 (rook) or 8
    /// (moore) neighbors, corners and edges included. On a bounded
    /// lattice out-of-range neighbors are silently dropped, so edge
    /// cells legitimately have fewer.
    pub fn neighbors(&self, cell: Cell, connectivity: Connectivity) -> Vec<Cell> {
        let (x, y) = (cell.0 as isize, cell.1 as isize);
        let mut neighbors = Vec::with_capacity(connectivity.degree());

        for &(dx, dy) in connectivity.offsets() {
            let (nx, ny) = (x + dx, y + dy);
            if self.toroidal {
                neighbors.push(self.wrap(nx, ny));
            } else if nx >= 0
                && ny >= 0
                && (nx as usize) < self.width
                && (ny as usize) < self.height
            {
                neighbors.push((nx as usize, ny as usize));
            }
        }

        neighbors
    }

    /// Distance between two cells.
    ///
    /// On a toroidal lattice this is the minimum-image distance: the
    /// smallest Euclidean distance over all wrapped copies of the pair.
    /// Earlier analyses sometimes used the raw coordinate difference
    /// near the seam; that behavior is available as [`planar_dist`] for
    /// reproducing old results, but every metric in this workspace uses
    /// the minimum-image form.
    pub fn dist(&self, a: Cell, b: Cell) -> f64 {
        self.squared_dist(a, b).sqrt()
    }

    /// Squared [`Lattice::dist`]; avoids the square root in loops that
    /// only compare distances
    pub fn squared_dist(&self, a: Cell, b: Cell) -> f64 {
        if !self.toroidal {
            let dx = a.0 as f64 - b.0 as f64;
            let dy = a.1 as f64 - b.1 as f64;
            return dx * dx + dy * dy;
        }

        let dx = wrapped_delta(a.0, b.0, self.width);
        let dy = wrapped_delta(a.1, b.1, self.height);
        (dx * dx + dy * dy) as f64
    }
}

/// Reduce a signed coordinate to `[0, dimension)`
pub fn wrap_coord(coord: isize, dimension: usize) -> usize {
    let d = dimension as isize;
    (((coord % d) + d) % d) as usize
}

/// Minimum-image axis separation on a wrapped axis
fn wrapped_delta(a: usize, b: usize, dimension: usize) -> usize {
    let direct = a.abs_diff(b);
    direct.min(dimension - direct)
}

/// Euclidean distance between two points
pub fn euclidean_dist(p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let dx = p1.0 - p2.0;
    let dy = p1.1 - p2.1;
    (dx * dx + dy * dy).sqrt()
}

/// Euclidean distance between two cells, ignoring any wraparound.
///
/// This is the legacy distance used by several published analyses; see
/// [`Lattice::dist`] for the corrected toroidal form.
pub fn planar_dist(a: Cell, b: Cell) -> f64 {
    euclidean_dist((a.0 as f64, a.1 as f64), (b.0 as f64, b.1 as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_coord() {
        assert_eq!(wrap_coord(-1, 60), 59);
        assert_eq!(wrap_coord(60, 60), 0);
        assert_eq!(wrap_coord(61, 60), 1);
        assert_eq!(wrap_coord(-61, 60), 59);
        assert_eq!(wrap_coord(5, 60), 5);
    }

    #[test]
    fn test_toroidal_degree_invariant() {
        let lattice = Lattice::torus(7, 5);
        for y in 0..5 {
            for x in 0..7 {
                assert_eq!(lattice.neighbors((x, y), Connectivity::Rook).len(), 4);
                assert_eq!(lattice.neighbors((x, y), Connectivity::Moore).len(), 8);
            }
        }
    }

    #[test]
    fn test_moore_neighbors_origin() {
        let lattice = Lattice::torus(60, 60);
        let mut moore = lattice.neighbors((0, 0), Connectivity::Moore);
        moore.sort_unstable();
        let mut expected = vec![
            (0, 59),
            (59, 0),
            (1, 0),
            (0, 1),
            (1, 59),
            (59, 59),
            (1, 1),
            (59, 1),
        ];
        expected.sort_unstable();
        assert_eq!(moore, expected);
    }

    #[test]
    fn test_rook_neighbors_origin() {
        let lattice = Lattice::torus(60, 60);
        let mut rook = lattice.neighbors((0, 0), Connectivity::Rook);
        rook.sort_unstable();
        let mut expected = vec![(0, 59), (59, 0), (1, 0), (0, 1)];
        expected.sort_unstable();
        assert_eq!(rook, expected);
    }

    #[test]
    fn test_bounded_neighbors_drop_out_of_range() {
        let lattice = Lattice::bounded(10, 10);
        assert_eq!(lattice.neighbors((0, 0), Connectivity::Rook).len(), 2);
        assert_eq!(lattice.neighbors((0, 0), Connectivity::Moore).len(), 3);
        assert_eq!(lattice.neighbors((0, 5), Connectivity::Rook).len(), 3);
        assert_eq!(lattice.neighbors((5, 5), Connectivity::Rook).len(), 4);
        assert_eq!(lattice.neighbors((9, 9), Connectivity::Moore).len(), 3);
    }

    #[test]
    fn test_minimum_image_distance() {
        let lattice = Lattice::torus(60, 60);
        // across the seam the wrapped image is closer
        assert!((lattice.dist((0, 0), (59, 0)) - 1.0).abs() < 1e-12);
        assert!((lattice.dist((0, 0), (59, 59)) - 2.0_f64.sqrt()).abs() < 1e-12);
        // interior pairs match the planar distance
        assert!((lattice.dist((3, 4), (6, 8)) - 5.0).abs() < 1e-12);
        // the legacy distance does not wrap
        assert!((planar_dist((0, 0), (59, 0)) - 59.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_index_round_trip() {
        let lattice = Lattice::torus(11, 5);
        for idx in 0..lattice.len() {
            assert_eq!(lattice.index(lattice.cell_at(idx)), idx);
        }
        assert_eq!(lattice.index((3, 2)), 25);
    }
}
