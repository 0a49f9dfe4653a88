//! World: a labeled grid plus its label alphabet.

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::label::{Label, LabelAlphabet};
use crate::topology::{Cell, Lattice};

/// A 2-D grid of observation lists: one phenotype string per input
/// snapshot at each cell (the "3rd dimension" of the data). Aggregation
/// functions collapse each list to a scalar per cell.
pub type PhenotypeGrid = Grid<Vec<String>>;

/// A parsed Avida world: one categorical [`Label`] per cell, plus the
/// alphabet the labels are encoded against.
///
/// Built once by an external parser and read-only afterwards; derived
/// worlds are produced by element-wise relabeling through
/// [`Grid::map`].
#[derive(Debug, Clone)]
pub struct World {
    grid: Grid<Label>,
    alphabet: LabelAlphabet,
}

impl World {
    /// Wrap a label grid and its alphabet.
    ///
    /// Every resource named by any cell must be in the alphabet;
    /// anything else signals that the grid and alphabet came from
    /// different experiments, which would silently corrupt every
    /// downstream statistic, so it fails immediately.
    pub fn new(grid: Grid<Label>, alphabet: LabelAlphabet) -> Result<Self> {
        if grid.is_empty() {
            return Err(Error::InvalidDimensions {
                width: grid.cols(),
                height: grid.rows(),
            });
        }

        for (_, label) in grid.iter() {
            if let Label::Resources(set) = label {
                for resource in set {
                    if alphabet.index_of(resource).is_none() {
                        return Err(Error::UnknownResource(resource.clone()));
                    }
                }
            }
        }

        Ok(Self { grid, alphabet })
    }

    /// World width in cells (columns)
    pub fn width(&self) -> usize {
        self.grid.cols()
    }

    /// World height in cells (rows)
    pub fn height(&self) -> usize {
        self.grid.rows()
    }

    /// The toroidal lattice this world occupies
    pub fn lattice(&self) -> Lattice {
        Lattice::torus(self.width(), self.height())
    }

    /// Label at a `(x, y)` cell
    pub fn label_at(&self, cell: Cell) -> Result<&Label> {
        self.grid.get_cell(cell)
    }

    /// The underlying label grid
    pub fn grid(&self) -> &Grid<Label> {
        &self.grid
    }

    /// The experiment's label alphabet
    pub fn alphabet(&self) -> &LabelAlphabet {
        &self.alphabet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> LabelAlphabet {
        LabelAlphabet::new(["and", "or", "not"])
    }

    #[test]
    fn test_world_accessors() {
        let grid = Grid::filled(4, 6, Label::resources(["or"]));
        let world = World::new(grid, alphabet()).unwrap();
        assert_eq!(world.width(), 6);
        assert_eq!(world.height(), 4);
        assert_eq!(world.lattice(), Lattice::torus(6, 4));
        assert_eq!(*world.label_at((5, 3)).unwrap(), Label::resources(["or"]));
    }

    #[test]
    fn test_world_rejects_foreign_resource() {
        let grid = Grid::filled(2, 2, Label::resources(["swim"]));
        assert!(World::new(grid, alphabet()).is_err());
    }

    #[test]
    fn test_world_rejects_empty_grid() {
        let grid: Grid<Label> = Grid::from_vec(vec![], 0, 0).unwrap();
        assert!(World::new(grid, alphabet()).is_err());
    }
}
