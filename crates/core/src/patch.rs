//! Patch: a set of grid cells treated as one region.

use crate::topology::Cell;
use std::collections::HashSet;

/// An unordered collection of cells occupying a single lattice.
///
/// A patch need not be connected — it may represent several disjoint
/// blobs, and most shape metrics are defined regardless. A patch has no
/// inherent label; it is usually the extraction of all cells sharing
/// one label value from a world, but can also be hand-constructed.
///
/// Insertion order is preserved (with duplicates dropped) so traversals
/// are deterministic, and membership checks are O(1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    cells: Vec<Cell>,
    members: HashSet<Cell>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a patch from cell coordinates, dropping duplicates
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        let mut patch = Self::new();
        for cell in cells {
            patch.insert(cell);
        }
        patch
    }

    /// Add a cell; returns false if it was already present
    pub fn insert(&mut self, cell: Cell) -> bool {
        if self.members.insert(cell) {
            self.cells.push(cell);
            true
        } else {
            false
        }
    }

    /// Number of cells (the patch area)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.members.contains(&cell)
    }

    /// Cells in insertion order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<Cell> for Patch {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::from_cells(iter)
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = Cell;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Cell>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}
