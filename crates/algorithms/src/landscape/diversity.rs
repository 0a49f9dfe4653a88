//! Localized diversity: per-cell Shannon entropy over a neighborhood.
//!
//! For every cell, the labels in its neighborhood (the cell itself
//! included) form a small frequency distribution whose entropy becomes
//! the output value. High values mark boundaries and mixing zones
//! between niches; the interior of a large uniform patch scores 0.

use std::collections::HashMap;
use std::hash::Hash;

use evoscape_core::error::{Error, Result};
use evoscape_core::{Connectivity, Grid, Lattice, SpatialWeights};

use crate::landscape::entropy;
use crate::maybe_rayon::*;

/// Where a cell's neighborhood comes from.
///
/// Exactly one source is given by construction; the two cannot be
/// combined or both omitted.
#[derive(Debug, Clone, Copy)]
pub enum NeighborMode<'a> {
    /// The lattice neighbors under an adjacency rule, all with weight 1
    Neighborhood(Connectivity),
    /// Precomputed neighbor lists with per-neighbor weights
    Weights(&'a SpatialWeights),
}

/// Per-cell neighborhood entropy of a label grid.
///
/// The grid must cover `lattice` exactly, and in weights mode the
/// weight lists must have been built for a lattice of the same size;
/// either mismatch means the inputs describe different worlds and is
/// fatal. The cell itself always participates with weight 1. Rows are
/// processed in parallel when the `parallel` feature is on.
pub fn diversity_map<T>(grid: &Grid<T>, lattice: Lattice, mode: NeighborMode<'_>) -> Result<Grid<f64>>
where
    T: Clone + Eq + Hash + Sync,
{
    let (rows, cols) = grid.shape();
    if cols != lattice.width || rows != lattice.height {
        return Err(Error::SizeMismatch {
            er: lattice.height,
            ec: lattice.width,
            ar: rows,
            ac: cols,
        });
    }
    if let NeighborMode::Weights(weights) = mode {
        if weights.len() != grid.len() {
            return Err(Error::SizeMismatch {
                er: rows,
                ec: cols,
                ar: weights.len(),
                ac: 1,
            });
        }
    }

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = Vec::with_capacity(cols);
            for col in 0..cols {
                row_data.push(cell_entropy(grid, lattice, mode, (col, row)));
            }
            row_data
        })
        .collect();

    Grid::from_vec(data, rows, cols)
}

fn cell_entropy<T>(grid: &Grid<T>, lattice: Lattice, mode: NeighborMode<'_>, cell: (usize, usize)) -> f64
where
    T: Clone + Eq + Hash,
{
    let mut counts: HashMap<&T, f64> = HashMap::new();

    if let Ok(center) = grid.get_cell(cell) {
        counts.insert(center, 1.0);
    }

    match mode {
        NeighborMode::Neighborhood(connectivity) => {
            for n in lattice.neighbors(cell, connectivity) {
                if let Ok(value) = grid.get_cell(n) {
                    *counts.entry(value).or_insert(0.0) += 1.0;
                }
            }
        }
        NeighborMode::Weights(weights) => {
            let idx = lattice.index(cell);
            for (&j, &w) in weights.neighbors_of(idx).iter().zip(weights.weights_of(idx)) {
                if let Ok(value) = grid.get_cell(lattice.cell_at(j)) {
                    *counts.entry(value).or_insert(0.0) += w;
                }
            }
        }
    }

    entropy(counts.into_values())
}
