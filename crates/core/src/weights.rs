//! Spatial weights for lattice data.
//!
//! A [`SpatialWeights`] maps every linear cell index to its neighbor
//! indices, with an optional parallel list of weights. This is the
//! structure spatial-autocorrelation consumers (Moran's I, Getis-Ord)
//! expect, and the weighted input accepted by the localized diversity
//! map.

use crate::error::{Error, Result};
use crate::topology::{Connectivity, Lattice};
use ndarray::Array2;

/// Neighbor lists (and weights) for every cell of a lattice, addressed
/// by linear index (`y * width + x`).
#[derive(Debug, Clone)]
pub struct SpatialWeights {
    lattice: Lattice,
    neighbors: Vec<Vec<usize>>,
    weights: Vec<Vec<f64>>,
}

impl SpatialWeights {
    /// Weights for a toroidal lattice under the given adjacency rule.
    ///
    /// Every cell gets exactly 4 (rook) or 8 (moore) neighbors with
    /// unit weight, wrapping at every edge and corner — no boundary
    /// cell has fewer neighbors than an interior cell.
    pub fn toroidal(width: usize, height: usize, connectivity: Connectivity) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let lattice = Lattice::torus(width, height);
        let mut neighbors = Vec::with_capacity(lattice.len());
        let mut weights = Vec::with_capacity(lattice.len());

        for idx in 0..lattice.len() {
            let cell = lattice.cell_at(idx);
            let ns: Vec<usize> = lattice
                .neighbors(cell, connectivity)
                .into_iter()
                .map(|n| lattice.index(n))
                .collect();
            weights.push(vec![1.0; ns.len()]);
            neighbors.push(ns);
        }

        Ok(Self {
            lattice,
            neighbors,
            weights,
        })
    }

    /// Replace the weight lists, e.g. with distance-decayed values.
    ///
    /// The new lists must be parallel to the neighbor lists.
    pub fn set_weights(&mut self, weights: Vec<Vec<f64>>) -> Result<()> {
        if weights.len() != self.neighbors.len()
            || weights
                .iter()
                .zip(&self.neighbors)
                .any(|(w, n)| w.len() != n.len())
        {
            return Err(Error::Algorithm(
                "weight lists must be parallel to neighbor lists".into(),
            ));
        }
        self.weights = weights;
        Ok(())
    }

    /// The lattice these weights were built for
    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Neighbor indices of a cell
    pub fn neighbors_of(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }

    /// Weights parallel to [`Self::neighbors_of`]
    pub fn weights_of(&self, index: usize) -> &[f64] {
        &self.weights[index]
    }

    /// Dense `n x n` weight matrix, for export or handoff to statistics
    /// libraries. The caller is responsible for writing it anywhere.
    pub fn to_dense(&self) -> Array2<f64> {
        let n = self.len();
        let mut dense = Array2::zeros((n, n));
        for (i, (ns, ws)) in self.neighbors.iter().zip(&self.weights).enumerate() {
            for (&j, &w) in ns.iter().zip(ws) {
                dense[(i, j)] = w;
            }
        }
        dense
    }
}
