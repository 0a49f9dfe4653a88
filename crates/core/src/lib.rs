//! # Evoscape Core
//!
//! Core types for the evoscape landscape-analysis library.
//!
//! This crate provides:
//! - `Grid<T>`: generic 2-D grid of categorical cell values
//! - `Label` / `LabelAlphabet`: tagged cell labels and the ordered
//!   resource/task alphabet they are encoded against
//! - `Lattice` / `Connectivity`: toroidal and bounded topology
//! - `Patch`: a set of cells treated as one region
//! - `SpatialWeights`: lattice neighbor/weight lists
//! - `World` / `PhenotypeGrid`: the parsed experiment inputs
//!
//! File parsing and rendering live with external collaborators; this
//! crate only defines the in-memory model they produce and consume.

pub mod error;
pub mod grid;
pub mod label;
pub mod patch;
pub mod topology;
pub mod weights;
pub mod world;

pub use error::{Error, Result};
pub use grid::Grid;
pub use label::{phenotype_value, Label, LabelAlphabet, EMPTY_PHENOTYPE, ZERO_PHENOTYPE};
pub use patch::Patch;
pub use topology::{euclidean_dist, planar_dist, wrap_coord, Cell, Connectivity, Lattice};
pub use weights::SpatialWeights;
pub use world::{PhenotypeGrid, World};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::Grid;
    pub use crate::label::{Label, LabelAlphabet, EMPTY_PHENOTYPE, ZERO_PHENOTYPE};
    pub use crate::patch::Patch;
    pub use crate::topology::{Cell, Connectivity, Lattice};
    pub use crate::weights::SpatialWeights;
    pub use crate::world::{PhenotypeGrid, World};
}
