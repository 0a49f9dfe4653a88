//! # Evoscape Algorithms
//!
//! Landscape-ecology analysis of spatial digital-evolution data.
//!
//! ## Available Algorithm Categories
//!
//! - **patch**: shape metrics (area, perimeter, shape index, fractal
//!   dimension, ...) and core-area decomposition of cell patches
//! - **landscape**: niche partitioning, Shannon entropy, localized
//!   diversity maps
//! - **cluster**: phenotype clustering and rank-table construction for
//!   stable cross-grid coloring
//! - **transform**: aggregation of per-cell observation lists and
//!   phenotype/resource-set grid conversions

pub mod cluster;
pub mod landscape;
pub mod patch;
pub mod transform;

mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cluster::{
        assign_ranks_to_grid, cluster_types, generate_ranks, rank_types, weighted_hamming,
        ClusterParams, RankTable,
    };
    pub use crate::landscape::{
        diversity_map, entropy, environment_entropy, extract_patch, niche_cells,
        niche_frequencies, patch_richness, sqrt_entropy, NeighborMode,
    };
    pub use crate::patch::{
        area, centroid, contiguity_index, core_area, core_area_index, edge_cells, fractal_dimension,
        get_core_areas, number_core_areas, perimeter, perimeter_area_ratio,
        radius_of_gyration, related_circumscribing_circle, shape_index, shape_summary,
        traverse_core, weighted_perimeter, CircleMode, ShapeSummary,
    };
    pub use crate::transform::{
        aggregate, count_grid, mean, median, mode, n_tasks, optimal_phenotype_grid, slice_layer,
        string_avg, task_percentages, world_to_phenotypes,
    };
    pub use evoscape_core::prelude::*;
}
