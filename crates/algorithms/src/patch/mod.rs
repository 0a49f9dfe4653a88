//! Patch geometry: shape metrics and core-area decomposition.

mod core_area;
mod shape;

pub use core_area::{
    core_area, core_area_index, core_cells, edge_cells, get_core_areas, is_edge,
    number_core_areas, traverse_core,
};
pub use shape::{
    area, centroid, contiguity_index, fractal_dimension, perimeter, perimeter_area_ratio,
    radius_of_gyration, related_circumscribing_circle, shape_index, shape_summary,
    weighted_perimeter, CircleMode, ShapeSummary,
};
