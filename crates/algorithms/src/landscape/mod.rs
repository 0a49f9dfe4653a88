//! Landscape-level statistics: niche partitioning, entropy, and
//! localized diversity maps.

mod diversity;
mod niche;

pub use diversity::{diversity_map, NeighborMode};
pub use niche::{
    entropy, environment_entropy, extract_patch, niche_cells, niche_frequencies, patch_richness,
    sqrt_entropy,
};
