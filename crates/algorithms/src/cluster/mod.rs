//! Phenotype clustering and rank-table construction.

mod hamming;
mod hierarchy;
mod rank;

pub use hamming::weighted_hamming;
pub use rank::{
    assign_ranks_to_grid, cluster_types, generate_ranks, rank_types, ClusterParams, RankTable,
};
