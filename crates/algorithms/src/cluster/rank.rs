//! Rank tables: mapping phenotype labels to a small ordered integer
//! range for stable cross-grid coloring.
//!
//! A table is built once per comparison (one movie, one paired set of
//! grids) and then applied by pure lookup, so colors stay stable across
//! frames. Building goes through [`rank_types`] when the distinct
//! labels already fit the rank range and [`cluster_types`] otherwise.

use std::collections::{HashMap, HashSet};

use ndarray::Array2;

use evoscape_core::error::{Error, Result};
use evoscape_core::{phenotype_value, Grid, EMPTY_PHENOTYPE, ZERO_PHENOTYPE};

use super::hamming::{pad_equal_width, weighted_hamming};
use super::hierarchy::complete_linkage;
use crate::transform::string_avg;

/// Knobs for [`cluster_types`] / [`generate_ranks`].
#[derive(Debug, Clone)]
pub struct ClusterParams {
    /// Upper bound on distinct ranks (excluding the two sentinels)
    pub max_clusters: usize,
    /// Numerator of the positional Hamming term; 1.0 reproduces the
    /// historical distance exactly (see
    /// [`weighted_hamming`](super::weighted_hamming))
    pub position_weight: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            max_clusters: 9,
            position_weight: 1.0,
        }
    }
}

/// A label -> rank mapping.
///
/// Two entries are fixed no matter how the table was built: the
/// canonical zero label maps to 0 and the empty sentinel to -1. Both
/// are re-asserted at lookup time as well, so even a hand-assembled
/// table cannot misrank them.
#[derive(Debug, Clone, Default)]
pub struct RankTable {
    ranks: HashMap<String, i32>,
}

impl RankTable {
    fn new(ranks: HashMap<String, i32>) -> Self {
        let mut table = Self { ranks };
        table.force_sentinels();
        table
    }

    fn force_sentinels(&mut self) {
        self.ranks.insert(ZERO_PHENOTYPE.to_string(), 0);
        self.ranks.insert(EMPTY_PHENOTYPE.to_string(), -1);
    }

    /// Rank of a label.
    ///
    /// A label absent from the table means the table was built from a
    /// different label set than the grid being ranked; that mismatch
    /// would silently corrupt every downstream figure, so it is an
    /// error rather than a default rank.
    pub fn rank_of(&self, label: &str) -> Result<i32> {
        match label {
            ZERO_PHENOTYPE => Ok(0),
            EMPTY_PHENOTYPE => Ok(-1),
            _ => self
                .ranks
                .get(label)
                .copied()
                .ok_or_else(|| Error::UnknownLabel(label.to_string())),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.ranks.contains_key(label)
    }

    /// Number of entries, sentinels included
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Iterate over `(label, rank)` entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.ranks.iter().map(|(l, &r)| (l.as_str(), r))
    }
}

/// Rank labels directly by their integer values.
///
/// Labels are deduplicated, sorted by integer value ascending, and
/// ranked by sort position. When the canonical zero label is absent the
/// positions shift up by one so rank 0 stays reserved for it.
pub fn rank_types<I, S>(labels: I) -> Result<RankTable>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut entries: Vec<(i64, String)> = Vec::new();
    for label in labels {
        let label = label.as_ref();
        if seen.insert(label.to_string()) {
            entries.push((phenotype_value(label)?, label.to_string()));
        }
    }
    entries.sort_by_key(|(value, _)| *value);

    let offset = if seen.contains(ZERO_PHENOTYPE) { 0 } else { 1 };
    let ranks = entries
        .into_iter()
        .enumerate()
        .map(|(i, (_, label))| (label, i as i32 + offset))
        .collect();

    Ok(RankTable::new(ranks))
}

/// Rank labels by clustering them down to at most `max_clusters`
/// groups.
///
/// Labels are padded to a common width, compared pairwise with the
/// position-weighted Hamming distance, and merged by complete-linkage
/// agglomeration. Each cluster's representative is the per-position
/// majority vote over its members; clusters are ordered by the
/// representative's integer value ascending and ranked `1..=k` in that
/// order, so a higher representative value means a higher rank, the
/// same ordering [`rank_types`] uses. Every original label receives its
/// cluster's rank.
pub fn cluster_types(labels: &[String], params: &ClusterParams) -> Result<RankTable> {
    if params.max_clusters == 0 {
        return Err(Error::InvalidParameter {
            name: "max_clusters",
            value: "0".into(),
            reason: "at least one cluster is required".into(),
        });
    }

    let mut seen = HashSet::new();
    let distinct: Vec<String> = labels
        .iter()
        .filter(|l| seen.insert(l.as_str().to_string()))
        .cloned()
        .collect();

    if distinct.is_empty() {
        return Ok(RankTable::new(HashMap::new()));
    }

    let padded = pad_equal_width(&distinct);
    let n = padded.len();
    let mut distances = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let d = weighted_hamming(&padded[i], &padded[j], params.position_weight)?;
            distances[(i, j)] = d;
            distances[(j, i)] = d;
        }
    }

    let target = params.max_clusters.min(n);
    let clusters = complete_linkage(&distances, target);

    // order clusters by the integer value of their majority-vote
    // representative
    let mut ordered: Vec<(i64, Vec<usize>)> = Vec::with_capacity(clusters.len());
    for members in clusters {
        let member_strings: Vec<String> =
            members.iter().map(|&i| padded[i].clone()).collect();
        let representative = string_avg(&member_strings);
        ordered.push((phenotype_value(&representative)?, members));
    }
    ordered.sort_by_key(|(value, _)| *value);

    tracing::debug!(
        labels = n,
        clusters = ordered.len(),
        "clustered phenotype labels"
    );

    let mut ranks = HashMap::new();
    for (position, (_, members)) in ordered.into_iter().enumerate() {
        let rank = position as i32 + 1;
        for i in members {
            ranks.insert(distinct[i].clone(), rank);
        }
    }

    Ok(RankTable::new(ranks))
}

/// Build a rank table for a label set, picking the strategy by size.
///
/// The two sentinel labels are stripped before counting (their ranks
/// are fixed regardless); the remainder goes through [`rank_types`]
/// when it fits in `max_clusters` ranks and [`cluster_types`]
/// otherwise.
pub fn generate_ranks(labels: &[String], params: &ClusterParams) -> Result<RankTable> {
    let mut seen = HashSet::new();
    let distinct: Vec<String> = labels
        .iter()
        .filter(|l| l.as_str() != ZERO_PHENOTYPE && l.as_str() != EMPTY_PHENOTYPE)
        .filter(|l| seen.insert(l.as_str().to_string()))
        .cloned()
        .collect();

    if distinct.len() <= params.max_clusters {
        rank_types(distinct)
    } else {
        cluster_types(&distinct, params)
    }
}

/// Relabel a grid of phenotype strings into their ranks.
///
/// Pure lookup per cell; any label missing from the table fails the
/// whole operation (see [`RankTable::rank_of`]).
pub fn assign_ranks_to_grid(grid: &Grid<String>, table: &RankTable) -> Result<Grid<i32>> {
    grid.try_map(|label| table.rank_of(label))
}
