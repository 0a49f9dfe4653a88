//! Core-area decomposition: which cells of a patch are insulated from
//! its boundary, and how many disjoint core regions that leaves.
//!
//! Two boundary-distance definitions coexist. [`core_cells`] measures
//! straight-line (minimum-image) distance to the rook edge set and is
//! the one the summary statistics use. [`get_core_areas`] instead walks
//! outward cell by cell, which also handles patches that fill their
//! whole lattice (no boundary at all).

use std::collections::{HashSet, VecDeque};

use evoscape_core::{Cell, Connectivity, Lattice, Patch};

/// Whether a patch cell has at least one out-of-patch neighbor under
/// the given adjacency rule. On a bounded lattice, off-grid positions
/// are not neighbors and do not make a cell an edge.
pub fn is_edge(cell: Cell, patch: &Patch, lattice: Lattice, connectivity: Connectivity) -> bool {
    lattice
        .neighbors(cell, connectivity)
        .into_iter()
        .any(|n| !patch.contains(n))
}

/// The subset of patch cells that are edges (see [`is_edge`]).
pub fn edge_cells(patch: &Patch, lattice: Lattice, connectivity: Connectivity) -> Patch {
    patch
        .iter()
        .filter(|&cell| is_edge(cell, patch, lattice, connectivity))
        .collect()
}

/// Cells whose minimum-image distance to every rook edge cell is at
/// least `distance`. A patch with no edge cells (it covers the whole
/// lattice) is entirely core.
pub fn core_cells(patch: &Patch, lattice: Lattice, distance: f64) -> Patch {
    let edges = edge_cells(patch, lattice, Connectivity::Rook);
    if edges.is_empty() {
        return patch.clone();
    }

    let sq = distance * distance;
    patch
        .iter()
        .filter(|&cell| edges.iter().all(|edge| lattice.squared_dist(cell, edge) >= sq))
        .collect()
}

/// Number of cells in the core (see [`core_cells`]).
pub fn core_area(patch: &Patch, lattice: Lattice, distance: f64) -> usize {
    core_cells(patch, lattice, distance).len()
}

/// Fraction of the patch that is core; 0 for the empty patch.
pub fn core_area_index(patch: &Patch, lattice: Lattice, distance: f64) -> f64 {
    if patch.is_empty() {
        return 0.0;
    }
    core_area(patch, lattice, distance) as f64 / patch.len() as f64
}

/// Number of disjoint core regions under the straight-line core
/// definition (see [`core_cells`] and [`traverse_core`]).
pub fn number_core_areas(patch: &Patch, lattice: Lattice, distance: f64) -> usize {
    traverse_core(&core_cells(patch, lattice, distance), lattice).len()
}

/// Decompose the patch into its disjoint core regions using walked
/// boundary distance.
///
/// A cell's boundary distance is the number of moore steps (through the
/// patch) to reach a cell that touches the outside; cells at distance
/// >= `distance` are core. Edge cells discovered by one search are
/// remembered, so later searches terminate as soon as they touch a
/// known edge. A patch with no reachable boundary is entirely core.
pub fn get_core_areas(patch: &Patch, lattice: Lattice, distance: f64) -> Vec<Patch> {
    let mut known_edges: HashSet<Cell> = HashSet::new();
    let mut core = Patch::new();

    for cell in patch.iter() {
        let steps = boundary_steps(cell, patch, lattice, &mut known_edges);
        if steps.map_or(true, |s| s as f64 >= distance) {
            core.insert(cell);
        }
    }

    tracing::debug!(
        patch = patch.len(),
        core = core.len(),
        edges_found = known_edges.len(),
        "core-area boundary search finished"
    );

    traverse_core(&core, lattice)
}

/// Moore-step distance from `start` to the nearest boundary cell, or
/// `None` if no patch cell touches the outside.
fn boundary_steps(
    start: Cell,
    patch: &Patch,
    lattice: Lattice,
    known_edges: &mut HashSet<Cell>,
) -> Option<usize> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0)]);

    while let Some((cell, steps)) = queue.pop_front() {
        if known_edges.contains(&cell) {
            return Some(steps);
        }

        let neighbors = lattice.neighbors(cell, Connectivity::Moore);
        if neighbors.iter().any(|n| !patch.contains(*n)) {
            known_edges.insert(cell);
            return Some(steps);
        }

        for n in neighbors {
            if patch.contains(n) && seen.insert(n) {
                queue.push_back((n, steps + 1));
            }
        }
    }

    None
}

/// Split a set of core cells into moore-connected components (with
/// toroidal wrap when the lattice has it). Components come out in the
/// order their first cell appears in `core`, so the result is
/// deterministic for a given patch.
pub fn traverse_core(core: &Patch, lattice: Lattice) -> Vec<Patch> {
    let mut visited: HashSet<Cell> = HashSet::new();
    let mut components = Vec::new();

    for seed in core.iter() {
        if !visited.insert(seed) {
            continue;
        }

        let mut component = Patch::new();
        component.insert(seed);
        let mut queue = VecDeque::from([seed]);

        while let Some(cell) = queue.pop_front() {
            for n in lattice.neighbors(cell, Connectivity::Moore) {
                if core.contains(n) && visited.insert(n) {
                    component.insert(n);
                    queue.push_back(n);
                }
            }
        }

        components.push(component);
    }

    components
}
