//! Patch shape metrics
//!
//! Landscape-ecology shape statistics over a [`Patch`] (an arbitrary,
//! possibly disconnected set of cells on a toroidal or bounded
//! lattice). All functions are pure; degenerate inputs (empty or
//! single-cell patches) return the documented sentinel values rather
//! than erroring, so callers must check `area == 0` where the sentinel
//! is not geometrically meaningful.

use std::f64::consts::PI;

use geo::{ConvexHull, MultiPoint, Point};
use serde::Serialize;

use evoscape_core::topology::euclidean_dist;
use evoscape_core::{Cell, Connectivity, Lattice, Patch};

/// How [`related_circumscribing_circle`] measures the circle's area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleMode {
    /// Exact `pi * r^2`. Closest to Baker & Cai (1992), but the index
    /// can go negative for small/irregular patches since a perfect
    /// circle can be smaller than any cell covering of it.
    Formula,
    /// Brute-force count of lattice cells within `r` of the circle
    /// center (the discrete Gauss-circle approximation). Never smaller
    /// than the patch, so the index stays >= 0.
    Lattice,
}

/// Number of cells in the patch. Defined for the empty patch (0).
pub fn area(patch: &Patch) -> usize {
    patch.len()
}

/// Count of exposed cell faces: for every patch cell, the number of its
/// neighbors (under `connectivity`) that fall outside the patch.
///
/// Each cell's exposed faces are counted independently, so boundaries
/// between two non-adjacent same-patch regions contribute from both
/// sides. On a bounded lattice, faces leading off the grid are dropped
/// along with the neighbors.
pub fn perimeter(patch: &Patch, lattice: Lattice, connectivity: Connectivity) -> usize {
    patch
        .iter()
        .map(|cell| {
            lattice
                .neighbors(cell, connectivity)
                .into_iter()
                .filter(|n| !patch.contains(*n))
                .count()
        })
        .sum()
}

/// Smoother boundary estimate: each cell contributes
/// `(8 - moore neighbors in patch) / 8`, giving fractional credit for
/// diagonal exposure.
pub fn weighted_perimeter(patch: &Patch, lattice: Lattice) -> f64 {
    patch
        .iter()
        .map(|cell| {
            let inside = lattice
                .neighbors(cell, Connectivity::Moore)
                .into_iter()
                .filter(|n| patch.contains(*n))
                .count();
            (8.0 - inside as f64) / 8.0
        })
        .sum()
}

/// Arithmetic mean of the cell coordinates.
///
/// Returns `(0, 0)` for the empty patch as a sentinel; check
/// `area == 0` before treating it geometrically.
pub fn centroid(patch: &Patch) -> (f64, f64) {
    if patch.is_empty() {
        return (0.0, 0.0);
    }

    let n = patch.len() as f64;
    let (sx, sy) = patch.iter().fold((0.0, 0.0), |(sx, sy), (x, y)| {
        (sx + x as f64, sy + y as f64)
    });

    (sx / n, sy / n)
}

/// Mean distance from each cell to the patch centroid; 0 for the empty
/// patch.
pub fn radius_of_gyration(patch: &Patch) -> f64 {
    if patch.is_empty() {
        return 0.0;
    }

    let cent = centroid(patch);
    let total: f64 = patch
        .iter()
        .map(|(x, y)| euclidean_dist((x as f64, y as f64), cent))
        .sum();

    total / patch.len() as f64
}

/// Rook perimeter divided by area; 0 for the empty patch.
pub fn perimeter_area_ratio(patch: &Patch, lattice: Lattice) -> f64 {
    if patch.is_empty() {
        return 0.0;
    }
    perimeter(patch, lattice, Connectivity::Rook) as f64 / patch.len() as f64
}

/// `0.25 * perimeter / sqrt(area)`: 1 for a solid square, larger for
/// anything less compact. Returns 0 for the empty patch (by convention,
/// not NaN).
pub fn shape_index(patch: &Patch, lattice: Lattice) -> f64 {
    shape_index_with_perimeter(patch, perimeter(patch, lattice, Connectivity::Rook) as f64)
}

fn shape_index_with_perimeter(patch: &Patch, perim: f64) -> f64 {
    if patch.is_empty() {
        return 0.0;
    }
    0.25 * perim / (patch.len() as f64).sqrt()
}

/// `2 * ln(0.25 * perimeter) / ln(area)`.
///
/// A single cell returns exactly 1 (ln(1) = 0 would otherwise divide by
/// zero); an empty patch or zero quarter-perimeter returns the -1
/// sentinel (undefined).
pub fn fractal_dimension(patch: &Patch, lattice: Lattice) -> f64 {
    fractal_dimension_with_perimeter(patch, perimeter(patch, lattice, Connectivity::Rook) as f64)
}

fn fractal_dimension_with_perimeter(patch: &Patch, perim: f64) -> f64 {
    let patch_area = patch.len() as f64;
    let quarter = 0.25 * perim;

    if patch_area == 1.0 {
        return 1.0;
    }
    if patch_area == 0.0 || quarter == 0.0 {
        return -1.0;
    }

    2.0 * quarter.ln() / patch_area.ln()
}

/// How much of the smallest circle circumscribing the patch the patch
/// actually fills: `1 - area / circle_area`.
///
/// The circle's diameter is the maximum pairwise cell distance, found
/// over convex-hull vertices when a hull is available (the diameter of
/// a point set is achieved by a hull-vertex pair, so this is purely a
/// pruning step) and by exhaustive pairwise search otherwise. A 1-cell
/// patch (radius 0) returns exactly 0 in either mode.
pub fn related_circumscribing_circle(patch: &Patch, lattice: Lattice, mode: CircleMode) -> f64 {
    let patch_area = patch.len() as f64;
    let candidates = hull_candidates(patch);

    let mut max_sq = 0.0;
    let mut pair = ((0, 0), (0, 0));
    for (i, &a) in candidates.iter().enumerate() {
        for &b in &candidates[i + 1..] {
            let sq = lattice.squared_dist(a, b);
            if sq > max_sq {
                max_sq = sq;
                pair = (a, b);
            }
        }
    }

    let radius = max_sq.sqrt() / 2.0;
    if radius == 0.0 {
        return 0.0;
    }

    let circle_area = match mode {
        CircleMode::Formula => radius * radius * PI,
        CircleMode::Lattice => lattice_circle_area(pair, radius),
    };

    1.0 - patch_area / circle_area
}

/// Gauss-circle count: lattice cells within `radius` of the midpoint of
/// the diameter-defining pair. O(radius^2), fine at Avida world scale.
fn lattice_circle_area(pair: (Cell, Cell), radius: f64) -> f64 {
    let (a, b) = pair;
    let center = (
        (a.0 as f64 + b.0 as f64) / 2.0,
        (a.1 as f64 + b.1 as f64) / 2.0,
    );

    let mut cells = 0.0;
    let x_lo = (center.0 - radius).floor() as i64;
    let x_hi = (center.0 + radius).ceil() as i64;
    let y_lo = (center.1 - radius).floor() as i64;
    let y_hi = (center.1 + radius).ceil() as i64;

    for x in x_lo..=x_hi {
        for y in y_lo..=y_hi {
            if euclidean_dist((x as f64, y as f64), center) <= radius {
                cells += 1.0;
            }
        }
    }

    cells
}

/// Candidate cells for the diameter search: convex-hull vertices when
/// the hull is non-degenerate, otherwise every cell (collinear and tiny
/// patches).
fn hull_candidates(patch: &Patch) -> Vec<Cell> {
    if patch.len() < 4 {
        return patch.cells().to_vec();
    }

    let points: Vec<Point<f64>> = patch
        .iter()
        .map(|(x, y)| Point::new(x as f64, y as f64))
        .collect();
    let hull = MultiPoint::new(points).convex_hull();

    // The exterior ring closes on itself; drop the repeated endpoint.
    let mut vertices: Vec<Cell> = hull
        .exterior()
        .coords()
        .map(|c| (c.x.round() as usize, c.y.round() as usize))
        .collect();
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }

    if vertices.len() < 2 {
        patch.cells().to_vec()
    } else {
        vertices
    }
}

/// FRAGSTATS-style contiguity: every rook neighbor inside the patch
/// adds 2, every diagonal neighbor adds 1; the cell total is averaged
/// over the patch, shifted by -1 and scaled by the maximum template
/// value (12). Empty patch returns 0.
pub fn contiguity_index(patch: &Patch, lattice: Lattice) -> f64 {
    if patch.is_empty() {
        return 0.0;
    }

    let mut contiguity = 0.0;
    for cell in patch.iter() {
        for n in lattice.neighbors(cell, Connectivity::Rook) {
            if patch.contains(n) {
                contiguity += 2.0;
            }
        }
        for n in diagonal_neighbors(lattice, cell) {
            if patch.contains(n) {
                contiguity += 1.0;
            }
        }
    }

    (contiguity / patch.len() as f64 - 1.0) / 12.0
}

fn diagonal_neighbors(lattice: Lattice, cell: Cell) -> Vec<Cell> {
    let (x, y) = (cell.0 as isize, cell.1 as isize);
    let mut out = Vec::with_capacity(4);

    for (dx, dy) in [(-1, -1), (1, -1), (-1, 1), (1, 1)] {
        let (nx, ny) = (x + dx, y + dy);
        if lattice.toroidal {
            out.push(lattice.wrap(nx, ny));
        } else if nx >= 0
            && ny >= 0
            && (nx as usize) < lattice.width
            && (ny as usize) < lattice.height
        {
            out.push((nx as usize, ny as usize));
        }
    }

    out
}

/// Every shape metric for one patch as a flat record, ready for tabular
/// export by the caller (the library itself does no I/O).
#[derive(Debug, Clone, Serialize)]
pub struct ShapeSummary {
    pub area: usize,
    pub perimeter: usize,
    pub weighted_perimeter: f64,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub radius_of_gyration: f64,
    pub perimeter_area_ratio: f64,
    pub shape_index: f64,
    pub fractal_dimension: f64,
    pub related_circumscribing_circle: f64,
    pub contiguity_index: f64,
}

/// Compute all shape metrics in one pass (the rook perimeter is shared
/// across the metrics derived from it).
pub fn shape_summary(patch: &Patch, lattice: Lattice) -> ShapeSummary {
    let perim = perimeter(patch, lattice, Connectivity::Rook);
    let perim_f = perim as f64;
    let (cx, cy) = centroid(patch);

    ShapeSummary {
        area: patch.len(),
        perimeter: perim,
        weighted_perimeter: weighted_perimeter(patch, lattice),
        centroid_x: cx,
        centroid_y: cy,
        radius_of_gyration: radius_of_gyration(patch),
        perimeter_area_ratio: if patch.is_empty() {
            0.0
        } else {
            perim_f / patch.len() as f64
        },
        shape_index: shape_index_with_perimeter(patch, perim_f),
        fractal_dimension: fractal_dimension_with_perimeter(patch, perim_f),
        related_circumscribing_circle: related_circumscribing_circle(
            patch,
            lattice,
            CircleMode::Formula,
        ),
        contiguity_index: contiguity_index(patch, lattice),
    }
}
