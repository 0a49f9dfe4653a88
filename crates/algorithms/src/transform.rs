//! Grid transforms: collapsing per-cell observation lists to scalars
//! and converting between label encodings.
//!
//! A [`PhenotypeGrid`] carries one observation per input snapshot at
//! each cell; everything downstream wants a single value per cell.
//! [`aggregate`] applies any reducer element-wise, and [`mode`],
//! [`mean`], [`median`] and [`string_avg`] are the stock reducers.

use std::collections::HashMap;
use std::hash::Hash;

use evoscape_core::error::{Error, Result};
use evoscape_core::{Grid, Label, LabelAlphabet, PhenotypeGrid, World, ZERO_PHENOTYPE};

/// Collapse every cell's observation list with `f`, producing a derived
/// grid of the same shape.
pub fn aggregate<T, U>(grid: &Grid<Vec<T>>, f: impl Fn(&[T]) -> U) -> Grid<U>
where
    T: Clone,
    U: Clone,
{
    grid.map(|obs| f(obs))
}

/// Most frequent value, ties broken by first encounter. `None` for an
/// empty list.
pub fn mode<T: Clone + Eq + Hash>(values: &[T]) -> Option<T> {
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }

    let mut best: Option<(&T, usize)> = None;
    for v in values {
        let count = counts[v];
        if best.map_or(true, |(_, bc)| count > bc) {
            best = Some((v, count));
        }
    }

    best.map(|(v, _)| v.clone())
}

/// Arithmetic mean; `None` for an empty list.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Upper median (element at index `len / 2` after sorting); `None` for
/// an empty list.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(sorted[sorted.len() / 2])
}

/// Positionwise majority vote over phenotype strings.
///
/// Shorter strings are first padded to the longest input by inserting
/// zeros right after the `b` of their prefix (left-padding the digit
/// part). Then each output character is the most frequent character at
/// that position, ties broken by first encounter. The empty input
/// yields the canonical zero label.
pub fn string_avg(values: &[String]) -> String {
    if values.is_empty() {
        return ZERO_PHENOTYPE.to_string();
    }

    let width = values.iter().map(String::len).max().unwrap_or(0);
    let rows: Vec<Vec<char>> = values
        .iter()
        .map(|s| pad_after_prefix(s, width).chars().collect())
        .collect();

    let mut out = String::with_capacity(width);
    for i in 0..width {
        let mut counts: HashMap<char, usize> = HashMap::new();
        for row in &rows {
            *counts.entry(row[i]).or_insert(0) += 1;
        }

        let mut best: Option<(char, usize)> = None;
        for row in &rows {
            let ch = row[i];
            let count = counts[&ch];
            if best.map_or(true, |(_, bc)| count > bc) {
                best = Some((ch, count));
            }
        }

        if let Some((ch, _)) = best {
            out.push(ch);
        }
    }

    out
}

fn pad_after_prefix(s: &str, width: usize) -> String {
    if s.len() >= width {
        return s.to_string();
    }
    match s.find('b') {
        Some(pos) => {
            let (prefix, digits) = s.split_at(pos + 1);
            let zeros = "0".repeat(width - s.len());
            format!("{prefix}{zeros}{digits}")
        }
        None => s.to_string(),
    }
}

/// Number of tasks a phenotype performs (its count of 1 bits).
pub fn n_tasks(phenotype: &str) -> Result<u32> {
    let digits = phenotype
        .trim_start_matches('-')
        .strip_prefix("0b")
        .ok_or_else(|| Error::InvalidPhenotype(phenotype.to_string()))?;

    if digits.is_empty() || digits.chars().any(|c| c != '0' && c != '1') {
        return Err(Error::InvalidPhenotype(phenotype.to_string()));
    }

    Ok(digits.chars().filter(|&c| c == '1').count() as u32)
}

/// Replace every observation with its task count.
pub fn count_grid(grid: &PhenotypeGrid) -> Result<Grid<Vec<u32>>> {
    grid.try_map(|obs| obs.iter().map(|p| n_tasks(p)).collect())
}

/// Extract the `index`-th observation at every cell.
///
/// Fails if any cell holds fewer observations; the snapshot files
/// behind a phenotype grid all cover every cell, so a short list means
/// the grid was assembled wrong.
pub fn slice_layer(grid: &PhenotypeGrid, index: usize) -> Result<Grid<String>> {
    grid.try_map(|obs| {
        obs.get(index).cloned().ok_or_else(|| Error::InvalidParameter {
            name: "index",
            value: index.to_string(),
            reason: format!("a cell holds only {} observations", obs.len()),
        })
    })
}

/// Encode every world label as a phenotype string against the world's
/// alphabet. Count labels have no phenotype encoding and fail.
pub fn world_to_phenotypes(world: &World) -> Result<Grid<String>> {
    let alphabet = world.alphabet();
    world.grid().try_map(|label| match label {
        Label::Resources(set) => alphabet.res_set_to_phenotype(set),
        Label::Phenotype(s) => Ok(s.clone()),
        Label::Count(c) => Err(Error::InvalidParameter {
            name: "label",
            value: c.to_string(),
            reason: "count labels have no phenotype encoding".into(),
        }),
    })
}

/// How far each organism is from its cell's optimal phenotype: the size
/// of the symmetric difference between the tasks it performs and the
/// resources available in its cell.
///
/// The environment must consist of resource-set labels, and the two
/// grids must have the same shape.
pub fn optimal_phenotype_grid(world: &World, phenotypes: &Grid<String>) -> Result<Grid<usize>> {
    let (rows, cols) = world.grid().shape();
    if phenotypes.shape() != (rows, cols) {
        return Err(Error::SizeMismatch {
            er: rows,
            ec: cols,
            ar: phenotypes.rows(),
            ac: phenotypes.cols(),
        });
    }

    let alphabet = world.alphabet();
    let mut out = Vec::with_capacity(world.grid().len());
    for ((row, col), label) in world.grid().iter() {
        let available = match label {
            Label::Resources(set) => set,
            _ => {
                return Err(Error::InvalidParameter {
                    name: "world",
                    value: format!("{label:?}"),
                    reason: "optimal-phenotype distance needs resource-set labels".into(),
                })
            }
        };
        let performed = alphabet.phenotype_to_res_set(phenotypes.get(row, col)?)?;
        out.push(available.symmetric_difference(&performed).count());
    }

    Grid::from_vec(out, rows, cols)
}

/// Fraction of observations at each cell that perform each task, in
/// alphabet bit order. Cells with no observations report all zeros.
pub fn task_percentages(
    grid: &PhenotypeGrid,
    alphabet: &LabelAlphabet,
) -> Result<Grid<Vec<f64>>> {
    grid.try_map(|obs| {
        let mut counts = vec![0usize; alphabet.len()];
        for phenotype in obs {
            let performed = alphabet.phenotype_to_res_set(phenotype)?;
            for name in &performed {
                if let Some(i) = alphabet.index_of(name) {
                    counts[i] += 1;
                }
            }
        }

        let total = obs.len();
        Ok(counts
            .into_iter()
            .map(|c| {
                if total == 0 {
                    0.0
                } else {
                    c as f64 / total as f64
                }
            })
            .collect())
    })
}
