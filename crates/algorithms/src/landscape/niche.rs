//! Niche partitioning and Shannon entropy of a world.

use std::collections::HashMap;

use evoscape_core::{Cell, Label, Patch, World};

/// How many cells carry each label.
pub fn niche_frequencies(world: &World) -> HashMap<Label, usize> {
    let mut freqs = HashMap::new();
    for (_, label) in world.grid().iter() {
        *freqs.entry(label.clone()).or_insert(0) += 1;
    }
    freqs
}

/// The cells carrying each label, in row-major order per label.
pub fn niche_cells(world: &World) -> HashMap<Label, Vec<Cell>> {
    let mut cells: HashMap<Label, Vec<Cell>> = HashMap::new();
    for ((row, col), label) in world.grid().iter() {
        cells.entry(label.clone()).or_default().push((col, row));
    }
    cells
}

/// All cells carrying exactly `label`, as one (possibly disconnected)
/// patch. A label absent from the world yields the empty patch.
pub fn extract_patch(world: &World, label: &Label) -> Patch {
    world
        .grid()
        .iter()
        .filter(|(_, l)| *l == label)
        .map(|((row, col), _)| (col, row))
        .collect()
}

/// Number of distinct labels present in the world.
pub fn patch_richness(world: &World) -> usize {
    niche_frequencies(world).len()
}

/// Shannon entropy, in bits, of a frequency distribution.
///
/// Frequencies need not be normalized; non-positive entries are
/// dropped. A distribution with zero total (or a single class) has
/// entropy 0.
pub fn entropy<I>(counts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let counts: Vec<f64> = counts.into_iter().filter(|&c| c > 0.0).collect();
    let total: f64 = counts.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let mut h = 0.0;
    for count in counts {
        let p = count / total;
        h -= p * p.log2();
    }

    // -0.0 from a single-class distribution
    h.max(0.0)
}

/// Shannon entropy of the square roots of the frequencies.
///
/// Compresses the dynamic range before normalizing, so rare classes
/// count for more than their raw share; used to compare environments
/// whose niche sizes span orders of magnitude.
pub fn sqrt_entropy<I>(counts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    entropy(counts.into_iter().map(f64::sqrt))
}

/// Shannon entropy of the world's niche frequencies.
///
/// With `exclude_desert`, cells whose label is the empty resource set
/// are left out of the distribution (they stay in the world; only this
/// statistic ignores them).
pub fn environment_entropy(world: &World, exclude_desert: bool) -> f64 {
    let freqs = niche_frequencies(world);
    entropy(
        freqs
            .iter()
            .filter(|(label, _)| !(exclude_desert && label.is_desert()))
            .map(|(_, &count)| count as f64),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use evoscape_core::{Grid, LabelAlphabet};

    fn alphabet() -> LabelAlphabet {
        LabelAlphabet::new(["and", "or", "not"])
    }

    fn two_niche_world() -> World {
        let labels = vec![
            Label::resources(["and"]),
            Label::resources(["and"]),
            Label::resources(["or"]),
            Label::resources(["or"]),
        ];
        World::new(Grid::from_vec(labels, 2, 2).unwrap(), alphabet()).unwrap()
    }

    #[test]
    fn test_entropy_balanced_pair() {
        assert!((entropy([2.0, 2.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_known_distribution() {
        let h = entropy([3.0, 6.0, 1.0, 2.0, 1.0]);
        assert!((h - 1.98777337).abs() < 1e-6, "got {h}");
    }

    #[test]
    fn test_entropy_degenerate() {
        assert_eq!(entropy([7.0]), 0.0);
        assert_eq!(entropy([]), 0.0);
        assert_eq!(entropy([0.0, 0.0]), 0.0);
        assert_eq!(entropy([-1.0, 5.0]), 0.0);
    }

    #[test]
    fn test_sqrt_entropy_compresses_range() {
        // sqrt brings 1:100 to 1:10, so the entropy climbs toward 1
        let raw = entropy([1.0, 100.0]);
        let compressed = sqrt_entropy([1.0, 100.0]);
        assert!(compressed > raw);
        // already-balanced input is unchanged
        assert!((sqrt_entropy([4.0, 4.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_niche_frequencies() {
        let freqs = niche_frequencies(&two_niche_world());
        assert_eq!(freqs.len(), 2);
        assert_eq!(freqs[&Label::resources(["and"])], 2);
        assert_eq!(freqs[&Label::resources(["or"])], 2);
    }

    #[test]
    fn test_environment_entropy() {
        assert!((environment_entropy(&two_niche_world(), false) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_environment_entropy_desert_exclusion() {
        let labels = vec![
            Label::resources(["and"]),
            Label::resources(["and"]),
            Label::Resources(Default::default()),
            Label::Resources(Default::default()),
        ];
        let world = World::new(Grid::from_vec(labels, 2, 2).unwrap(), alphabet()).unwrap();

        assert!((environment_entropy(&world, false) - 1.0).abs() < 1e-12);
        // only the non-desert niche remains
        assert_eq!(environment_entropy(&world, true), 0.0);
    }

    #[test]
    fn test_extract_patch_uses_cell_coordinates() {
        let labels = vec![
            Label::resources(["and"]),
            Label::resources(["or"]),
            Label::resources(["or"]),
            Label::resources(["and"]),
            Label::resources(["or"]),
            Label::resources(["or"]),
        ];
        // 2 rows x 3 cols
        let world = World::new(Grid::from_vec(labels, 2, 3).unwrap(), alphabet()).unwrap();

        let patch = extract_patch(&world, &Label::resources(["and"]));
        assert_eq!(patch.cells(), &[(0, 0), (0, 1)]);

        let missing = extract_patch(&world, &Label::resources(["not"]));
        assert!(missing.is_empty());
    }

    #[test]
    fn test_patch_richness() {
        assert_eq!(patch_richness(&two_niche_world()), 2);
    }

    #[test]
    fn test_niche_cells_partition_the_world() {
        let world = two_niche_world();
        let cells = niche_cells(&world);
        let total: usize = cells.values().map(Vec::len).sum();
        assert_eq!(total, 4);
        assert_eq!(cells[&Label::resources(["and"])], vec![(0, 0), (1, 0)]);
    }
}
