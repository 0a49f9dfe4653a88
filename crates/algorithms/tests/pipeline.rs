//! End-to-end checks over the full analysis pipeline: world -> niches
//! -> patch metrics, and phenotype labels -> rank table -> rank grid.

use evoscape_algorithms::prelude::*;
use evoscape_core::error::Error;

fn torus60() -> Lattice {
    Lattice::torus(60, 60)
}

/// Two 3x4 rectangular lobes joined by a 1-cell-wide 4-cell bridge,
/// 28 cells total.
fn two_lobed_patch() -> Patch {
    let mut patch = Patch::new();
    for x in 0..3 {
        for y in 0..4 {
            patch.insert((x, y));
            patch.insert((x + 7, y));
        }
    }
    for x in 3..7 {
        patch.insert((x, 1));
    }
    patch
}

#[test]
fn line_patch_area() {
    let patch = Patch::from_cells([(0, 0), (0, 1), (0, 2), (0, 3)]);
    assert_eq!(area(&patch), 4);
}

#[test]
fn rook_perimeter_on_torus() {
    let patch = Patch::from_cells([(0, 0), (0, 1), (0, 2), (0, 3), (1, 1)]);
    assert_eq!(perimeter(&patch, torus60(), Connectivity::Rook), 12);
}

#[test]
fn rectangle_area_perimeter_bounded() {
    let lattice = Lattice::bounded(30, 30);
    for (m, n) in [(2, 3), (4, 4), (1, 7), (5, 2)] {
        let patch: Patch = (10..10 + m)
            .flat_map(|x| (10..10 + n).map(move |y| (x, y)))
            .collect();
        assert_eq!(area(&patch), m * n);
        assert_eq!(
            perimeter(&patch, lattice, Connectivity::Rook),
            2 * (m + n),
            "{m}x{n}"
        );
    }
}

#[test]
fn moore_neighbors_wrap_at_origin() {
    let mut neighbors = torus60().neighbors((0, 0), Connectivity::Moore);
    neighbors.sort_unstable();
    let mut expected = vec![
        (0, 59),
        (59, 0),
        (1, 0),
        (0, 1),
        (1, 59),
        (59, 59),
        (1, 1),
        (59, 1),
    ];
    expected.sort_unstable();
    assert_eq!(neighbors, expected);
}

#[test]
fn shape_metrics_of_square_and_near_square() {
    let square: Patch = (0..3)
        .flat_map(|x| (0..3).map(move |y| (x, y)))
        .collect();
    assert!((shape_index(&square, torus60()) - 1.0).abs() < 1e-12);
    assert!((fractal_dimension(&square, torus60()) - 1.0).abs() < 1e-12);

    let mut bumped = square.clone();
    bumped.insert((3, 1));
    assert!((shape_index(&bumped, torus60()) - 1.10679).abs() < 1e-5);
    assert!((fractal_dimension(&bumped, torus60()) - 1.088136).abs() < 1e-5);
}

#[test]
fn core_area_monotone_in_distance() {
    let patch = two_lobed_patch();
    let mut previous = usize::MAX;
    for d in 0..5 {
        let current = core_area(&patch, torus60(), d as f64);
        assert!(current <= previous, "core area grew at d={d}");
        previous = current;
    }
    assert_eq!(core_area(&patch, torus60(), 0.0), area(&patch));
}

#[test]
fn two_lobed_patch_core_decomposition() {
    let patch = two_lobed_patch();
    assert_eq!(area(&patch), 28);
    assert_eq!(number_core_areas(&patch, torus60(), 0.0), 1);
    assert_eq!(number_core_areas(&patch, torus60(), 1.0), 2);
    assert_eq!(number_core_areas(&patch, torus60(), 2.0), 0);
}

#[test]
fn entropy_bounds() {
    assert_eq!(entropy([17.0]), 0.0);
    for k in [2usize, 4, 8, 16] {
        let h = entropy(vec![3.0; k]);
        assert!((h - (k as f64).log2()).abs() < 1e-12, "k={k}");
    }
    assert!((entropy([2.0, 2.0]) - 1.0).abs() < 1e-12);
    assert!((entropy([3.0, 6.0, 1.0, 2.0, 1.0]) - 1.98777337).abs() < 1e-6);
}

#[test]
fn world_to_rank_grid_pipeline() {
    let alphabet = LabelAlphabet::new(["and", "or", "not"]);
    let labels = vec![
        Label::resources(["and"]),
        Label::resources(["and", "or"]),
        Label::resources(["not"]),
        Label::resources::<[&str; 0], &str>([]),
        Label::resources(["and"]),
        Label::resources(["or"]),
    ];
    let world = World::new(Grid::from_vec(labels, 2, 3).unwrap(), alphabet).unwrap();

    // niche partition covers the world exactly
    let freqs = niche_frequencies(&world);
    assert_eq!(freqs.values().sum::<usize>(), 6);
    assert_eq!(patch_richness(&world), 5);
    let and_patch = extract_patch(&world, &Label::resources(["and"]));
    assert_eq!(and_patch.len(), 2);

    // encode, rank and relabel
    let phenotypes = world_to_phenotypes(&world).unwrap();
    let distinct: Vec<String> = phenotypes.iter().map(|(_, p)| p.clone()).collect();
    let table = generate_ranks(&distinct, &ClusterParams::default()).unwrap();
    let ranked = assign_ranks_to_grid(&phenotypes, &table).unwrap();

    // desert cell carries the zero phenotype, hence rank 0
    assert_eq!(*ranked.get(1, 0).unwrap(), 0);
    // every other cell got a positive rank
    for ((row, col), &rank) in ranked.iter() {
        if (row, col) != (1, 0) {
            assert!(rank > 0, "cell ({row},{col}) -> {rank}");
        }
    }
    // equal labels always rank equally
    assert_eq!(ranked.get(0, 0).unwrap(), ranked.get(1, 1).unwrap());
}

#[test]
fn rank_table_sentinels_survive_clustering() {
    let mut labels: Vec<String> = (1..=40).map(|v| format!("0b{v:b}")).collect();
    labels.push("0b0".to_string());
    labels.push("-0b1".to_string());

    let params = ClusterParams {
        max_clusters: 5,
        ..ClusterParams::default()
    };
    let table = generate_ranks(&labels, &params).unwrap();
    assert_eq!(table.rank_of("0b0").unwrap(), 0);
    assert_eq!(table.rank_of("-0b1").unwrap(), -1);
    for label in labels.iter().filter(|l| *l != "0b0" && *l != "-0b1") {
        let rank = table.rank_of(label).unwrap();
        assert!((1..=5).contains(&rank), "{label} -> {rank}");
    }
}

#[test]
fn ranking_unknown_label_is_fatal() {
    let table = generate_ranks(&["0b1".to_string()], &ClusterParams::default()).unwrap();
    let grid = Grid::from_vec(vec!["0b1".to_string(), "0b1101".to_string()], 1, 2).unwrap();
    assert!(matches!(
        assign_ranks_to_grid(&grid, &table),
        Err(Error::UnknownLabel(_))
    ));
}

#[test]
fn diversity_map_marks_niche_boundaries() {
    // left half one label, right half another, on an 8x8 torus
    let data: Vec<u8> = (0..8)
        .flat_map(|_| (0..8).map(|col| u8::from(col >= 4)))
        .collect();
    let grid = Grid::from_vec(data, 8, 8).unwrap();
    let lattice = Lattice::torus(8, 8);

    let map = diversity_map(&grid, lattice, NeighborMode::Neighborhood(Connectivity::Moore))
        .unwrap();

    // interior columns are uniform, boundary columns are mixed
    assert_eq!(*map.get(3, 2).unwrap(), 0.0);
    assert!(*map.get(3, 4).unwrap() > 0.0);
    assert!(*map.get(3, 0).unwrap() > 0.0, "wraps across the seam");
}

#[test]
fn phenotype_grid_aggregation_round_trip() {
    let cell = |obs: &[&str]| obs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let grid: PhenotypeGrid = Grid::from_vec(
        vec![
            cell(&["0b1", "0b1", "0b11"]),
            cell(&["0b10", "0b10"]),
            cell(&["0b0"]),
            cell(&["0b11", "0b1"]),
        ],
        2,
        2,
    )
    .unwrap();

    let modal = aggregate(&grid, |obs| mode(obs));
    assert_eq!(*modal.get(0, 0).unwrap(), Some("0b1".to_string()));
    assert_eq!(*modal.get(0, 1).unwrap(), Some("0b10".to_string()));

    let counts = count_grid(&grid).unwrap();
    assert_eq!(*counts.get(0, 0).unwrap(), vec![1, 1, 2]);

    let first = slice_layer(&grid, 0).unwrap();
    assert_eq!(first.get(1, 0).unwrap(), "0b0");
}
