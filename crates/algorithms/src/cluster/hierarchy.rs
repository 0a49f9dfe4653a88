//! Complete-linkage agglomerative clustering over a precomputed
//! distance matrix.
//!
//! The label sets being clustered are small (tens to low hundreds), so
//! a direct O(n^3) merge loop is simpler than maintaining a heap of
//! candidate pairs and fast enough in practice.

use ndarray::Array2;

/// Merge singleton clusters until at most `max_clusters` remain.
///
/// At each step the two clusters with the smallest complete-linkage
/// distance (the *maximum* pairwise member distance) are merged. Ties
/// go to the earliest pair in index order, so the result is
/// deterministic. Returns member indices into the original item list,
/// each cluster keeping its members in first-seen order.
pub(crate) fn complete_linkage(distances: &Array2<f64>, max_clusters: usize) -> Vec<Vec<usize>> {
    let n = distances.nrows();
    let mut clusters: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();

    while clusters.len() > max_clusters.max(1) {
        let mut best = f64::INFINITY;
        let mut pair = (0, 1);

        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let d = linkage(distances, &clusters[i], &clusters[j]);
                if d < best {
                    best = d;
                    pair = (i, j);
                }
            }
        }

        let absorbed = clusters.remove(pair.1);
        clusters[pair.0].extend(absorbed);
    }

    clusters
}

/// Complete linkage: the farthest pair across the two clusters.
fn linkage(distances: &Array2<f64>, a: &[usize], b: &[usize]) -> f64 {
    let mut worst = 0.0_f64;
    for &i in a {
        for &j in b {
            worst = worst.max(distances[(i, j)]);
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(values: &[&[f64]]) -> Array2<f64> {
        let n = values.len();
        let mut m = Array2::zeros((n, n));
        for (i, row) in values.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                m[(i, j)] = v;
            }
        }
        m
    }

    #[test]
    fn test_two_obvious_groups() {
        // items 0,1 close together, 2,3 close together, groups far apart
        let d = matrix(&[
            &[0.0, 1.0, 9.0, 9.0],
            &[1.0, 0.0, 9.0, 9.0],
            &[9.0, 9.0, 0.0, 1.0],
            &[9.0, 9.0, 1.0, 0.0],
        ]);

        let mut clusters = complete_linkage(&d, 2);
        for c in &mut clusters {
            c.sort_unstable();
        }
        clusters.sort();
        assert_eq!(clusters, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_no_merging_needed() {
        let d = matrix(&[&[0.0, 5.0], &[5.0, 0.0]]);
        assert_eq!(complete_linkage(&d, 4).len(), 2);
    }

    #[test]
    fn test_collapse_to_one() {
        let d = matrix(&[
            &[0.0, 1.0, 2.0],
            &[1.0, 0.0, 1.0],
            &[2.0, 1.0, 0.0],
        ]);
        let clusters = complete_linkage(&d, 1);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 3);
    }

    #[test]
    fn test_complete_linkage_resists_chaining() {
        // a chain 0-1-2-3 with unit gaps: single linkage would swallow
        // the whole chain; complete linkage splits it in the middle
        let d = matrix(&[
            &[0.0, 1.0, 2.0, 3.0],
            &[1.0, 0.0, 1.0, 2.0],
            &[2.0, 1.0, 0.0, 1.0],
            &[3.0, 2.0, 1.0, 0.0],
        ]);

        let mut clusters = complete_linkage(&d, 2);
        for c in &mut clusters {
            c.sort_unstable();
        }
        clusters.sort();
        assert_eq!(clusters, vec![vec![0, 1], vec![2, 3]]);
    }
}
