//! Position-weighted Hamming distance between phenotype strings.

use evoscape_core::error::{Error, Result};

/// Distance between two phenotype labels with equal-width digit parts:
/// every differing digit position `i` (0-indexed from the
/// most-significant digit) adds `1 + weight / i`, with position 0
/// contributing nothing at all.
///
/// The `0b` prefix (and a leading `-`) is stripped before comparison,
/// so only digits are indexed: the second-most-significant digit is
/// the most expensive at `1 + weight`, the cost falls off rightward,
/// and a lone top-bit flip is free. The falloff is a heuristic with no
/// physical meaning, but published cluster assignments depend on it,
/// so `weight = 1.0` reproduces them exactly and other weights are for
/// experimentation only.
///
/// Inputs must already be padded to a common width (see
/// [`crate::transform::string_avg`] for the padding convention);
/// unequal widths mean the caller skipped that step.
pub fn weighted_hamming(a: &str, b: &str, weight: f64) -> Result<f64> {
    let da = digit_part(a)?;
    let db = digit_part(b)?;
    if da.len() != db.len() {
        return Err(Error::InvalidParameter {
            name: "labels",
            value: format!("{a:?} vs {b:?}"),
            reason: "weighted hamming distance requires equal-width digit strings".into(),
        });
    }

    let mut dist = 0.0;
    for (i, (ca, cb)) in da.chars().zip(db.chars()).enumerate() {
        if ca != cb && i > 0 {
            dist += 1.0 + weight / i as f64;
        }
    }

    Ok(dist)
}

fn digit_part(label: &str) -> Result<&str> {
    label
        .trim_start_matches('-')
        .strip_prefix("0b")
        .ok_or_else(|| Error::InvalidPhenotype(label.to_string()))
}

/// Left-pad the digit part of each label with zeros so all strings have
/// equal length. Keeps input order; the `0b` prefix is preserved.
pub(crate) fn pad_equal_width(labels: &[String]) -> Vec<String> {
    let max_digits = labels
        .iter()
        .map(|l| l.trim_start_matches('-').trim_start_matches("0b").len())
        .max()
        .unwrap_or(0);

    labels
        .iter()
        .map(|label| {
            let negative = label.starts_with('-');
            let digits = label.trim_start_matches('-').trim_start_matches("0b");
            let padded = format!("{:0>max_digits$}", digits);
            if negative {
                format!("-0b{padded}")
            } else {
                format!("0b{padded}")
            }
        })
        .collect()
}
