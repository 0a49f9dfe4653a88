//! Categorical cell labels and the label alphabet.
//!
//! A cell in an Avida world is described either by the set of resources
//! available there (a "niche"), by a bit-vector string recording which
//! tasks an organism performs (a "phenotype", e.g. `"0b1010"`), or by a
//! plain count. The original tooling sniffed these apart at runtime;
//! here they form a closed variant so every consumer dispatches
//! explicitly.
//!
//! Bit order is meaningful only relative to a [`LabelAlphabet`]: the
//! ordered list of resource/task identifiers for one experiment. The
//! alphabet is threaded through as a value, so analyses with different
//! alphabets can run side by side.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The canonical "performs no tasks" phenotype, always rank 0.
pub const ZERO_PHENOTYPE: &str = "0b0";

/// The "no data" sentinel phenotype, always rank -1.
pub const EMPTY_PHENOTYPE: &str = "-0b1";

/// A categorical cell label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// The set of resources present in the cell
    Resources(BTreeSet<String>),
    /// A bit-vector phenotype string with a `0b` prefix
    Phenotype(String),
    /// A plain count (e.g. number of tasks performed)
    Count(u32),
}

impl Label {
    /// Convenience constructor from resource names
    pub fn resources<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Label::Resources(names.into_iter().map(Into::into).collect())
    }

    /// Whether this label is the desert niche (no resources present).
    ///
    /// Desert cells stay in the grid; the flag only controls whether
    /// they enter entropy statistics.
    pub fn is_desert(&self) -> bool {
        matches!(self, Label::Resources(set) if set.is_empty())
    }
}

/// The ordered list of resource/task identifiers for one experiment.
///
/// The ordering defines which bit of a phenotype string corresponds to
/// which identifier, so two alphabets with the same members in a
/// different order are *not* interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelAlphabet {
    names: Vec<String>,
}

impl LabelAlphabet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of identifiers (= phenotype width in bits)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The identifiers in bit order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Bit position of an identifier, if present
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Encode a resource set as a phenotype string.
    ///
    /// The i-th bit is 1 iff the i-th alphabet identifier is in the
    /// set. Leading zeros are trimmed (but at least one digit is kept),
    /// so the empty set encodes as [`ZERO_PHENOTYPE`]. Resources
    /// missing from the alphabet are a configuration error.
    pub fn res_set_to_phenotype(&self, res_set: &BTreeSet<String>) -> Result<String> {
        for resource in res_set {
            if self.index_of(resource).is_none() {
                return Err(Error::UnknownResource(resource.clone()));
            }
        }

        let bits: String = self
            .names
            .iter()
            .map(|name| if res_set.contains(name) { '1' } else { '0' })
            .collect();

        let trimmed = bits.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Ok(format!("0b{digits}"))
    }

    /// Decode a phenotype string into the resource set its 1-bits name.
    ///
    /// The string must carry the `0b` prefix; it is sign-extended with
    /// leading zeros to the alphabet width. A phenotype wider than the
    /// alphabet cannot be decoded.
    pub fn phenotype_to_res_set(&self, phenotype: &str) -> Result<BTreeSet<String>> {
        let digits = phenotype
            .strip_prefix("0b")
            .ok_or_else(|| Error::InvalidPhenotype(phenotype.to_string()))?;

        if digits.is_empty() || digits.len() > self.len() {
            return Err(Error::InvalidPhenotype(phenotype.to_string()));
        }

        let pad = self.len() - digits.len();
        let mut res_set = BTreeSet::new();

        for (i, bit) in digits.chars().enumerate() {
            match bit {
                '1' => {
                    res_set.insert(self.names[pad + i].clone());
                }
                '0' => {}
                _ => return Err(Error::InvalidPhenotype(phenotype.to_string())),
            }
        }

        Ok(res_set)
    }
}

/// Integer value of a phenotype string (e.g. `"0b101"` -> 5).
///
/// Accepts the negative sentinel form (`"-0b1"` -> -1).
pub fn phenotype_value(phenotype: &str) -> Result<i64> {
    let (sign, rest) = match phenotype.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, phenotype),
    };

    let digits = rest
        .strip_prefix("0b")
        .ok_or_else(|| Error::InvalidPhenotype(phenotype.to_string()))?;

    let value = i64::from_str_radix(digits, 2)
        .map_err(|_| Error::InvalidPhenotype(phenotype.to_string()))?;

    Ok(sign * value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> LabelAlphabet {
        LabelAlphabet::new(["equ", "xor", "nor", "andn", "or", "orn", "and", "nand", "not"])
    }

    #[test]
    fn test_res_set_to_phenotype() {
        let alpha = alphabet();
        let set: BTreeSet<String> = ["not".to_string()].into();
        assert_eq!(alpha.res_set_to_phenotype(&set).unwrap(), "0b1");

        let set: BTreeSet<String> = ["equ".to_string(), "not".to_string()].into();
        assert_eq!(alpha.res_set_to_phenotype(&set).unwrap(), "0b100000001");

        assert_eq!(
            alpha.res_set_to_phenotype(&BTreeSet::new()).unwrap(),
            ZERO_PHENOTYPE
        );
    }

    #[test]
    fn test_res_set_unknown_resource() {
        let alpha = alphabet();
        let set: BTreeSet<String> = ["teleport".to_string()].into();
        assert!(alpha.res_set_to_phenotype(&set).is_err());
    }

    #[test]
    fn test_phenotype_to_res_set_round_trip() {
        let alpha = alphabet();
        let set: BTreeSet<String> = ["xor".to_string(), "and".to_string()].into();
        let phenotype = alpha.res_set_to_phenotype(&set).unwrap();
        assert_eq!(alpha.phenotype_to_res_set(&phenotype).unwrap(), set);
    }

    #[test]
    fn test_phenotype_to_res_set_rejects_malformed() {
        let alpha = alphabet();
        assert!(alpha.phenotype_to_res_set("101").is_err());
        assert!(alpha.phenotype_to_res_set("0b").is_err());
        assert!(alpha.phenotype_to_res_set("0b102").is_err());
        assert!(alpha.phenotype_to_res_set(EMPTY_PHENOTYPE).is_err());
        // wider than the alphabet
        assert!(alpha.phenotype_to_res_set("0b1111111111").is_err());
    }

    #[test]
    fn test_phenotype_value() {
        assert_eq!(phenotype_value("0b0").unwrap(), 0);
        assert_eq!(phenotype_value("0b101").unwrap(), 5);
        assert_eq!(phenotype_value(EMPTY_PHENOTYPE).unwrap(), -1);
        assert!(phenotype_value("five").is_err());
    }

    #[test]
    fn test_desert_label() {
        assert!(Label::Resources(BTreeSet::new()).is_desert());
        assert!(!Label::resources(["or"]).is_desert());
        assert!(!Label::Phenotype(ZERO_PHENOTYPE.to_string()).is_desert());
    }
}
