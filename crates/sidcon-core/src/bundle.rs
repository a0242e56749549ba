//! Counted bundles of units and the cell notation that describes them.
//!
//! A bundle is written as a run of `<count><key>` tokens (`2w3b`, `w`,
//! `3U2$`), optionally followed by the donation marker `+` and further tokens
//! resolved against the donation partition (`2w+1U`).

use crate::catalog::Catalog;
use crate::fixed::{scaled, Value};
use crate::merge::{Merge, MergeError};
use crate::unit::{Partition, UnitRef, UnitType};
use std::collections::BTreeMap;
use std::fmt;

/// Everything after this marker resolves against the donation partition.
pub const DONATION_MARKER: char = '+';

/// Decorations that appear in spreadsheet cells but carry no meaning.
const STRIPPED_SUBSTRINGS: [&str; 1] = [" §"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BundleError {
    #[error("'{input}' contains unmapped key '{key}'")]
    UnmappedKey { input: String, key: char },

    #[error("'{input}' contains a count that is not followed by a unit key")]
    MalformedCount { input: String },

    #[error("'{input}' contains more than one donation marker ('+')")]
    MultipleDonationMarkers { input: String },

    #[error("cannot subtract: right side has unit '{key}' that the left side lacks")]
    MissingSubtractKey { key: String },

    #[error("subtraction leaves a negative count of unit '{key}'")]
    NegativeResult { key: String },
}

// ---------------------------------------------------------------------------
// CountedBundle
// ---------------------------------------------------------------------------

/// A multiset of unit types. Every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CountedBundle {
    counts: BTreeMap<UnitRef, u32>,
}

impl CountedBundle {
    /// The empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bundle from `(unit, count)` pairs. Repeated units accumulate
    /// and zero counts are dropped.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (UnitRef, u32)>,
    {
        let mut bundle = Self::new();
        for (unit, count) in counts {
            bundle.insert(unit, count);
        }
        bundle
    }

    /// Parse cell notation against `catalog`.
    pub fn parse(catalog: &Catalog, s: &str) -> Result<Self, BundleError> {
        let mut cleaned = s.to_string();
        for stripped in STRIPPED_SUBSTRINGS {
            cleaned = cleaned.replace(stripped, "");
        }

        let mut sides = cleaned.split(DONATION_MARKER);
        let ordinary = sides.next().unwrap_or_default();
        let donation = sides.next();
        if sides.next().is_some() {
            return Err(BundleError::MultipleDonationMarkers { input: cleaned });
        }

        let bundle = tokenize(catalog, ordinary, Partition::Ordinary)?;
        match donation {
            Some(donation) => Ok(bundle.add(&tokenize(catalog, donation, Partition::Donation)?)),
            None => Ok(bundle),
        }
    }

    /// Count of `unit` in this bundle (0 if absent).
    pub fn get(&self, unit: &UnitType) -> u32 {
        self.counts.get(unit).copied().unwrap_or(0)
    }

    pub fn contains(&self, unit: &UnitType) -> bool {
        self.counts.contains_key(unit)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UnitRef, u32)> {
        self.counts.iter().map(|(unit, &count)| (unit, count))
    }

    /// Number of distinct unit types.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of units across all types.
    pub fn total(&self) -> u32 {
        self.counts.values().fold(0u32, |acc, &c| acc.saturating_add(c))
    }

    /// Per-unit sum over the union of both key sets.
    pub fn add(&self, other: &CountedBundle) -> CountedBundle {
        let mut sum = self.clone();
        for (unit, &count) in &other.counts {
            sum.insert(unit.clone(), count);
        }
        sum
    }

    /// Per-unit difference.
    ///
    /// Fails if `other` holds a unit this bundle lacks, or if any count would
    /// drop below zero. Units whose count reaches zero are removed.
    pub fn subtract(&self, other: &CountedBundle) -> Result<CountedBundle, BundleError> {
        let mut difference = self.counts.clone();
        for (unit, &count) in &other.counts {
            let Some(left) = difference.get_mut(unit) else {
                return Err(BundleError::MissingSubtractKey {
                    key: unit.key.clone(),
                });
            };
            *left = left
                .checked_sub(count)
                .ok_or_else(|| BundleError::NegativeResult {
                    key: unit.key.clone(),
                })?;
        }
        difference.retain(|_, count| *count > 0);
        Ok(CountedBundle { counts: difference })
    }

    /// Sum of `count * value` over valued units. Unvalued units contribute 0.
    pub fn value(&self) -> Value {
        self.counts
            .iter()
            .filter_map(|(unit, &count)| unit.value.map(|v| scaled(v, count)))
            .fold(Value::ZERO, |acc, v| acc.saturating_add(v))
    }

    fn insert(&mut self, unit: UnitRef, count: u32) {
        if count == 0 {
            return;
        }
        let entry = self.counts.entry(unit).or_insert(0);
        *entry = entry.saturating_add(count);
    }
}

impl Merge for CountedBundle {
    fn merge(&self, other: &Self) -> Result<Self, MergeError> {
        Ok(self.add(other))
    }
}

impl FromIterator<(UnitRef, u32)> for CountedBundle {
    fn from_iter<I: IntoIterator<Item = (UnitRef, u32)>>(iter: I) -> Self {
        Self::from_counts(iter)
    }
}

/// Renders canonical notation: ordinary units, then `+` and donation units.
///
/// Only the first key of each side may be written bare; every later key
/// carries its count, so adjacent keys never read back as one longer key.
impl fmt::Display for CountedBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut in_donations = false;
        let mut first_of_side = true;
        for (unit, &count) in &self.counts {
            if unit.donation && !in_donations {
                write!(f, "{DONATION_MARKER}")?;
                in_donations = true;
                first_of_side = true;
            }
            if count > 1 || !first_of_side {
                write!(f, "{count}")?;
            }
            f.write_str(&unit.key)?;
            first_of_side = false;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Tokenize one side of the donation marker.
fn tokenize(
    catalog: &Catalog,
    s: &str,
    partition: Partition,
) -> Result<CountedBundle, BundleError> {
    let mut bundle = CountedBundle::new();
    let mut pending: Option<u32> = None;
    let mut rest = s;

    while let Some(c) = rest.chars().next() {
        if let Some(digit) = c.to_digit(10) {
            let count = pending
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit))
                .ok_or_else(|| BundleError::MalformedCount {
                    input: s.to_string(),
                })?;
            pending = Some(count);
            rest = &rest[c.len_utf8()..];
            continue;
        }

        let (unit, len) = catalog
            .match_key(partition, rest)
            .ok_or_else(|| BundleError::UnmappedKey {
                input: s.to_string(),
                key: c,
            })?;
        bundle.insert(unit.clone(), pending.take().unwrap_or(1));
        rest = &rest[len..];
    }

    if pending.is_some() {
        return Err(BundleError::MalformedCount {
            input: s.to_string(),
        });
    }
    Ok(bundle)
}
