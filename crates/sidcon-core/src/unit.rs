use crate::fixed::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Which key namespace a unit type lives in.
///
/// Keys written after the donation marker (`+`) resolve against the donation
/// partition; everything else resolves against the ordinary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Partition {
    Ordinary,
    Donation,
}

/// A unit type descriptor: cubes, ships, victory points, colonies, tokens.
///
/// Identity is `(partition, key)`; the name and value are descriptive only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitType {
    pub key: String,
    pub name: String,
    pub donation: bool,
    /// Fair trade value. `None` means the unit is not independently valuable.
    pub value: Option<Value>,
}

/// Shared handle to a catalog unit type.
pub type UnitRef = Arc<UnitType>;

impl UnitType {
    pub fn new(key: &str, name: &str, donation: bool, value: Option<Value>) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            donation,
            value,
        }
    }

    pub fn partition(&self) -> Partition {
        if self.donation {
            Partition::Donation
        } else {
            Partition::Ordinary
        }
    }

    pub fn is_valuable(&self) -> bool {
        self.value.is_some()
    }
}

impl PartialEq for UnitType {
    fn eq(&self, other: &Self) -> bool {
        self.donation == other.donation && self.key == other.key
    }
}

impl Eq for UnitType {}

impl Hash for UnitType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.donation.hash(state);
        self.key.hash(state);
    }
}

impl PartialOrd for UnitType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UnitType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partition()
            .cmp(&other.partition())
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
