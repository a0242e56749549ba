use serde::{Deserialize, Serialize};
use std::fmt;

/// Research era printed on technology cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Era {
    I,
    II,
    III,
    IV,
}

impl Era {
    pub const ALL: [Era; 4] = [Era::I, Era::II, Era::III, Era::IV];

    pub fn from_number(n: u8) -> Option<Era> {
        match n {
            1 => Some(Era::I),
            2 => Some(Era::II),
            3 => Some(Era::III),
            4 => Some(Era::IV),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Era::I => 1,
            Era::II => 2,
            Era::III => 3,
            Era::IV => 4,
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Era::I => "I",
            Era::II => "II",
            Era::III => "III",
            Era::IV => "IV",
        };
        f.write_str(s)
    }
}

/// A researchable technology, referenced by exact name from upgrade and cost
/// cells. Donation copies carry a leading `+` in their name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    pub era: Era,
    pub donation: bool,
}

impl Technology {
    pub fn new(name: &str, era: Era, donation: bool) -> Self {
        Self {
            name: name.to_string(),
            era,
            donation,
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
