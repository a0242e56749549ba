//! Serde data file structs for catalog definitions.
//!
//! These structs define the on-disk format for units and technologies. They
//! are deserialized from RON, JSON, or TOML data files and then registered
//! into a catalog by the loader.

use serde::Deserialize;

// ===========================================================================
// Units
// ===========================================================================

/// A unit type definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitData {
    /// Symbolic key used in cell notation.
    pub key: String,
    pub name: String,
    /// Registers the unit in the donation partition.
    #[serde(default)]
    pub donation: bool,
    /// Trade value. Omit for tokens that are not independently valuable.
    #[serde(default)]
    pub value: Option<f64>,
}

// ===========================================================================
// Technologies
// ===========================================================================

/// A technology definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct TechnologyData {
    pub name: String,
    /// Era number, 1 through 4.
    pub era: u8,
    #[serde(default)]
    pub donation: bool,
}
