//! Immutable unit and technology catalog.
//!
//! The catalog is the one collaborator every parser depends on: it maps
//! symbolic keys to [`UnitType`]s (split into ordinary and donation
//! partitions) and technology names to [`Technology`]s. Catalogs are built
//! once through [`CatalogBuilder`] and never change afterwards, so a single
//! instance can be shared freely across threads.

use crate::converter::ConverterKind;
use crate::fixed::f64_to_value;
use crate::literal::UnknownLiteral;
use crate::technology::{Era, Technology};
use crate::unit::{Partition, UnitRef, UnitType};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Characters with a structural meaning in cell notation. No key may contain
/// them.
pub const RESERVED_CHARS: [char; 3] = ['+', '/', ','];

/// Builder for constructing an immutable [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    units: Vec<UnitType>,
    technologies: Vec<Technology>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit type. Validation is deferred to [`build`](Self::build).
    pub fn register_unit(&mut self, unit: UnitType) -> &mut Self {
        self.units.push(unit);
        self
    }

    /// Shorthand for [`register_unit`](Self::register_unit) with an `f64`
    /// value.
    pub fn unit(&mut self, key: &str, name: &str, donation: bool, value: Option<f64>) -> &mut Self {
        self.register_unit(UnitType::new(key, name, donation, value.map(f64_to_value)))
    }

    pub fn register_technology(&mut self, technology: Technology) -> &mut Self {
        self.technologies.push(technology);
        self
    }

    pub fn technology(&mut self, name: &str, era: Era, donation: bool) -> &mut Self {
        self.register_technology(Technology::new(name, era, donation))
    }

    /// Validate every registration and freeze the catalog.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut ordinary: HashMap<String, UnitRef> = HashMap::new();
        let mut donation: HashMap<String, UnitRef> = HashMap::new();
        let mut units = Vec::with_capacity(self.units.len());

        for unit in self.units {
            validate_key(&unit.key)?;
            let map = if unit.donation {
                &mut donation
            } else {
                &mut ordinary
            };
            if map.contains_key(&unit.key) {
                let partition = unit.partition();
                return Err(CatalogError::DuplicateKey {
                    key: unit.key,
                    partition,
                });
            }
            let unit = Arc::new(unit);
            map.insert(unit.key.clone(), Arc::clone(&unit));
            units.push(unit);
        }

        let mut technologies: HashMap<String, Arc<Technology>> = HashMap::new();
        for technology in self.technologies {
            if technologies.contains_key(&technology.name) {
                return Err(CatalogError::DuplicateTechnology(technology.name));
            }
            technologies.insert(technology.name.clone(), Arc::new(technology));
        }

        let catalog = Catalog {
            max_ordinary_key_chars: longest_key(&ordinary),
            max_donation_key_chars: longest_key(&donation),
            units,
            ordinary,
            donation,
            technologies,
        };
        tracing::debug!(
            units = catalog.unit_count(),
            technologies = catalog.technology_count(),
            "catalog built"
        );
        Ok(catalog)
    }
}

fn validate_key(key: &str) -> Result<(), CatalogError> {
    if key.is_empty() {
        return Err(CatalogError::EmptyKey);
    }
    // Counts are digit runs, so a digit inside a key would split it.
    if key.chars().any(|c| c.is_ascii_digit()) {
        return Err(CatalogError::InvalidKey {
            key: key.to_string(),
            reason: "contains a digit",
        });
    }
    if key.chars().any(|c| RESERVED_CHARS.contains(&c)) {
        return Err(CatalogError::InvalidKey {
            key: key.to_string(),
            reason: "contains a reserved separator",
        });
    }
    if ConverterKind::ALL.iter().any(|kind| key.contains(kind.arrow())) {
        return Err(CatalogError::InvalidKey {
            key: key.to_string(),
            reason: "contains a converter arrow",
        });
    }
    Ok(())
}

fn longest_key(map: &HashMap<String, UnitRef>) -> usize {
    map.keys().map(|k| k.chars().count()).max().unwrap_or(0)
}

/// Immutable catalog. Frozen after [`CatalogBuilder::build`].
#[derive(Debug)]
pub struct Catalog {
    units: Vec<UnitRef>,
    ordinary: HashMap<String, UnitRef>,
    donation: HashMap<String, UnitRef>,
    max_ordinary_key_chars: usize,
    max_donation_key_chars: usize,
    technologies: HashMap<String, Arc<Technology>>,
}

impl Catalog {
    /// The built-in catalog of base game and expansion units and technologies.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    pub fn unit(&self, partition: Partition, key: &str) -> Option<&UnitRef> {
        self.partition_map(partition).get(key)
    }

    /// Find the longest key of `partition` that prefixes `rest`.
    ///
    /// Returns the unit and the byte length of the matched key.
    pub fn match_key(&self, partition: Partition, rest: &str) -> Option<(&UnitRef, usize)> {
        let map = self.partition_map(partition);
        let max_chars = match partition {
            Partition::Ordinary => self.max_ordinary_key_chars,
            Partition::Donation => self.max_donation_key_chars,
        };
        rest.char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(rest.len()))
            .take(max_chars)
            .filter_map(|end| map.get(&rest[..end]).map(|unit| (unit, end)))
            .last()
    }

    /// Look up a technology by its exact printed name.
    pub fn technology(&self, name: &str) -> Result<Arc<Technology>, UnknownLiteral> {
        self.technologies
            .get(name)
            .cloned()
            .ok_or_else(|| UnknownLiteral::new("technology", name))
    }

    /// Resolve a comma-separated list of technology names. The first unknown
    /// name aborts the whole batch.
    pub fn technologies_from_str(&self, s: &str) -> Result<Vec<Arc<Technology>>, UnknownLiteral> {
        s.split(',').map(|name| self.technology(name)).collect()
    }

    pub fn units(&self) -> impl Iterator<Item = &UnitRef> {
        self.units.iter()
    }

    pub fn technologies(&self) -> impl Iterator<Item = &Arc<Technology>> {
        self.technologies.values()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn technology_count(&self) -> usize {
        self.technologies.len()
    }

    fn partition_map(&self, partition: Partition) -> &HashMap<String, UnitRef> {
        match partition {
            Partition::Ordinary => &self.ordinary,
            Partition::Donation => &self.donation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unit key must not be empty")]
    EmptyKey,
    #[error("invalid unit key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },
    #[error("duplicate {partition:?} unit key '{key}'")]
    DuplicateKey { key: String, partition: Partition },
    #[error("duplicate technology name '{0}'")]
    DuplicateTechnology(String),
}

// ---------------------------------------------------------------------------
// Standard catalog
// ---------------------------------------------------------------------------

const SMALL: Option<f64> = Some(1.0);
const LARGE: Option<f64> = Some(1.5);
const ULTRATECH: Option<f64> = Some(3.0);
const SHIP: Option<f64> = Some(1.0);
const VICTORY_POINT: Option<f64> = Some(3.0);

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| {
    let mut b = CatalogBuilder::new();
    register_standard_units(&mut b);
    register_standard_technologies(&mut b);
    match b.build() {
        Ok(catalog) => catalog,
        Err(e) => unreachable!("standard catalog is statically valid: {e}"),
    }
});

fn register_standard_units(b: &mut CatalogBuilder) {
    // Colonies
    b.unit("N", "Any colony", false, None)
        .unit("D", "Desert colony", false, None)
        .unit("I", "Ice colony", false, None)
        .unit("J", "Jungle colony", false, None)
        .unit("W", "Ocean colony", false, None);

    // Valuable units
    b.unit("U", "Ultratech", false, ULTRATECH)
        .unit("*", "Ship", false, SHIP)
        .unit("$", "Victory point", false, VICTORY_POINT)
        .unit("Y", "Yellow cube", false, LARGE)
        .unit("T", "Blue cube", false, LARGE)
        .unit("B", "Black cube", false, LARGE)
        .unit("w", "White cube", false, SMALL)
        .unit("b", "Brown cube", false, SMALL)
        .unit("g", "Green cube", false, SMALL)
        .unit("L", "Any large cube", false, LARGE)
        .unit("s", "Any small cube", false, SMALL)
        .unit("a", "Small wild cube", false, SMALL)
        .unit("A", "Large wild cube", false, LARGE)
        .unit("K", "Kt'Zr'Kt'Rtl Ultratech cost", false, ULTRATECH);

    // Tokens without a trade value
    b.unit("Z", "Envoy", false, None)
        .unit("F", "Fleet support", false, None)
        .unit("R", "Relic world", false, None)
        .unit("½", "Service token", false, None)
        .unit("o", "Small orbital factory", false, None)
        .unit("O", "Large orbital factory", false, None)
        .unit("X", "Sharing bonus", false, None);

    // Donations
    b.unit("U", "Ultratech (donation)", true, ULTRATECH)
        .unit("*", "Ship (donation)", true, SHIP)
        .unit("$", "Victory point (donation)", true, VICTORY_POINT)
        .unit("Y", "Yellow cube (donation)", true, LARGE)
        .unit("T", "Blue cube (donation)", true, LARGE)
        .unit("B", "Black cube (donation)", true, LARGE)
        .unit("w", "White cube (donation)", true, SMALL)
        .unit("b", "Brown cube (donation)", true, SMALL)
        .unit("g", "Green cube (donation)", true, SMALL)
        .unit("L", "Any large cube (donation)", true, LARGE)
        .unit("s", "Any small cube (donation)", true, SMALL)
        .unit("a", "Small wild cube (donation)", true, SMALL)
        .unit("A", "Large wild cube (donation)", true, LARGE)
        .unit("Z", "Envoy (donation)", true, None);
}

const ERA_I: [&str; 7] = [
    "Nanotechnology",
    "Genetic Engineering",
    "Atomic Transmutation",
    "Clinical Immortality",
    "Ubiquitous Cultural Repository",
    "Quantum Computers",
    "Universal Translator",
];

const ERA_II: [&str; 7] = [
    "Hyperspace Mining",
    "Singularity Control",
    "Antimatter Power",
    "Achronal Analysis",
    "Organic Construction",
    "Cross Species Ethical Equality",
    "Interspecies Medical Exchange",
];

const ERA_III: [&str; 7] = [
    "Social Exodus",
    "Galactic Telecomm Control",
    "Xeno Cultural Exchange",
    "Poly Species Corporations",
    "Megastructures",
    "Matter Generation",
    "Temporal Dilation",
];

fn register_standard_technologies(b: &mut CatalogBuilder) {
    // Era I and II technologies can also be donated; era III cannot.
    for (era, names) in [(Era::I, &ERA_I), (Era::II, &ERA_II)] {
        for name in names {
            b.technology(name, era, false)
                .technology(&format!("+{name}"), era, true);
        }
    }
    for name in &ERA_III {
        b.technology(name, Era::III, false);
    }
}
