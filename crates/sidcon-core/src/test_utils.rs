//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available everywhere a test needs them (via the `test-utils` feature).
//! Every helper resolves against [`Catalog::standard`] and panics on a bad
//! fixture, which is the behaviour tests want.

use crate::bundle::CountedBundle;
use crate::catalog::Catalog;
use crate::converter::{Converter, ConverterKind};
use crate::feature::Feature;
use crate::fixed::Value;
use crate::unit::{Partition, UnitRef};

// ===========================================================================
// Value helper
// ===========================================================================

pub fn value(v: f64) -> Value {
    Value::from_num(v)
}

// ===========================================================================
// Unit constructors
// ===========================================================================

pub fn standard() -> &'static Catalog {
    Catalog::standard()
}

/// An ordinary unit from the standard catalog.
pub fn unit(key: &str) -> UnitRef {
    standard()
        .unit(Partition::Ordinary, key)
        .cloned()
        .unwrap_or_else(|| panic!("no ordinary unit with key '{key}'"))
}

/// A donation unit from the standard catalog.
pub fn donation(key: &str) -> UnitRef {
    standard()
        .unit(Partition::Donation, key)
        .cloned()
        .unwrap_or_else(|| panic!("no donation unit with key '{key}'"))
}

pub fn white() -> UnitRef {
    unit("w")
}
pub fn brown() -> UnitRef {
    unit("b")
}
pub fn green() -> UnitRef {
    unit("g")
}
pub fn blue() -> UnitRef {
    unit("T")
}
pub fn ultratech() -> UnitRef {
    unit("U")
}
pub fn victory_point() -> UnitRef {
    unit("$")
}

// ===========================================================================
// Bundle and converter constructors
// ===========================================================================

pub fn bundle(counts: &[(UnitRef, u32)]) -> CountedBundle {
    counts.iter().cloned().collect()
}

/// Parse bundle notation, panicking on failure.
pub fn parse_bundle(s: &str) -> CountedBundle {
    CountedBundle::parse(standard(), s)
        .unwrap_or_else(|e| panic!("bad bundle fixture '{s}': {e}"))
}

/// Parse converter notation of the given kind, panicking on failure.
pub fn converter(kind: ConverterKind, s: &str) -> Converter {
    Converter::parse(standard(), kind, s)
        .unwrap_or_else(|e| panic!("bad converter fixture '{s}': {e}"))
}

/// Parse a purple (`→`) converter.
pub fn purple(s: &str) -> Converter {
    converter(ConverterKind::Purple, s)
}

/// Parse a feature cell, panicking on failure.
pub fn feature(s: &str) -> Feature {
    Feature::parse(standard(), s).unwrap_or_else(|e| panic!("bad feature fixture '{s}': {e}"))
}
