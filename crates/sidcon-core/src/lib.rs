//! Sidcon Core -- parsing and arithmetic for trading-card economic notation.
//!
//! Cards describe their economy in compact cell notation such as `2w3b➪1$`.
//! This crate turns those strings into typed values that can be valued,
//! compared, and merged.
//!
//! # Notation
//!
//! - `2w3b` -- a bundle: counts followed by unit keys.
//! - `2w+U` -- everything after `+` is a donation.
//! - `w/b` -- a choice between alternatives.
//! - `w➪$`, `w→$`, `w➾$` -- white, purple, and red converters.
//! - `a,b` -- several features in one cell.
//!
//! ```rust,ignore
//! let catalog = Catalog::standard();
//! let converter = Converter::parse_any(catalog, "2w➪1$")?;
//! assert_eq!(converter.net_value()?, Value::from_num(1));
//! ```
//!
//! # Key Types
//!
//! - [`catalog::Catalog`] -- Immutable unit and technology lookup, frozen
//!   after [`catalog::CatalogBuilder::build`].
//! - [`bundle::CountedBundle`] -- Counted multiset of units with add,
//!   subtract, and value.
//! - [`converter::Converter`] -- Directional rule with alternative inputs
//!   and outputs.
//! - [`feature::Feature`], [`upgrade::Upgrade`], [`cost::Cost`] -- Fallback
//!   resolution of card cells, keeping every failed stage's cause.
//! - [`merge::Merge`] -- Combining the halves of a composite card.
//! - [`face::Face`] -- One side of a card with its upgrade edges.
//! - [`fixed::Value`] -- Q32.32 fixed-point unit value.

pub mod alternatives;
pub mod bundle;
pub mod catalog;
pub mod converter;
pub mod cost;
pub mod face;
pub mod feature;
pub mod fixed;
pub mod literal;
pub mod merge;
pub mod technology;
pub mod unit;
pub mod upgrade;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
