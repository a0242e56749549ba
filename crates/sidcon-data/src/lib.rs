//! Sidcon Data -- catalogs of units and technologies loaded from data files.
//!
//! A catalog directory holds `units.{ron,toml,json}` and, optionally,
//! `technologies.{ron,toml,json}`. The loader validates the entries and
//! freezes them into a [`sidcon_core::catalog::Catalog`].

pub mod loader;
pub mod schema;

pub use loader::{load_catalog, DataFile, DataLoadError};
