//! Card costs: the price printed in a card's cost cell.

use crate::catalog::Catalog;
use crate::converter::{Converter, ConverterError, ConverterKind};
use crate::literal::{FactionSpecificCost, UnknownLiteral};
use crate::technology::Technology;
use std::error::Error;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse a cost from '{input}'")]
pub struct CostParseError {
    pub input: String,
    #[source]
    pub faction: UnknownLiteral,
    pub converter: ConverterError,
    pub technologies: UnknownLiteral,
}

impl CostParseError {
    pub fn causes(&self) -> [&(dyn Error + Send + Sync + 'static); 3] {
        [&self.faction, &self.converter, &self.technologies]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cost {
    Converter(Converter),
    Technologies(Vec<Arc<Technology>>),
    FactionSpecific(FactionSpecificCost),
}

impl Cost {
    /// Resolve `s` as a faction-specific cost, then a purple converter, then
    /// a comma-separated list of technology names.
    pub fn parse(catalog: &Catalog, s: &str) -> Result<Self, CostParseError> {
        let faction = match FactionSpecificCost::parse(s) {
            Ok(cost) => return Ok(Cost::FactionSpecific(cost)),
            Err(e) => e,
        };
        let converter = match Converter::parse(catalog, ConverterKind::Purple, s) {
            Ok(converter) => return Ok(Cost::Converter(converter)),
            Err(e) => e,
        };
        let technologies = match catalog.technologies_from_str(s) {
            Ok(technologies) => return Ok(Cost::Technologies(technologies)),
            Err(e) => e,
        };
        Err(CostParseError {
            input: s.to_string(),
            faction,
            converter,
            technologies,
        })
    }
}
