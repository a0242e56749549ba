//! Upgrade conditions: what a face needs before it can flip to a later face.

use crate::catalog::Catalog;
use crate::converter::{Converter, ConverterError, ConverterKind};
use crate::literal::{FactionSpecificCondition, UnknownLiteral};
use crate::merge::{Merge, MergeError};
use crate::technology::Technology;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// No interpretation of an upgrade string succeeded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse an upgrade from '{input}'")]
pub struct UpgradeParseError {
    pub input: String,
    #[source]
    pub technology: UnknownLiteral,
    pub converter: ConverterError,
    pub condition: UnknownLiteral,
}

impl UpgradeParseError {
    /// The failure of every stage, in resolution order.
    pub fn causes(&self) -> [&(dyn Error + Send + Sync + 'static); 3] {
        [&self.technology, &self.converter, &self.condition]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upgrade {
    /// Always a purple converter: the upgrade is paid for out of trade.
    Converter(Converter),
    Technology(Arc<Technology>),
    Condition(FactionSpecificCondition),
}

impl Upgrade {
    /// Resolve `s` as a technology name, then a purple converter, then a
    /// faction-specific condition.
    pub fn parse(catalog: &Catalog, s: &str) -> Result<Self, UpgradeParseError> {
        let technology = match catalog.technology(s) {
            Ok(technology) => return Ok(Upgrade::Technology(technology)),
            Err(e) => e,
        };
        let converter = match Converter::parse(catalog, ConverterKind::Purple, s) {
            Ok(converter) => return Ok(Upgrade::Converter(converter)),
            Err(e) => e,
        };
        trace!(input = s, error = %converter, "not a purple converter, trying condition");
        let condition = match FactionSpecificCondition::parse(s) {
            Ok(condition) => return Ok(Upgrade::Condition(condition)),
            Err(e) => e,
        };
        Err(UpgradeParseError {
            input: s.to_string(),
            technology,
            converter,
            condition,
        })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Upgrade::Converter(c) => c.kind().name(),
            Upgrade::Technology(_) => "technology",
            Upgrade::Condition(_) => "faction-specific condition",
        }
    }
}

/// Only two converter upgrades merge.
impl Merge for Upgrade {
    fn merge(&self, other: &Self) -> Result<Self, MergeError> {
        match (self, other) {
            (Upgrade::Converter(a), Upgrade::Converter(b)) => a.merge(b).map(Upgrade::Converter),
            _ => Err(MergeError::UnmergeableTypes {
                left: self.type_name(),
                right: other.type_name(),
            }),
        }
    }
}

impl fmt::Display for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upgrade::Converter(c) => write!(f, "{c}"),
            Upgrade::Technology(t) => write!(f, "{t}"),
            Upgrade::Condition(c) => write!(f, "{c}"),
        }
    }
}
