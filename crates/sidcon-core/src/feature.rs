//! Card features: the abilities printed on one face of a card.
//!
//! A feature cell is resolved by trying each interpretation in a fixed order
//! (unique feature, converter, bundle). The first that parses wins; if none
//! does, every cause is kept so the closest interpretation can be diagnosed.

use crate::bundle::{BundleError, CountedBundle};
use crate::catalog::Catalog;
use crate::converter::{Converter, ConverterError, ConverterKind};
use crate::fixed::Value;
use crate::literal::{UniqueFeature, UnknownLiteral};
use crate::merge::{Merge, MergeError};
use std::error::Error;
use std::fmt;
use tracing::trace;

/// Separates features that share one spreadsheet cell.
pub const FEATURE_SEPARATOR: char = ',';

/// Split a cell into feature strings, dropping empty pieces.
pub fn split_cell(s: &str) -> Vec<&str> {
    s.split(FEATURE_SEPARATOR).filter(|piece| !piece.is_empty()).collect()
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// No interpretation of a feature string succeeded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse a feature from '{input}'")]
pub struct FeatureParseError {
    pub input: String,
    #[source]
    pub unique: UnknownLiteral,
    pub converter: ConverterError,
    pub bundle: BundleError,
}

impl FeatureParseError {
    /// The failure of every stage, in resolution order.
    pub fn causes(&self) -> [&(dyn Error + Send + Sync + 'static); 3] {
        [&self.unique, &self.converter, &self.bundle]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureValueError {
    #[error("unique feature '{0}' has no value")]
    NoValue(UniqueFeature),

    #[error(transparent)]
    Converter(#[from] ConverterError),
}

// ---------------------------------------------------------------------------
// Feature
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Feature {
    Converter(Converter),
    Bundle(CountedBundle),
    Unique(UniqueFeature),
}

impl Feature {
    pub fn parse(catalog: &Catalog, s: &str) -> Result<Self, FeatureParseError> {
        let unique = match UniqueFeature::parse(s) {
            Ok(unique) => return Ok(Feature::Unique(unique)),
            Err(e) => e,
        };
        let converter = match Converter::parse_any(catalog, s) {
            Ok(converter) => return Ok(Feature::Converter(converter)),
            Err(e) => e,
        };
        trace!(input = s, error = %converter, "not a converter, trying bundle");
        let bundle = match CountedBundle::parse(catalog, s) {
            Ok(bundle) => return Ok(Feature::Bundle(bundle)),
            Err(e) => e,
        };
        Err(FeatureParseError {
            input: s.to_string(),
            unique,
            converter,
            bundle,
        })
    }

    /// Parse every feature of a comma-separated cell. The first failure
    /// aborts the cell.
    pub fn parse_cell(catalog: &Catalog, s: &str) -> Result<Vec<Self>, FeatureParseError> {
        split_cell(s)
            .into_iter()
            .map(|piece| Self::parse(catalog, piece))
            .collect()
    }

    /// Short name of the variant, used in merge errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Feature::Converter(c) => c.kind().name(),
            Feature::Bundle(_) => "bundle",
            Feature::Unique(_) => "unique feature",
        }
    }

    // -- Values ------------------------------------------------------------
    //
    // A bare bundle is valued as a converter that costs nothing.

    pub fn input_value(&self) -> Result<Value, FeatureValueError> {
        Ok(self.valued(Converter::input_value)??)
    }

    pub fn output_value(&self) -> Result<Value, FeatureValueError> {
        Ok(self.valued(Converter::output_value)??)
    }

    pub fn net_value(&self) -> Result<Value, FeatureValueError> {
        Ok(self.valued(Converter::net_value)??)
    }

    pub fn min_input_value(&self) -> Result<Value, FeatureValueError> {
        self.valued(Converter::min_input_value)
    }

    pub fn max_input_value(&self) -> Result<Value, FeatureValueError> {
        self.valued(Converter::max_input_value)
    }

    pub fn min_output_value(&self) -> Result<Value, FeatureValueError> {
        self.valued(Converter::min_output_value)
    }

    pub fn max_output_value(&self) -> Result<Value, FeatureValueError> {
        self.valued(Converter::max_output_value)
    }

    pub fn min_net_value(&self) -> Result<Value, FeatureValueError> {
        self.valued(Converter::min_net_value)
    }

    pub fn max_net_value(&self) -> Result<Value, FeatureValueError> {
        self.valued(Converter::max_net_value)
    }

    fn valued<T>(&self, f: impl FnOnce(&Converter) -> T) -> Result<T, FeatureValueError> {
        match self {
            Feature::Converter(c) => Ok(f(c)),
            Feature::Bundle(b) => Ok(f(&Converter::free(ConverterKind::White, b.clone()))),
            Feature::Unique(u) => Err(FeatureValueError::NoValue(*u)),
        }
    }
}

impl Merge for Feature {
    fn merge(&self, other: &Self) -> Result<Self, MergeError> {
        match (self, other) {
            (Feature::Converter(a), Feature::Converter(b)) => a.merge(b).map(Feature::Converter),
            (Feature::Bundle(a), Feature::Bundle(b)) => Ok(Feature::Bundle(a.add(b))),
            (Feature::Unique(a), Feature::Unique(b)) => Err(MergeError::UnmergeableUniqueFeature {
                left: *a,
                right: *b,
            }),
            _ => Err(MergeError::UnmergeableTypes {
                left: self.type_name(),
                right: other.type_name(),
            }),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Converter(c) => write!(f, "{c}"),
            Feature::Bundle(b) => write!(f, "{b}"),
            Feature::Unique(u) => write!(f, "{u}"),
        }
    }
}
