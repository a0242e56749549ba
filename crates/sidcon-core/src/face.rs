//! Card faces: the features printed on one side of a card and the upgrade
//! edges leading to later faces.
//!
//! Faces form a DAG. An upgrade edge holds its target by `Arc`, so a face that
//! several edges lead to is stored once.

use crate::catalog::Catalog;
use crate::converter::Converter;
use crate::feature::{Feature, FeatureParseError, FeatureValueError};
use crate::fixed::Value;
use crate::merge::{merge_sequences, MergeError};
use crate::technology::Era;
use crate::upgrade::{Upgrade, UpgradeParseError};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FaceError {
    #[error("face name must not be empty")]
    EmptyName,

    #[error("face '{name}' must have at least one feature")]
    NoFeatures { name: String },

    #[error("'{0}' is not an era")]
    InvalidEra(String),

    #[error(transparent)]
    Feature(#[from] FeatureParseError),

    #[error(transparent)]
    Upgrade(#[from] UpgradeParseError),

    #[error("face '{name}' has no unambiguous single upgrade")]
    NoSingleUpgrade { name: String },

    #[error("face '{name}' has no unambiguous single converter")]
    NoSingleConverter { name: String },

    #[error("face '{name}' has multiple features and no unambiguous value")]
    MultipleFeatures { name: String },

    #[error("face '{name}': {source}")]
    Value {
        name: String,
        source: FeatureValueError,
    },

    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Parse an era cell: empty for none, otherwise `1`..`4` or `I`..`IV`.
pub fn parse_era(s: &str) -> Result<Option<Era>, FaceError> {
    if s.is_empty() {
        return Ok(None);
    }
    let by_number = s.parse::<u8>().ok().and_then(Era::from_number);
    by_number
        .or_else(|| Era::ALL.into_iter().find(|era| era.to_string() == s))
        .map(Some)
        .ok_or_else(|| FaceError::InvalidEra(s.to_string()))
}

/// One way out of a face: meet every condition to flip to `face`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeEdge {
    pub era: Option<Era>,
    pub conditions: Vec<Upgrade>,
    pub face: Arc<Face>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    name: String,
    features: Vec<Feature>,
    upgrades: Vec<UpgradeEdge>,
}

impl Face {
    pub fn new(
        name: &str,
        features: Vec<Feature>,
        upgrades: Vec<UpgradeEdge>,
    ) -> Result<Self, FaceError> {
        if name.is_empty() {
            return Err(FaceError::EmptyName);
        }
        if features.is_empty() {
            return Err(FaceError::NoFeatures {
                name: name.to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            features,
            upgrades,
        })
    }

    /// Build a face from raw cells. Every upgrade edge shares the face's era.
    pub fn from_strings(
        catalog: &Catalog,
        name: &str,
        feature_strings: &[&str],
        era: &str,
        upgrades: &[(Vec<&str>, Arc<Face>)],
    ) -> Result<Self, FaceError> {
        let era = parse_era(era)?;
        let features = feature_strings
            .iter()
            .map(|s| Feature::parse(catalog, s))
            .collect::<Result<Vec<_>, _>>()?;
        let upgrades = upgrades
            .iter()
            .map(|(conditions, face)| -> Result<UpgradeEdge, FaceError> {
                let conditions = conditions
                    .iter()
                    .map(|s| Upgrade::parse(catalog, s))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(UpgradeEdge {
                    era,
                    conditions,
                    face: Arc::clone(face),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, features, upgrades)
    }

    /// Combine the two halves of a dual card. The result has no upgrades.
    pub fn merge(left: &Face, right: &Face) -> Result<Face, FaceError> {
        let features = merge_sequences(&left.features, &right.features)?;
        Face::new(&format!("{} {}", left.name, right.name), features, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn upgrades(&self) -> &[UpgradeEdge] {
        &self.upgrades
    }

    /// The era of the only upgrade edge.
    pub fn era(&self) -> Result<Option<Era>, FaceError> {
        match self.upgrades.as_slice() {
            [edge] => Ok(edge.era),
            _ => Err(FaceError::NoSingleUpgrade {
                name: self.name.clone(),
            }),
        }
    }

    /// The face's only feature, if it is a converter.
    pub fn converter(&self) -> Result<&Converter, FaceError> {
        match self.features.as_slice() {
            [Feature::Converter(c)] => Ok(c),
            _ => Err(FaceError::NoSingleConverter {
                name: self.name.clone(),
            }),
        }
    }

    pub fn input_value(&self) -> Result<Value, FaceError> {
        let feature = self.single_feature()?;
        feature.input_value().map_err(|source| self.value_error(source))
    }

    pub fn output_value(&self) -> Result<Value, FaceError> {
        let feature = self.single_feature()?;
        feature.output_value().map_err(|source| self.value_error(source))
    }

    pub fn min_input_value(&self) -> Result<Value, FaceError> {
        self.extreme(Feature::min_input_value, Iterator::min)
    }

    pub fn max_input_value(&self) -> Result<Value, FaceError> {
        self.extreme(Feature::max_input_value, Iterator::max)
    }

    pub fn min_output_value(&self) -> Result<Value, FaceError> {
        self.extreme(Feature::min_output_value, Iterator::min)
    }

    pub fn max_output_value(&self) -> Result<Value, FaceError> {
        self.extreme(Feature::max_output_value, Iterator::max)
    }

    fn single_feature(&self) -> Result<&Feature, FaceError> {
        match self.features.as_slice() {
            [feature] => Ok(feature),
            _ => Err(FaceError::MultipleFeatures {
                name: self.name.clone(),
            }),
        }
    }

    fn extreme<V, P>(&self, value: V, pick: P) -> Result<Value, FaceError>
    where
        V: Fn(&Feature) -> Result<Value, FeatureValueError>,
        P: FnOnce(std::vec::IntoIter<Value>) -> Option<Value>,
    {
        let values = self
            .features
            .iter()
            .map(|f| value(f).map_err(|source| self.value_error(source)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pick(values.into_iter()).unwrap_or(Value::ZERO))
    }

    fn value_error(&self, source: FeatureValueError) -> FaceError {
        FaceError::Value {
            name: self.name.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::UniqueFeature;
    use crate::test_utils::*;

    fn face(name: &str, features: &[&str]) -> Face {
        Face::from_strings(standard(), name, features, "", &[]).unwrap()
    }

    #[test]
    fn new_rejects_empty_name_and_features() {
        assert_eq!(
            Face::new("", vec![feature("w")], vec![]),
            Err(FaceError::EmptyName)
        );
        assert_eq!(
            Face::new("Bare", vec![], vec![]),
            Err(FaceError::NoFeatures {
                name: "Bare".to_string()
            })
        );
    }

    #[test]
    fn parse_era_cells() {
        assert_eq!(parse_era(""), Ok(None));
        assert_eq!(parse_era("2"), Ok(Some(Era::II)));
        assert_eq!(parse_era("III"), Ok(Some(Era::III)));
        assert_eq!(parse_era("5"), Err(FaceError::InvalidEra("5".to_string())));
    }

    #[test]
    fn from_strings_builds_upgrade_edges() {
        let back = Arc::new(face("Upgraded Mine", &["2w➪2b"]));
        let front = Face::from_strings(
            standard(),
            "Mine",
            &["w➪b"],
            "1",
            &[(vec!["Nanotechnology", "2g→"], Arc::clone(&back))],
        )
        .unwrap();

        assert_eq!(front.era(), Ok(Some(Era::I)));
        let edge = &front.upgrades()[0];
        assert_eq!(edge.conditions.len(), 2);
        assert!(matches!(edge.conditions[0], Upgrade::Technology(_)));
        assert!(Arc::ptr_eq(&edge.face, &back));
        assert!(back.era().is_err());
    }

    #[test]
    fn from_strings_propagates_parse_errors() {
        assert!(matches!(
            Face::from_strings(standard(), "Bad", &["2q"], "", &[]),
            Err(FaceError::Feature(_))
        ));
        let back = Arc::new(face("Back", &["w"]));
        assert!(matches!(
            Face::from_strings(standard(), "Bad", &["w"], "", &[(vec!["Warp"], back)]),
            Err(FaceError::Upgrade(_))
        ));
    }

    #[test]
    fn single_converter_access() {
        let f = face("Lab", &["2w➪$"]);
        assert_eq!(f.converter().unwrap().kind(), crate::converter::ConverterKind::White);
        assert_eq!(f.input_value().unwrap(), value(2.0));
        assert_eq!(f.output_value().unwrap(), value(3.0));

        let bundle_face = face("Stock", &["2w"]);
        assert!(bundle_face.converter().is_err());
    }

    #[test]
    fn multiple_features_have_only_extremes() {
        let f = face("Twin", &["w➪$", "2U➪Y"]);
        assert_eq!(
            f.input_value(),
            Err(FaceError::MultipleFeatures {
                name: "Twin".to_string()
            })
        );
        assert!(f.converter().is_err());
        assert_eq!(f.min_input_value().unwrap(), value(1.0));
        assert_eq!(f.max_input_value().unwrap(), value(6.0));
        assert_eq!(f.min_output_value().unwrap(), value(1.5));
        assert_eq!(f.max_output_value().unwrap(), value(3.0));
    }

    #[test]
    fn unique_feature_face_has_no_value() {
        let f = face("Oddity", &["9 Tie Breaker"]);
        assert_eq!(
            f.input_value(),
            Err(FaceError::Value {
                name: "Oddity".to_string(),
                source: FeatureValueError::NoValue(UniqueFeature::NineTieBreaker)
            })
        );
    }

    #[test]
    fn merge_dual_halves() {
        let left = face("Left", &["2w➪$", "U"]);
        let right = face("Right", &["b", "$"]);
        let merged = Face::merge(&left, &right).unwrap();
        assert_eq!(merged.name(), "Left Right");
        assert_eq!(merged.features(), &[feature("2w➪b$"), feature("U$")]);
        assert!(merged.upgrades().is_empty());
    }

    #[test]
    fn merge_mismatched_halves_fails() {
        let left = face("Left", &["2w➪$"]);
        let right = face("Right", &["b", "$"]);
        assert_eq!(
            Face::merge(&left, &right),
            Err(FaceError::Merge(MergeError::MismatchedSequenceLength {
                left: 1,
                right: 2
            }))
        );
    }
}
