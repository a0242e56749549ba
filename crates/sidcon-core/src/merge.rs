//! Combining the parsed halves of a composite card.
//!
//! Some cards are printed as two halves that only make sense together. Each
//! half parses into its own features, and the halves are merged position by
//! position into the features of the combined card.

use crate::converter::Converter;
use crate::feature::Feature;
use crate::literal::UniqueFeature;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("cannot merge a {left} with a {right}")]
    UnmergeableTypes { left: &'static str, right: &'static str },

    #[error("cannot merge unique features '{left}' and '{right}'")]
    UnmergeableUniqueFeature { left: UniqueFeature, right: UniqueFeature },

    #[error("cannot merge converter outputs '{left}' and '{right}'")]
    UnmergeableOutputs { left: String, right: String },

    #[error("cannot merge feature sequences of length {left} and {right}")]
    MismatchedSequenceLength { left: usize, right: usize },
}

/// Values that can be combined into one of the same type.
pub trait Merge: Sized {
    fn merge(&self, other: &Self) -> Result<Self, MergeError>;
}

/// Merge two feature lists position by position.
///
/// When a converter on the left meets a bare bundle on the right, the bundle
/// is read as a free converter of the same kind; the second half of a card
/// prints the arrow only once.
pub fn merge_sequences(left: &[Feature], right: &[Feature]) -> Result<Vec<Feature>, MergeError> {
    if left.len() != right.len() {
        return Err(MergeError::MismatchedSequenceLength {
            left: left.len(),
            right: right.len(),
        });
    }
    left.iter()
        .zip(right)
        .map(|(l, r)| match (l, r) {
            (Feature::Converter(c), Feature::Bundle(b)) => {
                let lifted = Converter::free(c.kind(), b.clone());
                c.merge(&lifted).map(Feature::Converter)
            }
            _ => l.merge(r),
        })
        .collect()
}
