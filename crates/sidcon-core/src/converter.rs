//! Directional production rules (`inputs ARROW outputs`).
//!
//! Three converter kinds share the same grammar and differ only in the arrow
//! that separates the two sides. The kinds never interoperate: a white
//! converter cannot merge with a purple one.

use crate::alternatives::Alternatives;
use crate::bundle::{BundleError, CountedBundle};
use crate::catalog::Catalog;
use crate::fixed::Value;
use crate::literal::{UniqueOutput, UnknownLiteral};
use crate::merge::{Merge, MergeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

// ---------------------------------------------------------------------------
// ConverterKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConverterKind {
    White,
    Purple,
    Red,
}

impl ConverterKind {
    /// Resolution order used by [`Converter::parse_any`].
    pub const ALL: [ConverterKind; 3] = [
        ConverterKind::White,
        ConverterKind::Purple,
        ConverterKind::Red,
    ];

    pub fn arrow(self) -> char {
        match self {
            ConverterKind::White => '➪',
            ConverterKind::Purple => '→',
            ConverterKind::Red => '➾',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConverterKind::White => "white converter",
            ConverterKind::Purple => "purple converter",
            ConverterKind::Red => "red converter",
        }
    }
}

impl fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which side of a converter a value was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Inputs,
    Outputs,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Inputs => f.write_str("inputs"),
            Side::Outputs => f.write_str("outputs"),
        }
    }
}

/// The output side matched neither a unique output nor bundle notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is neither a unique output ({unique}) nor bundle notation ({bundle})")]
pub struct OutputsParseError {
    pub input: String,
    pub unique: UnknownLiteral,
    pub bundle: BundleError,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConverterError {
    #[error("unable to find required '{arrow}' in '{input}'")]
    NoMatchingArrow { input: String, arrow: char },

    #[error("'{input}' contains no converter arrow")]
    NoKnownArrow { input: String },

    #[error("invalid converter inputs: {0}")]
    Inputs(BundleError),

    #[error("invalid converter outputs: {0}")]
    Outputs(OutputsParseError),

    #[error("converter {side} offer a choice and have no unambiguous value")]
    AmbiguousValue { side: Side },
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Output {
    Bundle(CountedBundle),
    Unique(UniqueOutput),
}

impl Output {
    /// Bundle value; a unique output is worth nothing.
    pub fn value(&self) -> Value {
        match self {
            Output::Bundle(bundle) => bundle.value(),
            Output::Unique(_) => Value::ZERO,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Bundle(bundle) => write!(f, "{bundle}"),
            Output::Unique(unique) => write!(f, "{unique}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Converter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Converter {
    kind: ConverterKind,
    inputs: Alternatives<CountedBundle>,
    outputs: Alternatives<Output>,
}

impl Converter {
    pub fn new(
        kind: ConverterKind,
        inputs: Alternatives<CountedBundle>,
        outputs: Alternatives<Output>,
    ) -> Self {
        Self {
            kind,
            inputs,
            outputs,
        }
    }

    /// A converter that costs nothing and yields `bundle`.
    pub fn free(kind: ConverterKind, bundle: CountedBundle) -> Self {
        Self::new(
            kind,
            Alternatives::Single(CountedBundle::new()),
            Alternatives::Single(Output::Bundle(bundle)),
        )
    }

    /// Parse `inputs ARROW outputs` for a known kind.
    pub fn parse(catalog: &Catalog, kind: ConverterKind, s: &str) -> Result<Self, ConverterError> {
        let arrow = kind.arrow();
        let Some((inputs, outputs)) = s.split_once(arrow) else {
            return Err(ConverterError::NoMatchingArrow {
                input: s.to_string(),
                arrow,
            });
        };
        let inputs = Self::inputs_from_str(catalog, inputs)?;
        let outputs = Self::outputs_from_str(catalog, outputs)?;
        Ok(Self::new(kind, inputs, outputs))
    }

    /// Parse a converter of whichever kind's arrow appears in `s`.
    ///
    /// Kinds are tried in [`ConverterKind::ALL`] order. A kind whose arrow is
    /// present but whose sides fail to parse ends the search with that error.
    pub fn parse_any(catalog: &Catalog, s: &str) -> Result<Self, ConverterError> {
        for kind in ConverterKind::ALL {
            match Self::parse(catalog, kind, s) {
                Err(ConverterError::NoMatchingArrow { .. }) => {
                    trace!(%kind, input = s, "arrow absent");
                }
                other => return other,
            }
        }
        Err(ConverterError::NoKnownArrow { input: s.to_string() })
    }

    /// Input side: one bundle, or `/`-separated alternatives.
    pub fn inputs_from_str(
        catalog: &Catalog,
        s: &str,
    ) -> Result<Alternatives<CountedBundle>, ConverterError> {
        Alternatives::parse_with(s, |piece| CountedBundle::parse(catalog, piece))
            .map_err(ConverterError::Inputs)
    }

    /// Output side: a unique output literal, otherwise the input grammar.
    pub fn outputs_from_str(
        catalog: &Catalog,
        s: &str,
    ) -> Result<Alternatives<Output>, ConverterError> {
        let unique = match UniqueOutput::parse(s) {
            Ok(unique) => return Ok(Alternatives::Single(Output::Unique(unique))),
            Err(e) => e,
        };
        trace!(input = s, "not a unique output");
        Alternatives::parse_with(s, |piece| {
            CountedBundle::parse(catalog, piece).map(Output::Bundle)
        })
        .map_err(|bundle| {
            ConverterError::Outputs(OutputsParseError {
                input: s.to_string(),
                unique,
                bundle,
            })
        })
    }

    pub fn kind(&self) -> ConverterKind {
        self.kind
    }

    pub fn inputs(&self) -> &Alternatives<CountedBundle> {
        &self.inputs
    }

    pub fn outputs(&self) -> &Alternatives<Output> {
        &self.outputs
    }

    // -- Values ------------------------------------------------------------

    pub fn input_value(&self) -> Result<Value, ConverterError> {
        self.inputs
            .single()
            .map(CountedBundle::value)
            .ok_or(ConverterError::AmbiguousValue { side: Side::Inputs })
    }

    pub fn output_value(&self) -> Result<Value, ConverterError> {
        self.outputs
            .single()
            .map(Output::value)
            .ok_or(ConverterError::AmbiguousValue { side: Side::Outputs })
    }

    pub fn min_input_value(&self) -> Value {
        self.inputs.iter().map(CountedBundle::value).min().unwrap_or(Value::ZERO)
    }

    pub fn max_input_value(&self) -> Value {
        self.inputs.iter().map(CountedBundle::value).max().unwrap_or(Value::ZERO)
    }

    pub fn min_output_value(&self) -> Value {
        self.outputs.iter().map(Output::value).min().unwrap_or(Value::ZERO)
    }

    pub fn max_output_value(&self) -> Value {
        self.outputs.iter().map(Output::value).max().unwrap_or(Value::ZERO)
    }

    /// Output value minus input value. Both sides must be unambiguous.
    pub fn net_value(&self) -> Result<Value, ConverterError> {
        Ok(self.output_value()?.saturating_sub(self.input_value()?))
    }

    /// Worst case: cheapest output against the dearest input.
    pub fn min_net_value(&self) -> Value {
        self.min_output_value().saturating_sub(self.max_input_value())
    }

    /// Best case: dearest output against the cheapest input.
    pub fn max_net_value(&self) -> Value {
        self.max_output_value().saturating_sub(self.min_input_value())
    }

    // -- Merging -----------------------------------------------------------

    /// Sum two input sides. Alternatives broadcast to their Cartesian product.
    pub fn merge_inputs(&self, other: &Converter) -> Alternatives<CountedBundle> {
        let Ok(merged) = self
            .inputs
            .product_with(&other.inputs, |a, b| Ok::<_, std::convert::Infallible>(a.add(b)));
        merged
    }

    /// Sum two output sides. Every combined pair must be bundle + bundle.
    pub fn merge_outputs(&self, other: &Converter) -> Result<Alternatives<Output>, MergeError> {
        self.outputs.product_with(&other.outputs, |a, b| match (a, b) {
            (Output::Bundle(a), Output::Bundle(b)) => Ok(Output::Bundle(a.add(b))),
            _ => Err(MergeError::UnmergeableOutputs {
                left: a.to_string(),
                right: b.to_string(),
            }),
        })
    }
}

impl Merge for Converter {
    fn merge(&self, other: &Self) -> Result<Self, MergeError> {
        if self.kind != other.kind {
            return Err(MergeError::UnmergeableTypes {
                left: self.kind.name(),
                right: other.kind.name(),
            });
        }
        Ok(Converter::new(self.kind, self.merge_inputs(other), self.merge_outputs(other)?))
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.inputs, self.kind.arrow(), self.outputs)
    }
}
