//! Closed sets of symbolic tokens that never take part in bundle arithmetic.
//!
//! Each set is matched against a whole cell by exact string comparison.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A string matched no member of a closed literal set (or no catalog name).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not a known {kind}")]
pub struct UnknownLiteral {
    pub kind: &'static str,
    pub input: String,
}

impl UnknownLiteral {
    pub fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}

macro_rules! literal_set {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The exact printed text of this literal.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            pub fn parse(s: &str) -> Result<Self, UnknownLiteral> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|literal| literal.as_str() == s)
                    .ok_or_else(|| UnknownLiteral::new($kind, s))
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownLiteral;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

literal_set! {
    /// A converter output with no numeric content.
    UniqueOutput, "unique converter output" {
        DoubleOutputThenDiscard => "double output; then discard",
    }
}

literal_set! {
    /// A named card ability that is neither a converter nor a bundle.
    UniqueFeature, "unique feature" {
        PlusOneColonySupportThisTurn => "+1 Colony Support This Turn",
        ContextualIntegratorCacheVps => "Variable $",
        ContextualIntegratorCacheAcknowledgementUpgrade => "Ack* upgraded",
        DrawTwoColoniesFromDeck => "+2 colonies from deck",
        UndesirableLimitThree => "Undesirable Limit: 3",
        UndesirableLimitFive => "Undesirable Limit: 5",
        NineTieBreaker => "9 Tie Breaker",
        PlusOneToADie => "+1 to a die",
        MinusOneToADie => "-1 to a die",
        MayNotUseGreen => "may not use g",
        MayNotUseBrown => "may not use b",
        MayNotUseWhite => "may not use w",
        MayNotUseYellow => "may not use Y",
        MayNotUseBlack => "may not use B",
        MayNotUseBlue => "may not use T",
        MayNotUseUltratech => "may not use U",
    }
}

literal_set! {
    /// A faction-only trigger that upgrades a face.
    FactionSpecificCondition, "faction-specific upgrade condition" {
        // Deep Unity
        Triples => "Dice triples",
        DoubleZeroes => "Die double 0s",
        DoubleOnes => "Die double 1s",
        DoubleTwos => "Die double 2s",
        DoubleThrees => "Die double 3s",
        DoubleFours => "Die double 4s",
        DoubleFives => "Die double 5s",
        DoubleSixes => "Die double 6s",
        DoubleSevens => "Die double 7s",
        // Charity Syndicate
        CrossColonization => "Cross-Colonization",
        // Kt Technophiles
        TechInvention => "Tech invention",
    }
}

literal_set! {
    /// A faction-only price printed in a card's cost cell.
    FactionSpecificCost, "faction-specific cost" {
        // Deep Unity
        NotTriples => "Dice not triples",
        SingleZero => "Die 0",
        SingleOne => "Die 1",
        SingleTwo => "Die 2",
        SingleThree => "Die 3",
        SingleFour => "Die 4",
        SingleFive => "Die 5",
        SingleSix => "Die 6",
        SingleSeven => "Die 7",
        // Caylion Collaborative
        ThreeVotes => "3 votes",
        FourVotes => "4 votes",
        FiveVotes => "5 votes",
        SixVotes => "6 votes",
        // Yengii Jii
        JiiConstraint => "Jii Constraint",
    }
}
