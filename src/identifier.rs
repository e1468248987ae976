//! Numeric record identifiers shared by the project and identity contexts.
//!
//! Records arrive from document stores where an id may be written either as
//! a JSON number or as a string holding a number. Both forms are accepted at
//! ingestion and coerced to a single numeric representation; anything else is
//! rejected there, so code downstream of deserialisation only ever compares
//! typed identifiers.

use serde::Deserialize;
use thiserror::Error;

/// Error returned when a raw identifier is not a non-negative integer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {kind} identifier: {value}")]
pub struct InvalidIdentifier {
    /// Kind of record the identifier belongs to.
    pub kind: &'static str,
    /// The rejected raw value.
    pub value: String,
}

/// Identifier as it appears in a stored document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawIdentifier {
    /// JSON number.
    Number(u64),
    /// JSON string expected to hold a number.
    Text(String),
}

impl RawIdentifier {
    /// Coerces the raw value into a numeric identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifier`] when a textual value is not a
    /// non-negative integer.
    pub fn into_value(self, kind: &'static str) -> Result<u64, InvalidIdentifier> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) => parse_identifier(kind, &text),
        }
    }
}

/// Parses a textual identifier, tolerating surrounding whitespace.
pub(crate) fn parse_identifier(kind: &'static str, text: &str) -> Result<u64, InvalidIdentifier> {
    text.trim().parse::<u64>().map_err(|_| InvalidIdentifier {
        kind,
        value: text.to_owned(),
    })
}

/// Declares a copyable numeric identifier newtype with boundary coercion.
macro_rules! numeric_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(
            try_from = "crate::identifier::RawIdentifier",
            into = "u64"
        )]
        pub struct $name(u64);

        impl $name {
            /// Creates an identifier from its numeric value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the numeric value.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }

            /// Returns the identifier following this one.
            #[must_use]
            pub const fn next(self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }

        impl TryFrom<crate::identifier::RawIdentifier> for $name {
            type Error = crate::identifier::InvalidIdentifier;

            fn try_from(raw: crate::identifier::RawIdentifier) -> Result<Self, Self::Error> {
                raw.into_value($kind).map(Self)
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::identifier::InvalidIdentifier;

            fn from_str(text: &str) -> Result<Self, Self::Err> {
                crate::identifier::parse_identifier($kind, text).map(Self)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use numeric_identifier;
