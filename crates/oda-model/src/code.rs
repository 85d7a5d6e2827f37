//! Coded identifiers.
//!
//! The two coding schemes mix integer codes (legacy DAC donor codes such as
//! `801`) with string codes (explorer area codes such as `AUS`, amount types
//! such as `USD_Nominal`). [`Code`] carries either form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single coded value, either integer or string.
///
/// Serialized untagged: a JSON number becomes [`Code::Int`], a JSON string
/// becomes [`Code::Text`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Code {
    Int(i64),
    Text(String),
}

impl Code {
    /// Integer value of this code, if it is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// String value of this code, if it is a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Text(value) => Some(value),
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// The same code in the other representation.
    ///
    /// `Int(801)` pairs with `Text("801")` and back. Text only converts when
    /// it is the canonical rendering of an integer, so `"0801"` has no
    /// alternate.
    pub fn alternate(&self) -> Option<Code> {
        match self {
            Self::Int(value) => Some(Self::Text(value.to_string())),
            Self::Text(text) => canonical_int(text).map(Self::Int),
        }
    }
}

/// Parse `text` only when it is exactly how the integer renders.
pub(crate) fn canonical_int(text: &str) -> Option<i64> {
    let value = text.parse::<i64>().ok()?;
    (value.to_string() == text).then_some(value)
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Code {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Code {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Code {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Code {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
