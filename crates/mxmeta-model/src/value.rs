//! Cell values with explicit presence state.
//!
//! Scientific record files distinguish between a value that was never
//! recorded (`.` in CIF, [`ValueKind::NotPresent`]) and one that is known to
//! exist but was not supplied (`?` in CIF, [`ValueKind::Unknown`]). Both
//! degrade to "no value" during mapping, but stay distinguishable so that
//! diagnostics can report them.

use serde::{Deserialize, Serialize};

/// Presence state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// The cell carries a value.
    Present,
    /// The value is inapplicable or was deliberately omitted.
    NotPresent,
    /// The value exists but is not known.
    Unknown,
}

/// One cell of a [`crate::Column`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellValue {
    /// A recorded value, kept verbatim.
    Present(String),
    /// No value applies.
    NotPresent,
    /// A value applies but is not known.
    Unknown,
}

impl CellValue {
    /// Builds a present cell.
    pub fn present(value: impl Into<String>) -> Self {
        Self::Present(value.into())
    }

    /// Presence state of this cell.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Present(_) => ValueKind::Present,
            Self::NotPresent => ValueKind::NotPresent,
            Self::Unknown => ValueKind::Unknown,
        }
    }

    /// The value, when present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Present(value) => Some(value.as_str()),
            Self::NotPresent | Self::Unknown => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Present(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Present(value)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::NotPresent, Self::Present)
    }
}

/// Returns true when a value carries information worth emitting.
///
/// Blank strings and the CIF placeholders `?` and `.` are treated as absent,
/// including when they survive as quoted literals.
pub fn is_meaningful(value: &str) -> bool {
    let trimmed = value.trim();
    !(trimmed.is_empty() || trimmed == "?" || trimmed == ".")
}
