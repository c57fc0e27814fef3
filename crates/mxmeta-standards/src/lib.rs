//! Controlled vocabularies for crystallography metadata.
//!
//! Every table is an immutable [`LazyLock`](std::sync::LazyLock) static shared
//! across threads. Lookups normalize case, whitespace and punctuation, so
//! `" autoprocess "` and `"AUTOPROCESS"` resolve to the same term.

pub mod error;
pub mod space_group;
pub mod tables;
pub mod vocabulary;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::{Result, StandardsError};
pub use space_group::{
    SPACE_GROUP, canonical_symbol, space_group_number, space_group_symbol, symbol_for_number_text,
};
pub use tables::{DETECTOR_TYPE, OTHER, SOFTWARE, SOURCE_TYPE};
pub use vocabulary::{Vocabulary, compact_key};

/// The vocabularies shipped with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VocabularyKind {
    Software,
    Source,
    Detector,
    SpaceGroup,
}

impl VocabularyKind {
    pub const ALL: [VocabularyKind; 4] = [
        VocabularyKind::Software,
        VocabularyKind::Source,
        VocabularyKind::Detector,
        VocabularyKind::SpaceGroup,
    ];

    pub fn vocabulary(self) -> &'static Vocabulary {
        match self {
            VocabularyKind::Software => &SOFTWARE,
            VocabularyKind::Source => &SOURCE_TYPE,
            VocabularyKind::Detector => &DETECTOR_TYPE,
            VocabularyKind::SpaceGroup => &SPACE_GROUP,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VocabularyKind::Software => "software",
            VocabularyKind::Source => "source",
            VocabularyKind::Detector => "detector",
            VocabularyKind::SpaceGroup => "space-group",
        }
    }
}

impl fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VocabularyKind {
    type Err = StandardsError;

    fn from_str(value: &str) -> Result<Self> {
        let key = compact_key(value);
        VocabularyKind::ALL
            .into_iter()
            .find(|kind| compact_key(kind.as_str()) == key)
            .ok_or_else(|| StandardsError::UnknownVocabulary {
                name: value.to_string(),
            })
    }
}
