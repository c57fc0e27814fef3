//! Row selection by identifier.

use serde::{Deserialize, Serialize};

use crate::category::CategoryView;

/// Identifier of the implicit (first) diffraction set.
pub const DEFAULT_SET_ID: &str = "1";

/// An identifier used to select rows of an index column.
///
/// Resolution follows two rules, the second tried only when the first is
/// inapplicable:
///
/// 1. The view has the index column: every row whose index value equals the
///    identifier, in original order.
/// 2. The view has no index column at all, the target column has exactly one
///    row and the identifier is [`DEFAULT_SET_ID`]: that lone row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexValue {
    id: String,
    single_row_fallback: bool,
}

impl IndexValue {
    /// An identifier with the single-row fallback enabled.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into().trim().to_string(),
            single_row_fallback: true,
        }
    }

    /// An identifier that only ever matches through the index column.
    pub fn strict(id: impl Into<String>) -> Self {
        Self {
            single_row_fallback: false,
            ..Self::new(id)
        }
    }

    /// Uses `id` when supplied, otherwise the default set.
    pub fn from_option(id: Option<&str>) -> Self {
        id.map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(Self::default, Self::new)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// True when this identifier is the default sentinel.
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_SET_ID
    }

    /// Rows of `view` selected by this identifier.
    pub fn resolve(
        &self,
        view: &dyn CategoryView,
        index_column: &str,
        target_column: &str,
    ) -> Vec<usize> {
        if view.has_column(index_column) {
            return view.column(index_column).rows_matching(&self.id);
        }
        if self.single_row_fallback && self.is_default() && view.column(target_column).len() == 1
        {
            return vec![0];
        }
        Vec::new()
    }
}

impl Default for IndexValue {
    fn default() -> Self {
        Self::new(DEFAULT_SET_ID)
    }
}
