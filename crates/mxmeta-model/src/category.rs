//! Categories: named groups of row-aligned columns.

use serde::{Deserialize, Serialize};

use crate::column::{Column, EMPTY_COLUMN};
use crate::error::{ModelError, Result};

/// Placeholder returned for any category that does not exist.
pub static EMPTY_CATEGORY: Category = Category::empty();

/// Read-only access to a table-like group of columns.
///
/// Mapping code depends only on this trait, never on a concrete file format.
/// Lookups never fail: a missing column resolves to [`EMPTY_COLUMN`].
pub trait CategoryView {
    /// Name of the category (or merged category).
    fn name(&self) -> &str;

    /// Columns in declaration order.
    fn columns(&self) -> &[Column];

    /// Column named `name` (ASCII case-insensitive), or the empty placeholder.
    fn column(&self, name: &str) -> &Column {
        self.columns()
            .iter()
            .find(|column| column.is_named(name))
            .unwrap_or(&EMPTY_COLUMN)
    }

    fn has_column(&self, name: &str) -> bool {
        self.columns().iter().any(|column| column.is_named(name))
    }

    /// Number of rows; the longest column when cardinalities differ.
    fn row_count(&self) -> usize {
        self.columns().iter().map(Column::len).max().unwrap_or(0)
    }

    fn column_names(&self) -> Vec<&str> {
        self.columns().iter().map(Column::name).collect()
    }
}

/// A named table whose columns share one row index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    name: String,
    columns: Vec<Column>,
}

impl Category {
    /// Creates a category, rejecting columns that are not row-aligned.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(column) = columns.iter().find(|column| column.len() != expected) {
                return Err(ModelError::MisalignedColumn {
                    category: name,
                    column: column.name().to_string(),
                    expected,
                    actual: column.len(),
                });
            }
        }
        Ok(Self { name, columns })
    }

    /// Creates a one-row category from `(column, value)` pairs.
    pub fn single_row<I, K, V>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            columns: pairs
                .into_iter()
                .map(|(column, value)| Column::from_values(column, [value]))
                .collect(),
        }
    }

    /// The nameless placeholder category.
    pub const fn empty() -> Self {
        Self {
            name: String::new(),
            columns: Vec::new(),
        }
    }

    /// Consumes the category, returning its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Row positions whose `index_column` value equals `key`.
    pub fn rows_matching(&self, index_column: &str, key: &str) -> Vec<usize> {
        self.column(index_column).rows_matching(key)
    }

    /// Value at `row` of `column`, when present.
    pub fn value_at(&self, column: &str, row: usize) -> Option<&str> {
        self.column(column).value_at(row)
    }
}

impl CategoryView for Category {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }
}

/// Narrows `view` to the listed row positions, in the order given.
///
/// Every column keeps its name; positions beyond a column's length become
/// not-present cells, so the result is always row-aligned.
pub fn select_rows(view: &dyn CategoryView, rows: &[usize]) -> Category {
    Category {
        name: view.name().to_string(),
        columns: view
            .columns()
            .iter()
            .map(|column| column.select(rows))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    fn reflns_shell() -> Category {
        Category::new(
            "reflns_shell",
            vec![
                Column::from_values("d_res_high", ["3.0", "2.5", "2.1"]),
                Column::from_values("pdbx_diffrn_id", ["1", "1", "2"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_misaligned_columns() {
        let err = Category::new(
            "cell",
            vec![
                Column::from_values("length_a", ["50.1"]),
                Column::from_values("length_b", ["60.2", "61.0"]),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ModelError::MisalignedColumn { expected: 1, actual: 2, .. }
        ));
    }

    #[test]
    fn missing_column_is_placeholder() {
        let category = reflns_shell();
        assert!(category.column("percent_possible_all").is_empty());
        assert_eq!(category.value_at("percent_possible_all", 0), None);
        assert_eq!(EMPTY_CATEGORY.row_count(), 0);
    }

    #[test]
    fn column_lookup_ignores_ascii_case() {
        let category = reflns_shell();
        assert_eq!(category.value_at("D_RES_HIGH", 1), Some("2.5"));
        assert!(category.has_column("PDBX_DIFFRN_ID"));
    }

    #[test]
    fn select_rows_keeps_alignment() {
        let category = reflns_shell();
        let picked = select_rows(&category, &[2, 0, 7]);
        assert_eq!(picked.row_count(), 3);
        assert_eq!(picked.value_at("d_res_high", 0), Some("2.1"));
        assert_eq!(picked.value_at("d_res_high", 1), Some("3.0"));
        assert_eq!(
            picked.column("pdbx_diffrn_id").kind_at(2),
            Some(ValueKind::NotPresent)
        );
    }

    #[test]
    fn rows_matching_on_index_column() {
        let category = reflns_shell();
        assert_eq!(category.rows_matching("pdbx_diffrn_id", "1"), vec![0, 1]);
        assert!(category.rows_matching("missing", "1").is_empty());
    }
}
