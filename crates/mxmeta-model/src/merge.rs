//! Category merge and flatten.
//!
//! A [`MergedCategory`] unions the columns of several source categories into
//! one virtual table. Each column is renamed `<category>_<column>` so that
//! equally named columns from different sources stay apart. Source
//! categories usually have different row counts, so a merged category is not
//! row-aligned; [`MergedCategory::flatten`] un-pivots it into one aligned,
//! single-row category per row position.
//!
//! ```
//! use mxmeta_model::{Category, CategoryView, MergedCategory};
//!
//! let radiation = Category::single_row("diffrn_radiation_wavelength", [("wavelength", "1.27")]);
//! let diffrn = Category::single_row("diffrn", [("ambient_temp", "100")]);
//!
//! let merged = MergedCategory::merge(&[&radiation, &diffrn]);
//! let rows = merged.flatten();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].column("diffrn_ambient_temp").value_at(0), Some("100"));
//! ```

use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryView};
use crate::column::Column;
use crate::error::Result;

/// Virtual category formed by a prefixed union of source categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedCategory {
    name: String,
    sources: Vec<String>,
    columns: Vec<Column>,
}

impl MergedCategory {
    /// Merges `categories` in order.
    ///
    /// When two prefixed names collide, the column written last replaces the
    /// earlier one in place.
    pub fn merge(categories: &[&dyn CategoryView]) -> Self {
        let sources: Vec<String> = categories
            .iter()
            .map(|category| category.name().to_string())
            .collect();
        let mut columns: Vec<Column> = Vec::new();
        for category in categories {
            for column in category.columns() {
                let merged = column.renamed(merged_column_name(category.name(), column.name()));
                match columns
                    .iter_mut()
                    .find(|existing| existing.is_named(merged.name()))
                {
                    Some(existing) => *existing = merged,
                    None => columns.push(merged),
                }
            }
        }
        Self {
            name: sources.join("+"),
            sources,
            columns,
        }
    }

    /// Names of the source categories, in merge order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// One single-row merged category per row position, ascending.
    ///
    /// Each result keeps only the columns that have a cell at that position.
    pub fn flatten(&self) -> Vec<MergedCategory> {
        flatten_rows(self)
            .into_iter()
            .map(|row| Self {
                name: self.name.clone(),
                sources: self.sources.clone(),
                columns: row.into_columns(),
            })
            .collect()
    }

    /// Converts into a plain [`Category`]; fails unless the columns are row-aligned.
    pub fn into_category(self) -> Result<Category> {
        Category::new(self.name, self.columns)
    }
}

impl CategoryView for MergedCategory {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[Column] {
        &self.columns
    }
}

/// Name of `column` from `category` inside a merged category.
pub fn merged_column_name(category: &str, column: &str) -> String {
    format!("{category}_{column}")
}

/// Splits any view into single-row categories, one per row position.
///
/// Columns keep the names they have in `view`; nothing is prefixed here.
pub fn flatten_rows(view: &dyn CategoryView) -> Vec<Category> {
    (0..view.row_count())
        .map(|row| {
            let columns = view
                .columns()
                .iter()
                .filter(|column| row < column.len())
                .map(|column| column.select(&[row]))
                .collect();
            // Every retained column holds exactly one cell.
            Category::new(view.name(), columns).unwrap_or_else(|_| Category::empty())
        })
        .collect()
}
