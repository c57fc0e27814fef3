//! Category generators: expand one view into the categories a
//! [`FieldMapper::Filtered`](crate::FieldMapper::Filtered) node maps.

use std::fmt;
use std::sync::Arc;

use mxmeta_model::{Category, CategoryView, flatten_rows, select_rows};
use tracing::trace;

type SelectFn = dyn Fn(&dyn CategoryView) -> Vec<Category> + Send + Sync;

/// A named, caller-provided row selection.
#[derive(Clone)]
pub struct Selector {
    name: &'static str,
    select: Arc<SelectFn>,
}

impl Selector {
    pub fn new(
        name: &'static str,
        select: impl Fn(&dyn CategoryView) -> Vec<Category> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            select: Arc::new(select),
        }
    }

    /// Selects a single category narrowed to the rows returned by `rows`;
    /// nothing when `rows` is empty.
    pub fn rows(
        name: &'static str,
        rows: impl Fn(&dyn CategoryView) -> Vec<usize> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, move |view| {
            let picked = rows(view);
            if picked.is_empty() {
                Vec::new()
            } else {
                vec![select_rows(view, &picked)]
            }
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn select(&self, view: &dyn CategoryView) -> Vec<Category> {
        (self.select)(view)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Selector").field(&self.name).finish()
    }
}

#[derive(Debug, Clone)]
pub enum CategoryGenerator {
    /// One single-row category per row position, ascending.
    Flatten,
    /// One category narrowed to rows whose `column` equals any of `values`
    /// (trimmed, ASCII case-insensitive); none when no row matches.
    Where { column: String, values: Vec<String> },
    /// Caller-provided selection.
    Select(Selector),
}

impl CategoryGenerator {
    pub fn where_eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Where {
            column: column.into(),
            values: vec![value.into()],
        }
    }

    pub fn where_any<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Where {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn generate(&self, view: &dyn CategoryView) -> Vec<Category> {
        match self {
            Self::Flatten => flatten_rows(view),
            Self::Where { column, values } => {
                let rows = matching_rows(view, column, values);
                if rows.is_empty() {
                    trace!(category = view.name(), column = %column, "no row matched selector");
                    Vec::new()
                } else {
                    vec![select_rows(view, &rows)]
                }
            }
            Self::Select(selector) => selector.select(view),
        }
    }

    /// Column the generator itself reads, if any.
    pub fn selector_column(&self) -> Option<&str> {
        match self {
            Self::Where { column, .. } => Some(column),
            Self::Flatten | Self::Select(_) => None,
        }
    }
}

fn matching_rows(view: &dyn CategoryView, column: &str, values: &[String]) -> Vec<usize> {
    view.column(column)
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| {
            cell.as_str().is_some_and(|value| {
                values
                    .iter()
                    .any(|wanted| value.trim().eq_ignore_ascii_case(wanted.trim()))
            })
        })
        .map(|(row, _)| row)
        .collect()
}
