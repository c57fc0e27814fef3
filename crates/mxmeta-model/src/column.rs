use serde::{Deserialize, Serialize};

use crate::value::{CellValue, ValueKind};

/// Placeholder returned for any column that does not exist.
pub static EMPTY_COLUMN: Column = Column::empty();

/// A named, fixed-length sequence of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    cells: Vec<CellValue>,
}

impl Column {
    /// Creates a column from cells.
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Creates a column whose cells are all present.
    pub fn from_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            values
                .into_iter()
                .map(|value| CellValue::Present(value.into()))
                .collect(),
        )
    }

    /// The nameless, zero-length placeholder column.
    pub const fn empty() -> Self {
        Self {
            name: String::new(),
            cells: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows in this column.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Cell at `row`, or `None` when out of range.
    pub fn cell(&self, row: usize) -> Option<&CellValue> {
        self.cells.get(row)
    }

    /// Presence state at `row`, or `None` when out of range.
    pub fn kind_at(&self, row: usize) -> Option<ValueKind> {
        self.cells.get(row).map(CellValue::kind)
    }

    /// Value at `row`; defined only for present cells.
    pub fn value_at(&self, row: usize) -> Option<&str> {
        self.cells.get(row).and_then(CellValue::as_str)
    }

    /// Present values in row order, absent cells skipped.
    pub fn present_values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().filter_map(CellValue::as_str)
    }

    /// Row positions whose present value equals `key` (trimmed), in original order.
    pub fn rows_matching(&self, key: &str) -> Vec<usize> {
        let key = key.trim();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.as_str().is_some_and(|value| value.trim() == key))
            .map(|(row, _)| row)
            .collect()
    }

    /// Returns a copy of this column under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: self.cells.clone(),
        }
    }

    /// Returns a column holding the cells at `rows`; positions past the end
    /// become [`CellValue::NotPresent`].
    pub fn select(&self, rows: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            cells: rows
                .iter()
                .map(|&row| self.cells.get(row).cloned().unwrap_or(CellValue::NotPresent))
                .collect(),
        }
    }

    /// Returns true if `name` refers to this column (ASCII case-insensitive).
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed() -> Column {
        Column::new(
            "pdbx_diffrn_id",
            vec![
                CellValue::present("1"),
                CellValue::Unknown,
                CellValue::present(" 2 "),
                CellValue::NotPresent,
                CellValue::present("1"),
            ],
        )
    }

    #[test]
    fn out_of_range_access_degrades() {
        let column = mixed();
        assert_eq!(column.value_at(99), None);
        assert_eq!(column.kind_at(99), None);
        assert!(EMPTY_COLUMN.is_empty());
        assert_eq!(EMPTY_COLUMN.value_at(0), None);
    }

    #[test]
    fn rows_matching_is_stable_and_trims() {
        let column = mixed();
        assert_eq!(column.rows_matching("1"), vec![0, 4]);
        assert_eq!(column.rows_matching("2"), vec![2]);
        assert!(column.rows_matching("3").is_empty());
    }

    #[test]
    fn absent_states_remain_distinguishable() {
        let column = mixed();
        assert_eq!(column.kind_at(1), Some(ValueKind::Unknown));
        assert_eq!(column.kind_at(3), Some(ValueKind::NotPresent));
        assert_eq!(column.value_at(1), None);
        assert_eq!(column.present_values().count(), 3);
    }

    #[test]
    fn select_pads_with_not_present() {
        let column = Column::from_values("d_res_high", ["3.0", "2.5"]);
        let picked = column.select(&[1, 5]);
        assert_eq!(picked.value_at(0), Some("2.5"));
        assert_eq!(picked.kind_at(1), Some(ValueKind::NotPresent));
    }
}
