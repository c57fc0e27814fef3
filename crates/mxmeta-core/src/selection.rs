//! Repeated-block selection.
//!
//! A structure entry can report several diffraction sets, each with its own
//! overall statistics (`reflns`) and a table of resolution shells
//! (`reflns_shell`). These helpers pick the rows that belong to the active
//! set and, among the shells, the high-resolution one.

use mxmeta_map::Selector;
use mxmeta_model::{CategoryView, IndexValue, numbers_equal, parse_number};

/// Set id column of `reflns`.
pub const REFLNS_SET_COLUMN: &str = "pdbx_diffrn_id";
/// Overall high-resolution limit column of `reflns`.
pub const REFLNS_RESOLUTION_COLUMN: &str = "d_resolution_high";
/// Set id column of `reflns_shell`.
pub const SHELL_SET_COLUMN: &str = "pdbx_diffrn_id";
/// High-resolution limit column of `reflns_shell`.
pub const SHELL_RESOLUTION_COLUMN: &str = "d_res_high";

/// Column of a data-collection category that names its diffraction set.
pub fn collection_set_column(category: &str) -> Option<&'static str> {
    match category.to_ascii_lowercase().as_str() {
        "diffrn" => Some("id"),
        "diffrn_source" | "diffrn_detector" | "diffrn_measurement" | "diffrn_scan"
        | "diffrn_radiation" => Some("diffrn_id"),
        _ => None,
    }
}

/// Rows of a data-collection category that belong to `set`.
///
/// `None` keeps the category whole: it has no set column, or `set` is the
/// default and no row names it. An empty list drops the category.
pub fn collection_rows(category: &dyn CategoryView, set: &IndexValue) -> Option<Vec<usize>> {
    let column = collection_set_column(category.name())?;
    if !category.has_column(column) {
        return None;
    }
    let rows = category.column(column).rows_matching(set.id());
    if rows.is_empty() && set.is_default() {
        return None;
    }
    if rows.is_empty() {
        tracing::trace!(
            category = category.name(),
            set = set.id(),
            "no data collection rows for set"
        );
    }
    Some(rows)
}

/// Rows of `reflns` belonging to `set`.
pub fn reflns_rows(reflns: &dyn CategoryView, set: &IndexValue) -> Vec<usize> {
    set.resolve(reflns, REFLNS_SET_COLUMN, REFLNS_RESOLUTION_COLUMN)
}

/// Overall high-resolution limit of `set`, taken from its first `reflns` row.
pub fn target_resolution(reflns: &dyn CategoryView, set: &IndexValue) -> Option<String> {
    let column = reflns.column(REFLNS_RESOLUTION_COLUMN);
    reflns_rows(reflns, set)
        .into_iter()
        .find_map(|row| column.value_at(row))
        .map(str::to_string)
}

/// Picks the high-resolution shell row of `set`.
///
/// The first row whose resolution numerically equals `target` and whose set
/// id equals `set` wins. A table without a set-id column belongs to the
/// default set. When nothing matches, no row carries a set id and `set` is
/// the default, the row with the lowest resolution value is taken instead.
pub fn select_shell(
    shells: &dyn CategoryView,
    target: Option<&str>,
    set: &IndexValue,
) -> Option<usize> {
    let resolution = shells.column(SHELL_RESOLUTION_COLUMN);
    let set_ids = shells.column(SHELL_SET_COLUMN);
    let has_set_column = shells.has_column(SHELL_SET_COLUMN);

    let in_set = |row: usize| {
        if has_set_column {
            set_ids.value_at(row).is_some_and(|id| id.trim() == set.id())
        } else {
            set.is_default()
        }
    };

    if let Some(target) = target {
        let exact = (0..shells.row_count()).find(|&row| {
            resolution
                .value_at(row)
                .is_some_and(|value| numbers_equal(value, target))
                && in_set(row)
        });
        if exact.is_some() {
            return exact;
        }
    }

    let any_set_id = (0..shells.row_count()).any(|row| set_ids.value_at(row).is_some());
    if any_set_id || !set.is_default() {
        tracing::trace!(
            set = set.id(),
            target = target.unwrap_or("none"),
            "no resolution shell matched"
        );
        return None;
    }

    let mut lowest: Option<(usize, f64)> = None;
    for row in 0..shells.row_count() {
        let Some(value) = resolution.value_at(row).and_then(parse_number) else {
            continue;
        };
        if lowest.is_none_or(|(_, best)| value < best) {
            lowest = Some((row, value));
        }
    }
    if let Some((row, _)) = lowest {
        tracing::debug!(
            row,
            target = target.unwrap_or("none"),
            "no exact shell match, using the lowest resolution shell"
        );
    }
    lowest.map(|(row, _)| row)
}

/// Generator selection narrowing `reflns` to the active set.
pub fn reflns_selector(set: IndexValue) -> Selector {
    Selector::rows("diffraction set", move |view| reflns_rows(view, &set))
}

/// Generator selection narrowing `reflns_shell` to the high-resolution shell.
pub fn shell_selector(target: Option<String>, set: IndexValue) -> Selector {
    Selector::rows("high resolution shell", move |view| {
        select_shell(view, target.as_deref(), &set)
            .into_iter()
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mxmeta_model::{Category, Column};

    fn shells(resolutions: &[&str], set_ids: Option<&[&str]>) -> Category {
        let mut columns = vec![Column::from_values(
            SHELL_RESOLUTION_COLUMN,
            resolutions.iter().copied(),
        )];
        if let Some(ids) = set_ids {
            columns.push(Column::from_values(SHELL_SET_COLUMN, ids.iter().copied()));
        }
        Category::new("reflns_shell", columns).unwrap()
    }

    #[test]
    fn exact_match_after_numeric_normalization() {
        let shells = shells(&["3.0", "2.5", "2.1"], None);
        let row = select_shell(&shells, Some("2.500"), &IndexValue::default());
        assert_eq!(row, Some(1));
    }

    #[test]
    fn falls_back_to_lowest_resolution_for_default_set() {
        let shells = shells(&["3.0", "1.8", "2.5"], None);
        let row = select_shell(&shells, Some("1.75"), &IndexValue::default());
        assert_eq!(row, Some(1));
        assert_eq!(select_shell(&shells, None, &IndexValue::default()), Some(1));
    }

    #[test]
    fn no_fallback_for_other_sets() {
        let shells = shells(&["3.0", "1.8", "2.5"], None);
        assert_eq!(select_shell(&shells, Some("1.8"), &IndexValue::new("2")), None);
    }

    #[test]
    fn set_ids_restrict_matches_and_disable_fallback() {
        let shells = shells(&["2.0", "2.0", "1.5"], Some(&["1", "2", "2"]));
        assert_eq!(
            select_shell(&shells, Some("2.00"), &IndexValue::new("2")),
            Some(1)
        );
        assert_eq!(select_shell(&shells, Some("1.1"), &IndexValue::default()), None);
    }

    #[test]
    fn target_comes_from_the_active_set() {
        let reflns = Category::new(
            "reflns",
            vec![
                Column::from_values(REFLNS_SET_COLUMN, ["1", "2"]),
                Column::from_values(REFLNS_RESOLUTION_COLUMN, ["2.10", "1.65"]),
            ],
        )
        .unwrap();
        assert_eq!(
            target_resolution(&reflns, &IndexValue::new("2")).as_deref(),
            Some("1.65")
        );
        assert_eq!(target_resolution(&reflns, &IndexValue::new("3")), None);
    }

    #[test]
    fn lone_reflns_row_without_set_column() {
        let reflns = Category::single_row("reflns", [(REFLNS_RESOLUTION_COLUMN, "1.9")]);
        assert_eq!(
            target_resolution(&reflns, &IndexValue::default()).as_deref(),
            Some("1.9")
        );
    }

    #[test]
    fn shell_selector_narrows_to_one_row() {
        let shells = shells(&["3.0", "2.5", "2.1"], None);
        let selected = shell_selector(Some("2.1".into()), IndexValue::default()).select(&shells);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].row_count(), 1);
        assert_eq!(selected[0].value_at(SHELL_RESOLUTION_COLUMN, 0), Some("2.1"));
    }

    #[test]
    fn collection_rows_follow_the_active_set() {
        let source = Category::new(
            "diffrn_source",
            vec![
                Column::from_values("diffrn_id", ["1", "2"]),
                Column::from_values("source", ["SYNCHROTRON", "ROTATING ANODE"]),
            ],
        )
        .unwrap();
        assert_eq!(collection_rows(&source, &IndexValue::new("2")), Some(vec![1]));
        assert_eq!(collection_rows(&source, &IndexValue::new("7")), Some(Vec::new()));

        let unnumbered = Category::single_row("diffrn_source", [("diffrn_id", "A")]);
        assert_eq!(collection_rows(&unnumbered, &IndexValue::default()), None);

        let wavelength = Category::single_row("diffrn_radiation_wavelength", [("id", "2")]);
        assert_eq!(collection_rows(&wavelength, &IndexValue::new("2")), None);
    }
}
