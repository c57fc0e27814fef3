use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};

use mxmeta_core::MetadataTree;
use mxmeta_model::MetadataField;

pub fn print_summary(tree: &MetadataTree) {
    println!("Source: {}", tree.source());
    let rows = summary_rows(tree);
    if rows.is_empty() {
        println!("No metadata extracted.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    for (path, value) in rows {
        table.add_row(vec![path_cell(&path), Cell::new(value)]);
    }
    println!("{table}");
}

/// One `(dotted path, value)` row per scalar field. Lists of unnamed values
/// are joined into their parent's row.
pub fn summary_rows(tree: &MetadataTree) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for field in tree.fields() {
        collect_rows(field, &field.name, &mut rows);
    }
    rows
}

fn collect_rows(field: &MetadataField, path: &str, rows: &mut Vec<(String, String)>) {
    if let Some(value) = field.value() {
        rows.push((path.to_string(), value.to_string()));
    }
    let listed = field.listed_values();
    if !listed.is_empty() {
        rows.push((path.to_string(), listed.join(", ")));
    }
    for child in field.children.iter().filter(|child| !child.name.is_empty()) {
        collect_rows(child, &format!("{path}.{}", child.name), rows);
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn path_cell(path: &str) -> Cell {
    if path.contains('.') {
        Cell::new(path)
    } else {
        Cell::new(path).add_attribute(Attribute::Bold)
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ColumnConstraint::LowerBoundary(Width::Fixed(12)),
    ]);
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}
