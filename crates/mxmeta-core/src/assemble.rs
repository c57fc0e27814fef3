//! Result tree assembly.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use mxmeta_map::unmapped_columns;
use mxmeta_model::{
    Category, CategoryView, Document, IndexValue, MergedCategory, MetadataField, select_rows,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, CategorySource};
use crate::selection::collection_rows;

/// The metadata forest extracted from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTree {
    /// Name of the source document (data block or scan profile).
    pub source: String,
    pub fields: Vec<MetadataField>,
}

impl MetadataTree {
    pub fn new(source: impl Into<String>, fields: Vec<MetadataField>) -> Self {
        Self {
            source: source.into(),
            fields,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn fields(&self) -> &[MetadataField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Top-level fields grouped by name, in emission order within a name.
    pub fn by_name(&self) -> BTreeMap<&str, Vec<&MetadataField>> {
        let mut grouped: BTreeMap<&str, Vec<&MetadataField>> = BTreeMap::new();
        for field in &self.fields {
            grouped.entry(field.name.as_str()).or_default().push(field);
        }
        grouped
    }

    /// First top-level field named `name`.
    pub fn field(&self, name: &str) -> Option<&MetadataField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl fmt::Display for MetadataTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            field.render(f, 0)?;
        }
        Ok(())
    }
}

/// Maps every catalog entry over `document`, in catalog order.
pub fn assemble(document: &Document, catalog: &[CatalogEntry]) -> MetadataTree {
    let mut fields = Vec::new();
    for entry in catalog {
        match entry.source {
            CategorySource::Single(name) => {
                if document.has_category(name) {
                    fields.extend(entry.mapper.map(document.category(name)));
                }
            }
            CategorySource::Merged(names) => {
                let present: Vec<Cow<'_, Category>> = names
                    .iter()
                    .filter(|name| document.has_category(name))
                    .filter_map(|name| narrow(document.category(name), entry.set.as_ref()))
                    .collect();
                if !present.is_empty() {
                    let views: Vec<&dyn CategoryView> = present
                        .iter()
                        .map(|category| category.as_ref() as &dyn CategoryView)
                        .collect();
                    let merged = MergedCategory::merge(&views);
                    fields.extend(entry.mapper.map(&merged));
                }
            }
        }
    }
    report_unmapped(document, catalog);

    tracing::debug!(
        source = document.name(),
        fields = fields.len(),
        "assembled metadata tree"
    );
    MetadataTree::new(document.name(), fields)
}

/// Restricts `category` to the rows of `set`; `None` when none remain.
fn narrow<'a>(category: &'a Category, set: Option<&IndexValue>) -> Option<Cow<'a, Category>> {
    match set.and_then(|set| collection_rows(category, set)) {
        None => Some(Cow::Borrowed(category)),
        Some(rows) if rows.is_empty() => None,
        Some(rows) => Some(Cow::Owned(select_rows(category, &rows))),
    }
}

/// Logs single-category columns no catalog entry reads.
fn report_unmapped(document: &Document, catalog: &[CatalogEntry]) {
    for category in document.categories() {
        let mappers: Vec<_> = catalog
            .iter()
            .filter(|entry| {
                matches!(entry.source, CategorySource::Single(name)
                    if name.eq_ignore_ascii_case(category.name()))
            })
            .map(|entry| entry.mapper.clone())
            .collect();
        if mappers.is_empty() {
            continue;
        }
        let unmapped = unmapped_columns(category, &mappers);
        if !unmapped.is_empty() {
            tracing::trace!(
                category = category.name(),
                columns = %unmapped.join(", "),
                "columns not mapped"
            );
        }
    }
}
