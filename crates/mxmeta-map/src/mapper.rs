//! The mapping node tree.

use mxmeta_model::{CategoryView, MetadataField, is_meaningful};

use crate::generator::CategoryGenerator;
use crate::transform::{Transform, ValueFilter};

/// One node of a declarative mapping.
///
/// Nodes depend only on [`CategoryView`], so the same tree maps a plain
/// category, a merged category or anything a generator produced. Siblings
/// are evaluated in declaration order.
#[derive(Debug, Clone)]
pub enum FieldMapper {
    /// One named field per present value of `column` that passes `filter`.
    Basic {
        name: String,
        column: String,
        filter: ValueFilter,
        transform: Transform,
    },
    /// Unnamed fields for leaf lists, de-duplicated after the transform.
    ValueOnly { column: String, transform: Transform },
    /// Marks `column` as used without emitting anything.
    Invisible { column: String },
    /// A composite emitted only when at least one child survives.
    Nested {
        name: String,
        children: Vec<FieldMapper>,
    },
    /// Applies `children` to every category the generator yields, with no
    /// wrapper of its own.
    Filtered {
        generator: CategoryGenerator,
        children: Vec<FieldMapper>,
    },
}

impl FieldMapper {
    pub fn basic(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self::Basic {
            name: name.into(),
            column: column.into(),
            filter: ValueFilter::default(),
            transform: Transform::identity(),
        }
    }

    pub fn value_only(column: impl Into<String>, transform: Transform) -> Self {
        Self::ValueOnly {
            column: column.into(),
            transform,
        }
    }

    pub fn invisible(column: impl Into<String>) -> Self {
        Self::Invisible {
            column: column.into(),
        }
    }

    pub fn nested(name: impl Into<String>, children: Vec<FieldMapper>) -> Self {
        Self::Nested {
            name: name.into(),
            children,
        }
    }

    pub fn filtered(generator: CategoryGenerator, children: Vec<FieldMapper>) -> Self {
        Self::Filtered {
            generator,
            children,
        }
    }

    /// Replaces the transform of a `Basic` or `ValueOnly` node.
    #[must_use]
    pub fn with_transform(mut self, new_transform: Transform) -> Self {
        match &mut self {
            Self::Basic { transform, .. } | Self::ValueOnly { transform, .. } => {
                *transform = new_transform;
            }
            Self::Invisible { .. } | Self::Nested { .. } | Self::Filtered { .. } => {}
        }
        self
    }

    /// Replaces the filter of a `Basic` node.
    #[must_use]
    pub fn with_filter(mut self, new_filter: ValueFilter) -> Self {
        if let Self::Basic { filter, .. } = &mut self {
            *filter = new_filter;
        }
        self
    }

    /// Evaluates this node against `view`.
    pub fn map(&self, view: &dyn CategoryView) -> Vec<MetadataField> {
        match self {
            Self::Basic {
                name,
                column,
                filter,
                transform,
            } => view
                .column(column)
                .present_values()
                .filter(|value| is_meaningful(value) && filter.accepts(value))
                .flat_map(|value| transform.apply(value))
                .filter_map(|value| MetadataField::leaf(name.as_str(), value))
                .collect(),
            Self::ValueOnly { column, transform } => {
                let mut fields: Vec<MetadataField> = Vec::new();
                let outputs = view
                    .column(column)
                    .present_values()
                    .filter(|value| is_meaningful(value))
                    .flat_map(|value| transform.apply(value));
                for field in outputs.filter_map(MetadataField::value_only) {
                    if !fields.iter().any(|seen| seen.value == field.value) {
                        fields.push(field);
                    }
                }
                fields
            }
            Self::Invisible { .. } => Vec::new(),
            Self::Nested { name, children } => {
                MetadataField::composite(name.as_str(), map_all(children, view))
                    .into_iter()
                    .collect()
            }
            Self::Filtered {
                generator,
                children,
            } => generator
                .generate(view)
                .iter()
                .flat_map(|category| map_all(children, category))
                .collect(),
        }
    }

    /// Every column this node or its descendants read.
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut columns = Vec::new();
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns<'a>(&'a self, columns: &mut Vec<&'a str>) {
        match self {
            Self::Basic { column, .. }
            | Self::ValueOnly { column, .. }
            | Self::Invisible { column } => columns.push(column),
            Self::Nested { children, .. } => {
                for child in children {
                    child.collect_columns(columns);
                }
            }
            Self::Filtered {
                generator,
                children,
            } => {
                columns.extend(generator.selector_column());
                for child in children {
                    child.collect_columns(columns);
                }
            }
        }
    }
}

/// Evaluates `mappers` in order and concatenates their output.
pub fn map_all(mappers: &[FieldMapper], view: &dyn CategoryView) -> Vec<MetadataField> {
    mappers.iter().flat_map(|mapper| mapper.map(view)).collect()
}

/// Columns of `view` that no mapper reads, in declaration order.
pub fn unmapped_columns<'v>(view: &'v dyn CategoryView, mappers: &[FieldMapper]) -> Vec<&'v str> {
    let referenced: Vec<&str> = mappers
        .iter()
        .flat_map(FieldMapper::referenced_columns)
        .collect();
    view.column_names()
        .into_iter()
        .filter(|name| {
            !referenced
                .iter()
                .any(|used| used.eq_ignore_ascii_case(name))
        })
        .collect()
}
