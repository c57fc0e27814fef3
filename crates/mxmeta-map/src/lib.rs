//! Declarative mapping from categories to metadata fields.
//!
//! A mapping is a tree of [`FieldMapper`] nodes evaluated against any
//! [`CategoryView`](mxmeta_model::CategoryView). Leaves read columns,
//! [`FieldMapper::Nested`] groups children under a composite field, and
//! [`FieldMapper::Filtered`] re-targets its children at the categories a
//! [`CategoryGenerator`] derives from the input (one per row, rows matching a
//! selector, or any caller-provided selection).

pub mod generator;
pub mod mapper;
pub mod transform;

pub use generator::{CategoryGenerator, Selector};
pub use mapper::{FieldMapper, map_all, unmapped_columns};
pub use transform::{Transform, ValueFilter};
