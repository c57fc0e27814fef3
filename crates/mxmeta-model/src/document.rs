//! A parsed source file: an ordered set of categories.

use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryView, EMPTY_CATEGORY};
use crate::column::{Column, EMPTY_COLUMN};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    name: String,
    categories: Vec<Category>,
}

impl Document {
    pub fn new(name: impl Into<String>, categories: Vec<Category>) -> Self {
        Self {
            name: name.into(),
            categories,
        }
    }

    /// Block or file name this document was read from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category named `name` (ASCII case-insensitive), or the empty placeholder.
    pub fn category(&self, name: &str) -> &Category {
        self.categories
            .iter()
            .find(|category| category.name().eq_ignore_ascii_case(name))
            .unwrap_or(&EMPTY_CATEGORY)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories
            .iter()
            .any(|category| category.name().eq_ignore_ascii_case(name))
    }

    /// Column addressed as `category.item`, or the empty placeholder.
    ///
    /// A leading underscore is accepted, so `_cell.length_a` works too.
    pub fn column(&self, tag: &str) -> &Column {
        let tag = tag.strip_prefix('_').unwrap_or(tag);
        match tag.split_once('.') {
            Some((category, item)) => self.category(category).column(item),
            None => &EMPTY_COLUMN,
        }
    }

    /// Adds `category`, replacing any existing category of the same name.
    pub fn insert(&mut self, category: Category) {
        match self
            .categories
            .iter_mut()
            .find(|existing| existing.name().eq_ignore_ascii_case(category.name()))
        {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }
}
