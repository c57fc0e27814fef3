//! Output metadata fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::is_meaningful;

/// One node of the produced metadata tree.
///
/// A field is *absent* when it has no meaningful value and no children;
/// absent fields are never emitted. Value-only fields (vocabulary leaf lists)
/// have an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MetadataField>,
}

impl MetadataField {
    /// A named scalar field; `None` when `value` is not meaningful.
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        is_meaningful(&value).then(|| Self {
            name: name.into(),
            value: Some(value.trim().to_string()),
            children: Vec::new(),
        })
    }

    /// An unnamed scalar field; `None` when `value` is not meaningful.
    pub fn value_only(value: impl Into<String>) -> Option<Self> {
        Self::leaf(String::new(), value)
    }

    /// A composite field; `None` unless at least one child survives.
    pub fn composite(name: impl Into<String>, children: Vec<MetadataField>) -> Option<Self> {
        let children: Vec<_> = children.into_iter().filter(|child| !child.is_absent()).collect();
        (!children.is_empty()).then(|| Self {
            name: name.into(),
            value: None,
            children,
        })
    }

    /// True when this field carries nothing worth emitting.
    pub fn is_absent(&self) -> bool {
        self.value.as_deref().is_none_or(|value| !is_meaningful(value))
            && self.children.iter().all(MetadataField::is_absent)
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// First direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&MetadataField> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Value of the first direct child named `name`.
    pub fn child_value(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(MetadataField::value)
    }

    /// Values of unnamed children, in order.
    pub fn listed_values(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter(|child| child.name.is_empty())
            .filter_map(MetadataField::value)
            .collect()
    }

    /// Writes this field and its descendants, indenting two spaces per level.
    pub fn render(&self, out: &mut impl fmt::Write, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match (self.name.is_empty(), self.value()) {
            (true, Some(value)) => writeln!(out, "{indent}- {value}")?,
            (false, Some(value)) => writeln!(out, "{indent}{}: {value}", self.name)?,
            (_, None) => writeln!(out, "{indent}{}", self.name)?,
        }
        for child in &self.children {
            child.render(out, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_values_produce_no_leaf() {
        assert!(MetadataField::leaf("wavelength", "?").is_none());
        assert!(MetadataField::leaf("wavelength", " ").is_none());
        assert_eq!(
            MetadataField::leaf("wavelength", " 1.27 ").unwrap().value(),
            Some("1.27")
        );
    }

    #[test]
    fn empty_composite_is_suppressed() {
        assert!(MetadataField::composite("dataCollection", Vec::new()).is_none());
        let hollow = MetadataField {
            name: "beamline".into(),
            value: None,
            children: Vec::new(),
        };
        assert!(MetadataField::composite("dataCollection", vec![hollow]).is_none());
    }

    #[test]
    fn renders_indented_tree() {
        let field = MetadataField::composite(
            "processingSoftware",
            vec![
                MetadataField::value_only("XDS").unwrap(),
                MetadataField::leaf("version", "2023").unwrap(),
            ],
        )
        .unwrap();
        assert_eq!(
            field.to_string(),
            "processingSoftware\n  - XDS\n  version: 2023\n"
        );
        assert_eq!(field.listed_values(), vec!["XDS"]);
        assert_eq!(field.child_value("version"), Some("2023"));
    }

    #[test]
    fn serializes_without_empty_parts() {
        let field = MetadataField::value_only("Aimless").unwrap();
        assert_eq!(
            serde_json::to_string(&field).unwrap(),
            r#"{"value":"Aimless"}"#
        );
    }
}
