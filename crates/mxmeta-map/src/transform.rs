//! Value transforms and filters applied by mappers.

use std::fmt;
use std::sync::Arc;

use mxmeta_model::{is_meaningful, meters_to_millimeters, parse_number, shift_decimal};
use mxmeta_standards::Vocabulary;

type TransformFn = dyn Fn(&str) -> Vec<String> + Send + Sync;
type FilterFn = dyn Fn(&str) -> bool + Send + Sync;

/// Turns one raw value into zero or more output values.
#[derive(Clone)]
pub struct Transform {
    name: &'static str,
    apply: Arc<TransformFn>,
}

impl Transform {
    pub fn new(
        name: &'static str,
        apply: impl Fn(&str) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            apply: Arc::new(apply),
        }
    }

    /// A one-to-one transform.
    pub fn map(name: &'static str, apply: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::new(name, move |value| vec![apply(value)])
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, value: &str) -> Vec<String> {
        (self.apply)(value)
    }

    /// The value, trimmed.
    pub fn identity() -> Self {
        Self::map("identity", |value| value.trim().to_string())
    }

    /// Canonical vocabulary term, falling back as the vocabulary does.
    pub fn vocabulary(vocabulary: &'static Vocabulary) -> Self {
        Self::new("vocabulary", move |value| {
            vocabulary
                .canonicalize(value)
                .map(str::to_string)
                .into_iter()
                .collect()
        })
    }

    /// Canonical vocabulary term, or the trimmed value when nothing matches.
    pub fn vocabulary_or_raw(vocabulary: &'static Vocabulary) -> Self {
        Self::map("vocabulary_or_raw", move |value| {
            vocabulary
                .lookup(value)
                .map_or_else(|| value.trim().to_string(), str::to_string)
        })
    }

    /// Splits a delimited list into trimmed items.
    pub fn split_list(separator: &'static str) -> Self {
        Self::new("split_list", move |value| {
            value
                .split(separator)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    /// Removes all whitespace, as in wrapped one-letter sequences.
    pub fn compact_sequence() -> Self {
        Self::map("compact_sequence", |value| {
            value.chars().filter(|ch| !ch.is_whitespace()).collect()
        })
    }

    /// Moves the decimal point by `places`; drops non-numeric values.
    pub fn shift_decimal(places: i32) -> Self {
        Self::new("shift_decimal", move |value| {
            shift_decimal(value, places).into_iter().collect()
        })
    }

    pub fn meters_to_millimeters() -> Self {
        Self::map("meters_to_millimeters", meters_to_millimeters)
    }

    /// Applies `self`, then `next` to every output.
    pub fn then(self, next: Transform) -> Self {
        Self::new(self.name, move |value| {
            self.apply(value)
                .iter()
                .flat_map(|output| next.apply(output))
                .collect()
        })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.name).finish()
    }
}

/// Decides whether a raw value is mapped at all.
#[derive(Clone)]
pub struct ValueFilter {
    name: &'static str,
    accept: Arc<FilterFn>,
}

impl ValueFilter {
    pub fn new(name: &'static str, accept: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name,
            accept: Arc::new(accept),
        }
    }

    pub fn accepts(&self, value: &str) -> bool {
        (self.accept)(value)
    }

    /// Rejects blank values and the `?`/`.` placeholders.
    pub fn non_blank() -> Self {
        Self::new("non_blank", is_meaningful)
    }

    /// Accepts numbers inside `(low, high]`.
    pub fn numeric_range(low: f64, high: f64) -> Self {
        Self::new("numeric_range", move |value| {
            parse_number(value).is_some_and(|number| number > low && number <= high)
        })
    }
}

impl Default for ValueFilter {
    fn default() -> Self {
        Self::non_blank()
    }
}

impl fmt::Debug for ValueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueFilter").field(&self.name).finish()
    }
}
