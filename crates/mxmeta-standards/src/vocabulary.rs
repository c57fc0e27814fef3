//! Immutable lookup tables from free-text values to canonical terms.

use std::collections::{BTreeSet, HashMap};

/// Lookup key: ASCII alphanumerics only, uppercased.
///
/// `" autoprocess "`, `"AutoPROCESS"` and `"auto-process"` share one key.
pub fn compact_key(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

/// A dictionary of aliases to canonical terms with an optional catch-all.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    name: &'static str,
    /// Key: compact alias. Value: canonical term.
    entries: HashMap<String, &'static str>,
    /// Compact fragments tried in order when no alias matches exactly.
    keywords: Vec<(String, &'static str)>,
    fallback: Option<&'static str>,
}

impl Vocabulary {
    /// Builds a vocabulary from `(alias, canonical)` pairs.
    ///
    /// Each canonical term is also registered as an alias of itself.
    pub fn new(name: &'static str, pairs: &[(&'static str, &'static str)]) -> Self {
        let mut entries = HashMap::new();
        for &(alias, canonical) in pairs {
            entries.insert(compact_key(canonical), canonical);
            entries.insert(compact_key(alias), canonical);
        }
        Self {
            name,
            entries,
            keywords: Vec::new(),
            fallback: None,
        }
    }

    /// Adds fragments matched anywhere inside an otherwise unknown value.
    pub fn with_keywords(mut self, keywords: &[(&'static str, &'static str)]) -> Self {
        self.keywords.extend(
            keywords
                .iter()
                .map(|&(fragment, canonical)| (compact_key(fragment), canonical)),
        );
        self
    }

    /// Term returned for non-blank values that match nothing.
    pub fn with_fallback(mut self, fallback: &'static str) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fallback(&self) -> Option<&'static str> {
        self.fallback
    }

    /// Canonical term for `value` without falling back.
    pub fn lookup(&self, value: &str) -> Option<&'static str> {
        let key = compact_key(value);
        if key.is_empty() {
            return None;
        }
        if let Some(&canonical) = self.entries.get(&key) {
            return Some(canonical);
        }
        self.keywords
            .iter()
            .find(|(fragment, _)| key.contains(fragment.as_str()))
            .map(|&(_, canonical)| canonical)
    }

    /// Canonical term for `value`, the fallback for unknown values, and
    /// `None` for blank input.
    pub fn canonicalize(&self, value: &str) -> Option<&'static str> {
        if compact_key(value).is_empty() {
            return None;
        }
        self.lookup(value).or(self.fallback)
    }

    /// True if `value` matches an alias or keyword.
    pub fn contains(&self, value: &str) -> bool {
        self.lookup(value).is_some()
    }

    /// Distinct canonical terms, sorted.
    pub fn canonical_terms(&self) -> Vec<&'static str> {
        self.entries
            .values()
            .chain(self.keywords.iter().map(|(_, canonical)| canonical))
            .copied()
            .chain(self.fallback)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
