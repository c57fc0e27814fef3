//! Marker rules and the per-scan state that applies them.

use std::collections::HashSet;

use mxmeta_model::{Category, Document, meters_to_millimeters};

/// Which occurrence of a marker is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// The first successful extraction wins; later lines are ignored.
    First,
    /// The last successful extraction wins, applied after the pass.
    Last,
}

/// What a marker line contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// `count` consecutive tokens starting `offset` tokens after the marker.
    Tokens { offset: usize, count: usize },
    /// Everything after the marker up to the first `delimiter`.
    RestUntil(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Verbatim,
    MetersToMillimeters,
}

/// A literal marker token plus the positions of the values it labels.
#[derive(Debug, Clone, Copy)]
pub struct MarkerRule {
    pub marker: &'static str,
    pub capture: Capture,
    pub policy: Policy,
    pub conversion: Conversion,
    /// `category.item` targets, one per captured value.
    pub targets: &'static [&'static str],
}

impl MarkerRule {
    /// Captures the tokens right after `marker`, first occurrence wins.
    pub const fn first(marker: &'static str, targets: &'static [&'static str]) -> Self {
        Self {
            marker,
            capture: Capture::Tokens {
                offset: 1,
                count: targets.len(),
            },
            policy: Policy::First,
            conversion: Conversion::Verbatim,
            targets,
        }
    }

    pub const fn last(self) -> Self {
        Self {
            policy: Policy::Last,
            ..self
        }
    }

    pub const fn rest_until(self, delimiter: char) -> Self {
        Self {
            capture: Capture::RestUntil(delimiter),
            ..self
        }
    }

    pub const fn meters(self) -> Self {
        Self {
            conversion: Conversion::MetersToMillimeters,
            ..self
        }
    }

    /// Values captured from `tokens`, or `None` when the marker is absent or
    /// the line is too short.
    pub fn extract(&self, tokens: &[&str]) -> Option<Vec<String>> {
        let at = tokens
            .iter()
            .position(|token| token.eq_ignore_ascii_case(self.marker))?;
        let raw: Vec<String> = match self.capture {
            Capture::Tokens { offset, count } => {
                let start = at + offset;
                tokens
                    .get(start..start + count)?
                    .iter()
                    .map(|token| (*token).to_string())
                    .collect()
            }
            Capture::RestUntil(delimiter) => {
                let rest = tokens.get(at + 1..)?.join(" ");
                let value = rest.split(delimiter).next().unwrap_or_default().trim();
                if value.is_empty() {
                    return None;
                }
                vec![value.to_string()]
            }
        };
        let converted: Vec<String> = raw
            .iter()
            .map(|value| match self.conversion {
                Conversion::Verbatim => value.clone(),
                Conversion::MetersToMillimeters => meters_to_millimeters(value),
            })
            .collect();
        if converted.iter().any(String::is_empty) {
            tracing::trace!(marker = self.marker, "marker value not convertible");
            return None;
        }
        Some(converted)
    }
}

/// Extracted `category.item` values in first-set order.
#[derive(Debug, Default)]
pub(crate) struct Fields {
    entries: Vec<(String, String)>,
}

impl Fields {
    /// Sets `target`, replacing any earlier value.
    pub fn set(&mut self, target: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| name.as_str() == target) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((target.to_string(), value)),
        }
    }

    /// Copies the value of `from`, if any, to `to`.
    pub fn copy(&mut self, from: &str, to: &str) {
        if let Some(value) = self.get(from).map(str::to_string) {
            self.set(to, value);
        }
    }

    pub fn get(&self, target: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == target)
            .map(|(_, value)| value.as_str())
    }

    /// One single-row category per target prefix.
    pub fn into_document(self, name: &str) -> Document {
        let mut grouped: Vec<(String, Vec<(String, String)>)> = Vec::new();
        for (target, value) in self.entries {
            let (category, item) = target.split_once('.').unwrap_or(("", target.as_str()));
            let pair = (item.to_string(), value);
            match grouped.iter_mut().find(|(existing, _)| existing.as_str() == category) {
                Some((_, pairs)) => pairs.push(pair),
                None => grouped.push((category.to_string(), vec![pair])),
            }
        }
        Document::new(
            name,
            grouped
                .into_iter()
                .map(|(category, pairs)| Category::single_row(category, pairs))
                .collect(),
        )
    }
}

/// Applies a fixed rule table line by line.
#[derive(Debug)]
pub(crate) struct RuleEngine {
    rules: &'static [MarkerRule],
    /// Markers of first-occurrence rules already satisfied.
    collected: HashSet<&'static str>,
    /// Latest extraction of each last-occurrence rule, by rule index.
    candidates: Vec<Option<Vec<String>>>,
}

impl RuleEngine {
    pub fn new(rules: &'static [MarkerRule]) -> Self {
        Self {
            rules,
            collected: HashSet::new(),
            candidates: vec![None; rules.len()],
        }
    }

    /// Applies every rule to one tokenized line.
    pub fn observe(&mut self, tokens: &[&str], fields: &mut Fields) {
        for (index, rule) in self.rules.iter().enumerate() {
            if self.collected.contains(rule.marker) {
                continue;
            }
            let Some(values) = rule.extract(tokens) else {
                continue;
            };
            match rule.policy {
                Policy::First => {
                    for (target, value) in rule.targets.iter().zip(values) {
                        fields.set(target, value);
                    }
                    self.collected.insert(rule.marker);
                }
                Policy::Last => self.candidates[index] = Some(values),
            }
        }
    }

    /// Writes the held last-occurrence candidates.
    pub fn finish(self, fields: &mut Fields) {
        for (rule, candidate) in self.rules.iter().zip(self.candidates) {
            if let Some(values) = candidate {
                for (target, value) in rule.targets.iter().zip(values) {
                    fields.set(target, value);
                }
            }
        }
    }
}

/// Holds the previous non-blank line until a marker line claims it.
#[derive(Debug, Default)]
pub(crate) enum PrecedingLine {
    #[default]
    Empty,
    Holding(String),
}

impl PrecedingLine {
    pub fn hold(&mut self, line: &str) {
        *self = Self::Holding(line.to_string());
    }

    pub fn take(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Holding(line) => Some(line),
            Self::Empty => None,
        }
    }
}
