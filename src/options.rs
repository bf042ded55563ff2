/*
 *   Copyright (c) 2025 Pickify contributors
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

//! ### Option model adapter
//!
//! An [OptionSource] is the caller-supplied collection of selectable entries.
//! It comes in two shapes, decided at construction time (a tagged union, never
//! inferred from value shape at call time):
//!
//! 1. [OptionSource::labels]: an ordered, deduplicated set of strings. Each
//!    string is simultaneously the stored value and the displayed label.
//! 2. [OptionSource::mapping]: insertion-ordered `(value, label)` pairs, where
//!    `value` is the compact stored identifier and `label` is what the user
//!    sees.
//!
//! [OptionSource::adapt] normalizes either shape into an ordered list of
//! [CanonicalOption]s. It is a pure function of the source: same source, same
//! list, same order.

use serde::Serialize;

use crate::ConfigError;

/// A normalized `(value, label)` pair derived from an [OptionSource].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalOption {
    /// The compact stored identifier, emitted on selection.
    pub value: String,
    /// The human-readable label, displayed and searched.
    pub label: String,
}

impl CanonicalOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Caller-supplied source of truth for selectable entries.
///
/// Invariant: within a single source, no two entries share a stored value.
/// The `labels` constructor enforces this by deduplication; the `mapping`
/// constructor rejects duplicates with [ConfigError::DuplicateValue].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSource {
    Labels(Vec<String>),
    Mapping(Vec<(String, String)>),
}

impl OptionSource {
    /// Build a label-set source. Duplicate labels are dropped, keeping the
    /// first occurrence, so iteration order stays stable.
    pub fn labels(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut seen: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        OptionSource::Labels(seen)
    }

    /// Build a value→label mapping source. Insertion order defines the
    /// default display order.
    pub fn mapping(
        pairs: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Result<Self, ConfigError> {
        let mut acc: Vec<(String, String)> = Vec::new();
        for (value, label) in pairs {
            let value = value.into();
            if acc.iter().any(|(existing, _)| existing == &value) {
                return Err(ConfigError::DuplicateValue(value));
            }
            acc.push((value, label.into()));
        }
        Ok(OptionSource::Mapping(acc))
    }

    pub fn len(&self) -> usize {
        match self {
            OptionSource::Labels(labels) => labels.len(),
            OptionSource::Mapping(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Normalize this source into an ordered canonical list. Pure and
    /// deterministic; recomputed only when the source changes.
    pub fn adapt(&self) -> Vec<CanonicalOption> {
        match self {
            OptionSource::Labels(labels) => labels
                .iter()
                .map(|label| CanonicalOption::new(label.clone(), label.clone()))
                .collect(),
            OptionSource::Mapping(pairs) => pairs
                .iter()
                .map(|(value, label)| CanonicalOption::new(value.clone(), label.clone()))
                .collect(),
        }
    }

    /// Look up a single stored value.
    pub fn resolve_value(&self, value: &str) -> Result<CanonicalOption, ConfigError> {
        let found = match self {
            OptionSource::Labels(labels) => labels
                .iter()
                .find(|label| label.as_str() == value)
                .map(|label| CanonicalOption::new(label.clone(), label.clone())),
            OptionSource::Mapping(pairs) => pairs
                .iter()
                .find(|(candidate, _)| candidate == value)
                .map(|(candidate, label)| {
                    CanonicalOption::new(candidate.clone(), label.clone())
                }),
        };
        found.ok_or_else(|| ConfigError::DefaultValueNotFound(value.to_string()))
    }

    /// Resolve a default selection against this source. Fails with
    /// [ConfigError::DefaultValueNotFound] if *any* requested value has no
    /// corresponding entry.
    pub fn resolve_default(
        &self,
        default: &DefaultSelection,
    ) -> Result<Vec<CanonicalOption>, ConfigError> {
        match default {
            DefaultSelection::Single(value) => Ok(vec![self.resolve_value(value)?]),
            DefaultSelection::Multiple(values) => {
                values.iter().map(|value| self.resolve_value(value)).collect()
            }
        }
    }
}

/// Initial selection supplied by the caller. The shape must match the
/// construction-time [SelectionMode](crate::SelectionMode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSelection {
    Single(String),
    Multiple(Vec<String>),
}
