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

use miette::Diagnostic;
use thiserror::Error;

use crate::SelectionMode;

/// Caller / data contract violations. These are programmer errors that are
/// surfaced immediately, never logged-and-ignored. "No matches" is *not* one
/// of these; an empty result set is rendered as an empty state.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConfigError {
    /// Two entries in a mapping option source share the same stored value.
    #[error("duplicate value in option source: {0:?}")]
    #[diagnostic(help("every entry in an option source must have a unique stored value"))]
    DuplicateValue(String),

    /// A default selection value has no corresponding entry in the option
    /// source. A missing default indicates a caller/data mismatch and must
    /// not silently render an empty selection.
    #[error("default value not found in option source: {0:?}")]
    #[diagnostic(help("defaults must reference values that exist in the option source"))]
    DefaultValueNotFound(String),

    /// The incremental loader was configured with a page size of zero.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// The change payload shape disagrees with the construction-time
    /// selection mode. Distinct from a normal "no selection" outcome.
    #[error("selection mode is {mode:?} but the change payload is {payload_shape} shaped")]
    SelectionShapeMismatch {
        mode: SelectionMode,
        payload_shape: &'static str,
    },
}
