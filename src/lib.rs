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

//! # pickify
//!
//! Searchable, paginated, single- and multi-select menus for the terminal.
//!
//! Options come from one of two sources: a deduplicated label set (each label
//! doubles as the stored value), or an insertion-ordered value→label mapping.
//! Either source is normalized into a canonical option list, filtered
//! case-insensitively as the user types, and delivered one page at a time as
//! the caret scrolls past the end of what has been shown.
//!
//! ## Example
//!
//! ```no_run
//! use pickify::{select_from_options, OptionSource, SelectConfig, SelectionMode};
//!
//! fn main() -> miette::Result<()> {
//!     let config = SelectConfig::new(
//!         OptionSource::labels(["Red", "Green", "Blue"]),
//!         SelectionMode::Single,
//!     )
//!     .with_label("Pick a color")
//!     .on_change(|selection| println!("changed: {selection:?}"));
//!
//!     match select_from_options(config)? {
//!         Some(selection) => println!("confirmed: {selection:?}"),
//!         None => println!("dismissed"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Keyboard
//!
//! | Key              | Effect                                              |
//! | ---------------- | --------------------------------------------------- |
//! | Up / Down        | Move focus; Down past the end loads the next page   |
//! | printable chars  | Narrow the candidate list (substring match on label)|
//! | Backspace        | Widen the candidate list                            |
//! | Space            | Toggle the focused option (multi mode)              |
//! | Enter            | Confirm                                             |
//! | Delete           | Clear the selection                                 |
//! | Esc / Ctrl+C     | Dismiss without changing the selection              |

#![warn(clippy::all)]
#![warn(clippy::unwrap_in_result)]
#![warn(rust_2018_idioms)]

pub mod components;
pub mod error;
pub mod event_loop;
pub mod function_component;
pub mod keypress;
pub mod loader;
pub mod logging;
pub mod options;
pub mod public_api;
pub mod scroll;
pub mod state;
pub mod term;
pub mod test_utils;

pub use components::*;
pub use error::*;
pub use event_loop::*;
pub use function_component::*;
pub use keypress::*;
pub use loader::*;
pub use logging::*;
pub use options::*;
pub use public_api::*;
pub use scroll::*;
pub use state::*;
pub use term::*;
pub use test_utils::*;

/// Enables extra [tracing] output on hot paths while working on this crate.
pub const DEVELOPMENT_MODE: bool = false;
