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

//! ### Vertical scrolling and viewport
//!
//! [locate_cursor_in_viewport] classifies where the caret sits relative to
//! the viewport (the visible slice of the delivered option rows).
//!
//! ```text
//!    +0--------------------+ <- AtAbsoluteTop
//!    0                     |
//!    |        above        | <- AboveTopOfViewport
//!    |                     |
//!    +--- scroll_offset ---+ <- AtTopOfViewport
//!    |         ↑           |
//!    |                     |
//!    |      within vp      | <- InMiddleOfViewport
//!    |                     |
//!    |         ↓           |
//!    +--- scroll_offset ---+ <- AtBottomOfViewport
//!    |    + vp height      |
//!    |                     |
//!    |        below        | <- BelowBottomOfViewport
//!    |                     |
//!    +---------------------+ <- AtAbsoluteBottom
//! ```

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum CaretVerticalViewportLocation {
    AtAbsoluteTop,
    AboveTopOfViewport,
    AtTopOfViewport,
    InMiddleOfViewport,
    AtBottomOfViewport,
    BelowBottomOfViewport,
    AtAbsoluteBottom,
    NotFound,
}

pub fn get_scroll_adjusted_row_index(
    raw_caret_row_index: usize,
    scroll_offset_row_index: usize,
) -> usize {
    raw_caret_row_index + scroll_offset_row_index
}

pub fn locate_cursor_in_viewport(
    raw_caret_row_index: usize,
    scroll_offset_row_index: usize,
    viewport_height: usize,
    items_size: usize,
) -> CaretVerticalViewportLocation {
    let abs_row_index =
        get_scroll_adjusted_row_index(raw_caret_row_index, scroll_offset_row_index);

    if items_size == 0 || abs_row_index >= items_size || viewport_height == 0 {
        return CaretVerticalViewportLocation::NotFound;
    }

    // Note the ordering of the checks below matters: AtAbsoluteBottom takes
    // precedence over AtAbsoluteTop when there is only one item, and the
    // viewport's last row takes precedence over AtAbsoluteTop so a one-row
    // viewport scrolls instead of walking the caret out of view.
    if abs_row_index == items_size - 1 {
        CaretVerticalViewportLocation::AtAbsoluteBottom
    } else if abs_row_index == scroll_offset_row_index + viewport_height - 1 {
        CaretVerticalViewportLocation::AtBottomOfViewport
    } else if abs_row_index == 0 {
        CaretVerticalViewportLocation::AtAbsoluteTop
    } else if abs_row_index < scroll_offset_row_index {
        CaretVerticalViewportLocation::AboveTopOfViewport
    } else if abs_row_index == scroll_offset_row_index {
        CaretVerticalViewportLocation::AtTopOfViewport
    } else if abs_row_index < scroll_offset_row_index + viewport_height - 1 {
        CaretVerticalViewportLocation::InMiddleOfViewport
    } else {
        CaretVerticalViewportLocation::BelowBottomOfViewport
    }
}
