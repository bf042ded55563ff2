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

use smallvec::SmallVec;

use crate::{filter_candidates,
            get_scroll_adjusted_row_index,
            locate_cursor_in_viewport,
            CalculateResizeHint,
            CanonicalOption,
            CaretVerticalViewportLocation,
            Selection,
            SelectionMode,
            Size};

/// Short-lived buffer for the values currently selected.
pub type SelectedValues = SmallVec<[String; 8]>;

/// Which part of the open/search lifecycle the menu is in.
///
/// Opening always re-enters with an empty search term and cursor zero.
/// Typing transitions to [MenuPhase::OpenSearching] and resets the cursor;
/// clearing the term returns to [MenuPhase::OpenEmptyQuery] and resets the
/// cursor; choosing an option or dismissing transitions to
/// [MenuPhase::Closed].
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum MenuPhase {
    #[default]
    Closed,
    OpenEmptyQuery,
    OpenSearching,
}

#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub enum ResizeHint {
    GotBigger,
    GotSmaller,
    #[default]
    NoChange,
}

/// All transient state owned by one run of the selection component. Derived
/// fresh from caller-supplied configuration on every run; nothing here is
/// shared across component instances.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct State {
    /// The canonical option list, derived once from the option source.
    pub options: Vec<CanonicalOption>,
    /// The in-flight search term.
    pub search_term: String,
    /// Pagination cursor: options already delivered for the current term.
    pub delivered_count: usize,
    /// How many candidates matched the current term in total.
    pub candidate_count: usize,
    /// The delivered page(s) for the current term, in candidate order.
    pub visible: Vec<CanonicalOption>,
    /// Whether candidates remain past the delivered pages.
    pub has_more: bool,
    pub page_size: usize,
    /// Caret position relative to the viewport top. Not adjusted for
    /// [scroll_offset_row_index](State::scroll_offset_row_index).
    pub raw_caret_row_index: usize,
    pub scroll_offset_row_index: usize,
    pub selected_values: SelectedValues,
    pub selection_mode: SelectionMode,
    pub phase: MenuPhase,
    pub header: String,
    pub placeholder: String,
    pub error_text: Option<String>,
    pub required: bool,
    /// Max option rows in the viewport. Does not include header/footer rows.
    pub max_display_height: usize,
    pub max_display_width: usize,
    pub resize_hint: Option<ResizeHint>,
    pub window_size: Option<Size>,
}

impl State {
    /// Re-enter the menu: empty search term, cursor zero, first page loaded.
    pub fn open(&mut self) {
        self.search_term.clear();
        self.phase = MenuPhase::OpenEmptyQuery;
        self.reload_current_term();
    }

    pub fn close(&mut self) { self.phase = MenuPhase::Closed; }

    /// Append a character to the search term. Resets the pagination cursor
    /// and snaps the viewport back to the top, so the top-ranked match is
    /// never hidden behind a stale scroll offset.
    pub fn push_search_char(&mut self, ch: char) {
        self.search_term.push(ch);
        self.phase = MenuPhase::OpenSearching;
        self.reload_current_term();
    }

    /// Remove the last character of the search term. Clearing the term
    /// returns to the empty-query phase; either way the cursor resets.
    pub fn pop_search_char(&mut self) {
        if self.search_term.pop().is_none() {
            return;
        }
        self.phase = if self.search_term.is_empty() {
            MenuPhase::OpenEmptyQuery
        } else {
            MenuPhase::OpenSearching
        };
        self.reload_current_term();
    }

    /// Recompute candidates for the current term and deliver the first page.
    fn reload_current_term(&mut self) {
        let candidates = filter_candidates(&self.options, &self.search_term);
        self.candidate_count = candidates.len();
        let take = self.page_size.min(candidates.len());
        self.visible = candidates[..take].iter().map(|it| (*it).clone()).collect();
        self.delivered_count = take;
        self.has_more = candidates.len() > take;
        self.raw_caret_row_index = 0;
        self.scroll_offset_row_index = 0;
    }

    /// Deliver the next page for the current term, extending the visible
    /// list in place. No-op when nothing remains.
    pub fn load_next_page(&mut self) {
        if !self.has_more {
            return;
        }
        let candidates = filter_candidates(&self.options, &self.search_term);
        let end = self
            .delivered_count
            .saturating_add(self.page_size)
            .min(candidates.len());
        self.visible = candidates[..end].iter().map(|it| (*it).clone()).collect();
        self.delivered_count = end;
        self.has_more = candidates.len() > end;
    }

    /// Option rows actually shown: the delivered list clipped to the max
    /// display height.
    pub fn items_viewport_height(&self) -> usize {
        self.visible.len().min(self.max_display_height)
    }

    /// The row index (into the visible list) that has keyboard focus.
    pub fn get_focused_index(&self) -> usize {
        get_scroll_adjusted_row_index(
            self.raw_caret_row_index,
            self.scroll_offset_row_index,
        )
    }

    pub fn focused_option(&self) -> Option<&CanonicalOption> {
        self.visible.get(self.get_focused_index())
    }

    pub fn locate_cursor_in_viewport(&self) -> CaretVerticalViewportLocation {
        locate_cursor_in_viewport(
            self.raw_caret_row_index,
            self.scroll_offset_row_index,
            self.items_viewport_height(),
            self.visible.len(),
        )
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected_values.iter().any(|it| it == value)
    }

    /// Single mode: replace the selection with one value.
    pub fn set_single_selection(&mut self, value: impl Into<String>) {
        self.selected_values.clear();
        self.selected_values.push(value.into());
    }

    /// Multi mode: toggle the focused option in or out of the selected set.
    /// Returns false when nothing has focus (empty candidate list).
    pub fn toggle_focused(&mut self) -> bool {
        let Some(focused) = self.focused_option() else {
            return false;
        };
        let value = focused.value.clone();
        match self.selected_values.iter().position(|it| *it == value) {
            Some(index) => {
                self.selected_values.remove(index);
            }
            None => self.selected_values.push(value),
        }
        true
    }

    pub fn clear_selection(&mut self) { self.selected_values.clear(); }

    /// The complete current selection, shaped by the construction-time mode.
    /// Multi mode always yields the full set, never a delta.
    pub fn current_selection(&self) -> Selection {
        match self.selection_mode {
            SelectionMode::Single => {
                Selection::Single(self.selected_values.first().cloned())
            }
            SelectionMode::Multiple => {
                Selection::Multiple(self.selected_values.to_vec())
            }
        }
    }
}

impl CalculateResizeHint for State {
    fn set_size(&mut self, new_size: Size) {
        self.window_size = Some(new_size);
        self.clear_resize_hint();
    }

    fn get_resize_hint(&self) -> Option<ResizeHint> { self.resize_hint.clone() }

    fn set_resize_hint(&mut self, new_size: Size) {
        self.resize_hint = if let Some(old_size) = self.window_size {
            if new_size != old_size {
                if (new_size.col_count > old_size.col_count)
                    || (new_size.row_count > old_size.row_count)
                {
                    Some(ResizeHint::GotBigger)
                } else if (new_size.col_count < old_size.col_count)
                    || (new_size.row_count < old_size.row_count)
                {
                    Some(ResizeHint::GotSmaller)
                } else {
                    Some(ResizeHint::NoChange)
                }
            } else {
                None
            }
        } else {
            None
        };

        if self.window_size.is_some() {
            self.set_size(new_size);
        }
    }

    fn clear_resize_hint(&mut self) { self.resize_hint = None; }
}
