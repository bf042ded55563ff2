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

use std::io::{Result, Write};

use crossterm::{cursor::{MoveToColumn, MoveToNextLine, MoveToPreviousLine},
                queue,
                style::{Attribute, Print, ResetColor, SetAttribute},
                terminal::{Clear, ClearType}};

use crate::{apply_style,
            FunctionComponent,
            SelectionMode,
            State,
            Style,
            StyleSheet};

/// Label row plus search row.
pub const HEADER_HEIGHT: usize = 2;
/// Status row plus error row.
pub const FOOTER_HEIGHT: usize = 2;

const FOCUSED_CARET: &str = " › ";
const UNFOCUSED_PAD: &str = "   ";
const SINGLE_SELECTED: &str = "◉ ";
const SINGLE_UNSELECTED: &str = "◌ ";
const MULTI_SELECTED: &str = "✔ ";
const MULTI_UNSELECTED: &str = "☐ ";
const SEARCH_PROMPT: &str = " / ";
const NO_MATCHES: &str = "   No matches";

/// Renders the menu into a fixed-height viewport: two header rows (label and
/// search term), [State::max_display_height] option rows (blank-padded so the
/// viewport never changes height while pages load), and two footer rows
/// (pagination status and error text).
pub struct SelectComponent<W: Write> {
    pub write: W,
    pub style: StyleSheet,
}

impl<W: Write> FunctionComponent<W, State> for SelectComponent<W> {
    fn get_write(&mut self) -> &mut W { &mut self.write }

    fn calculate_header_viewport_height(&self, _state: &State) -> usize {
        HEADER_HEIGHT
    }

    fn calculate_items_viewport_height(&self, state: &State) -> usize {
        state.max_display_height
    }

    fn calculate_footer_viewport_height(&self, _state: &State) -> usize {
        FOOTER_HEIGHT
    }

    fn render(&mut self, state: &mut State) -> Result<()> {
        let style = self.style;
        let width = state.max_display_width;

        // Build every row up front, so the writer is borrowed only once.
        let mut rows: Vec<(String, Style)> =
            Vec::with_capacity(self.calculate_total_viewport_height(state));

        let header_text = {
            let mut text = format!(" {}", state.header);
            if state.required {
                text.push_str(" *");
            }
            text
        };
        rows.push((
            clip_string_to_width_with_ellipsis(header_text, width),
            style.header_style,
        ));

        let (search_text, search_row_style) = if state.search_term.is_empty() {
            (
                format!("{SEARCH_PROMPT}{}", state.placeholder),
                style.hint_style,
            )
        } else {
            (
                format!("{SEARCH_PROMPT}{}", state.search_term),
                style.search_style,
            )
        };
        rows.push((
            clip_string_to_width_with_ellipsis(search_text, width),
            search_row_style,
        ));

        let focused_index = state.get_focused_index();
        for viewport_row_index in 0..state.max_display_height {
            let data_row_index =
                state.scroll_offset_row_index + viewport_row_index;
            let row = if state.visible.is_empty() && viewport_row_index == 0 {
                (NO_MATCHES.to_string(), style.hint_style)
            } else if let Some(option) = state.visible.get(data_row_index) {
                let is_focused = data_row_index == focused_index;
                let is_selected = state.is_selected(&option.value);
                let caret = if is_focused { FOCUSED_CARET } else { UNFOCUSED_PAD };
                let mark = match state.selection_mode {
                    SelectionMode::Single => {
                        if is_selected { SINGLE_SELECTED } else { SINGLE_UNSELECTED }
                    }
                    SelectionMode::Multiple => {
                        if is_selected { MULTI_SELECTED } else { MULTI_UNSELECTED }
                    }
                };
                let row_style = if is_focused {
                    style.focused_style
                } else if is_selected {
                    style.selected_style
                } else {
                    style.normal_style
                };
                (
                    clip_string_to_width_with_ellipsis(
                        format!("{caret}{mark}{}", option.label),
                        width,
                    ),
                    row_style,
                )
            } else {
                // Blank padding row, keeps the viewport height stable.
                (String::new(), style.normal_style)
            };
            rows.push(row);
        }

        let status_text = {
            let mut text = String::from(" ");
            if let SelectionMode::Multiple = state.selection_mode {
                text.push_str(&format!(
                    "{} selected · ",
                    state.selected_values.len()
                ));
            }
            text.push_str(&format!(
                "{}/{}",
                state.delivered_count, state.candidate_count
            ));
            if state.has_more {
                text.push_str(" · ↓ more");
            }
            text
        };
        rows.push((
            clip_string_to_width_with_ellipsis(status_text, width),
            style.hint_style,
        ));

        rows.push(match &state.error_text {
            Some(error_text) => (
                clip_string_to_width_with_ellipsis(
                    format!(" ✗ {error_text}"),
                    width,
                ),
                style.error_style,
            ),
            None => (String::new(), style.normal_style),
        });

        let row_count = rows.len();
        let writer = self.get_write();
        for (text, row_style) in &rows {
            queue! {
                writer,
                MoveToColumn(0),
                ResetColor,
                SetAttribute(Attribute::Reset),
                Clear(ClearType::CurrentLine),
            }?;
            apply_style!(writer, *row_style)?;
            queue! {
                writer,
                Print(text),
                ResetColor,
                SetAttribute(Attribute::Reset),
                MoveToNextLine(1),
            }?;
        }

        // Move the cursor back to the top left of the viewport.
        queue! {
            writer,
            MoveToPreviousLine(row_count as u16),
        }?;

        writer.flush()?;

        Ok(())
    }
}

/// Clip to the given display width on char boundaries. A width of zero means
/// "don't clip".
pub fn clip_string_to_width_with_ellipsis(line: String, width: usize) -> String {
    if width == 0 || line.chars().count() <= width {
        return line;
    }
    if width <= 3 {
        return line.chars().take(width).collect();
    }
    let clipped: String = line.chars().take(width - 3).collect();
    format!("{clipped}...")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{OptionSource, TestStringWriter};

    fn create_state() -> State {
        let options =
            OptionSource::mapping([("a", "Apple"), ("b", "Banana"), ("c", "Cherry")])
                .unwrap()
                .adapt();
        let mut state = State {
            options,
            page_size: 10,
            max_display_height: 3,
            max_display_width: 40,
            header: "Pick a fruit".to_string(),
            placeholder: "Type to search".to_string(),
            ..Default::default()
        };
        state.open();
        state
    }

    fn render_to_string(state: &mut State) -> String {
        let mut component = SelectComponent {
            write: TestStringWriter::new(),
            style: StyleSheet::default(),
        };
        component.render(state).unwrap();
        component.write.get_buffer().to_string()
    }

    #[test]
    fn renders_header_items_and_status() {
        let mut state = create_state();
        let output = render_to_string(&mut state);

        assert!(output.contains("Pick a fruit"));
        assert!(output.contains("Type to search"));
        assert!(output.contains("Apple"));
        assert!(output.contains("Cherry"));
        assert!(output.contains("3/3"));
        // First row has focus.
        assert!(output.contains(&format!("{FOCUSED_CARET}{SINGLE_UNSELECTED}Apple")));
    }

    #[test]
    fn renders_required_marker() {
        let mut state = create_state();
        state.required = true;
        let output = render_to_string(&mut state);
        assert!(output.contains("Pick a fruit *"));
    }

    #[test]
    fn renders_search_term_and_pagination_hint() {
        let mut state = create_state();
        state.page_size = 2;
        state.open();
        state.push_search_char('a');

        let output = render_to_string(&mut state);
        // "a" matches Apple and Banana; page size 2 exhausts them.
        assert!(output.contains(&format!("{SEARCH_PROMPT}a")));
        assert!(output.contains("2/2"));
        assert!(!output.contains("↓ more"));
    }

    #[test]
    fn renders_more_hint_when_candidates_remain() {
        let mut state = create_state();
        state.page_size = 2;
        state.open();

        let output = render_to_string(&mut state);
        assert!(output.contains("2/3"));
        assert!(output.contains("↓ more"));
        assert!(!output.contains("Cherry"));
    }

    #[test]
    fn renders_no_matches_empty_state() {
        let mut state = create_state();
        for ch in "zzz".chars() {
            state.push_search_char(ch);
        }
        let output = render_to_string(&mut state);
        assert!(output.contains("No matches"));
        assert!(output.contains("0/0"));
    }

    #[test]
    fn renders_error_row() {
        let mut state = create_state();
        state.error_text = Some("something went wrong".to_string());
        let output = render_to_string(&mut state);
        assert!(output.contains("✗ something went wrong"));
    }

    #[test]
    fn renders_multi_mode_marks_and_count() {
        let mut state = create_state();
        state.selection_mode = SelectionMode::Multiple;
        state.selected_values.push("b".to_string());

        let output = render_to_string(&mut state);
        assert!(output.contains(&format!("{MULTI_SELECTED}Banana")));
        assert!(output.contains(&format!("{MULTI_UNSELECTED}Cherry")));
        assert!(output.contains("1 selected"));
    }

    #[test]
    fn clips_long_lines_on_char_boundaries() {
        assert_eq!(
            clip_string_to_width_with_ellipsis("hello world".to_string(), 8),
            "hello..."
        );
        assert_eq!(
            clip_string_to_width_with_ellipsis("héllö wörld".to_string(), 8),
            "héllö..."
        );
        assert_eq!(
            clip_string_to_width_with_ellipsis("short".to_string(), 8),
            "short"
        );
        assert_eq!(
            clip_string_to_width_with_ellipsis("unclipped".to_string(), 0),
            "unclipped"
        );
        assert_eq!(
            clip_string_to_width_with_ellipsis("tiny".to_string(), 2),
            "ti"
        );
    }
}
