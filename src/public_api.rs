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

use std::io::stdout;

use clap::ValueEnum;
use miette::IntoDiagnostic;
use serde::Serialize;

use crate::{enter_event_loop,
            get_size,
            get_terminal_width,
            is_fully_uninteractive_terminal,
            CalculateResizeHint,
            CaretVerticalViewportLocation,
            ConfigError,
            CrosstermKeyPressReader,
            DefaultSelection,
            EventLoopResult,
            KeyPress,
            OptionSource,
            RawModeGuard,
            SelectComponent,
            SelectedValues,
            State,
            StyleSheet,
            TTYResult,
            DEVELOPMENT_MODE};

pub const DEFAULT_HEIGHT: usize = 5;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Whether the menu holds at most one value or a set. Fixed at construction
/// time; switching modes means building a new component.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum SelectionMode {
    /// Select only one option, or clear the selection.
    #[default]
    Single,
    /// Select multiple options; the full set is always reported, never a
    /// delta.
    Multiple,
}

/// The complete selection, shaped by the [SelectionMode] of the component
/// that produced it. `Single(None)` means "explicitly cleared", which is a
/// legitimate outcome and distinct from a dismissal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Selection {
    Single(Option<String>),
    Multiple(Vec<String>),
}

impl Selection {
    pub fn shape_name(&self) -> &'static str {
        match self {
            Selection::Single(_) => "single",
            Selection::Multiple(_) => "multiple",
        }
    }

    /// A payload whose shape disagrees with the mode is a contract violation,
    /// surfaced as an error rather than coerced.
    pub fn check_shape(&self, mode: SelectionMode) -> Result<(), ConfigError> {
        match (mode, self) {
            (SelectionMode::Single, Selection::Single(_))
            | (SelectionMode::Multiple, Selection::Multiple(_)) => Ok(()),
            _ => Err(ConfigError::SelectionShapeMismatch {
                mode,
                payload_shape: self.shape_name(),
            }),
        }
    }

    /// Flatten to the list of selected stored values.
    pub fn values(&self) -> Vec<String> {
        match self {
            Selection::Single(Some(value)) => vec![value.clone()],
            Selection::Single(None) => vec![],
            Selection::Multiple(values) => values.clone(),
        }
    }
}

/// Invoked on every user-visible selection change (choose, toggle, clear),
/// but not on dismissal. Multi mode receives the full set every time.
pub type OnChange = Box<dyn FnMut(&Selection)>;

/// Everything the caller controls about one run of the menu. Construct with
/// [SelectConfig::new] and chain the builder methods.
pub struct SelectConfig {
    pub options: OptionSource,
    pub mode: SelectionMode,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub error: Option<String>,
    pub disabled: bool,
    pub required: bool,
    pub default_value: Option<DefaultSelection>,
    pub page_size: usize,
    pub max_height_row_count: Option<usize>,
    pub max_width_col_count: Option<usize>,
    pub style: StyleSheet,
    pub on_change: Option<OnChange>,
}

impl SelectConfig {
    pub fn new(options: OptionSource, mode: SelectionMode) -> Self {
        Self {
            options,
            mode,
            label: None,
            placeholder: None,
            error: None,
            disabled: false,
            required: false,
            default_value: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_height_row_count: None,
            max_width_col_count: None,
            style: StyleSheet::default(),
            on_change: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, default_value: DefaultSelection) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_height(mut self, row_count: usize) -> Self {
        self.max_height_row_count = Some(row_count);
        self
    }

    pub fn with_max_width(mut self, col_count: usize) -> Self {
        self.max_width_col_count = Some(col_count);
        self
    }

    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.style = style;
        self
    }

    pub fn on_change(mut self, on_change: impl FnMut(&Selection) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }
}

/// Run the menu to completion in the current terminal.
///
/// Returns:
/// - `Ok(Some(selection))` when the user confirmed or cleared.
/// - `Ok(None)` when the user dismissed (Esc / Ctrl+C), or the terminal is
///   fully uninteractive.
/// - `Err(..)` for configuration contract violations (duplicate values,
///   unknown defaults, zero page size, shape mismatches) or terminal I/O
///   failures.
pub fn select_from_options(config: SelectConfig) -> miette::Result<Option<Selection>> {
    let SelectConfig {
        options,
        mode,
        label,
        placeholder,
        error,
        disabled,
        required,
        default_value,
        page_size,
        max_height_row_count,
        max_width_col_count,
        style,
        on_change,
    } = config;

    if page_size == 0 {
        return Err(ConfigError::InvalidPageSize.into());
    }

    // Resolve defaults against the source before anything renders. Unknown
    // defaults fail loudly here.
    let mut selected_values = SelectedValues::new();
    if let Some(default) = &default_value {
        let default_shape = match default {
            DefaultSelection::Single(_) => "single",
            DefaultSelection::Multiple(_) => "multiple",
        };
        match (mode, default) {
            (SelectionMode::Single, DefaultSelection::Single(_))
            | (SelectionMode::Multiple, DefaultSelection::Multiple(_)) => {}
            _ => {
                return Err(ConfigError::SelectionShapeMismatch {
                    mode,
                    payload_shape: default_shape,
                }
                .into())
            }
        }
        for option in options.resolve_default(default)? {
            selected_values.push(option.value);
        }
    }

    let canonical_options = options.adapt();

    let max_display_height = {
        let requested = match max_height_row_count {
            Some(row_count) if row_count > 0 => row_count,
            _ => DEFAULT_HEIGHT,
        };
        requested.min(canonical_options.len()).max(1)
    };
    let max_display_width = match max_width_col_count {
        Some(col_count) if col_count > 0 => col_count,
        _ => get_terminal_width(),
    };

    let mut state = State {
        options: canonical_options,
        page_size,
        selected_values,
        selection_mode: mode,
        header: label.unwrap_or_else(|| "Select an option".to_string()),
        placeholder: placeholder.unwrap_or_else(|| "Type to search".to_string()),
        error_text: error,
        required,
        max_display_height,
        max_display_width,
        ..Default::default()
    };

    // A disabled menu never opens; the caller gets the initial selection
    // back unchanged.
    if disabled {
        return Ok(Some(state.current_selection()));
    }

    // Don't block when there is no terminal to interact with (cargo test,
    // CI pipelines).
    if let TTYResult::IsNotInteractive = is_fully_uninteractive_terminal() {
        return Ok(None);
    }

    state.open();
    if let Ok(size) = get_size() {
        state.set_size(size);
    }

    let mut function_component = SelectComponent {
        write: stdout(),
        style,
    };
    let mut maybe_on_change = on_change;

    let result = {
        let _raw_mode_guard = RawModeGuard::new().into_diagnostic()?;
        enter_event_loop(
            &mut state,
            &mut function_component,
            |state, key_press| keypress_handler(state, key_press, &mut maybe_on_change),
            &mut CrosstermKeyPressReader,
        )
        .into_diagnostic()?
    };

    match result {
        EventLoopResult::ExitWithResult(selection) => {
            selection.check_shape(mode)?;
            Ok(Some(selection))
        }
        EventLoopResult::ExitWithoutResult => Ok(None),
        EventLoopResult::ExitWithError => Err(miette::miette!(
            "selection aborted: terminal input failed or the change payload \
             violated the selection contract"
        )),
        _ => Ok(None),
    }
}

/// Run the current selection through the shape check, then hand it to the
/// caller's change listener.
fn notify_change(
    state: &State,
    maybe_on_change: &mut Option<OnChange>,
) -> Result<Selection, ConfigError> {
    let selection = state.current_selection();
    selection.check_shape(state.selection_mode)?;
    if let Some(on_change) = maybe_on_change.as_mut() {
        on_change(&selection);
    }
    Ok(selection)
}

/// All keyboard semantics of the menu live here. The event loop stays dumb;
/// this handler owns the mapping from key presses to state transitions.
pub(crate) fn keypress_handler(
    state: &mut State,
    key_press: KeyPress,
    maybe_on_change: &mut Option<OnChange>,
) -> EventLoopResult {
    DEVELOPMENT_MODE.then(|| {
        tracing::debug!(?key_press, phase = ?state.phase, "keypress");
    });

    match key_press {
        KeyPress::Down => {
            // At the very end of the delivered list, Down pulls in the next
            // page (when one exists) before moving.
            if state.has_more
                && matches!(
                    state.locate_cursor_in_viewport(),
                    CaretVerticalViewportLocation::AtAbsoluteBottom
                )
            {
                state.load_next_page();
            }
            match state.locate_cursor_in_viewport() {
                CaretVerticalViewportLocation::AtAbsoluteTop
                | CaretVerticalViewportLocation::AboveTopOfViewport
                | CaretVerticalViewportLocation::AtTopOfViewport
                | CaretVerticalViewportLocation::InMiddleOfViewport => {
                    state.raw_caret_row_index += 1;
                }
                CaretVerticalViewportLocation::AtBottomOfViewport
                | CaretVerticalViewportLocation::BelowBottomOfViewport => {
                    state.scroll_offset_row_index += 1;
                }
                CaretVerticalViewportLocation::AtAbsoluteBottom
                | CaretVerticalViewportLocation::NotFound => {}
            }
            EventLoopResult::ContinueAndRerender
        }

        KeyPress::Up => {
            match state.locate_cursor_in_viewport() {
                CaretVerticalViewportLocation::NotFound
                | CaretVerticalViewportLocation::AtAbsoluteTop => {}
                CaretVerticalViewportLocation::AboveTopOfViewport
                | CaretVerticalViewportLocation::AtTopOfViewport => {
                    state.scroll_offset_row_index =
                        state.scroll_offset_row_index.saturating_sub(1);
                }
                CaretVerticalViewportLocation::InMiddleOfViewport => {
                    state.raw_caret_row_index =
                        state.raw_caret_row_index.saturating_sub(1);
                }
                CaretVerticalViewportLocation::AtBottomOfViewport
                | CaretVerticalViewportLocation::BelowBottomOfViewport
                | CaretVerticalViewportLocation::AtAbsoluteBottom => {
                    if state.raw_caret_row_index > 0 {
                        state.raw_caret_row_index -= 1;
                    } else {
                        state.scroll_offset_row_index =
                            state.scroll_offset_row_index.saturating_sub(1);
                    }
                }
            }
            EventLoopResult::ContinueAndRerender
        }

        KeyPress::Enter => match state.selection_mode {
            SelectionMode::Single => {
                let Some(value) = state.focused_option().map(|it| it.value.clone())
                else {
                    // Nothing to confirm on an empty candidate list.
                    return EventLoopResult::Continue;
                };
                state.set_single_selection(value);
                state.close();
                match notify_change(state, maybe_on_change) {
                    Ok(selection) => EventLoopResult::ExitWithResult(selection),
                    Err(error) => {
                        tracing::error!(%error, "selection contract violation");
                        EventLoopResult::ExitWithError
                    }
                }
            }
            SelectionMode::Multiple => {
                // Confirm delivers the complete (possibly empty) set to the
                // caller; toggles already notified the change listener.
                state.close();
                EventLoopResult::ExitWithResult(state.current_selection())
            }
        },

        KeyPress::Space => match state.selection_mode {
            SelectionMode::Multiple => {
                if !state.toggle_focused() {
                    return EventLoopResult::Continue;
                }
                match notify_change(state, maybe_on_change) {
                    Ok(_) => EventLoopResult::ContinueAndRerender,
                    Err(error) => {
                        tracing::error!(%error, "selection contract violation");
                        EventLoopResult::ExitWithError
                    }
                }
            }
            // Single mode has no toggling; space is just a search character.
            SelectionMode::Single => {
                state.push_search_char(' ');
                EventLoopResult::ContinueAndRerender
            }
        },

        KeyPress::Delete => {
            state.clear_selection();
            match state.selection_mode {
                SelectionMode::Single => {
                    state.close();
                    match notify_change(state, maybe_on_change) {
                        Ok(selection) => EventLoopResult::ExitWithResult(selection),
                        Err(error) => {
                            tracing::error!(%error, "selection contract violation");
                            EventLoopResult::ExitWithError
                        }
                    }
                }
                SelectionMode::Multiple => match notify_change(state, maybe_on_change)
                {
                    Ok(_) => EventLoopResult::ContinueAndRerender,
                    Err(error) => {
                        tracing::error!(%error, "selection contract violation");
                        EventLoopResult::ExitWithError
                    }
                },
            }
        }

        KeyPress::Char(ch) => {
            state.push_search_char(ch);
            EventLoopResult::ContinueAndRerender
        }

        KeyPress::Backspace => {
            state.pop_search_char();
            EventLoopResult::ContinueAndRerender
        }

        // Dismissal leaves the selection untouched and notifies nobody.
        KeyPress::Esc | KeyPress::CtrlC => {
            state.close();
            EventLoopResult::ExitWithoutResult
        }

        KeyPress::Resize(size) => {
            state.set_resize_hint(size);
            EventLoopResult::ContinueAndRerenderAndClear
        }

        KeyPress::Noop => EventLoopResult::Continue,

        KeyPress::Error => EventLoopResult::ExitWithError,
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{TestStringWriter, TestVecKeyPressReader};

    fn create_state(mode: SelectionMode) -> State {
        let options =
            OptionSource::mapping([("a", "Apple"), ("b", "Banana"), ("c", "Cherry")])
                .unwrap()
                .adapt();
        let mut state = State {
            options,
            page_size: 10,
            max_display_height: 3,
            max_display_width: 40,
            selection_mode: mode,
            header: "Pick".to_string(),
            placeholder: "Search".to_string(),
            ..Default::default()
        };
        state.open();
        state
    }

    fn run(
        state: &mut State,
        key_press_vec: Vec<KeyPress>,
        changes: Rc<RefCell<Vec<Selection>>>,
    ) -> EventLoopResult {
        let mut component = SelectComponent {
            write: TestStringWriter::new(),
            style: StyleSheet::default(),
        };
        let mut reader = TestVecKeyPressReader {
            key_press_vec,
            index: None,
        };
        let mut maybe_on_change: Option<OnChange> =
            Some(Box::new(move |selection: &Selection| {
                changes.borrow_mut().push(selection.clone());
            }));
        enter_event_loop(
            state,
            &mut component,
            |state, key_press| keypress_handler(state, key_press, &mut maybe_on_change),
            &mut reader,
        )
        .unwrap()
    }

    #[test]
    fn single_mode_down_down_enter_selects_third_option() {
        let mut state = create_state(SelectionMode::Single);
        let changes = Rc::new(RefCell::new(Vec::new()));

        let result = run(
            &mut state,
            vec![KeyPress::Down, KeyPress::Down, KeyPress::Enter],
            changes.clone(),
        );

        assert_eq!(
            result,
            EventLoopResult::ExitWithResult(Selection::Single(Some("c".to_string())))
        );
        assert_eq!(
            *changes.borrow(),
            vec![Selection::Single(Some("c".to_string()))]
        );
    }

    #[test]
    fn typing_filters_then_enter_selects_the_match() {
        let mut state = create_state(SelectionMode::Single);
        let changes = Rc::new(RefCell::new(Vec::new()));

        // Move focus away first to prove typing resets it to the top.
        let result = run(
            &mut state,
            vec![KeyPress::Down, KeyPress::Char('c'), KeyPress::Enter],
            changes.clone(),
        );

        // "c" matches only Cherry (case-insensitive, on labels).
        assert_eq!(
            result,
            EventLoopResult::ExitWithResult(Selection::Single(Some("c".to_string())))
        );
    }

    #[test]
    fn enter_on_empty_candidate_list_does_not_confirm() {
        let mut state = create_state(SelectionMode::Single);
        let changes = Rc::new(RefCell::new(Vec::new()));

        let result = run(
            &mut state,
            vec![
                KeyPress::Char('z'),
                KeyPress::Char('z'),
                KeyPress::Enter,
                KeyPress::Esc,
            ],
            changes.clone(),
        );

        assert_eq!(result, EventLoopResult::ExitWithoutResult);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn multi_mode_space_toggles_and_reports_the_full_set() {
        let mut state = create_state(SelectionMode::Multiple);
        state.selected_values.push("a".to_string());
        state.selected_values.push("c".to_string());
        let changes = Rc::new(RefCell::new(Vec::new()));

        // Space deselects the focused Apple; Enter confirms.
        let result = run(
            &mut state,
            vec![KeyPress::Space, KeyPress::Enter],
            changes.clone(),
        );

        assert_eq!(
            *changes.borrow(),
            vec![Selection::Multiple(vec!["c".to_string()])]
        );
        assert_eq!(
            result,
            EventLoopResult::ExitWithResult(Selection::Multiple(vec![
                "c".to_string()
            ]))
        );
    }

    #[test]
    fn delete_in_single_mode_clears_and_exits() {
        let mut state = create_state(SelectionMode::Single);
        state.selected_values.push("b".to_string());
        let changes = Rc::new(RefCell::new(Vec::new()));

        let result = run(&mut state, vec![KeyPress::Delete], changes.clone());

        assert_eq!(
            result,
            EventLoopResult::ExitWithResult(Selection::Single(None))
        );
        assert_eq!(*changes.borrow(), vec![Selection::Single(None)]);
    }

    #[test]
    fn delete_in_multi_mode_clears_but_stays_open() {
        let mut state = create_state(SelectionMode::Multiple);
        state.selected_values.push("a".to_string());
        let changes = Rc::new(RefCell::new(Vec::new()));

        let result = run(
            &mut state,
            vec![KeyPress::Delete, KeyPress::Enter],
            changes.clone(),
        );

        assert_eq!(*changes.borrow(), vec![Selection::Multiple(vec![])]);
        assert_eq!(
            result,
            EventLoopResult::ExitWithResult(Selection::Multiple(vec![]))
        );
    }

    #[test]
    fn esc_dismisses_without_result_or_notification() {
        let mut state = create_state(SelectionMode::Single);
        state.selected_values.push("b".to_string());
        let changes = Rc::new(RefCell::new(Vec::new()));

        let result = run(
            &mut state,
            vec![KeyPress::Down, KeyPress::Esc],
            changes.clone(),
        );

        assert_eq!(result, EventLoopResult::ExitWithoutResult);
        assert!(changes.borrow().is_empty());
        // The previous selection survives a dismissal.
        assert_eq!(
            state.current_selection(),
            Selection::Single(Some("b".to_string()))
        );
    }

    #[test]
    fn down_past_the_delivered_page_loads_the_next_one() {
        let options =
            OptionSource::labels(["f1", "f2", "f3", "f4", "f5", "f6"]).adapt();
        let mut state = State {
            options,
            page_size: 3,
            max_display_height: 3,
            max_display_width: 40,
            ..Default::default()
        };
        state.open();
        assert_eq!(state.delivered_count, 3);

        let changes = Rc::new(RefCell::new(Vec::new()));
        let result = run(
            &mut state,
            vec![
                KeyPress::Down,
                KeyPress::Down,
                KeyPress::Down,
                KeyPress::Down,
                KeyPress::Down,
                KeyPress::Enter,
            ],
            changes.clone(),
        );

        assert_eq!(state.delivered_count, 6);
        assert_eq!(
            result,
            EventLoopResult::ExitWithResult(Selection::Single(Some(
                "f6".to_string()
            )))
        );
    }

    #[test]
    fn one_row_viewport_scrolls_and_keeps_focus_visible() {
        let options = OptionSource::labels(["Red", "Green", "Blue"]).adapt();
        let mut state = State {
            options,
            page_size: 10,
            max_display_height: 1,
            max_display_width: 40,
            ..Default::default()
        };
        state.open();

        let changes = Rc::new(RefCell::new(Vec::new()));
        let result = run(
            &mut state,
            vec![KeyPress::Down, KeyPress::Enter],
            changes.clone(),
        );

        // Down scrolls the one-row viewport; the focused row is the one on
        // screen, so Enter confirms what the user sees.
        assert_eq!(state.scroll_offset_row_index, 1);
        assert_eq!(state.raw_caret_row_index, 0);
        assert_eq!(
            result,
            EventLoopResult::ExitWithResult(Selection::Single(Some(
                "Green".to_string()
            )))
        );
    }

    #[test]
    fn down_at_the_absolute_bottom_without_more_stays_put() {
        let mut state = create_state(SelectionMode::Single);
        let changes = Rc::new(RefCell::new(Vec::new()));

        let result = run(
            &mut state,
            vec![
                KeyPress::Down,
                KeyPress::Down,
                KeyPress::Down,
                KeyPress::Down,
                KeyPress::Enter,
            ],
            changes.clone(),
        );

        assert_eq!(
            result,
            EventLoopResult::ExitWithResult(Selection::Single(Some("c".to_string())))
        );
    }

    #[test]
    fn shape_check_rejects_mismatched_payloads() {
        assert_eq!(
            Selection::Single(None).check_shape(SelectionMode::Multiple),
            Err(ConfigError::SelectionShapeMismatch {
                mode: SelectionMode::Multiple,
                payload_shape: "single",
            })
        );
        assert_eq!(
            Selection::Multiple(vec![]).check_shape(SelectionMode::Single),
            Err(ConfigError::SelectionShapeMismatch {
                mode: SelectionMode::Single,
                payload_shape: "multiple",
            })
        );
        assert_eq!(
            Selection::Single(None).check_shape(SelectionMode::Single),
            Ok(())
        );
    }

    #[test]
    fn select_from_options_rejects_zero_page_size() {
        let config = SelectConfig::new(
            OptionSource::labels(["Red"]),
            SelectionMode::Single,
        )
        .with_page_size(0);
        let result = select_from_options(config);
        assert!(result.is_err());
    }

    #[test]
    fn select_from_options_rejects_unknown_default() {
        let config = SelectConfig::new(
            OptionSource::labels(["Red", "Green"]),
            SelectionMode::Single,
        )
        .with_default(DefaultSelection::Single("Purple".to_string()));
        let result = select_from_options(config);
        assert!(result.is_err());
    }

    #[test]
    fn select_from_options_rejects_mismatched_default_shape() {
        let config = SelectConfig::new(
            OptionSource::labels(["Red", "Green"]),
            SelectionMode::Single,
        )
        .with_default(DefaultSelection::Multiple(vec!["Red".to_string()]));
        let result = select_from_options(config);
        assert!(result.is_err());
    }

    #[test]
    fn disabled_menu_returns_the_initial_selection_unchanged() {
        let config = SelectConfig::new(
            OptionSource::mapping([("a", "Apple"), ("b", "Banana")]).unwrap(),
            SelectionMode::Single,
        )
        .with_default(DefaultSelection::Single("b".to_string()))
        .disabled(true);

        let result = select_from_options(config).unwrap();
        assert_eq!(result, Some(Selection::Single(Some("b".to_string()))));
    }
}
