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

use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::Size;

/// The subset of terminal input the selection component understands. All
/// work in the component is triggered by these discrete events; there are no
/// timers and no polling.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum KeyPress {
    Up,
    Down,
    Enter,
    Esc,
    CtrlC,
    Space,
    Backspace,
    /// Clears the current selection.
    Delete,
    /// A printable character appended to the search term.
    Char(char),
    Resize(Size),
    #[default]
    Noop,
    /// The underlying event stream failed.
    Error,
}

/// Seam for the event loop's input side. Production uses
/// [CrosstermKeyPressReader]; tests use
/// [TestVecKeyPressReader](crate::TestVecKeyPressReader).
pub trait KeyPressReader {
    fn read_key_press(&mut self) -> KeyPress;
}

#[derive(Debug)]
pub struct CrosstermKeyPressReader;

impl KeyPressReader for CrosstermKeyPressReader {
    fn read_key_press(&mut self) -> KeyPress {
        match read() {
            Ok(event) => translate_event(event),
            Err(_) => KeyPress::Error,
        }
    }
}

/// [KeyEventKind] is checked so that key-release events (reported on Windows,
/// and on Unix when keyboard enhancement flags are pushed) don't double-fire.
fn translate_event(event: Event) -> KeyPress {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Up => KeyPress::Up,
            KeyCode::Down => KeyPress::Down,
            KeyCode::Enter => KeyPress::Enter,
            KeyCode::Esc => KeyPress::Esc,
            KeyCode::Backspace => KeyPress::Backspace,
            KeyCode::Delete => KeyPress::Delete,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                KeyPress::CtrlC
            }
            KeyCode::Char(' ') if modifiers.is_empty() => KeyPress::Space,
            KeyCode::Char(ch)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                KeyPress::Char(ch)
            }
            _ => KeyPress::Noop,
        },
        Event::Resize(col_count, row_count) => KeyPress::Resize(Size {
            col_count,
            row_count,
        }),
        _ => KeyPress::Noop,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn translates_navigation_keys() {
        assert_eq!(
            translate_event(key(KeyCode::Up, KeyModifiers::empty())),
            KeyPress::Up
        );
        assert_eq!(
            translate_event(key(KeyCode::Down, KeyModifiers::empty())),
            KeyPress::Down
        );
        assert_eq!(
            translate_event(key(KeyCode::Enter, KeyModifiers::empty())),
            KeyPress::Enter
        );
        assert_eq!(
            translate_event(key(KeyCode::Esc, KeyModifiers::empty())),
            KeyPress::Esc
        );
    }

    #[test]
    fn translates_search_input_keys() {
        assert_eq!(
            translate_event(key(KeyCode::Char('x'), KeyModifiers::empty())),
            KeyPress::Char('x')
        );
        assert_eq!(
            translate_event(key(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            KeyPress::Char('X')
        );
        assert_eq!(
            translate_event(key(KeyCode::Backspace, KeyModifiers::empty())),
            KeyPress::Backspace
        );
    }

    #[test]
    fn space_and_ctrl_c_are_distinct() {
        assert_eq!(
            translate_event(key(KeyCode::Char(' '), KeyModifiers::empty())),
            KeyPress::Space
        );
        assert_eq!(
            translate_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyPress::CtrlC
        );
    }

    #[test]
    fn control_chords_are_noop() {
        assert_eq!(
            translate_event(key(KeyCode::Char('k'), KeyModifiers::CONTROL)),
            KeyPress::Noop
        );
    }

    #[test]
    fn resize_carries_the_new_size() {
        assert_eq!(
            translate_event(Event::Resize(80, 24)),
            KeyPress::Resize(Size {
                col_count: 80,
                row_count: 24
            })
        );
    }
}
