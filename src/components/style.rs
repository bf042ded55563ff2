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

use crossterm::style::Color;

/// One resolved terminal style. Attributes are applied (or explicitly reset)
/// per row, so a style never leaks into the next row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Style {
    pub fg_color: Option<Color>,
    pub bg_color: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg_color: None,
            bg_color: None,
            bold: false,
            dim: false,
            italic: false,
            underline: false,
            reverse: false,
        }
    }
}

/// The styles for every region the component paints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StyleSheet {
    pub header_style: Style,
    pub search_style: Style,
    pub normal_style: Style,
    pub focused_style: Style,
    pub selected_style: Style,
    pub hint_style: Style,
    pub error_style: Style,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            header_style: Style {
                bold: true,
                fg_color: Some(Color::Rgb {
                    r: 171,
                    g: 204,
                    b: 242,
                }),
                ..Default::default()
            },
            search_style: Style {
                fg_color: Some(Color::Rgb {
                    r: 229,
                    g: 239,
                    b: 123,
                }),
                ..Default::default()
            },
            normal_style: Style {
                fg_color: Some(Color::Rgb {
                    r: 200,
                    g: 200,
                    b: 200,
                }),
                ..Default::default()
            },
            focused_style: Style {
                reverse: true,
                ..Default::default()
            },
            selected_style: Style {
                fg_color: Some(Color::Rgb {
                    r: 20,
                    g: 244,
                    b: 0,
                }),
                ..Default::default()
            },
            hint_style: Style {
                dim: true,
                ..Default::default()
            },
            error_style: Style {
                fg_color: Some(Color::Rgb { r: 200, g: 1, b: 1 }),
                bold: true,
                ..Default::default()
            },
        }
    }
}

impl StyleSheet {
    /// Monochrome sheet for terminals without color support. Focus still
    /// stands out via reverse video.
    pub fn plain() -> Self {
        Self {
            header_style: Style {
                bold: true,
                ..Default::default()
            },
            search_style: Style::default(),
            normal_style: Style::default(),
            focused_style: Style {
                reverse: true,
                ..Default::default()
            },
            selected_style: Style {
                underline: true,
                ..Default::default()
            },
            hint_style: Style {
                dim: true,
                ..Default::default()
            },
            error_style: Style {
                bold: true,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_sheet_uses_color_and_reverse_focus() {
        let sheet = StyleSheet::default();
        assert!(sheet.header_style.bold);
        assert!(sheet.focused_style.reverse);
        assert_eq!(sheet.focused_style.fg_color, None);
        assert!(sheet.hint_style.dim);
    }

    #[test]
    fn plain_sheet_has_no_colors() {
        let sheet = StyleSheet::plain();
        assert_eq!(sheet.header_style.fg_color, None);
        assert_eq!(sheet.selected_style.fg_color, None);
        assert!(sheet.focused_style.reverse);
    }
}
