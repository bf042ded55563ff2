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

/// Queue the commands that put the terminal into the given
/// [Style](crate::Style). Only attributes the style turns *on* are emitted;
/// the caller is expected to have queued `ResetColor` and
/// `SetAttribute(Attribute::Reset)` at the start of the row, so there is
/// nothing to turn off here. Evaluates to `io::Result<()>`.
#[macro_export]
macro_rules! apply_style {
    ($writer:expr, $style:expr) => {{
        let style: $crate::Style = $style;
        (|| -> ::std::io::Result<()> {
            if let Some(color) = style.fg_color {
                ::crossterm::queue!(
                    $writer,
                    ::crossterm::style::SetForegroundColor(color)
                )?;
            }
            if let Some(color) = style.bg_color {
                ::crossterm::queue!(
                    $writer,
                    ::crossterm::style::SetBackgroundColor(color)
                )?;
            }
            if style.bold {
                ::crossterm::queue!(
                    $writer,
                    ::crossterm::style::SetAttribute(::crossterm::style::Attribute::Bold)
                )?;
            }
            if style.dim {
                ::crossterm::queue!(
                    $writer,
                    ::crossterm::style::SetAttribute(::crossterm::style::Attribute::Dim)
                )?;
            }
            if style.italic {
                ::crossterm::queue!(
                    $writer,
                    ::crossterm::style::SetAttribute(
                        ::crossterm::style::Attribute::Italic
                    )
                )?;
            }
            if style.underline {
                ::crossterm::queue!(
                    $writer,
                    ::crossterm::style::SetAttribute(
                        ::crossterm::style::Attribute::Underlined
                    )
                )?;
            }
            if style.reverse {
                ::crossterm::queue!(
                    $writer,
                    ::crossterm::style::SetAttribute(
                        ::crossterm::style::Attribute::Reverse
                    )
                )?;
            }
            Ok(())
        })()
    }};
}
