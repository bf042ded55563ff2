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

use crossterm::{cursor::{MoveToNextLine, MoveToPreviousLine},
                queue,
                style::Print,
                terminal::{Clear, ClearType}};

use crate::{ResizeHint, Size, DEVELOPMENT_MODE};

pub trait CalculateResizeHint {
    fn set_size(&mut self, new_size: Size);
    fn get_resize_hint(&self) -> Option<ResizeHint>;
    fn set_resize_hint(&mut self, new_size: Size);
    fn clear_resize_hint(&mut self);
}

/// A component is a function of state: it owns a writer and a style, and
/// repaints its whole (fixed-height) viewport on every render. The default
/// methods handle viewport space allocation and cleanup so that the cursor
/// always ends up back at the top-left of the component.
pub trait FunctionComponent<W: Write, S: CalculateResizeHint> {
    fn get_write(&mut self) -> &mut W;

    fn calculate_header_viewport_height(&self, state: &S) -> usize;

    fn calculate_items_viewport_height(&self, state: &S) -> usize;

    fn calculate_footer_viewport_height(&self, state: &S) -> usize;

    fn calculate_total_viewport_height(&self, state: &S) -> usize {
        self.calculate_header_viewport_height(state)
            + self.calculate_items_viewport_height(state)
            + self.calculate_footer_viewport_height(state)
    }

    fn render(&mut self, state: &mut S) -> Result<()>;

    /// Print empty lines to make room for the viewport, then move the cursor
    /// back up. Required once before the first render so that the cursor
    /// movement commands used while rendering have space to work with.
    fn allocate_viewport_height_space(&mut self, state: &S) -> Result<()> {
        let viewport_height = self.calculate_total_viewport_height(state);

        let writer = self.get_write();
        for _ in 0..viewport_height {
            queue! {
                writer,
                Print("\n"),
            }?;
        }

        // Move the cursor back up.
        queue! {
            writer,
            MoveToPreviousLine(viewport_height as u16),
        }?;

        writer.flush()?;

        Ok(())
    }

    /// Clear the viewport after a terminal resize, then reset the hint so
    /// the next render starts from a clean slate.
    fn clear_viewport_for_resize(&mut self, state: &mut S) -> Result<()> {
        DEVELOPMENT_MODE.then(|| {
            tracing::debug!(resize_hint = ?state.get_resize_hint(), "clear viewport for resize");
        });

        let viewport_height = match state.get_resize_hint() {
            Some(ResizeHint::GotBigger)
            | Some(ResizeHint::NoChange)
            | Some(ResizeHint::GotSmaller) => self.calculate_total_viewport_height(state),
            // Nothing to do, since resize didn't happen.
            None => return Ok(()),
        };

        let writer = self.get_write();

        for _ in 0..viewport_height {
            queue! {
                writer,
                Clear(ClearType::FromCursorDown),
                MoveToNextLine(1),
            }?;
        }

        // Move the cursor back up.
        queue! {
            writer,
            MoveToPreviousLine(viewport_height as u16),
        }?;

        state.clear_resize_hint();

        Ok(())
    }

    /// Clear the viewport on exit, leaving the cursor where the component
    /// started.
    fn clear_viewport(&mut self, state: &S) -> Result<()> {
        let viewport_height = self.calculate_total_viewport_height(state);

        let writer = self.get_write();

        for _ in 0..viewport_height {
            queue! {
                writer,
                Clear(ClearType::CurrentLine),
                MoveToNextLine(1),
            }?;
        }

        // Move the cursor back up.
        queue! {
            writer,
            MoveToPreviousLine(viewport_height as u16),
        }?;

        writer.flush()?;

        Ok(())
    }
}
