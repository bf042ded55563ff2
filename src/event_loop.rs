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

use crate::{CalculateResizeHint,
            FunctionComponent,
            KeyPress,
            KeyPressReader,
            Selection};

#[derive(Debug, Clone, PartialEq)]
pub enum EventLoopResult {
    Continue,
    ContinueAndRerender,
    ContinueAndRerenderAndClear,
    ExitWithResult(Selection),
    ExitWithoutResult,
    ExitWithError,
}

/// Blocking, single-threaded, event-driven loop: render the component, wait
/// for the next key press, dispatch it to the handler, repeat. All terminal
/// setup (raw mode, cursor hiding) is the caller's concern, which keeps this
/// loop drivable from tests with a scripted reader and a string writer.
pub fn enter_event_loop<W: Write, S: CalculateResizeHint>(
    state: &mut S,
    function_component: &mut impl FunctionComponent<W, S>,
    mut on_keypress: impl FnMut(&mut S, KeyPress) -> EventLoopResult,
    reader: &mut impl KeyPressReader,
) -> Result<EventLoopResult> {
    // Only required the first time, to make room for the viewport and place
    // the cursor at the correct position.
    function_component.allocate_viewport_height_space(state)?;

    let return_this: EventLoopResult;

    loop {
        function_component.render(state)?;
        let key_press = reader.read_key_press();
        match on_keypress(state, key_press) {
            EventLoopResult::Continue | EventLoopResult::ContinueAndRerender => {
                // Next loop iteration re-renders.
            }
            EventLoopResult::ContinueAndRerenderAndClear => {
                function_component.clear_viewport_for_resize(state)?;
            }
            result @ (EventLoopResult::ExitWithResult(_)
            | EventLoopResult::ExitWithoutResult
            | EventLoopResult::ExitWithError) => {
                function_component.clear_viewport(state)?;
                return_this = result;
                break;
            }
        }
    }

    Ok(return_this)
}
