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

//! Test doubles for the two I/O seams of the event loop: the writer the
//! component renders into, and the reader key presses come from. Shipped as a
//! public module so dependents can drive the component in their own tests.

use std::io::{Result, Write};

use crate::{KeyPress, KeyPressReader};

/// Collects everything the component writes, ANSI escape sequences included.
#[derive(Debug, Default)]
pub struct TestStringWriter {
    buffer: String,
}

impl TestStringWriter {
    pub fn new() -> Self { Self::default() }

    pub fn get_buffer(&self) -> &str { &self.buffer }
}

impl Write for TestStringWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.buffer.push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> { Ok(()) }
}

/// Replays a scripted sequence of key presses. Once the script is exhausted
/// the last key press repeats, so scripts must end with a key that exits the
/// event loop.
#[derive(Debug)]
pub struct TestVecKeyPressReader {
    pub key_press_vec: Vec<KeyPress>,
    pub index: Option<usize>,
}

impl KeyPressReader for TestVecKeyPressReader {
    fn read_key_press(&mut self) -> KeyPress {
        match self.index {
            None => self.index = Some(0),
            Some(index) if index < self.key_press_vec.len() - 1 => {
                self.index = Some(index + 1)
            }
            // Stay on the last key press.
            Some(_) => {}
        }
        self.key_press_vec[self.index.unwrap_or_default()]
    }
}
