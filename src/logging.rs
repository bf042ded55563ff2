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

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "pickify.log";

/// Initialize file-based logging. While the menu is open the component owns
/// the terminal, so log output must never go to stdout or stderr.
///
/// The returned [WorkerGuard] must be held for the lifetime of the program,
/// otherwise buffered log lines are dropped.
pub fn try_initialize_logging() -> miette::Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(non_blocking_writer)
        .with_ansi(false)
        .compact()
        .try_init()
        // try_init reports a boxed error, which IntoDiagnostic can't lift.
        .map_err(|error| miette::miette!("failed to initialize logging: {error}"))?;

    Ok(guard)
}
