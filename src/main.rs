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

//! `pk`: pipe options in (one per line), or point it at a JSON mapping file,
//! pick interactively, and get the selected value(s) on stdout, as JSON, or
//! substituted into a command.
//!
//! ```text
//! # local branches, one per line, pick one, check it out
//! git branch --format '%(refname:short)' | pk -c 'git checkout %'
//!
//! # multi select from an ordered {"value": "label"} mapping
//! pk -s multiple -j fruits.json --emit-json
//! ```

use std::{fmt,
          fs,
          io::{stdin, BufRead},
          path::{Path, PathBuf},
          process::Command};

use clap::Parser;
use miette::{miette, IntoDiagnostic};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use pickify::{is_stdin_piped,
              is_stdout_piped,
              select_from_options,
              try_initialize_logging,
              OptionSource,
              SelectConfig,
              Selection,
              SelectionMode,
              StdinIsPipedResult,
              StdoutIsPipedResult,
              DEFAULT_HEIGHT,
              DEFAULT_PAGE_SIZE};

#[derive(Debug, Parser)]
#[command(
    bin_name = "pk",
    version,
    about = "Searchable, paginated selection menus for the terminal",
    long_about = None
)]
struct CliArgs {
    /// Single or multiple selection
    #[arg(value_enum, short, long, default_value = "single")]
    selection_mode: SelectionMode,

    /// Run this command for each selected value, with '%' replaced by the
    /// value
    #[arg(short, long)]
    command_to_run_with_each_selection: Option<String>,

    /// JSON file holding an ordered {"value": "label"} mapping; without it,
    /// options are read from stdin, one label per line
    #[arg(short = 'j', long)]
    options_json: Option<PathBuf>,

    /// Options delivered per page while scrolling
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Maximum option rows shown at once
    #[arg(short = 't', long, default_value_t = DEFAULT_HEIGHT)]
    tui_height: usize,

    /// Header label
    #[arg(short, long, default_value = "Select an option")]
    label: String,

    /// Hint shown in the empty search row
    #[arg(long, default_value = "Type to search")]
    placeholder: String,

    /// Mark the menu as required in the header
    #[arg(short, long)]
    required: bool,

    /// Print the confirmed selection as JSON instead of raw lines
    #[arg(long)]
    emit_json: bool,

    /// Write logs to pickify.log in the current directory
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> miette::Result<()> {
    let cli_args = CliArgs::parse();

    let _log_guard = if cli_args.verbose {
        Some(try_initialize_logging()?)
    } else {
        None
    };

    // The menu paints to stdout; a pipe can't host it.
    if let StdoutIsPipedResult::StdoutIsPiped = is_stdout_piped() {
        return Err(miette!(
            "pk needs an interactive stdout to render the menu; \
             remove the pipe after pk"
        ));
    }

    let options = match &cli_args.options_json {
        Some(path) => load_mapping_from_json(path)?,
        None => load_labels_from_stdin()?,
    };
    if options.is_empty() {
        return Err(miette!("no options to select from"));
    }

    tracing::debug!(
        option_count = options.len(),
        selection_mode = ?cli_args.selection_mode,
        "starting menu"
    );

    let config = SelectConfig::new(options, cli_args.selection_mode)
        .with_label(&cli_args.label)
        .with_placeholder(&cli_args.placeholder)
        .required(cli_args.required)
        .with_page_size(cli_args.page_size)
        .with_max_height(cli_args.tui_height);

    match select_from_options(config)? {
        Some(selection) => emit_selection(&selection, &cli_args)?,
        None => tracing::debug!("menu dismissed without a selection"),
    }

    Ok(())
}

fn load_labels_from_stdin() -> miette::Result<OptionSource> {
    if let StdinIsPipedResult::StdinIsNotPiped = is_stdin_piped() {
        return Err(miette!(
            "pipe options into pk (one per line), or pass --options-json"
        ));
    }
    let lines: Vec<String> = stdin()
        .lock()
        .lines()
        .collect::<Result<_, _>>()
        .into_diagnostic()?;
    let lines: Vec<String> = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect();
    Ok(OptionSource::labels(lines))
}

fn load_mapping_from_json(path: &Path) -> miette::Result<OptionSource> {
    let text = fs::read_to_string(path).into_diagnostic()?;
    parse_mapping(&text)
}

/// The `(value, label)` entries of a JSON object, in document order, with
/// repeated keys kept. A plain `serde_json::Map` would collapse repeated
/// keys last-wins before the duplicate-value check gets to see them.
struct MappingPairs(Vec<(String, String)>);

impl<'de> Deserialize<'de> for MappingPairs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = MappingPairs;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an object of string labels keyed by value")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, String>()? {
                    pairs.push(entry);
                }
                Ok(MappingPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

fn parse_mapping(text: &str) -> miette::Result<OptionSource> {
    let MappingPairs(pairs) = serde_json::from_str(text).into_diagnostic()?;
    Ok(OptionSource::mapping(pairs)?)
}

fn emit_selection(selection: &Selection, cli_args: &CliArgs) -> miette::Result<()> {
    if let Some(command_template) = &cli_args.command_to_run_with_each_selection {
        for value in selection.values() {
            execute_command(command_template, &value)?;
        }
        return Ok(());
    }

    if cli_args.emit_json {
        println!(
            "{}",
            serde_json::to_string(selection).into_diagnostic()?
        );
    } else {
        for value in selection.values() {
            println!("{value}");
        }
    }

    Ok(())
}

fn execute_command(command_template: &str, value: &str) -> miette::Result<()> {
    let command_text = command_template.replace('%', value);
    tracing::debug!(%command_text, "executing command");
    let status = Command::new("sh")
        .arg("-c")
        .arg(&command_text)
        .status()
        .into_diagnostic()?;
    if !status.success() {
        return Err(miette!("command {command_text:?} exited with {status}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_args_are_well_formed() { CliArgs::command().debug_assert(); }

    #[test]
    fn parse_mapping_preserves_key_order() {
        let source =
            parse_mapping(r#"{"c": "Cherry", "a": "Apple", "b": "Banana"}"#).unwrap();
        let canonical = source.adapt();
        let values: Vec<&str> =
            canonical.iter().map(|it| it.value.as_str()).collect();
        assert_eq!(values, vec!["c", "a", "b"]);
        assert_eq!(canonical[0].label, "Cherry");
    }

    #[test]
    fn parse_mapping_rejects_non_string_labels() {
        assert!(parse_mapping(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn parse_mapping_rejects_duplicate_keys() {
        let result = parse_mapping(r#"{"a": "Apple", "a": "Apricot"}"#);
        assert!(result.is_err());
    }
}
