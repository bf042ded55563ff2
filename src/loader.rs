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

//! ### Incremental loader
//!
//! Client-side pagination and search-filtering over an in-memory canonical
//! list. [load_page] is deterministic and side-effect-free: repeated calls
//! with the same arguments against an unchanged canonical list return
//! identical results, which supports idempotent re-fetching after scroll
//! events.
//!
//! The pagination cursor is implicit: it is the count of options already
//! delivered for the current search term. It is never persisted across
//! search-term changes.

use crate::{CanonicalOption, ConfigError};

/// One page of matching options, plus whether more remain past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<CanonicalOption>,
    pub has_more: bool,
}

/// Filter the canonical list down to the candidates for a search term.
///
/// An empty term matches everything. A non-empty term matches entries whose
/// label contains it as a case-insensitive substring (substring, not prefix:
/// "re" matches both "Red" and "Green").
pub fn filter_candidates<'a>(
    options: &'a [CanonicalOption],
    search_term: &str,
) -> Vec<&'a CanonicalOption> {
    if search_term.is_empty() {
        return options.iter().collect();
    }
    let needle = search_term.to_lowercase();
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&needle))
        .collect()
}

/// Return the next page of matching options and whether more remain.
///
/// `already_shown` is the pagination cursor: how many options have been
/// delivered for this search term so far. A `page_size` of zero is a
/// configuration error. An empty candidate list yields an empty page and
/// `has_more == false`.
pub fn load_page(
    options: &[CanonicalOption],
    search_term: &str,
    already_shown: usize,
    page_size: usize,
) -> Result<Page, ConfigError> {
    if page_size == 0 {
        return Err(ConfigError::InvalidPageSize);
    }

    let candidates = filter_candidates(options, search_term);
    let start = already_shown.min(candidates.len());
    let end = already_shown.saturating_add(page_size).min(candidates.len());

    Ok(Page {
        items: candidates[start..end].iter().map(|it| (*it).clone()).collect(),
        has_more: candidates.len() > already_shown.saturating_add(page_size),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::OptionSource;

    fn fruit_options() -> Vec<CanonicalOption> {
        OptionSource::mapping([("a", "Apple"), ("b", "Banana"), ("c", "Cherry")])
            .unwrap()
            .adapt()
    }

    #[test]
    fn first_page_of_unfiltered_list() {
        let options = fruit_options();
        let page = load_page(&options, "", 0, 2).unwrap();
        assert_eq!(
            page.items,
            vec![
                CanonicalOption::new("a", "Apple"),
                CanonicalOption::new("b", "Banana"),
            ]
        );
        assert!(page.has_more);
    }

    #[test]
    fn second_page_exhausts_the_list() {
        let options = fruit_options();
        let page = load_page(&options, "", 2, 2).unwrap();
        assert_eq!(page.items, vec![CanonicalOption::new("c", "Cherry")]);
        assert!(!page.has_more);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let options = OptionSource::labels(["Red", "Green", "Blue"]).adapt();
        let candidates = filter_candidates(&options, "re");
        let labels: Vec<&str> =
            candidates.iter().map(|it| it.label.as_str()).collect();
        // "re" matches inside "Red" and "Green" (substring, not prefix).
        assert_eq!(labels, vec!["Red", "Green"]);
    }

    #[test]
    fn zero_page_size_is_a_configuration_error() {
        let options = fruit_options();
        let result = load_page(&options, "", 0, 0);
        assert_eq!(result, Err(ConfigError::InvalidPageSize));
    }

    #[test]
    fn empty_candidates_yield_empty_page_without_more() {
        let options = fruit_options();
        let page = load_page(&options, "zzz", 0, 2).unwrap();
        assert_eq!(page.items, vec![]);
        assert!(!page.has_more);
    }

    #[test]
    fn cursor_past_the_end_yields_empty_page() {
        let options = fruit_options();
        let page = load_page(&options, "", 10, 2).unwrap();
        assert_eq!(page.items, vec![]);
        assert!(!page.has_more);
    }

    #[test]
    fn repeated_calls_are_idempotent() {
        let options = fruit_options();
        let first = load_page(&options, "an", 0, 1).unwrap();
        let second = load_page(&options, "an", 0, 1).unwrap();
        assert_eq!(first, second);
    }

    /// Concatenating successive pages (cursor advancing by `page_size` each
    /// time, same term) until `has_more` is false reproduces exactly the
    /// filtered candidate list, with no duplicates and no omissions.
    #[test]
    fn successive_pages_reproduce_the_candidate_list() {
        let options = OptionSource::labels([
            "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta",
        ])
        .adapt();

        for term in ["", "a", "et", "zzz"] {
            for page_size in 1..=4 {
                let mut collected: Vec<CanonicalOption> = Vec::new();
                let mut cursor = 0;
                loop {
                    let page =
                        load_page(&options, term, cursor, page_size).unwrap();
                    cursor += page_size;
                    let done = !page.has_more;
                    collected.extend(page.items);
                    if done {
                        break;
                    }
                }

                let expected: Vec<CanonicalOption> = filter_candidates(&options, term)
                    .into_iter()
                    .cloned()
                    .collect();
                assert_eq!(collected, expected, "term={term:?} page_size={page_size}");
            }
        }
    }
}
