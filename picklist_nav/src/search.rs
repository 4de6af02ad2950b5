// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead character search.

use alloc::string::String;

/// How long typed characters keep accumulating into one search, in milliseconds.
///
/// Widgets that implement typeahead clear their accumulated keys this long after the
/// last keystroke.
pub const TYPEAHEAD_RESET_MS: u64 = 500;

/// Find the next entry whose string form starts with `keys_so_far`, ignoring case.
///
/// The scan visits every entry once, wrapping at the end of `items`, and skips entries
/// for which `is_disabled` returns `true`. Where it starts matters:
///
/// - with fewer than two accumulated characters it starts one past `highlighted`, so
///   tapping the same letter repeatedly cycles through entries sharing that prefix;
/// - with two or more it starts at `highlighted` itself, so a growing query keeps the
///   current entry when it still matches.
///
/// With no highlight the scan starts at the first entry. When nothing matches,
/// `highlighted` is returned unchanged.
pub fn character_search_index<I>(
    keys_so_far: &str,
    highlighted: Option<usize>,
    items: &[I],
    item_to_string: impl Fn(&I) -> String,
    is_disabled: impl Fn(&I, usize) -> bool,
) -> Option<usize> {
    let len = items.len();
    if len == 0 || keys_so_far.is_empty() {
        return highlighted;
    }
    let needle = keys_so_far.to_lowercase();
    let skip_current = usize::from(keys_so_far.chars().count() < 2);
    let start = highlighted.map_or(0, |h| h + skip_current);

    (0..len)
        .map(|step| (start + step) % len)
        .find(|&index| {
            let item = &items[index];
            !is_disabled(item, index) && item_to_string(item).to_lowercase().starts_with(&needle)
        })
        .or(highlighted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    const COLORS: [&str; 5] = ["Black", "Blue", "Red", "Purple", "Pink"];

    fn search(keys: &str, highlighted: Option<usize>) -> Option<usize> {
        character_search_index(keys, highlighted, &COLORS, |s| s.to_string(), |_, _| false)
    }

    #[test]
    fn single_key_starts_after_highlight() {
        let items = ["Red", "Purple", "Pink"];
        let found = character_search_index("p", Some(0), &items, |s| s.to_string(), |_, _| false);
        assert_eq!(found, Some(1));
    }

    #[test]
    fn repeated_single_key_cycles() {
        assert_eq!(search("p", None), Some(3));
        assert_eq!(search("p", Some(3)), Some(4));
        assert_eq!(search("p", Some(4)), Some(3));
    }

    #[test]
    fn multi_key_keeps_current_when_it_still_matches() {
        // "bl" matches both Black and Blue; with Black highlighted it stays there.
        assert_eq!(search("bl", Some(0)), Some(0));
        // "blu" narrows to Blue.
        assert_eq!(search("blu", Some(0)), Some(1));
    }

    #[test]
    fn search_is_case_insensitive() {
        assert_eq!(search("RE", None), Some(2));
        assert_eq!(search("pInK", Some(0)), Some(4));
    }

    #[test]
    fn wraps_to_start() {
        assert_eq!(search("b", Some(4)), Some(0));
    }

    #[test]
    fn no_match_keeps_highlight() {
        assert_eq!(search("z", Some(2)), Some(2));
        assert_eq!(search("z", None), None);
    }

    #[test]
    fn disabled_entries_are_skipped() {
        let found = character_search_index(
            "p",
            Some(0),
            &COLORS,
            |s| s.to_string(),
            |_, index| index == 3,
        );
        assert_eq!(found, Some(4));
    }

    #[test]
    fn highlight_beyond_items_wraps() {
        // Virtualized hosts may report a highlight past the realized slice.
        assert_eq!(search("r", Some(7)), Some(2));
    }
}
