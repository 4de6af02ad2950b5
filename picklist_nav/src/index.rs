// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relative index movement with clamp/wrap policies and disabled skipping.

/// Move `base` by `move_amount` over a collection of `count` entries.
///
/// - `count == 0` always yields `None`.
/// - A sentinel base (`None`, or any index `>= count`) yields `0` for a forward move and
///   `count - 1` for a backward move. A zero move from a sentinel stays `None`.
/// - Otherwise the result is `base + move_amount`, clamped to `0..count` when `circular`
///   is `false`, or wrapped modulo `count` when it is `true`.
///
/// `count` is trusted over any realized collection length, so callers rendering a
/// virtualized window can pass the full logical count.
#[must_use]
pub fn next_index(
    move_amount: isize,
    base: Option<usize>,
    count: usize,
    circular: bool,
) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    let Some(base) = base.filter(|&b| b < count) else {
        return match move_amount.signum() {
            1 => Some(0),
            -1 => Some(last),
            _ => None,
        };
    };

    let target = base as isize + move_amount;
    if circular {
        Some(target.rem_euclid(count as isize) as usize)
    } else {
        Some(target.clamp(0, last as isize) as usize)
    }
}

/// First enabled index at or after (`backwards == false`) or at or before
/// (`backwards == true`) `start`.
///
/// When nothing is found in that direction and `circular` is set, the scan continues from
/// the opposite end of the collection. `start` is clamped into range.
#[must_use]
pub fn non_disabled_index(
    start: usize,
    backwards: bool,
    count: usize,
    is_disabled: impl Fn(usize) -> bool,
    circular: bool,
) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let start = start.min(count - 1);
    let found = if backwards {
        (0..=start).rev().find(|&i| !is_disabled(i))
    } else {
        (start..count).find(|&i| !is_disabled(i))
    };
    if found.is_some() || !circular {
        return found;
    }
    if backwards {
        (start + 1..count).rev().find(|&i| !is_disabled(i))
    } else {
        (0..start).find(|&i| !is_disabled(i))
    }
}

/// Move a highlight by `offset`, skipping disabled entries in the direction of travel.
///
/// The candidate is computed with [`next_index`]. If every entry in the scan is disabled,
/// the highlight stays where it was when `start` is a valid index, and becomes `None`
/// otherwise.
#[must_use]
pub fn highlighted_index(
    start: Option<usize>,
    offset: isize,
    count: usize,
    is_disabled: impl Fn(usize) -> bool,
    circular: bool,
) -> Option<usize> {
    let candidate = next_index(offset, start, count, circular)?;
    non_disabled_index(candidate, offset < 0, count, &is_disabled, circular)
        .or_else(|| start.filter(|&s| s < count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_has_no_index() {
        assert_eq!(next_index(1, None, 0, true), None);
        assert_eq!(next_index(-1, Some(3), 0, false), None);
        assert_eq!(highlighted_index(Some(0), 1, 0, |_| false, true), None);
        assert_eq!(non_disabled_index(0, false, 0, |_| false, true), None);
    }

    #[test]
    fn sentinel_goes_to_edges() {
        assert_eq!(next_index(1, None, 3, false), Some(0));
        assert_eq!(next_index(-1, None, 3, false), Some(2));
        assert_eq!(next_index(10, None, 30, true), Some(0));
        assert_eq!(next_index(0, None, 3, true), None);
    }

    #[test]
    fn clamps_without_wrap() {
        assert_eq!(next_index(1, Some(2), 3, false), Some(2));
        assert_eq!(next_index(-1, Some(0), 3, false), Some(0));
        assert_eq!(next_index(10, Some(4), 8, false), Some(7));
        assert_eq!(next_index(-10, Some(4), 8, false), Some(0));
    }

    #[test]
    fn wraps_modulo_count() {
        assert_eq!(next_index(1, Some(2), 3, true), Some(0));
        assert_eq!(next_index(-1, Some(0), 3, true), Some(2));
        assert_eq!(next_index(10, Some(4), 8, true), Some(6));
        assert_eq!(next_index(-10, Some(4), 8, true), Some(2));
    }

    #[test]
    fn forward_walk_from_sentinel_saturates_or_wraps() {
        for count in 1..6_usize {
            for circular in [false, true] {
                let mut index = None;
                for _ in 0..count {
                    index = next_index(1, index, count, circular);
                }
                assert_eq!(index, Some(count - 1), "walk ends on the last entry");

                let after = next_index(1, index, count, circular);
                let expected = if circular { 0 } else { count - 1 };
                assert_eq!(after, Some(expected), "count={count} circular={circular}");
            }
        }
    }

    #[test]
    fn externally_supplied_count_shrinks() {
        // Virtualized list: 100 logical entries.
        let first = next_index(-1, None, 100, false);
        assert_eq!(first, Some(99));
        // The host now reports 40 entries; 99 is dangling and behaves like `None`.
        assert_eq!(next_index(-1, first, 40, false), Some(39));
    }

    #[test]
    fn highlight_skips_disabled_forward_and_backward() {
        let disabled = |i: usize| i == 1 || i == 2;
        assert_eq!(highlighted_index(Some(0), 1, 5, disabled, false), Some(3));
        assert_eq!(highlighted_index(Some(3), -1, 5, disabled, false), Some(0));
    }

    #[test]
    fn highlight_wraps_past_disabled_tail() {
        let disabled = |i: usize| i >= 3;
        assert_eq!(highlighted_index(Some(2), 1, 5, disabled, true), Some(0));
        // Without wrap there is nothing enabled after 2, so the highlight stays.
        assert_eq!(highlighted_index(Some(2), 1, 5, disabled, false), Some(2));
    }

    #[test]
    fn highlight_with_everything_disabled() {
        assert_eq!(highlighted_index(None, 1, 4, |_| true, true), None);
        assert_eq!(highlighted_index(Some(1), 1, 4, |_| true, true), Some(1));
    }

    #[test]
    fn home_and_end_jumps() {
        let disabled = |i: usize| i == 0 || i == 4;
        assert_eq!(non_disabled_index(0, false, 5, disabled, false), Some(1));
        assert_eq!(non_disabled_index(4, true, 5, disabled, false), Some(3));
    }

    #[test]
    fn non_disabled_index_circular_continues_from_other_end() {
        let disabled = |i: usize| i != 1;
        assert_eq!(non_disabled_index(3, false, 5, disabled, true), Some(1));
        assert_eq!(non_disabled_index(3, false, 5, disabled, false), None);
        assert_eq!(non_disabled_index(0, true, 5, |i| i != 4, true), Some(4));
    }
}
