// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picklist Nav: index navigation primitives for selectable lists.
//!
//! This crate holds the pure index arithmetic shared by every Picklist widget:
//!
//! - [`next_index`]: move a highlighted/active index by an amount over a collection of a
//!   given length, either clamping at the edges or wrapping around.
//! - [`highlighted_index`]: [`next_index`] plus skipping of disabled entries.
//! - [`non_disabled_index`]: the first enabled index scanning from a start position, used
//!   for Home/End style jumps.
//! - [`character_search_index`]: case-insensitive typeahead prefix search.
//!
//! "No index" is expressed as `None`. All functions take the collection length explicitly
//! rather than reading it from a slice, so virtualized lists can supply a count that is
//! larger (or smaller) than the realized collection. A base index that is out of range for
//! the supplied count is treated the same as `None`.
//!
//! ## Minimal example
//!
//! ```rust
//! use picklist_nav::{character_search_index, next_index};
//!
//! // Backward from "no index" lands on the last entry.
//! assert_eq!(next_index(-1, None, 100, false), Some(99));
//! // The count shrank to 40 between renders: 99 is out of range, so it acts like `None`.
//! assert_eq!(next_index(-1, Some(99), 40, false), Some(39));
//!
//! let items = ["Red", "Purple", "Pink"];
//! let found = character_search_index("p", Some(0), &items, |s| (*s).into(), |_, _| false);
//! assert_eq!(found, Some(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod index;
mod search;

pub use index::{highlighted_index, next_index, non_disabled_index};
pub use search::{TYPEAHEAD_RESET_MS, character_search_index};
