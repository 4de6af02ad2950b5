// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Commit bookkeeping for widgets with a roving active index over a list of items:
//! [`MultipleSelection`](crate::MultipleSelection) and [`TagGroup`](crate::TagGroup).

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use picklist_core::RefSlot;
use picklist_core::status::removal_message;

use crate::collection::{Collection, Item};
use crate::effects::Effects;

/// What a removal message function sees after a commit.
pub struct RemovalStatus<'a, I> {
    /// The item that left the list.
    pub removed_item: &'a I,
    /// Items after the removal.
    pub items: &'a [I],
    /// Item display text.
    pub item_to_string: &'a dyn Fn(&I) -> String,
}

impl<I: fmt::Debug> fmt::Debug for RemovalStatus<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemovalStatus")
            .field("removed_item", &self.removed_item)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

/// Removal message function.
pub type RemovalMessage<I> = Box<dyn Fn(&RemovalStatus<'_, I>) -> String>;

/// Default removal status: `"<item> has been removed."`.
pub fn default_removal_message<I>(status: &RemovalStatus<'_, I>) -> String {
    removal_message(&(status.item_to_string)(status.removed_item))
}

/// Where focus goes for a given active index.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FocusTargets {
    pub(crate) item: fn(usize) -> RefSlot,
    pub(crate) fallback: RefSlot,
}

#[derive(Debug)]
pub(crate) struct ActiveCommit<I> {
    items: Vec<I>,
    active_index: Option<usize>,
}

impl<I: Item> ActiveCommit<I> {
    pub(crate) fn new(items: Vec<I>, active_index: Option<usize>) -> Self {
        Self {
            items,
            active_index,
        }
    }

    /// Move focus after the active index changed, or after the list changed under it,
    /// and announce removed items.
    pub(crate) fn run(
        &mut self,
        items: &[I],
        active_index: Option<usize>,
        effects: &mut Effects,
        targets: FocusTargets,
        item_fns: &Collection<I>,
        message: Option<&RemovalMessage<I>>,
    ) {
        let list_changed = self.items.as_slice() != items;
        if active_index != self.active_index || (active_index.is_some() && list_changed) {
            match active_index {
                Some(index) => effects.focus((targets.item)(index)),
                None => effects.focus(targets.fallback),
            }
        }

        if items.len() < self.items.len() {
            let removed = self
                .items
                .iter()
                .find(|old| !items.iter().any(|new| item_fns.same(old, new)));
            if let Some(removed_item) = removed {
                let status = RemovalStatus {
                    removed_item,
                    items,
                    item_to_string: item_fns.item_to_string(),
                };
                let text = match message {
                    Some(f) => f(&status),
                    None => default_removal_message(&status),
                };
                effects.announce(text);
            }
        }

        if list_changed {
            self.items = items.to_vec();
        }
        self.active_index = active_index;
    }
}

/// Active index after removing the entry at `removed` from a list that now has
/// `len` entries.
pub(crate) fn active_after_removal(
    active: Option<usize>,
    removed: usize,
    len: usize,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match active {
        Some(active) if active > removed => Some(active - 1),
        Some(active) => Some(active.min(len - 1)),
        None => None,
    }
}

/// Proposed active index change, reset to `None` when the resulting index would point
/// past the end of a list of `len` entries.
pub(crate) fn settle_active_index(
    current: Option<usize>,
    proposed: Option<Option<usize>>,
    len: usize,
) -> Option<Option<usize>> {
    match proposed.unwrap_or(current) {
        Some(index) if index >= len => Some(None),
        _ => proposed,
    }
}
