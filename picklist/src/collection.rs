// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The item collection a widget navigates, with its caller-supplied item functions.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use picklist_core::Error;

/// Types usable as widget items.
pub trait Item: Clone + PartialEq + fmt::Debug + 'static {}

impl<T: Clone + PartialEq + fmt::Debug + 'static> Item for T {}

/// Item display text.
pub type ItemToString<I> = Rc<dyn Fn(&I) -> String>;
/// Item identity key.
pub type ItemToKey<I> = Rc<dyn Fn(&I) -> String>;
/// Item disabled predicate, given the item and its index.
pub type IsItemDisabled<I> = Rc<dyn Fn(&I, usize) -> bool>;

/// Items plus the functions that describe them.
#[derive(Clone)]
pub struct Collection<I> {
    items: Vec<I>,
    item_count: Option<usize>,
    item_to_string: ItemToString<I>,
    item_to_key: Option<ItemToKey<I>>,
    is_item_disabled: Option<IsItemDisabled<I>>,
}

impl<I: Item> Collection<I> {
    /// A collection over `items`. Items display with their `Debug` text until
    /// [`Collection::set_item_to_string`] is called.
    pub fn new(items: Vec<I>) -> Self {
        Self {
            items,
            item_count: None,
            item_to_string: Rc::new(|item| alloc::format!("{item:?}")),
            item_to_key: None,
            is_item_disabled: None,
        }
    }

    /// Realized items.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Replace the items.
    pub fn set_items(&mut self, items: Vec<I>) {
        self.items = items;
    }

    /// Override the logical length, for virtualized lists.
    pub fn set_item_count(&mut self, count: Option<usize>) {
        self.item_count = count;
    }

    /// Set the display text function.
    pub fn set_item_to_string(&mut self, f: impl Fn(&I) -> String + 'static) {
        self.item_to_string = Rc::new(f);
    }

    /// Set the identity key function. Without one, items are compared by value.
    pub fn set_item_to_key(&mut self, f: impl Fn(&I) -> String + 'static) {
        self.item_to_key = Some(Rc::new(f));
    }

    /// Set the disabled predicate.
    pub fn set_is_item_disabled(&mut self, f: impl Fn(&I, usize) -> bool + 'static) {
        self.is_item_disabled = Some(Rc::new(f));
    }

    /// Logical length: the item count override, or the number of items.
    pub fn len(&self) -> usize {
        self.item_count.unwrap_or(self.items.len())
    }

    /// Whether the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at `index`, if realized.
    pub fn get(&self, index: usize) -> Option<&I> {
        self.items.get(index)
    }

    /// Whether the item at `index` is disabled. Unrealized indices are enabled.
    pub fn is_disabled(&self, index: usize) -> bool {
        match (&self.is_item_disabled, self.items.get(index)) {
            (Some(f), Some(item)) => f(item, index),
            _ => false,
        }
    }

    /// Whether `item` is disabled at `index`.
    pub fn is_item_disabled(&self, item: &I, index: usize) -> bool {
        self.is_item_disabled.as_ref().is_some_and(|f| f(item, index))
    }

    /// Display text of an item.
    pub fn text_of(&self, item: &I) -> String {
        (self.item_to_string)(item)
    }

    /// Display text function, for handing to search helpers.
    pub fn item_to_string(&self) -> &dyn Fn(&I) -> String {
        &*self.item_to_string
    }

    /// Whether two items are the same item.
    pub fn same(&self, a: &I, b: &I) -> bool {
        match &self.item_to_key {
            Some(key) => key(a) == key(b),
            None => a == b,
        }
    }

    /// Index of `item` among the realized items.
    pub fn index_of(&self, item: &I) -> Option<usize> {
        self.items.iter().position(|candidate| self.same(candidate, item))
    }
}

/// Resolve the item identity passed to an item getter.
///
/// Exactly one of `item` and `index` must be given. An item is looked up with
/// `position`; an index must be below `len`.
pub(crate) fn resolve_index<I>(
    getter: &'static str,
    item: Option<&I>,
    index: Option<usize>,
    len: usize,
    position: impl Fn(&I) -> Option<usize>,
) -> Result<usize, Error> {
    match (item, index) {
        (Some(item), None) => position(item).ok_or(Error::ItemNotFound { getter }),
        (None, Some(index)) if index < len => Ok(index),
        (None, Some(_)) => Err(Error::ItemNotFound { getter }),
        _ => Err(Error::ItemIdentity { getter }),
    }
}

impl<I: fmt::Debug> fmt::Debug for Collection<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("items", &self.items)
            .field("item_count", &self.item_count)
            .field("item_to_key", &self.item_to_key.is_some())
            .field("is_item_disabled", &self.is_item_disabled.is_some())
            .finish_non_exhaustive()
    }
}
