// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picklist: headless selectable-list widgets.
//!
//! Four widgets share the engine in [`picklist_core`]:
//!
//! - [`Select`]: a toggle button and a listbox, with typeahead.
//! - [`Combobox`]: a text input that filters and picks from a listbox.
//! - [`MultipleSelection`]: a list of selected items, navigable and removable from the
//!   keyboard, meant to sit next to a select or a combobox.
//! - [`TagGroup`]: a row of removable tags with one roving tab stop.
//!
//! None of them renders anything. Each hands out prop bags (attributes, ordered
//! handler chains, and ref bindings) from its getters. The host renders them, reports
//! the node behind each ref with `attach`, and routes events back through `fire`.
//! After each render the host calls `commit`, which moves focus, scrolls the
//! highlighted item into view, and queues status announcements. `tick` fires due
//! timers.
//!
//! Every piece of state can be controlled. Pass values through `controlled` on the
//! props, or through `control_mut` later. Transitions still run and listeners still
//! hear about them, but the controlled values win when the state is read.
//!
//! ## Minimal example
//!
//! ```rust
//! use picklist::{Select, SelectProps};
//! use picklist_core::{IdGenerator, Key, UiEvent, UserProps};
//!
//! let mut generator = IdGenerator::new();
//! let mut select = Select::new(
//!     SelectProps::new(vec!["Apple", "Banana", "Cherry"]).item_to_string(|s| s.to_string()),
//!     &mut generator,
//! );
//!
//! let button = select.get_toggle_button_props(UserProps::new());
//! assert_eq!(button.attr_str("role"), Some("combobox"));
//!
//! select.fire(&button, &UiEvent::key_down(Key::ArrowDown));
//! assert!(select.state().is_open);
//! assert_eq!(select.state().highlighted_index, Some(0));
//!
//! select.fire(&button, &UiEvent::key_down(Key::ArrowDown));
//! select.fire(&button, &UiEvent::key_down(Key::Enter));
//! assert_eq!(select.state().selected_item, Some("Banana"));
//! assert!(!select.state().is_open);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to `picklist_core`.
//! - `libm`: `no_std` float support, forwarded to `picklist_core`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod active;
mod collection;
mod combobox;
mod dropdown;
mod effects;
mod multiple_selection;
mod select;
mod tag_group;

#[cfg(test)]
mod testing;

pub use active::{RemovalMessage, RemovalStatus, default_removal_message};
pub use collection::{Collection, IsItemDisabled, Item, ItemToKey, ItemToString};
pub use combobox::{
    Combobox, ComboboxAction, ComboboxChangeType, ComboboxHandler, ComboboxProps,
};
pub use dropdown::{
    DropdownChanges, DropdownProps, DropdownState, DropdownStatus, DropdownStatusMessage,
    default_status_message,
};
pub use effects::ScrollIntoView;
pub use multiple_selection::{
    MultipleSelection, MultipleSelectionAction, MultipleSelectionChangeType,
    MultipleSelectionChanges, MultipleSelectionHandler, MultipleSelectionProps,
    MultipleSelectionState,
};
pub use select::{Select, SelectAction, SelectChangeType, SelectHandler, SelectProps};
pub use tag_group::{
    TagGroup, TagGroupAction, TagGroupChangeType, TagGroupChanges, TagGroupHandler,
    TagGroupProps, TagGroupState,
};
