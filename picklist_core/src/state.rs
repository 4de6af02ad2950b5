// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State keys, partial-state patches, and controlled-value resolution.
//!
//! Widget state is a small typed struct. Everything that *modifies* state is expressed
//! as a patch of the same shape whose fields are all optional (the associated
//! [`ControlledState::Changes`] type): reducer output, state-reducer output, and the
//! caller's controlled, initial and default values all use it.
//!
//! Resolution is a plain overlay: [`resolve`] copies the internal state and writes every
//! key present in the controlled patch over it. Controlled values are passed through as
//! given, including indices that are out of range for the current collection.

use core::fmt::Debug;

bitflags::bitflags! {
    /// Set of state keys.
    ///
    /// Used to report which keys a transition changed and to route per-key change
    /// listeners. Each widget uses a subset.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StateKeys: u8 {
        /// Whether the menu is open.
        const IS_OPEN           = 0b0000_0001;
        /// Highlighted item index.
        const HIGHLIGHTED_INDEX = 0b0000_0010;
        /// Selected item (single selection).
        const SELECTED_ITEM     = 0b0000_0100;
        /// Text input value (also the typeahead buffer of a select).
        const INPUT_VALUE       = 0b0000_1000;
        /// Selected items (multiple selection).
        const SELECTED_ITEMS    = 0b0001_0000;
        /// Active (focused) index of a selected item or tag.
        const ACTIVE_INDEX      = 0b0010_0000;
        /// Items of a tag group.
        const ITEMS             = 0b0100_0000;
    }
}

impl StateKeys {
    /// Camel-case name of a single key, for logs and diagnostics.
    ///
    /// Returns `"?"` for empty or multi-key sets.
    #[must_use]
    pub fn name(self) -> &'static str {
        const NAMES: [(StateKeys, &str); 7] = [
            (StateKeys::IS_OPEN, "isOpen"),
            (StateKeys::HIGHLIGHTED_INDEX, "highlightedIndex"),
            (StateKeys::SELECTED_ITEM, "selectedItem"),
            (StateKeys::INPUT_VALUE, "inputValue"),
            (StateKeys::SELECTED_ITEMS, "selectedItems"),
            (StateKeys::ACTIVE_INDEX, "activeIndex"),
            (StateKeys::ITEMS, "items"),
        ];
        NAMES
            .iter()
            .find(|(key, _)| *key == self)
            .map_or("?", |(_, name)| name)
    }
}

/// A widget state that can be patched, diffed, and overlaid with controlled values.
pub trait ControlledState: Clone + PartialEq + Debug + Default {
    /// Partial state: the same keys, each optional.
    type Changes: Clone + Debug + Default;

    /// Write every key present in `changes` into `self`.
    fn apply(&mut self, changes: &Self::Changes);

    /// Keys whose values differ between `self` and `other`.
    fn changed_keys(&self, other: &Self) -> StateKeys;

    /// A patch holding only the given keys, with values taken from `self`.
    fn extract(&self, keys: StateKeys) -> Self::Changes;

    /// Keys present in a patch.
    fn keys_of(changes: &Self::Changes) -> StateKeys;
}

/// Overlay controlled values onto an internal state.
///
/// Pure: the internal state is left untouched.
pub fn resolve<S: ControlledState>(internal: &S, controlled: &S::Changes) -> S {
    let mut resolved = internal.clone();
    resolved.apply(controlled);
    resolved
}

/// Initial and default values supplied by the caller.
///
/// Initial values seed the first state only. Default values seed the first state when
/// no initial value is given, and are also what transitions such as reset or selection
/// return keys to.
#[derive(Clone, Debug)]
pub struct Seeds<S: ControlledState> {
    /// Initial values.
    pub initial: S::Changes,
    /// Default values.
    pub default: S::Changes,
}

impl<S: ControlledState> Default for Seeds<S> {
    fn default() -> Self {
        Self {
            initial: S::Changes::default(),
            default: S::Changes::default(),
        }
    }
}

impl<S: ControlledState> Seeds<S> {
    /// The fallback state with default values applied.
    #[must_use]
    pub fn default_state(&self) -> S {
        let mut state = S::default();
        state.apply(&self.default);
        state
    }

    /// First state of an instance.
    ///
    /// Each key resolves as controlled > initial > default > fallback.
    #[must_use]
    pub fn initial_state(&self, controlled: &S::Changes) -> S {
        let mut state = self.default_state();
        state.apply(&self.initial);
        state.apply(controlled);
        state
    }
}
