// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The controlled state machine: reducer pipeline plus change notification.
//!
//! ## Pipeline
//!
//! [`Machine::dispatch`] runs one transition:
//!
//! 1. Resolve the internal state against the controlled values, so the widget reducer
//!    sees what the caller sees.
//! 2. Run the widget reducer to get a patch (`changes`).
//! 3. Hand `(resolved, ActionAndChanges { action, changes })` to the caller's state
//!    reducer, if any. Its return value *replaces* `changes`: it may echo them, extend
//!    them, or reinstate old values to suppress a transition.
//! 4. Apply the final patch to the resolved state. The result becomes the new internal
//!    state.
//!
//! ## Notifications
//!
//! The previous resolved state and the state proposed in step 4 are compared key by key.
//! Each changed key calls its listener (registered with [`Control::on_change`]) once,
//! then [`Control::on_state_change`] is called once with only the changed keys.
//! Nothing is called when nothing changed.
//!
//! Listeners see the *proposed* state rather than the re-resolved one: a controlled key
//! never changes in the resolved state, and its listener is how the caller learns that
//! it should update the controlled value.
//!
//! ```rust
//! use picklist_core::{
//!     Action, ControlledState, Control, Machine, Seeds, StateChangeType, StateKeys,
//! };
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Toggle { is_open: bool }
//!
//! #[derive(Clone, Debug, Default)]
//! struct ToggleChanges { is_open: Option<bool> }
//!
//! impl ControlledState for Toggle {
//!     type Changes = ToggleChanges;
//!     fn apply(&mut self, changes: &ToggleChanges) {
//!         if let Some(is_open) = changes.is_open { self.is_open = is_open; }
//!     }
//!     fn changed_keys(&self, other: &Self) -> StateKeys {
//!         if self.is_open == other.is_open { StateKeys::empty() } else { StateKeys::IS_OPEN }
//!     }
//!     fn extract(&self, keys: StateKeys) -> ToggleChanges {
//!         ToggleChanges { is_open: keys.contains(StateKeys::IS_OPEN).then_some(self.is_open) }
//!     }
//!     fn keys_of(changes: &ToggleChanges) -> StateKeys {
//!         if changes.is_open.is_some() { StateKeys::IS_OPEN } else { StateKeys::empty() }
//!     }
//! }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum ToggleChange { Flip }
//!
//! impl StateChangeType for ToggleChange {
//!     const ALL: &'static [Self] = &[Self::Flip];
//!     fn as_str(self) -> &'static str { "__flip__" }
//! }
//!
//! #[derive(Debug)]
//! struct Flip;
//!
//! impl Action for Flip {
//!     type Kind = ToggleChange;
//!     fn kind(&self) -> ToggleChange { ToggleChange::Flip }
//! }
//!
//! let mut machine: Machine<Toggle, Flip> = Machine::new(Seeds::default(), Control::new());
//! machine.dispatch(Flip, |state, _, _| ToggleChanges { is_open: Some(!state.is_open) });
//! assert!(machine.state().is_open);
//! ```

use alloc::boxed::Box;
use core::fmt;

use hashbrown::HashMap;

use crate::action::{Action, StateChangeType};
use crate::state::{ControlledState, Seeds, StateKeys, resolve};

/// What a caller's state reducer receives next to the resolved state.
#[derive(Debug)]
pub struct ActionAndChanges<'a, S: ControlledState, A> {
    /// The action being dispatched.
    pub action: &'a A,
    /// The patch computed by the widget reducer.
    pub changes: S::Changes,
}

impl<S: ControlledState, A: Action> ActionAndChanges<'_, S, A> {
    /// Kind of the action.
    pub fn kind(&self) -> A::Kind {
        self.action.kind()
    }
}

/// Argument of a per-key change listener.
#[derive(Debug)]
pub struct KeyChange<'a, S, K> {
    /// Kind of the action that caused the change.
    pub kind: K,
    /// The key that changed.
    pub key: StateKeys,
    /// The full proposed state after the transition.
    pub state: &'a S,
}

/// Argument of the aggregate state change listener.
#[derive(Debug)]
pub struct StateChange<S: ControlledState, K> {
    /// Kind of the action that caused the change.
    pub kind: K,
    /// Keys that changed.
    pub keys: StateKeys,
    /// New values of the changed keys only.
    pub changes: S::Changes,
}

type StateReducer<S, A> =
    Box<dyn Fn(&S, ActionAndChanges<'_, S, A>) -> <S as ControlledState>::Changes>;
type KeyListener<S, K> = Box<dyn FnMut(&KeyChange<'_, S, K>)>;
type StateListener<S, K> = Box<dyn FnMut(&StateChange<S, K>)>;

/// Caller control over a machine: controlled values, state reducer, and listeners.
pub struct Control<S: ControlledState, A: Action> {
    /// Controlled values. Present keys always win over the internal state.
    pub controlled: S::Changes,
    state_reducer: Option<StateReducer<S, A>>,
    key_listeners: HashMap<StateKeys, KeyListener<S, A::Kind>>,
    state_listener: Option<StateListener<S, A::Kind>>,
}

impl<S: ControlledState, A: Action> Control<S, A> {
    /// No controlled values, no state reducer, no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            controlled: S::Changes::default(),
            state_reducer: None,
            key_listeners: HashMap::new(),
            state_listener: None,
        }
    }

    /// Install the state reducer. It replaces any previous one.
    pub fn set_state_reducer(
        &mut self,
        state_reducer: impl Fn(&S, ActionAndChanges<'_, S, A>) -> S::Changes + 'static,
    ) {
        self.state_reducer = Some(Box::new(state_reducer));
    }

    /// Register the listener for a single state key, replacing any previous one.
    pub fn on_change(
        &mut self,
        key: StateKeys,
        listener: impl FnMut(&KeyChange<'_, S, A::Kind>) + 'static,
    ) {
        debug_assert!(
            key.bits().count_ones() == 1,
            "listeners are registered per single key"
        );
        self.key_listeners.insert(key, Box::new(listener));
    }

    /// Register the aggregate listener, replacing any previous one.
    pub fn on_state_change(&mut self, listener: impl FnMut(&StateChange<S, A::Kind>) + 'static) {
        self.state_listener = Some(Box::new(listener));
    }

    fn reduce(&self, resolved: &S, action: &A, changes: S::Changes) -> S::Changes {
        match &self.state_reducer {
            Some(state_reducer) => state_reducer(resolved, ActionAndChanges { action, changes }),
            None => changes,
        }
    }

    fn notify(&mut self, kind: A::Kind, proposed: &S, changed: StateKeys) {
        if changed.is_empty() {
            return;
        }
        for key in changed.iter() {
            tracing::trace!(kind = kind.as_str(), key = key.name(), "state key changed");
            if let Some(listener) = self.key_listeners.get_mut(&key) {
                listener(&KeyChange {
                    kind,
                    key,
                    state: proposed,
                });
            }
        }
        if let Some(listener) = &mut self.state_listener {
            listener(&StateChange {
                kind,
                keys: changed,
                changes: proposed.extract(changed),
            });
        }
    }
}

impl<S: ControlledState, A: Action> Default for Control<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ControlledState, A: Action> fmt::Debug for Control<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("controlled", &self.controlled)
            .field("state_reducer", &self.state_reducer.is_some())
            .field("key_listeners", &self.key_listeners.len())
            .field("state_listener", &self.state_listener.is_some())
            .finish()
    }
}

/// Outcome of one dispatched action.
#[derive(Clone, Debug)]
pub struct Transition<S, K> {
    /// Kind of the dispatched action.
    pub kind: K,
    /// Resolved state before the transition.
    pub previous: S,
    /// State proposed by the reducers, before controlled values are re-applied.
    pub proposed: S,
    /// Keys that differ between `previous` and `proposed`.
    pub changed: StateKeys,
}

impl<S, K> Transition<S, K> {
    /// Whether any of `keys` changed.
    pub fn changed_any(&self, keys: StateKeys) -> bool {
        self.changed.intersects(keys)
    }
}

/// Internal state plus the caller's seeds and control.
#[derive(Debug)]
pub struct Machine<S: ControlledState, A: Action> {
    internal: S,
    seeds: Seeds<S>,
    control: Control<S, A>,
}

impl<S: ControlledState, A: Action> Machine<S, A> {
    /// Construct the first state from seeds and controlled values.
    pub fn new(seeds: Seeds<S>, control: Control<S, A>) -> Self {
        Self::new_with(seeds, control, |_| {})
    }

    /// Like [`Machine::new`], letting the widget adjust the first internal state (for
    /// example to highlight the selected item of a menu that starts open).
    pub fn new_with(seeds: Seeds<S>, control: Control<S, A>, adjust: impl FnOnce(&mut S)) -> Self {
        let mut internal = seeds.initial_state(&control.controlled);
        adjust(&mut internal);
        Self {
            internal,
            seeds,
            control,
        }
    }

    /// The resolved state.
    pub fn state(&self) -> S {
        resolve(&self.internal, &self.control.controlled)
    }

    /// The internal state, without controlled values.
    pub fn internal(&self) -> &S {
        &self.internal
    }

    /// Initial and default values.
    pub fn seeds(&self) -> &Seeds<S> {
        &self.seeds
    }

    /// Caller control.
    pub fn control(&self) -> &Control<S, A> {
        &self.control
    }

    /// Mutable caller control, for re-rendering with new controlled values or listeners.
    pub fn control_mut(&mut self) -> &mut Control<S, A> {
        &mut self.control
    }

    /// Run one transition through the pipeline and notify listeners.
    ///
    /// `reduce` is the widget reducer: a pure function of the resolved state, the action,
    /// and the seeds, returning a patch.
    pub fn dispatch(
        &mut self,
        action: A,
        reduce: impl FnOnce(&S, &A, &Seeds<S>) -> S::Changes,
    ) -> Transition<S, A::Kind> {
        let kind = action.kind();
        let previous = self.state();
        let changes = reduce(&previous, &action, &self.seeds);
        let changes = self.control.reduce(&previous, &action, changes);

        let mut proposed = previous.clone();
        proposed.apply(&changes);
        let changed = previous.changed_keys(&proposed);
        tracing::debug!(
            kind = kind.as_str(),
            changed = ?changed,
            "dispatched action"
        );

        self.internal = proposed.clone();
        self.control.notify(kind, &proposed, changed);
        Transition {
            kind,
            previous,
            proposed,
            changed,
        }
    }

    /// Correct the internal state after something outside the pipeline changed, such as
    /// the item collection. No listener is notified.
    pub fn repair(&mut self, fix: impl FnOnce(&mut S)) {
        let before = self.internal.clone();
        fix(&mut self.internal);
        let changed = before.changed_keys(&self.internal);
        if !changed.is_empty() {
            tracing::debug!(changed = ?changed, "internal state repaired");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use crate::Error;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Menu {
        is_open: bool,
        highlighted_index: Option<usize>,
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct MenuChanges {
        is_open: Option<bool>,
        highlighted_index: Option<Option<usize>>,
    }

    impl ControlledState for Menu {
        type Changes = MenuChanges;

        fn apply(&mut self, changes: &MenuChanges) {
            if let Some(is_open) = changes.is_open {
                self.is_open = is_open;
            }
            if let Some(index) = changes.highlighted_index {
                self.highlighted_index = index;
            }
        }

        fn changed_keys(&self, other: &Self) -> StateKeys {
            let mut keys = StateKeys::empty();
            keys.set(StateKeys::IS_OPEN, self.is_open != other.is_open);
            keys.set(
                StateKeys::HIGHLIGHTED_INDEX,
                self.highlighted_index != other.highlighted_index,
            );
            keys
        }

        fn extract(&self, keys: StateKeys) -> MenuChanges {
            MenuChanges {
                is_open: keys.contains(StateKeys::IS_OPEN).then_some(self.is_open),
                highlighted_index: keys
                    .contains(StateKeys::HIGHLIGHTED_INDEX)
                    .then_some(self.highlighted_index),
            }
        }

        fn keys_of(changes: &MenuChanges) -> StateKeys {
            let mut keys = StateKeys::empty();
            keys.set(StateKeys::IS_OPEN, changes.is_open.is_some());
            keys.set(
                StateKeys::HIGHLIGHTED_INDEX,
                changes.highlighted_index.is_some(),
            );
            keys
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum MenuChange {
        Open,
        Highlight,
        Reset,
    }

    impl StateChangeType for MenuChange {
        const ALL: &'static [Self] = &[Self::Open, Self::Highlight, Self::Reset];

        fn as_str(self) -> &'static str {
            match self {
                Self::Open => "__open__",
                Self::Highlight => "__highlight__",
                Self::Reset => "__reset__",
            }
        }
    }

    #[derive(Debug)]
    enum MenuAction {
        Open,
        Highlight(usize),
        Reset,
    }

    impl Action for MenuAction {
        type Kind = MenuChange;

        fn kind(&self) -> MenuChange {
            match self {
                Self::Open => MenuChange::Open,
                Self::Highlight(_) => MenuChange::Highlight,
                Self::Reset => MenuChange::Reset,
            }
        }
    }

    fn reduce(state: &Menu, action: &MenuAction, seeds: &Seeds<Menu>) -> MenuChanges {
        match action {
            MenuAction::Open => MenuChanges {
                is_open: Some(true),
                highlighted_index: Some(state.highlighted_index.or(Some(0))),
            },
            MenuAction::Highlight(index) => MenuChanges {
                highlighted_index: Some(Some(*index)),
                ..MenuChanges::default()
            },
            MenuAction::Reset => seeds.default_state().extract(StateKeys::all()),
        }
    }

    #[test]
    fn precedence_controlled_initial_default_fallback() {
        let seeds = Seeds::<Menu> {
            initial: MenuChanges {
                highlighted_index: Some(Some(2)),
                ..MenuChanges::default()
            },
            default: MenuChanges {
                is_open: Some(true),
                highlighted_index: Some(Some(5)),
            },
        };
        let machine: Machine<Menu, MenuAction> = Machine::new(seeds.clone(), Control::new());
        assert_eq!(
            machine.state(),
            Menu {
                is_open: true,
                highlighted_index: Some(2)
            }
        );

        let mut control: Control<Menu, MenuAction> = Control::new();
        control.controlled.is_open = Some(false);
        let machine: Machine<Menu, MenuAction> = Machine::new(seeds, control);
        assert!(!machine.state().is_open);

        let machine: Machine<Menu, MenuAction> = Machine::new(Seeds::default(), Control::new());
        assert_eq!(machine.state(), Menu::default());
    }

    #[test]
    fn controlled_key_always_wins() {
        let mut control: Control<Menu, MenuAction> = Control::new();
        control.controlled.highlighted_index = Some(Some(42));
        let mut machine: Machine<Menu, MenuAction> = Machine::new(Seeds::default(), control);

        machine.dispatch(MenuAction::Highlight(1), reduce);
        assert_eq!(machine.state().highlighted_index, Some(42));
        assert_eq!(machine.internal().highlighted_index, Some(1));

        // Re-render with a new controlled value and no action.
        machine.control_mut().controlled.highlighted_index = Some(None);
        assert_eq!(machine.state().highlighted_index, None);
        machine.control_mut().controlled.highlighted_index = None;
        assert_eq!(machine.state().highlighted_index, Some(1));
    }

    #[test]
    fn reducer_sees_resolved_state() {
        let mut control: Control<Menu, MenuAction> = Control::new();
        control.controlled.highlighted_index = Some(Some(3));
        let mut machine: Machine<Menu, MenuAction> = Machine::new(Seeds::default(), control);
        let transition = machine.dispatch(MenuAction::Open, reduce);
        assert_eq!(transition.proposed.highlighted_index, Some(3));
    }

    #[test]
    fn state_reducer_replaces_changes() {
        let mut control: Control<Menu, MenuAction> = Control::new();
        control.set_state_reducer(|_, ac| match ac.kind() {
            // Keep the menu closed but allow the highlight to move.
            MenuChange::Open => MenuChanges {
                is_open: Some(false),
                ..ac.changes
            },
            _ => ac.changes,
        });
        let mut machine = Machine::new(Seeds::default(), control);
        machine.dispatch(MenuAction::Open, reduce);
        assert_eq!(
            machine.state(),
            Menu {
                is_open: false,
                highlighted_index: Some(0)
            }
        );
    }

    #[test]
    fn key_listeners_fire_once_per_changed_key() {
        let log: Rc<RefCell<Vec<(&'static str, MenuChange)>>> = Rc::default();
        let mut control: Control<Menu, MenuAction> = Control::new();
        let sink = log.clone();
        control.on_change(StateKeys::IS_OPEN, move |change| {
            sink.borrow_mut().push(("isOpen", change.kind));
        });
        let sink = log.clone();
        control.on_change(StateKeys::HIGHLIGHTED_INDEX, move |change| {
            sink.borrow_mut().push(("highlightedIndex", change.kind));
        });
        let sink = log.clone();
        control.on_state_change(move |change| {
            assert!(!change.keys.is_empty());
            sink.borrow_mut().push(("state", change.kind));
        });
        let mut machine = Machine::new(Seeds::default(), control);

        machine.dispatch(MenuAction::Open, reduce);
        assert_eq!(
            *log.borrow(),
            vec![
                ("isOpen", MenuChange::Open),
                ("highlightedIndex", MenuChange::Open),
                ("state", MenuChange::Open),
            ]
        );

        log.borrow_mut().clear();
        machine.dispatch(MenuAction::Highlight(0), reduce);
        assert!(log.borrow().is_empty(), "unchanged state notifies nobody");

        machine.dispatch(MenuAction::Highlight(4), reduce);
        assert_eq!(
            *log.borrow(),
            vec![
                ("highlightedIndex", MenuChange::Highlight),
                ("state", MenuChange::Highlight),
            ]
        );
    }

    #[test]
    fn state_change_carries_only_changed_keys() {
        let seen: Rc<RefCell<Vec<MenuChanges>>> = Rc::default();
        let mut control: Control<Menu, MenuAction> = Control::new();
        let sink = seen.clone();
        control.on_state_change(move |change| sink.borrow_mut().push(change.changes.clone()));
        let mut machine = Machine::new(Seeds::default(), control);

        machine.dispatch(MenuAction::Highlight(7), reduce);
        assert_eq!(
            seen.borrow()[0],
            MenuChanges {
                is_open: None,
                highlighted_index: Some(Some(7)),
            }
        );
    }

    #[test]
    fn neutralized_transition_notifies_nobody() {
        let calls = Rc::new(RefCell::new(0_u32));
        let mut control: Control<Menu, MenuAction> = Control::new();
        control.set_state_reducer(|state, _| state.extract(StateKeys::all()));
        let sink = calls.clone();
        control.on_state_change(move |_| *sink.borrow_mut() += 1);
        let sink = calls.clone();
        control.on_change(StateKeys::IS_OPEN, move |_| *sink.borrow_mut() += 1);
        let mut machine = Machine::new(Seeds::default(), control);

        let transition = machine.dispatch(MenuAction::Open, reduce);
        assert!(transition.changed.is_empty());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn listeners_see_proposed_value_of_controlled_key() {
        let seen: Rc<RefCell<Vec<bool>>> = Rc::default();
        let mut control: Control<Menu, MenuAction> = Control::new();
        control.controlled.is_open = Some(false);
        let sink = seen.clone();
        control.on_change(StateKeys::IS_OPEN, move |change| {
            sink.borrow_mut().push(change.state.is_open);
        });
        let mut machine = Machine::new(Seeds::default(), control);

        machine.dispatch(MenuAction::Open, reduce);
        assert_eq!(*seen.borrow(), vec![true]);
        assert!(!machine.state().is_open);
    }

    #[test]
    fn reset_is_idempotent() {
        let seeds = Seeds::<Menu> {
            initial: MenuChanges::default(),
            default: MenuChanges {
                is_open: Some(false),
                highlighted_index: Some(Some(1)),
            },
        };
        let mut machine: Machine<Menu, MenuAction> = Machine::new(seeds, Control::new());
        machine.dispatch(MenuAction::Open, reduce);
        machine.dispatch(MenuAction::Highlight(3), reduce);

        machine.dispatch(MenuAction::Reset, reduce);
        let once = machine.state();
        let second = machine.dispatch(MenuAction::Reset, reduce);
        assert_eq!(machine.state(), once);
        assert!(second.changed.is_empty());
    }

    #[test]
    fn repair_is_silent_and_keeps_controlled_values() {
        let calls = Rc::new(RefCell::new(0_u32));
        let mut control: Control<Menu, MenuAction> = Control::new();
        control.controlled.is_open = Some(true);
        let sink = calls.clone();
        control.on_state_change(move |_| *sink.borrow_mut() += 1);
        let mut machine = Machine::new(Seeds::default(), control);
        machine.dispatch(MenuAction::Highlight(4), reduce);
        assert_eq!(*calls.borrow(), 1);

        machine.repair(|menu| {
            menu.is_open = false;
            menu.highlighted_index = None;
        });
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(
            machine.state(),
            Menu {
                is_open: true,
                highlighted_index: None
            }
        );
    }

    #[test]
    fn symbols_parse_back_and_unknown_is_an_error() {
        assert_eq!(MenuChange::parse("__reset__"), Ok(MenuChange::Reset));
        assert_eq!(
            MenuChange::parse("__nope__"),
            Err(Error::UnknownStateChangeType("__nope__".into()))
        );
    }
}
