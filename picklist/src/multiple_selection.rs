// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiple selection: a row of selected items in front of a dropdown.
//!
//! The selected items form a roving-tabindex row. The navigation keys move the
//! active item, Backspace and Delete remove it, and moving past the last item
//! returns focus to the dropdown (the input or toggle button of a
//! [`Combobox`](crate::Combobox) or [`Select`](crate::Select)). With the caret at the
//! start of the dropdown, the previous-navigation key enters the row from its end and
//! Backspace removes the last item.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use picklist_core::props::{ElementProps, EngineProps};
use picklist_core::{
    Action, ActionAndChanges, Control, ControlledState, ElementIds, Environment, Error,
    EventKind, Headless, IdGenerator, IdOverrides, Key, KeyChange, Machine, NodeRef, Outcome,
    RefBinding, RefSlot, Seeds, StateChange, StateChangeType, StateKeys, UiEvent, UserProps,
    compose, run_chain,
};

use crate::active::{
    ActiveCommit, FocusTargets, RemovalMessage, RemovalStatus, active_after_removal,
    settle_active_index,
};
use crate::collection::{Collection, Item, resolve_index};
use crate::effects::Effects;

const SELECTED_ITEM: &str = "get_selected_item_props";
const DROPDOWN: &str = "get_dropdown_props";

const FOCUS: FocusTargets = FocusTargets {
    item: RefSlot::SelectedItem,
    fallback: RefSlot::Dropdown,
};

/// State of a [`MultipleSelection`].
#[derive(Clone, Debug, PartialEq)]
pub struct MultipleSelectionState<I> {
    /// Selected items, in order.
    pub selected_items: Vec<I>,
    /// Index of the focused selected item.
    pub active_index: Option<usize>,
}

impl<I> Default for MultipleSelectionState<I> {
    fn default() -> Self {
        Self {
            selected_items: Vec::new(),
            active_index: None,
        }
    }
}

/// Partial [`MultipleSelectionState`]. `None` fields are absent.
#[derive(Clone, Debug, PartialEq)]
pub struct MultipleSelectionChanges<I> {
    /// Selected items.
    pub selected_items: Option<Vec<I>>,
    /// Active index.
    pub active_index: Option<Option<usize>>,
}

impl<I> Default for MultipleSelectionChanges<I> {
    fn default() -> Self {
        Self {
            selected_items: None,
            active_index: None,
        }
    }
}

impl<I> MultipleSelectionChanges<I> {
    /// No keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With `selected_items`.
    #[must_use]
    pub fn selected_items(mut self, items: Vec<I>) -> Self {
        self.selected_items = Some(items);
        self
    }

    /// With `active_index`.
    #[must_use]
    pub fn active_index(mut self, index: Option<usize>) -> Self {
        self.active_index = Some(index);
        self
    }
}

impl<I: Item> ControlledState for MultipleSelectionState<I> {
    type Changes = MultipleSelectionChanges<I>;

    fn apply(&mut self, changes: &MultipleSelectionChanges<I>) {
        if let Some(items) = &changes.selected_items {
            self.selected_items.clone_from(items);
        }
        if let Some(index) = changes.active_index {
            self.active_index = index;
        }
    }

    fn changed_keys(&self, other: &Self) -> StateKeys {
        let mut keys = StateKeys::empty();
        keys.set(
            StateKeys::SELECTED_ITEMS,
            self.selected_items != other.selected_items,
        );
        keys.set(StateKeys::ACTIVE_INDEX, self.active_index != other.active_index);
        keys
    }

    fn extract(&self, keys: StateKeys) -> MultipleSelectionChanges<I> {
        MultipleSelectionChanges {
            selected_items: keys
                .contains(StateKeys::SELECTED_ITEMS)
                .then(|| self.selected_items.clone()),
            active_index: keys
                .contains(StateKeys::ACTIVE_INDEX)
                .then_some(self.active_index),
        }
    }

    fn keys_of(changes: &MultipleSelectionChanges<I>) -> StateKeys {
        let mut keys = StateKeys::empty();
        keys.set(StateKeys::SELECTED_ITEMS, changes.selected_items.is_some());
        keys.set(StateKeys::ACTIVE_INDEX, changes.active_index.is_some());
        keys
    }
}

/// Transitions of a [`MultipleSelection`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[expect(missing_docs, reason = "names match the transition symbols")]
pub enum MultipleSelectionChangeType {
    SelectedItemClick,
    SelectedItemKeyDownDelete,
    SelectedItemKeyDownBackspace,
    SelectedItemKeyDownNavigationNext,
    SelectedItemKeyDownNavigationPrevious,
    DropdownKeyDownNavigationPrevious,
    DropdownKeyDownBackspace,
    DropdownClick,
    FunctionAddSelectedItem,
    FunctionRemoveSelectedItem,
    FunctionSetSelectedItems,
    FunctionSetActiveIndex,
    FunctionReset,
}

impl StateChangeType for MultipleSelectionChangeType {
    const ALL: &'static [Self] = &[
        Self::SelectedItemClick,
        Self::SelectedItemKeyDownDelete,
        Self::SelectedItemKeyDownBackspace,
        Self::SelectedItemKeyDownNavigationNext,
        Self::SelectedItemKeyDownNavigationPrevious,
        Self::DropdownKeyDownNavigationPrevious,
        Self::DropdownKeyDownBackspace,
        Self::DropdownClick,
        Self::FunctionAddSelectedItem,
        Self::FunctionRemoveSelectedItem,
        Self::FunctionSetSelectedItems,
        Self::FunctionSetActiveIndex,
        Self::FunctionReset,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::SelectedItemClick => "__selected_item_click__",
            Self::SelectedItemKeyDownDelete => "__selected_item_keydown_delete__",
            Self::SelectedItemKeyDownBackspace => "__selected_item_keydown_backspace__",
            Self::SelectedItemKeyDownNavigationNext => {
                "__selected_item_keydown_navigation_next__"
            }
            Self::SelectedItemKeyDownNavigationPrevious => {
                "__selected_item_keydown_navigation_previous__"
            }
            Self::DropdownKeyDownNavigationPrevious => "__dropdown_keydown_navigation_previous__",
            Self::DropdownKeyDownBackspace => "__dropdown_keydown_backspace__",
            Self::DropdownClick => "__dropdown_click__",
            Self::FunctionAddSelectedItem => "__function_add_selected_item__",
            Self::FunctionRemoveSelectedItem => "__function_remove_selected_item__",
            Self::FunctionSetSelectedItems => "__function_set_selected_items__",
            Self::FunctionSetActiveIndex => "__function_set_active_index__",
            Self::FunctionReset => "__function_reset__",
        }
    }
}

/// Actions of a [`MultipleSelection`].
#[derive(Clone, Debug, PartialEq)]
pub enum MultipleSelectionAction<I> {
    /// Selected item at an index clicked.
    SelectedItemClick(usize),
    /// Delete on the active item.
    SelectedItemKeyDownDelete,
    /// Backspace on the active item.
    SelectedItemKeyDownBackspace,
    /// Next-navigation key on the active item.
    SelectedItemKeyDownNavigationNext,
    /// Previous-navigation key on the active item.
    SelectedItemKeyDownNavigationPrevious,
    /// Previous-navigation key with the dropdown caret at the start.
    DropdownKeyDownNavigationPrevious,
    /// Backspace with the dropdown caret at the start.
    DropdownKeyDownBackspace,
    /// Dropdown clicked.
    DropdownClick,
    /// [`MultipleSelection::add_selected_item`].
    FunctionAddSelectedItem(I),
    /// [`MultipleSelection::remove_selected_item`].
    FunctionRemoveSelectedItem(I),
    /// [`MultipleSelection::set_selected_items`].
    FunctionSetSelectedItems(Vec<I>),
    /// [`MultipleSelection::set_active_index`].
    FunctionSetActiveIndex(Option<usize>),
    /// [`MultipleSelection::reset`].
    FunctionReset,
}

impl<I: Item> Action for MultipleSelectionAction<I> {
    type Kind = MultipleSelectionChangeType;

    fn kind(&self) -> MultipleSelectionChangeType {
        use MultipleSelectionChangeType as K;
        match self {
            Self::SelectedItemClick(_) => K::SelectedItemClick,
            Self::SelectedItemKeyDownDelete => K::SelectedItemKeyDownDelete,
            Self::SelectedItemKeyDownBackspace => K::SelectedItemKeyDownBackspace,
            Self::SelectedItemKeyDownNavigationNext => K::SelectedItemKeyDownNavigationNext,
            Self::SelectedItemKeyDownNavigationPrevious => {
                K::SelectedItemKeyDownNavigationPrevious
            }
            Self::DropdownKeyDownNavigationPrevious => K::DropdownKeyDownNavigationPrevious,
            Self::DropdownKeyDownBackspace => K::DropdownKeyDownBackspace,
            Self::DropdownClick => K::DropdownClick,
            Self::FunctionAddSelectedItem(_) => K::FunctionAddSelectedItem,
            Self::FunctionRemoveSelectedItem(_) => K::FunctionRemoveSelectedItem,
            Self::FunctionSetSelectedItems(_) => K::FunctionSetSelectedItems,
            Self::FunctionSetActiveIndex(_) => K::FunctionSetActiveIndex,
            Self::FunctionReset => K::FunctionReset,
        }
    }
}

/// Engine handlers carried by [`MultipleSelection`] prop bags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultipleSelectionHandler {
    /// Click on the selected item at an index.
    SelectedItemClick(usize),
    /// Key press on a selected item.
    SelectedItemKeyDown,
    /// Key press in the dropdown.
    DropdownKeyDown,
    /// Click on the dropdown.
    DropdownClick,
}

/// Options of a [`MultipleSelection`].
pub struct MultipleSelectionProps<I: Item> {
    item_fns: Collection<I>,
    seeds: Seeds<MultipleSelectionState<I>>,
    control: Control<MultipleSelectionState<I>, MultipleSelectionAction<I>>,
    environment: Box<dyn Environment>,
    ids: IdOverrides,
    status_message: Option<RemovalMessage<I>>,
    key_navigation_previous: Key,
    key_navigation_next: Key,
}

type KeyChangeOf<'a, I> = KeyChange<'a, MultipleSelectionState<I>, MultipleSelectionChangeType>;

impl<I: Item> MultipleSelectionProps<I> {
    /// Default options: nothing selected, ArrowLeft/ArrowRight navigation, headless.
    pub fn new() -> Self {
        Self {
            item_fns: Collection::new(Vec::new()),
            seeds: Seeds::default(),
            control: Control::new(),
            environment: Box::new(Headless::new()),
            ids: IdOverrides::default(),
            status_message: None,
            key_navigation_previous: Key::ArrowLeft,
            key_navigation_next: Key::ArrowRight,
        }
    }

    /// Item display text, used in removal messages.
    #[must_use]
    pub fn item_to_string(mut self, f: impl Fn(&I) -> String + 'static) -> Self {
        self.item_fns.set_item_to_string(f);
        self
    }

    /// Item identity key. Without one, items are compared by value.
    #[must_use]
    pub fn item_to_key(mut self, f: impl Fn(&I) -> String + 'static) -> Self {
        self.item_fns.set_item_to_key(f);
        self
    }

    /// Keys moving the active item backward and forward.
    #[must_use]
    pub fn navigation_keys(mut self, previous: Key, next: Key) -> Self {
        self.key_navigation_previous = previous;
        self.key_navigation_next = next;
        self
    }

    /// Controlled values.
    #[must_use]
    pub fn controlled(mut self, controlled: MultipleSelectionChanges<I>) -> Self {
        self.control.controlled = controlled;
        self
    }

    /// Initial values.
    #[must_use]
    pub fn initial(mut self, initial: MultipleSelectionChanges<I>) -> Self {
        self.seeds.initial = initial;
        self
    }

    /// Default values.
    #[must_use]
    pub fn defaults(mut self, defaults: MultipleSelectionChanges<I>) -> Self {
        self.seeds.default = defaults;
        self
    }

    /// State reducer.
    #[must_use]
    pub fn state_reducer(
        mut self,
        f: impl Fn(
            &MultipleSelectionState<I>,
            ActionAndChanges<'_, MultipleSelectionState<I>, MultipleSelectionAction<I>>,
        ) -> MultipleSelectionChanges<I>
        + 'static,
    ) -> Self {
        self.control.set_state_reducer(f);
        self
    }

    /// Listener for `selected_items` changes.
    #[must_use]
    pub fn on_selected_items_change(
        mut self,
        f: impl FnMut(&KeyChangeOf<'_, I>) + 'static,
    ) -> Self {
        self.control.on_change(StateKeys::SELECTED_ITEMS, f);
        self
    }

    /// Listener for `active_index` changes.
    #[must_use]
    pub fn on_active_index_change(mut self, f: impl FnMut(&KeyChangeOf<'_, I>) + 'static) -> Self {
        self.control.on_change(StateKeys::ACTIVE_INDEX, f);
        self
    }

    /// Listener called once per transition with all changed keys.
    #[must_use]
    pub fn on_state_change(
        mut self,
        f: impl FnMut(&StateChange<MultipleSelectionState<I>, MultipleSelectionChangeType>)
        + 'static,
    ) -> Self {
        self.control.on_state_change(f);
        self
    }

    /// Removal message function replacing
    /// [`default_removal_message`](crate::default_removal_message).
    #[must_use]
    pub fn a11y_removal_message(
        mut self,
        f: impl Fn(&RemovalStatus<'_, I>) -> String + 'static,
    ) -> Self {
        self.status_message = Some(Box::new(f));
        self
    }

    /// Host environment.
    #[must_use]
    pub fn environment(mut self, env: impl Environment + 'static) -> Self {
        self.environment = Box::new(env);
        self
    }

    /// Id overrides.
    #[must_use]
    pub fn ids(mut self, ids: IdOverrides) -> Self {
        self.ids = ids;
        self
    }
}

impl<I: Item> Default for MultipleSelectionProps<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Item> fmt::Debug for MultipleSelectionProps<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipleSelectionProps")
            .field("seeds", &self.seeds)
            .field("control", &self.control)
            .field("ids", &self.ids)
            .field("key_navigation_previous", &self.key_navigation_previous)
            .field("key_navigation_next", &self.key_navigation_next)
            .finish_non_exhaustive()
    }
}

fn without<I: Clone>(items: &[I], index: usize) -> Vec<I> {
    let mut items = items.to_vec();
    items.remove(index);
    items
}

fn remove_at<I: Item>(
    state: &MultipleSelectionState<I>,
    index: usize,
) -> MultipleSelectionChanges<I> {
    if index >= state.selected_items.len() {
        return MultipleSelectionChanges::new();
    }
    let selected_items = without(&state.selected_items, index);
    let active_index = active_after_removal(state.active_index, index, selected_items.len());
    MultipleSelectionChanges::new()
        .selected_items(selected_items)
        .active_index(active_index)
}

fn reduce<I: Item>(
    state: &MultipleSelectionState<I>,
    action: &MultipleSelectionAction<I>,
    item_fns: &Collection<I>,
    seeds: &Seeds<MultipleSelectionState<I>>,
) -> MultipleSelectionChanges<I> {
    use MultipleSelectionAction as A;
    let len = state.selected_items.len();
    let mut changes = match action {
        A::SelectedItemClick(index) => MultipleSelectionChanges::new().active_index(Some(*index)),
        A::SelectedItemKeyDownNavigationPrevious => MultipleSelectionChanges::new()
            .active_index(state.active_index.map(|i| i.saturating_sub(1))),
        A::SelectedItemKeyDownNavigationNext => MultipleSelectionChanges::new()
            .active_index(state.active_index.and_then(|i| (i + 1 < len).then_some(i + 1))),
        A::SelectedItemKeyDownBackspace | A::SelectedItemKeyDownDelete => match state.active_index
        {
            Some(index) => remove_at(state, index),
            None => MultipleSelectionChanges::new(),
        },
        A::DropdownKeyDownNavigationPrevious => {
            MultipleSelectionChanges::new().active_index(len.checked_sub(1))
        }
        A::DropdownKeyDownBackspace => match len.checked_sub(1) {
            Some(last) => MultipleSelectionChanges::new()
                .selected_items(without(&state.selected_items, last)),
            None => MultipleSelectionChanges::new(),
        },
        A::DropdownClick => MultipleSelectionChanges::new().active_index(None),
        A::FunctionAddSelectedItem(item) => {
            let mut selected_items = state.selected_items.clone();
            selected_items.push(item.clone());
            MultipleSelectionChanges::new().selected_items(selected_items)
        }
        A::FunctionRemoveSelectedItem(item) => {
            match state.selected_items.iter().position(|s| item_fns.same(s, item)) {
                Some(index) => remove_at(state, index),
                None => MultipleSelectionChanges::new(),
            }
        }
        A::FunctionSetSelectedItems(items) => {
            MultipleSelectionChanges::new().selected_items(items.clone())
        }
        A::FunctionSetActiveIndex(index) => {
            MultipleSelectionChanges::new().active_index(index.filter(|&i| i < len))
        }
        A::FunctionReset => seeds.default_state().extract(StateKeys::all()),
    };
    let len_after = changes.selected_items.as_ref().map_or(len, Vec::len);
    changes.active_index = settle_active_index(state.active_index, changes.active_index, len_after);
    changes
}

/// Multiple selection over items picked from a dropdown.
pub struct MultipleSelection<I: Item> {
    machine: Machine<MultipleSelectionState<I>, MultipleSelectionAction<I>>,
    item_fns: Collection<I>,
    effects: Effects,
    last_commit: ActiveCommit<I>,
    status_message: Option<RemovalMessage<I>>,
    key_navigation_previous: Key,
    key_navigation_next: Key,
}

impl<I: Item> MultipleSelection<I> {
    /// Create a multiple selection, taking an id from `generator` unless one was
    /// supplied.
    pub fn new(props: MultipleSelectionProps<I>, generator: &mut IdGenerator) -> Self {
        let MultipleSelectionProps {
            item_fns,
            seeds,
            control,
            environment,
            ids,
            status_message,
            key_navigation_previous,
            key_navigation_next,
        } = props;
        let machine = Machine::new(seeds, control);
        let state = machine.state();
        let effects = Effects::new(environment, ElementIds::new(generator, ids), None);
        tracing::debug!(id = %effects.ids().id, "multiple selection created");
        Self {
            last_commit: ActiveCommit::new(state.selected_items, state.active_index),
            machine,
            item_fns,
            effects,
            status_message,
            key_navigation_previous,
            key_navigation_next,
        }
    }

    /// Resolved state.
    pub fn state(&self) -> MultipleSelectionState<I> {
        self.machine.state()
    }

    /// Element ids.
    pub fn ids(&self) -> &ElementIds {
        self.effects.ids()
    }

    /// Controlled values, state reducer, and listeners.
    pub fn control_mut(
        &mut self,
    ) -> &mut Control<MultipleSelectionState<I>, MultipleSelectionAction<I>> {
        self.machine.control_mut()
    }

    fn dispatch(&mut self, action: MultipleSelectionAction<I>) {
        let item_fns = &self.item_fns;
        self.machine
            .dispatch(action, |state, action, seeds| reduce(state, action, item_fns, seeds));
    }

    /// Props of a selected item, identified by exactly one of `item` and `index`.
    ///
    /// Only the active item is reachable with Tab; without an active item, the first
    /// one is.
    pub fn get_selected_item_props(
        &mut self,
        item: Option<&I>,
        index: Option<usize>,
        user: UserProps,
    ) -> Result<ElementProps<MultipleSelectionHandler>, Error> {
        let state = self.machine.state();
        let item_fns = &self.item_fns;
        let index = resolve_index(
            SELECTED_ITEM,
            item,
            index,
            state.selected_items.len(),
            |item| state.selected_items.iter().position(|s| item_fns.same(s, item)),
        )?;
        let tabbable = state.active_index.unwrap_or(0) == index;
        let engine = EngineProps::new(SELECTED_ITEM)
            .attr("tabindex", if tabbable { 0_i64 } else { -1 })
            .ref_slot(RefSlot::SelectedItem(index))
            .on(
                EventKind::Click,
                MultipleSelectionHandler::SelectedItemClick(index),
            )
            .on(EventKind::KeyDown, MultipleSelectionHandler::SelectedItemKeyDown);
        let options = user.options();
        let props = compose(engine, user);
        self.effects.register(SELECTED_ITEM, &props, options);
        Ok(props)
    }

    /// Props to merge into the dropdown element, usually the props of a combobox input
    /// or select toggle button.
    ///
    /// With `prevent_key_action`, the dropdown keeps only its click listener.
    pub fn get_dropdown_props(
        &mut self,
        user: UserProps,
        prevent_key_action: bool,
    ) -> ElementProps<MultipleSelectionHandler> {
        let mut engine = EngineProps::new(DROPDOWN)
            .ref_slot(RefSlot::Dropdown)
            .on(EventKind::Click, MultipleSelectionHandler::DropdownClick);
        if !prevent_key_action {
            engine = engine.on(EventKind::KeyDown, MultipleSelectionHandler::DropdownKeyDown);
        }
        let options = user.options();
        let props = compose(engine, user);
        self.effects.register(DROPDOWN, &props, options);
        props
    }

    /// Run the listener chain of `props` for `event`.
    pub fn fire(
        &mut self,
        props: &ElementProps<MultipleSelectionHandler>,
        event: &UiEvent,
    ) -> Outcome {
        let Some(chain) = props.chain(event.kind) else {
            return Outcome::Continue;
        };
        match run_chain(chain, event, |handler| {
            self.handle(*handler, event);
            Outcome::Continue
        }) {
            Some(_) => Outcome::Stop,
            None => Outcome::Continue,
        }
    }

    fn handle(&mut self, handler: MultipleSelectionHandler, event: &UiEvent) {
        use MultipleSelectionAction as A;
        let action = match handler {
            MultipleSelectionHandler::SelectedItemClick(index) => Some(A::SelectedItemClick(index)),
            MultipleSelectionHandler::SelectedItemKeyDown => match event.key {
                Key::Delete => Some(A::SelectedItemKeyDownDelete),
                Key::Backspace => Some(A::SelectedItemKeyDownBackspace),
                key if key == self.key_navigation_next => {
                    Some(A::SelectedItemKeyDownNavigationNext)
                }
                key if key == self.key_navigation_previous => {
                    Some(A::SelectedItemKeyDownNavigationPrevious)
                }
                _ => None,
            },
            MultipleSelectionHandler::DropdownKeyDown => {
                let permitted = event.caret_at_start
                    && !event.shift_key
                    && !self.machine.state().selected_items.is_empty();
                match event.key {
                    key if permitted && key == self.key_navigation_previous => {
                        Some(A::DropdownKeyDownNavigationPrevious)
                    }
                    Key::Backspace if permitted => Some(A::DropdownKeyDownBackspace),
                    _ => None,
                }
            }
            MultipleSelectionHandler::DropdownClick => Some(A::DropdownClick),
        };
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    /// Report the node of a prop bag's ref binding (`None` to detach).
    pub fn attach(&mut self, binding: &RefBinding, node: Option<NodeRef>) {
        self.effects.attach(binding, node);
    }

    /// Run post-render effects: focus the active item (or the dropdown once no item is
    /// active) and announce removals.
    ///
    /// The first commit checks that the dropdown getter was called and its node
    /// attached.
    pub fn commit(&mut self) -> Result<(), Error> {
        let verified = self.effects.verify(&[(DROPDOWN, RefSlot::Dropdown)]);
        let state = self.machine.state();
        self.last_commit.run(
            &state.selected_items,
            state.active_index,
            &mut self.effects,
            FOCUS,
            &self.item_fns,
            self.status_message.as_ref(),
        );
        verified
    }

    /// Fire due status timers.
    pub fn tick(&mut self) {
        self.effects.tick();
    }

    /// Append an item.
    pub fn add_selected_item(&mut self, item: I) {
        self.dispatch(MultipleSelectionAction::FunctionAddSelectedItem(item));
    }

    /// Remove an item. Unknown items are ignored.
    pub fn remove_selected_item(&mut self, item: I) {
        self.dispatch(MultipleSelectionAction::FunctionRemoveSelectedItem(item));
    }

    /// Replace the selected items.
    pub fn set_selected_items(&mut self, items: Vec<I>) {
        self.dispatch(MultipleSelectionAction::FunctionSetSelectedItems(items));
    }

    /// Set the active index.
    pub fn set_active_index(&mut self, index: Option<usize>) {
        self.dispatch(MultipleSelectionAction::FunctionSetActiveIndex(index));
    }

    /// Return every key to its default value.
    pub fn reset(&mut self) {
        self.dispatch(MultipleSelectionAction::FunctionReset);
    }
}

impl<I: Item> fmt::Debug for MultipleSelection<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipleSelection")
            .field("machine", &self.machine)
            .field("effects", &self.effects)
            .field("last_commit", &self.last_commit)
            .field("key_navigation_previous", &self.key_navigation_previous)
            .field("key_navigation_next", &self.key_navigation_next)
            .finish_non_exhaustive()
    }
}
