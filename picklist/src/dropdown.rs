// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State, props, and transitions shared by [`Select`](crate::Select) and
//! [`Combobox`](crate::Combobox).

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use picklist_core::status::{results_message, selection_message};
use picklist_core::{
    Action, ActionAndChanges, Control, ControlledState, Environment, Headless, IdOverrides,
    KeyChange, Machine, NodeRef, RefSlot, Seeds, StateChange, StateKeys,
};
use picklist_nav::{highlighted_index, non_disabled_index};

use crate::collection::{Collection, Item};
use crate::effects::{Effects, ScrollIntoView};

/// Page size of PageUp/PageDown.
pub(crate) const PAGE_SIZE: isize = 10;

/// State of a dropdown widget.
#[derive(Clone, Debug, PartialEq)]
pub struct DropdownState<I> {
    /// Whether the menu is open.
    pub is_open: bool,
    /// Highlighted item index.
    pub highlighted_index: Option<usize>,
    /// Selected item.
    pub selected_item: Option<I>,
    /// Text of the input (combobox) or typeahead buffer (select).
    pub input_value: String,
}

impl<I> Default for DropdownState<I> {
    fn default() -> Self {
        Self {
            is_open: false,
            highlighted_index: None,
            selected_item: None,
            input_value: String::new(),
        }
    }
}

/// Partial [`DropdownState`]. `None` fields are absent.
#[derive(Clone, Debug, PartialEq)]
pub struct DropdownChanges<I> {
    /// Whether the menu is open.
    pub is_open: Option<bool>,
    /// Highlighted item index.
    pub highlighted_index: Option<Option<usize>>,
    /// Selected item.
    pub selected_item: Option<Option<I>>,
    /// Input text.
    pub input_value: Option<String>,
}

impl<I> Default for DropdownChanges<I> {
    fn default() -> Self {
        Self {
            is_open: None,
            highlighted_index: None,
            selected_item: None,
            input_value: None,
        }
    }
}

impl<I> DropdownChanges<I> {
    /// No keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With `is_open`.
    #[must_use]
    pub fn is_open(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }

    /// With `highlighted_index`.
    #[must_use]
    pub fn highlighted_index(mut self, index: Option<usize>) -> Self {
        self.highlighted_index = Some(index);
        self
    }

    /// With `selected_item`.
    #[must_use]
    pub fn selected_item(mut self, item: Option<I>) -> Self {
        self.selected_item = Some(item);
        self
    }

    /// With `input_value`.
    #[must_use]
    pub fn input_value(mut self, value: impl Into<String>) -> Self {
        self.input_value = Some(value.into());
        self
    }
}

impl<I: Item> ControlledState for DropdownState<I> {
    type Changes = DropdownChanges<I>;

    fn apply(&mut self, changes: &DropdownChanges<I>) {
        if let Some(is_open) = changes.is_open {
            self.is_open = is_open;
        }
        if let Some(index) = changes.highlighted_index {
            self.highlighted_index = index;
        }
        if let Some(item) = &changes.selected_item {
            self.selected_item.clone_from(item);
        }
        if let Some(value) = &changes.input_value {
            self.input_value.clone_from(value);
        }
    }

    fn changed_keys(&self, other: &Self) -> StateKeys {
        let mut keys = StateKeys::empty();
        keys.set(StateKeys::IS_OPEN, self.is_open != other.is_open);
        keys.set(
            StateKeys::HIGHLIGHTED_INDEX,
            self.highlighted_index != other.highlighted_index,
        );
        keys.set(
            StateKeys::SELECTED_ITEM,
            self.selected_item != other.selected_item,
        );
        keys.set(StateKeys::INPUT_VALUE, self.input_value != other.input_value);
        keys
    }

    fn extract(&self, keys: StateKeys) -> DropdownChanges<I> {
        DropdownChanges {
            is_open: keys.contains(StateKeys::IS_OPEN).then_some(self.is_open),
            highlighted_index: keys
                .contains(StateKeys::HIGHLIGHTED_INDEX)
                .then_some(self.highlighted_index),
            selected_item: keys
                .contains(StateKeys::SELECTED_ITEM)
                .then(|| self.selected_item.clone()),
            input_value: keys
                .contains(StateKeys::INPUT_VALUE)
                .then(|| self.input_value.clone()),
        }
    }

    fn keys_of(changes: &DropdownChanges<I>) -> StateKeys {
        let mut keys = StateKeys::empty();
        keys.set(StateKeys::IS_OPEN, changes.is_open.is_some());
        keys.set(
            StateKeys::HIGHLIGHTED_INDEX,
            changes.highlighted_index.is_some(),
        );
        keys.set(StateKeys::SELECTED_ITEM, changes.selected_item.is_some());
        keys.set(StateKeys::INPUT_VALUE, changes.input_value.is_some());
        keys
    }
}

/// What a status message function sees after a commit.
pub struct DropdownStatus<'a, I> {
    /// State being committed.
    pub state: &'a DropdownState<I>,
    /// State of the previous commit.
    pub previous: &'a DropdownState<I>,
    /// Number of results now.
    pub result_count: usize,
    /// Number of results announced while the menu was last open; `0` after it closed.
    pub previous_result_count: usize,
    /// Item display text.
    pub item_to_string: &'a dyn Fn(&I) -> String,
}

impl<I: fmt::Debug> fmt::Debug for DropdownStatus<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownStatus")
            .field("state", &self.state)
            .field("previous", &self.previous)
            .field("result_count", &self.result_count)
            .field("previous_result_count", &self.previous_result_count)
            .finish_non_exhaustive()
    }
}

/// Status message function.
pub type DropdownStatusMessage<I> = Box<dyn Fn(&DropdownStatus<'_, I>) -> String>;

/// Default dropdown status: the selected item after a selection, otherwise the result
/// count of an open menu.
pub fn default_status_message<I: PartialEq>(status: &DropdownStatus<'_, I>) -> String {
    if status.state.selected_item != status.previous.selected_item {
        if let Some(item) = &status.state.selected_item {
            return selection_message(&(status.item_to_string)(item));
        }
    }
    results_message(
        status.state.is_open,
        status.result_count,
        status.previous_result_count,
    )
}

/// Options of a dropdown widget.
///
/// Built with chained setters; every option has a default. `A` is the widget's action
/// type, which fixes the state change type seen by reducers and listeners.
pub struct DropdownProps<I: Item, A: Action> {
    pub(crate) collection: Collection<I>,
    pub(crate) circular: Option<bool>,
    pub(crate) seeds: Seeds<DropdownState<I>>,
    pub(crate) control: Control<DropdownState<I>, A>,
    pub(crate) environment: Box<dyn Environment>,
    pub(crate) ids: IdOverrides,
    pub(crate) scroll_into_view: Option<ScrollIntoView>,
    pub(crate) status_message: Option<DropdownStatusMessage<I>>,
}

impl<I: Item, A: Action> DropdownProps<I, A> {
    /// Props over `items`, with a headless environment.
    pub fn new(items: Vec<I>) -> Self {
        Self {
            collection: Collection::new(items),
            circular: None,
            seeds: Seeds::default(),
            control: Control::new(),
            environment: Box::new(Headless::new()),
            ids: IdOverrides::default(),
            scroll_into_view: None,
            status_message: None,
        }
    }

    /// Logical item count, for virtualized menus.
    #[must_use]
    pub fn item_count(mut self, count: usize) -> Self {
        self.collection.set_item_count(Some(count));
        self
    }

    /// Item display text, used for typeahead, the input value, and status messages.
    #[must_use]
    pub fn item_to_string(mut self, f: impl Fn(&I) -> String + 'static) -> Self {
        self.collection.set_item_to_string(f);
        self
    }

    /// Item identity key. Without one, items are compared by value.
    #[must_use]
    pub fn item_to_key(mut self, f: impl Fn(&I) -> String + 'static) -> Self {
        self.collection.set_item_to_key(f);
        self
    }

    /// Disabled predicate.
    #[must_use]
    pub fn is_item_disabled(mut self, f: impl Fn(&I, usize) -> bool + 'static) -> Self {
        self.collection.set_is_item_disabled(f);
        self
    }

    /// Whether arrow navigation wraps around.
    #[must_use]
    pub fn circular(mut self, circular: bool) -> Self {
        self.circular = Some(circular);
        self
    }

    /// Controlled values.
    #[must_use]
    pub fn controlled(mut self, controlled: DropdownChanges<I>) -> Self {
        self.control.controlled = controlled;
        self
    }

    /// Initial values.
    #[must_use]
    pub fn initial(mut self, initial: DropdownChanges<I>) -> Self {
        self.seeds.initial = initial;
        self
    }

    /// Default values.
    #[must_use]
    pub fn defaults(mut self, defaults: DropdownChanges<I>) -> Self {
        self.seeds.default = defaults;
        self
    }

    /// State reducer.
    #[must_use]
    pub fn state_reducer(
        mut self,
        f: impl Fn(
            &DropdownState<I>,
            ActionAndChanges<'_, DropdownState<I>, A>,
        ) -> DropdownChanges<I>
        + 'static,
    ) -> Self {
        self.control.set_state_reducer(f);
        self
    }

    /// Listener for `is_open` changes.
    #[must_use]
    pub fn on_is_open_change(
        self,
        f: impl FnMut(&KeyChange<'_, DropdownState<I>, A::Kind>) + 'static,
    ) -> Self {
        self.on_change(StateKeys::IS_OPEN, f)
    }

    /// Listener for `highlighted_index` changes.
    #[must_use]
    pub fn on_highlighted_index_change(
        self,
        f: impl FnMut(&KeyChange<'_, DropdownState<I>, A::Kind>) + 'static,
    ) -> Self {
        self.on_change(StateKeys::HIGHLIGHTED_INDEX, f)
    }

    /// Listener for `selected_item` changes.
    #[must_use]
    pub fn on_selected_item_change(
        self,
        f: impl FnMut(&KeyChange<'_, DropdownState<I>, A::Kind>) + 'static,
    ) -> Self {
        self.on_change(StateKeys::SELECTED_ITEM, f)
    }

    /// Listener for `input_value` changes.
    #[must_use]
    pub fn on_input_value_change(
        self,
        f: impl FnMut(&KeyChange<'_, DropdownState<I>, A::Kind>) + 'static,
    ) -> Self {
        self.on_change(StateKeys::INPUT_VALUE, f)
    }

    fn on_change(
        mut self,
        key: StateKeys,
        f: impl FnMut(&KeyChange<'_, DropdownState<I>, A::Kind>) + 'static,
    ) -> Self {
        self.control.on_change(key, f);
        self
    }

    /// Listener called once per transition with all changed keys.
    #[must_use]
    pub fn on_state_change(
        mut self,
        f: impl FnMut(&StateChange<DropdownState<I>, A::Kind>) + 'static,
    ) -> Self {
        self.control.on_state_change(f);
        self
    }

    /// Status message function replacing [`default_status_message`].
    #[must_use]
    pub fn a11y_status_message(
        mut self,
        f: impl Fn(&DropdownStatus<'_, I>) -> String + 'static,
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

    /// Base id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.ids.id = Some(id.into());
        self
    }

    /// Custom scroll-into-view, given the item node and the menu node.
    #[must_use]
    pub fn scroll_into_view(mut self, f: impl FnMut(NodeRef, NodeRef) + 'static) -> Self {
        self.scroll_into_view = Some(Box::new(f));
        self
    }
}

impl<I: Item, A: Action> fmt::Debug for DropdownProps<I, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownProps")
            .field("collection", &self.collection)
            .field("circular", &self.circular)
            .field("seeds", &self.seeds)
            .field("control", &self.control)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

/// Transitions shared by both dropdown widgets.
#[derive(Debug)]
pub(crate) enum Common<'a> {
    ItemMouseMove { index: usize, disabled: bool },
    MenuMouseLeave,
    ToggleMenu,
    OpenMenu,
    CloseMenu,
    SetHighlightedIndex(Option<usize>),
    SetInputValue(&'a str),
    Reset,
}

pub(crate) fn reduce_common<I: Item>(
    state: &DropdownState<I>,
    common: Common<'_>,
    collection: &Collection<I>,
    seeds: &Seeds<DropdownState<I>>,
) -> DropdownChanges<I> {
    match common {
        Common::ItemMouseMove { index, disabled } => {
            DropdownChanges::new().highlighted_index((!disabled).then_some(index))
        }
        Common::MenuMouseLeave => DropdownChanges::new().highlighted_index(None),
        Common::ToggleMenu => DropdownChanges::new()
            .is_open(!state.is_open)
            .highlighted_index(if state.is_open {
                None
            } else {
                highlighted_index_on_open(state, collection, seeds, 0)
            }),
        Common::OpenMenu => DropdownChanges::new()
            .is_open(true)
            .highlighted_index(highlighted_index_on_open(state, collection, seeds, 0)),
        Common::CloseMenu => DropdownChanges::new().is_open(false),
        Common::SetHighlightedIndex(index) => DropdownChanges::new().highlighted_index(
            index.filter(|&i| i < collection.len() && !collection.is_disabled(i)),
        ),
        Common::SetInputValue(value) => DropdownChanges::new().input_value(value),
        Common::Reset => seeds.default_state().extract(StateKeys::all()),
    }
}

/// Clear an internal highlight that points past the end of `collection`, after the
/// host replaced the items or the item count. A controlled highlight is left alone.
pub(crate) fn drop_dangling_highlight<I: Item, A: Action>(
    machine: &mut Machine<DropdownState<I>, A>,
    collection: &Collection<I>,
) {
    let len = collection.len();
    machine.repair(|state| {
        if state.highlighted_index.is_some_and(|index| index >= len) {
            state.highlighted_index = None;
        }
    });
}

/// Index to highlight when the menu opens.
///
/// In order: the initial highlighted index while the state still holds it, the default
/// highlighted index, the selected item, then the last item for a backward open or
/// the first item for a forward open. Disabled candidates are skipped.
pub(crate) fn highlighted_index_on_open<I: Item>(
    state: &DropdownState<I>,
    collection: &Collection<I>,
    seeds: &Seeds<DropdownState<I>>,
    offset: isize,
) -> Option<usize> {
    let count = collection.len();
    if count == 0 {
        return None;
    }
    if let Some(Some(initial)) = seeds.initial.highlighted_index {
        if state.highlighted_index == Some(initial) && !collection.is_disabled(initial) {
            return Some(initial);
        }
    }
    if let Some(Some(default)) = seeds.default.highlighted_index {
        if !collection.is_disabled(default) {
            return Some(default);
        }
    }
    if let Some(selected) = &state.selected_item {
        return collection.index_of(selected);
    }
    if offset < 0 && !collection.is_disabled(count - 1) {
        Some(count - 1)
    } else if offset > 0 && !collection.is_disabled(0) {
        Some(0)
    } else {
        None
    }
}

/// Move the highlight by `offset` over the collection.
pub(crate) fn move_highlight<I: Item>(
    state: &DropdownState<I>,
    collection: &Collection<I>,
    offset: isize,
    circular: bool,
) -> Option<usize> {
    highlighted_index(
        state.highlighted_index,
        offset,
        collection.len(),
        |i| collection.is_disabled(i),
        circular,
    )
}

/// First (`backwards == false`) or last enabled index.
pub(crate) fn edge_highlight<I: Item>(
    collection: &Collection<I>,
    backwards: bool,
) -> Option<usize> {
    let count = collection.len();
    let start = if backwards { count.saturating_sub(1) } else { 0 };
    non_disabled_index(start, backwards, count, |i| collection.is_disabled(i), false)
}

/// Select the highlighted item, or just close when nothing is highlighted.
pub(crate) fn changes_on_selection<I: Item>(
    collection: &Collection<I>,
    seeds: &Seeds<DropdownState<I>>,
    highlighted: Option<usize>,
    with_input_value: bool,
) -> DropdownChanges<I> {
    match highlighted.and_then(|index| collection.get(index)) {
        Some(item) => {
            let defaults = seeds.default_state();
            let mut changes = DropdownChanges::new()
                .is_open(defaults.is_open)
                .highlighted_index(defaults.highlighted_index)
                .selected_item(Some(item.clone()));
            if with_input_value {
                changes.input_value = Some(collection.text_of(item));
            }
            changes
        }
        None => DropdownChanges::new().is_open(false).highlighted_index(None),
    }
}

/// Commit bookkeeping shared by both dropdown widgets.
#[derive(Debug)]
pub(crate) struct DropdownCommit<I> {
    committed: DropdownState<I>,
    announced_count: usize,
    scroll_on_commit: bool,
}

impl<I: Item> DropdownCommit<I> {
    pub(crate) fn new(state: DropdownState<I>) -> Self {
        Self {
            committed: state,
            announced_count: 0,
            scroll_on_commit: false,
        }
    }

    /// Whether the next commit should scroll the highlight into view.
    pub(crate) fn request_scroll(&mut self, scroll: bool) {
        self.scroll_on_commit = scroll;
    }

    /// Run scroll and status effects for `state`.
    pub(crate) fn run(
        &mut self,
        state: DropdownState<I>,
        effects: &mut Effects,
        collection: &Collection<I>,
        status_message: Option<&DropdownStatusMessage<I>>,
    ) {
        let previous = core::mem::replace(&mut self.committed, state);
        let state = &self.committed;

        let highlight_moved = state.highlighted_index != previous.highlighted_index;
        if core::mem::take(&mut self.scroll_on_commit) && state.is_open && highlight_moved {
            if let Some(index) = state.highlighted_index {
                effects.scroll_into_view(RefSlot::Item(index), RefSlot::Menu);
            }
        }

        let result_count = collection.len();
        let previous_result_count = self.announced_count;
        if state.is_open != previous.is_open
            || state.selected_item != previous.selected_item
            || (state.is_open && result_count != previous_result_count)
        {
            let status = DropdownStatus {
                state,
                previous: &previous,
                result_count,
                previous_result_count,
                item_to_string: collection.item_to_string(),
            };
            let message = match status_message {
                Some(f) => f(&status),
                None => default_status_message(&status),
            };
            effects.announce(message);
        }
        self.announced_count = if state.is_open { result_count } else { 0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn fruits() -> Collection<&'static str> {
        let mut items = Collection::new(vec!["apple", "banana", "cherry", "date"]);
        items.set_item_to_string(|s| String::from(*s));
        items
    }

    #[test]
    fn open_prefers_initial_then_default_then_selected() {
        let items = fruits();
        let mut seeds = Seeds::<DropdownState<&str>>::default();
        let mut state = DropdownState::default();
        assert_eq!(highlighted_index_on_open(&state, &items, &seeds, 1), Some(0));
        assert_eq!(highlighted_index_on_open(&state, &items, &seeds, -1), Some(3));
        assert_eq!(highlighted_index_on_open(&state, &items, &seeds, 0), None);

        state.selected_item = Some("cherry");
        assert_eq!(highlighted_index_on_open(&state, &items, &seeds, 1), Some(2));

        seeds.default.highlighted_index = Some(Some(1));
        assert_eq!(highlighted_index_on_open(&state, &items, &seeds, 1), Some(1));

        seeds.initial.highlighted_index = Some(Some(3));
        state.highlighted_index = Some(3);
        assert_eq!(highlighted_index_on_open(&state, &items, &seeds, 1), Some(3));
        // The initial index only applies while the state still holds it.
        state.highlighted_index = None;
        assert_eq!(highlighted_index_on_open(&state, &items, &seeds, 1), Some(1));
    }

    #[test]
    fn open_skips_disabled_edges() {
        let mut items = fruits();
        items.set_is_item_disabled(|_, index| index == 0);
        let seeds = Seeds::default();
        let state = DropdownState::default();
        assert_eq!(highlighted_index_on_open(&state, &items, &seeds, 1), None);
        assert_eq!(highlighted_index_on_open(&state, &items, &seeds, -1), Some(3));
    }

    #[test]
    fn selection_returns_to_defaults() {
        let items = fruits();
        let seeds = Seeds {
            initial: DropdownChanges::new(),
            default: DropdownChanges::new().is_open(true).highlighted_index(Some(0)),
        };
        let changes = changes_on_selection(&items, &seeds, Some(1), true);
        assert_eq!(
            changes,
            DropdownChanges::new()
                .is_open(true)
                .highlighted_index(Some(0))
                .selected_item(Some("banana"))
                .input_value("banana")
        );

        let nothing = changes_on_selection(&items, &seeds, None, true);
        assert_eq!(
            nothing,
            DropdownChanges::new().is_open(false).highlighted_index(None)
        );
    }

    #[test]
    fn set_highlighted_index_rejects_disabled_and_out_of_range() {
        let mut items = fruits();
        items.set_is_item_disabled(|item, _| *item == "banana");
        let seeds = Seeds::default();
        let state = DropdownState::default();
        let changes = reduce_common(&state, Common::SetHighlightedIndex(Some(1)), &items, &seeds);
        assert_eq!(changes.highlighted_index, Some(None));
        let changes = reduce_common(&state, Common::SetHighlightedIndex(Some(2)), &items, &seeds);
        assert_eq!(changes.highlighted_index, Some(Some(2)));
        let changes = reduce_common(&state, Common::SetHighlightedIndex(Some(4)), &items, &seeds);
        assert_eq!(changes.highlighted_index, Some(None));
    }

    #[test]
    fn page_keys_move_a_page_at_a_time() {
        let items = Collection::new((0..25).collect::<Vec<u32>>());
        let state = DropdownState {
            is_open: true,
            highlighted_index: Some(3),
            ..DropdownState::default()
        };
        assert_eq!(move_highlight(&state, &items, PAGE_SIZE, false), Some(13));
        let state = DropdownState {
            highlighted_index: Some(13),
            ..state
        };
        assert_eq!(move_highlight(&state, &items, -PAGE_SIZE, false), Some(3));
    }

    #[test]
    fn default_status_messages() {
        let closed = DropdownState::<&str>::default();
        let open = DropdownState {
            is_open: true,
            ..DropdownState::default()
        };
        let to_string = |s: &&str| String::from(*s);
        let status = DropdownStatus {
            state: &open,
            previous: &closed,
            result_count: 2,
            previous_result_count: 0,
            item_to_string: &to_string,
        };
        assert_eq!(
            default_status_message(&status),
            "2 results are available, use up and down arrow keys to navigate. Press Enter key to select."
        );

        let selected = DropdownState {
            selected_item: Some("date"),
            ..DropdownState::default()
        };
        let status = DropdownStatus {
            state: &selected,
            previous: &open,
            result_count: 2,
            previous_result_count: 2,
            item_to_string: &to_string,
        };
        assert_eq!(default_status_message(&status), "date has been selected.");
    }
}
