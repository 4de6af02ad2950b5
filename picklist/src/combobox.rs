// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead combobox: a text input filtering a listbox menu.
//!
//! The caller owns filtering: it reads `input_value` from the state and passes the
//! matching items back with [`Combobox::set_items`]. Navigation wraps by default.

use alloc::string::String;
use alloc::vec::Vec;

use picklist_core::props::{ElementProps, EngineProps};
use picklist_core::{
    Action, Control, ElementIds, Error, EventKind, IdGenerator, Key, Machine, NodeRef, Outcome,
    PointerKind, PointerRelease, RefBinding, RefSlot, Seeds, StateChangeType, UiEvent,
    UserProps, compose, run_chain,
};

use crate::collection::{Collection, Item, resolve_index};
use crate::dropdown::{
    Common, DropdownChanges, DropdownCommit, DropdownProps, DropdownState,
    DropdownStatusMessage, PAGE_SIZE, changes_on_selection, drop_dangling_highlight,
    edge_highlight, highlighted_index_on_open, move_highlight, reduce_common,
};
use crate::effects::Effects;
use crate::select::active_descendant;

const LABEL: &str = "get_label_props";
const TOGGLE_BUTTON: &str = "get_toggle_button_props";
const INPUT: &str = "get_input_props";
const MENU: &str = "get_menu_props";
const ITEM: &str = "get_item_props";

const BOUNDARY: &[RefSlot] = &[RefSlot::Input, RefSlot::ToggleButton, RefSlot::Menu];

/// Transitions of a [`Combobox`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[expect(missing_docs, reason = "names match the transition symbols")]
pub enum ComboboxChangeType {
    InputKeyDownArrowDown,
    InputKeyDownArrowUp,
    InputKeyDownEscape,
    InputKeyDownHome,
    InputKeyDownEnd,
    InputKeyDownPageUp,
    InputKeyDownPageDown,
    InputKeyDownEnter,
    InputChange,
    InputBlur,
    InputClick,
    MenuMouseLeave,
    ItemMouseMove,
    ItemClick,
    ToggleButtonClick,
    FunctionToggleMenu,
    FunctionOpenMenu,
    FunctionCloseMenu,
    FunctionSetHighlightedIndex,
    FunctionSelectItem,
    FunctionSetInputValue,
    FunctionReset,
    ControlledPropUpdatedSelectedItem,
}

impl StateChangeType for ComboboxChangeType {
    const ALL: &'static [Self] = &[
        Self::InputKeyDownArrowDown,
        Self::InputKeyDownArrowUp,
        Self::InputKeyDownEscape,
        Self::InputKeyDownHome,
        Self::InputKeyDownEnd,
        Self::InputKeyDownPageUp,
        Self::InputKeyDownPageDown,
        Self::InputKeyDownEnter,
        Self::InputChange,
        Self::InputBlur,
        Self::InputClick,
        Self::MenuMouseLeave,
        Self::ItemMouseMove,
        Self::ItemClick,
        Self::ToggleButtonClick,
        Self::FunctionToggleMenu,
        Self::FunctionOpenMenu,
        Self::FunctionCloseMenu,
        Self::FunctionSetHighlightedIndex,
        Self::FunctionSelectItem,
        Self::FunctionSetInputValue,
        Self::FunctionReset,
        Self::ControlledPropUpdatedSelectedItem,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::InputKeyDownArrowDown => "__input_keydown_arrow_down__",
            Self::InputKeyDownArrowUp => "__input_keydown_arrow_up__",
            Self::InputKeyDownEscape => "__input_keydown_escape__",
            Self::InputKeyDownHome => "__input_keydown_home__",
            Self::InputKeyDownEnd => "__input_keydown_end__",
            Self::InputKeyDownPageUp => "__input_keydown_page_up__",
            Self::InputKeyDownPageDown => "__input_keydown_page_down__",
            Self::InputKeyDownEnter => "__input_keydown_enter__",
            Self::InputChange => "__input_change__",
            Self::InputBlur => "__input_blur__",
            Self::InputClick => "__input_click__",
            Self::MenuMouseLeave => "__menu_mouse_leave__",
            Self::ItemMouseMove => "__item_mouse_move__",
            Self::ItemClick => "__item_click__",
            Self::ToggleButtonClick => "__togglebutton_click__",
            Self::FunctionToggleMenu => "__function_toggle_menu__",
            Self::FunctionOpenMenu => "__function_open_menu__",
            Self::FunctionCloseMenu => "__function_close_menu__",
            Self::FunctionSetHighlightedIndex => "__function_set_highlighted_index__",
            Self::FunctionSelectItem => "__function_select_item__",
            Self::FunctionSetInputValue => "__function_set_input_value__",
            Self::FunctionReset => "__function_reset__",
            Self::ControlledPropUpdatedSelectedItem => "__controlled_prop_updated_selected_item__",
        }
    }
}

/// Actions of a [`Combobox`].
#[derive(Clone, Debug, PartialEq)]
pub enum ComboboxAction<I> {
    /// ArrowDown in the input.
    InputKeyDownArrowDown {
        /// Alt held.
        alt_key: bool,
    },
    /// ArrowUp in the input.
    InputKeyDownArrowUp {
        /// Alt held.
        alt_key: bool,
    },
    /// Escape in the input.
    InputKeyDownEscape,
    /// Home in the open input.
    InputKeyDownHome,
    /// End in the open input.
    InputKeyDownEnd,
    /// PageUp in the open input.
    InputKeyDownPageUp,
    /// PageDown in the open input.
    InputKeyDownPageDown,
    /// Enter on a highlighted item.
    InputKeyDownEnter,
    /// The input text changed.
    InputChange(String),
    /// The input lost focus, or a press ended outside the widget.
    InputBlur {
        /// Whether the highlighted item is selected.
        select_item: bool,
    },
    /// Input clicked.
    InputClick,
    /// Pointer left the menu.
    MenuMouseLeave,
    /// Pointer moved over an item.
    ItemMouseMove {
        /// Item index.
        index: usize,
        /// Whether the item is disabled.
        disabled: bool,
    },
    /// Item clicked.
    ItemClick(usize),
    /// Toggle button clicked.
    ToggleButtonClick,
    /// [`Combobox::toggle_menu`].
    FunctionToggleMenu,
    /// [`Combobox::open_menu`].
    FunctionOpenMenu,
    /// [`Combobox::close_menu`].
    FunctionCloseMenu,
    /// [`Combobox::set_highlighted_index`].
    FunctionSetHighlightedIndex(Option<usize>),
    /// [`Combobox::select_item`].
    FunctionSelectItem(Option<I>),
    /// [`Combobox::set_input_value`].
    FunctionSetInputValue(String),
    /// [`Combobox::reset`].
    FunctionReset,
    /// The controlled selected item changed between commits; carries the text of
    /// the new item.
    ControlledPropUpdatedSelectedItem(String),
}

impl<I: Item> Action for ComboboxAction<I> {
    type Kind = ComboboxChangeType;

    fn kind(&self) -> ComboboxChangeType {
        use ComboboxChangeType as K;
        match self {
            Self::InputKeyDownArrowDown { .. } => K::InputKeyDownArrowDown,
            Self::InputKeyDownArrowUp { .. } => K::InputKeyDownArrowUp,
            Self::InputKeyDownEscape => K::InputKeyDownEscape,
            Self::InputKeyDownHome => K::InputKeyDownHome,
            Self::InputKeyDownEnd => K::InputKeyDownEnd,
            Self::InputKeyDownPageUp => K::InputKeyDownPageUp,
            Self::InputKeyDownPageDown => K::InputKeyDownPageDown,
            Self::InputKeyDownEnter => K::InputKeyDownEnter,
            Self::InputChange(_) => K::InputChange,
            Self::InputBlur { .. } => K::InputBlur,
            Self::InputClick => K::InputClick,
            Self::MenuMouseLeave => K::MenuMouseLeave,
            Self::ItemMouseMove { .. } => K::ItemMouseMove,
            Self::ItemClick(_) => K::ItemClick,
            Self::ToggleButtonClick => K::ToggleButtonClick,
            Self::FunctionToggleMenu => K::FunctionToggleMenu,
            Self::FunctionOpenMenu => K::FunctionOpenMenu,
            Self::FunctionCloseMenu => K::FunctionCloseMenu,
            Self::FunctionSetHighlightedIndex(_) => K::FunctionSetHighlightedIndex,
            Self::FunctionSelectItem(_) => K::FunctionSelectItem,
            Self::FunctionSetInputValue(_) => K::FunctionSetInputValue,
            Self::FunctionReset => K::FunctionReset,
            Self::ControlledPropUpdatedSelectedItem(_) => K::ControlledPropUpdatedSelectedItem,
        }
    }
}

/// Options of a [`Combobox`]. Navigation is circular unless disabled.
pub type ComboboxProps<I> = DropdownProps<I, ComboboxAction<I>>;

/// Engine handlers carried by [`Combobox`] prop bags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[expect(missing_docs, reason = "one handler per engine listener")]
pub enum ComboboxHandler {
    ToggleButtonClick,
    InputChange,
    InputKeyDown,
    InputBlur,
    InputClick,
    MenuMouseLeave,
    ItemMouseMove(usize),
    ItemClick(usize),
}

fn reduce<I: Item>(
    state: &DropdownState<I>,
    action: &ComboboxAction<I>,
    collection: &Collection<I>,
    seeds: &Seeds<DropdownState<I>>,
    circular: bool,
) -> DropdownChanges<I> {
    use ComboboxAction as A;
    let common = |common| reduce_common(state, common, collection, seeds);
    let open_with = |index| DropdownChanges::new().is_open(true).highlighted_index(index);
    match action {
        A::InputKeyDownArrowDown { alt_key } => open_with(if state.is_open {
            move_highlight(state, collection, 1, circular)
        } else if *alt_key && state.selected_item.is_none() {
            None
        } else {
            highlighted_index_on_open(state, collection, seeds, 1)
        }),
        A::InputKeyDownArrowUp { alt_key } => {
            if state.is_open && *alt_key {
                changes_on_selection(collection, seeds, state.highlighted_index, true)
            } else if state.is_open {
                open_with(move_highlight(state, collection, -1, circular))
            } else if *alt_key {
                open_with(None)
            } else {
                open_with(highlighted_index_on_open(state, collection, seeds, -1))
            }
        }
        A::InputKeyDownHome => {
            DropdownChanges::new().highlighted_index(edge_highlight(collection, false))
        }
        A::InputKeyDownEnd => {
            DropdownChanges::new().highlighted_index(edge_highlight(collection, true))
        }
        A::InputKeyDownPageUp => DropdownChanges::new()
            .highlighted_index(move_highlight(state, collection, -PAGE_SIZE, false)),
        A::InputKeyDownPageDown => DropdownChanges::new()
            .highlighted_index(move_highlight(state, collection, PAGE_SIZE, false)),
        A::InputKeyDownEnter => {
            changes_on_selection(collection, seeds, state.highlighted_index, true)
        }
        A::InputKeyDownEscape => {
            let changes = DropdownChanges::new().is_open(false).highlighted_index(None);
            if state.is_open {
                changes
            } else {
                changes.selected_item(None).input_value("")
            }
        }
        A::InputChange(value) => DropdownChanges::new()
            .is_open(true)
            .highlighted_index(seeds.default_state().highlighted_index)
            .input_value(value.as_str()),
        A::InputBlur { select_item } => {
            let changes = DropdownChanges::new().is_open(false).highlighted_index(None);
            match state.highlighted_index.and_then(|i| collection.get(i)) {
                Some(item) if *select_item && state.is_open => changes
                    .selected_item(Some(item.clone()))
                    .input_value(collection.text_of(item)),
                _ => changes,
            }
        }
        A::InputClick | A::ToggleButtonClick | A::FunctionToggleMenu => {
            common(Common::ToggleMenu)
        }
        A::ItemClick(index) => {
            changes_on_selection(collection, seeds, Some(*index), true)
        }
        A::FunctionSelectItem(item) => DropdownChanges::new()
            .input_value(item.as_ref().map(|item| collection.text_of(item)).unwrap_or_default())
            .selected_item(item.clone()),
        A::ControlledPropUpdatedSelectedItem(text) => {
            DropdownChanges::new().input_value(text.as_str())
        }
        A::MenuMouseLeave => common(Common::MenuMouseLeave),
        A::ItemMouseMove { index, disabled } => common(Common::ItemMouseMove {
            index: *index,
            disabled: *disabled,
        }),
        A::FunctionOpenMenu => common(Common::OpenMenu),
        A::FunctionCloseMenu => common(Common::CloseMenu),
        A::FunctionSetHighlightedIndex(index) => common(Common::SetHighlightedIndex(*index)),
        A::FunctionSetInputValue(value) => common(Common::SetInputValue(value)),
        A::FunctionReset => common(Common::Reset),
    }
}

/// A typeahead combobox.
///
/// Used like [`Select`](crate::Select): render from [`Combobox::state`], attach nodes,
/// route events through [`Combobox::fire`], then [`Combobox::commit`].
pub struct Combobox<I: Item> {
    machine: Machine<DropdownState<I>, ComboboxAction<I>>,
    collection: Collection<I>,
    circular: bool,
    effects: Effects,
    last_commit: DropdownCommit<I>,
    status_message: Option<DropdownStatusMessage<I>>,
    controlled_selection: Option<Option<I>>,
}

impl<I: Item> Combobox<I> {
    /// Create a combobox, taking an id from `generator` unless one was supplied.
    ///
    /// Without an initial, default, or controlled input value, the input starts with
    /// the text of the selected item.
    pub fn new(props: ComboboxProps<I>, generator: &mut IdGenerator) -> Self {
        let DropdownProps {
            collection,
            circular,
            seeds,
            control,
            environment,
            ids,
            scroll_into_view,
            status_message,
        } = props;
        let seeds_input = seeds.initial.input_value.is_some()
            || seeds.default.input_value.is_some()
            || control.controlled.input_value.is_some();
        let controlled_selection = control.controlled.selected_item.clone();
        let machine = Machine::new_with(seeds, control, |state| {
            if !seeds_input {
                if let Some(item) = &state.selected_item {
                    state.input_value = collection.text_of(item);
                }
            }
        });
        let effects = Effects::new(
            environment,
            ElementIds::new(generator, ids),
            scroll_into_view,
        );
        tracing::debug!(id = %effects.ids().id, "combobox created");
        Self {
            last_commit: DropdownCommit::new(machine.state()),
            machine,
            collection,
            circular: circular.unwrap_or(true),
            effects,
            status_message,
            controlled_selection,
        }
    }

    /// Resolved state.
    pub fn state(&self) -> DropdownState<I> {
        self.machine.state()
    }

    /// Element ids.
    pub fn ids(&self) -> &ElementIds {
        self.effects.ids()
    }

    /// Realized items.
    pub fn items(&self) -> &[I] {
        self.collection.items()
    }

    /// Replace the items, typically after filtering on `input_value`.
    ///
    /// A highlight past the new end is cleared.
    pub fn set_items(&mut self, items: Vec<I>) {
        self.collection.set_items(items);
        drop_dangling_highlight(&mut self.machine, &self.collection);
    }

    /// Replace the logical item count on re-render.
    pub fn set_item_count(&mut self, count: Option<usize>) {
        self.collection.set_item_count(count);
        drop_dangling_highlight(&mut self.machine, &self.collection);
    }

    /// Controlled values, state reducer, and listeners.
    pub fn control_mut(&mut self) -> &mut Control<DropdownState<I>, ComboboxAction<I>> {
        self.machine.control_mut()
    }

    fn dispatch(&mut self, action: ComboboxAction<I>) {
        let scroll = !matches!(
            action,
            ComboboxAction::ItemMouseMove { .. } | ComboboxAction::MenuMouseLeave
        );
        let collection = &self.collection;
        let circular = self.circular;
        self.machine.dispatch(action, |state, action, seeds| {
            reduce(state, action, collection, seeds, circular)
        });
        self.last_commit.request_scroll(scroll);
    }

    fn register(
        &mut self,
        getter: &'static str,
        engine: EngineProps<ComboboxHandler>,
        user: UserProps,
    ) -> ElementProps<ComboboxHandler> {
        let options = user.options();
        let props = compose(engine, user);
        self.effects.register(getter, &props, options);
        props
    }

    /// Props of the label element.
    pub fn get_label_props(&mut self, user: UserProps) -> ElementProps<ComboboxHandler> {
        let ids = self.effects.ids();
        let engine = EngineProps::new(LABEL)
            .attr("id", ids.label_id.clone())
            .attr("for", ids.input_id.clone());
        self.register(LABEL, engine, user)
    }

    /// Props of the text input.
    pub fn get_input_props(&mut self, user: UserProps) -> ElementProps<ComboboxHandler> {
        let state = self.machine.state();
        let ids = self.effects.ids();
        let engine = EngineProps::new(INPUT)
            .attr("id", ids.input_id.clone())
            .attr("role", "combobox")
            .attr("aria-activedescendant", active_descendant(ids, &state))
            .attr("aria-autocomplete", "list")
            .attr("aria-controls", ids.menu_id.clone())
            .attr("aria-expanded", state.is_open)
            .attr("aria-labelledby", ids.label_id.clone())
            .attr("autocomplete", "off")
            .attr("value", state.input_value)
            .attr_opt("disabled", user.is_disabled().then_some(true))
            .ref_slot(RefSlot::Input)
            .on(EventKind::Change, ComboboxHandler::InputChange)
            .on(EventKind::KeyDown, ComboboxHandler::InputKeyDown)
            .on(EventKind::Blur, ComboboxHandler::InputBlur)
            .on(EventKind::Click, ComboboxHandler::InputClick);
        self.register(INPUT, engine, user)
    }

    /// Props of the toggle button. It is skipped by tab navigation.
    pub fn get_toggle_button_props(&mut self, user: UserProps) -> ElementProps<ComboboxHandler> {
        let state = self.machine.state();
        let ids = self.effects.ids();
        let engine = EngineProps::new(TOGGLE_BUTTON)
            .attr("id", ids.toggle_button_id.clone())
            .attr("aria-controls", ids.menu_id.clone())
            .attr("aria-expanded", state.is_open)
            .attr("tabindex", -1_i64)
            .attr_opt("disabled", user.is_disabled().then_some(true))
            .ref_slot(RefSlot::ToggleButton)
            .on(EventKind::Click, ComboboxHandler::ToggleButtonClick);
        self.register(TOGGLE_BUTTON, engine, user)
    }

    /// Props of the menu.
    pub fn get_menu_props(&mut self, user: UserProps) -> ElementProps<ComboboxHandler> {
        let ids = self.effects.ids();
        let engine = EngineProps::new(MENU)
            .attr("id", ids.menu_id.clone())
            .attr("role", "listbox")
            .attr("aria-labelledby", ids.label_id.clone())
            .ref_slot(RefSlot::Menu)
            .on(EventKind::MouseLeave, ComboboxHandler::MenuMouseLeave);
        self.register(MENU, engine, user)
    }

    /// Props of an item, identified by exactly one of `item` and `index`.
    pub fn get_item_props(
        &mut self,
        item: Option<&I>,
        index: Option<usize>,
        user: UserProps,
    ) -> Result<ElementProps<ComboboxHandler>, Error> {
        let collection = &self.collection;
        let index = resolve_index(ITEM, item, index, collection.len(), |item| {
            collection.index_of(item)
        })?;
        let state = self.machine.state();
        let disabled = collection.is_disabled(index);
        let selected = match (&state.selected_item, collection.get(index)) {
            (Some(selected), Some(item)) => collection.same(selected, item),
            _ => false,
        };
        let engine = EngineProps::new(ITEM)
            .attr("id", self.effects.ids().item_id(index))
            .attr("role", "option")
            .attr("aria-selected", state.highlighted_index == Some(index))
            .attr_opt("aria-disabled", disabled.then_some(true))
            .attr_opt("data-selected", selected.then_some(true))
            .ref_slot(RefSlot::Item(index))
            .disabled(disabled)
            .on(EventKind::MouseMove, ComboboxHandler::ItemMouseMove(index))
            .on(EventKind::Click, ComboboxHandler::ItemClick(index));
        Ok(self.register(ITEM, engine, user))
    }

    /// Run the listener chain of `props` for `event`.
    pub fn fire(&mut self, props: &ElementProps<ComboboxHandler>, event: &UiEvent) -> Outcome {
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

    fn handle(&mut self, handler: ComboboxHandler, event: &UiEvent) {
        match handler {
            ComboboxHandler::ToggleButtonClick => {
                self.dispatch(ComboboxAction::ToggleButtonClick);
                if self.machine.state().is_open {
                    self.effects.focus(RefSlot::Input);
                }
            }
            ComboboxHandler::InputChange => {
                self.dispatch(ComboboxAction::InputChange(event.value.clone()));
            }
            ComboboxHandler::InputKeyDown => self.input_key_down(event),
            ComboboxHandler::InputBlur => {
                let inside = event
                    .related_target
                    .is_some_and(|node| self.effects.within(node, BOUNDARY));
                if self.machine.state().is_open && !inside && !self.effects.pointer_is_down() {
                    self.dispatch(ComboboxAction::InputBlur { select_item: true });
                }
            }
            ComboboxHandler::InputClick => self.dispatch(ComboboxAction::InputClick),
            ComboboxHandler::MenuMouseLeave => self.dispatch(ComboboxAction::MenuMouseLeave),
            ComboboxHandler::ItemMouseMove(index) => {
                if self.machine.state().highlighted_index != Some(index) {
                    let disabled = self.collection.is_disabled(index);
                    self.dispatch(ComboboxAction::ItemMouseMove { index, disabled });
                }
            }
            ComboboxHandler::ItemClick(index) => self.dispatch(ComboboxAction::ItemClick(index)),
        }
    }

    fn input_key_down(&mut self, event: &UiEvent) {
        use ComboboxAction as A;
        let state = self.machine.state();
        let action = match event.key {
            Key::ArrowDown => A::InputKeyDownArrowDown {
                alt_key: event.alt_key,
            },
            Key::ArrowUp => A::InputKeyDownArrowUp {
                alt_key: event.alt_key,
            },
            Key::Home if state.is_open => A::InputKeyDownHome,
            Key::End if state.is_open => A::InputKeyDownEnd,
            Key::PageUp if state.is_open => A::InputKeyDownPageUp,
            Key::PageDown if state.is_open => A::InputKeyDownPageDown,
            Key::Enter
                if state.is_open && state.highlighted_index.is_some() && !event.is_composing =>
            {
                A::InputKeyDownEnter
            }
            Key::Escape
                if state.is_open
                    || state.highlighted_index.is_some()
                    || state.selected_item.is_some()
                    || !state.input_value.is_empty() =>
            {
                A::InputKeyDownEscape
            }
            _ => return,
        };
        self.dispatch(action);
    }

    /// Report the node of a prop bag's ref binding (`None` to detach).
    pub fn attach(&mut self, binding: &RefBinding, node: Option<NodeRef>) {
        self.effects.attach(binding, node);
    }

    /// Run post-render effects.
    ///
    /// A controlled selected item that changed since the last commit first rewrites the
    /// input value to the item's text. The first commit checks that the input and menu
    /// getters were called and their nodes attached.
    pub fn commit(&mut self) -> Result<(), Error> {
        let verified = self
            .effects
            .verify(&[(INPUT, RefSlot::Input), (MENU, RefSlot::Menu)]);
        self.sync_controlled_selection();
        self.last_commit.run(
            self.machine.state(),
            &mut self.effects,
            &self.collection,
            self.status_message.as_ref(),
        );
        verified
    }

    fn sync_controlled_selection(&mut self) {
        let controlled = self.machine.control().controlled.selected_item.clone();
        let changed = match (&controlled, &self.controlled_selection) {
            (Some(Some(now)), Some(Some(before))) => !self.collection.same(now, before),
            (Some(now), Some(before)) => now != before,
            (Some(_), None) => true,
            (None, _) => false,
        };
        self.controlled_selection = controlled.clone();
        if let (true, Some(item)) = (changed, controlled) {
            let text = item
                .as_ref()
                .map(|item| self.collection.text_of(item))
                .unwrap_or_default();
            if text != self.machine.state().input_value {
                self.dispatch(ComboboxAction::ControlledPropUpdatedSelectedItem(text));
            }
        }
    }

    /// Fire due status timers.
    pub fn tick(&mut self) {
        self.effects.tick();
    }

    /// A pointer press started anywhere in the document.
    pub fn pointer_down(&mut self, kind: PointerKind) {
        self.effects.pointer_down(kind);
    }

    /// The pointer moved anywhere in the document.
    pub fn pointer_move(&mut self) {
        self.effects.pointer_move();
    }

    /// A pointer press ended on `target`. Ending outside the widget closes the menu
    /// without selecting.
    pub fn pointer_up(&mut self, target: Option<NodeRef>) {
        let release = self.effects.pointer_up(target, BOUNDARY);
        if release == PointerRelease::Outside && self.machine.state().is_open {
            self.dispatch(ComboboxAction::InputBlur { select_item: false });
        }
    }

    /// Open the menu.
    pub fn open_menu(&mut self) {
        self.dispatch(ComboboxAction::FunctionOpenMenu);
    }

    /// Close the menu.
    pub fn close_menu(&mut self) {
        self.dispatch(ComboboxAction::FunctionCloseMenu);
    }

    /// Toggle the menu.
    pub fn toggle_menu(&mut self) {
        self.dispatch(ComboboxAction::FunctionToggleMenu);
    }

    /// Select an item and show its text in the input, or clear both.
    pub fn select_item(&mut self, item: Option<I>) {
        self.dispatch(ComboboxAction::FunctionSelectItem(item));
    }

    /// Highlight an index. Disabled items clear the highlight instead.
    pub fn set_highlighted_index(&mut self, index: Option<usize>) {
        self.dispatch(ComboboxAction::FunctionSetHighlightedIndex(index));
    }

    /// Set the input text.
    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.dispatch(ComboboxAction::FunctionSetInputValue(value.into()));
    }

    /// Return every key to its default value.
    pub fn reset(&mut self) {
        self.dispatch(ComboboxAction::FunctionReset);
    }
}

impl<I: Item> core::fmt::Debug for Combobox<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Combobox")
            .field("machine", &self.machine)
            .field("collection", &self.collection)
            .field("circular", &self.circular)
            .field("effects", &self.effects)
            .field("last_commit", &self.last_commit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use picklist_core::{AttrValue, ManualClock, SimulatedDocument};

    use crate::testing::{INPUT as INPUT_NODE, MENU_NODE, TOGGLE, item_node};

    fn props(items: Vec<&'static str>) -> ComboboxProps<&'static str> {
        ComboboxProps::new(items).item_to_string(|s| String::from(*s))
    }

    struct View {
        input: ElementProps<ComboboxHandler>,
        toggle_button: ElementProps<ComboboxHandler>,
        items: Vec<ElementProps<ComboboxHandler>>,
    }

    struct Harness {
        combobox: Combobox<&'static str>,
        doc: SimulatedDocument,
        view: View,
    }

    impl Harness {
        fn new(props: ComboboxProps<&'static str>) -> Self {
            let doc = SimulatedDocument::new(ManualClock::new());
            let mut combobox =
                Combobox::new(props.environment(doc.clone()), &mut IdGenerator::new());
            let view = render(&mut combobox);
            combobox.commit().unwrap();
            Self {
                combobox,
                doc,
                view,
            }
        }

        fn key(&mut self, event: UiEvent) {
            self.combobox.fire(&self.view.input, &event);
            self.rerender();
        }

        fn rerender(&mut self) {
            self.view = render(&mut self.combobox);
            self.combobox.commit().unwrap();
        }

        fn state(&self) -> DropdownState<&'static str> {
            self.combobox.state()
        }
    }

    fn render(combobox: &mut Combobox<&'static str>) -> View {
        let input = combobox.get_input_props(UserProps::new());
        let toggle_button = combobox.get_toggle_button_props(UserProps::new());
        let menu = combobox.get_menu_props(UserProps::new());
        let items: Vec<_> = (0..combobox.items().len())
            .map(|i| combobox.get_item_props(None, Some(i), UserProps::new()).unwrap())
            .collect();
        combobox.attach(input.ref_binding().unwrap(), Some(INPUT_NODE));
        combobox.attach(toggle_button.ref_binding().unwrap(), Some(TOGGLE));
        combobox.attach(menu.ref_binding().unwrap(), Some(MENU_NODE));
        for (i, item) in items.iter().enumerate() {
            combobox.attach(item.ref_binding().unwrap(), Some(item_node(i)));
        }
        View {
            input,
            toggle_button,
            items,
        }
    }

    #[test]
    fn typing_opens_with_default_highlight() {
        let mut h = Harness::new(
            props(vec!["apple", "apricot"])
                .defaults(DropdownChanges::new().highlighted_index(Some(0))),
        );
        h.key(UiEvent::change("ap"));
        let state = h.state();
        assert!(state.is_open);
        assert_eq!(state.input_value, "ap");
        assert_eq!(state.highlighted_index, Some(0));
    }

    #[test]
    fn arrows_wrap_by_default() {
        let mut h = Harness::new(props(vec!["a", "b", "c"]));
        h.key(UiEvent::key_down(Key::ArrowDown));
        assert_eq!(h.state().highlighted_index, Some(0));
        h.key(UiEvent::key_down(Key::ArrowUp));
        assert_eq!(h.state().highlighted_index, Some(2));
        h.key(UiEvent::key_down(Key::ArrowDown));
        assert_eq!(h.state().highlighted_index, Some(0));
        h.key(UiEvent::key_down(Key::End));
        assert_eq!(h.state().highlighted_index, Some(2));
    }

    #[test]
    fn enter_selects_and_fills_input() {
        let mut h = Harness::new(props(vec!["red", "green"]));
        h.key(UiEvent::key_down(Key::ArrowDown));
        h.key(UiEvent::key_down(Key::ArrowDown));
        h.key(UiEvent::key_down(Key::Enter).composing());
        assert!(h.state().is_open, "composition swallows Enter");
        h.key(UiEvent::key_down(Key::Enter));
        let state = h.state();
        assert_eq!(state.selected_item, Some("green"));
        assert_eq!(state.input_value, "green");
        assert!(!state.is_open);
    }

    #[test]
    fn escape_closes_then_clears() {
        let mut h = Harness::new(
            props(vec!["red", "green"])
                .initial(DropdownChanges::new().selected_item(Some("red"))),
        );
        assert_eq!(h.state().input_value, "red");
        h.combobox.open_menu();
        h.key(UiEvent::key_down(Key::Escape));
        assert!(!h.state().is_open);
        assert_eq!(h.state().selected_item, Some("red"));
        h.key(UiEvent::key_down(Key::Escape));
        assert_eq!(h.state().selected_item, None);
        assert_eq!(h.state().input_value, "");
    }

    #[test]
    fn toggle_button_opens_and_focuses_input() {
        let mut h = Harness::new(props(vec!["a"]));
        let button = h.view.toggle_button.clone();
        h.combobox.fire(&button, &UiEvent::click());
        assert!(h.state().is_open);
        assert_eq!(h.doc.focused(), Some(INPUT_NODE));
        h.combobox.fire(&button, &UiEvent::click());
        assert!(!h.state().is_open);
        assert_eq!(h.doc.focus_log().len(), 1);
    }

    #[test]
    fn blur_selects_but_outside_press_does_not() {
        let mut h = Harness::new(props(vec!["a", "b"]));
        h.key(UiEvent::key_down(Key::ArrowDown));
        h.combobox.fire(&h.view.input, &UiEvent::blur().with_related_target(MENU_NODE));
        assert!(h.state().is_open, "focus stayed inside the widget");
        h.combobox.fire(&h.view.input, &UiEvent::blur());
        assert_eq!(h.state().selected_item, Some("a"));
        assert_eq!(h.state().input_value, "a");

        h.combobox.open_menu();
        h.combobox.set_highlighted_index(Some(1));
        h.combobox.pointer_down(PointerKind::Mouse);
        h.combobox.pointer_up(Some(NodeRef(999)));
        assert!(!h.state().is_open);
        assert_eq!(h.state().selected_item, Some("a"));
    }

    #[test]
    fn item_click_fills_input() {
        let mut h = Harness::new(props(vec!["a", "b"]));
        h.key(UiEvent::click());
        assert!(h.state().is_open);
        h.combobox.fire(&h.view.items[1], &UiEvent::click());
        assert_eq!(h.state().selected_item, Some("b"));
        assert_eq!(h.state().input_value, "b");
        h.combobox.select_item(None);
        assert_eq!(h.state().input_value, "");
    }

    #[test]
    fn controlled_selection_syncs_input_on_commit() {
        let kinds: Rc<RefCell<Vec<ComboboxChangeType>>> = Rc::default();
        let sink = kinds.clone();
        let mut h = Harness::new(
            props(vec!["a", "b"])
                .controlled(DropdownChanges::new().selected_item(Some("a")))
                .on_input_value_change(move |change| sink.borrow_mut().push(change.kind)),
        );
        assert_eq!(h.state().input_value, "a");

        h.combobox.control_mut().controlled.selected_item = Some(Some("b"));
        h.rerender();
        assert_eq!(h.state().input_value, "b");
        assert_eq!(
            *kinds.borrow(),
            vec![ComboboxChangeType::ControlledPropUpdatedSelectedItem]
        );

        h.rerender();
        assert_eq!(kinds.borrow().len(), 1);
    }

    #[test]
    fn input_props_wire_aria() {
        let mut combobox = Combobox::new(props(vec!["a", "b"]), &mut IdGenerator::new());
        combobox.open_menu();
        combobox.set_highlighted_index(Some(1));
        let input = combobox.get_input_props(UserProps::new().attr("placeholder", "Fruit"));
        assert_eq!(input.attr_str("role"), Some("combobox"));
        assert_eq!(input.attr_str("aria-autocomplete"), Some("list"));
        assert_eq!(input.attr_str("aria-activedescendant"), Some("picklist-0-item-1"));
        assert_eq!(input.attr_str("placeholder"), Some("Fruit"));
        assert_eq!(input.attr("aria-expanded"), Some(&AttrValue::Bool(true)));
        let label = combobox.get_label_props(UserProps::new());
        assert_eq!(label.attr_str("for"), Some("picklist-0-input"));
        assert!(label.has_no_listeners());
    }

    #[test]
    fn first_commit_requires_input() {
        let mut combobox = Combobox::new(props(vec!["a"]), &mut IdGenerator::new());
        let _ = combobox.get_menu_props(UserProps::new().suppress_ref_error(true));
        assert_eq!(
            combobox.commit(),
            Err(Error::GetterNotCalled { getter: INPUT })
        );
        assert_eq!(combobox.commit(), Ok(()), "checked once");
    }

    #[test]
    fn shrinking_items_clears_dangling_highlight() {
        let mut combobox = Combobox::new(props(vec!["a", "b", "c"]), &mut IdGenerator::new());
        combobox.open_menu();
        combobox.set_highlighted_index(Some(2));
        assert_eq!(combobox.state().highlighted_index, Some(2));
        combobox.set_items(vec!["a"]);
        assert_eq!(combobox.state().highlighted_index, None);
        assert!(combobox.state().is_open);

        combobox.set_highlighted_index(Some(5));
        assert_eq!(combobox.state().highlighted_index, None);
        combobox.set_highlighted_index(Some(0));
        assert_eq!(combobox.state().highlighted_index, Some(0));
    }

    #[test]
    fn shrinking_items_keeps_controlled_highlight() {
        let mut combobox = Combobox::new(
            props(vec!["a", "b", "c"])
                .controlled(DropdownChanges::new().highlighted_index(Some(2))),
            &mut IdGenerator::new(),
        );
        combobox.set_items(vec!["a"]);
        assert_eq!(combobox.state().highlighted_index, Some(2));
    }

    #[test]
    fn symbols_round_trip() {
        for kind in ComboboxChangeType::ALL {
            assert_eq!(ComboboxChangeType::parse(kind.as_str()), Ok(*kind));
        }
    }
}
