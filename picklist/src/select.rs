// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-select dropdown: a toggle button opening a listbox menu.
//!
//! The toggle button holds focus the whole time; the menu is navigated through
//! `aria-activedescendant`. Typing characters on the button jumps to the next item
//! whose text starts with the accumulated keys; the keys are cleared
//! [`TYPEAHEAD_RESET_MS`] after the last one.
//!
//! ## Keyboard
//!
//! | Key | Closed | Open |
//! |---|---|---|
//! | ArrowDown | open, highlight selected or first | next item |
//! | Alt+ArrowDown | open, highlight selected only | next item |
//! | ArrowUp | open, highlight selected or last | previous item |
//! | Alt+ArrowUp | open | select highlighted, close |
//! | Home / End | | first / last enabled item |
//! | PageUp / PageDown | | move by ten |
//! | Enter | open | select highlighted, close |
//! | Space | open | select highlighted, or extend typeahead |
//! | Escape | | close |
//! | character | open, typeahead | typeahead |

use alloc::string::String;
use alloc::vec::Vec;

use picklist_core::props::{ElementProps, EngineProps};
use picklist_core::{
    Action, Control, ElementIds, Error, EventKind, IdGenerator, Key, Machine, NodeRef, Outcome,
    PointerKind, PointerRelease, RefBinding, RefSlot, StateChangeType, UiEvent, UserProps,
    compose, run_chain,
};
use picklist_nav::{TYPEAHEAD_RESET_MS, character_search_index};

use crate::collection::{Collection, Item, resolve_index};
use crate::dropdown::{
    Common, DropdownChanges, DropdownCommit, DropdownProps, DropdownState,
    DropdownStatusMessage, PAGE_SIZE, changes_on_selection, drop_dangling_highlight,
    edge_highlight, highlighted_index_on_open, move_highlight, reduce_common,
};
use crate::effects::Effects;

const LABEL: &str = "get_label_props";
const TOGGLE_BUTTON: &str = "get_toggle_button_props";
const MENU: &str = "get_menu_props";
const ITEM: &str = "get_item_props";

/// Transitions of a [`Select`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectChangeType {
    /// Toggle button clicked.
    ToggleButtonClick,
    /// ArrowDown on the toggle button.
    ToggleButtonKeyDownArrowDown,
    /// ArrowUp on the toggle button.
    ToggleButtonKeyDownArrowUp,
    /// Typeahead character on the toggle button.
    ToggleButtonKeyDownCharacter,
    /// Escape on the toggle button.
    ToggleButtonKeyDownEscape,
    /// Home on the toggle button.
    ToggleButtonKeyDownHome,
    /// End on the toggle button.
    ToggleButtonKeyDownEnd,
    /// Enter on the toggle button.
    ToggleButtonKeyDownEnter,
    /// Space on the toggle button.
    ToggleButtonKeyDownSpaceButton,
    /// PageUp on the toggle button.
    ToggleButtonKeyDownPageUp,
    /// PageDown on the toggle button.
    ToggleButtonKeyDownPageDown,
    /// Toggle button lost focus, or a press ended outside the widget.
    ToggleButtonBlur,
    /// Pointer left the menu.
    MenuMouseLeave,
    /// Pointer moved over an item.
    ItemMouseMove,
    /// Item clicked.
    ItemClick,
    /// [`Select::toggle_menu`].
    FunctionToggleMenu,
    /// [`Select::open_menu`].
    FunctionOpenMenu,
    /// [`Select::close_menu`].
    FunctionCloseMenu,
    /// [`Select::set_highlighted_index`].
    FunctionSetHighlightedIndex,
    /// [`Select::select_item`].
    FunctionSelectItem,
    /// [`Select::set_input_value`], and the typeahead reset.
    FunctionSetInputValue,
    /// [`Select::reset`].
    FunctionReset,
}

impl StateChangeType for SelectChangeType {
    const ALL: &'static [Self] = &[
        Self::ToggleButtonClick,
        Self::ToggleButtonKeyDownArrowDown,
        Self::ToggleButtonKeyDownArrowUp,
        Self::ToggleButtonKeyDownCharacter,
        Self::ToggleButtonKeyDownEscape,
        Self::ToggleButtonKeyDownHome,
        Self::ToggleButtonKeyDownEnd,
        Self::ToggleButtonKeyDownEnter,
        Self::ToggleButtonKeyDownSpaceButton,
        Self::ToggleButtonKeyDownPageUp,
        Self::ToggleButtonKeyDownPageDown,
        Self::ToggleButtonBlur,
        Self::MenuMouseLeave,
        Self::ItemMouseMove,
        Self::ItemClick,
        Self::FunctionToggleMenu,
        Self::FunctionOpenMenu,
        Self::FunctionCloseMenu,
        Self::FunctionSetHighlightedIndex,
        Self::FunctionSelectItem,
        Self::FunctionSetInputValue,
        Self::FunctionReset,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::ToggleButtonClick => "__togglebutton_click__",
            Self::ToggleButtonKeyDownArrowDown => "__togglebutton_keydown_arrow_down__",
            Self::ToggleButtonKeyDownArrowUp => "__togglebutton_keydown_arrow_up__",
            Self::ToggleButtonKeyDownCharacter => "__togglebutton_keydown_character__",
            Self::ToggleButtonKeyDownEscape => "__togglebutton_keydown_escape__",
            Self::ToggleButtonKeyDownHome => "__togglebutton_keydown_home__",
            Self::ToggleButtonKeyDownEnd => "__togglebutton_keydown_end__",
            Self::ToggleButtonKeyDownEnter => "__togglebutton_keydown_enter__",
            Self::ToggleButtonKeyDownSpaceButton => "__togglebutton_keydown_space_button__",
            Self::ToggleButtonKeyDownPageUp => "__togglebutton_keydown_page_up__",
            Self::ToggleButtonKeyDownPageDown => "__togglebutton_keydown_page_down__",
            Self::ToggleButtonBlur => "__togglebutton_blur__",
            Self::MenuMouseLeave => "__menu_mouse_leave__",
            Self::ItemMouseMove => "__item_mouse_move__",
            Self::ItemClick => "__item_click__",
            Self::FunctionToggleMenu => "__function_toggle_menu__",
            Self::FunctionOpenMenu => "__function_open_menu__",
            Self::FunctionCloseMenu => "__function_close_menu__",
            Self::FunctionSetHighlightedIndex => "__function_set_highlighted_index__",
            Self::FunctionSelectItem => "__function_select_item__",
            Self::FunctionSetInputValue => "__function_set_input_value__",
            Self::FunctionReset => "__function_reset__",
        }
    }
}

/// Actions of a [`Select`].
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "variants mirror SelectChangeType")]
pub enum SelectAction<I> {
    ToggleButtonClick,
    ToggleButtonKeyDownArrowDown { alt_key: bool },
    ToggleButtonKeyDownArrowUp { alt_key: bool },
    ToggleButtonKeyDownCharacter(char),
    ToggleButtonKeyDownEscape,
    ToggleButtonKeyDownHome,
    ToggleButtonKeyDownEnd,
    ToggleButtonKeyDownEnter,
    ToggleButtonKeyDownSpaceButton,
    ToggleButtonKeyDownPageUp,
    ToggleButtonKeyDownPageDown,
    ToggleButtonBlur,
    MenuMouseLeave,
    ItemMouseMove { index: usize, disabled: bool },
    ItemClick(usize),
    FunctionToggleMenu,
    FunctionOpenMenu,
    FunctionCloseMenu,
    FunctionSetHighlightedIndex(Option<usize>),
    FunctionSelectItem(Option<I>),
    FunctionSetInputValue(String),
    FunctionReset,
}

impl<I: Item> Action for SelectAction<I> {
    type Kind = SelectChangeType;

    fn kind(&self) -> SelectChangeType {
        use SelectChangeType as K;
        match self {
            Self::ToggleButtonClick => K::ToggleButtonClick,
            Self::ToggleButtonKeyDownArrowDown { .. } => K::ToggleButtonKeyDownArrowDown,
            Self::ToggleButtonKeyDownArrowUp { .. } => K::ToggleButtonKeyDownArrowUp,
            Self::ToggleButtonKeyDownCharacter(_) => K::ToggleButtonKeyDownCharacter,
            Self::ToggleButtonKeyDownEscape => K::ToggleButtonKeyDownEscape,
            Self::ToggleButtonKeyDownHome => K::ToggleButtonKeyDownHome,
            Self::ToggleButtonKeyDownEnd => K::ToggleButtonKeyDownEnd,
            Self::ToggleButtonKeyDownEnter => K::ToggleButtonKeyDownEnter,
            Self::ToggleButtonKeyDownSpaceButton => K::ToggleButtonKeyDownSpaceButton,
            Self::ToggleButtonKeyDownPageUp => K::ToggleButtonKeyDownPageUp,
            Self::ToggleButtonKeyDownPageDown => K::ToggleButtonKeyDownPageDown,
            Self::ToggleButtonBlur => K::ToggleButtonBlur,
            Self::MenuMouseLeave => K::MenuMouseLeave,
            Self::ItemMouseMove { .. } => K::ItemMouseMove,
            Self::ItemClick(_) => K::ItemClick,
            Self::FunctionToggleMenu => K::FunctionToggleMenu,
            Self::FunctionOpenMenu => K::FunctionOpenMenu,
            Self::FunctionCloseMenu => K::FunctionCloseMenu,
            Self::FunctionSetHighlightedIndex(_) => K::FunctionSetHighlightedIndex,
            Self::FunctionSelectItem(_) => K::FunctionSelectItem,
            Self::FunctionSetInputValue(_) => K::FunctionSetInputValue,
            Self::FunctionReset => K::FunctionReset,
        }
    }
}

/// Options of a [`Select`]. Navigation is not circular unless enabled.
pub type SelectProps<I> = DropdownProps<I, SelectAction<I>>;

/// Engine handlers carried by [`Select`] prop bags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectHandler {
    /// Label click: focus the toggle button.
    LabelClick,
    /// Toggle button click.
    ToggleButtonClick,
    /// Toggle button key press.
    ToggleButtonKeyDown,
    /// Toggle button focus loss.
    ToggleButtonBlur,
    /// Pointer leaving the menu.
    MenuMouseLeave,
    /// Pointer moving over the item at an index.
    ItemMouseMove(usize),
    /// Click on the item at an index.
    ItemClick(usize),
}

fn reduce<I: Item>(
    state: &DropdownState<I>,
    action: &SelectAction<I>,
    collection: &Collection<I>,
    seeds: &picklist_core::Seeds<DropdownState<I>>,
    circular: bool,
) -> DropdownChanges<I> {
    use SelectAction as A;
    let common = |common| reduce_common(state, common, collection, seeds);
    let open_with = |index| DropdownChanges::new().is_open(true).highlighted_index(index);
    match action {
        A::ToggleButtonClick | A::FunctionToggleMenu => common(Common::ToggleMenu),
        A::ToggleButtonKeyDownArrowDown { alt_key } => open_with(if state.is_open {
            move_highlight(state, collection, 1, circular)
        } else if *alt_key && state.selected_item.is_none() {
            None
        } else {
            highlighted_index_on_open(state, collection, seeds, 1)
        }),
        A::ToggleButtonKeyDownArrowUp { alt_key } => {
            if state.is_open && *alt_key {
                changes_on_selection(collection, seeds, state.highlighted_index, false)
            } else if state.is_open {
                open_with(move_highlight(state, collection, -1, circular))
            } else {
                open_with(highlighted_index_on_open(state, collection, seeds, -1))
            }
        }
        A::ToggleButtonKeyDownEnter | A::ToggleButtonKeyDownSpaceButton => {
            changes_on_selection(collection, seeds, state.highlighted_index, false)
        }
        A::ToggleButtonKeyDownHome => open_with(edge_highlight(collection, false)),
        A::ToggleButtonKeyDownEnd => open_with(edge_highlight(collection, true)),
        A::ToggleButtonKeyDownPageUp => DropdownChanges::new()
            .highlighted_index(move_highlight(state, collection, -PAGE_SIZE, false)),
        A::ToggleButtonKeyDownPageDown => DropdownChanges::new()
            .highlighted_index(move_highlight(state, collection, PAGE_SIZE, false)),
        A::ToggleButtonKeyDownEscape => DropdownChanges::new()
            .is_open(false)
            .highlighted_index(None),
        A::ToggleButtonBlur => {
            let mut changes = DropdownChanges::new().is_open(false).highlighted_index(None);
            if let Some(item) = state.highlighted_index.and_then(|i| collection.get(i)) {
                changes.selected_item = Some(Some(item.clone()));
            }
            changes
        }
        A::ToggleButtonKeyDownCharacter(c) => {
            let mut keys = state.input_value.clone();
            keys.push(*c);
            let from = match (&state.selected_item, state.is_open) {
                (Some(selected), false) => collection.index_of(selected),
                _ => state.highlighted_index,
            };
            let index = character_search_index(
                &keys,
                from,
                collection.items(),
                collection.item_to_string(),
                |item, i| collection.is_item_disabled(item, i),
            );
            open_with(index).input_value(keys)
        }
        A::ItemClick(index) => {
            let defaults = seeds.default_state();
            DropdownChanges::new()
                .is_open(defaults.is_open)
                .highlighted_index(defaults.highlighted_index)
                .selected_item(collection.get(*index).cloned())
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
        A::FunctionSelectItem(item) => DropdownChanges::new().selected_item(item.clone()),
        A::FunctionReset => common(Common::Reset),
    }
}

/// A single-select dropdown.
///
/// Render from [`Select::state`] using the prop getters, report nodes with
/// [`Select::attach`], route events with [`Select::fire`], then call
/// [`Select::commit`]. Call [`Select::tick`] whenever time passes.
pub struct Select<I: Item> {
    machine: Machine<DropdownState<I>, SelectAction<I>>,
    collection: Collection<I>,
    circular: bool,
    effects: Effects,
    last_commit: DropdownCommit<I>,
    status_message: Option<DropdownStatusMessage<I>>,
    typeahead_clear_at: Option<u64>,
}

impl<I: Item> Select<I> {
    /// Create a select, taking an id from `generator` unless one was supplied.
    pub fn new(props: SelectProps<I>, generator: &mut IdGenerator) -> Self {
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
        let machine = Machine::new_with(seeds, control, |state| {
            if state.is_open && state.highlighted_index.is_none() {
                if let Some(selected) = &state.selected_item {
                    state.highlighted_index = collection.index_of(selected);
                }
            }
        });
        let effects = Effects::new(
            environment,
            ElementIds::new(generator, ids),
            scroll_into_view,
        );
        tracing::debug!(id = %effects.ids().id, "select created");
        Self {
            last_commit: DropdownCommit::new(machine.state()),
            machine,
            collection,
            circular: circular.unwrap_or(false),
            effects,
            status_message,
            typeahead_clear_at: None,
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

    /// Replace the items on re-render.
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
    pub fn control_mut(&mut self) -> &mut Control<DropdownState<I>, SelectAction<I>> {
        self.machine.control_mut()
    }

    fn dispatch(&mut self, action: SelectAction<I>) {
        let scroll = !matches!(
            action,
            SelectAction::ItemMouseMove { .. } | SelectAction::MenuMouseLeave
        );
        let typed = matches!(action, SelectAction::ToggleButtonKeyDownCharacter(_));
        let collection = &self.collection;
        let circular = self.circular;
        self.machine.dispatch(action, |state, action, seeds| {
            reduce(state, action, collection, seeds, circular)
        });
        self.last_commit.request_scroll(scroll);
        if typed {
            self.typeahead_clear_at = Some(self.effects.now() + TYPEAHEAD_RESET_MS);
        }
    }

    /// Props of the label element.
    pub fn get_label_props(&mut self, user: UserProps) -> ElementProps<SelectHandler> {
        let ids = self.effects.ids();
        let engine = EngineProps::new(LABEL)
            .attr("id", ids.label_id.clone())
            .attr("for", ids.toggle_button_id.clone())
            .on(EventKind::Click, SelectHandler::LabelClick);
        let options = user.options();
        let props = compose(engine, user);
        self.effects.register(LABEL, &props, options);
        props
    }

    /// Props of the toggle button.
    ///
    /// A disabled button (see [`UserProps::disabled`]) gets no listeners.
    pub fn get_toggle_button_props(&mut self, user: UserProps) -> ElementProps<SelectHandler> {
        let state = self.machine.state();
        let ids = self.effects.ids();
        let active = active_descendant(ids, &state);
        let engine = EngineProps::new(TOGGLE_BUTTON)
            .attr("id", ids.toggle_button_id.clone())
            .attr("role", "combobox")
            .attr("aria-activedescendant", active)
            .attr("aria-controls", ids.menu_id.clone())
            .attr("aria-expanded", state.is_open)
            .attr("aria-haspopup", "listbox")
            .attr("aria-labelledby", ids.label_id.clone())
            .attr("tabindex", 0_i64)
            .attr_opt("disabled", user.is_disabled().then_some(true))
            .ref_slot(RefSlot::ToggleButton)
            .on(EventKind::Click, SelectHandler::ToggleButtonClick)
            .on(EventKind::KeyDown, SelectHandler::ToggleButtonKeyDown)
            .on(EventKind::Blur, SelectHandler::ToggleButtonBlur);
        let options = user.options();
        let props = compose(engine, user);
        self.effects.register(TOGGLE_BUTTON, &props, options);
        props
    }

    /// Props of the menu.
    pub fn get_menu_props(&mut self, user: UserProps) -> ElementProps<SelectHandler> {
        let ids = self.effects.ids();
        let engine = EngineProps::new(MENU)
            .attr("id", ids.menu_id.clone())
            .attr("role", "listbox")
            .attr("aria-labelledby", ids.label_id.clone())
            .attr("tabindex", -1_i64)
            .ref_slot(RefSlot::Menu)
            .on(EventKind::MouseLeave, SelectHandler::MenuMouseLeave);
        let options = user.options();
        let props = compose(engine, user);
        self.effects.register(MENU, &props, options);
        props
    }

    /// Props of an item, identified by exactly one of `item` and `index`.
    pub fn get_item_props(
        &mut self,
        item: Option<&I>,
        index: Option<usize>,
        user: UserProps,
    ) -> Result<ElementProps<SelectHandler>, Error> {
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
            .attr("aria-selected", selected)
            .attr_opt("aria-disabled", disabled.then_some(true))
            .ref_slot(RefSlot::Item(index))
            .disabled(disabled)
            .on(EventKind::MouseMove, SelectHandler::ItemMouseMove(index))
            .on(EventKind::Click, SelectHandler::ItemClick(index));
        let options = user.options();
        let props = compose(engine, user);
        self.effects.register(ITEM, &props, options);
        Ok(props)
    }

    /// Run the listener chain of `props` for `event`.
    ///
    /// Returns [`Outcome::Stop`] when a caller handler stopped the chain.
    pub fn fire(&mut self, props: &ElementProps<SelectHandler>, event: &UiEvent) -> Outcome {
        let Some(chain) = props.chain(event.kind) else {
            return Outcome::Continue;
        };
        let stopped = run_chain(chain, event, |handler| {
            self.handle(*handler, event);
            Outcome::Continue
        });
        if stopped.is_some() {
            Outcome::Stop
        } else {
            Outcome::Continue
        }
    }

    fn handle(&mut self, handler: SelectHandler, event: &UiEvent) {
        match handler {
            SelectHandler::LabelClick => self.effects.focus(RefSlot::ToggleButton),
            SelectHandler::ToggleButtonClick => self.dispatch(SelectAction::ToggleButtonClick),
            SelectHandler::ToggleButtonKeyDown => self.toggle_button_key_down(event),
            SelectHandler::ToggleButtonBlur => {
                if self.machine.state().is_open && !self.effects.pointer_is_down() {
                    self.dispatch(SelectAction::ToggleButtonBlur);
                }
            }
            SelectHandler::MenuMouseLeave => self.dispatch(SelectAction::MenuMouseLeave),
            SelectHandler::ItemMouseMove(index) => {
                if self.machine.state().highlighted_index != Some(index) {
                    let disabled = self.collection.is_disabled(index);
                    self.dispatch(SelectAction::ItemMouseMove { index, disabled });
                }
            }
            SelectHandler::ItemClick(index) => self.dispatch(SelectAction::ItemClick(index)),
        }
    }

    fn toggle_button_key_down(&mut self, event: &UiEvent) {
        use SelectAction as A;
        let state = self.machine.state();
        let action = match event.key {
            Key::ArrowDown => Some(A::ToggleButtonKeyDownArrowDown {
                alt_key: event.alt_key,
            }),
            Key::ArrowUp => Some(A::ToggleButtonKeyDownArrowUp {
                alt_key: event.alt_key,
            }),
            Key::Home if state.is_open => Some(A::ToggleButtonKeyDownHome),
            Key::End if state.is_open => Some(A::ToggleButtonKeyDownEnd),
            Key::PageUp if state.is_open => Some(A::ToggleButtonKeyDownPageUp),
            Key::PageDown if state.is_open => Some(A::ToggleButtonKeyDownPageDown),
            Key::Escape if state.is_open => Some(A::ToggleButtonKeyDownEscape),
            Key::Enter if state.is_open => Some(A::ToggleButtonKeyDownEnter),
            Key::Enter => Some(A::ToggleButtonClick),
            Key::Character(' ') if !state.is_open => Some(A::ToggleButtonClick),
            Key::Character(' ') if !state.input_value.is_empty() => {
                Some(A::ToggleButtonKeyDownCharacter(' '))
            }
            Key::Character(' ') => Some(A::ToggleButtonKeyDownSpaceButton),
            key => key.search_char().map(A::ToggleButtonKeyDownCharacter),
        };
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    /// Report the node of a prop bag's ref binding (`None` to detach).
    pub fn attach(&mut self, binding: &RefBinding, node: Option<NodeRef>) {
        self.effects.attach(binding, node);
    }

    /// Run post-render effects: scroll the highlighted item into view after keyboard
    /// navigation and schedule status messages.
    ///
    /// The first commit also checks that the toggle button and menu getters were called
    /// and their nodes attached.
    pub fn commit(&mut self) -> Result<(), Error> {
        let verified = self
            .effects
            .verify(&[(TOGGLE_BUTTON, RefSlot::ToggleButton), (MENU, RefSlot::Menu)]);
        self.last_commit.run(
            self.machine.state(),
            &mut self.effects,
            &self.collection,
            self.status_message.as_ref(),
        );
        verified
    }

    /// Fire due timers: the typeahead reset and status announcements.
    pub fn tick(&mut self) {
        if self
            .typeahead_clear_at
            .is_some_and(|due| due <= self.effects.now())
        {
            self.typeahead_clear_at = None;
            if !self.machine.state().input_value.is_empty() {
                self.dispatch(SelectAction::FunctionSetInputValue(String::new()));
            }
        }
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

    /// A pointer press ended on `target`. Ending outside the widget closes the menu.
    pub fn pointer_up(&mut self, target: Option<NodeRef>) {
        let release = self
            .effects
            .pointer_up(target, &[RefSlot::ToggleButton, RefSlot::Menu]);
        if release == PointerRelease::Outside && self.machine.state().is_open {
            self.dispatch(SelectAction::ToggleButtonBlur);
        }
    }

    /// Open the menu.
    pub fn open_menu(&mut self) {
        self.dispatch(SelectAction::FunctionOpenMenu);
    }

    /// Close the menu.
    pub fn close_menu(&mut self) {
        self.dispatch(SelectAction::FunctionCloseMenu);
    }

    /// Toggle the menu.
    pub fn toggle_menu(&mut self) {
        self.dispatch(SelectAction::FunctionToggleMenu);
    }

    /// Select an item, or clear the selection.
    pub fn select_item(&mut self, item: Option<I>) {
        self.dispatch(SelectAction::FunctionSelectItem(item));
    }

    /// Highlight an index. Disabled items clear the highlight instead.
    pub fn set_highlighted_index(&mut self, index: Option<usize>) {
        self.dispatch(SelectAction::FunctionSetHighlightedIndex(index));
    }

    /// Set the typeahead buffer.
    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.dispatch(SelectAction::FunctionSetInputValue(value.into()));
    }

    /// Return every key to its default value.
    pub fn reset(&mut self) {
        self.dispatch(SelectAction::FunctionReset);
    }
}

impl<I: Item> core::fmt::Debug for Select<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Select")
            .field("machine", &self.machine)
            .field("collection", &self.collection)
            .field("circular", &self.circular)
            .field("effects", &self.effects)
            .field("last_commit", &self.last_commit)
            .field("typeahead_clear_at", &self.typeahead_clear_at)
            .finish_non_exhaustive()
    }
}

pub(crate) fn active_descendant<I>(ids: &ElementIds, state: &DropdownState<I>) -> String {
    match (state.is_open, state.highlighted_index) {
        (true, Some(index)) => ids.item_id(index),
        _ => String::new(),
    }
}
