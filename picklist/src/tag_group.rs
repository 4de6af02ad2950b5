// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag group: a row of removable tags with one roving tab stop.
//!
//! ArrowLeft and ArrowRight move the active tag and wrap at the ends. Backspace and
//! Delete remove the active tag, and each tag may render a remove button. After a
//! removal the tag now at the same position becomes active, falling back to the new
//! last tag, and focus follows.

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
use picklist_nav::next_index;

use crate::active::{
    ActiveCommit, FocusTargets, RemovalMessage, RemovalStatus, active_after_removal,
    settle_active_index,
};
use crate::collection::{Collection, Item, resolve_index};
use crate::effects::Effects;

const TAG_GROUP: &str = "get_tag_group_props";
const TAG: &str = "get_tag_props";
const TAG_REMOVE: &str = "get_tag_remove_props";

const FOCUS: FocusTargets = FocusTargets {
    item: RefSlot::Tag,
    fallback: RefSlot::TagGroup,
};

/// State of a [`TagGroup`].
#[derive(Clone, Debug, PartialEq)]
pub struct TagGroupState<I> {
    /// Tags, in order.
    pub items: Vec<I>,
    /// Index of the focused tag.
    pub active_index: Option<usize>,
}

impl<I> Default for TagGroupState<I> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            active_index: None,
        }
    }
}

/// Partial [`TagGroupState`]. `None` fields are absent.
#[derive(Clone, Debug, PartialEq)]
pub struct TagGroupChanges<I> {
    /// Tags.
    pub items: Option<Vec<I>>,
    /// Active index.
    pub active_index: Option<Option<usize>>,
}

impl<I> Default for TagGroupChanges<I> {
    fn default() -> Self {
        Self {
            items: None,
            active_index: None,
        }
    }
}

impl<I> TagGroupChanges<I> {
    /// No keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With `items`.
    #[must_use]
    pub fn items(mut self, items: Vec<I>) -> Self {
        self.items = Some(items);
        self
    }

    /// With `active_index`.
    #[must_use]
    pub fn active_index(mut self, index: Option<usize>) -> Self {
        self.active_index = Some(index);
        self
    }
}

impl<I: Item> ControlledState for TagGroupState<I> {
    type Changes = TagGroupChanges<I>;

    fn apply(&mut self, changes: &TagGroupChanges<I>) {
        if let Some(items) = &changes.items {
            self.items.clone_from(items);
        }
        if let Some(index) = changes.active_index {
            self.active_index = index;
        }
    }

    fn changed_keys(&self, other: &Self) -> StateKeys {
        let mut keys = StateKeys::empty();
        keys.set(StateKeys::ITEMS, self.items != other.items);
        keys.set(StateKeys::ACTIVE_INDEX, self.active_index != other.active_index);
        keys
    }

    fn extract(&self, keys: StateKeys) -> TagGroupChanges<I> {
        TagGroupChanges {
            items: keys.contains(StateKeys::ITEMS).then(|| self.items.clone()),
            active_index: keys
                .contains(StateKeys::ACTIVE_INDEX)
                .then_some(self.active_index),
        }
    }

    fn keys_of(changes: &TagGroupChanges<I>) -> StateKeys {
        let mut keys = StateKeys::empty();
        keys.set(StateKeys::ITEMS, changes.items.is_some());
        keys.set(StateKeys::ACTIVE_INDEX, changes.active_index.is_some());
        keys
    }
}

/// Transitions of a [`TagGroup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[expect(missing_docs, reason = "names match the transition symbols")]
pub enum TagGroupChangeType {
    TagClick,
    TagGroupKeyDownArrowLeft,
    TagGroupKeyDownArrowRight,
    TagGroupKeyDownBackspace,
    TagGroupKeyDownDelete,
    TagRemoveClick,
    FunctionAddItem,
    FunctionRemoveItem,
    FunctionSetActiveIndex,
    FunctionReset,
}

impl StateChangeType for TagGroupChangeType {
    const ALL: &'static [Self] = &[
        Self::TagClick,
        Self::TagGroupKeyDownArrowLeft,
        Self::TagGroupKeyDownArrowRight,
        Self::TagGroupKeyDownBackspace,
        Self::TagGroupKeyDownDelete,
        Self::TagRemoveClick,
        Self::FunctionAddItem,
        Self::FunctionRemoveItem,
        Self::FunctionSetActiveIndex,
        Self::FunctionReset,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::TagClick => "__tag_click__",
            Self::TagGroupKeyDownArrowLeft => "__taggroup_keydown_arrowleft__",
            Self::TagGroupKeyDownArrowRight => "__taggroup_keydown_arrowright__",
            Self::TagGroupKeyDownBackspace => "__taggroup_keydown_backspace__",
            Self::TagGroupKeyDownDelete => "__taggroup_keydown_delete__",
            Self::TagRemoveClick => "__tag_remove_click__",
            Self::FunctionAddItem => "__function_add_item__",
            Self::FunctionRemoveItem => "__function_remove_item__",
            Self::FunctionSetActiveIndex => "__function_set_active_index__",
            Self::FunctionReset => "__function_reset__",
        }
    }
}

/// Actions of a [`TagGroup`].
#[derive(Clone, Debug, PartialEq)]
pub enum TagGroupAction<I> {
    /// Tag at an index clicked.
    TagClick(usize),
    /// ArrowLeft in the group.
    TagGroupKeyDownArrowLeft,
    /// ArrowRight in the group.
    TagGroupKeyDownArrowRight,
    /// Backspace in the group.
    TagGroupKeyDownBackspace,
    /// Delete in the group.
    TagGroupKeyDownDelete,
    /// Remove button of the tag at an index clicked.
    TagRemoveClick(usize),
    /// [`TagGroup::add_item`].
    FunctionAddItem {
        /// Tag to insert.
        item: I,
        /// Insertion index; appends when absent or past the end.
        index: Option<usize>,
    },
    /// [`TagGroup::remove_item`].
    FunctionRemoveItem(usize),
    /// [`TagGroup::set_active_index`].
    FunctionSetActiveIndex(Option<usize>),
    /// [`TagGroup::reset`].
    FunctionReset,
}

impl<I: Item> Action for TagGroupAction<I> {
    type Kind = TagGroupChangeType;

    fn kind(&self) -> TagGroupChangeType {
        use TagGroupChangeType as K;
        match self {
            Self::TagClick(_) => K::TagClick,
            Self::TagGroupKeyDownArrowLeft => K::TagGroupKeyDownArrowLeft,
            Self::TagGroupKeyDownArrowRight => K::TagGroupKeyDownArrowRight,
            Self::TagGroupKeyDownBackspace => K::TagGroupKeyDownBackspace,
            Self::TagGroupKeyDownDelete => K::TagGroupKeyDownDelete,
            Self::TagRemoveClick(_) => K::TagRemoveClick,
            Self::FunctionAddItem { .. } => K::FunctionAddItem,
            Self::FunctionRemoveItem(_) => K::FunctionRemoveItem,
            Self::FunctionSetActiveIndex(_) => K::FunctionSetActiveIndex,
            Self::FunctionReset => K::FunctionReset,
        }
    }
}

/// Engine handlers carried by [`TagGroup`] prop bags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagGroupHandler {
    /// Key press anywhere in the group.
    TagGroupKeyDown,
    /// Click on the tag at an index.
    TagClick(usize),
    /// Click on the remove button of the tag at an index.
    TagRemoveClick(usize),
}

type TagGroupChange<'a, I> = KeyChange<'a, TagGroupState<I>, TagGroupChangeType>;

/// Options of a [`TagGroup`].
pub struct TagGroupProps<I: Item> {
    item_fns: Collection<I>,
    seeds: Seeds<TagGroupState<I>>,
    control: Control<TagGroupState<I>, TagGroupAction<I>>,
    environment: Box<dyn Environment>,
    ids: IdOverrides,
    status_message: Option<RemovalMessage<I>>,
}

impl<I: Item> TagGroupProps<I> {
    /// Default options over `items`, headless.
    pub fn new(items: Vec<I>) -> Self {
        Self {
            item_fns: Collection::new(Vec::new()),
            seeds: Seeds {
                initial: TagGroupChanges::new().items(items),
                default: TagGroupChanges::new(),
            },
            control: Control::new(),
            environment: Box::new(Headless::new()),
            ids: IdOverrides::default(),
            status_message: None,
        }
    }

    /// Tag display text, used in removal messages.
    #[must_use]
    pub fn item_to_string(mut self, f: impl Fn(&I) -> String + 'static) -> Self {
        self.item_fns.set_item_to_string(f);
        self
    }

    /// Tag identity key. Without one, tags are compared by value.
    #[must_use]
    pub fn item_to_key(mut self, f: impl Fn(&I) -> String + 'static) -> Self {
        self.item_fns.set_item_to_key(f);
        self
    }

    /// Controlled values.
    #[must_use]
    pub fn controlled(mut self, controlled: TagGroupChanges<I>) -> Self {
        self.control.controlled = controlled;
        self
    }

    /// Initial active index.
    #[must_use]
    pub fn initial_active_index(mut self, index: Option<usize>) -> Self {
        self.seeds.initial.active_index = Some(index);
        self
    }

    /// Default values, restored by [`TagGroup::reset`].
    #[must_use]
    pub fn defaults(mut self, defaults: TagGroupChanges<I>) -> Self {
        self.seeds.default = defaults;
        self
    }

    /// State reducer.
    #[must_use]
    pub fn state_reducer(
        mut self,
        f: impl Fn(
            &TagGroupState<I>,
            ActionAndChanges<'_, TagGroupState<I>, TagGroupAction<I>>,
        ) -> TagGroupChanges<I>
        + 'static,
    ) -> Self {
        self.control.set_state_reducer(f);
        self
    }

    /// Listener for `items` changes.
    #[must_use]
    pub fn on_items_change(mut self, f: impl FnMut(&TagGroupChange<'_, I>) + 'static) -> Self {
        self.control.on_change(StateKeys::ITEMS, f);
        self
    }

    /// Listener for `active_index` changes.
    #[must_use]
    pub fn on_active_index_change(
        mut self,
        f: impl FnMut(&TagGroupChange<'_, I>) + 'static,
    ) -> Self {
        self.control.on_change(StateKeys::ACTIVE_INDEX, f);
        self
    }

    /// Listener called once per transition with all changed keys.
    #[must_use]
    pub fn on_state_change(
        mut self,
        f: impl FnMut(&StateChange<TagGroupState<I>, TagGroupChangeType>) + 'static,
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

impl<I: Item> fmt::Debug for TagGroupProps<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagGroupProps")
            .field("seeds", &self.seeds)
            .field("control", &self.control)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

fn remove_at<I: Item>(state: &TagGroupState<I>, index: usize) -> TagGroupChanges<I> {
    if index >= state.items.len() {
        return TagGroupChanges::new();
    }
    let mut items = state.items.clone();
    items.remove(index);
    // A removal through a remove button activates the neighbour even when no tag
    // was active.
    let active = state.active_index.or(Some(index));
    let active_index = active_after_removal(active, index, items.len());
    TagGroupChanges::new().items(items).active_index(active_index)
}

fn reduce<I: Item>(
    state: &TagGroupState<I>,
    action: &TagGroupAction<I>,
    seeds: &Seeds<TagGroupState<I>>,
) -> TagGroupChanges<I> {
    use TagGroupAction as A;
    let len = state.items.len();
    let mut changes = match action {
        A::TagClick(index) => TagGroupChanges::new().active_index(Some(*index)),
        A::TagGroupKeyDownArrowLeft => {
            TagGroupChanges::new().active_index(next_index(-1, state.active_index, len, true))
        }
        A::TagGroupKeyDownArrowRight => {
            TagGroupChanges::new().active_index(next_index(1, state.active_index, len, true))
        }
        A::TagGroupKeyDownBackspace | A::TagGroupKeyDownDelete => match state.active_index {
            Some(index) => remove_at(state, index),
            None => TagGroupChanges::new(),
        },
        A::TagRemoveClick(index) | A::FunctionRemoveItem(index) => remove_at(state, *index),
        A::FunctionAddItem { item, index } => {
            let mut items = state.items.clone();
            let at = index.unwrap_or(len).min(len);
            items.insert(at, item.clone());
            TagGroupChanges::new().items(items)
        }
        A::FunctionSetActiveIndex(index) => {
            TagGroupChanges::new().active_index(index.filter(|&i| i < len))
        }
        A::FunctionReset => seeds.default_state().extract(StateKeys::all()),
    };
    let len_after = changes.items.as_ref().map_or(len, Vec::len);
    changes.active_index = settle_active_index(state.active_index, changes.active_index, len_after);
    changes
}

/// A group of removable tags.
pub struct TagGroup<I: Item> {
    machine: Machine<TagGroupState<I>, TagGroupAction<I>>,
    item_fns: Collection<I>,
    effects: Effects,
    last_commit: ActiveCommit<I>,
    status_message: Option<RemovalMessage<I>>,
}

impl<I: Item> TagGroup<I> {
    /// Create a tag group, taking an id from `generator` unless one was supplied.
    pub fn new(props: TagGroupProps<I>, generator: &mut IdGenerator) -> Self {
        let TagGroupProps {
            item_fns,
            seeds,
            control,
            environment,
            ids,
            status_message,
        } = props;
        let machine = Machine::new(seeds, control);
        let state = machine.state();
        let effects = Effects::new(environment, ElementIds::new(generator, ids), None);
        tracing::debug!(id = %effects.ids().id, "tag group created");
        Self {
            last_commit: ActiveCommit::new(state.items, state.active_index),
            machine,
            item_fns,
            effects,
            status_message,
        }
    }

    /// Resolved state.
    pub fn state(&self) -> TagGroupState<I> {
        self.machine.state()
    }

    /// Element ids.
    pub fn ids(&self) -> &ElementIds {
        self.effects.ids()
    }

    /// Controlled values, state reducer, and listeners.
    pub fn control_mut(&mut self) -> &mut Control<TagGroupState<I>, TagGroupAction<I>> {
        self.machine.control_mut()
    }

    fn dispatch(&mut self, action: TagGroupAction<I>) {
        self.machine.dispatch(action, reduce);
    }

    fn resolve(
        &self,
        getter: &'static str,
        item: Option<&I>,
        index: Option<usize>,
    ) -> Result<usize, Error> {
        let items = self.machine.state().items;
        resolve_index(getter, item, index, items.len(), |item| {
            items.iter().position(|tag| self.item_fns.same(tag, item))
        })
    }

    /// Props of the group container.
    pub fn get_tag_group_props(&mut self, user: UserProps) -> ElementProps<TagGroupHandler> {
        let engine = EngineProps::new(TAG_GROUP)
            .attr("id", self.effects.ids().tag_group_id())
            .attr("role", "grid")
            .attr("aria-live", "polite")
            .attr("aria-atomic", false)
            .attr("aria-relevant", "additions")
            .ref_slot(RefSlot::TagGroup)
            .on(EventKind::KeyDown, TagGroupHandler::TagGroupKeyDown);
        let options = user.options();
        let props = compose(engine, user);
        self.effects.register(TAG_GROUP, &props, options);
        props
    }

    /// Props of a tag, identified by exactly one of `item` and `index`.
    ///
    /// Only the active tag is reachable with Tab; without an active tag, the first
    /// one is.
    pub fn get_tag_props(
        &mut self,
        item: Option<&I>,
        index: Option<usize>,
        user: UserProps,
    ) -> Result<ElementProps<TagGroupHandler>, Error> {
        let index = self.resolve(TAG, item, index)?;
        let active = self.machine.state().active_index;
        let ids = self.effects.ids();
        let engine = EngineProps::new(TAG)
            .attr("id", ids.tag_id(index))
            .attr("role", "row")
            .attr("aria-describedby", ids.tag_remove_id(index))
            .attr("tabindex", if active.unwrap_or(0) == index { 0_i64 } else { -1 })
            .ref_slot(RefSlot::Tag(index))
            .on(EventKind::Click, TagGroupHandler::TagClick(index));
        let options = user.options();
        let props = compose(engine, user);
        self.effects.register(TAG, &props, options);
        Ok(props)
    }

    /// Props of the remove button inside a tag.
    pub fn get_tag_remove_props(
        &mut self,
        item: Option<&I>,
        index: Option<usize>,
        user: UserProps,
    ) -> Result<ElementProps<TagGroupHandler>, Error> {
        let index = self.resolve(TAG_REMOVE, item, index)?;
        let ids = self.effects.ids();
        let remove_id = ids.tag_remove_id(index);
        let engine = EngineProps::new(TAG_REMOVE)
            .attr("aria-labelledby", alloc::format!("{remove_id} {}", ids.tag_id(index)))
            .attr("id", remove_id)
            .attr("role", "gridcell")
            .attr("tabindex", -1_i64)
            .on(EventKind::Click, TagGroupHandler::TagRemoveClick(index));
        let options = user.options();
        let props = compose(engine, user);
        self.effects.register(TAG_REMOVE, &props, options);
        Ok(props)
    }

    /// Run the listener chain of `props` for `event`.
    pub fn fire(&mut self, props: &ElementProps<TagGroupHandler>, event: &UiEvent) -> Outcome {
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

    fn handle(&mut self, handler: TagGroupHandler, event: &UiEvent) {
        use TagGroupAction as A;
        let action = match handler {
            TagGroupHandler::TagClick(index) => A::TagClick(index),
            TagGroupHandler::TagRemoveClick(index) => A::TagRemoveClick(index),
            TagGroupHandler::TagGroupKeyDown => match event.key {
                Key::ArrowLeft => A::TagGroupKeyDownArrowLeft,
                Key::ArrowRight => A::TagGroupKeyDownArrowRight,
                Key::Backspace => A::TagGroupKeyDownBackspace,
                Key::Delete => A::TagGroupKeyDownDelete,
                _ => return,
            },
        };
        self.dispatch(action);
    }

    /// Report the node of a prop bag's ref binding (`None` to detach).
    pub fn attach(&mut self, binding: &RefBinding, node: Option<NodeRef>) {
        self.effects.attach(binding, node);
    }

    /// Run post-render effects: focus the active tag (or the group once no tag is
    /// active) and announce removals.
    ///
    /// The first commit checks that the group getter was called and its node attached.
    pub fn commit(&mut self) -> Result<(), Error> {
        let verified = self.effects.verify(&[(TAG_GROUP, RefSlot::TagGroup)]);
        let state = self.machine.state();
        self.last_commit.run(
            &state.items,
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

    /// Insert a tag at `index`, or append it.
    pub fn add_item(&mut self, item: I, index: Option<usize>) {
        self.dispatch(TagGroupAction::FunctionAddItem { item, index });
    }

    /// Remove the tag at `index`.
    pub fn remove_item(&mut self, index: usize) {
        self.dispatch(TagGroupAction::FunctionRemoveItem(index));
    }

    /// Set the active index.
    pub fn set_active_index(&mut self, index: Option<usize>) {
        self.dispatch(TagGroupAction::FunctionSetActiveIndex(index));
    }

    /// Return every key to its default value.
    pub fn reset(&mut self) {
        self.dispatch(TagGroupAction::FunctionReset);
    }
}

impl<I: Item> fmt::Debug for TagGroup<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagGroup")
            .field("machine", &self.machine)
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

    use crate::testing::{TAG_GROUP as GROUP_NODE, tag_node};

    struct Harness {
        tags: TagGroup<&'static str>,
        clock: ManualClock,
        doc: SimulatedDocument,
        group: ElementProps<TagGroupHandler>,
        removes: Vec<ElementProps<TagGroupHandler>>,
    }

    type Rendered = (ElementProps<TagGroupHandler>, Vec<ElementProps<TagGroupHandler>>);

    /// Each tag's node is derived from its text, so focus assertions name the tag.
    fn node_of(tag: &str) -> NodeRef {
        tag_node(tag.len())
    }

    fn render(tags: &mut TagGroup<&'static str>) -> Rendered {
        let group = tags.get_tag_group_props(UserProps::new());
        tags.attach(group.ref_binding().unwrap(), Some(GROUP_NODE));
        let mut removes = Vec::new();
        for (i, tag) in tags.state().items.iter().enumerate() {
            let props = tags.get_tag_props(None, Some(i), UserProps::new()).unwrap();
            tags.attach(props.ref_binding().unwrap(), Some(node_of(tag)));
            removes.push(tags.get_tag_remove_props(None, Some(i), UserProps::new()).unwrap());
        }
        tags.commit().unwrap();
        (group, removes)
    }

    impl Harness {
        fn new(props: TagGroupProps<&'static str>) -> Self {
            let clock = ManualClock::new();
            let doc = SimulatedDocument::new(clock.clone());
            let mut tags = TagGroup::new(
                props
                    .item_to_string(|s| String::from(*s))
                    .environment(doc.clone()),
                &mut IdGenerator::new(),
            );
            let (group, removes) = render(&mut tags);
            Self {
                tags,
                clock,
                doc,
                group,
                removes,
            }
        }

        fn key(&mut self, key: Key) {
            self.tags.fire(&self.group, &UiEvent::key_down(key));
            (self.group, self.removes) = render(&mut self.tags);
        }
    }

    // Tags of distinct lengths, so `node_of` tells them apart.
    fn colors() -> Vec<&'static str> {
        vec!["red", "blue", "green"]
    }

    #[test]
    fn arrows_wrap() {
        let mut h = Harness::new(TagGroupProps::new(colors()));
        h.key(Key::ArrowRight);
        assert_eq!(h.tags.state().active_index, Some(0));
        assert_eq!(h.doc.focused(), Some(node_of("red")));
        h.key(Key::ArrowLeft);
        assert_eq!(h.tags.state().active_index, Some(2));
        assert_eq!(h.doc.focused(), Some(node_of("green")));
        h.key(Key::ArrowRight);
        assert_eq!(h.tags.state().active_index, Some(0));
    }

    #[test]
    fn backspace_removes_active_and_focuses_neighbour() {
        let mut h = Harness::new(TagGroupProps::new(colors()).initial_active_index(Some(1)));
        h.key(Key::Backspace);
        assert_eq!(h.tags.state().items, vec!["red", "green"]);
        assert_eq!(h.tags.state().active_index, Some(1));
        assert_eq!(h.doc.focused(), Some(node_of("green")));
        h.key(Key::Delete);
        assert_eq!(h.tags.state().active_index, Some(0));
        assert_eq!(h.doc.focused(), Some(node_of("red")));
        h.key(Key::Delete);
        assert_eq!(h.tags.state().items, Vec::<&str>::new());
        assert_eq!(h.tags.state().active_index, None);
        assert_eq!(h.doc.focused(), Some(GROUP_NODE));
    }

    #[test]
    fn remove_button_removes_its_tag() {
        let mut h = Harness::new(TagGroupProps::new(colors()));
        h.tags.fire(&h.removes[2], &UiEvent::click());
        (h.group, h.removes) = render(&mut h.tags);
        assert_eq!(h.tags.state().items, vec!["red", "blue"]);
        assert_eq!(h.tags.state().active_index, Some(1));
        assert_eq!(h.doc.focused(), Some(node_of("blue")));

        h.clock.advance(200);
        h.tags.tick();
        let region = h.tags.ids().status_id();
        assert_eq!(
            h.doc.live_region_text(&region).as_deref(),
            Some("green has been removed.")
        );
    }

    #[test]
    fn add_and_reset() {
        let mut tags = TagGroup::new(
            TagGroupProps::new(vec!["a"]).defaults(TagGroupChanges::new().items(vec!["z"])),
            &mut IdGenerator::new(),
        );
        tags.add_item("c", None);
        tags.add_item("b", Some(1));
        tags.add_item("first", Some(0));
        assert_eq!(tags.state().items, vec!["first", "a", "b", "c"]);
        tags.remove_item(9);
        assert_eq!(tags.state().items.len(), 4);
        tags.set_active_index(Some(3));
        tags.reset();
        assert_eq!(
            tags.state(),
            TagGroupState {
                items: vec!["z"],
                active_index: None,
            }
        );
    }

    #[test]
    fn click_sets_active_and_roving_tabindex() {
        let mut tags = TagGroup::new(TagGroupProps::new(colors()), &mut IdGenerator::new());
        let second = tags.get_tag_props(Some(&"blue"), None, UserProps::new()).unwrap();
        assert_eq!(second.attr("tabindex"), Some(&AttrValue::Int(-1)));
        tags.fire(&second, &UiEvent::click());
        assert_eq!(tags.state().active_index, Some(1));
        let second = tags.get_tag_props(None, Some(1), UserProps::new()).unwrap();
        assert_eq!(second.attr("tabindex"), Some(&AttrValue::Int(0)));
        assert_eq!(second.attr_str("id"), Some("picklist-0-tag-1"));
        let remove = tags.get_tag_remove_props(None, Some(1), UserProps::new()).unwrap();
        assert_eq!(
            remove.attr_str("aria-labelledby"),
            Some("picklist-0-tag-remove-1 picklist-0-tag-1")
        );
    }

    #[test]
    fn listeners_see_removals() {
        let seen: Rc<RefCell<Vec<TagGroupChangeType>>> = Rc::default();
        let sink = seen.clone();
        let mut tags = TagGroup::new(
            TagGroupProps::new(colors()).on_items_change(move |change| {
                sink.borrow_mut().push(change.kind);
            }),
            &mut IdGenerator::new(),
        );
        tags.set_active_index(Some(0));
        let group = tags.get_tag_group_props(UserProps::new());
        tags.fire(&group, &UiEvent::key_down(Key::Delete));
        assert_eq!(*seen.borrow(), vec![TagGroupChangeType::TagGroupKeyDownDelete]);
    }

    #[test]
    fn state_reducer_can_veto_removal() {
        let mut tags = TagGroup::new(
            TagGroupProps::new(colors()).state_reducer(|_, ac| match ac.kind() {
                TagGroupChangeType::TagRemoveClick => TagGroupChanges::new(),
                _ => ac.changes,
            }),
            &mut IdGenerator::new(),
        );
        let remove = tags.get_tag_remove_props(None, Some(0), UserProps::new()).unwrap();
        tags.fire(&remove, &UiEvent::click());
        assert_eq!(tags.state().items, colors());
    }

    #[test]
    fn tag_getter_rejects_unknown_tag() {
        let mut tags = TagGroup::new(TagGroupProps::new(colors()), &mut IdGenerator::new());
        assert_eq!(
            tags.get_tag_props(Some(&"pink"), None, UserProps::new()).err(),
            Some(Error::ItemNotFound { getter: TAG })
        );
        assert_eq!(
            tags.commit(),
            Err(Error::GetterNotCalled { getter: TAG_GROUP })
        );
    }

    #[test]
    fn active_index_stays_in_range() {
        let mut tags = TagGroup::new(TagGroupProps::new(colors()), &mut IdGenerator::new());
        tags.set_active_index(Some(7));
        assert_eq!(tags.state().active_index, None);
        tags.set_active_index(Some(2));
        assert_eq!(tags.state().active_index, Some(2));
        tags.remove_item(2);
        assert_eq!(tags.state().active_index, Some(1));
        tags.remove_item(0);
        tags.remove_item(0);
        assert!(tags.state().items.is_empty());
        assert_eq!(tags.state().active_index, None);
        tags.set_active_index(Some(0));
        assert_eq!(tags.state().active_index, None);
    }

    #[test]
    fn symbols_round_trip() {
        for kind in TagGroupChangeType::ALL {
            assert_eq!(TagGroupChangeType::parse(kind.as_str()), Ok(*kind));
        }
    }
}
