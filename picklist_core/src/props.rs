// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prop bags: attribute maps plus listener chains, merged from engine and caller input.
//!
//! A getter builds [`EngineProps`] (ARIA attributes, ids, the engine handler for each
//! event, and the ref slot it needs) and merges it with the caller's [`UserProps`]
//! through [`compose`]:
//!
//! - Caller attributes are copied verbatim and win over engine attributes.
//! - For each event, caller handlers and the engine handler form one chain
//!   `[User.., Engine]`. [`run_chain`] walks it in order and stops at the first handler
//!   returning [`Outcome::Stop`], so a caller can keep the engine from reacting.
//! - The ref binding carries the engine slot and the caller's ref callback together.
//! - Disabled elements carry no listeners at all.
//!
//! Engine handlers are plain values (`H`, an enum per widget) rather than closures;
//! the widget interprets them when the bag is fired.
//!
//! ```rust
//! use picklist_core::{EventKind, Outcome, UiEvent, UserProps, compose, run_chain};
//! use picklist_core::props::{EngineProps, Handler};
//!
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! enum Engine { Toggle }
//!
//! let engine = EngineProps::new("get_toggle_button_props")
//!     .attr("role", "combobox")
//!     .on(EventKind::Click, Engine::Toggle);
//! let user = UserProps::new()
//!     .attr("role", "button")
//!     .on(EventKind::Click, |_| Outcome::Stop);
//! let props = compose(engine, user);
//!
//! assert_eq!(props.attr_str("role"), Some("button"));
//! let chain = props.chain(EventKind::Click).unwrap();
//! let mut toggled = false;
//! run_chain(chain, &UiEvent::click(), |_: &Engine| {
//!     toggled = true;
//!     Outcome::Continue
//! });
//! assert!(!toggled);
//! ```

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::fmt;

use smallvec::SmallVec;

use crate::event::{EventKind, UiEvent};
use crate::refs::{ControlOptions, NodeRef, RefBinding, RefCallback, RefSlot};

/// Propagation control returned by handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Run the next handler in the chain.
    Continue,
    /// Skip the rest of the chain, including the engine handler.
    Stop,
}

/// Attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    /// String attribute.
    Str(String),
    /// Boolean attribute (`aria-expanded`, `aria-selected`, …).
    Bool(bool),
    /// Integer attribute (`tabindex`).
    Int(i64),
}

impl AttrValue {
    /// String value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// Attribute map of a prop bag.
pub type Attrs = BTreeMap<Cow<'static, str>, AttrValue>;

/// Caller event handler.
pub type UserHandler = Rc<dyn Fn(&UiEvent) -> Outcome>;

/// One entry of a listener chain.
#[derive(Clone)]
pub enum Handler<H> {
    /// Caller handler.
    User(UserHandler),
    /// Engine handler, interpreted by the widget.
    Engine(H),
}

impl<H: fmt::Debug> fmt::Debug for Handler<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(_) => f.write_str("User(..)"),
            Self::Engine(h) => f.debug_tuple("Engine").field(h).finish(),
        }
    }
}

/// Handler chain for one event type.
pub type Chain<H> = SmallVec<[Handler<H>; 2]>;

/// Walk a chain in order, stopping at the first [`Outcome::Stop`].
///
/// Returns the index of the handler that stopped propagation, or `None` if the whole
/// chain ran.
pub fn run_chain<H>(
    chain: &[Handler<H>],
    event: &UiEvent,
    mut engine: impl FnMut(&H) -> Outcome,
) -> Option<usize> {
    for (index, handler) in chain.iter().enumerate() {
        let outcome = match handler {
            Handler::User(user) => user(event),
            Handler::Engine(h) => engine(h),
        };
        if outcome == Outcome::Stop {
            return Some(index);
        }
    }
    None
}

/// A merged prop bag, ready to render.
#[derive(Clone, Debug)]
pub struct ElementProps<H> {
    attrs: Attrs,
    listeners: SmallVec<[(EventKind, Chain<H>); 4]>,
    ref_binding: Option<RefBinding>,
}

impl<H> ElementProps<H> {
    /// All attributes.
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// One attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// One string attribute.
    #[must_use]
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(AttrValue::as_str)
    }

    /// Event types with at least one handler.
    pub fn events(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.listeners.iter().map(|(kind, _)| *kind)
    }

    /// Whether the bag has no listeners at all.
    #[must_use]
    pub fn has_no_listeners(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Handler chain for an event type.
    #[must_use]
    pub fn chain(&self, kind: EventKind) -> Option<&[Handler<H>]> {
        self.listeners
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, chain)| chain.as_slice())
    }

    /// Ref binding, if the element's node should be reported through `attach`.
    pub fn ref_binding(&self) -> Option<&RefBinding> {
        self.ref_binding.as_ref()
    }
}

/// Caller half of a prop bag.
#[derive(Clone, Default)]
pub struct UserProps {
    attrs: Attrs,
    handlers: SmallVec<[(EventKind, UserHandler); 2]>,
    ref_callback: Option<RefCallback>,
    ref_key: Option<Cow<'static, str>>,
    disabled: bool,
    options: ControlOptions,
}

impl UserProps {
    /// No attributes, no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute. Caller attributes override engine attributes of the same name.
    #[must_use]
    pub fn attr(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<AttrValue>,
    ) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Add a handler. It runs before the engine handler for the same event.
    #[must_use]
    pub fn on(
        mut self,
        kind: EventKind,
        handler: impl Fn(&UiEvent) -> Outcome + 'static,
    ) -> Self {
        self.handlers.push((kind, Rc::new(handler)));
        self
    }

    /// Receive the element's node when the renderer attaches it.
    #[must_use]
    pub fn on_ref(mut self, callback: impl Fn(Option<NodeRef>) + 'static) -> Self {
        self.ref_callback = Some(Rc::new(callback));
        self
    }

    /// Name of the prop the renderer applies the ref through. Defaults to `"ref"`.
    #[must_use]
    pub fn ref_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.ref_key = Some(key.into());
        self
    }

    /// Mark the element disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Skip the first-commit ref check for this element.
    #[must_use]
    pub fn suppress_ref_error(mut self, suppress: bool) -> Self {
        self.options.suppress_ref_error = suppress;
        self
    }

    /// Whether the caller marked the element disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Ref check options.
    #[must_use]
    pub fn options(&self) -> ControlOptions {
        self.options
    }
}

impl fmt::Debug for UserProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserProps")
            .field("attrs", &self.attrs)
            .field("handlers", &self.handlers.len())
            .field("ref_callback", &self.ref_callback.is_some())
            .field("ref_key", &self.ref_key)
            .field("disabled", &self.disabled)
            .field("options", &self.options)
            .finish()
    }
}

/// Engine half of a prop bag, built by a getter.
#[derive(Clone, Debug)]
pub struct EngineProps<H> {
    getter: &'static str,
    attrs: Attrs,
    listeners: SmallVec<[(EventKind, H); 4]>,
    ref_slot: Option<RefSlot>,
    disabled: bool,
}

impl<H> EngineProps<H> {
    /// Empty engine props for the named getter.
    #[must_use]
    pub fn new(getter: &'static str) -> Self {
        Self {
            getter,
            attrs: Attrs::new(),
            listeners: SmallVec::new(),
            ref_slot: None,
            disabled: false,
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(Cow::Borrowed(name), value.into());
        self
    }

    /// Add an attribute when `value` is `Some`.
    #[must_use]
    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<AttrValue>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Set the engine handler for an event.
    #[must_use]
    pub fn on(mut self, kind: EventKind, handler: H) -> Self {
        self.listeners.push((kind, handler));
        self
    }

    /// Request the node of this element.
    #[must_use]
    pub fn ref_slot(mut self, slot: RefSlot) -> Self {
        self.ref_slot = Some(slot);
        self
    }

    /// Mark the element disabled from the engine side (for example a disabled item).
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Merge engine and caller halves into one prop bag.
pub fn compose<H>(engine: EngineProps<H>, user: UserProps) -> ElementProps<H> {
    let EngineProps {
        getter,
        mut attrs,
        listeners: engine_listeners,
        ref_slot,
        disabled,
    } = engine;
    let disabled = disabled || user.disabled;

    attrs.extend(user.attrs);

    let mut listeners: SmallVec<[(EventKind, Chain<H>); 4]> = SmallVec::new();
    if !disabled {
        for (kind, handler) in &user.handlers {
            push_handler(&mut listeners, *kind, Handler::User(handler.clone()));
        }
        for (kind, handler) in engine_listeners {
            push_handler(&mut listeners, kind, Handler::Engine(handler));
        }
    }

    let ref_binding = (ref_slot.is_some() || user.ref_callback.is_some()).then(|| RefBinding {
        slot: ref_slot,
        getter,
        ref_key: user.ref_key.unwrap_or(Cow::Borrowed("ref")),
        callback: user.ref_callback,
    });

    ElementProps {
        attrs,
        listeners,
        ref_binding,
    }
}

fn push_handler<H>(
    listeners: &mut SmallVec<[(EventKind, Chain<H>); 4]>,
    kind: EventKind,
    handler: Handler<H>,
) {
    match listeners.iter_mut().find(|(k, _)| *k == kind) {
        Some((_, chain)) => chain.push(handler),
        None => {
            let mut chain = Chain::new();
            chain.push(handler);
            listeners.push((kind, chain));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Engine {
        Click,
        Key,
    }

    fn record(
        log: &Rc<RefCell<Vec<&'static str>>>,
        name: &'static str,
        outcome: Outcome,
    ) -> impl Fn(&UiEvent) -> Outcome + 'static {
        let log = log.clone();
        move |_| {
            log.borrow_mut().push(name);
            outcome
        }
    }

    #[test]
    fn user_handler_runs_before_engine() {
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let props = compose(
            EngineProps::new("get_item_props").on(EventKind::Click, Engine::Click),
            UserProps::new().on(EventKind::Click, record(&log, "user", Outcome::Continue)),
        );
        let stopped = run_chain(
            props.chain(EventKind::Click).unwrap(),
            &UiEvent::click(),
            |h| {
                assert_eq!(*h, Engine::Click);
                log.borrow_mut().push("engine");
                Outcome::Continue
            },
        );
        assert_eq!(stopped, None);
        assert_eq!(*log.borrow(), vec!["user", "engine"]);
    }

    #[test]
    fn stop_skips_engine() {
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let props = compose(
            EngineProps::new("get_item_props").on(EventKind::Click, Engine::Click),
            UserProps::new()
                .on(EventKind::Click, record(&log, "first", Outcome::Stop))
                .on(EventKind::Click, record(&log, "second", Outcome::Continue)),
        );
        let stopped = run_chain(props.chain(EventKind::Click).unwrap(), &UiEvent::click(), |_| {
            panic!("engine handler must not run");
        });
        assert_eq!(stopped, Some(0));
        assert_eq!(*log.borrow(), vec!["first"]);
    }

    #[test]
    fn user_attrs_win_and_unrelated_handlers_survive() {
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let props = compose(
            EngineProps::new("get_menu_props")
                .attr("role", "listbox")
                .attr("id", "m")
                .on(EventKind::KeyDown, Engine::Key),
            UserProps::new()
                .attr("id", "custom")
                .attr("data-testid", "menu")
                .on(EventKind::MouseMove, record(&log, "move", Outcome::Continue)),
        );
        assert_eq!(props.attr_str("role"), Some("listbox"));
        assert_eq!(props.attr_str("id"), Some("custom"));
        assert_eq!(props.attr_str("data-testid"), Some("menu"));
        assert_eq!(
            props.events().collect::<Vec<_>>(),
            vec![EventKind::MouseMove, EventKind::KeyDown]
        );
    }

    #[test]
    fn disabled_drops_every_listener() {
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let props = compose(
            EngineProps::new("get_toggle_button_props")
                .attr("disabled", true)
                .on(EventKind::Click, Engine::Click)
                .on(EventKind::KeyDown, Engine::Key),
            UserProps::new()
                .disabled(true)
                .on(EventKind::Click, record(&log, "user", Outcome::Continue)),
        );
        assert!(props.has_no_listeners());
        assert_eq!(props.attr("disabled"), Some(&AttrValue::Bool(true)));

        let engine_disabled = compose(
            EngineProps::new("get_item_props")
                .disabled(true)
                .on(EventKind::Click, Engine::Click),
            UserProps::new(),
        );
        assert!(engine_disabled.has_no_listeners());
    }

    #[test]
    fn ref_binding_combines_slot_and_callback() {
        let props: ElementProps<Engine> = compose(
            EngineProps::new("get_menu_props").ref_slot(RefSlot::Menu),
            UserProps::new().ref_key("innerRef").on_ref(|_| {}),
        );
        let binding = props.ref_binding().unwrap();
        assert_eq!(binding.slot, Some(RefSlot::Menu));
        assert_eq!(binding.ref_key, "innerRef");
        assert!(binding.callback.is_some());

        let plain: ElementProps<Engine> =
            compose(EngineProps::new("get_label_props"), UserProps::new());
        assert!(plain.ref_binding().is_none());
    }
}
