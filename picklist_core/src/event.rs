// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Framework-neutral UI events.
//!
//! Hosts translate their native events into a [`UiEvent`] and hand it, together with
//! the element's prop bag, to a widget's `fire` method. Only the fields the engines read
//! are modeled.

use alloc::string::String;

use crate::refs::NodeRef;

/// Event types a prop bag can listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Primary button click or tap.
    Click,
    /// Key press.
    KeyDown,
    /// Pointer moved over the element.
    MouseMove,
    /// Pointer button pressed on the element.
    MouseDown,
    /// Pointer left the element.
    MouseLeave,
    /// Element lost focus.
    Blur,
    /// Text value of an input changed.
    Change,
}

/// Keys the engines react to. Everything else is [`Key::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// `Home`.
    Home,
    /// `End`.
    End,
    /// `PageUp`.
    PageUp,
    /// `PageDown`.
    PageDown,
    /// `Enter`.
    Enter,
    /// `Escape`.
    Escape,
    /// `Backspace`.
    Backspace,
    /// `Delete`.
    Delete,
    /// `Tab`.
    Tab,
    /// A key producing a single character, including the space bar as `' '`.
    Character(char),
    /// Any other key.
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Enter" => Self::Enter,
            "Escape" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Tab" => Self::Tab,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Other,
                }
            }
        }
    }

    /// The character typed, if it can feed a typeahead search.
    ///
    /// Only single non-whitespace characters qualify.
    #[must_use]
    pub fn search_char(self) -> Option<char> {
        match self {
            Self::Character(c) if !c.is_whitespace() => Some(c),
            _ => None,
        }
    }
}

/// A UI event as seen by the engines.
#[derive(Clone, Debug, PartialEq)]
pub struct UiEvent {
    /// Event type.
    pub kind: EventKind,
    /// Key of a [`EventKind::KeyDown`] event, [`Key::Other`] otherwise.
    pub key: Key,
    /// Alt/Option modifier.
    pub alt_key: bool,
    /// Shift modifier.
    pub shift_key: bool,
    /// IME composition in progress; Enter is ignored while composing.
    pub is_composing: bool,
    /// New value of a [`EventKind::Change`] event.
    pub value: String,
    /// Whether the caret of the target text field sits at position 0 with nothing
    /// selected. `true` for elements without a caret.
    pub caret_at_start: bool,
    /// Node receiving focus on [`EventKind::Blur`], when known.
    pub related_target: Option<NodeRef>,
}

impl UiEvent {
    fn of(kind: EventKind) -> Self {
        Self {
            kind,
            key: Key::Other,
            alt_key: false,
            shift_key: false,
            is_composing: false,
            value: String::new(),
            caret_at_start: true,
            related_target: None,
        }
    }

    /// A click.
    #[must_use]
    pub fn click() -> Self {
        Self::of(EventKind::Click)
    }

    /// A key press.
    #[must_use]
    pub fn key_down(key: Key) -> Self {
        Self {
            key,
            ..Self::of(EventKind::KeyDown)
        }
    }

    /// A pointer move.
    #[must_use]
    pub fn mouse_move() -> Self {
        Self::of(EventKind::MouseMove)
    }

    /// A pointer press.
    #[must_use]
    pub fn mouse_down() -> Self {
        Self::of(EventKind::MouseDown)
    }

    /// The pointer leaving an element.
    #[must_use]
    pub fn mouse_leave() -> Self {
        Self::of(EventKind::MouseLeave)
    }

    /// Focus loss.
    #[must_use]
    pub fn blur() -> Self {
        Self::of(EventKind::Blur)
    }

    /// A text change carrying the new value.
    #[must_use]
    pub fn change(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::of(EventKind::Change)
        }
    }

    /// Set the Alt modifier.
    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    /// Set the Shift modifier.
    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    /// Mark the event as part of an IME composition.
    #[must_use]
    pub fn composing(mut self) -> Self {
        self.is_composing = true;
        self
    }

    /// Set where the caret of the target field is.
    #[must_use]
    pub fn with_caret_at_start(mut self, at_start: bool) -> Self {
        self.caret_at_start = at_start;
        self
    }

    /// Set the node receiving focus.
    #[must_use]
    pub fn with_related_target(mut self, node: NodeRef) -> Self {
        self.related_target = Some(node);
        self
    }
}
