// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-level pointer tracking.
//!
//! Dropdown widgets need two facts about the pointer that no single element sees:
//!
//! - whether a button is currently held anywhere in the document, because a blur caused
//!   by pressing on the menu must not close it;
//! - whether a press ended outside the widget, which closes an open menu.
//!
//! Hosts forward document-level down/move/up events to the widget, which feeds them
//! to a [`PointerTracker`]. A touch that moved between down and up is a scroll or drag,
//! not a tap, and never counts as an outside press.
//!
//! ```rust
//! use picklist_core::{NodeRef, PointerKind, PointerRelease, PointerTracker};
//!
//! let widget = [NodeRef(1), NodeRef(2)];
//! let mut tracker = PointerTracker::new();
//!
//! tracker.on_down(PointerKind::Mouse);
//! assert!(tracker.is_down());
//! let release = tracker.on_up(Some(NodeRef(9)), |node| widget.contains(&node));
//! assert_eq!(release, PointerRelease::Outside);
//! assert!(!tracker.is_down());
//! ```

use crate::refs::NodeRef;

/// Input device of a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse or pen.
    Mouse,
    /// Touch screen.
    Touch,
}

/// Classification of a release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerRelease {
    /// Ended on the widget.
    Inside,
    /// Ended outside the widget.
    Outside,
    /// A touch that moved before ending.
    Dragged,
    /// No press was being tracked.
    Untracked,
}

/// Press state of the pointer.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    down: Option<PointerKind>,
    moved: bool,
}

impl PointerTracker {
    /// No press tracked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a press is in progress.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.down.is_some()
    }

    /// A press started anywhere in the document.
    pub fn on_down(&mut self, kind: PointerKind) {
        self.down = Some(kind);
        self.moved = false;
    }

    /// The pointer moved while pressed.
    pub fn on_move(&mut self) {
        if self.down.is_some() {
            self.moved = true;
        }
    }

    /// The press ended on `target` (`None` when it ended outside the document).
    ///
    /// `within` tells whether a node belongs to the widget.
    pub fn on_up(
        &mut self,
        target: Option<NodeRef>,
        within: impl Fn(NodeRef) -> bool,
    ) -> PointerRelease {
        let Some(kind) = self.down.take() else {
            return PointerRelease::Untracked;
        };
        if kind == PointerKind::Touch && core::mem::take(&mut self.moved) {
            return PointerRelease::Dragged;
        }
        self.moved = false;
        match target {
            Some(node) if within(node) => PointerRelease::Inside,
            _ => PointerRelease::Outside,
        }
    }
}
