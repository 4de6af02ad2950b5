// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host document as seen by the side-effect layer.
//!
//! Widgets never touch a document directly: focus, scrolling, containment tests, the
//! clock, and the status live region all go through [`Environment`]. Every method that
//! needs a document has a no-op default, so an environment without one (server
//! rendering, unit tests) only implements [`Environment::now`].
//!
//! Two environments ship with the crate:
//!
//! - [`Headless`]: no document. All effects are no-ops.
//! - [`SimulatedDocument`]: an in-memory document that records focus, scroll offsets,
//!   and live-region text, for integration tests and demos.
//!
//! Both read time from a [`ManualClock`] that the host advances explicitly.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use hashbrown::HashMap;
pub use kurbo::Rect;

use crate::refs::NodeRef;

/// Millisecond clock shared between a host and its environment.
///
/// Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    /// A clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.0.get()
    }

    /// Move time forward.
    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get().saturating_add(ms));
    }

    /// Set the time.
    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }
}

/// Document operations used by the side-effect layer.
pub trait Environment {
    /// Whether there is a document to act on.
    fn has_document(&self) -> bool {
        false
    }

    /// Current time in milliseconds, used for timer deadlines.
    fn now(&self) -> u64;

    /// Move focus to `node`.
    fn focus(&mut self, node: NodeRef) {
        let _ = node;
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: NodeRef, node: NodeRef) -> bool {
        ancestor == node
    }

    /// Bounds of `node` in viewport coordinates.
    fn bounds(&self, node: NodeRef) -> Option<Rect> {
        let _ = node;
        None
    }

    /// Vertical scroll offset of a scroll container.
    fn scroll_offset(&self, node: NodeRef) -> f64 {
        let _ = node;
        0.0
    }

    /// Set the vertical scroll offset of a scroll container.
    fn set_scroll_offset(&mut self, node: NodeRef, offset: f64) {
        let _ = (node, offset);
    }

    /// Scroll `container` so `item` is visible, moving as little as possible.
    ///
    /// Does nothing when either node has no bounds.
    fn scroll_into_view(&mut self, item: NodeRef, container: NodeRef) {
        let (Some(item_bounds), Some(viewport)) = (self.bounds(item), self.bounds(container))
        else {
            return;
        };
        let current = self.scroll_offset(container);
        let next = scroll_offset_into_view(viewport, current, item_bounds);
        if next != current {
            self.set_scroll_offset(container, next);
        }
    }

    /// Create a polite status live region with the given id and return its node.
    fn create_live_region(&mut self, id: &str) -> Option<NodeRef> {
        let _ = id;
        None
    }

    /// Replace the text content of `node`.
    fn set_text(&mut self, node: NodeRef, text: &str) {
        let _ = (node, text);
    }

    /// Remove `node` from the document.
    fn remove_node(&mut self, node: NodeRef) {
        let _ = node;
    }
}

/// Scroll offset that brings `item` fully into `viewport` with nearest alignment.
///
/// `viewport` and `item` are in the same coordinate space and reflect the layout at
/// scroll offset `scroll`. An item already fully visible keeps the offset. An item
/// above the viewport, or taller than it, is aligned to the top; an item below is
/// aligned to the bottom.
#[must_use]
pub fn scroll_offset_into_view(viewport: Rect, scroll: f64, item: Rect) -> f64 {
    if item.y0 >= viewport.y0 && item.y1 <= viewport.y1 {
        scroll
    } else if item.y0 < viewport.y0 || item.height() > viewport.height() {
        (scroll - (viewport.y0 - item.y0)).max(0.0)
    } else {
        scroll + (item.y1 - viewport.y1)
    }
}

/// An environment without a document.
#[derive(Clone, Debug, Default)]
pub struct Headless {
    clock: ManualClock,
}

impl Headless {
    /// A headless environment with its own clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A headless environment reading time from `clock`.
    #[must_use]
    pub fn with_clock(clock: ManualClock) -> Self {
        Self { clock }
    }
}

impl Environment for Headless {
    fn now(&self) -> u64 {
        self.clock.now()
    }
}

#[derive(Debug, Default)]
struct Document {
    next_node: u64,
    focus_log: Vec<NodeRef>,
    parents: HashMap<NodeRef, NodeRef>,
    bounds: HashMap<NodeRef, Rect>,
    scroll: HashMap<NodeRef, f64>,
    live_regions: BTreeMap<String, NodeRef>,
    text: HashMap<NodeRef, String>,
}

/// In-memory document recording every effect.
///
/// Clones share the same document, so a test can keep one handle and give another to
/// the widget. Live-region nodes are numbered from `1 << 32` to stay clear of host
/// node ids.
#[derive(Clone, Default)]
pub struct SimulatedDocument {
    clock: ManualClock,
    doc: Rc<RefCell<Document>>,
}

impl SimulatedDocument {
    /// An empty document reading time from `clock`.
    #[must_use]
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            doc: Rc::default(),
        }
    }

    /// Declare `child` a descendant of `parent`.
    pub fn set_parent(&self, child: NodeRef, parent: NodeRef) {
        self.doc.borrow_mut().parents.insert(child, parent);
    }

    /// Set the viewport bounds of a node.
    pub fn set_bounds(&self, node: NodeRef, bounds: Rect) {
        self.doc.borrow_mut().bounds.insert(node, bounds);
    }

    /// Node focused most recently.
    #[must_use]
    pub fn focused(&self) -> Option<NodeRef> {
        self.doc.borrow().focus_log.last().copied()
    }

    /// Every focus call so far, in order.
    #[must_use]
    pub fn focus_log(&self) -> Vec<NodeRef> {
        self.doc.borrow().focus_log.clone()
    }

    /// Current scroll offset of a container.
    #[must_use]
    pub fn scroll_of(&self, node: NodeRef) -> f64 {
        self.doc.borrow().scroll.get(&node).copied().unwrap_or(0.0)
    }

    /// Text of the live region with the given id, if it exists.
    #[must_use]
    pub fn live_region_text(&self, id: &str) -> Option<String> {
        let doc = self.doc.borrow();
        let node = doc.live_regions.get(id)?;
        Some(doc.text.get(node).cloned().unwrap_or_default())
    }

    /// Number of live regions in the document.
    #[must_use]
    pub fn live_region_count(&self) -> usize {
        self.doc.borrow().live_regions.len()
    }
}

impl fmt::Debug for SimulatedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedDocument")
            .field("clock", &self.clock)
            .field("doc", &self.doc.borrow())
            .finish()
    }
}

impl Environment for SimulatedDocument {
    fn has_document(&self) -> bool {
        true
    }

    fn now(&self) -> u64 {
        self.clock.now()
    }

    fn focus(&mut self, node: NodeRef) {
        self.doc.borrow_mut().focus_log.push(node);
    }

    fn contains(&self, ancestor: NodeRef, node: NodeRef) -> bool {
        let doc = self.doc.borrow();
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = doc.parents.get(&n).copied();
        }
        false
    }

    fn bounds(&self, node: NodeRef) -> Option<Rect> {
        self.doc.borrow().bounds.get(&node).copied()
    }

    fn scroll_offset(&self, node: NodeRef) -> f64 {
        self.scroll_of(node)
    }

    fn set_scroll_offset(&mut self, node: NodeRef, offset: f64) {
        self.doc.borrow_mut().scroll.insert(node, offset);
    }

    fn create_live_region(&mut self, id: &str) -> Option<NodeRef> {
        let mut doc = self.doc.borrow_mut();
        if let Some(node) = doc.live_regions.get(id) {
            return Some(*node);
        }
        let node = NodeRef((1 << 32) + doc.next_node);
        doc.next_node += 1;
        doc.live_regions.insert(id.to_string(), node);
        Some(node)
    }

    fn set_text(&mut self, node: NodeRef, text: &str) {
        self.doc.borrow_mut().text.insert(node, text.to_string());
    }

    fn remove_node(&mut self, node: NodeRef) {
        let mut doc = self.doc.borrow_mut();
        doc.live_regions.retain(|_, n| *n != node);
        doc.text.remove(&node);
        doc.parents.remove(&node);
    }
}
