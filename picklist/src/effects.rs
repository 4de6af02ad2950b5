// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance side-effect plumbing shared by the widgets.

use alloc::boxed::Box;
use alloc::string::String;

use picklist_core::props::ElementProps;
use picklist_core::{
    ControlOptions, ElementIds, Environment, Error, NodeRef, PointerKind, PointerRelease,
    PointerTracker, RefBinding, RefRegistry, RefSlot, StatusAnnouncer,
};

/// Custom scroll-into-view hook, given the item node and the menu node.
pub type ScrollIntoView = Box<dyn FnMut(NodeRef, NodeRef)>;

/// Environment, nodes, ids, and timers of one widget instance.
///
/// Dropping it cancels timers and removes the live region.
pub(crate) struct Effects {
    env: Box<dyn Environment>,
    refs: RefRegistry,
    ids: ElementIds,
    status: StatusAnnouncer,
    pointer: PointerTracker,
    scroll_into_view: Option<ScrollIntoView>,
}

impl Effects {
    pub(crate) fn new(
        env: Box<dyn Environment>,
        ids: ElementIds,
        scroll_into_view: Option<ScrollIntoView>,
    ) -> Self {
        Self {
            status: StatusAnnouncer::new(ids.status_id()),
            env,
            refs: RefRegistry::new(),
            ids,
            pointer: PointerTracker::new(),
            scroll_into_view,
        }
    }

    pub(crate) fn ids(&self) -> &ElementIds {
        &self.ids
    }

    pub(crate) fn now(&self) -> u64 {
        self.env.now()
    }

    /// Record a getter call and the ref it handed out.
    pub(crate) fn register<H>(
        &mut self,
        getter: &'static str,
        props: &ElementProps<H>,
        options: ControlOptions,
    ) {
        match props.ref_binding() {
            Some(binding) => self.refs.expect(binding, options),
            None => self.refs.mark_called(getter),
        }
    }

    pub(crate) fn attach(&mut self, binding: &RefBinding, node: Option<NodeRef>) {
        self.refs.attach(binding, node);
    }

    pub(crate) fn verify(&mut self, required: &[(&'static str, RefSlot)]) -> Result<(), Error> {
        self.refs.verify(required)
    }

    /// Focus the node of `slot`.
    pub(crate) fn focus(&mut self, slot: RefSlot) {
        if !self.env.has_document() {
            return;
        }
        match self.refs.node(slot) {
            Some(node) => {
                tracing::debug!(?slot, ?node, "focus");
                self.env.focus(node);
            }
            None => tracing::warn!(?slot, "focus target is not attached"),
        }
    }

    /// Scroll the item node of `item` into view inside the node of `container`.
    pub(crate) fn scroll_into_view(&mut self, item: RefSlot, container: RefSlot) {
        let (Some(item_node), Some(container_node)) =
            (self.refs.node(item), self.refs.node(container))
        else {
            if self.env.has_document() {
                tracing::warn!(?item, "scroll target is not attached");
            }
            return;
        };
        tracing::debug!(?item, "scroll into view");
        match &mut self.scroll_into_view {
            Some(hook) => hook(item_node, container_node),
            None => self.env.scroll_into_view(item_node, container_node),
        }
    }

    pub(crate) fn announce(&mut self, message: String) {
        self.status.announce(&*self.env, message);
    }

    pub(crate) fn tick(&mut self) {
        self.status.tick(&mut *self.env);
    }

    pub(crate) fn pointer_is_down(&self) -> bool {
        self.pointer.is_down()
    }

    pub(crate) fn pointer_down(&mut self, kind: PointerKind) {
        self.pointer.on_down(kind);
    }

    pub(crate) fn pointer_move(&mut self) {
        self.pointer.on_move();
    }

    /// Whether `node` lies inside the node of any `boundary` slot.
    pub(crate) fn within(&self, node: NodeRef, boundary: &[RefSlot]) -> bool {
        self.refs
            .boundary(boundary)
            .any(|owned| self.env.contains(owned, node))
    }

    /// Classify a release against the nodes of the `boundary` slots.
    pub(crate) fn pointer_up(
        &mut self,
        target: Option<NodeRef>,
        boundary: &[RefSlot],
    ) -> PointerRelease {
        let refs = &self.refs;
        let env = &*self.env;
        self.pointer.on_up(target, |node| {
            refs.boundary(boundary)
                .any(|owned| env.contains(owned, node))
        })
    }
}

impl Drop for Effects {
    fn drop(&mut self) {
        self.status.teardown(&mut *self.env);
    }
}

impl core::fmt::Debug for Effects {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Effects")
            .field("refs", &self.refs)
            .field("ids", &self.ids)
            .field("status", &self.status)
            .field("pointer", &self.pointer)
            .field("scroll_into_view", &self.scroll_into_view.is_some())
            .finish_non_exhaustive()
    }
}
