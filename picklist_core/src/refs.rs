// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node references handed out by prop getters.
//!
//! Getters for elements the engine needs to reach later (to focus them, measure them,
//! or test containment) attach a [`RefBinding`] to their prop bag. The renderer reports
//! the node it created for that element through the widget's `attach` method, which
//! records it in the [`RefRegistry`] and forwards it to the caller's own ref callback.
//!
//! On the first commit the registry checks that every required getter was called and
//! that every node it asked for was attached.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use core::fmt;

use hashbrown::{HashMap, HashSet};

use crate::Error;

/// Opaque handle of a host node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(pub u64);

/// Role of a node within one widget instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefSlot {
    /// Label element.
    Label,
    /// Menu (listbox) element.
    Menu,
    /// Toggle button element.
    ToggleButton,
    /// Text input element.
    Input,
    /// Menu item at an index.
    Item(usize),
    /// Selected item (chip) at an index.
    SelectedItem(usize),
    /// Element receiving dropdown focus in a multiple selection.
    Dropdown,
    /// Tag group container.
    TagGroup,
    /// Tag at an index.
    Tag(usize),
}

/// Caller ref callback. Receives `None` when the node is detached.
pub type RefCallback = Rc<dyn Fn(Option<NodeRef>)>;

/// Options shared by getters that bind a ref.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlOptions {
    /// Skip the first-commit check for this getter's ref.
    pub suppress_ref_error: bool,
}

/// Ref part of a prop bag.
#[derive(Clone)]
pub struct RefBinding {
    /// Slot the engine records the node in, if it needs the node.
    pub slot: Option<RefSlot>,
    /// Getter that produced the binding.
    pub getter: &'static str,
    /// Name of the prop the renderer applies the ref through.
    pub ref_key: Cow<'static, str>,
    /// Caller callback combined with the engine's.
    pub callback: Option<RefCallback>,
}

impl fmt::Debug for RefBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefBinding")
            .field("slot", &self.slot)
            .field("getter", &self.getter)
            .field("ref_key", &self.ref_key)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[derive(Clone, Debug)]
struct Expected {
    getter: &'static str,
    ref_key: Cow<'static, str>,
    suppressed: bool,
}

/// Nodes of one widget instance, keyed by slot.
#[derive(Debug, Default)]
pub struct RefRegistry {
    nodes: HashMap<RefSlot, NodeRef>,
    expected: HashMap<RefSlot, Expected>,
    called: HashSet<&'static str>,
    verified: bool,
}

impl RefRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a getter handed out `binding`.
    pub fn expect(&mut self, binding: &RefBinding, options: ControlOptions) {
        self.called.insert(binding.getter);
        if let Some(slot) = binding.slot {
            self.expected.insert(
                slot,
                Expected {
                    getter: binding.getter,
                    ref_key: binding.ref_key.clone(),
                    suppressed: options.suppress_ref_error,
                },
            );
        }
    }

    /// Record that a getter without a ref binding was called.
    pub fn mark_called(&mut self, getter: &'static str) {
        self.called.insert(getter);
    }

    /// Attach (`Some`) or detach (`None`) the node of a binding.
    pub fn attach(&mut self, binding: &RefBinding, node: Option<NodeRef>) {
        if let Some(slot) = binding.slot {
            match node {
                Some(node) => {
                    self.nodes.insert(slot, node);
                }
                None => {
                    self.nodes.remove(&slot);
                }
            }
        }
        if let Some(callback) = &binding.callback {
            callback(node);
        }
    }

    /// Node recorded for a slot.
    #[must_use]
    pub fn node(&self, slot: RefSlot) -> Option<NodeRef> {
        self.nodes.get(&slot).copied()
    }

    /// Whether `node` is one of this instance's nodes.
    #[must_use]
    pub fn owns(&self, node: NodeRef) -> bool {
        self.nodes.values().any(|owned| *owned == node)
    }

    /// Nodes of the slots that define the widget's outer boundary.
    pub fn boundary<'a>(&'a self, slots: &'a [RefSlot]) -> impl Iterator<Item = NodeRef> + 'a {
        slots.iter().filter_map(|slot| self.node(*slot))
    }

    /// First-commit integration check.
    ///
    /// Runs once; later calls succeed without checking. `required` lists getters that
    /// must have been called with the slot each one binds.
    pub fn verify(&mut self, required: &[(&'static str, RefSlot)]) -> Result<(), Error> {
        if self.verified {
            return Ok(());
        }
        self.verified = true;
        for (getter, slot) in required {
            if !self.called.contains(getter) {
                return Err(Error::GetterNotCalled { getter: *getter });
            }
            if let Some(expected) = self.expected.get(slot) {
                if !expected.suppressed && !self.nodes.contains_key(slot) {
                    return Err(Error::RefNotAttached {
                        getter: expected.getter,
                        ref_key: expected.ref_key.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::Cell;

    fn menu_binding() -> RefBinding {
        RefBinding {
            slot: Some(RefSlot::Menu),
            getter: "get_menu_props",
            ref_key: Cow::Borrowed("ref"),
            callback: None,
        }
    }

    #[test]
    fn missing_getter_is_reported() {
        let mut refs = RefRegistry::new();
        assert_eq!(
            refs.verify(&[("get_menu_props", RefSlot::Menu)]),
            Err(Error::GetterNotCalled {
                getter: "get_menu_props"
            })
        );
        // Only the first commit is checked.
        assert_eq!(refs.verify(&[("get_menu_props", RefSlot::Menu)]), Ok(()));
    }

    #[test]
    fn unattached_ref_is_reported_unless_suppressed() {
        let mut refs = RefRegistry::new();
        refs.expect(&menu_binding(), ControlOptions::default());
        assert!(matches!(
            refs.verify(&[("get_menu_props", RefSlot::Menu)]),
            Err(Error::RefNotAttached { getter: "get_menu_props", .. })
        ));

        let mut refs = RefRegistry::new();
        refs.expect(
            &menu_binding(),
            ControlOptions {
                suppress_ref_error: true,
            },
        );
        assert_eq!(refs.verify(&[("get_menu_props", RefSlot::Menu)]), Ok(()));
    }

    #[test]
    fn attach_feeds_registry_and_caller() {
        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        let binding = RefBinding {
            callback: Some(Rc::new(move |node| sink.set(node))),
            ..menu_binding()
        };
        let mut refs = RefRegistry::new();
        refs.expect(&binding, ControlOptions::default());
        refs.attach(&binding, Some(NodeRef(7)));

        assert_eq!(refs.node(RefSlot::Menu), Some(NodeRef(7)));
        assert_eq!(seen.get(), Some(NodeRef(7)));
        assert!(refs.owns(NodeRef(7)));
        assert_eq!(refs.verify(&[("get_menu_props", RefSlot::Menu)]), Ok(()));

        refs.attach(&binding, None);
        assert_eq!(refs.node(RefSlot::Menu), None);
        assert_eq!(seen.get(), None);
    }

    #[test]
    fn boundary_skips_unattached_slots() {
        let mut refs = RefRegistry::new();
        refs.attach(&menu_binding(), Some(NodeRef(3)));
        let slots = [RefSlot::ToggleButton, RefSlot::Menu];
        let nodes: Vec<NodeRef> = refs.boundary(&slots).collect();
        assert_eq!(nodes, [NodeRef(3)]);
    }
}
