// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node ids the widget tests hand to `attach`.

use picklist_core::NodeRef;

pub(crate) const TOGGLE: NodeRef = NodeRef(2);
pub(crate) const MENU_NODE: NodeRef = NodeRef(3);
pub(crate) const INPUT: NodeRef = NodeRef(4);
pub(crate) const DROPDOWN: NodeRef = NodeRef(5);
pub(crate) const TAG_GROUP: NodeRef = NodeRef(6);

pub(crate) fn item_node(index: usize) -> NodeRef {
    NodeRef(100 + index as u64)
}

pub(crate) fn selected_node(index: usize) -> NodeRef {
    NodeRef(200 + index as u64)
}

pub(crate) fn tag_node(index: usize) -> NodeRef {
    NodeRef(300 + index as u64)
}
