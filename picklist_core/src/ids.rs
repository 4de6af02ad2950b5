// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable element identifiers.
//!
//! Every widget instance needs a handful of ids to wire ARIA relationships
//! (`aria-labelledby`, `aria-controls`, `aria-activedescendant`). They are derived from a
//! single base id, which is either supplied by the caller or taken once from an
//! [`IdGenerator`] when the instance is created.
//!
//! The generator is an explicit object rather than global state: create one per process
//! (or per test), pass it by `&mut` to widget constructors, and call
//! [`IdGenerator::reset`] between isolated render passes so two independently rendered
//! documents produce the same ids.
//!
//! ```rust
//! use picklist_core::{ElementIds, IdGenerator, IdOverrides};
//!
//! let mut ids = IdGenerator::new();
//! let first = ElementIds::new(&mut ids, IdOverrides::default());
//! assert_eq!(first.menu_id, "picklist-0-menu");
//! assert_eq!(first.item_id(2), "picklist-0-item-2");
//!
//! ids.reset();
//! let again = ElementIds::new(&mut ids, IdOverrides::default());
//! assert_eq!(again.id, first.id);
//! ```

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use core::fmt;

/// Counter-backed source of base ids.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    prefix: Cow<'static, str>,
    next: u64,
}

impl IdGenerator {
    /// Create a generator producing `picklist-0`, `picklist-1`, ….
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix("picklist")
    }

    /// Create a generator with a custom prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Take the next base id.
    pub fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }

    /// Restart the counter, for example between two server-side render passes.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-supplied id overrides.
///
/// Any part left as `None` is derived from the base id.
#[derive(Default)]
pub struct IdOverrides {
    /// Base id; when `None` one is taken from the [`IdGenerator`].
    pub id: Option<String>,
    /// Id of the label element.
    pub label_id: Option<String>,
    /// Id of the menu (listbox) element.
    pub menu_id: Option<String>,
    /// Id of the toggle button element.
    pub toggle_button_id: Option<String>,
    /// Id of the text input element.
    pub input_id: Option<String>,
    /// Id of the item at a given index.
    pub item_id: Option<Box<dyn Fn(usize) -> String>>,
    /// Id of the tag group container.
    pub tag_group_id: Option<String>,
    /// Id of the tag at a given index.
    pub tag_id: Option<Box<dyn Fn(usize) -> String>>,
    /// Id of the remove button of the tag at a given index.
    pub tag_remove_id: Option<Box<dyn Fn(usize) -> String>>,
    /// Id of the status live region.
    pub status_id: Option<String>,
}

impl fmt::Debug for IdOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdOverrides")
            .field("id", &self.id)
            .field("label_id", &self.label_id)
            .field("menu_id", &self.menu_id)
            .field("toggle_button_id", &self.toggle_button_id)
            .field("input_id", &self.input_id)
            .field("item_id", &self.item_id.is_some())
            .field("tag_group_id", &self.tag_group_id)
            .field("tag_id", &self.tag_id.is_some())
            .field("tag_remove_id", &self.tag_remove_id.is_some())
            .field("status_id", &self.status_id)
            .finish()
    }
}

/// The memoized id set of one widget instance.
pub struct ElementIds {
    /// Base id.
    pub id: String,
    /// Label element id.
    pub label_id: String,
    /// Menu element id.
    pub menu_id: String,
    /// Toggle button element id.
    pub toggle_button_id: String,
    /// Input element id.
    pub input_id: String,
    item_id: Option<Box<dyn Fn(usize) -> String>>,
    tag_group_id: String,
    tag_id: Option<Box<dyn Fn(usize) -> String>>,
    tag_remove_id: Option<Box<dyn Fn(usize) -> String>>,
    status_id: String,
}

impl ElementIds {
    /// Build the id set, taking a base id from `generator` only when none is supplied.
    pub fn new(generator: &mut IdGenerator, overrides: IdOverrides) -> Self {
        let id = overrides.id.unwrap_or_else(|| generator.next_id());
        Self {
            label_id: overrides
                .label_id
                .unwrap_or_else(|| format!("{id}-label")),
            menu_id: overrides.menu_id.unwrap_or_else(|| format!("{id}-menu")),
            toggle_button_id: overrides
                .toggle_button_id
                .unwrap_or_else(|| format!("{id}-toggle-button")),
            input_id: overrides.input_id.unwrap_or_else(|| format!("{id}-input")),
            item_id: overrides.item_id,
            tag_group_id: overrides
                .tag_group_id
                .unwrap_or_else(|| format!("{id}-tag-group")),
            tag_id: overrides.tag_id,
            tag_remove_id: overrides.tag_remove_id,
            status_id: overrides
                .status_id
                .unwrap_or_else(|| format!("{id}-a11y-status")),
            id,
        }
    }

    /// Id of the item at `index`.
    #[must_use]
    pub fn item_id(&self, index: usize) -> String {
        match &self.item_id {
            Some(item_id) => item_id(index),
            None => format!("{}-item-{index}", self.id),
        }
    }

    /// Id of the tag group container.
    #[must_use]
    pub fn tag_group_id(&self) -> String {
        self.tag_group_id.clone()
    }

    /// Id of the tag at `index`.
    #[must_use]
    pub fn tag_id(&self, index: usize) -> String {
        match &self.tag_id {
            Some(tag_id) => tag_id(index),
            None => format!("{}-tag-{index}", self.id),
        }
    }

    /// Id of the remove button of the tag at `index`.
    #[must_use]
    pub fn tag_remove_id(&self, index: usize) -> String {
        match &self.tag_remove_id {
            Some(tag_remove_id) => tag_remove_id(index),
            None => format!("{}-tag-remove-{index}", self.id),
        }
    }

    /// Id of the instance-scoped live region used for status messages.
    #[must_use]
    pub fn status_id(&self) -> String {
        self.status_id.clone()
    }
}

impl fmt::Debug for ElementIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementIds")
            .field("id", &self.id)
            .field("label_id", &self.label_id)
            .field("menu_id", &self.menu_id)
            .field("toggle_button_id", &self.toggle_button_id)
            .field("input_id", &self.input_id)
            .field("tag_group_id", &self.tag_group_id)
            .field("status_id", &self.status_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn ids_increase_per_instance() {
        let mut generator = IdGenerator::new();
        let a = ElementIds::new(&mut generator, IdOverrides::default());
        let b = ElementIds::new(&mut generator, IdOverrides::default());
        assert_eq!(a.id, "picklist-0");
        assert_eq!(b.id, "picklist-1");
        assert_eq!(b.label_id, "picklist-1-label");
        assert_eq!(b.toggle_button_id, "picklist-1-toggle-button");
        assert_eq!(b.input_id, "picklist-1-input");
    }

    #[test]
    fn supplied_id_does_not_consume_counter() {
        let mut generator = IdGenerator::with_prefix("shop");
        let custom = ElementIds::new(
            &mut generator,
            IdOverrides {
                id: Some("fruit".to_string()),
                menu_id: Some("fruit-list".to_string()),
                ..IdOverrides::default()
            },
        );
        assert_eq!(custom.id, "fruit");
        assert_eq!(custom.menu_id, "fruit-list");
        assert_eq!(custom.label_id, "fruit-label");
        assert_eq!(generator.next_id(), "shop-0");
    }

    #[test]
    fn item_id_override() {
        let mut generator = IdGenerator::new();
        let ids = ElementIds::new(
            &mut generator,
            IdOverrides {
                item_id: Some(Box::new(|index| format!("option-{index}"))),
                ..IdOverrides::default()
            },
        );
        assert_eq!(ids.item_id(4), "option-4");
        assert_eq!(ids.tag_id(1), "picklist-0-tag-1");
        assert_eq!(ids.tag_remove_id(1), "picklist-0-tag-remove-1");
    }

    #[test]
    fn tag_and_status_id_overrides() {
        let mut generator = IdGenerator::new();
        let ids = ElementIds::new(
            &mut generator,
            IdOverrides {
                tag_group_id: Some("labels".to_string()),
                tag_id: Some(Box::new(|index| format!("label-{index}"))),
                tag_remove_id: Some(Box::new(|index| format!("label-{index}-x"))),
                status_id: Some("labels-status".to_string()),
                ..IdOverrides::default()
            },
        );
        assert_eq!(ids.tag_group_id(), "labels");
        assert_eq!(ids.tag_id(2), "label-2");
        assert_eq!(ids.tag_remove_id(2), "label-2-x");
        assert_eq!(ids.status_id(), "labels-status");
        assert_eq!(ids.item_id(2), "picklist-0-item-2");
    }

    #[test]
    fn reset_restarts_between_render_passes() {
        let mut generator = IdGenerator::new();
        let _ = generator.next_id();
        let _ = generator.next_id();
        generator.reset();
        assert_eq!(generator.next_id(), "picklist-0");
    }
}
