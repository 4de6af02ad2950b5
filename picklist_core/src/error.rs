// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integration and caller-contract errors.

use alloc::borrow::Cow;
use alloc::string::String;

/// Errors reported by widgets and prop getters.
///
/// Every variant describes a mistake in how the widget is wired up, so these are
/// expected to surface during development and tests rather than at runtime in a
/// correctly integrated UI. A missing document is never an error: DOM side effects
/// degrade to no-ops instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A getter that needs a DOM node was called, but the node it handed out was never
    /// attached before the first commit.
    #[error(
        "the ref prop \"{ref_key}\" from {getter} was not applied correctly on your element"
    )]
    RefNotAttached {
        /// Getter whose ref binding was dropped, for example `"get_menu_props"`.
        getter: &'static str,
        /// Name of the ref key the renderer was expected to apply.
        ref_key: Cow<'static, str>,
    },
    /// A getter that must be used on every render was never called.
    #[error("you forgot to call the {getter} getter function on your component / element")]
    GetterNotCalled {
        /// Name of the getter that was not called.
        getter: &'static str,
    },
    /// A getter that identifies an item needs exactly one of `item` or `index`.
    #[error("pass either item or index to {getter}, not both and not neither")]
    ItemIdentity {
        /// Getter that received the ambiguous identity.
        getter: &'static str,
    },
    /// The item or index passed to a getter does not exist in the collection.
    #[error("the item passed to {getter} is not in the collection")]
    ItemNotFound {
        /// Getter that received the unknown item.
        getter: &'static str,
    },
    /// A state change symbol did not name any known transition.
    #[error("unknown state change type `{0}`")]
    UnknownStateChangeType(String),
}
