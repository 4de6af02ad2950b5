// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Actions and their published state change types.

use alloc::string::ToString;
use core::fmt::Debug;

use crate::Error;

/// Closed set of transition kinds of one widget.
///
/// The symbolic values returned by [`as_str`](Self::as_str) are a public contract:
/// callers compare against them in state reducers and change listeners, so once
/// published they never change.
pub trait StateChangeType: Copy + Eq + Debug + 'static {
    /// Every member of the set, in declaration order.
    const ALL: &'static [Self];

    /// The published symbol, for example `"__item_click__"`.
    fn as_str(self) -> &'static str;

    /// Look a member up by its published symbol.
    fn parse(symbol: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == symbol)
            .ok_or_else(|| Error::UnknownStateChangeType(symbol.to_string()))
    }
}

/// A dispatched action: a kind plus the payload relevant to that kind.
///
/// Actions are created by event handlers and the programmatic API, consumed by one
/// transition, and never stored.
pub trait Action: Debug {
    /// The widget's state change type enumeration.
    type Kind: StateChangeType;

    /// Kind of this action.
    fn kind(&self) -> Self::Kind;
}
