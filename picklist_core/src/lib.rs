// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picklist Core: the engine shared by every Picklist widget.
//!
//! A widget in this workspace is a *controlled state machine* plus a set of *prop
//! getters*. This crate supplies both halves, independent of any particular widget:
//!
//! - **State** ([`ControlledState`], [`StateKeys`], [`Seeds`], [`resolve`]): typed widget
//!   state, all-optional patches of it, and the overlay of caller-controlled values.
//! - **Transitions** ([`Machine`], [`Control`], [`Action`], [`StateChangeType`]): every
//!   user or programmatic action runs the widget reducer, then the caller's state reducer,
//!   then per-key and aggregate change listeners.
//! - **Prop bags** ([`props`], [`UserProps`], [`ElementProps`]): attribute maps and
//!   ordered handler chains merged from engine and caller input, plus ref bindings
//!   ([`RefBinding`], [`RefRegistry`]) through which the renderer reports its nodes.
//! - **Side effects** ([`env`], [`status`], [`PointerTracker`]): an [`Environment`]
//!   abstraction over the host document, debounced live-region announcements, and
//!   document-level pointer tracking.
//! - **Identity** ([`IdGenerator`], [`ElementIds`]): stable ids for ARIA wiring.
//!
//! Side effects never run during a transition. A widget dispatches actions, the host
//! re-renders from the resolved state, and then calls the widget's `commit` to run
//! focus, scroll, and status effects against the environment. Timers are deadlines on
//! [`Environment::now`], fired by the widget's `tick`.
//!
//! ## Minimal example
//!
//! ```rust
//! use picklist_core::{
//!     EventKind, IdGenerator, ElementIds, IdOverrides, Outcome, UiEvent, UserProps,
//!     compose, run_chain,
//! };
//! use picklist_core::props::EngineProps;
//!
//! let mut generator = IdGenerator::new();
//! let ids = ElementIds::new(&mut generator, IdOverrides::default());
//!
//! #[derive(Clone, Copy, Debug)]
//! enum Engine { Open }
//!
//! let props = compose(
//!     EngineProps::new("get_toggle_button_props")
//!         .attr("id", ids.toggle_button_id.clone())
//!         .attr("aria-controls", ids.menu_id.clone())
//!         .on(EventKind::Click, Engine::Open),
//!     UserProps::new().attr("class", "picker"),
//! );
//!
//! let mut opened = false;
//! run_chain(props.chain(EventKind::Click).unwrap(), &UiEvent::click(), |_| {
//!     opened = true;
//!     Outcome::Continue
//! });
//! assert!(opened);
//! assert_eq!(props.attr_str("aria-controls"), Some("picklist-0-menu"));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to `kurbo`.
//! - `libm`: `no_std` float support for `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
mod error;
mod event;
mod ids;
mod machine;
mod pointer;
mod refs;
mod state;

pub mod env;
pub mod props;
pub mod status;

pub use action::{Action, StateChangeType};
pub use env::{Environment, Headless, ManualClock, SimulatedDocument};
pub use error::Error;
pub use event::{EventKind, Key, UiEvent};
pub use ids::{ElementIds, IdGenerator, IdOverrides};
pub use machine::{ActionAndChanges, Control, KeyChange, Machine, StateChange, Transition};
pub use pointer::{PointerKind, PointerRelease, PointerTracker};
pub use props::{AttrValue, ElementProps, Outcome, UserProps, compose, run_chain};
pub use refs::{ControlOptions, NodeRef, RefBinding, RefCallback, RefRegistry, RefSlot};
pub use state::{ControlledState, Seeds, StateKeys, resolve};
pub use status::StatusAnnouncer;
