// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless select: typeahead, keyboard selection, and a caller state reducer.
//!
//! No document is involved, so focus, scroll, and status effects are no-ops and only
//! state transitions show up in the log.
//!
//! Run:
//! - `RUST_LOG=picklist_core=debug cargo run -p picklist_demos --example select_typeahead`

use picklist::{DropdownChanges, Select, SelectChangeType, SelectProps};
use picklist_core::{IdGenerator, Key, StateChangeType, UiEvent, UserProps};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut generator = IdGenerator::new();
    let mut select = Select::new(
        SelectProps::new(vec!["Red", "Purple", "Pink", "Orange"])
            .item_to_string(|color| String::from(*color))
            // Keep the menu open after a selection made with Enter.
            .state_reducer(|state, action_and_changes| {
                match action_and_changes.kind() {
                    SelectChangeType::ToggleButtonKeyDownEnter => DropdownChanges {
                        is_open: Some(true),
                        highlighted_index: Some(state.highlighted_index),
                        ..action_and_changes.changes
                    },
                    _ => action_and_changes.changes,
                }
            })
            .on_selected_item_change(|change| {
                tracing::info!(
                    kind = change.kind.as_str(),
                    selected = ?change.state.selected_item,
                    "selection changed"
                );
            }),
        &mut generator,
    );

    let button = select.get_toggle_button_props(UserProps::new());
    for key in [
        Key::Character('p'),
        Key::Character('i'),
        Key::ArrowDown,
        Key::Enter,
        Key::Escape,
    ] {
        select.fire(&button, &UiEvent::key_down(key));
        let state = select.state();
        tracing::info!(
            ?key,
            open = state.is_open,
            highlighted = ?state.highlighted_index,
            typed = %state.input_value,
            "after key"
        );
    }
}
