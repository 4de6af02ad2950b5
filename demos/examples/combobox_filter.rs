// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A filtering combobox driven against a simulated document.
//!
//! The host owns the item list: after every input change it filters the fruits by the
//! typed prefix and hands the result back to the widget. Each round renders the prop
//! bags, attaches nodes, and commits, the way a real renderer would.
//!
//! Run:
//! - `RUST_LOG=picklist=debug cargo run -p picklist_demos --example combobox_filter`

use picklist::{Combobox, ComboboxHandler, ComboboxProps};
use picklist_core::{
    AttrValue, ElementProps, IdGenerator, Key, ManualClock, NodeRef, SimulatedDocument, UiEvent,
    UserProps,
};

const FRUITS: &[&str] = &[
    "Apple",
    "Apricot",
    "Banana",
    "Blackberry",
    "Blueberry",
    "Cherry",
    "Date",
];

const INPUT: NodeRef = NodeRef(1);
const TOGGLE: NodeRef = NodeRef(2);
const MENU: NodeRef = NodeRef(3);

/// Prop bags of one render.
struct Frame {
    input: ElementProps<ComboboxHandler>,
    items: Vec<(String, bool)>,
}

fn render(combobox: &mut Combobox<&'static str>) -> Frame {
    let input = combobox.get_input_props(UserProps::new().attr("placeholder", "Fruit"));
    let toggle = combobox.get_toggle_button_props(UserProps::new());
    let menu = combobox.get_menu_props(UserProps::new());
    for (props, node) in [(&input, INPUT), (&toggle, TOGGLE), (&menu, MENU)] {
        if let Some(binding) = props.ref_binding() {
            combobox.attach(binding, Some(node));
        }
    }

    let mut items = Vec::new();
    if combobox.state().is_open {
        for (index, fruit) in combobox.items().to_vec().into_iter().enumerate() {
            let Ok(props) = combobox.get_item_props(None, Some(index), UserProps::new()) else {
                continue;
            };
            if let Some(binding) = props.ref_binding() {
                combobox.attach(binding, Some(NodeRef(100 + index as u64)));
            }
            let highlighted = props.attr("aria-selected") == Some(&AttrValue::Bool(true));
            items.push((String::from(fruit), highlighted));
        }
    }

    if let Err(err) = combobox.commit() {
        tracing::error!(%err, "commit failed");
    }
    Frame { input, items }
}

fn filtered(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.to_lowercase();
    FRUITS
        .iter()
        .copied()
        .filter(|fruit| fruit.to_lowercase().starts_with(&prefix))
        .collect()
}

fn show(label: &str, combobox: &Combobox<&'static str>, frame: &Frame) {
    let state = combobox.state();
    tracing::info!(
        input = %state.input_value,
        open = state.is_open,
        highlighted = ?state.highlighted_index,
        selected = ?state.selected_item,
        "{label}"
    );
    for (fruit, highlighted) in &frame.items {
        let marker = if *highlighted { ">" } else { " " };
        tracing::info!("  {marker} {fruit}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let clock = ManualClock::new();
    let doc = SimulatedDocument::new(clock.clone());
    let mut generator = IdGenerator::with_prefix("fruit");
    let mut combobox = Combobox::new(
        ComboboxProps::new(FRUITS.to_vec())
            .item_to_string(|fruit| String::from(*fruit))
            .environment(doc.clone()),
        &mut generator,
    );

    let mut frame = render(&mut combobox);
    show("initial", &combobox, &frame);

    for typed in ["b", "bl"] {
        combobox.fire(&frame.input, &UiEvent::change(typed));
        let items = filtered(&combobox.state().input_value);
        combobox.set_items(items);
        frame = render(&mut combobox);
        show(&format!("typed {typed:?}"), &combobox, &frame);
    }

    for key in [Key::ArrowDown, Key::ArrowDown, Key::Enter] {
        combobox.fire(&frame.input, &UiEvent::key_down(key));
        frame = render(&mut combobox);
        show(&format!("{key:?}"), &combobox, &frame);
    }

    clock.advance(picklist_core::status::STATUS_DEBOUNCE_MS);
    combobox.tick();
    let region = combobox.ids().status_id();
    tracing::info!(
        status = %doc.live_region_text(&region).unwrap_or_default(),
        focused = ?doc.focused(),
        "after commit"
    );
}
