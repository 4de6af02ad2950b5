// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard removal in a tag group, with focus and announcements logged.
//!
//! Run:
//! - `RUST_LOG=picklist=debug cargo run -p picklist_demos --example tag_group`

use picklist::{TagGroup, TagGroupHandler, TagGroupProps};
use picklist_core::{
    ElementProps, IdGenerator, Key, ManualClock, NodeRef, SimulatedDocument, UiEvent, UserProps,
};

const GROUP: NodeRef = NodeRef(1);

fn render(tags: &mut TagGroup<&'static str>) -> ElementProps<TagGroupHandler> {
    let group = tags.get_tag_group_props(UserProps::new());
    if let Some(binding) = group.ref_binding() {
        tags.attach(binding, Some(GROUP));
    }
    let count = tags.state().items.len();
    for index in 0..count {
        if let Ok(tag) = tags.get_tag_props(None, Some(index), UserProps::new()) {
            if let Some(binding) = tag.ref_binding() {
                tags.attach(binding, Some(NodeRef(10 + index as u64)));
            }
        }
    }
    if let Err(err) = tags.commit() {
        tracing::error!(%err, "commit failed");
    }
    group
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
    let mut tags = TagGroup::new(
        TagGroupProps::new(vec!["rust", "ui", "a11y", "headless"])
            .item_to_string(|tag| String::from(*tag))
            .environment(doc.clone()),
        &mut IdGenerator::new(),
    );

    let mut group = render(&mut tags);
    for key in [Key::ArrowLeft, Key::Backspace, Key::ArrowRight, Key::Delete] {
        tags.fire(&group, &UiEvent::key_down(key));
        group = render(&mut tags);
        clock.advance(picklist_core::status::STATUS_DEBOUNCE_MS);
        tags.tick();

        let state = tags.state();
        let region = tags.ids().status_id();
        tracing::info!(
            ?key,
            tags = ?state.items,
            active = ?state.active_index,
            focused = ?doc.focused(),
            status = %doc.live_region_text(&region).unwrap_or_default(),
            "after key"
        );
    }
}
