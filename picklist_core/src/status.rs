// Copyright 2025 the Picklist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced status announcements through a live region.
//!
//! A widget computes a status message after each commit that changed something worth
//! announcing. [`StatusAnnouncer::announce`] schedules it; a newer message within
//! [`STATUS_DEBOUNCE_MS`] replaces the pending one. When the deadline passes,
//! [`StatusAnnouncer::tick`] writes the text into the instance's live region (creating it
//! on first use) and clears it again [`STATUS_CLEAR_MS`] later, so the same message can be
//! announced twice in a row.

use alloc::format;
use alloc::string::String;

use crate::env::Environment;
use crate::refs::NodeRef;

/// Delay between the last scheduled message and writing it.
pub const STATUS_DEBOUNCE_MS: u64 = 200;

/// Delay between writing a message and clearing the region.
pub const STATUS_CLEAR_MS: u64 = 500;

/// Scheduler for one instance's live region.
#[derive(Clone, Debug)]
pub struct StatusAnnouncer {
    region_id: String,
    region: Option<NodeRef>,
    pending: Option<(u64, String)>,
    clear_at: Option<u64>,
}

impl StatusAnnouncer {
    /// An announcer writing to the live region with id `region_id`.
    #[must_use]
    pub fn new(region_id: String) -> Self {
        Self {
            region_id,
            region: None,
            pending: None,
            clear_at: None,
        }
    }

    /// Schedule `message`. Empty messages are ignored.
    pub fn announce(&mut self, env: &dyn Environment, message: String) {
        if message.is_empty() {
            return;
        }
        self.pending = Some((env.now() + STATUS_DEBOUNCE_MS, message));
    }

    /// Message waiting for its debounce deadline.
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_ref().map(|(_, message)| message.as_str())
    }

    /// Whether no timer is running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_none() && self.clear_at.is_none()
    }

    /// Fire due timers.
    pub fn tick(&mut self, env: &mut dyn Environment) {
        let now = env.now();
        if let Some((due, message)) = self.pending.take_if(|(due, _)| *due <= now) {
            self.write(env, &message);
            self.clear_at = Some(due + STATUS_CLEAR_MS);
        }
        if self.clear_at.is_some_and(|due| due <= now) {
            self.clear_at = None;
            if let Some(region) = self.region {
                env.set_text(region, "");
            }
        }
    }

    /// Cancel timers and remove the live region.
    pub fn teardown(&mut self, env: &mut dyn Environment) {
        self.pending = None;
        self.clear_at = None;
        if let Some(region) = self.region.take() {
            env.remove_node(region);
        }
    }

    fn write(&mut self, env: &mut dyn Environment, message: &str) {
        if !env.has_document() {
            return;
        }
        if self.region.is_none() {
            self.region = env.create_live_region(&self.region_id);
        }
        match self.region {
            Some(region) => {
                tracing::debug!(region = %self.region_id, text = message, "status announced");
                env.set_text(region, message);
            }
            None => tracing::warn!(region = %self.region_id, "live region unavailable"),
        }
    }
}

/// Default message for an open dropdown menu.
///
/// Empty when the menu is closed or the result count did not change.
#[must_use]
pub fn results_message(is_open: bool, result_count: usize, previous_result_count: usize) -> String {
    if !is_open {
        String::new()
    } else if result_count == 0 {
        String::from("No results are available.")
    } else if result_count != previous_result_count {
        let verb = if result_count == 1 {
            "result is"
        } else {
            "results are"
        };
        format!(
            "{result_count} {verb} available, use up and down arrow keys to navigate. Press Enter key to select."
        )
    } else {
        String::new()
    }
}

/// Default message after an item was selected.
#[must_use]
pub fn selection_message(item: &str) -> String {
    format!("{item} has been selected.")
}

/// Default message after a selected item or tag was removed.
#[must_use]
pub fn removal_message(item: &str) -> String {
    format!("{item} has been removed.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Headless, ManualClock, SimulatedDocument};

    fn setup() -> (ManualClock, SimulatedDocument, StatusAnnouncer) {
        let clock = ManualClock::new();
        let doc = SimulatedDocument::new(clock.clone());
        (clock, doc, StatusAnnouncer::new("w-a11y-status".into()))
    }

    #[test]
    fn message_is_debounced_then_cleared() {
        let (clock, doc, mut status) = setup();
        let mut env = doc.clone();

        status.announce(&env, "first".into());
        clock.advance(100);
        status.announce(&env, "second".into());
        clock.advance(150);
        status.tick(&mut env);
        assert_eq!(doc.live_region_count(), 0, "still within the debounce window");

        clock.advance(50);
        status.tick(&mut env);
        assert_eq!(doc.live_region_text("w-a11y-status").as_deref(), Some("second"));

        clock.advance(STATUS_CLEAR_MS);
        status.tick(&mut env);
        assert_eq!(doc.live_region_text("w-a11y-status").as_deref(), Some(""));
        assert!(status.is_idle());
    }

    #[test]
    fn teardown_removes_region_and_cancels() {
        let (clock, doc, mut status) = setup();
        let mut env = doc.clone();
        status.announce(&env, "hello".into());
        clock.advance(STATUS_DEBOUNCE_MS);
        status.tick(&mut env);
        status.announce(&env, "again".into());

        status.teardown(&mut env);
        assert!(status.is_idle());
        assert_eq!(doc.live_region_count(), 0);
    }

    #[test]
    fn headless_announcements_do_nothing() {
        let clock = ManualClock::new();
        let mut env = Headless::with_clock(clock.clone());
        let mut status = StatusAnnouncer::new("w-a11y-status".into());
        status.announce(&env, "hello".into());
        clock.advance(1_000);
        status.tick(&mut env);
        assert!(status.is_idle());
    }

    #[test]
    fn default_messages() {
        assert_eq!(results_message(false, 3, 0), "");
        assert_eq!(results_message(true, 0, 3), "No results are available.");
        assert_eq!(
            results_message(true, 1, 0),
            "1 result is available, use up and down arrow keys to navigate. Press Enter key to select."
        );
        assert_eq!(
            results_message(true, 3, 0),
            "3 results are available, use up and down arrow keys to navigate. Press Enter key to select."
        );
        assert_eq!(results_message(true, 3, 3), "");
        assert_eq!(selection_message("cat"), "cat has been selected.");
        assert_eq!(removal_message("cat"), "cat has been removed.");
    }
}
