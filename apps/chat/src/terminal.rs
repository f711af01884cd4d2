//! Line-oriented surface that prints each transcript entry once.

use std::{collections::HashSet, sync::Mutex};

use client_core::{ChatSurface, RenderedMessage};
use shared::domain::EntryId;

#[derive(Default)]
pub struct TerminalSurface {
    printed: Mutex<HashSet<EntryId>>,
}

impl TerminalSurface {
    fn label(class: &str) -> &'static str {
        if class.ends_with("user-message") {
            "you"
        } else if class.ends_with("typing") {
            "..."
        } else {
            "bot"
        }
    }

    /// Messages not printed yet, formatted for the terminal.
    pub fn pending_lines(&self, messages: &[RenderedMessage]) -> Vec<String> {
        let Ok(mut printed) = self.printed.lock() else {
            return Vec::new();
        };
        messages
            .iter()
            .filter(|message| printed.insert(message.id))
            .map(|message| format!("{:>3} | {}", Self::label(message.class), message.text))
            .collect()
    }
}

impl ChatSurface for TerminalSurface {
    fn has_element(&self, _selector: &str) -> bool {
        true
    }

    fn show_panel(&self, visible: bool) {
        if visible {
            println!("-- chat open (/toggle to hide, /quit to exit) --");
        } else {
            println!("-- chat hidden --");
        }
    }

    fn render_transcript(&self, messages: &[RenderedMessage]) {
        for line in self.pending_lines(messages) {
            println!("{line}");
        }
    }

    fn set_input(&self, _text: &str) {}

    fn set_submit_enabled(&self, _enabled: bool) {}

    fn scroll_to_end(&self) {}
}
