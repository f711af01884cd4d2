//! In-memory chat transcript and its projection onto a surface.

use chrono::{DateTime, Utc};
use shared::domain::EntryId;

pub const TYPING_INDICATOR_TEXT: &str = "Bot is typing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryRole {
    User,
    Bot,
    SystemStatus,
}

impl EntryRole {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "message user-message",
            Self::Bot => "message bot-message",
            Self::SystemStatus => "message typing",
        }
    }
}

/// A transcript entry. Fields are read-only once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    id: EntryId,
    role: EntryRole,
    text: String,
    created_at: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn role(&self) -> EntryRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: EntryRole, text: impl Into<String>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(TranscriptEntry {
            id,
            role,
            text: text.into(),
            created_at: Utc::now(),
        });
        id
    }

    pub fn remove(&mut self, id: EntryId) -> Option<TranscriptEntry> {
        let idx = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(idx))
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn count_role(&self, role: EntryRole) -> usize {
        self.entries.iter().filter(|entry| entry.role == role).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub id: EntryId,
    pub class: &'static str,
    pub text: String,
}

pub fn render(transcript: &Transcript) -> Vec<RenderedMessage> {
    transcript
        .entries()
        .iter()
        .map(|entry| RenderedMessage {
            id: entry.id,
            class: entry.role.css_class(),
            text: entry.text.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut transcript = Transcript::new();
        let first = transcript.append(EntryRole::User, "hi");
        let status = transcript.append(EntryRole::SystemStatus, TYPING_INDICATOR_TEXT);
        assert!(transcript.remove(status).is_some());
        let reply = transcript.append(EntryRole::Bot, "hello");

        assert_ne!(reply, status);
        assert_eq!(
            transcript.entries().iter().map(|e| e.id()).collect::<Vec<_>>(),
            [first, reply]
        );
    }

    #[test]
    fn removing_unknown_entry_is_a_no_op() {
        let mut transcript = Transcript::new();
        transcript.append(EntryRole::User, "hi");
        assert_eq!(transcript.remove(EntryId(42)), None);
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn render_projects_roles_to_classes_in_order() {
        let mut transcript = Transcript::new();
        transcript.append(EntryRole::User, "hi");
        transcript.append(EntryRole::SystemStatus, TYPING_INDICATOR_TEXT);
        transcript.append(EntryRole::Bot, "hello");

        let rendered = render(&transcript);
        let classes: Vec<_> = rendered.iter().map(|m| m.class).collect();
        assert_eq!(
            classes,
            ["message user-message", "message typing", "message bot-message"]
        );
        assert_eq!(rendered[2].text, "hello");
        assert_eq!(transcript.count_role(EntryRole::Bot), 1);
    }
}
