//! Chat widget controller.
//!
//! Owns the transcript, the input buffer and panel visibility, and runs one
//! request/response exchange per submitted turn. Only one turn may be in
//! flight; later submissions are refused until it resolves.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::domain::EntryId;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::{
    surface::{missing_elements, ChatSurface},
    transcript::{render, EntryRole, Transcript, TYPING_INDICATOR_TEXT},
    transport::ChatTransport,
};

pub const NO_RESPONSE_TEXT: &str = "No response from server.";
pub const CONNECTION_ERROR_TEXT: &str = "Error connecting to chatbot.";
pub const SUBMIT_KEY: &str = "Enter";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("chat elements are missing from the surface: {}", .missing.join(", "))]
    MissingElements { missing: Vec<&'static str> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    IconClicked,
    SendClicked,
    KeyPressed(String),
    InputChanged(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty after trimming.
    Ignored,
    /// Another turn is still waiting for its reply.
    Busy,
    Completed { reply: String },
}

#[derive(Default)]
struct WidgetState {
    panel_visible: bool,
    input: String,
    transcript: Transcript,
}

pub struct ChatWidget {
    surface: Arc<dyn ChatSurface>,
    transport: Arc<dyn ChatTransport>,
    inner: Mutex<WidgetState>,
    turn_in_flight: AtomicBool,
}

impl ChatWidget {
    /// Binds the widget to `surface`. Fails without side effects on the
    /// surface if any required element is absent.
    pub fn attach(
        surface: Arc<dyn ChatSurface>,
        transport: Arc<dyn ChatTransport>,
    ) -> Result<Arc<Self>, WidgetError> {
        let missing = missing_elements(surface.as_ref());
        if !missing.is_empty() {
            error!(?missing, "some chat elements are missing; chat widget disabled");
            return Err(WidgetError::MissingElements { missing });
        }

        Ok(Arc::new(Self {
            surface,
            transport,
            inner: Mutex::new(WidgetState::default()),
            turn_in_flight: AtomicBool::new(false),
        }))
    }

    /// Returns `Some` only for events that submitted a turn.
    pub async fn handle_event(&self, event: WidgetEvent) -> Option<SubmitOutcome> {
        match event {
            WidgetEvent::IconClicked => {
                self.toggle().await;
                None
            }
            WidgetEvent::SendClicked => Some(self.submit_turn().await),
            WidgetEvent::KeyPressed(key) if key == SUBMIT_KEY => Some(self.submit_turn().await),
            WidgetEvent::KeyPressed(_) => None,
            WidgetEvent::InputChanged(text) => {
                self.set_input(text).await;
                None
            }
        }
    }

    /// Flips panel visibility and returns the new state.
    pub async fn toggle(&self) -> bool {
        let mut state = self.inner.lock().await;
        state.panel_visible = !state.panel_visible;
        self.surface.show_panel(state.panel_visible);
        state.panel_visible
    }

    pub async fn is_panel_visible(&self) -> bool {
        self.inner.lock().await.panel_visible
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        self.inner.lock().await.input = text.into();
    }

    pub async fn input(&self) -> String {
        self.inner.lock().await.input.clone()
    }

    pub async fn is_turn_in_flight(&self) -> bool {
        self.turn_in_flight.load(Ordering::SeqCst)
    }

    pub async fn transcript(&self) -> Transcript {
        self.inner.lock().await.transcript.clone()
    }

    pub async fn submit_turn(&self) -> SubmitOutcome {
        let (message, status_id) = {
            let mut state = self.inner.lock().await;
            let message = state.input.trim().to_string();
            if message.is_empty() {
                return SubmitOutcome::Ignored;
            }
            if self.turn_in_flight.load(Ordering::SeqCst) {
                debug!("turn already in flight; submission refused");
                return SubmitOutcome::Busy;
            }

            state.transcript.append(EntryRole::User, message.clone());
            state.input.clear();
            self.surface.set_input("");

            let status_id = state
                .transcript
                .append(EntryRole::SystemStatus, TYPING_INDICATOR_TEXT);
            self.turn_in_flight.store(true, Ordering::SeqCst);
            self.surface.set_submit_enabled(false);
            self.present(&state);
            (message, status_id)
        };
        let mut guard = TurnGuard {
            widget: self,
            status_id,
            armed: true,
        };

        let reply = match self.transport.exchange(&message).await {
            Ok(response) => response.reply_text().unwrap_or(NO_RESPONSE_TEXT).to_string(),
            Err(error) => {
                error!(%error, "chat exchange failed");
                CONNECTION_ERROR_TEXT.to_string()
            }
        };

        let mut state = self.inner.lock().await;
        guard.armed = false;
        state.transcript.remove(status_id);
        state.transcript.append(EntryRole::Bot, reply.clone());
        self.turn_in_flight.store(false, Ordering::SeqCst);
        self.surface.set_submit_enabled(true);
        self.present(&state);

        SubmitOutcome::Completed { reply }
    }

    fn present(&self, state: &WidgetState) {
        self.surface.render_transcript(&render(&state.transcript));
        self.surface.scroll_to_end();
    }
}

/// Releases the in-flight turn if `submit_turn` is dropped before the reply
/// is recorded.
struct TurnGuard<'a> {
    widget: &'a ChatWidget,
    status_id: EntryId,
    armed: bool,
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        debug!("turn dropped before its reply arrived");
        self.widget.turn_in_flight.store(false, Ordering::SeqCst);
        self.widget.surface.set_submit_enabled(true);
        match self.widget.inner.try_lock() {
            Ok(mut state) => {
                state.transcript.remove(self.status_id);
                self.widget.present(&state);
            }
            Err(_) => warn!("widget state busy; typing indicator left in transcript"),
        }
    }
}

#[cfg(test)]
#[path = "tests/widget_tests.rs"]
mod tests;
