//! Client side of the portfolio chat widget.
//!
//! [`ChatWidget`] is the controller: it owns the transcript and input state
//! and drives a [`ChatSurface`] through a [`ChatTransport`]. The `page`
//! module holds the configuration for the page's decorative effects.

pub mod config;
pub mod page;
pub mod surface;
pub mod transcript;
pub mod transport;
pub mod widget;

pub use config::{load_client_settings, ClientSettings};
pub use surface::{ChatSurface, REQUIRED_ELEMENTS};
pub use transcript::{render, EntryRole, RenderedMessage, Transcript, TranscriptEntry};
pub use transport::{ChatTransport, HttpChatTransport, TransportError};
pub use widget::{ChatWidget, SubmitOutcome, WidgetError, WidgetEvent};
