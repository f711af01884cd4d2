use crate::transcript::RenderedMessage;

pub const CHAT_ICON: &str = "#chatbot-icon";
pub const CHAT_PANEL: &str = "#chatbox";
pub const CHAT_INPUT: &str = "#user-input";
pub const SEND_BUTTON: &str = "#chat-footer button";
pub const MESSAGE_LIST: &str = "#messages";

/// Elements the widget cannot work without.
pub const REQUIRED_ELEMENTS: [&str; 5] = [CHAT_ICON, CHAT_PANEL, CHAT_INPUT, SEND_BUTTON, MESSAGE_LIST];

/// Whatever displays the chat widget: a DOM page, a terminal, a test recorder.
///
/// Calls are made from the controller while it holds its state lock, so
/// implementations must not call back into the widget.
pub trait ChatSurface: Send + Sync {
    fn has_element(&self, selector: &str) -> bool;
    fn show_panel(&self, visible: bool);
    fn render_transcript(&self, messages: &[RenderedMessage]);
    fn set_input(&self, text: &str);
    fn set_submit_enabled(&self, enabled: bool);
    fn scroll_to_end(&self);
}

pub fn missing_elements(surface: &dyn ChatSurface) -> Vec<&'static str> {
    REQUIRED_ELEMENTS
        .into_iter()
        .filter(|selector| !surface.has_element(selector))
        .collect()
}
