use std::sync::Arc;

use chatbot::ChatPipeline;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pipeline: Arc<ChatPipeline>,
}
