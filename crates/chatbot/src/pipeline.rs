use std::sync::Arc;

use shared::{domain::ResponseMethod, protocol::ChatResponse};
use tracing::debug;

use crate::{
    knowledge_base::{normalize_question, KnowledgeBase},
    responders::{IntentResponder, Responder, RetrievalResponder, RuleResponder},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub method: ResponseMethod,
}

impl From<Answer> for ChatResponse {
    fn from(answer: Answer) -> Self {
        ChatResponse::answered(answer.text, answer.method)
    }
}

/// Ordered responder stages; the first one that answers wins.
pub struct ChatPipeline {
    stages: Vec<Box<dyn Responder>>,
}

impl ChatPipeline {
    pub fn new(stages: Vec<Box<dyn Responder>>) -> Self {
        Self { stages }
    }

    /// Rule, intent and retrieval stages over `knowledge_base`. No network.
    pub fn offline(knowledge_base: Arc<KnowledgeBase>, retrieval_min_score: f64) -> Self {
        Self::new(vec![
            Box::new(RuleResponder::new(knowledge_base.clone())),
            Box::new(IntentResponder::new(knowledge_base.clone())),
            Box::new(RetrievalResponder::new(knowledge_base, retrieval_min_score)),
        ])
    }

    pub fn with_fallback(mut self, fallback: impl Responder + 'static) -> Self {
        self.stages.push(Box::new(fallback));
        self
    }

    pub fn methods(&self) -> Vec<ResponseMethod> {
        self.stages.iter().map(|stage| stage.method()).collect()
    }

    pub async fn answer(&self, message: &str) -> Option<Answer> {
        let input = normalize_question(message);
        for stage in &self.stages {
            if let Some(text) = stage.respond(&input).await {
                let method = stage.method();
                debug!(%method, "chat message answered");
                return Some(Answer { text, method });
            }
        }
        debug!("no pipeline stage answered");
        None
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
