//! Answer pipeline behind the portfolio chatbot endpoint.
//!
//! A message is normalized once and offered to each stage in order: exact
//! knowledge-base lookup, TF-IDF intent matching, trigram retrieval and
//! finally a language-model fallback. The first stage that answers wins.

pub mod knowledge_base;
pub mod llm;
pub mod pipeline;
pub mod responders;
pub mod text;

pub use knowledge_base::{normalize_question, KnowledgeBase, KnowledgeBaseError, KnowledgeEntry};
pub use llm::{LlmClient, LlmError, LlmResponder, LlmSettings};
pub use pipeline::{Answer, ChatPipeline};
pub use responders::{
    IntentResponder, Responder, RetrievalResponder, RuleResponder, INTENT_MIN_SCORE,
};
