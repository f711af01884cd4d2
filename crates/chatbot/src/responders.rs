use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::ResponseMethod;

use crate::{
    knowledge_base::KnowledgeBase,
    text::{trigram_vector, SparseVector, TfIdfVectorizer},
};

/// Intent matches must score strictly above this cosine similarity.
pub const INTENT_MIN_SCORE: f64 = 0.6;

/// One stage of the answer pipeline.
///
/// `input` is already trimmed and lowercased. Returning `None` hands the
/// message to the next stage.
#[async_trait]
pub trait Responder: Send + Sync {
    fn method(&self) -> ResponseMethod;
    async fn respond(&self, input: &str) -> Option<String>;
}

pub struct RuleResponder {
    knowledge_base: Arc<KnowledgeBase>,
}

impl RuleResponder {
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self { knowledge_base }
    }
}

#[async_trait]
impl Responder for RuleResponder {
    fn method(&self) -> ResponseMethod {
        ResponseMethod::RuleBased
    }

    async fn respond(&self, input: &str) -> Option<String> {
        self.knowledge_base
            .lookup(input)
            .filter(|answer| !answer.is_empty())
            .map(str::to_string)
    }
}

pub struct IntentResponder {
    knowledge_base: Arc<KnowledgeBase>,
    vectorizer: TfIdfVectorizer,
    question_vectors: Vec<SparseVector>,
}

impl IntentResponder {
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        let vectorizer = TfIdfVectorizer::fit(
            knowledge_base
                .entries()
                .iter()
                .map(|entry| entry.question.as_str()),
        );
        let question_vectors = knowledge_base
            .entries()
            .iter()
            .map(|entry| vectorizer.transform(&entry.question))
            .collect();
        Self {
            knowledge_base,
            vectorizer,
            question_vectors,
        }
    }
}

#[async_trait]
impl Responder for IntentResponder {
    fn method(&self) -> ResponseMethod {
        ResponseMethod::IntentBased
    }

    async fn respond(&self, input: &str) -> Option<String> {
        let query = self.vectorizer.transform(input);
        let (idx, score) = best_match(&query, &self.question_vectors)?;
        if score > INTENT_MIN_SCORE {
            answer_at(&self.knowledge_base, idx)
        } else {
            None
        }
    }
}

/// Nearest-question retrieval over character trigrams.
pub struct RetrievalResponder {
    knowledge_base: Arc<KnowledgeBase>,
    question_vectors: Vec<SparseVector>,
    min_score: f64,
}

impl RetrievalResponder {
    pub fn new(knowledge_base: Arc<KnowledgeBase>, min_score: f64) -> Self {
        let question_vectors = knowledge_base
            .entries()
            .iter()
            .map(|entry| trigram_vector(&entry.question))
            .collect();
        Self {
            knowledge_base,
            question_vectors,
            min_score,
        }
    }
}

#[async_trait]
impl Responder for RetrievalResponder {
    fn method(&self) -> ResponseMethod {
        ResponseMethod::Retrieval
    }

    async fn respond(&self, input: &str) -> Option<String> {
        let query = trigram_vector(input);
        let (idx, score) = best_match(&query, &self.question_vectors)?;
        if score >= self.min_score {
            answer_at(&self.knowledge_base, idx)
        } else {
            None
        }
    }
}

/// Stored answer for `idx`; an empty answer counts as no answer.
fn answer_at(knowledge_base: &KnowledgeBase, idx: usize) -> Option<String> {
    knowledge_base
        .get(idx)
        .filter(|entry| !entry.answer.is_empty())
        .map(|entry| entry.answer.clone())
}

/// Highest-scoring candidate; ties keep the earliest index.
fn best_match(query: &SparseVector, candidates: &[SparseVector]) -> Option<(usize, f64)> {
    candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| (idx, query.cosine(candidate)))
        .fold(None, |best, (idx, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((idx, score)),
        })
}
