use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("failed to read knowledge base '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("knowledge base must be a JSON object of question/answer pairs: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("answer for question '{question}' must be a string")]
    NonStringAnswer { question: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
}

/// Question/answer pairs keyed by normalized question, in file order.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    index: HashMap<String, usize>,
}

/// Trims and lowercases a question the same way for stored keys and lookups.
pub fn normalize_question(text: &str) -> String {
    text.trim().to_lowercase()
}

impl KnowledgeBase {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KnowledgeBaseError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| KnowledgeBaseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, KnowledgeBaseError> {
        let object: Map<String, Value> = serde_json::from_str(raw)?;
        let mut pairs = Vec::with_capacity(object.len());
        for (question, answer) in object {
            match answer {
                Value::String(answer) => pairs.push((question, answer)),
                _ => return Err(KnowledgeBaseError::NonStringAnswer { question }),
            }
        }
        Ok(Self::from_pairs(pairs))
    }

    pub fn from_pairs<I, Q, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: AsRef<str>,
        A: Into<String>,
    {
        let mut kb = Self::default();
        for (question, answer) in pairs {
            let question = normalize_question(question.as_ref());
            if kb.index.contains_key(&question) {
                warn!(%question, "duplicate knowledge base question after normalization; keeping first");
                continue;
            }
            kb.index.insert(question.clone(), kb.entries.len());
            kb.entries.push(KnowledgeEntry {
                question,
                answer: answer.into(),
            });
        }
        kb
    }

    /// Exact lookup; `question` is normalized before matching.
    pub fn lookup(&self, question: &str) -> Option<&str> {
        self.index
            .get(&normalize_question(question))
            .map(|&idx| self.entries[idx].answer.as_str())
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn get(&self, idx: usize) -> Option<&KnowledgeEntry> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
