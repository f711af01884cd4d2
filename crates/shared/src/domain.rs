use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(EntryId);

/// Pipeline stage that produced a chatbot answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseMethod {
    #[serde(rename = "Rule-Based")]
    RuleBased,
    #[serde(rename = "Intent-Based")]
    IntentBased,
    #[serde(rename = "RAG")]
    Retrieval,
    #[serde(rename = "LLM")]
    Llm,
}

impl ResponseMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RuleBased => "Rule-Based",
            Self::IntentBased => "Intent-Based",
            Self::Retrieval => "RAG",
            Self::Llm => "LLM",
        }
    }
}

impl fmt::Display for ResponseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
