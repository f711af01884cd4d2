use std::{collections::HashMap, fs, path::PathBuf};

use chatbot::{
    llm::{DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL},
    LlmSettings,
};
use tracing::warn;

pub const DEFAULT_RETRIEVAL_MIN_SCORE: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub knowledge_base_path: PathBuf,
    pub llm_base_url: String,
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub retrieval_min_score: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5000".into(),
            knowledge_base_path: PathBuf::from("./data/responses.json"),
            llm_base_url: DEFAULT_LLM_BASE_URL.into(),
            llm_api_key: None,
            llm_model: DEFAULT_LLM_MODEL.into(),
            retrieval_min_score: DEFAULT_RETRIEVAL_MIN_SCORE,
        }
    }
}

impl Settings {
    pub fn llm_settings(&self) -> LlmSettings {
        LlmSettings {
            base_url: self.llm_base_url.clone(),
            api_key: self.llm_api_key.clone(),
            model: self.llm_model.clone(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(cfg) => cfg,
        Err(error) => {
            warn!(%error, "ignoring malformed server.toml");
            return;
        }
    };

    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("knowledge_base") {
        settings.knowledge_base_path = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("llm_base_url") {
        settings.llm_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("llm_model") {
        settings.llm_model = v.clone();
    }
    if let Some(v) = file_cfg.get("retrieval_min_score") {
        set_min_score(settings, v);
    }
}

pub(crate) fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("CHATBOT_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("CHATBOT_KNOWLEDGE_BASE") {
        settings.knowledge_base_path = PathBuf::from(v);
    }
    if let Some(v) = var("APP__KNOWLEDGE_BASE") {
        settings.knowledge_base_path = PathBuf::from(v);
    }

    if let Some(v) = var("OPENAI_API_KEY") {
        settings.llm_api_key = Some(v).filter(|key| !key.trim().is_empty());
    }
    if let Some(v) = var("OPENAI_BASE_URL") {
        settings.llm_base_url = v;
    }
    if let Some(v) = var("APP__LLM_MODEL") {
        settings.llm_model = v;
    }

    if let Some(v) = var("APP__RETRIEVAL_MIN_SCORE") {
        set_min_score(settings, &v);
    }
}

fn set_min_score(settings: &mut Settings, raw: &str) {
    match raw.trim().parse::<f64>() {
        Ok(score) if (0.0..=1.0).contains(&score) => settings.retrieval_min_score = score,
        _ => warn!(value = raw, "retrieval_min_score must be a number in [0, 1]; keeping {}", settings.retrieval_min_score),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
