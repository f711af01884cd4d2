use super::{apply_env, apply_file, Settings, DEFAULT_RETRIEVAL_MIN_SCORE};

use std::{collections::HashMap, path::PathBuf};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_match_the_widget_endpoint() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:5000");
    assert_eq!(settings.llm_model, "gpt-4");
    assert!(settings.llm_api_key.is_none());
    assert_eq!(settings.retrieval_min_score, DEFAULT_RETRIEVAL_MIN_SCORE);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:8080"
knowledge_base = "/srv/kb.json"
llm_model = "gpt-4o-mini"
retrieval_min_score = "0.5"
"#,
    );
    assert_eq!(settings.server_bind, "0.0.0.0:8080");
    assert_eq!(settings.knowledge_base_path, PathBuf::from("/srv/kb.json"));
    assert_eq!(settings.llm_model, "gpt-4o-mini");
    assert_eq!(settings.retrieval_min_score, 0.5);
}

#[test]
fn malformed_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "bind_addr = [1, 2");
    assert_eq!(settings.server_bind, "127.0.0.1:5000");
}

#[test]
fn app_prefixed_env_wins_over_short_names() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("CHATBOT_BIND", "127.0.0.1:6000"),
            ("APP__BIND_ADDR", "127.0.0.1:7000"),
            ("OPENAI_API_KEY", "sk-live"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:7000");
    assert_eq!(settings.llm_api_key.as_deref(), Some("sk-live"));
    assert_eq!(settings.llm_settings().api_key.as_deref(), Some("sk-live"));
}

#[test]
fn blank_api_key_and_bad_scores_are_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[("OPENAI_API_KEY", "   "), ("APP__RETRIEVAL_MIN_SCORE", "2.5")]),
    );
    assert!(settings.llm_api_key.is_none());
    assert_eq!(settings.retrieval_min_score, DEFAULT_RETRIEVAL_MIN_SCORE);
}
