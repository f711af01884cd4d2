use std::{collections::HashMap, fs};

use anyhow::{Context, Result};
use tracing::warn;
use url::Url;

use crate::transport::DEFAULT_CHAT_ENDPOINT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint: Url,
}

impl ClientSettings {
    pub fn with_endpoint(raw: &str) -> Result<Self> {
        Ok(Self {
            endpoint: parse_endpoint(raw)?,
        })
    }
}

pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid chat endpoint '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("chat endpoint must use http or https: '{raw}'");
    }
    Ok(url)
}

/// Default endpoint, then `chat.toml`, then `CHAT_ENDPOINT` / `APP__CHAT_ENDPOINT`.
pub fn load_client_settings() -> Result<ClientSettings> {
    let file = fs::read_to_string("chat.toml").ok();
    resolve_client_settings(file.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn resolve_client_settings(
    file: Option<&str>,
    var: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings> {
    let mut endpoint = DEFAULT_CHAT_ENDPOINT.to_string();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(cfg) => {
                if let Some(v) = cfg.get("endpoint") {
                    endpoint = v.clone();
                }
            }
            Err(error) => warn!(%error, "ignoring malformed chat.toml"),
        }
    }

    if let Some(v) = var("CHAT_ENDPOINT") {
        endpoint = v;
    }
    if let Some(v) = var("APP__CHAT_ENDPOINT") {
        endpoint = v;
    }

    ClientSettings::with_endpoint(&endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_chat_endpoint() {
        let settings = resolve_client_settings(None, |_| None).expect("settings");
        assert_eq!(settings.endpoint.as_str(), "http://127.0.0.1:5000/chat");
    }

    #[test]
    fn env_overrides_file() {
        let settings = resolve_client_settings(
            Some(r#"endpoint = "http://example.test/chat""#),
            |key| (key == "APP__CHAT_ENDPOINT").then(|| "https://bot.example.test/chat".to_string()),
        )
        .expect("settings");
        assert_eq!(settings.endpoint.as_str(), "https://bot.example.test/chat");

        let from_file = resolve_client_settings(Some(r#"endpoint = "http://example.test/chat""#), |_| None)
            .expect("settings");
        assert_eq!(from_file.endpoint.as_str(), "http://example.test/chat");
    }

    #[test]
    fn rejects_non_http_endpoints() {
        assert!(parse_endpoint("not a url").is_err());
        assert!(parse_endpoint("ftp://example.test/chat").is_err());
    }
}
