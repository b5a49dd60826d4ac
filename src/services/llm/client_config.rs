use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which chat-completion dialect the inference backend speaks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[default]
    Ollama,
    OpenAiCompatible,
}

/// Connection settings for an inference backend.
///
/// Constructed once from [`crate::Config`] and handed to every agent,
/// there are no ambient defaults read at call time.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub provider: Provider,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub extra_headers: Option<HashMap<String, String>>,
}

impl ClientConfig {
    pub fn ollama<T: Into<String>>(host: T) -> Self {
        Self {
            provider: Provider::Ollama,
            base_url: Some(host.into()),
            ..Default::default()
        }
    }

    pub fn openai_compatible<U, K>(base_url: U, api_key: K) -> Self
    where
        U: Into<String>,
        K: Into<String>,
    {
        Self {
            provider: Provider::OpenAiCompatible,
            base_url: Some(base_url.into()),
            api_key: Some(api_key.into()),
            extra_headers: None,
        }
    }
}
