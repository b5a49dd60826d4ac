use std::net::SocketAddr;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::services::llm::{ClientConfig, Provider};
use crate::workflow::{Router, RECENCY_KEYWORDS, TICKER_TOKENS};

/// Explicit runtime configuration, constructed once at process start and
/// passed by reference into everything that needs it.
///
/// Layered from defaults, an optional `troupe.toml` in the working
/// directory, and `TROUPE_*` environment variables (highest precedence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Which chat dialect the backend speaks.
    pub provider: Provider,
    /// Base URL of the inference backend.
    pub host: String,
    /// Model identifier used by all three agents.
    pub model: String,
    /// API key, only needed for OpenAI-compatible backends.
    pub api_key: Option<String>,
    /// Address the HTTP endpoint binds to.
    pub bind: String,
    /// Overall per-query deadline in seconds; unset means no deadline.
    pub deadline_secs: Option<u64>,
    /// Router signal lists; defaults reproduce the reference heuristic.
    pub recency_keywords: Vec<String>,
    pub ticker_tokens: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::Ollama,
            host: "http://localhost:11434".into(),
            model: "llama3.2".into(),
            api_key: None,
            bind: "127.0.0.1:7777".into(),
            deadline_secs: None,
            recency_keywords: RECENCY_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            ticker_tokens: TICKER_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file("troupe.toml"))
            .merge(Env::prefixed("TROUPE_"))
            .extract()
            .map_err(ConfigError::Extract)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            provider: self.provider.clone(),
            base_url: Some(self.host.clone()),
            api_key: self.api_key.clone(),
            extra_headers: None,
        }
    }

    pub fn router(&self) -> Router {
        Router::new(&self.recency_keywords, &self.ticker_tokens)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(self.bind.clone()))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Extract(figment::Error),
    InvalidBindAddr(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Extract(e) => write!(f, "Failed to load configuration: {e}"),
            ConfigError::InvalidBindAddr(addr) => {
                write!(f, "Invalid bind address: '{addr}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Extract(e) => Some(e),
            ConfigError::InvalidBindAddr(_) => None,
        }
    }
}
