use std::sync::Arc;

use crate::services::llm::client_config::{ClientConfig, Provider};
use crate::services::llm::models::{
    chat::{ChatRequest, ChatResponse},
    errors::InferenceClientError,
};
use crate::services::llm::providers::{
    ollama::OllamaClient, openai_compatible::OpenAiCompatibleClient,
};

#[derive(Debug, Clone)]
enum ClientInner {
    Ollama(OllamaClient),
    OpenAiCompatible(OpenAiCompatibleClient),
}

/// Provider-agnostic handle used by agents to talk to the model backend.
///
/// Cheap to clone; the underlying HTTP client is shared.
#[derive(Clone, Debug)]
pub struct InferenceClient {
    inner: Arc<ClientInner>,
}

impl InferenceClient {
    pub async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, InferenceClientError> {
        match &*self.inner {
            ClientInner::Ollama(c) => c.chat(req).await,
            ClientInner::OpenAiCompatible(c) => c.chat(req).await,
        }
    }
}

impl TryFrom<ClientConfig> for InferenceClient {
    type Error = InferenceClientError;

    fn try_from(cfg: ClientConfig) -> Result<Self, Self::Error> {
        let inner = match cfg.provider {
            Provider::Ollama => ClientInner::Ollama(OllamaClient::new(cfg)?),
            Provider::OpenAiCompatible => {
                ClientInner::OpenAiCompatible(OpenAiCompatibleClient::new(cfg)?)
            }
        };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }
}
