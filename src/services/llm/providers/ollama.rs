use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, error, instrument};

use crate::services::llm::client_config::ClientConfig;
use crate::services::llm::models::{
    chat::{ChatRequest, ChatResponse},
    errors::InferenceClientError,
};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(cfg: ClientConfig) -> Result<Self, InferenceClientError> {
        let base_url = cfg.base_url.unwrap_or_else(|| DEFAULT_OLLAMA_URL.into());
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    async fn post<T, R>(&self, endpoint: &str, request_body: &T) -> Result<R, InferenceClientError>
    where
        T: serde::Serialize + fmt::Debug,
        R: DeserializeOwned + fmt::Debug,
    {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint);
        debug!(%url, "sending request to ollama");

        let response = self
            .client
            .post(&url)
            .json(request_body)
            .send()
            .await
            .map_err(|e| InferenceClientError::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".into());
            error!(%status, body = %error_text, "request failed");
            return Err(InferenceClientError::Api(format!(
                "Ollama request failed: {status} - {error_text}"
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| InferenceClientError::Api(format!("Failed to read response text: {e}")))?;

        match serde_json::from_str::<R>(&response_text) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                error!(%e, raw = %response_text, "deserialization error");
                Err(InferenceClientError::Serialization(format!(
                    "Error decoding response body: {e}. Raw JSON was: '{response_text}'"
                )))
            }
        }
    }

    #[instrument(name = "ollama.chat", level = "debug", skip_all, fields(model = %request.model))]
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, InferenceClientError> {
        self.post("/api/chat", &request).await
    }
}
