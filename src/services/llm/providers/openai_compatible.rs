use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::services::llm::client_config::ClientConfig;
use crate::services::llm::models::base::{Message, Role};
use crate::services::llm::models::chat::{ChatRequest, ChatResponse};
use crate::services::llm::models::errors::InferenceClientError;
use crate::tools::{Tool, ToolCall, ToolCallFunction};

/// Client for any endpoint speaking the OpenAI chat-completions dialect
/// (OpenAI itself, OpenRouter, vLLM, llama.cpp server, ...).
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    client: Client,
    base_url: String,
}

impl OpenAiCompatibleClient {
    pub fn new(cfg: ClientConfig) -> Result<Self, InferenceClientError> {
        let api_key = cfg.api_key.ok_or_else(|| {
            InferenceClientError::Config("OpenAI-compatible backend requires api_key".into())
        })?;
        let base_url = cfg
            .base_url
            .ok_or_else(|| InferenceClientError::Config("OpenAI-compatible backend requires base_url".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| InferenceClientError::Config(format!("Invalid api_key header: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(extra) = cfg.extra_headers {
            for (k, v) in extra.into_iter() {
                let name = HeaderName::from_bytes(k.as_bytes())
                    .map_err(|_| InferenceClientError::Config(format!("Invalid header name: {k}")))?;
                let value = HeaderValue::from_str(&v)
                    .map_err(|_| InferenceClientError::Config(format!("Invalid header value for {k}")))?;
                headers.insert(name, value);
            }
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client, base_url })
    }

    fn map_messages(msgs: &[Message]) -> Vec<OaMessage> {
        msgs.iter()
            .map(|m| OaMessage {
                role: match m.role {
                    Role::System => "system".to_string(),
                    Role::User => "user".to_string(),
                    Role::Assistant => "assistant".to_string(),
                    Role::Tool => "tool".to_string(),
                },
                content: m.content.clone().unwrap_or_default(),
                tool_call_id: m.tool_call_id.clone(),
            })
            .collect()
    }

    #[instrument(name = "openai.chat", level = "debug", skip_all, fields(model = %req.model))]
    pub async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, InferenceClientError> {
        if req.stream {
            return Err(InferenceClientError::Unsupported(
                "streaming chat completions".into(),
            ));
        }

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = OaChatRequest::from(&req);

        let resp = self.client.post(url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(InferenceClientError::Api(format!(
                "Request failed: {status} - {text}"
            )));
        }

        let oa: OaChatResponse = serde_json::from_str(&text).map_err(|e| {
            InferenceClientError::Serialization(format!("decode error: {e}; raw: {text}"))
        })?;

        let choice = oa.choices.into_iter().next();
        let message = choice
            .as_ref()
            .map(|c| Message {
                role: Role::Assistant,
                content: c.message.content.clone(),
                tool_calls: c.message.tool_calls.as_ref().map(|calls| {
                    calls
                        .iter()
                        .map(|tc| ToolCall {
                            id: Some(tc.id.clone()),
                            tool_type: Default::default(),
                            function: ToolCallFunction {
                                name: tc.function.name.clone(),
                                arguments: serde_json::from_str(&tc.function.arguments)
                                    .unwrap_or(Value::String(tc.function.arguments.clone())),
                            },
                        })
                        .collect()
                }),
                tool_call_id: None,
            })
            .unwrap_or_else(|| Message::assistant(String::new()));

        Ok(ChatResponse {
            model: oa.model,
            created_at: oa.created.to_string(),
            message,
            done: true,
            done_reason: choice.and_then(|c| c.finish_reason),
            total_duration: None,
            prompt_eval_count: oa.usage.as_ref().map(|u| u.prompt_tokens),
            eval_count: oa.usage.as_ref().map(|u| u.completion_tokens),
        })
    }
}

#[derive(Serialize, Debug)]
struct OaChatRequest {
    model: String,
    messages: Vec<OaMessage>,
    // Tool serializes to the function-tool schema the dialect expects;
    // the executor is skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i32>,
    stream: bool,
}

impl From<&ChatRequest> for OaChatRequest {
    fn from(req: &ChatRequest) -> Self {
        let opts = req.options.clone().unwrap_or_default();
        Self {
            model: req.model.clone(),
            messages: OpenAiCompatibleClient::map_messages(&req.messages),
            tools: req.tools.clone(),
            temperature: opts.temperature,
            top_p: opts.top_p,
            max_tokens: opts.num_predict,
            stop: opts.stop,
            seed: opts.seed,
            stream: false,
        }
    }
}

#[derive(Serialize, Debug)]
struct OaMessage {
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct OaChatResponse {
    model: String,
    created: u64,
    choices: Vec<OaChoice>,
    usage: Option<OaUsage>,
}

#[derive(Deserialize, Debug)]
struct OaChoice {
    message: OaResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct OaResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<OaToolCall>>,
}

#[derive(Deserialize, Debug)]
struct OaToolCall {
    id: String,
    function: OaToolCallFunction,
}

#[derive(Deserialize, Debug)]
struct OaToolCallFunction {
    name: String,
    // OpenAI encodes arguments as a JSON string, not an object.
    arguments: String,
}

#[derive(Deserialize, Debug)]
struct OaUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
