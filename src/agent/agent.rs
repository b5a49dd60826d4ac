use core::fmt;

use tracing::instrument;

use crate::agent::error::AgentError;
use crate::agent::invocations::{call_model, call_tools};
use crate::services::llm::models::base::{InferenceOptions, Message};
use crate::services::llm::InferenceClient;
use crate::tools::Tool;

/// A named capability that turns a natural-language prompt into a text
/// response, possibly using tools, keeping conversation history across
/// invocations.
#[derive(Clone)]
pub struct Agent {
    /// Human-readable name of the agent.
    pub name: String,
    /// Underlying model identifier.
    pub model: String,
    /// Conversation history with the model, seeded with the system prompt.
    pub history: Vec<Message>,
    /// Tools the model may call during a run.
    pub tools: Option<Vec<Tool>>,
    /// Sampling parameters forwarded on every request.
    pub options: InferenceOptions,
    /// System prompt injected at the start of the conversation.
    pub system_prompt: String,
    /// Upper bound on tool-call rounds within one run.
    pub max_tool_rounds: usize,
    /// If true, clears history before every run.
    pub clear_history_on_run: bool,
    /// Backend model client.
    pub(crate) model_client: InferenceClient,
}

impl Agent {
    /// Run the agent on a raw prompt string.
    ///
    /// The prompt is appended to history as a user message and sent to the
    /// model. If the model requests tool calls, they are executed and their
    /// outputs fed back, up to `max_tool_rounds` times; the final round is
    /// made with tools disabled so the model must answer in text.
    ///
    /// Returns the final assistant [`Message`].
    #[instrument(level = "debug", skip(self, prompt), fields(agent_name = %self.name))]
    pub async fn run<T>(&mut self, prompt: T) -> Result<Message, AgentError>
    where
        T: Into<String>,
    {
        if self.clear_history_on_run {
            self.clear_history();
        }

        let checkpoint = self.history.len();
        self.history.push(Message::user(prompt.into()));

        match self.drive().await {
            Ok(message) => Ok(message),
            Err(e) => {
                // a failed run must not leave a dangling unanswered turn
                // in the history carried into the next query
                self.history.truncate(checkpoint);
                Err(e)
            }
        }
    }

    async fn drive(&mut self) -> Result<Message, AgentError> {
        let mut response = call_model(self, true).await?;
        let mut rounds = 0;
        while let Some(calls) = response.message.tool_calls.clone() {
            if rounds >= self.max_tool_rounds {
                return Err(AgentError::Runtime(format!(
                    "model kept requesting tools after {} rounds",
                    self.max_tool_rounds
                )));
            }
            rounds += 1;
            for tool_msg in call_tools(self, &calls).await {
                self.history.push(tool_msg);
            }
            response = call_model(self, rounds < self.max_tool_rounds).await?;
        }

        Ok(response.message)
    }

    /// Reset conversation history to contain only the system prompt.
    pub fn clear_history(&mut self) {
        self.history = vec![Message::system(self.system_prompt.clone())];
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("history", &self.history)
            .field("tools", &self.tools)
            .field("options", &self.options)
            .field("system_prompt", &self.system_prompt)
            .field("max_tool_rounds", &self.max_tool_rounds)
            .field("clear_history_on_run", &self.clear_history_on_run)
            .finish()
    }
}
