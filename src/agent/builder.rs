use crate::agent::agent::Agent;
use crate::agent::error::AgentBuildError;
use crate::agent::spec::AgentSpec;
use crate::services::llm::models::base::{InferenceOptions, Message};
use crate::services::llm::{ClientConfig, InferenceClient};
use crate::tools::{Tool, ToolRegistry};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const DEFAULT_MAX_TOOL_ROUNDS: usize = 4;

/// A builder for [`Agent`].
///
/// Allows configuration of model, endpoint, tools, sampling options, etc.
/// Uses the builder pattern so you can chain calls.
///
/// Example:
///
/// ```
/// use troupe::AgentBuilder;
///
/// let agent = AgentBuilder::default()
///     // model must be set, everything else has
///     // defaults and is optional
///     .set_model("llama3.2")
///     .set_system_prompt("You are a helpful assistant.")
///     .set_temperature(0.6)
///     .build();
/// ```
#[derive(Default)]
pub struct AgentBuilder {
    /// Name used for logging and defaults.
    name: Option<String>,
    /// Model identifier passed to the LLM provider.
    model: Option<String>,
    /// Connection settings for the inference backend.
    client_config: Option<ClientConfig>,
    /// Raw system prompt string seeded into history.
    system_prompt: Option<String>,
    /// Tools the agent can call during a run.
    tools: Option<Vec<Tool>>,
    /// Sampling parameters.
    options: InferenceOptions,
    /// Safety cap on tool-call rounds per run.
    max_tool_rounds: Option<usize>,
    /// Clear conversation history before each run.
    clear_history_on_run: Option<bool>,
    /// Deferred error from spec resolution, surfaced at build.
    spec_error: Option<AgentBuildError>,
}

impl AgentBuilder {
    pub fn set_name<T: Into<String>>(mut self, name: T) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_model<T: Into<String>>(mut self, model: T) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn set_client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = Some(config);
        self
    }

    pub fn set_system_prompt<T: Into<String>>(mut self, prompt: T) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Apply an [`AgentSpec`]: name, system prompt, and tool set.
    ///
    /// Tool ids are resolved strictly against `registry`; an unknown id
    /// fails the eventual [`build`](Self::build) with
    /// [`AgentBuildError::UnknownTool`].
    pub fn from_spec(mut self, spec: AgentSpec, registry: &ToolRegistry) -> Self {
        let mut resolved = Vec::with_capacity(spec.tools.len());
        for id in &spec.tools {
            match registry.get(id) {
                Some(tool) => resolved.push(tool.clone()),
                None => {
                    self.spec_error = Some(AgentBuildError::UnknownTool(id.clone()));
                    return self;
                }
            }
        }

        self.name = Some(spec.name.clone());
        self.system_prompt = Some(spec.system_prompt());
        if !resolved.is_empty() {
            self.tools = Some(resolved);
        }
        self
    }

    pub fn add_tool(mut self, tool: Tool) -> Self {
        self.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }

    pub fn set_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn set_top_p(mut self, top_p: f32) -> Self {
        self.options.top_p = Some(top_p);
        self
    }

    pub fn set_top_k(mut self, top_k: u32) -> Self {
        self.options.top_k = Some(top_k);
        self
    }

    pub fn set_num_ctx(mut self, num_ctx: u32) -> Self {
        self.options.num_ctx = Some(num_ctx);
        self
    }

    pub fn set_seed(mut self, seed: i32) -> Self {
        self.options.seed = Some(seed);
        self
    }

    pub fn set_num_predict(mut self, num_predict: i32) -> Self {
        self.options.num_predict = Some(num_predict);
        self
    }

    pub fn set_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = Some(rounds);
        self
    }

    pub fn set_clear_history_on_run(mut self, clear: bool) -> Self {
        self.clear_history_on_run = Some(clear);
        self
    }

    /// Consume the builder and construct the [`Agent`].
    pub fn build(self) -> Result<Agent, AgentBuildError> {
        if let Some(err) = self.spec_error {
            return Err(err);
        }
        let Some(model) = self.model else {
            return Err(AgentBuildError::ModelNotSet);
        };

        let system_prompt = self
            .system_prompt
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        let client_config = self.client_config.unwrap_or_default();

        Ok(Agent {
            name: self.name.unwrap_or_else(|| model.clone()),
            model,
            history: vec![Message::system(system_prompt.clone())],
            tools: self.tools,
            options: self.options,
            system_prompt,
            max_tool_rounds: self.max_tool_rounds.unwrap_or(DEFAULT_MAX_TOOL_ROUNDS),
            clear_history_on_run: self.clear_history_on_run.unwrap_or(false),
            model_client: InferenceClient::try_from(client_config)?,
        })
    }
}
