use crate::services::llm::models::errors::InferenceClientError;
use crate::tools::ToolExecutionError;

/// Errors that can occur while running an [`crate::Agent`].
#[derive(Debug)]
pub enum AgentError {
    /// Failure inside the underlying LLM client.
    ModelClient(InferenceClientError),
    /// Errors that occur during agent construction.
    AgentBuild(AgentBuildError),
    /// A runtime failure (e.g. missing data, unexpected state).
    Runtime(String),
    /// A tool execution error.
    Tool(ToolExecutionError),
}

impl std::fmt::Display for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentError::ModelClient(e) => write!(f, "Model client error: {e}"),
            AgentError::AgentBuild(e) => write!(f, "Agent build error: {e}"),
            AgentError::Runtime(s) => write!(f, "Runtime error: {s}"),
            AgentError::Tool(e) => write!(f, "Tool error: {e}"),
        }
    }
}

impl std::error::Error for AgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AgentError::ModelClient(e) => Some(e),
            AgentError::AgentBuild(e) => Some(e),
            AgentError::Runtime(_) => None,
            AgentError::Tool(e) => Some(e),
        }
    }
}

impl From<InferenceClientError> for AgentError {
    fn from(err: InferenceClientError) -> Self {
        AgentError::ModelClient(err)
    }
}

impl From<AgentBuildError> for AgentError {
    fn from(err: AgentBuildError) -> Self {
        AgentError::AgentBuild(err)
    }
}

impl From<ToolExecutionError> for AgentError {
    fn from(err: ToolExecutionError) -> Self {
        AgentError::Tool(err)
    }
}

/// Errors that can occur while building an [`crate::Agent`].
#[derive(Debug)]
pub enum AgentBuildError {
    /// Required model was not set on the builder.
    ModelNotSet,
    /// An agent spec referenced a tool id missing from the registry.
    UnknownTool(String),
    /// Failure initializing the underlying model client.
    ModelClient(InferenceClientError),
}

impl std::fmt::Display for AgentBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentBuildError::ModelNotSet => write!(f, "Model not set."),
            AgentBuildError::UnknownTool(id) => {
                write!(f, "Tool '{id}' is not registered in the tool registry.")
            }
            AgentBuildError::ModelClient(e) => write!(f, "Model client error: {e}"),
        }
    }
}

impl From<InferenceClientError> for AgentBuildError {
    fn from(err: InferenceClientError) -> Self {
        AgentBuildError::ModelClient(err)
    }
}

impl std::error::Error for AgentBuildError {}
