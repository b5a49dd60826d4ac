use async_trait::async_trait;
use std::fmt;

use crate::agent::{Agent, AgentError};

/// Identifies one of the fixed agents in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentId {
    Web,
    Finance,
    General,
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentId::Web => write!(f, "web"),
            AgentId::Finance => write!(f, "finance"),
            AgentId::General => write!(f, "general"),
        }
    }
}

/// The coordinator's view of "run an agent": an opaque capability that
/// blocks until a complete text result or an error is available.
///
/// Tool attachment, model selection, and conversation history belong to the
/// implementation behind this boundary. Tests substitute scripted
/// implementations; production uses [`Agent`].
#[async_trait]
pub trait Capability: Send {
    async fn invoke(&mut self, prompt: &str) -> Result<String, AgentError>;
}

#[async_trait]
impl Capability for Agent {
    async fn invoke(&mut self, prompt: &str) -> Result<String, AgentError> {
        let message = self.run(prompt).await?;
        message
            .content
            .ok_or_else(|| AgentError::Runtime("model response contained no content".into()))
    }
}
