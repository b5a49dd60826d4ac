use crate::agent::AgentError;
use crate::workflow::capability::AgentId;

/// Errors surfaced by a [`crate::Coordinator`] run.
///
/// A failed specialist or synthesizer call aborts the whole query; no
/// partial synthesis is attempted, so a failure is never silently reported
/// as "no relevant information found".
#[derive(Debug)]
pub enum WorkflowError {
    /// A selected agent failed to produce output.
    Agent { agent: AgentId, source: AgentError },
    /// The caller-provided overall deadline expired before synthesis.
    DeadlineExceeded,
}

impl std::fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowError::Agent { agent, source } => {
                write!(f, "{agent} agent invocation failed: {source}")
            }
            WorkflowError::DeadlineExceeded => write!(f, "workflow deadline exceeded"),
        }
    }
}

impl std::error::Error for WorkflowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkflowError::Agent { source, .. } => Some(source),
            WorkflowError::DeadlineExceeded => None,
        }
    }
}
