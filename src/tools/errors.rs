/// Errors that can occur during execution of a tool.
#[derive(Debug)]
pub enum ToolExecutionError {
    /// The provided arguments failed schema validation.
    InvalidArguments(String),
    /// The tool failed during execution (runtime failure inside the tool).
    ExecutionFailed(String),
    /// The requested tool was not found in the agent's registry.
    ToolNotFound(String),
}

impl std::fmt::Display for ToolExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolExecutionError::InvalidArguments(s) => {
                write!(f, "Invalid tool arguments: {s}")
            }
            ToolExecutionError::ExecutionFailed(s) => write!(f, "Tool execution failed: {s}"),
            ToolExecutionError::ToolNotFound(s) => write!(f, "Tool not found: {s}"),
        }
    }
}

impl std::error::Error for ToolExecutionError {}
