mod builder;
mod calculator;
mod errors;
mod registry;
mod tool;

pub use builder::{ToolBuilder, ToolBuilderError};
pub use calculator::calculator_tool;
pub use errors::ToolExecutionError;
pub use registry::ToolRegistry;
pub use tool::{
    AsyncToolFn, Function, FunctionParameters, Property, Tool, ToolCall, ToolCallFunction,
    ToolType,
};
