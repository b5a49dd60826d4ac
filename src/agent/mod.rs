#[allow(clippy::module_inception)]
mod agent;
mod builder;
mod error;
mod invocations;
mod spec;

pub use agent::Agent;
pub use builder::AgentBuilder;
pub use error::{AgentBuildError, AgentError};
pub use spec::AgentSpec;
