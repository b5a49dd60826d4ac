pub(crate) mod services;

pub mod agent;
pub mod config;
pub mod observability;
pub mod server;
pub mod tools;
pub mod workflow;

pub use agent::*;
pub use tools::*;
pub use workflow::*;

pub use config::{Config, ConfigError};
pub use observability::{init_default_tracing, init_tracing};
pub use services::llm::models::base::{InferenceOptions, Message, Role};
pub use services::llm::models::errors::InferenceClientError;
pub use services::llm::{ClientConfig, InferenceClient, Provider};
