mod capability;
mod coordinator;
mod error;
mod router;

pub use capability::{AgentId, Capability};
pub use coordinator::{Coordinator, SpecialistOutput};
pub use error::WorkflowError;
pub use router::{Router, RoutingDecision, RECENCY_KEYWORDS, TICKER_TOKENS};
