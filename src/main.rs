use anyhow::Result;
use tracing::info;

use troupe::server::{serve, AppState};
use troupe::{
    calculator_tool, init_default_tracing, Agent, AgentBuilder, AgentSpec, Config, Coordinator,
    ToolRegistry,
};

fn build_agent(spec: AgentSpec, config: &Config, registry: &ToolRegistry) -> Result<Agent> {
    let agent = AgentBuilder::default()
        .set_model(&config.model)
        .set_client_config(config.client_config())
        .from_spec(spec, registry)
        .build()?;
    Ok(agent)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_default_tracing();

    let config = Config::load()?;
    info!(model = %config.model, host = %config.host, "starting troupe");

    let mut registry = ToolRegistry::new();
    registry.register(calculator_tool());

    let web = build_agent(AgentSpec::web_research(), &config, &registry)?;
    let finance = build_agent(AgentSpec::finance(), &config, &registry)?;
    let general = build_agent(AgentSpec::general(), &config, &registry)?;

    let mut coordinator = Coordinator::new(config.router(), web, finance, general);
    if let Some(deadline) = config.deadline() {
        coordinator = coordinator.with_deadline(deadline);
    }

    serve(AppState::new(coordinator), config.bind_addr()?).await?;
    Ok(())
}
