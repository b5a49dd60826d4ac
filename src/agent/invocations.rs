use tracing::{error, info};

use crate::agent::agent::Agent;
use crate::agent::error::AgentError;
use crate::services::llm::models::base::Message;
use crate::services::llm::models::chat::{ChatRequest, ChatResponse};
use crate::tools::{ToolCall, ToolExecutionError};

/// Send the agent's current history to the model and append the response.
///
/// When `allow_tools` is false the request carries no tool definitions, so
/// the model is forced to answer in text.
pub(crate) async fn call_model(
    agent: &mut Agent,
    allow_tools: bool,
) -> Result<ChatResponse, AgentError> {
    let request = ChatRequest {
        model: agent.model.clone(),
        messages: agent.history.clone(),
        tools: if allow_tools { agent.tools.clone() } else { None },
        stream: false,
        options: Some(agent.options.clone()),
        keep_alive: None,
    };

    let response = agent.model_client.chat(request).await?;
    agent.history.push(response.message.clone());
    Ok(response)
}

/// Execute a batch of tool calls and return their messages.
///
/// For each [`ToolCall`] the corresponding tool is looked up in the agent's
/// tool set, its arguments validated against the declared schema and the
/// executor run. Failures become tool messages rather than hard errors so
/// the model can see what went wrong and retry.
pub(crate) async fn call_tools(agent: &Agent, tool_calls: &[ToolCall]) -> Vec<Message> {
    let mut results = Vec::new();

    let Some(available) = &agent.tools else {
        error!(agent = %agent.name, "model requested tools but none are attached");
        results.push(Message::tool(
            "No tools are available. Answer from your own knowledge.",
            "0".to_string(),
        ));
        return results;
    };

    for call in tool_calls {
        info!(
            target: "tool",
            tool = %call.function.name,
            id   = ?call.id,
            args = ?call.function.arguments,
            "executing tool call",
        );

        let Some(tool) = available
            .iter()
            .find(|t| t.function.name == call.function.name)
        else {
            let err = ToolExecutionError::ToolNotFound(call.function.name.clone());
            error!(tool = %call.function.name, "no corresponding tool found");
            results.push(Message::tool(
                err.to_string(),
                call.id.clone().unwrap_or_else(|| "0".to_string()),
            ));
            continue;
        };

        match tool.execute(call.function.arguments.clone()).await {
            Ok(output) => {
                results.push(Message::tool(
                    output,
                    call.id.clone().unwrap_or_else(|| call.function.name.clone()),
                ));
            }
            Err(e) => {
                error!(tool = %call.function.name, error = %e, "tool call failed");
                results.push(Message::tool(
                    format!("Error executing tool {}: {}", call.function.name, e),
                    call.id.clone().unwrap_or_else(|| call.function.name.clone()),
                ));
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::agent::builder::AgentBuilder;
    use crate::tools::{calculator_tool, ToolCallFunction, ToolRegistry};
    use crate::AgentSpec;

    fn finance_agent() -> Agent {
        let mut registry = ToolRegistry::new();
        registry.register(calculator_tool());
        AgentBuilder::default()
            .set_model("test-model")
            .from_spec(AgentSpec::finance(), &registry)
            .build()
            .unwrap()
    }

    fn call(name: &str, args: serde_json::Value) -> ToolCall {
        ToolCall {
            id: Some("call-1".into()),
            tool_type: Default::default(),
            function: ToolCallFunction {
                name: name.into(),
                arguments: args,
            },
        }
    }

    #[tokio::test]
    async fn executes_registered_tool() {
        let agent = finance_agent();
        let calls = [call("calculator", json!({"operation": "multiply", "a": 3.0, "b": 4.0}))];
        let messages = call_tools(&agent, &calls).await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content.as_deref(), Some("12"));
        assert_eq!(messages[0].tool_call_id.as_deref(), Some("call-1"));
    }

    #[tokio::test]
    async fn unknown_tool_becomes_tool_message() {
        let agent = finance_agent();
        let calls = [call("yfinance", json!({}))];
        let messages = call_tools(&agent, &calls).await;
        assert_eq!(messages.len(), 1);
        assert!(messages[0]
            .content
            .as_deref()
            .unwrap()
            .contains("Tool not found: yfinance"));
    }

    #[tokio::test]
    async fn invalid_arguments_reported_to_model() {
        let agent = finance_agent();
        let calls = [call("calculator", json!({"operation": "add"}))];
        let messages = call_tools(&agent, &calls).await;
        assert!(messages[0]
            .content
            .as_deref()
            .unwrap()
            .contains("Invalid tool arguments"));
    }
}
