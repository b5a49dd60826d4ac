use serde::{Deserialize, Serialize};

/// Rules shared by every agent in the troupe.
const COMMON_INSTRUCTIONS: [&str; 5] = [
    "You have a fixed role and defined capabilities.",
    "If the user asks about your skills, tools, or role, answer directly about yourself.",
    "Use tools only when external real-world information is required.",
    "Never show tool calls, JSON, logs, or internal reasoning.",
    "Always give a clear, human-readable final answer.",
];

/// Static description of an agent: who it is, how it should behave, and
/// which tools it is allowed to use. Built once at startup, immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub role: String,
    pub instructions: Vec<String>,
    /// Identifiers resolved against the host's [`crate::ToolRegistry`].
    pub tools: Vec<String>,
}

impl AgentSpec {
    pub fn new<N, R>(name: N, role: R) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        Self {
            name: name.into(),
            role: role.into(),
            instructions: COMMON_INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
            tools: Vec::new(),
        }
    }

    pub fn with_instructions<I, S>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions.extend(instructions.into_iter().map(Into::into));
        self
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools.extend(tools.into_iter().map(Into::into));
        self
    }

    /// Render role and instructions into a single system prompt.
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!("You are {}. {}.", self.name, self.role);
        for instruction in &self.instructions {
            prompt.push_str("\n- ");
            prompt.push_str(instruction);
        }
        prompt
    }

    /// Specialist that researches recent information on the open web.
    pub fn web_research() -> Self {
        AgentSpec::new(
            "Web Research Agent",
            "an agent that finds recent information and explains it clearly",
        )
        .with_instructions([
            "For recent news, current events, or trends, always use a web search tool.",
            "Always construct a clear, specific, non-empty search query.",
            "If a valid search query cannot be formed, do not call the search tool.",
        ])
    }

    /// Specialist that analyzes stocks and financial trends.
    pub fn finance() -> Self {
        AgentSpec::new(
            "Finance Agent",
            "an agent that analyzes stocks and financial trends",
        )
        .with_instructions([
            "When the user asks for a current stock price, always use live market data.",
            "Never answer stock prices from memory.",
            "Explain finance concepts simply and mention risks when discussing investments.",
        ])
        .with_tools(["calculator"])
    }

    /// Generalist that answers from reasoning alone and merges the
    /// specialists' findings into the final answer.
    pub fn general() -> Self {
        AgentSpec::new(
            "General Agent",
            "an agent that handles general questions and synthesizes final answers",
        )
        .with_instructions([
            "Answer from reasoning and internal knowledge.",
            "Do not use external tools.",
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_contains_role_and_instructions() {
        let spec = AgentSpec::web_research();
        let prompt = spec.system_prompt();
        assert!(prompt.starts_with("You are Web Research Agent."));
        assert!(prompt.contains("finds recent information"));
        assert!(prompt.contains("\n- Always give a clear, human-readable final answer."));
    }

    #[test]
    fn finance_spec_declares_calculator() {
        let spec = AgentSpec::finance();
        assert_eq!(spec.tools, vec!["calculator".to_string()]);
    }

    #[test]
    fn general_spec_has_no_tools() {
        assert!(AgentSpec::general().tools.is_empty());
    }
}
