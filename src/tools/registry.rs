use std::collections::HashMap;

use super::tool::Tool;

/// Host-populated mapping from tool identifier to implementation.
///
/// Agent specs reference tools by identifier only; the host decides which
/// implementations exist in a given deployment. Resolution is strict:
/// a spec naming an unregistered id fails at agent build time.
#[derive(Default, Clone, Debug)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its function name.
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, id: &str) -> Option<&Tool> {
        self.tools.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tools.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::calculator::calculator_tool;

    #[test]
    fn register_and_lookup() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());
        registry.register(calculator_tool());
        assert!(registry.contains("calculator"));
        assert!(registry.get("yfinance").is_none());
    }
}
