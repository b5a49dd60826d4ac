use std::collections::HashMap;

use super::tool::{AsyncToolFn, Function, FunctionParameters, Property, Tool, ToolType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolBuilderError {
    MissingFunctionName,
    MissingFunctionDescription,
    MissingExecutor,
    /// A name was marked required without being declared as a property.
    UndeclaredRequiredProperty(String),
}

impl std::fmt::Display for ToolBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolBuilderError::MissingFunctionName => write!(f, "Function name is required."),
            ToolBuilderError::MissingFunctionDescription => {
                write!(f, "Function description is required.")
            }
            ToolBuilderError::MissingExecutor => {
                write!(f, "Executor function is required for the tool.")
            }
            ToolBuilderError::UndeclaredRequiredProperty(name) => {
                write!(f, "Required property '{name}' was never declared.")
            }
        }
    }
}

impl std::error::Error for ToolBuilderError {}

#[derive(Default)]
pub struct ToolBuilder {
    function_name: Option<String>,
    function_description: Option<String>,
    function_properties: HashMap<String, Property>,
    function_required: Vec<String>,
    executor: Option<AsyncToolFn>,
}

impl std::fmt::Debug for ToolBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolBuilder")
            .field("function_name", &self.function_name)
            .field("function_description", &self.function_description)
            .field("function_properties", &self.function_properties)
            .field("function_required", &self.function_required)
            .field("executor", &self.executor.as_ref().map(|_| "<async_fn>"))
            .finish()
    }
}

impl ToolBuilder {
    pub fn new() -> Self {
        ToolBuilder::default()
    }

    /// Sets the name of the function for the tool. (Required)
    pub fn function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    /// Sets the description of the function for the tool. (Required)
    pub fn function_description<T>(mut self, description: T) -> Self
    where
        T: Into<String>,
    {
        self.function_description = Some(description.into());
        self
    }

    /// Adds a property to the function's parameters.
    ///
    /// `property_type` is a JSON schema type ("string", "number", "boolean", ...).
    pub fn add_property(
        mut self,
        name: impl Into<String>,
        property_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.function_properties.insert(
            name.into(),
            Property {
                property_type: property_type.into(),
                description: description.into(),
            },
        );
        self
    }

    /// Marks a previously added property as required.
    pub fn add_required_property(mut self, name: impl Into<String>) -> Self {
        self.function_required.push(name.into());
        self
    }

    /// Sets the asynchronous executor function for the tool. (Required)
    pub fn executor(mut self, exec: AsyncToolFn) -> Self {
        self.executor = Some(exec);
        self
    }

    /// Consumes the builder and attempts to create a [`Tool`].
    pub fn build(self) -> Result<Tool, ToolBuilderError> {
        let function_name = self
            .function_name
            .ok_or(ToolBuilderError::MissingFunctionName)?;
        let function_description = self
            .function_description
            .ok_or(ToolBuilderError::MissingFunctionDescription)?;
        let executor = self.executor.ok_or(ToolBuilderError::MissingExecutor)?;

        for required in &self.function_required {
            if !self.function_properties.contains_key(required) {
                return Err(ToolBuilderError::UndeclaredRequiredProperty(
                    required.clone(),
                ));
            }
        }

        let parameters = FunctionParameters {
            param_type: "object".to_string(),
            properties: self.function_properties,
            required: self.function_required,
        };

        Ok(Tool {
            tool_type: ToolType::Function,
            function: Function {
                name: function_name,
                description: function_description,
                parameters,
            },
            executor,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn noop_executor() -> AsyncToolFn {
        Arc::new(|_| Box::pin(async { Ok("ok".to_string()) }))
    }

    #[test]
    fn build_fails_without_name() {
        let err = ToolBuilder::new()
            .function_description("d")
            .executor(noop_executor())
            .build()
            .unwrap_err();
        assert_eq!(err, ToolBuilderError::MissingFunctionName);
    }

    #[test]
    fn build_fails_without_executor() {
        let err = ToolBuilder::new()
            .function_name("f")
            .function_description("d")
            .build()
            .unwrap_err();
        assert_eq!(err, ToolBuilderError::MissingExecutor);
    }

    #[test]
    fn build_fails_on_undeclared_required() {
        let err = ToolBuilder::new()
            .function_name("f")
            .function_description("d")
            .add_required_property("ghost")
            .executor(noop_executor())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ToolBuilderError::UndeclaredRequiredProperty("ghost".into())
        );
    }

    #[test]
    fn build_minimal_succeeds() {
        let tool = ToolBuilder::new()
            .function_name("echo")
            .function_description("Echoes input")
            .add_property("text", "string", "text to echo")
            .add_required_property("text")
            .executor(noop_executor())
            .build()
            .unwrap();
        assert_eq!(tool.name(), "echo");
        assert_eq!(tool.function.parameters.required, vec!["text".to_string()]);
    }
}
