use std::{collections::HashMap, fmt, future::Future, pin::Pin, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ToolExecutionError;

/// Defines the type of tool available. Currently, only 'function' is supported.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    #[default]
    Function,
}

/// Signature for an asynchronous tool executor function.
///
/// Accepts a JSON [`Value`] of arguments and produces a `String` result
/// or a [`ToolExecutionError`] if execution fails.
pub type AsyncToolFn = Arc<
    dyn Fn(Value) -> Pin<Box<dyn Future<Output = Result<String, ToolExecutionError>> + Send>>
        + Send
        + Sync,
>;

/// Placeholder executor used when a tool is deserialized without being
/// rehydrated with a real function.
fn default_executor() -> AsyncToolFn {
    Arc::new(|_| {
        Box::pin(async {
            Err(ToolExecutionError::ExecutionFailed(
                "tool was deserialized without an executor".into(),
            ))
        })
    })
}

/// Defines a tool (function) that the model can call.
#[derive(Serialize, Clone, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    pub function: Function,
    #[serde(skip, default = "default_executor")]
    pub executor: AsyncToolFn,
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("tool_type", &self.tool_type)
            .field("function", &self.function)
            .field("executor", &"<async_fn>")
            .finish()
    }
}

impl Tool {
    /// Validate arguments against the declared schema, then execute.
    ///
    /// Validation happens here rather than inside each executor so that a
    /// model emitting malformed arguments always gets a uniform, parseable
    /// error back instead of a tool-specific panic or silent misbehavior.
    pub async fn execute(&self, args: Value) -> Result<String, ToolExecutionError> {
        self.function.parameters.validate(&args)?;
        (self.executor)(args).await
    }

    /// Gets the name of the tool from its function definition.
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Defines a function, its description, and its arguments.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Function {
    pub name: String,
    pub description: String,
    pub parameters: FunctionParameters,
}

/// Defines the arguments for a function using a JSON schema-like structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FunctionParameters {
    #[serde(rename = "type")]
    pub param_type: String,
    pub properties: HashMap<String, Property>,
    pub required: Vec<String>,
}

impl FunctionParameters {
    /// Strict argument check: arguments must be a JSON object, every
    /// required property must be present, and every known property must
    /// match its declared type. Unknown properties are rejected.
    pub fn validate(&self, args: &Value) -> Result<(), ToolExecutionError> {
        let Some(obj) = args.as_object() else {
            return Err(ToolExecutionError::InvalidArguments(format!(
                "expected a JSON object, got: {args}"
            )));
        };

        for required in &self.required {
            if !obj.contains_key(required) {
                return Err(ToolExecutionError::InvalidArguments(format!(
                    "missing required argument '{required}'"
                )));
            }
        }

        for (key, value) in obj {
            let Some(prop) = self.properties.get(key) else {
                return Err(ToolExecutionError::InvalidArguments(format!(
                    "unknown argument '{key}'"
                )));
            };
            let matches = match prop.property_type.as_str() {
                "string" => value.is_string(),
                "number" => value.is_number(),
                "integer" => value.is_i64() || value.is_u64(),
                "boolean" => value.is_boolean(),
                "array" => value.is_array(),
                "object" => value.is_object(),
                _ => true,
            };
            if !matches {
                return Err(ToolExecutionError::InvalidArguments(format!(
                    "argument '{key}' should be of type {}, got: {value}",
                    prop.property_type
                )));
            }
        }

        Ok(())
    }
}

/// Defines a single property within function arguments.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Property {
    #[serde(rename = "type")]
    pub property_type: String,
    pub description: String,
}

/// Represents a tool call requested by the model.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ToolCall {
    /// Optional identifier for the tool call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The type of the tool. Some backends omit this field, so a
    /// default is supplied.
    #[serde(default, rename = "type")]
    pub tool_type: ToolType,
    /// Function being called.
    pub function: ToolCallFunction,
}

/// Contains the name and arguments for a function call.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ToolCallFunction {
    pub name: String,
    pub arguments: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params() -> FunctionParameters {
        FunctionParameters {
            param_type: "object".into(),
            properties: HashMap::from([
                (
                    "a".to_string(),
                    Property {
                        property_type: "number".into(),
                        description: "first operand".into(),
                    },
                ),
                (
                    "label".to_string(),
                    Property {
                        property_type: "string".into(),
                        description: "optional label".into(),
                    },
                ),
            ]),
            required: vec!["a".into()],
        }
    }

    #[test]
    fn accepts_valid_arguments() {
        assert!(params().validate(&json!({"a": 1.5, "label": "x"})).is_ok());
        assert!(params().validate(&json!({"a": 2})).is_ok());
    }

    #[test]
    fn rejects_missing_required() {
        let err = params().validate(&json!({"label": "x"})).unwrap_err();
        assert!(matches!(err, ToolExecutionError::InvalidArguments(_)));
    }

    #[test]
    fn rejects_wrong_type() {
        let err = params().validate(&json!({"a": "not a number"})).unwrap_err();
        assert!(matches!(err, ToolExecutionError::InvalidArguments(_)));
    }

    #[test]
    fn rejects_unknown_argument() {
        let err = params().validate(&json!({"a": 1, "extra": true})).unwrap_err();
        assert!(matches!(err, ToolExecutionError::InvalidArguments(_)));
    }

    #[test]
    fn rejects_non_object_arguments() {
        let err = params().validate(&json!("just a string")).unwrap_err();
        assert!(matches!(err, ToolExecutionError::InvalidArguments(_)));
    }
}
