use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use super::errors::ToolExecutionError;
use super::tool::{Function, FunctionParameters, Property, Tool, ToolType};

#[derive(Deserialize)]
struct CalculatorArgs {
    operation: String,
    a: f64,
    b: f64,
}

/// Built-in arithmetic tool attached to the finance agent so the model can
/// compute percentage changes and ratios instead of estimating them.
pub fn calculator_tool() -> Tool {
    let executor: super::tool::AsyncToolFn = Arc::new(|args: serde_json::Value| {
        Box::pin(async move {
            let args: CalculatorArgs = serde_json::from_value(args)
                .map_err(|e| ToolExecutionError::InvalidArguments(e.to_string()))?;

            let result = match args.operation.as_str() {
                "add" => args.a + args.b,
                "subtract" => args.a - args.b,
                "multiply" => args.a * args.b,
                "divide" => {
                    if args.b == 0.0 {
                        return Err(ToolExecutionError::ExecutionFailed(
                            "division by zero".into(),
                        ));
                    }
                    args.a / args.b
                }
                other => {
                    return Err(ToolExecutionError::InvalidArguments(format!(
                        "unknown operation '{other}'"
                    )))
                }
            };

            Ok(result.to_string())
        })
    });

    let properties = HashMap::from([
        (
            "operation".to_string(),
            Property {
                property_type: "string".into(),
                description: "One of: add, subtract, multiply, divide".into(),
            },
        ),
        (
            "a".to_string(),
            Property {
                property_type: "number".into(),
                description: "First operand".into(),
            },
        ),
        (
            "b".to_string(),
            Property {
                property_type: "number".into(),
                description: "Second operand".into(),
            },
        ),
    ]);

    Tool {
        tool_type: ToolType::Function,
        function: Function {
            name: "calculator".into(),
            description:
                "Performs basic arithmetic. Supported operations: add, subtract, multiply, divide."
                    .into(),
            parameters: FunctionParameters {
                param_type: "object".into(),
                properties,
                required: vec!["operation".into(), "a".into(), "b".into()],
            },
        },
        executor,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn adds_numbers() {
        let tool = calculator_tool();
        let out = tool
            .execute(json!({"operation": "add", "a": 2.0, "b": 3.5}))
            .await
            .unwrap();
        assert_eq!(out, "5.5");
    }

    #[tokio::test]
    async fn divide_by_zero_fails() {
        let tool = calculator_tool();
        let err = tool
            .execute(json!({"operation": "divide", "a": 1.0, "b": 0.0}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolExecutionError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn schema_rejects_missing_operand() {
        let tool = calculator_tool();
        let err = tool
            .execute(json!({"operation": "add", "a": 1.0}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolExecutionError::InvalidArguments(_)));
    }
}
