//! Utility helpers shared by built-in lookup tools.

use ragna_rs_protocol::ToolError;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Parse JSON args into a typed struct for tool calls.
pub(super) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|err| ToolError::InvalidArguments(err.to_string()))
}

/// Parse a derived `ToolInput` schema, falling back to an empty object schema.
pub(super) fn schema_from_str(schema: &str) -> Value {
    serde_json::from_str(schema).unwrap_or_else(|_| json!({ "type": "object" }))
}

#[cfg(test)]
mod tests {
    use super::{parse_args, schema_from_str};
    use pretty_assertions::assert_eq;
    use ragna_rs_protocol::ToolError;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Args {
        query: String,
    }

    #[test]
    fn parse_args_reports_invalid_arguments() {
        let args: Args = parse_args(json!({ "query": "rust" })).expect("args");
        assert_eq!(args.query, "rust");
        let err = parse_args::<Args>(json!({ "q": 1 })).expect_err("missing query");
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn schema_falls_back_on_invalid_json() {
        assert_eq!(schema_from_str("not json"), json!({ "type": "object" }));
    }
}
