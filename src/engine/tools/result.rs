use serde_json::{Map, Value};

/// Shape of one worker's value for one tool, as seen by the merger.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult<'a> {
    Empty,
    Items(&'a [Value]),
    Map(&'a Map<String, Value>),
    /// Any other concrete value; carried through untouched.
    Scalar(&'a Value),
}

impl<'a> ToolResult<'a> {
    /// Null, `false`, zero, `""`, `[]` and `{}` all count as "no data".
    pub fn classify(value: Option<&'a Value>) -> Self {
        let Some(value) = value else {
            return ToolResult::Empty;
        };

        match value {
            Value::Null => ToolResult::Empty,
            Value::Bool(false) => ToolResult::Empty,
            Value::String(s) if s.is_empty() => ToolResult::Empty,
            Value::Number(n) if n.as_f64() == Some(0.0) => ToolResult::Empty,
            Value::Array(items) if items.is_empty() => ToolResult::Empty,
            Value::Object(map) if map.is_empty() => ToolResult::Empty,
            Value::Array(items) => ToolResult::Items(items),
            Value::Object(map) => ToolResult::Map(map),
            other => ToolResult::Scalar(other),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ToolResult::Empty)
    }
}
