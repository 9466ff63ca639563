//! Request and response shapes of the in-process query entry point

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stageql::Operation;

/// `{ document, variables? }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub document: String,
    #[serde(default)]
    pub variables: Map<String, Value>,
    /// Explicit operation; skips classification of the document text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
}

impl QueryRequest {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            ..Default::default()
        }
    }

    /// Add one variable
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }
}

/// One failure entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryError {
    pub message: String,
}

/// `{ data, errors? }`
///
/// `data` is null whenever `errors` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<QueryError>>,
}

impl QueryResponse {
    pub fn ok(data: Value) -> Self {
        Self { data, errors: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: Value::Null,
            errors: Some(vec![QueryError {
                message: message.into(),
            }]),
        }
    }

    /// True when no error entry is present
    pub fn is_ok(&self) -> bool {
        self.errors.as_ref().map_or(true, |errors| errors.is_empty())
    }

    /// All error messages joined for logging
    pub fn error_message(&self) -> Option<String> {
        self.errors
            .as_ref()
            .filter(|errors| !errors.is_empty())
            .map(|errors| {
                errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
    }
}
