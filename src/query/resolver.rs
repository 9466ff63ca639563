//! Query resolver over a fixed artist set
//!
//! [`Resolver::execute`] is the in-process query entry point. It reads the
//! field selection and operation from the request, resolves the operation
//! against its records, projects the result, and waits out a fixed latency
//! before answering. Failures never escape: they come back as an `errors`
//! entry with `data` set to null.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use stageql::{ArgValue, Operation, ParseError};
use thiserror::Error;

use super::projection::project;
use super::request::{QueryRequest, QueryResponse};
use crate::model::{Artist, Category};

/// Default simulated latency of the resolver path
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// How the resolver reads the operation and field list from a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Classification {
    /// Substring dispatch and line-based field extraction
    #[default]
    Heuristic,
    /// Full parse of the document; the root field names the operation
    Parsed,
}

/// Internal resolver failure, reported through the response error list
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("resolver threw: missing argument `{0}`")]
    MissingArgument(&'static str),

    #[error("resolver threw: argument `{0}` must be a string")]
    InvalidArgument(&'static str),

    #[error("resolver threw: {0}")]
    Parse(#[from] ParseError),

    #[error("resolver threw: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// What to run, and what to keep of the result
#[derive(Debug)]
struct Plan {
    operation: Operation,
    fields: Vec<String>,
    argument: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct Resolver {
    artists: Arc<[Artist]>,
    latency: Duration,
    classification: Classification,
}

impl Resolver {
    pub fn new(artists: impl Into<Arc<[Artist]>>) -> Self {
        Self {
            artists: artists.into(),
            latency: DEFAULT_LATENCY,
            classification: Classification::default(),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Answer a query request
    ///
    /// The latency is awaited whether or not resolution succeeded. Dropping
    /// the returned future discards the answer.
    pub async fn execute(&self, request: QueryRequest) -> QueryResponse {
        let result = self.resolve(&request);
        tokio::time::sleep(self.latency).await;

        match result {
            Ok(data) => QueryResponse::ok(data),
            Err(err) => {
                tracing::debug!(error = %err, "Query failed");
                QueryResponse::failed(err.to_string())
            }
        }
    }

    /// Resolve and project without the simulated latency
    pub fn resolve(&self, request: &QueryRequest) -> Result<Value, ResolverError> {
        let plan = self.plan(request)?;
        tracing::debug!(
            operation = %plan.operation,
            fields = plan.fields.len(),
            "Resolving query"
        );

        let data = self.dispatch(plan.operation, plan.argument.as_ref())?;
        Ok(project(&data, &plan.fields))
    }

    fn plan(&self, request: &QueryRequest) -> Result<Plan, ResolverError> {
        match self.classification {
            Classification::Heuristic => {
                let operation = request
                    .operation
                    .unwrap_or_else(|| stageql::classify(&request.document));
                let argument = operation
                    .argument()
                    .and_then(|name| request.variables.get(name).cloned());

                Ok(Plan {
                    operation,
                    fields: stageql::extract_fields(&request.document),
                    argument,
                })
            }
            Classification::Parsed => {
                let (doc, parsed) = stageql::parse_operation(&request.document)?;
                let operation = match request.operation.or(parsed) {
                    Some(operation) => operation,
                    None => return Err(ResolverError::UnknownOperation(doc.root.name)),
                };
                // Inline arguments win over same-named request variables
                let argument = operation.argument().and_then(|name| {
                    match doc.root.argument(name) {
                        Some(value) => bind(value, &request.variables),
                        None => request.variables.get(name).cloned(),
                    }
                });

                Ok(Plan {
                    operation,
                    fields: doc.fields,
                    argument,
                })
            }
        }
    }

    fn dispatch(&self, operation: Operation, argument: Option<&Value>) -> Result<Value, ResolverError> {
        let value = match operation {
            Operation::FetchAll => serde_json::to_value(&*self.artists)?,
            Operation::FetchById => {
                let id = required("id", argument)?;
                match self.artists.iter().find(|a| a.id == id) {
                    Some(artist) => serde_json::to_value(artist)?,
                    None => Value::Null,
                }
            }
            Operation::FetchByCategory => {
                let category = required("category", argument)?;
                let matches: Vec<&Artist> = match category.parse::<Category>() {
                    Ok(category) => self
                        .artists
                        .iter()
                        .filter(|a| a.has_category(category))
                        .collect(),
                    // No record can carry a category outside the vocabulary
                    Err(_) => Vec::new(),
                };
                serde_json::to_value(matches)?
            }
            Operation::FetchByLocation => {
                let needle = required("location", argument)?.to_lowercase();
                let matches: Vec<&Artist> = self
                    .artists
                    .iter()
                    .filter(|a| a.location.to_lowercase().contains(&needle))
                    .collect();
                serde_json::to_value(matches)?
            }
        };
        Ok(value)
    }
}

/// Resolve an inline argument against the request variables
fn bind(value: &ArgValue, variables: &Map<String, Value>) -> Option<Value> {
    match value {
        ArgValue::Variable(name) => variables.get(name).cloned(),
        ArgValue::String(s) => Some(Value::String(s.clone())),
        ArgValue::Int(n) => Some(Value::from(*n)),
        ArgValue::Bool(b) => Some(Value::Bool(*b)),
        ArgValue::Null => None,
    }
}

/// Numbers are accepted and read as their decimal text
fn required(name: &'static str, value: Option<&Value>) -> Result<String, ResolverError> {
    match value {
        None | Some(Value::Null) => Err(ResolverError::MissingArgument(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(ResolverError::InvalidArgument(name)),
    }
}
