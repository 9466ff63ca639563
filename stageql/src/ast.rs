//! Abstract Syntax Tree for query documents

use serde::{Deserialize, Serialize};
use std::fmt;

/// The root operation a query document asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Every artist in the record set
    FetchAll,
    /// A single artist looked up by `id`
    FetchById,
    /// Artists whose categories contain `category`
    FetchByCategory,
    /// Artists whose location contains `location` (case-insensitive)
    FetchByLocation,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::FetchAll,
        Operation::FetchById,
        Operation::FetchByCategory,
        Operation::FetchByLocation,
    ];

    /// Root field name used by this operation in a query document
    pub fn root_field(&self) -> &'static str {
        match self {
            Operation::FetchAll => "artists",
            Operation::FetchById => "artist",
            Operation::FetchByCategory => "artistsByCategory",
            Operation::FetchByLocation => "artistsByLocation",
        }
    }

    /// Map a root field name back to its operation
    pub fn from_root_field(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.root_field() == name)
    }

    /// Name of the argument this operation reads, if any
    pub fn argument(&self) -> Option<&'static str> {
        match self {
            Operation::FetchAll => None,
            Operation::FetchById => Some("id"),
            Operation::FetchByCategory => Some("category"),
            Operation::FetchByLocation => Some("location"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::FetchAll => "fetch-all",
            Operation::FetchById => "fetch-by-id",
            Operation::FetchByCategory => "fetch-by-category",
            Operation::FetchByLocation => "fetch-by-location",
        };
        f.write_str(name)
    }
}

/// A fully parsed query document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDocument {
    /// Operation name after the `query` keyword (anonymous documents have none)
    pub name: Option<String>,
    /// Declared variables, e.g. `($id: ID!)`
    pub variables: Vec<VariableDef>,
    /// The single root field
    pub root: RootField,
    /// Flat list of fields selected under the root field
    pub fields: Vec<String>,
}

/// Variable declaration in the document header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDef {
    pub name: String,
    pub type_name: String,
    pub required: bool,
}

/// Root field with its arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootField {
    pub name: String,
    pub arguments: Vec<Argument>,
}

impl RootField {
    pub fn argument(&self, name: &str) -> Option<&ArgValue> {
        self.arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }
}

/// `name: value` pair on a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: ArgValue,
}

/// Argument value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    /// `$name` reference into the request variables
    Variable(String),
    String(String),
    Int(i64),
    Bool(bool),
    Null,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_field_roundtrip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_root_field(op.root_field()), Some(op));
        }
        assert_eq!(Operation::from_root_field("venues"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::FetchByCategory.to_string(), "fetch-by-category");
    }
}
