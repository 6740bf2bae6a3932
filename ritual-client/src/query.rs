//! Filter encoding for document list calls.

use serde::Serialize;

/// One filter in the backend's query facet.
///
/// Travels as a JSON string inside the repeated `queries[]` parameter, e.g.
/// `{"method":"equal","attribute":"user_id","values":["u1"]}`. The backend
/// supports more methods; the two constructors here are the only ones this
/// client needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    method: &'static str,
    attribute: &'static str,
    values: Vec<String>,
}

impl Query {
    pub fn equal(attribute: &'static str, value: impl Into<String>) -> Self {
        Self {
            method: "equal",
            attribute,
            values: vec![value.into()],
        }
    }

    pub fn greater_than_equal(attribute: &'static str, value: impl Into<String>) -> Self {
        Self {
            method: "greaterThanEqual",
            attribute,
            values: vec![value.into()],
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
