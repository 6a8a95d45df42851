//! Unwrapping of the HAL collection envelope returned by the list endpoint.
//!
//! The server nests the collection under `_embedded.todos`. A body that is
//! empty or decodes to a falsy JSON value (`null`, `false`, `0`, `""`) is not
//! unwrapped at all: it comes back as [`Listing::Passthrough`] carrying the
//! raw text. This is deliberately not folded into an empty `Todos` so callers
//! can tell "the server sent nothing" apart from "the server sent no todos".

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::types::Todo;

/// Outcome of decoding a list-read response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// Records found under `_embedded.todos`, in server order.
    Todos(Vec<Todo>),
    /// Empty or falsy body, returned untouched.
    Passthrough(String),
}

impl Listing {
    /// The unwrapped records, or `None` for a passthrough body.
    pub fn todos(&self) -> Option<&[Todo]> {
        match self {
            Listing::Todos(todos) => Some(todos),
            Listing::Passthrough(_) => None,
        }
    }

    pub fn into_todos(self) -> Option<Vec<Todo>> {
        match self {
            Listing::Todos(todos) => Some(todos),
            Listing::Passthrough(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "_embedded")]
    embedded: Embedded,
}

#[derive(Deserialize)]
struct Embedded {
    todos: Vec<Todo>,
}

/// Decode a `GET todos` body into a [`Listing`].
///
/// Fails with [`ApiError::Deserialization`] when the body is not JSON or is a
/// truthy value without an `_embedded.todos` array of objects. The records
/// themselves are not validated.
pub fn decode_todo_collection(body: &str) -> Result<Listing, ApiError> {
    if body.is_empty() {
        return Ok(Listing::Passthrough(String::new()));
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    if is_falsy(&value) {
        return Ok(Listing::Passthrough(body.to_string()));
    }

    let envelope: Envelope =
        serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Ok(Listing::Todos(envelope.embedded.todos))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
