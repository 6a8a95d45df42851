//! Domain DTOs for the todo API.
//!
//! # Design
//! These mirror the server's wire shape but are defined independently of the
//! mock-server crate; integration tests catch drift between the two. Unknown
//! fields (HAL `_links` and the like) are ignored on decode.
//!
//! `Todo` is owned by the server and only passed through here, so every field
//! tolerates whatever the server sends: any JSON id, a null or absent title,
//! an absent completion flag.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single todo item as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    /// Server-assigned; `Null` when absent.
    #[serde(default)]
    pub id: Value,
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl Todo {
    pub fn new(id: impl Into<Value>, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            completed: Some(completed),
        }
    }
}

/// Request body shared by create and update. Both fields are always sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    pub completed: bool,
}

impl TodoInput {
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
        }
    }
}

/// The auxiliary fact resource. No schema is assumed.
pub type Fact = serde_json::Value;
