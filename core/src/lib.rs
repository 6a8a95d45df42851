//! Client for a remote todo REST service.
//!
//! # Overview
//! Five operations against a configured server: create, list, update and
//! remove todos, plus one auxiliary fact fetch. `TodoApi` is the entry point;
//! it binds an immutable `ClientConfig` (base URL, 30 s timeout) to a
//! `Transport` and exposes the operations as plain methods.
//!
//! # Design
//! - `TodoClient` is sans-IO: `build_*` produces an `HttpRequest`, `parse_*`
//!   consumes an `HttpResponse`. It never touches the network.
//! - `Transport` executes the round-trip. `UreqTransport` is the default.
//! - The list endpoint's HAL envelope is unwrapped by
//!   `decode_todo_collection`, which leaves empty or falsy bodies untouched.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::TodoApi;
pub use client::TodoClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT, SERVER_URL_VAR};
pub use envelope::{decode_todo_collection, Listing};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Fact, Todo, TodoInput};
