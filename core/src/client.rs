//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! A `Transport` executes the round-trip in between, keeping this half
//! deterministic and free of I/O.

use std::fmt::Display;

use crate::envelope::{decode_todo_collection, Listing};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Fact, TodoInput};

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    /// An empty `base_url` produces relative paths such as `todos`, which no
    /// transport can reach; the failure surfaces when the request is executed.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if self.base_url.is_empty() {
            path.to_string()
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    pub fn build_create(&self, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.url("todos"), input)
    }

    pub fn build_get_all(&self) -> HttpRequest {
        bare_request(HttpMethod::Get, self.url("todos"))
    }

    /// `id` is interpolated as-is; callers must pass a path-safe value.
    pub fn build_update_for_id(
        &self,
        id: impl Display,
        input: &TodoInput,
    ) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.url(&format!("todos/{id}")), input)
    }

    pub fn build_remove_for_id(&self, id: impl Display) -> HttpRequest {
        bare_request(HttpMethod::Delete, self.url(&format!("todos/{id}")))
    }

    pub fn build_get_fact(&self) -> HttpRequest {
        bare_request(HttpMethod::Get, self.url("fact"))
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<HttpResponse, ApiError> {
        check_status(response)
    }

    pub fn parse_get_all(&self, response: HttpResponse) -> Result<Listing, ApiError> {
        let response = check_status(response)?;
        decode_todo_collection(&response.body)
    }

    pub fn parse_update_for_id(&self, response: HttpResponse) -> Result<HttpResponse, ApiError> {
        check_status(response)
    }

    pub fn parse_remove_for_id(&self, response: HttpResponse) -> Result<HttpResponse, ApiError> {
        check_status(response)
    }

    /// The fact is returned verbatim. An empty body is not JSON and fails.
    pub fn parse_get_fact(&self, response: HttpResponse) -> Result<Fact, ApiError> {
        let response = check_status(response)?;
        response.json()
    }
}

fn bare_request(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request(
    method: HttpMethod,
    path: String,
    input: &TodoInput,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![(
            JSON_CONTENT_TYPE.0.to_string(),
            JSON_CONTENT_TYPE.1.to_string(),
        )],
        body: Some(body),
    })
}

/// Pass 2xx responses through; everything else becomes `ApiError::Http`.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body,
    })
}
