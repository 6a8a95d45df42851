//! The five-operation facade bound to one immutable configuration.
//!
//! # Design
//! `TodoApi` pairs a `TodoClient` with a `Transport` and runs exactly one
//! `build -> execute -> parse` round-trip per call. There is no retry, no
//! fallback, and no state shared between calls beyond the configuration, so
//! clones of one facade can be driven from many threads at once.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::envelope::Listing;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Fact, TodoInput};

#[derive(Debug, Clone)]
pub struct TodoApi<T = UreqTransport> {
    client: TodoClient,
    config: ClientConfig,
    transport: T,
}

impl TodoApi<UreqTransport> {
    /// Bind `config` to a ureq transport using its timeout.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }

    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> TodoApi<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let client = TodoClient::new(config.base_url.as_deref().unwrap_or_default());
        Self {
            client,
            config,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `POST todos` with `{title: text, completed}`.
    pub fn create(&self, text: impl Into<String>, completed: bool) -> Result<HttpResponse, ApiError> {
        let request = self.client.build_create(&TodoInput::new(text, completed))?;
        let response = self.send(request)?;
        self.client.parse_create(response)
    }

    /// `GET todos`, unwrapped from its HAL envelope.
    pub fn get_all(&self) -> Result<Listing, ApiError> {
        let response = self.send(self.client.build_get_all())?;
        self.client.parse_get_all(response)
    }

    /// `PUT todos/{id}` with `{title: text, completed}`.
    pub fn update_for_id(
        &self,
        id: impl Display,
        text: impl Into<String>,
        completed: bool,
    ) -> Result<HttpResponse, ApiError> {
        let request = self
            .client
            .build_update_for_id(id, &TodoInput::new(text, completed))?;
        let response = self.send(request)?;
        self.client.parse_update_for_id(response)
    }

    /// `DELETE todos/{id}`.
    pub fn remove_for_id(&self, id: impl Display) -> Result<HttpResponse, ApiError> {
        let response = self.send(self.client.build_remove_for_id(id))?;
        self.client.parse_remove_for_id(response)
    }

    /// `GET fact`, returned verbatim.
    pub fn get_fact(&self) -> Result<Fact, ApiError> {
        let response = self.send(self.client.build_get_fact())?;
        self.client.parse_get_fact(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        debug!(method = method.as_str(), %path, "sending request");

        match self.transport.execute(request) {
            Ok(response) => {
                debug!(method = method.as_str(), %path, status = response.status, "received response");
                Ok(response)
            }
            Err(err) => {
                warn!(method = method.as_str(), %path, error = %err, "request failed");
                Err(err)
            }
        }
    }
}
