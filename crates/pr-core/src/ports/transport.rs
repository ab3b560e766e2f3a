//! Registry transport port.
//!
//! One request in, one JSON document or one typed failure out. The adapter
//! never retries; the caller decides what a failure means.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// A single call against the registry service.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path relative to the configured base URL, starting with `/`.
    pub path: String,
    pub body: Option<Value>,
    /// Session credential, sent as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    /// Message used when a failed response carries no body text.
    pub fallback_error: &'static str,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            bearer: None,
            fallback_error: "Erro na requisição",
        }
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn with_fallback_error(mut self, message: &'static str) -> Self {
        self.fallback_error = message;
        self
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("body", &self.body)
            .field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
            .field("fallback_error", &self.fallback_error)
            .finish()
    }
}

/// Transport failure. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Non-2xx response; `message` is the body text or the endpoint fallback.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("falha de conexão: {0}")]
    Network(String),

    #[error("tempo limite excedido ao contatar o servidor")]
    Timeout,

    #[error("resposta inválida do servidor: {0}")]
    Decode(String),
}

impl TransportError {
    /// Builds the failure for a non-2xx response.
    ///
    /// The body text wins when it has any non-whitespace content.
    pub fn from_status(status: u16, body: String, fallback: &str) -> Self {
        let message = if body.trim().is_empty() {
            fallback.to_string()
        } else {
            body
        };
        TransportError::Status { status, message }
    }
}

#[async_trait]
pub trait RegistryTransportPort: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError>;
}
