//! Storefront API client: request construction and response interpretation.
//!
//! # Design
//! `StorefrontClient` holds the base host plus two injected collaborators:
//! a `SessionStore` for the bearer token and user id, and a `Transport` that
//! performs the network round-trip. Every operation is split the same way:
//! a pure `build_*` method produces the `HttpRequest`, the transport executes
//! it exactly once, and the response is checked and decoded here. Operations
//! live in `auth`, `account` and `catalog` as further `impl` blocks.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, HttpError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::{MemorySessionStore, Session, SessionStore};
use crate::transport::{Transport, UreqTransport};

/// Client for the storefront REST backend.
///
/// Cloning is cheap; clones share the same session store and transport.
#[derive(Clone)]
pub struct StorefrontClient {
    base_host: String,
    pub(crate) session: Arc<dyn SessionStore>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for StorefrontClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorefrontClient")
            .field("base_host", &self.base_host)
            .finish_non_exhaustive()
    }
}

impl StorefrontClient {
    pub fn new(
        config: &ClientConfig,
        session: Arc<dyn SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_host: config.base_host.clone(),
            session,
            transport,
        }
    }

    /// Client with an in-memory session store and a `ureq` transport.
    pub fn with_defaults(config: &ClientConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemorySessionStore::new()),
            Arc::new(UreqTransport::new()),
        )
    }

    pub fn base_host(&self) -> &str {
        &self.base_host
    }

    /// Current session fields as the store reports them.
    pub fn session(&self) -> Session {
        self.session.get()
    }

    /// Build a request for `path` on the configured host.
    ///
    /// The URL is `base_host + path` verbatim, so `path` must start with `/`.
    /// `content-type: application/json` is always set; `authorization` only
    /// when a token is given.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        token: Option<&str>,
    ) -> HttpRequest {
        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
        if let Some(token) = token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_host),
            headers,
            body,
        }
    }

    pub(crate) fn build_json_request<T: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &T,
        token: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.build_request(method, path, Some(body), token))
    }

    pub(crate) fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request)
    }

    /// Execute `request` and decode a 2xx body as `T`.
    pub(crate) fn send<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        parse_json(self.execute(request)?)
    }
}

/// Map a non-2xx response to `HttpError` carrying its status and reason.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(HttpError {
        message: response.status_text.clone(),
        status: response.status,
    }
    .into())
}

/// Check the status, then parse the body as JSON.
pub fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
