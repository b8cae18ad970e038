//! Request and response values exchanged between the client and a `Transport`.
//!
//! # Design
//! Requests and responses are plain data. `StorefrontClient::build_*` methods
//! produce `HttpRequest` values without touching the network; a `Transport`
//! executes them and hands back an `HttpResponse` for the client to interpret.
//!
//! All fields use owned types so values can be recorded, replayed from test
//! vectors, or moved across threads freely.

/// HTTP method for a request. The storefront API only reads and creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is the configured base host concatenated with the operation path.
/// With an empty base host it is a same-origin relative reference such as
/// `/login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase for `status`, e.g. `Not Found`.
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
