//! Test doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::client::StorefrontClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::session::MemorySessionStore;
use crate::transport::Transport;

/// Records every request and replays queued responses in order.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn push(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }
}

impl Transport for StubTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApiError::Transport("no stub response queued".to_string()))
    }
}

pub fn response(status: u16, status_text: &str, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        status_text: status_text.to_string(),
        headers: Vec::new(),
        body: body.to_string(),
    }
}

pub fn stub_client(
    base_host: &str,
) -> (StorefrontClient, Arc<StubTransport>, Arc<MemorySessionStore>) {
    let transport = Arc::new(StubTransport::default());
    let session = Arc::new(MemorySessionStore::new());
    let client = StorefrontClient::new(
        &ClientConfig::new(base_host),
        session.clone(),
        transport.clone(),
    );
    (client, transport, session)
}
