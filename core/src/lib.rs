//! Blocking API client for the storefront backend.
//!
//! # Overview
//! Covers authentication, the logged-in user's profile and orders, and the
//! public product catalog. Each operation issues exactly one HTTP request,
//! maps a non-2xx status to `HttpError`, and returns the decoded JSON body.
//! Login and registration persist the granted token and user id in the
//! injected `SessionStore`; logout clears it.
//!
//! # Design
//! - `StorefrontClient` builds `HttpRequest` values (`build_*`) and
//!   interprets `HttpResponse` values as plain data; a `Transport` does the
//!   I/O in between, so request shapes are testable without a server.
//! - Configuration is an explicit `ClientConfig`, not ambient environment.
//! - No retries, caching or timeouts are layered on top of the transport.

mod account;
mod auth;
mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::StorefrontClient;
pub use config::ClientConfig;
pub use error::{ApiError, HttpError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{MemorySessionStore, Session, SessionStore};
pub use transport::{Transport, UreqTransport};
pub use types::{Order, OrderUser, User, UserId};
