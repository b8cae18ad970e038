//! Product catalog lookups. None of these need a session.

use std::fmt::Display;

use serde_json::Value;

use crate::client::StorefrontClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};

impl StorefrontClient {
    /// An absent or empty term still sends `name_like=`.
    pub fn build_product_list(&self, search_term: Option<&str>) -> HttpRequest {
        let term = urlencoding::encode(search_term.unwrap_or_default());
        let path = format!("/444/products?name_like={term}");
        self.build_request(HttpMethod::Get, &path, None, None)
    }

    pub fn build_product(&self, id: impl Display) -> HttpRequest {
        let path = format!("/444/products/{}", urlencoding::encode(&id.to_string()));
        self.build_request(HttpMethod::Get, &path, None, None)
    }

    pub fn build_featured_list(&self) -> HttpRequest {
        self.build_request(HttpMethod::Get, "/444/featured_products", None, None)
    }

    pub fn get_product_list(&self, search_term: Option<&str>) -> Result<Value, ApiError> {
        self.send(self.build_product_list(search_term))
    }

    /// A nonexistent id surfaces as the backend's error status.
    pub fn get_product(&self, id: impl Display) -> Result<Value, ApiError> {
        self.send(self.build_product(id))
    }

    pub fn get_featured_list(&self) -> Result<Value, ApiError> {
        self.send(self.build_featured_list())
    }
}
