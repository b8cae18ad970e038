//! Operations on the logged-in user's data.
//!
//! Each call reads the session at request time. A missing token sends the
//! request without `authorization`, and a missing user id renders as `null`
//! in the path. Either way the backend decides the failure status.

use std::borrow::Cow;

use serde_json::Value;

use crate::client::StorefrontClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::session::Session;
use crate::types::{Order, User};

fn user_id_segment(session: &Session) -> Cow<'static, str> {
    match &session.user_id {
        Some(id) => Cow::Owned(urlencoding::encode(&id.to_string()).into_owned()),
        None => Cow::Borrowed("null"),
    }
}

impl StorefrontClient {
    pub fn build_get_user(&self, session: &Session) -> HttpRequest {
        let path = format!("/600/users/{}", user_id_segment(session));
        self.build_request(HttpMethod::Get, &path, None, session.token.as_deref())
    }

    pub fn build_get_user_orders(&self, session: &Session) -> HttpRequest {
        let path = format!("/660/orders?user.id={}", user_id_segment(session));
        self.build_request(HttpMethod::Get, &path, None, session.token.as_deref())
    }

    pub fn build_create_order(
        &self,
        session: &Session,
        order: &Order,
    ) -> Result<HttpRequest, ApiError> {
        self.build_json_request(HttpMethod::Post, "/660/orders", order, session.token.as_deref())
    }

    /// Fetch the user the session belongs to.
    pub fn get_user(&self) -> Result<User, ApiError> {
        let request = self.build_get_user(&self.session.get());
        self.send(request)
    }

    /// Fetch the session user's orders in whatever shape the backend returns.
    pub fn get_user_orders(&self) -> Result<Value, ApiError> {
        let request = self.build_get_user_orders(&self.session.get());
        self.send(request)
    }

    /// Place an order for `cart_list`. `total` is sent as `amount_paid`
    /// without being checked against the cart.
    pub fn create_order(
        &self,
        cart_list: Vec<Value>,
        total: f64,
        user: &User,
    ) -> Result<Value, ApiError> {
        let order = Order::new(cart_list, total, user);
        let request = self.build_create_order(&self.session.get(), &order)?;
        self.send(request)
    }
}
