//! Login, registration and logout.
//!
//! A successful auth response that carries an `accessToken` replaces the
//! stored session with that token and `user.id`. A response without a token
//! is still returned to the caller but leaves the session untouched.

use serde::Serialize;
use serde_json::Value;

use crate::client::{parse_json, StorefrontClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::UserId;

/// Token text for a truthy `accessToken`: non-empty strings as-is, non-zero
/// numbers, `true`, arrays and objects as their JSON text.
fn access_token(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

impl StorefrontClient {
    pub fn build_login<C: Serialize + ?Sized>(&self, credentials: &C) -> Result<HttpRequest, ApiError> {
        self.build_json_request(HttpMethod::Post, "/login", credentials, None)
    }

    pub fn build_register<C: Serialize + ?Sized>(
        &self,
        credentials: &C,
    ) -> Result<HttpRequest, ApiError> {
        self.build_json_request(HttpMethod::Post, "/register", credentials, None)
    }

    /// Decode a login/register response and persist the session it grants.
    ///
    /// Any truthy `accessToken` grants a session; `user.id` is stored as
    /// whatever JSON the backend sent. Only a token without a `user` object
    /// is rejected. Returns the full response body.
    pub fn parse_auth(&self, response: HttpResponse) -> Result<Value, ApiError> {
        let data: Value = parse_json(response)?;
        match data.get("accessToken").and_then(access_token) {
            Some(token) => {
                let user = match data.get("user") {
                    None | Some(Value::Null) => return Err(ApiError::IncompleteAuth),
                    Some(user) => user,
                };
                let user_id = UserId::from(user.get("id").cloned().unwrap_or_default());
                self.session.set(&token, &user_id);
            }
            None => tracing::warn!("auth response has no access token, session left unchanged"),
        }
        Ok(data)
    }

    /// POST credentials to `/login`. Credentials are forwarded verbatim.
    pub fn login<C: Serialize + ?Sized>(&self, credentials: &C) -> Result<Value, ApiError> {
        let request = self.build_login(credentials)?;
        self.parse_auth(self.execute(request)?)
    }

    /// POST credentials to `/register`. Same session handling as `login`.
    pub fn register<C: Serialize + ?Sized>(&self, credentials: &C) -> Result<Value, ApiError> {
        let request = self.build_register(credentials)?;
        self.parse_auth(self.execute(request)?)
    }

    /// Forget the stored session. No request is made.
    pub fn logout(&self) {
        self.session.clear();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::session::{Session, SessionStore};
    use crate::testing::{response, stub_client};

    #[test]
    fn build_login_forwards_credentials_verbatim() {
        let (client, _, _) = stub_client("http://api");
        let creds = json!({"email": "a@b.com", "password": "x", "remember": true});
        let req = client.build_login(&creds).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://api/login");
        assert!(req.header("authorization").is_none());
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, creds);
    }

    #[test]
    fn login_stores_token_and_user_id() {
        let (client, transport, session) = stub_client("");
        let body = r#"{"accessToken":"T1","user":{"id":42}}"#;
        transport.push(response(200, "OK", body));

        let data = client.login(&json!({"email": "a@b.com", "password": "x"})).unwrap();

        assert_eq!(data, serde_json::from_str::<Value>(body).unwrap());
        assert_eq!(
            session.get(),
            Session {
                token: Some("T1".to_string()),
                user_id: Some(UserId::from(42)),
            }
        );
        assert_eq!(transport.last_request().url, "/login");
    }

    #[test]
    fn register_posts_to_register() {
        let (client, transport, session) = stub_client("");
        transport.push(response(
            201,
            "Created",
            r#"{"accessToken":"R1","user":{"id":"u-9","email":"n@b.com"}}"#,
        ));
        client.register(&json!({"email": "n@b.com", "password": "pw"})).unwrap();
        assert_eq!(transport.last_request().url, "/register");
        assert_eq!(session.get().user_id, Some(UserId::from("u-9")));
    }

    #[test]
    fn missing_token_leaves_session_unchanged() {
        let (client, transport, session) = stub_client("");
        session.set("OLD", &UserId::from(1));
        transport.push(response(200, "OK", r#"{"pending":"verification"}"#));

        let data = client.login(&json!({})).unwrap();

        assert_eq!(data, json!({"pending": "verification"}));
        assert_eq!(session.get().token.as_deref(), Some("OLD"));
    }

    #[test]
    fn token_without_user_is_incomplete() {
        for body in [r#"{"accessToken":"T1"}"#, r#"{"accessToken":"T1","user":null}"#] {
            let (client, transport, session) = stub_client("");
            transport.push(response(200, "OK", body));
            let err = client.login(&json!({})).unwrap_err();
            assert!(matches!(err, ApiError::IncompleteAuth));
            assert_eq!(session.get(), Session::default());
        }
    }

    #[test]
    fn any_user_id_value_is_stored() {
        let cases = [
            (r#"{"accessToken":"T1","user":{}}"#, None),
            (r#"{"accessToken":"T1","user":{"id":null}}"#, None),
            (r#"{"accessToken":"T1","user":{"id":-3}}"#, Some(UserId::from(-3))),
            (r#"{"accessToken":"T1","user":{"id":1.5}}"#, Some(UserId::from(json!(1.5)))),
        ];
        for (body, expected_id) in cases {
            let (client, transport, session) = stub_client("");
            transport.push(response(200, "OK", body));

            let data = client.login(&json!({})).unwrap();

            assert_eq!(data, serde_json::from_str::<Value>(body).unwrap(), "{body}");
            assert_eq!(session.get().token.as_deref(), Some("T1"), "{body}");
            assert_eq!(session.get().user_id, expected_id, "{body}");
        }
    }

    #[test]
    fn truthy_non_string_token_is_stored() {
        let (client, transport, session) = stub_client("");
        transport.push(response(200, "OK", r#"{"accessToken":12345,"user":{"id":1}}"#));
        client.login(&json!({})).unwrap();
        assert_eq!(session.get().token.as_deref(), Some("12345"));
    }

    #[test]
    fn falsy_token_leaves_session_unchanged() {
        for body in [
            r#"{"accessToken":"","user":{"id":1}}"#,
            r#"{"accessToken":0,"user":{"id":1}}"#,
            r#"{"accessToken":false,"user":{"id":1}}"#,
            r#"{"accessToken":null,"user":{"id":1}}"#,
        ] {
            let (client, transport, session) = stub_client("");
            transport.push(response(200, "OK", body));
            client.login(&json!({})).unwrap();
            assert_eq!(session.get(), Session::default(), "{body}");
        }
    }

    #[test]
    fn rejected_login_keeps_session_and_reports_status() {
        let (client, transport, session) = stub_client("");
        transport.push(response(400, "Bad Request", r#""Incorrect password""#));
        let err = client.login(&json!({})).unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(session.get(), Session::default());
    }

    #[test]
    fn logout_clears_without_request() {
        let (client, transport, session) = stub_client("");
        session.set("T1", &UserId::from(42));
        client.logout();
        client.logout();
        assert_eq!(session.get(), Session::default());
        assert!(transport.requests().is_empty());
    }
}
