//! Domain DTOs for the storefront API.
//!
//! # Design
//! Only the records this client constructs or reads fields from are typed.
//! Products, order lists and auth responses pass through as
//! `serde_json::Value` because the backend owns their shape. Cart items are
//! opaque for the same reason.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier the backend assigns to a user.
///
/// Kept as the raw JSON value the backend sent, so numbers, strings and
/// anything else round-trip unchanged. Strings render bare (`u-7`), every
/// other value as its JSON text (`42`, `-3`, `null`) when interpolated into
/// a path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Value);

impl UserId {
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<Value> for UserId {
    fn from(value: Value) -> Self {
        UserId(value)
    }
}

impl From<u64> for UserId {
    fn from(n: u64) -> Self {
        UserId(Value::from(n))
    }
}

impl From<i64> for UserId {
    fn from(n: i64) -> Self {
        UserId(Value::from(n))
    }
}

impl From<i32> for UserId {
    fn from(n: i32) -> Self {
        UserId(Value::from(n))
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(Value::from(s))
    }
}

/// A user record as returned by the backend.
///
/// Nothing is required: absent fields decode as `None`/null and fields
/// beyond these three are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "UserId::is_null")]
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The subset of a user embedded in an order. Absent fields are left out
/// of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "UserId::is_null")]
    pub id: UserId,
}

impl From<&User> for OrderUser {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            id: user.id.clone(),
        }
    }
}

/// Order payload posted to the backend. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "cartList")]
    pub cart_list: Vec<Value>,
    pub amount_paid: f64,
    pub quantity: usize,
    pub user: OrderUser,
}

impl Order {
    /// Build an order; `quantity` is always the number of cart entries.
    pub fn new(cart_list: Vec<Value>, amount_paid: f64, user: &User) -> Self {
        Self {
            quantity: cart_list.len(),
            cart_list,
            amount_paid,
            user: OrderUser::from(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_id_displays_bare() {
        assert_eq!(UserId::from(42).to_string(), "42");
        assert_eq!(UserId::from("u-7").to_string(), "u-7");
        assert_eq!(UserId::from(-3).to_string(), "-3");
        assert_eq!(UserId::default().to_string(), "null");
    }

    #[test]
    fn user_id_accepts_any_json_value() {
        for raw in [json!(42), json!("abc"), json!(-3), json!(1.5), json!(null)] {
            let id: UserId = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(id.0, raw);
            assert_eq!(serde_json::to_value(&id).unwrap(), raw);
        }
    }

    #[test]
    fn user_without_name_or_email_decodes() {
        let user: User = serde_json::from_value(json!({"id": 5, "email": "a@b.com"})).unwrap();
        assert_eq!(user.id, UserId::from(5));
        assert!(user.name.is_none());
        assert_eq!(user.email.as_deref(), Some("a@b.com"));

        let user: User = serde_json::from_value(json!({})).unwrap();
        assert!(user.id.is_null());
        assert_eq!(user, User::default());
    }

    #[test]
    fn order_user_omits_absent_fields() {
        let user: User = serde_json::from_value(json!({"id": 5, "email": "a@b.com"})).unwrap();
        let order = Order::new(Vec::new(), 0.0, &user);
        assert_eq!(
            serde_json::to_value(&order.user).unwrap(),
            json!({"email": "a@b.com", "id": 5})
        );
    }

    #[test]
    fn user_keeps_unknown_fields() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "555"
        }))
        .unwrap();
        assert_eq!(user.extra["phone"], "555");
        assert_eq!(serde_json::to_value(&user).unwrap()["phone"], "555");
    }

    #[test]
    fn order_serializes_with_wire_names() {
        let user = User {
            id: UserId::from(3),
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            extra: Map::new(),
        };
        let order = Order::new(vec![json!({"id": 10}), json!({"id": 11})], 59.5, &user);
        let body = serde_json::to_value(&order).unwrap();
        assert_eq!(
            body,
            json!({
                "cartList": [{"id": 10}, {"id": 11}],
                "amount_paid": 59.5,
                "quantity": 2,
                "user": {"name": "Ada", "email": "ada@example.com", "id": 3}
            })
        );
    }
}
