//! In-memory storefront backend for exercising the client end-to-end.
//!
//! Route prefixes follow json-server-auth guards: `444` is public read-only,
//! `660` needs any valid token, `600` needs the token of the owning user.
//! Tokens are opaque uuids held in memory; passwords are stored as given.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Body of a successful login or registration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: Value,
}

#[derive(Debug, Default)]
pub struct Store {
    users: Vec<Map<String, Value>>,
    tokens: HashMap<String, u64>,
    orders: Vec<Value>,
    products: Vec<Value>,
    featured: Vec<Value>,
}

impl Store {
    /// Store pre-filled with the demo catalog and no users.
    pub fn seeded() -> Self {
        Self {
            products: seed_products(),
            featured: seed_featured(),
            ..Self::default()
        }
    }

    fn issue_token(&mut self, user_id: u64) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), user_id);
        token
    }

    fn find_by_email(&self, email: &str) -> Option<&Map<String, Value>> {
        self.users
            .iter()
            .find(|u| u.get("email").and_then(Value::as_str) == Some(email))
    }
}

pub type Db = Arc<RwLock<Store>>;

type Reply = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(Value::String(message.to_string())))
}

fn public_user(user: &Map<String, Value>) -> Value {
    let mut user = user.clone();
    user.remove("password");
    Value::Object(user)
}

fn user_id_of(user: &Map<String, Value>) -> u64 {
    user.get("id").and_then(Value::as_u64).unwrap_or_default()
}

/// Render a JSON scalar the way it appears in a URL.
fn as_segment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn app() -> Router {
    router(Arc::new(RwLock::new(Store::seeded())))
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/600/users/{id}", get(get_user))
        .route("/660/orders", get(list_orders).post(create_order))
        .route("/444/products", get(list_products))
        .route("/444/products/{id}", get(get_product))
        .route("/444/featured_products", get(list_featured))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Resolve the bearer token in `headers` to a user id.
async fn authenticate(db: &Db, headers: &HeaderMap) -> Result<u64, (StatusCode, Json<Value>)> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Missing authorization header"))?;
    db.read()
        .await
        .tokens
        .get(token)
        .copied()
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "jwt malformed"))
}

fn credentials(body: &Value) -> Result<(String, String), (StatusCode, Json<Value>)> {
    let field = |name: &str| body.get(name).and_then(Value::as_str).filter(|s| !s.is_empty());
    match (field("email"), field("password")) {
        (Some(email), Some(password)) => Ok((email.to_string(), password.to_string())),
        _ => Err(reject(StatusCode::BAD_REQUEST, "Email and password are required")),
    }
}

async fn register(State(db): State<Db>, Json(body): Json<Value>) -> Reply {
    let (email, _) = credentials(&body)?;
    let Value::Object(mut user) = body else {
        return Err(reject(StatusCode::BAD_REQUEST, "Email and password are required"));
    };
    let mut store = db.write().await;
    if store.find_by_email(&email).is_some() {
        return Err(reject(StatusCode::BAD_REQUEST, "Email already exists"));
    }
    let id = store.users.iter().map(user_id_of).max().unwrap_or_default() + 1;
    user.insert("id".to_string(), json!(id));
    let response = AuthResponse {
        access_token: store.issue_token(id),
        user: public_user(&user),
    };
    store.users.push(user);
    tracing::info!(user_id = id, "user registered");
    Ok((StatusCode::CREATED, Json(json!(response))))
}

async fn login(State(db): State<Db>, Json(body): Json<Value>) -> Reply {
    let (email, password) = credentials(&body)?;
    let mut store = db.write().await;
    let user = store
        .find_by_email(&email)
        .cloned()
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Cannot find user"))?;
    if user.get("password").and_then(Value::as_str) != Some(password.as_str()) {
        return Err(reject(StatusCode::BAD_REQUEST, "Incorrect password"));
    }
    let id = user_id_of(&user);
    let response = AuthResponse {
        access_token: store.issue_token(id),
        user: public_user(&user),
    };
    tracing::info!(user_id = id, "user logged in");
    Ok((StatusCode::OK, Json(json!(response))))
}

async fn get_user(State(db): State<Db>, headers: HeaderMap, Path(id): Path<String>) -> Reply {
    let caller = authenticate(&db, &headers).await?;
    if id != caller.to_string() {
        return Err(reject(
            StatusCode::FORBIDDEN,
            "Private resource access: entity must have a reference to the owner id",
        ));
    }
    let store = db.read().await;
    store
        .users
        .iter()
        .find(|u| user_id_of(u) == caller)
        .map(|u| (StatusCode::OK, Json(public_user(u))))
        .ok_or((StatusCode::NOT_FOUND, Json(json!({}))))
}

async fn list_orders(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    authenticate(&db, &headers).await?;
    let store = db.read().await;
    let orders = store
        .orders
        .iter()
        .filter(|order| match params.get("user.id") {
            Some(wanted) => order.pointer("/user/id").map(as_segment).as_ref() == Some(wanted),
            None => true,
        })
        .cloned()
        .collect();
    Ok((StatusCode::OK, Json(Value::Array(orders))))
}

async fn create_order(State(db): State<Db>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    authenticate(&db, &headers).await?;
    let Value::Object(mut order) = body else {
        return Err(reject(StatusCode::BAD_REQUEST, "Order must be an object"));
    };
    let mut store = db.write().await;
    let id = store.orders.len() as u64 + 1;
    order.insert("id".to_string(), json!(id));
    let order = Value::Object(order);
    store.orders.push(order.clone());
    tracing::info!(order_id = id, "order created");
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_products(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let needle = params.get("name_like").map(|s| s.to_lowercase()).unwrap_or_default();
    let store = db.read().await;
    let products = store
        .products
        .iter()
        .filter(|p| {
            p.get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();
    Json(Value::Array(products))
}

async fn get_product(State(db): State<Db>, Path(id): Path<String>) -> Reply {
    let store = db.read().await;
    store
        .products
        .iter()
        .find(|p| p.get("id").map(as_segment).as_deref() == Some(id.as_str()))
        .map(|p| (StatusCode::OK, Json(p.clone())))
        .ok_or((StatusCode::NOT_FOUND, Json(json!({}))))
}

async fn list_featured(State(db): State<Db>) -> Json<Value> {
    Json(Value::Array(db.read().await.featured.clone()))
}

fn product(id: u64, name: &str, price: u64, rating: u64, best_seller: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "overview": format!("A practical guide: {name}."),
        "price": price,
        "rating": rating,
        "best_seller": best_seller,
        "in_stock": true,
    })
}

pub fn seed_products() -> Vec<Value> {
    vec![
        product(10001, "Basics To Advanced In React", 29, 5, true),
        product(10002, "Django Framework for Beginners", 19, 5, false),
        product(10003, "The Future of Design Systems", 29, 3, false),
        product(10004, "Rust Systems Programming", 39, 4, true),
        product(10005, "Python Basics To Advanced", 49, 4, false),
    ]
}

pub fn seed_featured() -> Vec<Value> {
    seed_products()
        .into_iter()
        .filter(|p| p["best_seller"] == true)
        .collect()
}
