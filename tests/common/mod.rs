#![allow(dead_code)]

use axum::extract::{Form, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use dropdash::services::session_service::{SessionContext, SessionStore};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ADMIN_TOKEN: &str = "tok-admin";
pub const USER_TOKEN: &str = "tok-staff";
/// Accepted by the resource routes, but `/auth/me` answers 500 for it.
pub const BROKEN_IDENTITY_TOKEN: &str = "tok-broken";
/// Accepted by the resource routes, but `/auth/me` never answers for it.
pub const HANGING_IDENTITY_TOKEN: &str = "tok-hang";

/// Client searches for this term answer after half a second.
pub const SLOW_SEARCH: &str = "slow";

const STAMP: &str = "2024-05-01T10:00:00";

/// In-memory stand-in for the dashboard backend.
#[derive(Default)]
pub struct MockBackend {
    pub me_calls: AtomicUsize,
    pub change_password_calls: AtomicUsize,
    pub register_calls: AtomicUsize,
    pub client_lists: AtomicUsize,
    pub auth_headers: Mutex<Vec<Option<String>>>,
    pub user_lists: AtomicUsize,
    pub summary_calls: AtomicUsize,
    /// `year` values received by `/transactions/monthly`, in order.
    pub monthly_years: Mutex<Vec<i32>>,
    /// Bodies of `POST /orders`.
    pub created_orders: Mutex<Vec<Value>>,
    /// `(user id, new_password)` pairs received by reset-password.
    pub password_resets: Mutex<Vec<(i64, String)>>,
    clients: Mutex<Vec<Value>>,
    orders: Mutex<Vec<Value>>,
    users: Mutex<Vec<Value>>,
    transactions: Mutex<Vec<Value>>,
    deliveries: Mutex<Vec<Value>>,
    next_id: AtomicUsize,
}

impl MockBackend {
    pub fn me_calls(&self) -> usize {
        self.me_calls.load(Ordering::SeqCst)
    }

    pub fn clients(&self) -> Vec<Value> {
        self.clients.lock().unwrap().clone()
    }

    pub fn seed_client(&self, name: &str, email: &str, location: &str) -> i64 {
        let id = self.next_id();
        self.clients.lock().unwrap().push(client_json(id, name, Some(email), location, None));
        id
    }

    pub fn seed_order(&self, name: &str, status: &str, cost: f64, price: f64, taxes: f64, location: &str) -> i64 {
        let id = self.next_id();
        self.orders.lock().unwrap().push(json!({
            "id": id,
            "client_id": 1,
            "order_name": name,
            "order_link": null,
            "quantity": 2,
            "cost": cost,
            "customer_price": price,
            "taxes": taxes,
            // stale on purpose: clients must recompute
            "profit": 999.0,
            "status": status,
            "created_at": STAMP,
            "created_by_username": "admin",
            "client_name": "Ada",
            "client_location": location,
        }));
        id
    }

    pub fn users(&self) -> Vec<Value> {
        self.users.lock().unwrap().clone()
    }

    pub fn deliveries(&self) -> Vec<Value> {
        self.deliveries.lock().unwrap().clone()
    }

    pub fn seed_user(&self, username: &str, role: &str, is_active: bool) -> i64 {
        let id = self.next_id();
        self.users.lock().unwrap().push(user_json(id, username, role, is_active));
        id
    }

    pub fn seed_transaction(&self, kind: &str, category: &str, amount: f64) -> i64 {
        let id = self.next_id();
        self.transactions.lock().unwrap().push(transaction_json(id, kind, category, amount, None));
        id
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub backend: Arc<MockBackend>,
}

impl TestServer {
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Fresh context on an in-memory store, optionally already logged in.
    pub fn context(&self, token: Option<&str>) -> SessionContext {
        let store = SessionStore::in_memory();
        if let Some(token) = token {
            store.set_session(token).unwrap();
        }
        SessionContext::new(&self.base_url(), store)
    }
}

pub async fn spawn_backend() -> anyhow::Result<TestServer> {
    let backend = Arc::new(MockBackend::default());
    let router = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/me", get(me))
        .route("/api/auth/change-password", post(change_password))
        .route("/api/clients", get(list_clients).post(create_client))
        .route("/api/clients/{id}", put(update_client).delete(delete_client))
        .route("/api/orders", post(create_order))
        .route("/api/orders/{scope}", get(list_orders))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", put(update_user).delete(deactivate_user))
        .route("/api/users/{id}/activate", post(activate_user))
        .route("/api/users/{id}/reset-password", post(reset_password))
        .route("/api/transactions", get(list_transactions).post(create_transaction))
        .route("/api/transactions/summary", get(transaction_summary))
        .route("/api/transactions/monthly", get(monthly))
        .route("/api/transactions/{id}", delete(delete_transaction))
        .route("/api/deliveries", get(list_deliveries).post(create_delivery))
        .route("/api/deliveries/{id}", put(update_delivery).delete(delete_delivery))
        .route("/api/dashboard", get(dashboard))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Ok(TestServer { addr, backend })
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn authorized(backend: &MockBackend, headers: &HeaderMap) -> Result<String, Response> {
    let token = bearer(headers);
    backend.auth_headers.lock().unwrap().push(token.clone());
    match token {
        Some(t) if t.starts_with("tok-") => Ok(t),
        _ => Err(detail(StatusCode::UNAUTHORIZED, "Could not validate credentials")),
    }
}

fn user_json(id: i64, username: &str, role: &str, is_active: bool) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "role": role,
        "is_active": is_active,
        "created_at": STAMP,
    })
}

fn transaction_json(id: i64, kind: &str, category: &str, amount: f64, description: Option<&str>) -> Value {
    json!({
        "id": id,
        "type": kind,
        "category": category,
        "amount": amount,
        "description": description,
        "created_at": STAMP,
        "transaction_date": STAMP,
    })
}

fn merge_fields(target: &mut Value, body: &Value) {
    if let Some(fields) = body.as_object() {
        for (key, value) in fields {
            target[key] = value.clone();
        }
    }
}

fn client_json(id: i64, name: &str, email: Option<&str>, location: &str, notes: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "phone": "+2348000000000",
        "location": location,
        "notes": notes,
        "created_at": STAMP,
    })
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(Form(form): Form<LoginForm>) -> Response {
    if form.password != "secret" {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect username or password");
    }
    let token = match form.username.as_str() {
        "admin" => ADMIN_TOKEN,
        "broken" => BROKEN_IDENTITY_TOKEN,
        _ => USER_TOKEN,
    };
    Json(json!({ "access_token": token, "token_type": "bearer" })).into_response()
}

async fn register(State(backend): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Response {
    backend.register_calls.fetch_add(1, Ordering::SeqCst);
    if body["username"] == "taken" {
        return detail(StatusCode::BAD_REQUEST, "Username already registered");
    }
    if body["username"] == "explode" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }
    Json(json!({
        "id": 42,
        "username": body["username"],
        "email": body["email"],
        "role": "user",
        "is_active": true,
        "created_at": STAMP,
    }))
    .into_response()
}

async fn me(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    backend.me_calls.fetch_add(1, Ordering::SeqCst);
    let token = match authorized(&backend, &headers) {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    let (username, role) = match token.as_str() {
        ADMIN_TOKEN => ("admin", "admin"),
        BROKEN_IDENTITY_TOKEN => return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        HANGING_IDENTITY_TOKEN => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            return (StatusCode::GATEWAY_TIMEOUT, "late").into_response();
        }
        _ => ("staff", "user"),
    };
    Json(json!({
        "id": 1,
        "username": username,
        "email": format!("{}@example.com", username),
        "role": role,
        "is_active": true,
        "created_at": STAMP,
    }))
    .into_response()
}

async fn change_password(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    backend.change_password_calls.fetch_add(1, Ordering::SeqCst);
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    if body["old_password"] != "secret" {
        return detail(StatusCode::BAD_REQUEST, "Incorrect old password");
    }
    Json(json!({ "message": "Password updated successfully" })).into_response()
}

async fn list_clients(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.client_lists.fetch_add(1, Ordering::SeqCst);
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    if params.get("search").map(String::as_str) == Some(SLOW_SEARCH) {
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    let clients = backend.clients();
    let filtered: Vec<Value> = match params.get("search") {
        Some(term) => clients
            .into_iter()
            .filter(|c| c["name"].as_str().unwrap_or("").to_lowercase().contains(&term.to_lowercase()))
            .collect(),
        None => clients,
    };
    Json(filtered).into_response()
}

async fn create_client(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    if body["name"] == "explode" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }
    let duplicate = backend
        .clients()
        .iter()
        .any(|c| !body["email"].is_null() && c["email"] == body["email"]);
    if duplicate {
        return detail(StatusCode::BAD_REQUEST, "Client with this email already exists");
    }
    let id = backend.next_id();
    let created = client_json(
        id,
        body["name"].as_str().unwrap_or(""),
        body["email"].as_str(),
        body["location"].as_str().unwrap_or(""),
        body["notes"].as_str(),
    );
    backend.clients.lock().unwrap().push(created.clone());
    Json(created).into_response()
}

async fn update_client(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    let mut clients = backend.clients.lock().unwrap();
    let Some(client) = clients.iter_mut().find(|c| c["id"] == id) else {
        return detail(StatusCode::NOT_FOUND, "Client not found");
    };
    merge_fields(client, &body);
    Json(client.clone()).into_response()
}

async fn delete_client(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    let mut clients = backend.clients.lock().unwrap();
    let before = clients.len();
    clients.retain(|c| c["id"] != id);
    if clients.len() == before {
        return detail(StatusCode::NOT_FOUND, "Client not found");
    }
    Json(json!({ "message": "Client deleted successfully" })).into_response()
}

async fn list_orders(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Path(scope): Path<String>) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    let orders: Vec<Value> = backend
        .orders
        .lock()
        .unwrap()
        .iter()
        .filter(|o| o["status"] == scope.as_str())
        .cloned()
        .collect();
    Json(orders).into_response()
}

async fn dashboard(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    detail(StatusCode::SERVICE_UNAVAILABLE, "Analytics are being rebuilt")
}

async fn create_order(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    backend.created_orders.lock().unwrap().push(body.clone());
    let id = backend.next_id();
    let mut order = json!({
        "id": id,
        "status": "pending",
        "created_at": STAMP,
    });
    merge_fields(&mut order, &body);
    backend.orders.lock().unwrap().push(order.clone());
    Json(order).into_response()
}

async fn list_users(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    backend.user_lists.fetch_add(1, Ordering::SeqCst);
    match authorized(&backend, &headers) {
        Ok(token) if token == ADMIN_TOKEN => Json(backend.users()).into_response(),
        Ok(_) => detail(StatusCode::FORBIDDEN, "Not enough permissions"),
        Err(resp) => resp,
    }
}

async fn create_user(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    let id = backend.next_id();
    let user = user_json(
        id,
        body["username"].as_str().unwrap_or(""),
        body["role"].as_str().unwrap_or("user"),
        body["is_active"].as_bool().unwrap_or(true),
    );
    backend.users.lock().unwrap().push(user.clone());
    Json(user).into_response()
}

fn with_user(backend: &MockBackend, id: i64, change: impl FnOnce(&mut Value)) -> Response {
    let mut users = backend.users.lock().unwrap();
    match users.iter_mut().find(|u| u["id"] == id) {
        Some(user) => {
            change(user);
            Json(user.clone()).into_response()
        }
        None => detail(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn update_user(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    with_user(&backend, id, |user| merge_fields(user, &body))
}

async fn deactivate_user(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    with_user(&backend, id, |user| user["is_active"] = json!(false))
}

async fn activate_user(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    with_user(&backend, id, |user| user["is_active"] = json!(true))
}

async fn reset_password(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    let new_password = body["new_password"].as_str().unwrap_or("").to_string();
    if new_password.len() < 6 {
        return detail(StatusCode::BAD_REQUEST, "Password must be at least 6 characters long");
    }
    backend.password_resets.lock().unwrap().push((id, new_password));
    with_user(&backend, id, |_| {})
}

async fn list_transactions(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    Json(backend.transactions.lock().unwrap().clone()).into_response()
}

async fn create_transaction(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    let id = backend.next_id();
    let tx = transaction_json(
        id,
        body["type"].as_str().unwrap_or("income"),
        body["category"].as_str().unwrap_or("other"),
        body["amount"].as_f64().unwrap_or(0.0),
        body["description"].as_str(),
    );
    backend.transactions.lock().unwrap().push(tx.clone());
    Json(tx).into_response()
}

async fn delete_transaction(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    backend.transactions.lock().unwrap().retain(|t| t["id"] != id);
    Json(json!({ "message": "Transaction deleted successfully" })).into_response()
}

async fn transaction_summary(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    backend.summary_calls.fetch_add(1, Ordering::SeqCst);
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    let (income, expenses) = backend
        .transactions
        .lock()
        .unwrap()
        .iter()
        .fold((0.0, 0.0), |(inc, exp), t| {
            let amount = t["amount"].as_f64().unwrap_or(0.0);
            if t["type"] == "income" {
                (inc + amount, exp)
            } else {
                (inc, exp + amount)
            }
        });
    Json(json!({
        "total_income": income,
        "total_expenses": expenses,
        // stale on purpose: clients must recompute
        "profit": -1.0,
    }))
    .into_response()
}

async fn monthly(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    let Some(year) = params.get("year").and_then(|y| y.parse::<i32>().ok()) else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "year is required");
    };
    backend.monthly_years.lock().unwrap().push(year);
    // revenue encodes the year so callers can tell responses apart
    let months: Vec<Value> = ["Jan", "Feb", "Mar"]
        .iter()
        .enumerate()
        .map(|(i, month)| json!({ "month": month, "pv": f64::from(year) + i as f64, "uv": 100.0 }))
        .collect();
    Json(months).into_response()
}

async fn list_deliveries(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    Json(backend.deliveries()).into_response()
}

async fn create_delivery(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    let id = backend.next_id();
    let mut delivery = json!({
        "id": id,
        "status": "pending",
        "created_at": STAMP,
    });
    merge_fields(&mut delivery, &body);
    backend.deliveries.lock().unwrap().push(delivery.clone());
    Json(delivery).into_response()
}

async fn update_delivery(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    let mut deliveries = backend.deliveries.lock().unwrap();
    let Some(delivery) = deliveries.iter_mut().find(|d| d["id"] == id) else {
        return detail(StatusCode::NOT_FOUND, "Delivery not found");
    };
    merge_fields(delivery, &body);
    Json(delivery.clone()).into_response()
}

async fn delete_delivery(State(backend): State<Arc<MockBackend>>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(resp) = authorized(&backend, &headers) {
        return resp;
    }
    backend.deliveries.lock().unwrap().retain(|d| d["id"] != id);
    Json(json!({ "message": "Delivery deleted successfully" })).into_response()
}
