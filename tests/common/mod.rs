#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use dashboard::client::{ListPage, ResourceApi};
use dashboard::error::AppError;
use dashboard::models::{Resource, ResourceDescriptor};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

#[derive(Default)]
pub struct Backend {
    pub collections: HashMap<String, Vec<Value>>,
    /// List requests answer 500.
    pub fail_list: bool,
    /// List requests answer 200 with a non-JSON body.
    pub malformed_list: bool,
    /// Ids whose delete answers 500.
    pub fail_delete: HashSet<String>,
    /// Overrides `pagination.totalItems` on the connect-with-us list.
    pub server_total: Option<u64>,
    /// `METHOD path` of every request, in arrival order.
    pub requests: Vec<String>,
}

impl Backend {
    pub fn with(mut self, resource: &str, items: Vec<Value>) -> Self {
        self.collections.insert(resource.to_string(), items);
        self
    }
}

pub type SharedBackend = Arc<Mutex<Backend>>;

pub struct MockServer {
    pub base_url: String,
    pub backend: SharedBackend,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub fn requests(&self) -> Vec<String> {
        self.backend.lock().unwrap().requests.clone()
    }

    pub fn stored(&self, resource: &str) -> Vec<Value> {
        self.backend
            .lock()
            .unwrap()
            .collections
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_backend(backend: Backend) -> MockServer {
    let backend: SharedBackend = Arc::new(Mutex::new(backend));
    let app = Router::new()
        .route("/api/connect-with-us/", get(list_queries))
        .route("/api/connect-with-us/{id}", axum::routing::delete(delete_query))
        .route("/api/{resource}", get(list_items))
        .route("/api/{resource}/create", post(create_item))
        .route("/api/{resource}/update/{id}", put(update_item))
        .route("/api/{resource}/{id}", get(get_item).delete(delete_item))
        .with_state(backend.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });

    MockServer {
        base_url: format!("http://{}", addr),
        backend,
        handle,
    }
}

fn record(backend: &SharedBackend, line: String) -> std::sync::MutexGuard<'_, Backend> {
    let mut guard = backend.lock().unwrap();
    guard.requests.push(line);
    guard
}

fn listing(guard: &Backend, resource: &str) -> Result<Vec<Value>, Response> {
    if guard.fail_list {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response());
    }
    if guard.malformed_list {
        return Err((StatusCode::OK, "<html>maintenance</html>").into_response());
    }
    Ok(guard.collections.get(resource).cloned().unwrap_or_default())
}

async fn list_items(State(backend): State<SharedBackend>, Path(resource): Path<String>) -> Response {
    let guard = record(&backend, format!("GET /api/{}", resource));
    match listing(&guard, &resource) {
        Ok(items) => Json(json!({ "data": items })).into_response(),
        Err(response) => response,
    }
}

async fn list_queries(State(backend): State<SharedBackend>) -> Response {
    let guard = record(&backend, "GET /api/connect-with-us/".to_string());
    match listing(&guard, "connect-with-us") {
        Ok(items) => {
            let total = guard.server_total.unwrap_or(items.len() as u64);
            Json(json!({ "data": items, "pagination": { "totalItems": total } })).into_response()
        }
        Err(response) => response,
    }
}

fn position(items: &[Value], id: &str) -> Option<usize> {
    items.iter().position(|item| item["_id"] == id)
}

async fn get_item(
    State(backend): State<SharedBackend>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    let guard = record(&backend, format!("GET /api/{}/{}", resource, id));
    let items = guard.collections.get(&resource).cloned().unwrap_or_default();
    match position(&items, &id) {
        Some(index) => Json(json!({ "data": items[index] })).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response(),
    }
}

async fn create_item(
    State(backend): State<SharedBackend>,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut guard = record(&backend, format!("POST /api/{}/create", resource));
    body["_id"] = Value::String(uuid::Uuid::new_v4().simple().to_string());
    guard.collections.entry(resource).or_default().push(body.clone());
    (StatusCode::CREATED, Json(json!({ "data": body }))).into_response()
}

async fn update_item(
    State(backend): State<SharedBackend>,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut guard = record(&backend, format!("PUT /api/{}/update/{}", resource, id));
    let items = guard.collections.entry(resource).or_default();
    let Some(index) = position(items, &id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response();
    };
    if let (Some(stored), Some(changes)) = (items[index].as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            stored.insert(key.clone(), value.clone());
        }
    }
    Json(json!({ "data": items[index] })).into_response()
}

fn remove(backend: &SharedBackend, resource: &str, id: &str) -> Response {
    let mut guard = record(backend, format!("DELETE /api/{}/{}", resource, id));
    if guard.fail_delete.contains(id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "delete failed").into_response();
    }
    let items = guard.collections.entry(resource.to_string()).or_default();
    match position(items, id) {
        Some(index) => {
            items.remove(index);
            StatusCode::NO_CONTENT.into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response(),
    }
}

async fn delete_item(
    State(backend): State<SharedBackend>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    remove(&backend, &resource, &id)
}

async fn delete_query(State(backend): State<SharedBackend>, Path(id): Path<String>) -> Response {
    remove(&backend, "connect-with-us", &id)
}

/// Address nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[derive(Default)]
pub struct ScriptedApi {
    lists: Mutex<VecDeque<Result<ListPage, AppError>>>,
    deletes: Mutex<VecDeque<Result<(), AppError>>>,
    pub list_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    /// When set, `list` waits for a notification before answering.
    pub gate: Option<Arc<Notify>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push_list(&self, result: Result<ListPage, AppError>) -> &Self {
        self.lists.lock().unwrap().push_back(result);
        self
    }

    pub fn push_items(&self, items: Vec<Resource>) -> &Self {
        self.push_list(Ok(ListPage {
            items,
            total_items: None,
        }))
    }

    pub fn push_delete(&self, result: Result<(), AppError>) -> &Self {
        self.deletes.lock().unwrap().push_back(result);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceApi for ScriptedApi {
    async fn list(&self, _descriptor: &ResourceDescriptor) -> Result<ListPage, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.lists
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ListPage::default()))
    }

    async fn get(&self, _descriptor: &ResourceDescriptor, _id: &str) -> Result<Resource, AppError> {
        Err(AppError::Http {
            status: 404,
            body: String::new(),
        })
    }

    async fn create(&self, _descriptor: &ResourceDescriptor, body: &Resource) -> Result<Resource, AppError> {
        Ok(body.clone())
    }

    async fn update(
        &self,
        _descriptor: &ResourceDescriptor,
        _id: &str,
        body: &Resource,
    ) -> Result<Resource, AppError> {
        Ok(body.clone())
    }

    async fn delete(&self, _descriptor: &ResourceDescriptor, _id: &str) -> Result<(), AppError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.deletes.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

pub fn resource(value: Value) -> Resource {
    Resource::try_from(value).expect("fixture must be an object")
}

pub fn contacts(n: usize) -> Vec<Resource> {
    (0..n)
        .map(|i| {
            resource(json!({
                "_id": format!("c{}", i),
                "name": format!("Contact {}", i),
                "email": format!("contact{}@example.com", i),
                "phone": format!("555-010{}", i),
                "subject": "Hello",
                "message": "Please call back",
            }))
        })
        .collect()
}

pub fn ids(items: &[Resource]) -> Vec<String> {
    items.iter().filter_map(|r| r.id("_id")).collect()
}
