#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tokio::net::TcpListener;

/// In-process stand-in for the realtime database REST endpoints
#[derive(Clone, Default)]
pub struct FakeStore {
    records: Arc<Mutex<IndexMap<String, Value>>>,
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    unsorted: Arc<AtomicBool>,
}

impl FakeStore {
    pub fn with_records(records: Value) -> Self {
        let store = Self::default();
        if let Value::Object(map) = records {
            let mut guard = store.records.lock().unwrap();
            for (id, record) in map {
                guard.insert(id, record);
            }
        }
        store
    }

    pub fn record(&self, id: &str) -> Option<Value> {
        self.records.lock().unwrap().get(id).cloned()
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.last_query.lock().unwrap().clone()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Answer listings in insertion order instead of key order, as the
    /// real store may do for filtered queries
    pub fn serve_unsorted(&self, unsorted: bool) {
        self.unsorted.store(unsorted, Ordering::SeqCst);
    }

    /// Serve on an ephemeral port and return the base address
    pub async fn spawn(self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .route("/.json", get(list))
            .route("/{file}", get(read).patch(patch).delete(remove))
            .with_state(self);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }
}

/// Base address nothing listens on
pub async fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn entry_id(file: &str) -> Result<String, StatusCode> {
    file.strip_suffix(".json")
        .map(str::to_string)
        .ok_or(StatusCode::BAD_REQUEST)
}

async fn list(
    State(store): State<FakeStore>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    *store.last_query.lock().unwrap() = Some(query.clone());

    if store.fail_reads.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let limit = query
        .get("limitToFirst")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(usize::MAX);

    let records = store.records.lock().unwrap();
    if records.is_empty() {
        return Ok(Json(Value::Null));
    }

    let mut ids: Vec<&String> = records.keys().collect();
    if !store.unsorted.load(Ordering::SeqCst) {
        ids.sort();
    }

    let listing: Map<String, Value> = ids
        .into_iter()
        .take(limit)
        .map(|id| (id.clone(), records[id].clone()))
        .collect();

    Ok(Json(Value::Object(listing)))
}

async fn read(
    State(store): State<FakeStore>,
    Path(file): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let id = entry_id(&file)?;

    if store.fail_reads.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let record = store.record(&id).unwrap_or(Value::Null);
    Ok(Json(record))
}

async fn patch(
    State(store): State<FakeStore>,
    Path(file): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let id = entry_id(&file)?;

    if store.fail_writes.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let Value::Object(fields) = body.clone() else {
        return Err(StatusCode::BAD_REQUEST);
    };

    let mut records = store.records.lock().unwrap();
    let record = records
        .entry(id)
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(existing) = record {
        for (key, value) in fields {
            existing.insert(key, value);
        }
    }

    Ok(Json(body))
}

async fn remove(
    State(store): State<FakeStore>,
    Path(file): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let id = entry_id(&file)?;

    if store.fail_writes.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    store.records.lock().unwrap().shift_remove(&id);
    Ok(Json(Value::Null))
}
