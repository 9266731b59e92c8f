use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use memodict_config::Config;
use memodict_config::store::StoreConfig;
use memodict_store::StoreError;
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;

use crate::commands;
use crate::state::AppState;

type Records = Arc<Mutex<Map<String, Value>>>;

async fn listing(State(records): State<Records>) -> Json<Value> {
    let records = records.lock().unwrap();
    if records.is_empty() {
        Json(Value::Null)
    } else {
        Json(Value::Object(records.clone()))
    }
}

async fn read(State(records): State<Records>, Path(file): Path<String>) -> Json<Value> {
    let id = file.trim_end_matches(".json");
    Json(records.lock().unwrap().get(id).cloned().unwrap_or(Value::Null))
}

async fn patch(
    State(records): State<Records>,
    Path(file): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let id = file.trim_end_matches(".json").to_string();
    let Value::Object(fields) = body.clone() else {
        return Err(StatusCode::BAD_REQUEST);
    };

    let mut records = records.lock().unwrap();
    if let Value::Object(existing) = records.entry(id).or_insert_with(|| json!({})) {
        existing.extend(fields);
    }
    Ok(Json(body))
}

async fn remove(State(records): State<Records>, Path(file): Path<String>) -> Json<Value> {
    let id = file.trim_end_matches(".json");
    records.lock().unwrap().shift_remove(id);
    Json(Value::Null)
}

/// Serve `records` on an ephemeral port and build app state pointing at it
async fn state_for(records: Value) -> (AppState, Records) {
    let Value::Object(map) = records else {
        panic!("records must be an object");
    };
    let records: Records = Arc::new(Mutex::new(map));

    let app = Router::new()
        .route("/.json", get(listing))
        .route("/{file}", get(read).patch(patch).delete(remove))
        .with_state(records.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = Config {
        store: StoreConfig {
            url: format!("http://{addr}"),
            ..StoreConfig::default()
        },
        log_level: "info".to_string(),
    };
    let mut state = AppState::new(config).unwrap();
    state.colorize = false;

    (state, records)
}

fn dictionary() -> Value {
    json!({
        "k1": { "lemma": "apple", "status": "", "freq": 5 },
        "k2": { "lemma": "apricot", "status": "F", "freq": 3 },
        "k3": { "lemma": "banana", "freq": "5" }
    })
}

fn written(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn list_prints_filtered_table() {
    let (state, _) = state_for(dictionary()).await;
    let mut out = Vec::new();

    commands::list(&state, "AP", "", false, &mut out).await.unwrap();

    let out = written(out);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        [
            "  id  lemma    status  freq",
            "  k1  apple            5",
            "* k2  apricot  F       3",
        ]
    );
}

#[tokio::test]
async fn list_of_no_matches_says_so() {
    let (state, _) = state_for(dictionary()).await;
    let mut out = Vec::new();

    commands::list(&state, "zz", "", false, &mut out).await.unwrap();

    assert_eq!(written(out), "No entries\n");
}

#[tokio::test]
async fn list_json_prints_matching_records() {
    let (state, _) = state_for(dictionary()).await;
    let mut out = Vec::new();

    commands::list(&state, "", "5", true, &mut out).await.unwrap();

    let printed: Value = serde_json::from_str(&written(out)).unwrap();
    assert_eq!(
        printed,
        json!({
            "k1": { "lemma": "apple", "status": "", "freq": 5 },
            "k3": { "lemma": "banana", "freq": "5" }
        })
    );
}

#[tokio::test]
async fn flag_without_current_flips_stored_status() {
    let (state, records) = state_for(dictionary()).await;

    let mut out = Vec::new();
    commands::flag(&state, "k2", None, &mut out).await.unwrap();
    assert_eq!(
        written(out),
        "Record k2 updated successfully! Status is now \"\"\n"
    );
    assert_eq!(records.lock().unwrap()["k2"]["status"], "");

    let mut out = Vec::new();
    commands::flag(&state, "k3", None, &mut out).await.unwrap();
    assert_eq!(
        written(out),
        "Record k3 updated successfully! Status is now \"F\"\n"
    );
    assert_eq!(
        records.lock().unwrap()["k3"],
        json!({ "lemma": "banana", "freq": "5", "status": "F" })
    );
}

#[tokio::test]
async fn flag_with_current_uses_given_status() {
    let (state, records) = state_for(dictionary()).await;
    let mut out = Vec::new();

    // The store says unflagged, the caller's view wins
    commands::flag(&state, "k1", Some("F"), &mut out).await.unwrap();

    assert_eq!(records.lock().unwrap()["k1"]["status"], "");
    assert!(written(out).ends_with("Status is now \"\"\n"));
}

#[tokio::test]
async fn flag_of_missing_record_is_not_found() {
    let (state, records) = state_for(dictionary()).await;
    let mut out = Vec::new();

    let err = commands::flag(&state, "nope", None, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::NotFound { id, .. }) if id == "nope"
    ));
    assert!(out.is_empty());
    assert!(!records.lock().unwrap().contains_key("nope"));
}

#[tokio::test]
async fn delete_removes_record_and_acknowledges() {
    let (state, records) = state_for(dictionary()).await;
    let mut out = Vec::new();

    commands::delete(&state, "k1", &mut out).await.unwrap();

    assert_eq!(written(out), "Record k1 deleted successfully!\n");
    assert!(!records.lock().unwrap().contains_key("k1"));
    assert!(records.lock().unwrap().contains_key("k2"));
}
