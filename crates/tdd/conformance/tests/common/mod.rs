//! In-process Thing Description directory for end-to-end runner tests

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tdd_client::{DirectoryClient, DirectoryConfig};
use tdd_model::{fields, merge_patch, validate_minimum, ThingDescription};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// How faithfully the fake implements the directory API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    Correct,
    /// Appends arrays on PATCH, answers 200 to DELETE of unknown ids and
    /// serves `/things/{id}` as plain `application/json`
    Faulty,
}

#[derive(Clone)]
struct Directory {
    things: Arc<RwLock<BTreeMap<String, ThingDescription>>>,
    behaviour: Behaviour,
}

/// Route runner logs to the test output; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Serve a fake directory on an ephemeral port and return a client for it.
pub async fn spawn_directory(behaviour: Behaviour) -> DirectoryClient {
    init_tracing();
    let state = Directory {
        things: Arc::new(RwLock::new(BTreeMap::new())),
        behaviour,
    };

    let app = Router::new()
        .route("/things", get(list))
        .route("/things/", post(create_anonymous))
        .route(
            "/things/:id",
            get(retrieve_thing).put(put_thing).patch(patch_thing).delete(delete_thing),
        )
        .route("/td/:id", get(retrieve_td))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    DirectoryClient::new(DirectoryConfig::new(format!("http://{}", addr))).unwrap()
}

fn registration() -> Value {
    json!({ "modified": chrono::Utc::now().to_rfc3339() })
}

fn with_media_type(status: StatusCode, media_type: &'static str, body: &Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, media_type)],
        serde_json::to_vec(body).unwrap(),
    )
        .into_response()
}

fn bad_request(reason: impl ToString) -> Response {
    (StatusCode::BAD_REQUEST, reason.to_string()).into_response()
}

fn parse_thing(body: &Bytes) -> Result<ThingDescription, Response> {
    let td: Map<String, Value> = serde_json::from_slice(body).map_err(bad_request)?;
    validate_minimum(&td).map_err(bad_request)?;
    Ok(td)
}

async fn create_anonymous(State(dir): State<Directory>, body: Bytes) -> Response {
    let mut td = match parse_thing(&body) {
        Ok(td) => td,
        Err(rejection) => return rejection,
    };
    if td.contains_key(fields::ID) {
        return bad_request("id must not be set on POST");
    }

    let id = format!("_:{}", uuid::Uuid::new_v4());
    td.insert(fields::ID.to_string(), Value::String(id.clone()));
    td.insert(fields::REGISTRATION.to_string(), registration());
    dir.things.write().await.insert(id.clone(), td);

    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/things/{}", id))],
    )
        .into_response()
}

async fn put_thing(
    State(dir): State<Directory>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let mut td = match parse_thing(&body) {
        Ok(td) => td,
        Err(rejection) => return rejection,
    };
    td.insert(fields::REGISTRATION.to_string(), registration());

    let mut things = dir.things.write().await;
    match things.insert(id, td) {
        Some(_) => StatusCode::OK.into_response(),
        None => StatusCode::CREATED.into_response(),
    }
}

fn append_arrays(target: &mut ThingDescription, patch: &ThingDescription) {
    for (key, value) in patch {
        if value.is_null() {
            target.remove(key);
            continue;
        }
        match (target.get_mut(key), value) {
            (Some(Value::Array(existing)), Value::Array(extra)) => {
                existing.extend(extra.iter().cloned());
                continue;
            }
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                append_arrays(existing, nested);
                continue;
            }
            _ => {}
        }
        target.insert(key.clone(), value.clone());
    }
}

async fn patch_thing(
    State(dir): State<Directory>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let merge_patch_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/merge-patch+json"));
    if !merge_patch_type {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }
    let patch: Map<String, Value> = match serde_json::from_slice(&body) {
        Ok(patch) => patch,
        Err(e) => return bad_request(e),
    };

    let mut things = dir.things.write().await;
    let Some(stored) = things.get(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut updated = stored.clone();
    match dir.behaviour {
        Behaviour::Correct => merge_patch::apply_in_place(&mut updated, &patch),
        Behaviour::Faulty => append_arrays(&mut updated, &patch),
    }
    if let Err(e) = validate_minimum(&updated) {
        return bad_request(e);
    }
    updated.insert(fields::REGISTRATION.to_string(), registration());
    things.insert(id, updated);
    StatusCode::OK.into_response()
}

async fn retrieve_thing(State(dir): State<Directory>, Path(id): Path<String>) -> Response {
    let media_type = match dir.behaviour {
        Behaviour::Correct => "application/td+json",
        Behaviour::Faulty => "application/json",
    };
    retrieve(&dir, &id, media_type).await
}

async fn retrieve_td(State(dir): State<Directory>, Path(id): Path<String>) -> Response {
    retrieve(&dir, &id, "application/td+json").await
}

async fn retrieve(dir: &Directory, id: &str, media_type: &'static str) -> Response {
    match dir.things.read().await.get(id) {
        Some(td) => with_media_type(StatusCode::OK, media_type, &Value::Object(td.clone())),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_thing(State(dir): State<Directory>, Path(id): Path<String>) -> Response {
    let removed = dir.things.write().await.remove(&id);
    match (removed, dir.behaviour) {
        (Some(_), _) | (None, Behaviour::Faulty) => StatusCode::OK.into_response(),
        (None, Behaviour::Correct) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn list(State(dir): State<Directory>) -> Response {
    let things: Vec<Value> = dir
        .things
        .read()
        .await
        .values()
        .cloned()
        .map(Value::Object)
        .collect();
    with_media_type(StatusCode::OK, "application/ld+json", &Value::Array(things))
}
