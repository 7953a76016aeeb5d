// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mock club API and test state helpers.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use judo_club_client::config::Config;
use judo_club_client::services::session::keys;
use judo_club_client::storage::{KeyValueStore, MemoryStore};
use judo_club_client::AppState;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Access token the mock accepts.
pub const FRESH_TOKEN: &str = "fresh-token";
/// Access token the mock rejects.
pub const STALE_TOKEN: &str = "stale-token";
/// Refresh token the mock exchanges for [`FRESH_TOKEN`].
pub const VALID_REFRESH: &str = "valid-refresh";
/// Refresh token handed out when rotation is on.
pub const ROTATED_REFRESH: &str = "rotated-refresh";

/// Counters and switches shared with the mock handlers.
#[derive(Default)]
pub struct Backend {
    pub refresh_calls: AtomicUsize,
    pub member_hits: AtomicUsize,
    pub always_401_hits: AtomicUsize,
    pub refresh_fails: AtomicBool,
    /// Return a new refresh token along with the access token.
    pub refresh_rotates: AtomicBool,
    /// Answer 200 without an `access` field.
    pub refresh_omits_access: AtomicBool,
    /// Answer 202 instead of 200.
    pub refresh_accepted: AtomicBool,
}

type Shared = Arc<Backend>;

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Given token not valid for any token type"})),
    )
        .into_response()
}

async fn members(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    backend.member_hits.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers) == Some("Bearer fresh-token") {
        Json(json!({"results": [{"id": 1, "first_name": "Teddy", "belt": "noire"}]}))
            .into_response()
    } else {
        unauthorized()
    }
}

async fn always_401(State(backend): State<Shared>) -> Response {
    backend.always_401_hits.fetch_add(1, Ordering::SeqCst);
    unauthorized()
}

async fn echo_auth(headers: HeaderMap) -> String {
    bearer(&headers).unwrap_or("none").to_string()
}

async fn refresh(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    backend.refresh_calls.fetch_add(1, Ordering::SeqCst);
    // Keep the refresh in flight long enough for concurrent callers to queue.
    tokio::time::sleep(Duration::from_millis(50)).await;

    if backend.refresh_fails.load(Ordering::SeqCst) || body["refresh"] != VALID_REFRESH {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Token is invalid or expired", "code": "token_not_valid"})),
        )
            .into_response();
    }
    if backend.refresh_omits_access.load(Ordering::SeqCst) {
        return Json(json!({"detail": "ok"})).into_response();
    }
    if backend.refresh_accepted.load(Ordering::SeqCst) {
        return (StatusCode::ACCEPTED, Json(json!({"access": FRESH_TOKEN}))).into_response();
    }
    if backend.refresh_rotates.load(Ordering::SeqCst) {
        return Json(json!({"access": FRESH_TOKEN, "refresh": ROTATED_REFRESH})).into_response();
    }
    Json(json!({"access": FRESH_TOKEN})).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == "coach" && body["password"] == "ippon" {
        Json(json!({
            "access": FRESH_TOKEN,
            "refresh": VALID_REFRESH,
            "username": "coach",
            "is_staff": true
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
            .into_response()
    }
}

async fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"detail": "You do not have permission to perform this action."})),
    )
        .into_response()
}

async fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "<h1>Server Error (500)</h1>").into_response()
}

async fn bad_registration() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"detail": "Ce membre est déjà inscrit pour cette saison."})),
    )
        .into_response()
}

async fn validation_error() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"detail": "", "error": "Champ obligatoire manquant."})),
    )
        .into_response()
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Start the mock API on a random local port. Returns its base URL.
pub async fn spawn_backend(backend: Shared) -> String {
    let app = Router::new()
        .route("/api/members/", get(members))
        .route("/api/always-401/", get(always_401))
        .route("/api/echo-auth/", get(echo_auth))
        .route("/api/token/", post(login))
        .route("/api/token/refresh/", post(refresh))
        .route("/api/statistics/", get(forbidden))
        .route("/api/invoices/", get(server_error))
        .route("/api/registrations/", post(bad_registration))
        .route("/api/register/", post(validation_error))
        .route("/api/unknown/", get(not_found))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock backend crashed");
    });

    format!("http://{}", addr)
}

/// Client state pointed at `api_url`, with in-memory storage and toasts
/// that never expire on their own.
pub fn test_state(api_url: &str) -> (AppState, Arc<MemoryStore>) {
    let mut config = Config::test_default();
    config.api_url = api_url.to_string();
    config.toast_duration = Duration::ZERO;

    let storage = Arc::new(MemoryStore::new());
    (AppState::new(config, storage.clone()), storage)
}

/// Seed a signed-in session.
pub fn seed_session(storage: &MemoryStore, access: &str, refresh: Option<&str>, is_staff: bool) {
    storage.set(keys::ACCESS_TOKEN, access);
    if let Some(refresh) = refresh {
        storage.set(keys::REFRESH_TOKEN, refresh);
    }
    storage.set(keys::USERNAME, "coach");
    if is_staff {
        storage.set(keys::IS_STAFF, "true");
    }
}

/// Toast messages currently shown, oldest first.
pub fn toast_messages(state: &AppState) -> Vec<String> {
    state.toasts.toasts().into_iter().map(|t| t.message).collect()
}
