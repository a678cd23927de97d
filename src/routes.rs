//! REST endpoints the chat widget drives, one session per open widget.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;
use uuid::Uuid;

use crate::dialogue::TurnReport;
use crate::error::SessionError;
use crate::session::SessionStore;

/// Shared state for chat routes.
#[derive(Clone)]
pub struct ChatRouteState {
    pub store: Arc<SessionStore>,
}

/// Build the chat REST routes.
pub fn chat_routes(store: Arc<SessionStore>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/chat/sessions", post(open_session))
        .route(
            "/api/chat/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route("/api/chat/sessions/{id}/messages", post(send_message))
        .route("/api/chat/sessions/{id}/reset", post(reset_session))
        .with_state(ChatRouteState { store })
}

/// The chat routes wrapped with the CORS layer the embedded widget needs.
pub fn chat_app(store: Arc<SessionStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    chat_routes(store).layer(ServiceBuilder::new().layer(cors))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "abroad-assist"
    }))
}

#[derive(Debug, Default, Deserialize)]
struct OpenRequest {
    #[serde(default)]
    last_visit: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct OpenResponse {
    session_id: Uuid,
    /// Stamp the caller stores and sends back on the next visit.
    last_visit: DateTime<Utc>,
    #[serde(flatten)]
    report: TurnReport,
}

/// POST /api/chat/sessions
///
/// An empty body is a first visit.
async fn open_session(
    State(state): State<ChatRouteState>,
    body: Option<Json<OpenRequest>>,
) -> impl IntoResponse {
    let Json(request) = body.unwrap_or_default();
    let (session_id, report) = state.store.open(request.last_visit).await;
    (
        StatusCode::CREATED,
        Json(OpenResponse {
            session_id,
            last_visit: Utc::now(),
            report,
        }),
    )
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    text: String,
}

/// POST /api/chat/sessions/{id}/messages
async fn send_message(
    State(state): State<ChatRouteState>,
    Path(id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.store.send(id, &request.text).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => not_found(e),
    }
}

/// POST /api/chat/sessions/{id}/reset
async fn reset_session(State(state): State<ChatRouteState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.store.reset(id).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => not_found(e),
    }
}

/// GET /api/chat/sessions/{id}
///
/// Full conversation state, transcript and profile included.
async fn get_session(State(state): State<ChatRouteState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.store.get(id).await {
        Some(conversation) => Json(conversation).into_response(),
        None => not_found(SessionError::NotFound { id }),
    }
}

/// DELETE /api/chat/sessions/{id}
async fn delete_session(State(state): State<ChatRouteState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    if state.store.remove(id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(SessionError::NotFound { id })
    }
}

fn parse_id(raw: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Invalid session ID"})),
        )
            .into_response()
    })
}

fn not_found(error: SessionError) -> Response {
    warn!(error = %error, "Chat request for unknown session");
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": error.to_string()})),
    )
        .into_response()
}
