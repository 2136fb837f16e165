//! Chat handler: the single engine entry point, exposed over HTTP.

use axum::extract::{Json, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    /// Optional logged-in user, for log correlation only.
    pub user_id: Option<String>,
    pub message: String,
}

/// `POST /v1/chat`: runs one message through the engine and returns the reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<serde_json::Value> {
    let correlation_id = Uuid::new_v4();
    let message = req.message.trim();
    if message.is_empty() {
        return Json(serde_json::json!({
            "status": "error",
            "error": "empty message",
            "correlation_id": correlation_id.to_string(),
        }));
    }

    let reply = state.engine.handle_message(message);
    tracing::info!(
        target: "banter::gateway",
        %correlation_id,
        user_id = ?req.user_id,
        chars = message.len(),
        "chat message handled"
    );
    Json(serde_json::json!({
        "status": "ok",
        "reply": reply,
        "correlation_id": correlation_id.to_string(),
    }))
}
