//! Request handlers for the gateway router.

pub mod auth;
pub mod chat;

use axum::extract::State;
use axum::Json;
use banter_core::WELCOME_MESSAGE;

use crate::AppState;

/// `GET /v1/health`: app identity and table sizes.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "app": state.app_name,
        "welcome": WELCOME_MESSAGE,
        "knowledge_entries": state.engine.knowledge().len(),
        "banned_terms": state.engine.banned().len(),
        "accounts": state.accounts.len(),
    }))
}
