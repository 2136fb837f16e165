//! Login and signup handlers over the file-backed account store.

use axum::extract::{Json, State};
use serde::Deserialize;

use crate::accounts::SignupError;
use crate::AppState;

#[derive(Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// `POST /v1/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<AuthRequest>,
) -> Json<serde_json::Value> {
    let username = req.username.trim();
    if state.accounts.verify(username, req.password.trim()) {
        Json(serde_json::json!({
            "status": "ok",
            "message": format!("Logged in as {}", username),
            "username": username,
        }))
    } else {
        Json(serde_json::json!({
            "status": "error",
            "message": "Login failed: invalid username or password.",
        }))
    }
}

/// `POST /v1/auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<AuthRequest>,
) -> Json<serde_json::Value> {
    let username = req.username.trim();
    match state.accounts.signup(username, req.password.trim()) {
        Ok(()) => Json(serde_json::json!({
            "status": "ok",
            "message": format!("Account created and logged in as {}", username),
            "username": username,
        })),
        Err(e) => {
            let message = match e {
                SignupError::EmptyField => "Sign up failed: enter username and password.".into(),
                SignupError::InvalidCharacter => "Character '|' is not allowed.".into(),
                SignupError::UsernameTaken => "Sign up failed: username already exists.".into(),
                SignupError::Io(err) => format!("Sign up failed: {}", err),
            };
            Json(serde_json::json!({
                "status": "error",
                "message": message,
            }))
        }
    }
}
