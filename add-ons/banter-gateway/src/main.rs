//! Axum-based gateway: HTTP host for the banter responder engine.
//!
//! The engine core is a pure function of (message, tables); this binary owns
//! everything the core excludes: startup table loading, the account store,
//! and the serving surface.

mod accounts;
mod handlers;

use axum::routing::{get, post};
use axum::Router;
use banter_core::{BannedWordSet, CoreConfig, Engine, KnowledgeBase};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accounts::AccountStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) engine: Engine,
    pub(crate) accounts: Arc<AccountStore>,
    pub(crate) app_name: String,
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/chat", post(handlers::chat::chat))
        .route("/v1/auth/login", post(handlers::auth::login))
        .route("/v1/auth/signup", post(handlers::auth::signup))
        .route("/v1/health", get(handlers::health))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CoreConfig::load().expect("load configuration");

    // unreadable sources yield empty tables; the gateway still serves
    let kb = Arc::new(KnowledgeBase::load_path(&config.data_file));
    let banned = Arc::new(BannedWordSet::load_path(&config.banned_file));
    let accounts = Arc::new(AccountStore::open(&config.users_file));
    let engine = Engine::new(kb, banned);

    let app = router(AppState {
        engine,
        accounts,
        app_name: config.app_name.clone(),
    });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(target: "banter::gateway", %addr, app = %config.app_name, "gateway listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        let kb = KnowledgeBase::from_lines("hi|Hello!\nhi there|Hey there!\n");
        let banned = BannedWordSet::from_lines("badword\n");
        AppState {
            engine: Engine::new(Arc::new(kb), Arc::new(banned)),
            accounts: Arc::new(AccountStore::open(dir.path().join("users.txt"))),
            app_name: "Banter Test".to_string(),
        }
    }

    async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> serde_json::Value {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_answers_arithmetic() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));
        let json = post_json(app, "/v1/chat", serde_json::json!({ "message": "2 + 2" })).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["reply"], "4");
        assert!(json.get("correlation_id").is_some());
    }

    #[tokio::test]
    async fn chat_refuses_banned_content() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));
        let json = post_json(
            app,
            "/v1/chat",
            serde_json::json!({ "message": "hey badword" }),
        )
        .await;
        assert_eq!(json["reply"], banter_core::REFUSAL_REPLY);
    }

    #[tokio::test]
    async fn chat_falls_back_on_unknown_input() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));
        let json = post_json(
            app,
            "/v1/chat",
            serde_json::json!({ "message": "qwertyuiop" }),
        )
        .await;
        assert_eq!(json["reply"], banter_core::FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn chat_rejects_empty_messages() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));
        let json = post_json(app, "/v1/chat", serde_json::json!({ "message": "   " })).await;
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn signup_then_login() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let app = router(state.clone());
        let json = post_json(
            app,
            "/v1/auth/signup",
            serde_json::json!({ "username": "alice", "password": "secret" }),
        )
        .await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "Account created and logged in as alice");

        let app = router(state.clone());
        let json = post_json(
            app,
            "/v1/auth/login",
            serde_json::json!({ "username": "alice", "password": "secret" }),
        )
        .await;
        assert_eq!(json["status"], "ok");

        let app = router(state);
        let json = post_json(
            app,
            "/v1/auth/login",
            serde_json::json!({ "username": "alice", "password": "nope" }),
        )
        .await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Login failed: invalid username or password.");
    }

    #[tokio::test]
    async fn duplicate_signup_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let app = router(state.clone());
        post_json(
            app,
            "/v1/auth/signup",
            serde_json::json!({ "username": "alice", "password": "secret" }),
        )
        .await;

        let app = router(state);
        let json = post_json(
            app,
            "/v1/auth/signup",
            serde_json::json!({ "username": "alice", "password": "other" }),
        )
        .await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Sign up failed: username already exists.");
    }

    #[tokio::test]
    async fn health_reports_table_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_state(&dir));
        let req = Request::builder()
            .method("GET")
            .uri("/v1/health")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["knowledge_entries"], 2);
        assert_eq!(json["banned_terms"], 1);
    }
}
