use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;

use mentora_api::auth::jwt::{generate_access_token, JwtConfig};
use mentora_api::config::ServerConfig;
use mentora_api::engine::{PlaybackSessions, SampleWriter};
use mentora_api::router::build_app_router;
use mentora_api::state::AppState;
use mentora_api::ws::WsManager;
use mentora_core::catalog::PackageCatalog;
use mentora_core::types::DbId;
use mentora_events::{ChangeBus, MetricsProjection};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers and live
/// background services (sample writer, metrics projection), using the
/// given database pool.
///
/// This mirrors the wiring in `main.rs` so integration tests exercise the
/// same stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let change_bus = Arc::new(ChangeBus::default());
    let (sample_tx, _writer_handle) = SampleWriter::spawn(pool.clone(), Arc::clone(&change_bus));
    let projection = MetricsProjection::spawn(pool.clone(), &change_bus);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        catalog: Arc::new(PackageCatalog::builtin()),
        ws_manager: Arc::new(WsManager::new()),
        change_bus,
        sessions: Arc::new(PlaybackSessions::new()),
        sample_tx,
        metrics: projection.subscribe(),
    };

    build_app_router(state, &config)
}

/// A `Bearer` header value for the given student.
pub fn bearer(student_id: DbId, role: &str) -> String {
    let token = generate_access_token(student_id, role, &test_config().jwt)
        .expect("token generation should succeed");
    format!("Bearer {token}")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Build an authenticated request with an optional JSON body.
pub fn request(
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    }
}
