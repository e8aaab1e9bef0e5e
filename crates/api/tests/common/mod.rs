//! Shared fixtures for API integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the same
//! middleware stack (CORS, request ID, timeout, panic recovery) that
//! production uses.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use eduportal_api::auth::capability::CapabilityConfig;
use eduportal_api::auth::jwt::{generate_access_token, JwtConfig};
use eduportal_api::config::ServerConfig;
use eduportal_api::routes;
use eduportal_api::state::AppState;
use eduportal_core::types::DbId;

/// Build a test `ServerConfig` with fixed secrets and safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "jwt-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
        },
        capability: CapabilityConfig {
            secret: "capability-secret-for-integration-tests".to_string(),
        },
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// A `Bearer ...` header value for the given user.
pub fn bearer_for(user_id: DbId, role: &str) -> String {
    let token = generate_access_token(user_id, role, &test_config().jwt)
        .expect("token generation should succeed");
    format!("Bearer {token}")
}

/// Issue a GET request, optionally authenticated.
pub async fn get(app: Router, path: &str, auth: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(auth) = auth {
        builder = builder.header(AUTHORIZATION, auth);
    }
    let request = builder.body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a POST request with a JSON body, optionally authenticated.
pub async fn post_json(
    app: Router,
    path: &str,
    auth: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(AUTHORIZATION, auth);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed data (identity tables are owned by external services in production)
// ---------------------------------------------------------------------------

pub async fn seed_user(pool: &PgPool, username: &str, user_type: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO users (username, first_name, last_name, user_type) \
         VALUES ($1, $2, 'Test', $3) RETURNING id",
    )
    .bind(username)
    .bind(username)
    .bind(user_type)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_general_classroom(pool: &PgPool, name: &str, manager_id: DbId) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO classrooms (name, class_type, max_students, manager_id, join_link) \
         VALUES ($1, 'GENERAL', 8, $2, 'https://meet.example/room') RETURNING id",
    )
    .bind(name)
    .bind(manager_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_support_classroom(
    pool: &PgPool,
    name: &str,
    manager_id: DbId,
    sponsor_id: DbId,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO classrooms (name, class_type, max_students, manager_id, sponsor_id) \
         VALUES ($1, 'SUPPORT', 1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(manager_id)
    .bind(sponsor_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn enroll(pool: &PgPool, classroom_id: DbId, user_id: DbId) {
    sqlx::query("INSERT INTO classroom_members (classroom_id, user_id) VALUES ($1, $2)")
        .bind(classroom_id)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn set_balance(pool: &PgPool, sponsor_id: DbId, balance: i32) {
    sqlx::query(
        "INSERT INTO credit_balances (sponsor_id, balance) VALUES ($1, $2) \
         ON CONFLICT ON CONSTRAINT uq_credit_sponsor DO UPDATE SET balance = $2",
    )
    .bind(sponsor_id)
    .bind(balance)
    .execute(pool)
    .await
    .unwrap();
}
