//! Security pipeline behavior over the assembled router
//!
//! The pool is lazy and never touched: every request here is resolved by the
//! middleware stack or the router before any query would run.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use admin_server::api;
use admin_server::config::{Config, SecurityConfig};
use admin_server::security::jwt::{JwtConfig, JwtService};
use admin_server::security::session::SESSION_COOKIE;
use admin_server::state::AppState;

const JWT_SECRET: &str = "test-secret-key-at-least-32-chars-long";

fn test_config(security: SecurityConfig) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        http_port: 0,
        environment: "development".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiration_minutes: 60,
        security,
    }
}

fn build_state(security: SecurityConfig) -> AppState {
    let pool = PgPool::connect_lazy("postgres://unused@localhost/unused")
        .expect("lazy pool");
    AppState::with_pool(pool, &test_config(security))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn guarded_path_without_identity_is_unauthorized() {
    let app = api::create_router(build_state(SecurityConfig::default()));

    let response = app
        .oneshot(
            Request::get("/admin/api/adminNotice/list")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 1001);
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn html_client_is_redirected_to_login_page() {
    let app = api::create_router(build_state(SecurityConfig::default()));

    let response = app
        .oneshot(
            Request::get("/admin/api/adminNotice/list")
                .header(header::ACCEPT, "text/html,application/xhtml+xml")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/login.html"
    );
}

#[tokio::test]
async fn unguarded_path_bypasses_the_guard() {
    let app = api::create_router(build_state(SecurityConfig::default()));

    // outside the authenticated patterns, so the router's 404 answers
    let response = app
        .oneshot(Request::get("/public/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn disabling_admin_auth_removes_the_guard() {
    let security = SecurityConfig {
        admin_enabled: false,
        ..SecurityConfig::default()
    };
    let app = api::create_router(build_state(security));

    let response = app
        .oneshot(
            Request::get("/admin/api/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn csrf_rejects_write_without_header() {
    let security = SecurityConfig {
        csrf_enabled: true,
        ..SecurityConfig::default()
    };
    let app = api::create_router(build_state(security));

    // login is on the unauthenticated list, so only CSRF stands in the way
    let response = app
        .oneshot(
            Request::post("/admin/api/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"a","password":"b"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], 2002);
}

#[tokio::test]
async fn csrf_seeds_token_cookie_on_safe_request() {
    let security = SecurityConfig {
        csrf_enabled: true,
        ..SecurityConfig::default()
    };
    let app = api::create_router(build_state(security));

    let response = app
        .oneshot(Request::get("/public/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(set_cookie.starts_with("XSRF-TOKEN="));
}

#[tokio::test]
async fn valid_jwt_bearer_passes_the_guard() {
    let app = api::create_router(build_state(SecurityConfig::default()));

    let jwt = JwtService::new(JwtConfig {
        secret: JWT_SECRET.to_string(),
        expiration_minutes: 60,
        issuer: "admin-server".to_string(),
    });
    let token = jwt.generate_token(1, "admin").unwrap();

    // past the guard, the unknown resource 404s instead of 401ing
    let response = app
        .oneshot(
            Request::get("/admin/api/nope")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_jwt_bearer_still_denied() {
    let app = api::create_router(build_state(SecurityConfig::default()));

    let response = app
        .oneshot(
            Request::get("/admin/api/nope")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_cookie_passes_the_guard() {
    let state = build_state(SecurityConfig::default());
    let session_id = state.sessions.register(1, "admin", 1, false).unwrap();
    let app = api::create_router(state);

    let response = app
        .oneshot(
            Request::get("/admin/api/nope")
                .header(header::COOKIE, format!("{SESSION_COOKIE}={session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn evicted_session_reports_session_expired() {
    let state = build_state(SecurityConfig::default());
    let first = state.sessions.register(1, "admin", 1, false).unwrap();
    // second login evicts the first under max_sessions = 1
    let _second = state.sessions.register(1, "admin", 1, false).unwrap();
    let app = api::create_router(state);

    let response = app
        .oneshot(
            Request::get("/admin/api/nope")
                .header(header::COOKIE, format!("{SESSION_COOKIE}={first}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 1005);
}

#[tokio::test]
async fn custom_authenticated_patterns_are_honored() {
    let security = SecurityConfig {
        authenticated_urls: vec!["/only/this/**".to_string()],
        ..SecurityConfig::default()
    };
    let app = api::create_router(build_state(security));

    let guarded = app
        .clone()
        .oneshot(
            Request::get("/only/this/path")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(guarded.status(), StatusCode::UNAUTHORIZED);

    let open = app
        .oneshot(
            Request::get("/admin/api/adminNotice/list")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    // now outside the authenticated set; fails later at the database
    assert_ne!(open.status(), StatusCode::UNAUTHORIZED);
}
