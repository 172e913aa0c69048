//! Security pipeline
//!
//! An ordered stack of tower layers assembled from [`SecurityConfig`]:
//! trace (outermost), CORS, CSRF, then the access guard in front of the
//! handlers. The guard resolves an identity from, in order, a JWT bearer
//! token, the session cookie, and the remember-me cookie; requests on
//! unauthenticated URLs or outside the authenticated patterns pass through.

pub mod csrf;
pub mod jwt;
pub mod matcher;
pub mod remember_me;
pub mod session;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use shared::error::{AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::SecurityConfig;
use crate::db;
use crate::state::AppState;
use remember_me::{REMEMBER_ME_COOKIE, RememberMeOutcome};
use session::{SESSION_COOKIE, SessionLookup};

/// The authenticated principal, attached as a request extension by the
/// access guard and by the login handler's session issuance.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

/// Wrap a router with the configured security layers
pub fn apply(router: Router, state: AppState) -> Router {
    let security = state.security.clone();
    let mut router = router;

    if security.admin_enabled {
        router = router.layer(middleware::from_fn_with_state(state, access_guard));
    }
    if security.csrf_enabled {
        router = router.layer(middleware::from_fn(csrf::csrf_guard));
    }
    if security.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http())
}

/// Whether the client would rather see a page than a JSON envelope
pub fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// A plain 302 redirect
pub fn redirect_found(url: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
}

fn deny(headers: &HeaderMap, security: &SecurityConfig, error: AppError) -> Response {
    if wants_html(headers) {
        let target = if error.code == ErrorCode::AccountDisabled {
            &security.access_denied_url
        } else {
            &security.login_page
        };
        return redirect_found(target);
    }
    error.into_response()
}

pub(crate) fn session_cookie(id: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, id);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub(crate) fn remember_me_cookie(value: String, validity_secs: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(REMEMBER_ME_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::seconds(validity_secs));
    cookie
}

/// Access guard middleware: requests to protected paths must resolve to an
/// authenticated user or are denied.
pub async fn access_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if state.public.matches(&path) || !state.protected.matches(&path) {
        return next.run(request).await;
    }

    // 1. JWT bearer token
    if state.security.jwt_enabled
        && let Some(auth_header) = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        && let Some(token) = jwt::JwtService::extract_from_header(auth_header)
    {
        match state.jwt.validate_token(token) {
            Ok(claims) => {
                if let Ok(id) = claims.sub.parse::<i32>() {
                    request.extensions_mut().insert(AuthUser {
                        id,
                        username: claims.username,
                    });
                    return next.run(request).await;
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "Bearer token rejected, trying cookies");
            }
        }
    }

    // 2. Session cookie
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        match state.sessions.validate(cookie.value()) {
            SessionLookup::Valid(session) => {
                request.extensions_mut().insert(AuthUser {
                    id: session.user_id,
                    username: session.username,
                });
                return next.run(request).await;
            }
            SessionLookup::Expired => {
                return deny(
                    request.headers(),
                    &state.security,
                    AppError::new(ErrorCode::SessionExpired),
                );
            }
            SessionLookup::Missing => {}
        }
    }

    // 3. Remember-me cookie
    if let Some(cookie) = jar.get(REMEMBER_ME_COOKIE) {
        let validity_ms = state.security.remember_me_validity_secs * 1000;
        match remember_me::validate(&state.pool, cookie.value(), validity_ms).await {
            Ok(RememberMeOutcome::Accepted {
                username,
                cookie_value,
            }) => {
                return resume_from_remember_me(state, jar, request, next, username, cookie_value)
                    .await;
            }
            Ok(RememberMeOutcome::Rejected) => {}
            Err(err) => {
                let error: AppError = err.into();
                return deny(request.headers(), &state.security, error);
            }
        }
    }

    deny(
        request.headers(),
        &state.security,
        AppError::not_authenticated(),
    )
}

/// A remember-me cookie was accepted: load the user, open a fresh session
/// and attach the rotated cookies to the response.
async fn resume_from_remember_me(
    state: AppState,
    jar: CookieJar,
    mut request: Request,
    next: Next,
    username: String,
    cookie_value: String,
) -> Response {
    let user = match db::admin_users::find_by_username(&state.pool, &username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return deny(
                request.headers(),
                &state.security,
                AppError::not_authenticated(),
            );
        }
        Err(err) => {
            let error: AppError = crate::error::ServiceError::from(err).into();
            return deny(request.headers(), &state.security, error);
        }
    };

    if !user.is_active() {
        return deny(
            request.headers(),
            &state.security,
            AppError::new(ErrorCode::AccountDisabled),
        );
    }

    let session_id = match state.sessions.register(
        user.id,
        &user.username,
        state.security.max_sessions,
        state.security.max_sessions_prevents_login,
    ) {
        Ok(id) => id,
        Err(error) => return deny(request.headers(), &state.security, error),
    };

    tracing::info!(username = %user.username, "Authenticated via remember-me cookie");

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
    });

    let jar = jar
        .add(session_cookie(session_id))
        .add(remember_me_cookie(
            cookie_value,
            state.security.remember_me_validity_secs,
        ));

    let response = next.run(request).await;
    (jar, response).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_html() {
        let mut headers = HeaderMap::new();
        assert!(!wants_html(&headers));

        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        assert!(!wants_html(&headers));

        headers.insert(
            header::ACCEPT,
            "text/html,application/xhtml+xml".parse().unwrap(),
        );
        assert!(wants_html(&headers));
    }

    #[test]
    fn test_redirect_found_is_302() {
        let response = redirect_found("/admin/login.html");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin/login.html"
        );
    }
}
